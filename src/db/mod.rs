use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::debug;

use crate::config::Config;
use crate::error::StoreError;
use crate::models::{Client, ClientContact, ClientFilter, ClientPatch, Phone};

const FIND_CLIENT_BASE: &str = "\
SELECT c.id, c.first_name, c.last_name, c.email, cp.phone \
FROM client c \
LEFT JOIN client_phone cp ON c.id = cp.client_id";

/// UPDATE statement for the given assignment columns; the client id binds
/// after the values.
fn update_client_sql(columns: &[&str]) -> String {
    let assignments = columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", column, i + 1))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE client SET {} WHERE id = ${}",
        assignments,
        columns.len() + 1
    )
}

fn find_client_sql(column: Option<&str>) -> String {
    match column {
        Some(column) => format!("{FIND_CLIENT_BASE} WHERE {column} = $1 ORDER BY c.id, cp.id"),
        None => format!("{FIND_CLIENT_BASE} ORDER BY c.id, cp.id"),
    }
}

/// Database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(config: &Config) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(config.database_url())
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    // Schema operations

    /// Ensure both tables and their constraints exist. Safe to call on an
    /// already provisioned database.
    pub async fn create_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS client(
                id SERIAL PRIMARY KEY,
                first_name VARCHAR(100) NOT NULL,
                last_name VARCHAR(100) NOT NULL,
                email VARCHAR(320) UNIQUE NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS client_phone(
                id SERIAL PRIMARY KEY,
                client_id INTEGER NOT NULL REFERENCES client(id) ON DELETE CASCADE,
                phone VARCHAR(20) UNIQUE NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        debug!("schema ready");
        Ok(())
    }

    /// Drop both tables. Errors if they do not exist.
    pub async fn drop_schema(&self) -> Result<(), StoreError> {
        sqlx::query("DROP TABLE client_phone")
            .execute(&self.pool)
            .await?;
        sqlx::query("DROP TABLE client").execute(&self.pool).await?;

        debug!("schema dropped");
        Ok(())
    }

    // Client operations

    /// Insert a client, with its first phone number when one is supplied.
    /// The client insert and the phone insert commit as one unit.
    pub async fn add_client(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> Result<i32, StoreError> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO client (first_name, last_name, email)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(phone) = phone {
            sqlx::query("INSERT INTO client_phone (client_id, phone) VALUES ($1, $2)")
                .bind(id)
                .bind(phone)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        debug!(client_id = id, "client added");
        Ok(id)
    }

    pub async fn get_client(&self, id: i32) -> Result<Client, StoreError> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, first_name, last_name, email FROM client WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, first_name, last_name, email FROM client ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Update the fields present in `patch`. An empty patch is a no-op.
    /// Returns the number of rows changed (0 when `id` is unknown).
    pub async fn update_client(&self, id: i32, patch: &ClientPatch) -> Result<u64, StoreError> {
        let (columns, values) = patch.assignments();
        if columns.is_empty() {
            debug!(client_id = id, "empty patch, nothing to update");
            return Ok(0);
        }

        let sql = update_client_sql(&columns);
        let mut query = sqlx::query(&sql);
        for value in values {
            query = query.bind(value);
        }

        let result = query.bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    /// Delete a client; owned phone rows go with it via the cascade.
    /// Returns 0 (no error) for an unknown id.
    pub async fn delete_client(&self, id: i32) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM client WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Left join of clients to their phones, filtered by at most one
    /// criterion (see [`ClientFilter::criterion`]).
    pub async fn find_client(
        &self,
        filter: &ClientFilter,
    ) -> Result<Vec<ClientContact>, StoreError> {
        let rows = match filter.criterion() {
            Some((column, value)) => {
                sqlx::query_as::<_, ClientContact>(&find_client_sql(Some(column)))
                    .bind(value)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as::<_, ClientContact>(&find_client_sql(None))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows)
    }

    // Phone operations

    pub async fn add_phone(&self, client_id: i32, phone: &str) -> Result<i32, StoreError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO client_phone (client_id, phone) VALUES ($1, $2) RETURNING id",
        )
        .bind(client_id)
        .bind(phone)
        .fetch_one(&self.pool)
        .await?;

        debug!(client_id, phone_id = id, "phone added");
        Ok(id)
    }

    /// Rename a phone matched by owner and current value. Zero rows when
    /// nothing matches; not an error.
    pub async fn update_phone(
        &self,
        client_id: i32,
        old_phone: &str,
        new_phone: &str,
    ) -> Result<u64, StoreError> {
        let result =
            sqlx::query("UPDATE client_phone SET phone = $1 WHERE client_id = $2 AND phone = $3")
                .bind(new_phone)
                .bind(client_id)
                .bind(old_phone)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    /// Delete a phone matched by owner and value; silent no-op otherwise.
    pub async fn delete_phone(&self, client_id: i32, phone: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM client_phone WHERE client_id = $1 AND phone = $2")
            .bind(client_id)
            .bind(phone)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn phones_for_client(&self, client_id: i32) -> Result<Vec<Phone>, StoreError> {
        let phones = sqlx::query_as::<_, Phone>(
            "SELECT id, client_id, phone FROM client_phone WHERE client_id = $1 ORDER BY id ASC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(phones)
    }
}

/// Initialize the database connection pool
pub async fn init(config: &Config) -> Result<Database, StoreError> {
    let db = Database::new(config).await?;

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_sql_numbers_placeholders_in_order() {
        assert_eq!(
            update_client_sql(&["first_name", "email"]),
            "UPDATE client SET first_name = $1, email = $2 WHERE id = $3"
        );
        assert_eq!(
            update_client_sql(&["last_name"]),
            "UPDATE client SET last_name = $1 WHERE id = $2"
        );
    }

    #[test]
    fn find_sql_without_criterion_has_no_where_clause() {
        let sql = find_client_sql(None);
        assert!(!sql.contains("WHERE"));
        assert!(sql.contains("LEFT JOIN client_phone"));
        assert!(sql.ends_with("ORDER BY c.id, cp.id"));
    }

    #[test]
    fn find_sql_filters_on_the_given_column() {
        let sql = find_client_sql(Some("cp.phone"));
        assert!(sql.contains("WHERE cp.phone = $1"));
    }
}
