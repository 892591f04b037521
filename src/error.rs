use thiserror::Error;

/// Storage-layer failures. Constraint violations get their own variants so
/// callers can react to them without parsing engine messages.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound("row not found".into()),
            sqlx::Error::Database(db_err) => {
                // PostgreSQL SQLSTATE: 23505 unique_violation, 23503 foreign_key_violation
                match db_err.code().as_deref() {
                    Some("23505") => StoreError::DuplicateKey(db_err.message().to_string()),
                    Some("23503") => StoreError::ForeignKeyViolation(db_err.message().to_string()),
                    _ => StoreError::Database(sqlx::Error::Database(db_err)),
                }
            }
            other => StoreError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error: StoreError = sqlx::Error::RowNotFound.into();
        match error {
            StoreError::NotFound(msg) => assert_eq!(msg, "row not found"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn non_database_errors_stay_wrapped() {
        let error: StoreError = sqlx::Error::PoolClosed.into();
        assert!(matches!(error, StoreError::Database(_)));
    }

    #[test]
    fn display_formats() {
        assert_eq!(
            format!("{}", StoreError::DuplicateKey("email taken".into())),
            "duplicate key: email taken"
        );
        assert_eq!(
            format!("{}", StoreError::ForeignKeyViolation("no such client".into())),
            "foreign key violation: no such client"
        );
        assert_eq!(
            format!("{}", StoreError::NotFound("client 7".into())),
            "not found: client 7"
        );
    }
}
