//! Demonstration workflow: a fixed sequence of schema, mutation, and
//! lookup calls exercising every operation against a fresh schema.

use anyhow::Result;
use tracing::{debug, info};

use crate::db::Database;
use crate::models::{ClientFilter, ClientPatch};

/// Run the demonstration sequence. Resets the schema first.
pub async fn run(db: &Database) -> Result<()> {
    // A fresh database has nothing to drop yet.
    if let Err(err) = db.drop_schema().await {
        debug!("drop_schema skipped: {err}");
    }
    db.create_schema().await?;
    info!("schema created");

    let dmitry = db
        .add_client(
            "Dmitry",
            "Dmitriev",
            "dmitriev@example.com",
            Some("+79879789970"),
        )
        .await?;
    let oleg = db
        .add_client("Oleg", "Olegov", "olegov@example.com", Some("+79879782397"))
        .await?;
    let ivan = db
        .add_client("Ivan", "Ivanov", "ivanov@example.com", Some("+79879732397"))
        .await?;
    info!("three clients added");

    db.add_phone(dmitry, "+79879732323").await?;
    db.add_phone(oleg, "+74287973232").await?;
    db.add_phone(ivan, "+74287377323").await?;

    let patch = ClientPatch {
        email: Some("oleg2@example.com".into()),
        ..ClientPatch::default()
    };
    db.update_client(oleg, &patch).await?;
    info!(client_id = oleg, "email changed");

    db.add_phone(dmitry, "+7956").await?;
    db.update_phone(dmitry, "+7956", "+79999").await?;

    db.delete_phone(dmitry, "+79879789970").await?;

    db.delete_client(ivan).await?;
    info!(client_id = ivan, "client deleted");

    let by_first_name = ClientFilter {
        first_name: Some("Oleg".into()),
        ..ClientFilter::default()
    };
    print_matches(db, "first_name = Oleg", &by_first_name).await?;

    let by_last_name = ClientFilter {
        last_name: Some("Dmitriev".into()),
        ..ClientFilter::default()
    };
    print_matches(db, "last_name = Dmitriev", &by_last_name).await?;

    let by_email = ClientFilter {
        email: Some("oleg2@example.com".into()),
        ..ClientFilter::default()
    };
    print_matches(db, "email = oleg2@example.com", &by_email).await?;

    let by_phone = ClientFilter {
        phone: Some("+79999".into()),
        ..ClientFilter::default()
    };
    print_matches(db, "phone = +79999", &by_phone).await?;

    Ok(())
}

async fn print_matches(db: &Database, label: &str, filter: &ClientFilter) -> Result<()> {
    println!("-- {label}");
    for row in db.find_client(filter).await? {
        println!(
            "{}\t{} {}\t{}\t{}",
            row.id,
            row.first_name,
            row.last_name,
            row.email,
            row.phone.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
