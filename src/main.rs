use anyhow::Result;
use clap::{Parser, Subcommand};

use client_registry::models::{ClientFilter, ClientPatch};
use client_registry::{config, db, demo, logging};

/// Client and phone record management over PostgreSQL
#[derive(Parser, Debug)]
#[command(name = "client-registry")]
#[command(about = "Client record management tool", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the client and phone tables
    Init,
    /// Drop the client and phone tables
    Drop,
    /// Add a client, optionally with a first phone number
    AddClient {
        first_name: String,
        last_name: String,
        email: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Update the supplied fields of a client
    UpdateClient {
        id: i32,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a client and its phone numbers
    DeleteClient { id: i32 },
    /// List all clients
    ListClients,
    /// Add a phone number to a client
    AddPhone { client_id: i32, phone: String },
    /// Replace one of a client's phone numbers
    UpdatePhone {
        client_id: i32,
        old_phone: String,
        new_phone: String,
    },
    /// Delete one of a client's phone numbers
    DeletePhone { client_id: i32, phone: String },
    /// List a client's phone numbers
    ListPhones { client_id: i32 },
    /// Look up clients by first name, last name, email, or phone
    Find {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Run the demonstration workflow against a fresh schema
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = config::init()?;

    // Initialize logging
    logging::init();

    // Initialize database connection
    let db = db::init(&config).await?;

    match args.command {
        Command::Init => {
            db.create_schema().await?;
            println!("schema created");
        }
        Command::Drop => {
            db.drop_schema().await?;
            println!("schema dropped");
        }
        Command::AddClient {
            first_name,
            last_name,
            email,
            phone,
        } => {
            let id = db
                .add_client(&first_name, &last_name, &email, phone.as_deref())
                .await?;
            println!("client {id} added");
        }
        Command::UpdateClient {
            id,
            first_name,
            last_name,
            email,
        } => {
            let patch = ClientPatch {
                first_name,
                last_name,
                email,
            };
            let changed = db.update_client(id, &patch).await?;
            if changed == 0 {
                println!("nothing updated");
            } else {
                let client = db.get_client(id).await?;
                println!(
                    "{}\t{} {}\t{}",
                    client.id, client.first_name, client.last_name, client.email
                );
            }
        }
        Command::DeleteClient { id } => {
            let deleted = db.delete_client(id).await?;
            println!("{deleted} client(s) deleted");
        }
        Command::ListClients => {
            for client in db.list_clients().await? {
                println!(
                    "{}\t{} {}\t{}",
                    client.id, client.first_name, client.last_name, client.email
                );
            }
        }
        Command::AddPhone { client_id, phone } => {
            let id = db.add_phone(client_id, &phone).await?;
            println!("phone {id} added");
        }
        Command::UpdatePhone {
            client_id,
            old_phone,
            new_phone,
        } => {
            let changed = db.update_phone(client_id, &old_phone, &new_phone).await?;
            println!("{changed} phone(s) updated");
        }
        Command::DeletePhone { client_id, phone } => {
            let deleted = db.delete_phone(client_id, &phone).await?;
            println!("{deleted} phone(s) deleted");
        }
        Command::ListPhones { client_id } => {
            for phone in db.phones_for_client(client_id).await? {
                println!("{}\t{}", phone.id, phone.phone);
            }
        }
        Command::Find {
            first_name,
            last_name,
            email,
            phone,
        } => {
            let filter = ClientFilter {
                first_name,
                last_name,
                email,
                phone,
            };
            for row in db.find_client(&filter).await? {
                println!(
                    "{}\t{} {}\t{}\t{}",
                    row.id,
                    row.first_name,
                    row.last_name,
                    row.email,
                    row.phone.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Demo => {
            demo::run(&db).await?;
        }
    }

    Ok(())
}
