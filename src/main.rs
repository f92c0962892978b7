// src/main.rs
//
// `storefront-admin` command line. Every command prints JSON on stdout:
// `{ "result": ..., "notifications": [...] }`. Failures print a serialized
// ErrorResponse on stderr and exit non-zero.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use storefront_admin::application::commands::*;
use storefront_admin::application::dto::{CommandOutput, CreateProductDto, UpdateProductDto};
use storefront_admin::application::AdminState;
use storefront_admin::config::{AdminConfig, BackendKind};
use storefront_admin::services::Locale;

/// Storefront Admin - back office for products, blog, site content and inbox
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Storage backend: sqlite or rest
    #[arg(long, env = "STOREFRONT_BACKEND")]
    backend: Option<String>,

    /// SQLite database file (sqlite backend)
    #[arg(long, env = "STOREFRONT_DATABASE_PATH")]
    database: Option<PathBuf>,

    /// Administrator to sign in as against the local store
    #[arg(long = "as", env = "STOREFRONT_ADMIN_EMAIL")]
    admin_email: Option<String>,

    /// Language of notifications: en or de
    #[arg(long, env = "STOREFRONT_LOCALE")]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or migrate the local database
    InitDb,

    /// List every record of a table
    List { table: String },

    /// Show one record
    Get { table: String, id: String },

    /// Show the next display number / position of a table
    NextId { table: String },

    /// Product catalog
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },

    /// Contact form inbox, newest first
    Messages {
        /// Only unread messages
        #[arg(long)]
        unread: bool,

        #[command(subcommand)]
        action: Option<MessagesAction>,
    },

    /// Delete a record of any table by id
    Delete { table: String, id: String },
}

#[derive(Subcommand, Debug)]
enum ProductAction {
    /// Create a product with the next display number
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },

    /// Change fields of a product (by id or display number)
    Update {
        product: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a product (by id or display number)
    Delete { product: String },

    /// Upload an image and attach it to a product
    UploadImage { product: String, file: PathBuf },
}

#[derive(Subcommand, Debug)]
enum MessagesAction {
    /// Mark a message as read
    Read { id: String },
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("storefront_admin=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<AdminConfig> {
    let mut config = AdminConfig::from_env()?;

    if let Some(backend) = &args.backend {
        config.backend = backend.parse::<BackendKind>()?;
    }
    if let Some(database) = &args.database {
        config.database_path = Some(database.clone());
    }
    if let Some(email) = &args.admin_email {
        config.admin_email = Some(email.clone());
    }
    if let Some(locale) = &args.locale {
        config.locale = locale.parse::<Locale>()?;
    }

    config.validate()?;
    Ok(config)
}

/// Print the command outcome with the notifications it raised.
fn report<T: Serialize>(state: &AdminState, outcome: Result<T, String>) -> Result<()> {
    let notifications = state.drain_notifications();

    match outcome {
        Ok(result) => {
            let output = CommandOutput {
                result,
                notifications,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(error) => {
            for notification in &notifications {
                log::warn!("{}", notification.message);
            }
            eprintln!("{}", error);
            anyhow::bail!("command failed")
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let config = load_config(&args)?;

    if let Command::InitDb = args.command {
        return match init_database(&config).await {
            Ok(stats) => {
                let output = CommandOutput {
                    result: stats,
                    notifications: Vec::new(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
                Ok(())
            }
            Err(error) => {
                eprintln!("{}", error);
                anyhow::bail!("database initialization failed")
            }
        };
    }

    let state = AdminState::from_config(config)?;

    match args.command {
        Command::InitDb => Ok(()),
        Command::List { table } => report(&state, list_records(&state, table).await),
        Command::Get { table, id } => report(&state, get_record(&state, table, id).await),
        Command::NextId { table } => report(&state, get_next_sequence(&state, table).await),
        Command::Delete { table, id } => report(&state, delete_record(&state, table, id).await),
        Command::Product { action } => match action {
            ProductAction::Create {
                name,
                price,
                description,
                category,
            } => {
                let dto = CreateProductDto {
                    name,
                    description,
                    price,
                    category,
                };
                report(&state, create_product(&state, dto).await)
            }
            ProductAction::Update {
                product,
                name,
                price,
                description,
                category,
                active,
            } => {
                let dto = UpdateProductDto {
                    product,
                    name,
                    description,
                    price,
                    category,
                    is_active: active,
                };
                report(&state, update_product(&state, dto).await)
            }
            ProductAction::Delete { product } => {
                report(&state, delete_product(&state, product).await)
            }
            ProductAction::UploadImage { product, file } => {
                report(&state, upload_product_image(&state, product, file).await)
            }
        },
        Command::Messages { unread, action } => match action {
            Some(MessagesAction::Read { id }) => {
                report(&state, mark_message_read(&state, id).await)
            }
            None => report(&state, list_messages(&state, unread).await),
        },
    }
}
