//! postalstore CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postalstore::cli::{Cli, Commands, OutputFormat};
use postalstore::output::{pretty, to_json};
use postalstore::{build_repository, Config};
use postalstore_core::postal::{NewPostalCode, PostalCodeUpdate};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "postalstore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let repository = build_repository(&config).await?;

    match cli.command {
        Commands::List => {
            let postal_codes = repository.get_postal_codes().await?;
            match cli.format {
                OutputFormat::Json => println!("{}", to_json(&postal_codes)),
                OutputFormat::Pretty => {
                    println!("{}", pretty::format_postal_codes(&postal_codes))
                }
            }
        }
        Commands::ByLocation { location_id } => {
            let postal_codes = repository.get_postal_codes_by_location(location_id).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", to_json(&postal_codes)),
                OutputFormat::Pretty => {
                    println!("{}", pretty::format_postal_codes(&postal_codes))
                }
            }
        }
        Commands::Get { code } => match repository.get_postal_code(&code).await? {
            Some(postal_code) => match cli.format {
                OutputFormat::Json => println!("{}", to_json(&postal_code)),
                OutputFormat::Pretty => println!("{}", pretty::format_postal_code(&postal_code)),
            },
            None => {
                if !cli.quiet {
                    println!("No postal code {code}");
                }
            }
        },
        Commands::Add { code, location_id } => {
            let created = repository
                .create_postal_code(&NewPostalCode::new(code, location_id))
                .await?;
            match cli.format {
                OutputFormat::Json => println!("{}", to_json(&created)),
                OutputFormat::Pretty => {
                    println!("Created:\n{}", pretty::format_postal_code(&created))
                }
            }
        }
        Commands::Update {
            id,
            code,
            location_id,
        } => {
            let mut changes = PostalCodeUpdate::new();
            if let Some(code) = code {
                changes = changes.with_code(code);
            }
            if let Some(location_id) = location_id {
                changes = changes.with_location_id(location_id);
            }
            let updated = repository.update_postal_code(id, &changes).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", to_json(&updated)),
                OutputFormat::Pretty => {
                    println!("Updated:\n{}", pretty::format_postal_code(&updated))
                }
            }
        }
        Commands::Remove { id } => {
            repository.delete_postal_code(id).await?;
            if !cli.quiet {
                println!("Deleted postal code {id}");
            }
        }
    }

    Ok(())
}
