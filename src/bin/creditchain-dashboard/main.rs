//! creditchain-dashboard CLI entry point.

mod cli;
mod render;

use clap::Parser;
use cli::{Cli, Command};
use creditchain_dashboard::{Dashboard, DocumentFile, StorageClient};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let (config, command) = cli.into_parts()?;

    match command {
        Command::Status => {
            let dashboard = Dashboard::connect(&config)?;
            dashboard.ensure_participant().await?;
            let state = dashboard.load().await?;
            println!("account        {}", dashboard.account());
            render::overview(&state);
        }

        Command::Documents => {
            let dashboard = Dashboard::connect(&config)?;
            dashboard.ensure_participant().await?;
            let state = dashboard.load().await?;
            render::documents(&state.documents);
        }

        Command::Submit { file, doc_type } => {
            let dashboard = Dashboard::connect(&config)?;
            dashboard.ensure_participant().await?;
            let document = DocumentFile::from_path(&file).await?;
            info!(name = document.name, bytes = document.size(), "submitting");

            let mut events = dashboard.subscribe();
            let printer = async {
                while let Ok(event) = events.recv().await {
                    println!("{}", render::event_line(&event));
                    if event.is_terminal() {
                        break;
                    }
                }
            };
            let (receipt, ()) = tokio::join!(dashboard.submit(document, doc_type.into()), printer);
            let receipt = receipt?;

            println!();
            println!("stored as      {}", receipt.storage_key);
            println!("identifier     {}", receipt.document_hash);
            println!(
                "transaction    {} (block {})",
                receipt.tx_hash, receipt.block_number
            );
            render::overview(&receipt.state);
        }

        Command::Criteria => render::criteria_table(),

        Command::Url { key, expires_secs } => {
            let storage = StorageClient::new(&config.storage)?;
            println!("{}", storage.presigned_url(&key, expires_secs)?);
        }

        Command::Rm { key } => {
            let storage = StorageClient::new(&config.storage)?;
            storage.delete_document(&key).await?;
            println!("deleted {key}");
        }
    }

    Ok(())
}
