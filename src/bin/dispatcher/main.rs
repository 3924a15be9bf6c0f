#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Sends a single email through the dispatch pipeline

use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::Parser;
use mail_dispatch::{
    domain::communication::{
        dispatch::{DispatchOutcome, DispatchService, DispatchServiceImpl},
        mailer::Message,
    },
    infrastructure::{
        database::postgres::{DatabaseConnectionDetails, PostgresDatabase},
        email::{DeliveryProvider, MailerConfig},
    },
};
use tracing::info;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// Recipient address; repeat for several
    #[arg(long = "to")]
    pub to: Vec<String>,

    /// The subject line
    #[arg(long, default_value = "")]
    pub subject: String,

    /// The HTML body
    #[arg(long, default_value = "")]
    pub html: String,

    /// Read the message from a JSON file (`{"to": [...], "subject": ..., "html": ...}`)
    /// instead of `--to`, `--subject` and `--html`
    #[arg(long, conflicts_with_all = ["to", "subject", "html"])]
    pub message_file: Option<PathBuf>,

    /// Create the suppression list tables before sending
    #[arg(long)]
    pub migrate: bool,

    /// The database connection details
    #[clap(flatten)]
    pub db: DatabaseConnectionDetails,

    /// The delivery backend configuration
    #[clap(flatten)]
    pub mailer: MailerConfig,
}

impl Args {
    fn message(&self) -> Result<Message> {
        match &self.message_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;

                serde_json::from_str(&raw)
                    .with_context(|| format!("failed to parse {}", path.display()))
            }
            None => Ok(Message::new(self.to.clone(), &self.subject, &self.html)),
        }
    }
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let message = args.message()?;

    let postgres = Arc::new(PostgresDatabase::new(&args.db.connection_string).await?);

    if args.migrate {
        postgres.migrate().await?;
    }

    let provider = Arc::new(DeliveryProvider::connect(&args.mailer).await?);

    let dispatcher = DispatchServiceImpl::new(postgres, provider, args.mailer.sender.sender());

    match dispatcher.dispatch(&message).await {
        DispatchOutcome::Sent(message_id) => {
            println!("{}", message_id);
            Ok(())
        }
        DispatchOutcome::Skipped(reason) => {
            info!("nothing sent: {:?}", reason);
            Ok(())
        }
        DispatchOutcome::Failed(err) => bail!("email dispatch failed: {}", err),
    }
}
