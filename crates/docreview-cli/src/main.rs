//! docreview: command-line client for the document review service.
//!
//! Set DOCREVIEW_API_URL (or API_BASE_URL). Limits and the accepted formats come from
//! DOCREVIEW_MAX_FILE_SIZE_MB and DOCREVIEW_ALLOWED_CONTENT_TYPES.

use anyhow::Context;
use clap::{Parser, Subcommand};
use docreview_api_client::{ApiClient, ReviewApi, ReviewSession, TemplateType};
use docreview_cli::{
    describe_file, init_tracing, load_candidate, progress_line, render_receipt, render_review,
    OutputFormat,
};
use docreview_core::{Config, FileValidator};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docreview", about = "Document review client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a document and wait for its review
    Review {
        /// Path to the document
        file: PathBuf,
        /// Review template: academic, business or code
        #[arg(long, default_value = "academic")]
        template: TemplateType,
        /// Override the MIME type derived from the file extension
        #[arg(long)]
        content_type: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Queue a review for a document already stored on the server
    Submit {
        /// Document ID
        document_id: String,
        #[arg(long, default_value = "academic")]
        template: TemplateType,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Fetch the result of a submitted review
    Result {
        /// Task ID returned by `submit`
        task_id: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Validate a document locally without uploading it
    Check {
        file: PathBuf,
        #[arg(long)]
        content_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()
        .context("Failed to load configuration. Check the DOCREVIEW_* environment variables")?;

    match cli.command {
        Commands::Review {
            file,
            template,
            content_type,
            format,
        } => {
            let file = load_candidate(&file, content_type.as_deref(), &config)?;
            eprintln!("{}", describe_file(&file));

            let client = ApiClient::from_config(&config)?;
            let mut session = ReviewSession::new(client, FileValidator::from_config(&config));
            session.select(file)?;

            let outcome = session
                .upload(template, |pct| eprint!("\r{}", progress_line(pct)))
                .await;
            eprintln!();

            let result = outcome?;
            if let Some(status) = session.state().status() {
                eprintln!("{}", status);
            }
            println!("{}", render_review(&result, format)?);
        }
        Commands::Submit {
            document_id,
            template,
            format,
        } => {
            let client = ApiClient::from_config(&config)?;
            let receipt = client.submit_review(&document_id, template).await?;
            println!("{}", render_receipt(&receipt, format)?);
        }
        Commands::Result { task_id, format } => {
            let client = ApiClient::from_config(&config)?;
            let result = client.get_review_result(&task_id).await?;
            println!("{}", render_review(&result, format)?);
        }
        Commands::Check { file, content_type } => {
            let file = load_candidate(&file, content_type.as_deref(), &config)?;
            FileValidator::from_config(&config).validate(&file)?;
            println!("{} is ready for review", describe_file(&file));
        }
    }

    Ok(())
}
