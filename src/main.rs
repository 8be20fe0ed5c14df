//! CLI entry point for lectern

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lectern::content::CollectionOptions;
use lectern::Lectern;

#[derive(Parser)]
#[command(name = "lectern")]
#[command(version)]
#[command(about = "Loads and orders front-matter tagged blog content", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the published collection, newest first
    List {
        /// Include draft documents
        #[arg(long)]
        drafts: bool,

        /// Print the collection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load every document and report the ones that fail
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "lectern=debug,info"
    } else {
        "lectern=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List { drafts, json } => {
            let lectern = Lectern::new(&base_dir)?;
            let options = CollectionOptions {
                include_drafts: drafts || lectern.config.include_drafts,
            };
            let (documents, errors) = lectern.collection(&options)?;

            for error in &errors {
                tracing::warn!("skipped {}", error);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&documents)?);
            } else {
                println!("Documents ({}):", documents.len());
                for doc in &documents {
                    println!(
                        "  {} - {} [{}]",
                        doc.date.format("%Y-%m-%d"),
                        doc.title,
                        doc.source
                    );
                }
            }
        }

        Commands::Check => {
            let lectern = Lectern::new(&base_dir)?;
            let report = lectern.load()?;

            println!(
                "Loaded {} document(s), {} error(s)",
                report.documents.len(),
                report.errors.len()
            );
            for error in &report.errors {
                println!("  {}", error);
            }

            if report.has_errors() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
