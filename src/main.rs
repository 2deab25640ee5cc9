//! CLI entry point for content-store

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use content_store::content::{parse_date_string, Facet, ListFilter};
use content_store::ContentStore;

#[derive(Parser)]
#[command(name = "content-store")]
#[command(version)]
#[command(about = "Load, validate and query front-matter content", long_about = None)]
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
    /// List published documents, newest first
    #[command(alias = "ls")]
    List {
        /// Only documents with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Only documents in this category
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Only documents dated on or after this date
        #[arg(long)]
        since: Option<String>,

        /// Only documents dated on or before this date
        #[arg(long)]
        until: Option<String>,
    },

    /// Show one document, drafts included
    Show {
        /// Document path, e.g. posts/my-post
        path: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate every document and report errors
    Check,

    /// Create a new document
    New {
        /// Title of the new document
        title: String,

        /// Document path (defaults to posts/<slug>)
        #[arg(short, long)]
        path: Option<String>,

        /// Mark the document as a draft
        #[arg(long)]
        draft: bool,
    },

    /// List tags with their usage counts
    Tags,

    /// List categories with their usage counts
    Categories,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "content_store=debug,info"
    } else {
        "content_store=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let store = ContentStore::new(&base_dir)?;

    match cli.command {
        Commands::List {
            tag,
            category,
            since,
            until,
        } => {
            let tz = store.config.tz()?;
            let parse = |value: &str| {
                parse_date_string(value, &tz)
                    .ok_or_else(|| anyhow::anyhow!("Invalid date: {}", value))
            };

            let filter = ListFilter {
                tag,
                category,
                since: since.as_deref().map(parse).transpose()?,
                until: until.as_deref().map(parse).transpose()?,
            };
            content_store::commands::list::run(&store, &filter)?;
        }

        Commands::Show { path, json } => {
            content_store::commands::show::run(&store, &path, json)?;
        }

        Commands::Check => {
            content_store::commands::check::run(&store)?;
        }

        Commands::New { title, path, draft } => {
            tracing::info!("Creating new document with title: {}", title);
            let file = content_store::commands::new::create_document(
                &store,
                &title,
                path.as_deref(),
                draft,
            )?;
            println!("Created: {:?}", file);
        }

        Commands::Tags => {
            content_store::commands::list::run_terms(&store, Facet::Tags)?;
        }

        Commands::Categories => {
            content_store::commands::list::run_terms(&store, Facet::Categories)?;
        }
    }

    Ok(())
}
