//! CLI entry point for garden-rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use garden_rs::og::OgQuery;

#[derive(Parser)]
#[command(name = "garden-rs")]
#[command(version)]
#[command(about = "Publish a digital garden as markdown, sitemaps and preview images", long_about = None)]
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
    /// Write raw markdown exports and sitemaps to the public folder
    #[command(alias = "b")]
    Build {
        /// Rebuild whenever content changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Serve the export endpoints
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4321")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List garden entries, newest first
    List {
        /// Also list drafts
        #[arg(long)]
        drafts: bool,
    },

    /// Render an Open Graph preview image to a file
    Og {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        stage: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Output PNG path
        #[arg(short, long, default_value = "og.png")]
        output: PathBuf,
    },

    /// Remove generated exports from the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "garden_rs=debug,info"
    } else {
        "garden_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    match cli.command {
        Commands::Build { watch } => {
            let garden = garden_rs::Garden::new(&base_dir)?;
            tracing::info!("Building exports...");

            garden.build()?;
            println!("Built successfully!");

            if watch {
                garden_rs::commands::build::watch(&garden).await?;
            }
        }

        Commands::Serve { port, ip } => {
            let garden = garden_rs::Garden::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            garden_rs::server::start(&garden, &ip, port).await?;
        }

        Commands::List { drafts } => {
            let garden = garden_rs::Garden::new(&base_dir)?;
            garden_rs::commands::list::run(&garden, drafts)?;
        }

        Commands::Og {
            title,
            stage,
            description,
            output,
        } => {
            let garden = garden_rs::Garden::new(&base_dir)?;
            let query = OgQuery {
                title,
                stage,
                description,
            };
            garden_rs::commands::og::run(&garden, query, &output)?;
            println!("Wrote {}", output.display());
        }

        Commands::Clean => {
            let garden = garden_rs::Garden::new(&base_dir)?;
            tracing::info!("Cleaning exports...");
            garden.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("garden-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
