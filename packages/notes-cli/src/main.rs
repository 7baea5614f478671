//! Terminal client for the notes service

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notes_store::{ColorCatalog, NoteId, NoteStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod interactive;
mod render;

use config::Config;

#[derive(Parser)]
#[command(name = "notes")]
#[command(about = "Create, search and organize notes")]
#[command(version)]
struct Cli {
    /// Base URL of the notes API (overrides NOTES_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides NOTES_API_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all notes, favorites first
    List,

    /// Show notes matching a query
    Search {
        /// Text to look for in titles, descriptions and color names
        query: String,
    },

    /// Create a note
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Hex code, color name or localized name
        #[arg(short, long)]
        color: Option<String>,

        /// Mark as favorite
        #[arg(short, long)]
        favorite: bool,
    },

    /// Change a note's title or description
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Toggle a note's favorite flag
    Favorite { id: String },

    /// Change a note's color
    Color {
        id: String,

        /// Hex code, color name or localized name
        color: String,
    },

    /// Delete a note
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List the available colors
    Colors,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging (stderr keeps the terminal view clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,notes_store=info,notes_client=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // The palette needs no server
    if let Some(Commands::Colors) = cli.command {
        commands::colors(&ColorCatalog::builtin());
        return Ok(());
    }

    let config = Config::from_env(cli.api_url, cli.timeout_secs)?;
    tracing::debug!(api_url = %config.api_url, "Connecting to notes API");

    let client = Arc::new(config.client()?);
    let (store, loading) = NoteStore::connect(client, ColorCatalog::builtin(), config.store_config());

    let Some(command) = cli.command else {
        let subscription = store.subscribe()?;
        return interactive::run(&store, subscription).await;
    };

    loading
        .await
        .context("Load task panicked")?
        .context("Erro ao buscar notas")?;

    match command {
        Commands::List => commands::list(&store),
        Commands::Search { query } => commands::search(&store, &query),
        Commands::Add {
            title,
            description,
            color,
            favorite,
        } => commands::add(&store, title, description, color, favorite).await?,
        Commands::Edit {
            id,
            title,
            description,
        } => commands::edit(&store, &NoteId::from(id), title, description).await?,
        Commands::Favorite { id } => commands::favorite(&store, &NoteId::from(id)).await?,
        Commands::Color { id, color } => {
            commands::color(&store, &NoteId::from(id), &color).await?
        }
        Commands::Delete { id, yes } => {
            commands::delete(&store, &NoteId::from(id), yes).await?
        }
        Commands::Colors => commands::colors(store.catalog()),
    }

    Ok(())
}
