//! Larder CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run schema and session-store migrations
//! larder-cli migrate
//!
//! # Create a user
//! larder-cli user create -e cook@example.com -u cook -p 'correct horse'
//!
//! # Load recipes from a JSON (or YAML) file
//! larder-cli recipes seed recipes.json
//! ```
//!
//! All commands read `LARDER_DATABASE_URL` (or `DATABASE_URL`), loading `.env`
//! when present.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "larder-cli")]
#[command(author, version, about = "Larder CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations (tables and session store)
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage the recipe catalogue
    Recipes {
        #[command(subcommand)]
        action: RecipesAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum RecipesAction {
    /// Insert recipes from a JSON or YAML file
    Seed {
        /// File holding an array of `{name, ingredients, instructions, steps}`
        file: PathBuf,

        /// Check the file without touching the database
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                username,
                password,
            } => {
                commands::user::create(&email, &username, &password).await?;
            }
        },
        Commands::Recipes { action } => match action {
            RecipesAction::Seed { file, dry_run } => {
                commands::recipes::seed(&file, dry_run).await?;
            }
        },
    }
    Ok(())
}
