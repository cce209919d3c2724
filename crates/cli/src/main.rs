//! Message Board CLI - inspection and management tools.
//!
//! # Usage
//!
//! ```bash
//! # List every message, newest first
//! board-cli list
//!
//! # Post a message
//! board-cli post -n Alice -m "Hello there"
//!
//! # Create the createdAt index on the messages collection
//! board-cli setup
//! ```
//!
//! Connection settings come from the same environment variables as the
//! server (`BOARD_MONGODB_URI`, `BOARD_DATABASE`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use message_board_web::config::BoardConfig;

mod commands;

#[derive(Parser)]
#[command(name = "board-cli")]
#[command(author, version, about = "Message board CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all messages, newest first
    List,
    /// Post a new message
    Post {
        /// Author name
        #[arg(short, long)]
        name: String,

        /// Message body
        #[arg(short, long)]
        message: String,
    },
    /// Create indexes on the messages collection
    Setup,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = match BoardConfig::from_env() {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &BoardConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::List => commands::messages::list(config).await?,
        Commands::Post { name, message } => {
            commands::messages::post(config, name, message).await?;
        }
        Commands::Setup => commands::setup::run(config).await?,
    }
    Ok(())
}
