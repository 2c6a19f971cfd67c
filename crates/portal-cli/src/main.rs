//! Referral portal CLI.

mod commands;
mod output;

use clap::{Parser, Subcommand};

/// Referral portal CLI for staff accounts and client portal access.
#[derive(Parser)]
#[command(name = "refportal")]
#[command(about = "Referral portal CLI for staff and client portal access")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Staff login with email and password
    Login,

    /// Register a staff account
    Register,

    /// Client portal access
    Portal {
        #[command(subcommand)]
        command: PortalCommands,
    },

    /// Show session status
    Status,

    /// Log out and clear stored credentials
    Logout,

    /// List assigned game credentials (masked)
    Credentials,

    /// Reveal the credential pair for a game, with a countdown
    Reveal {
        /// Game ID
        game_id: String,
    },
}

#[derive(Subcommand)]
enum PortalCommands {
    /// Client login with username and password
    Login,

    /// Sign in with a magic-link token
    Link {
        /// Link token
        token: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let app = match commands::bootstrap(cli.log_level.as_deref()).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Login => commands::login(&app, &cli.format).await,
        Commands::Register => commands::register(&app, &cli.format).await,
        Commands::Portal { command } => match command {
            PortalCommands::Login => commands::portal_login(&app, &cli.format).await,
            PortalCommands::Link { token } => {
                commands::portal_link(&app, &token, &cli.format).await
            }
        },
        Commands::Status => commands::status(&app, &cli.format).await,
        Commands::Logout => commands::logout(&app, &cli.format).await,
        Commands::Credentials => commands::credentials_list(&app, &cli.format).await,
        Commands::Reveal { game_id } => commands::reveal(&app, &game_id, &cli.format).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
