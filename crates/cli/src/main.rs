//! restcart CLI - database migrations and operator tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! rc-cli migrate
//!
//! # Wipe all rows and restart id counters (test databases only)
//! rc-cli reset --force
//!
//! # Register a user who can call the authenticated routes
//! rc-cli user create -u adminuser -p adminpw
//! ```
//!
//! Connection settings come from the same environment as the server
//! (`RESTCART_DATABASE_URL`, `.env`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "rc-cli")]
#[command(author, version, about = "restcart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Delete every row and restart identity counters
    Reset {
        /// Required; this destroys all data
        #[arg(long)]
        force: bool,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a new user
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password (hashed before storage)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Reset { force } => commands::reset::run(force).await?,
        Commands::User { action } => match action {
            UserAction::Create { username, password } => {
                commands::user::create(&username, &password).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_user_create() {
        let cli = Cli::try_parse_from(["rc-cli", "user", "create", "-u", "alice", "-p", "pw"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::User {
                action: UserAction::Create { ref username, ref password }
            }) if username == "alice" && password == "pw"
        ));
    }

    #[test]
    fn test_reset_defaults_to_not_forced() {
        let cli = Cli::try_parse_from(["rc-cli", "reset"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Reset { force: false })
        ));
    }
}
