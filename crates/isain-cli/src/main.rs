//! Isain CLI - sign up, sign in and rate destinations from the terminal.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod logging;
mod settings;

use commands::{App, CliError};
use logging::LogFormat;
use settings::Settings;

/// Isain - travel destinations, on your device
#[derive(Parser, Debug)]
#[command(name = "isain")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Data directory (store and isain.toml)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Send notifications to the log instead of the terminal
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an account and sign in
    Signup {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Password (8+ characters, upper, lower and digit); read from stdin when omitted
        #[arg(long, env = "ISAIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign in to an existing account
    Signin {
        /// Email address
        #[arg(long)]
        email: String,
        /// Password; read from stdin when omitted
        #[arg(long, env = "ISAIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out
    Signout,

    /// Show the signed-in account
    Whoami {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the profile of the signed-in account
    Profile {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Rate a destination (1-5 stars)
    Rate {
        /// Destination ID
        destination: String,
        /// Star rating
        stars: u8,
    },

    /// List registered accounts
    Accounts {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Rejections were already reported by the notifier.
            if !matches!(e.downcast_ref::<CliError>(), Some(CliError::Rejected)) {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Version = cli.command {
        println!("isain {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let settings = Settings::load(cli.data_dir.as_deref()).context("failed to load settings")?;

    let log_level = match cli.verbose {
        0 => settings.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    logging::init_logging(log_level, LogFormat::parse(&settings.log_format));

    tracing::debug!(
        data_dir = %settings.data_dir.display(),
        backend = ?settings.backend,
        "Loaded settings"
    );

    let app = App::open(&settings, cli.quiet).context("failed to open store")?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Signup {
            name,
            email,
            password,
        } => {
            let password = commands::resolve_password(password, &mut std::io::stdin().lock())?;
            commands::signup(&app, &name, &email, &password)?
        }
        Commands::Signin { email, password } => {
            let password = commands::resolve_password(password, &mut std::io::stdin().lock())?;
            commands::signin(&app, &email, &password)?
        }
        Commands::Signout => commands::signout(&app)?,
        Commands::Whoami { json } => commands::whoami(&app, json, &mut stdout)?,
        Commands::Profile { json } => commands::profile(&app, json, &mut stdout)?,
        Commands::Rate { destination, stars } => commands::rate(&app, &destination, stars)?,
        Commands::Accounts { json } => commands::accounts(&app, json, &mut stdout)?,
        // Printed before the store is opened.
        Commands::Version => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rate() {
        let cli = Cli::parse_from(["isain", "--data-dir", "/tmp/x", "rate", "santorini", "4"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(
            cli.command,
            Commands::Rate { ref destination, stars: 4 } if destination == "santorini"
        ));
    }

    #[test]
    fn test_parse_signup() {
        let cli = Cli::parse_from([
            "isain", "-vv", "signup", "--name", "Jane Doe", "--email", "jane@example.com",
            "--password", "Abcdef12",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Signup { password: Some(ref p), .. } if p == "Abcdef12"
        ));
    }

    #[test]
    fn test_parse_signin_without_password() {
        // Only meaningful when the variable is not set in the test environment.
        if std::env::var_os("ISAIN_PASSWORD").is_some() {
            return;
        }
        let cli = Cli::parse_from(["isain", "signin", "--email", "jane@example.com"]);
        assert!(matches!(cli.command, Commands::Signin { password: None, .. }));
    }
}
