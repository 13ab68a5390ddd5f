//! CLI command implementations.
//!
//! Each command runs one identity operation against the [`App`] context.
//! Outcome messages reach the user through the app's notifier; commands
//! only write their own data (profile, account list) to `out`.

use crate::settings::{Backend, Settings};
use chrono::Utc;
use isain_auth::{
    AuthError, IdentityManager, Notifier, ProfileSummary, Severity, TracingNotifier,
};
use isain_storage::{FileStore, KvStore, MemoryStore, StorageError};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::sync::Arc;
use thiserror::Error;

/// CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("output error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend was not compiled into this binary.
    #[error("backend '{0}' is not available in this build")]
    BackendUnavailable(&'static str),

    /// The command needs a signed-in account.
    #[error("Not signed in")]
    NotSignedIn,

    /// The operation was refused; the notifier already told the user why.
    #[error("operation failed")]
    Rejected,
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Prints notifications to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success => println!("{message}"),
            Severity::Error => eprintln!("error: {message}"),
        }
    }
}

/// The identity manager as wired up for this process.
pub type Manager = IdentityManager<Box<dyn KvStore>, Arc<dyn Notifier>>;

/// Application context: constructed once, passed to every command.
pub struct App {
    pub manager: Manager,
}

impl App {
    /// Open the configured store and restore the session.
    ///
    /// With `quiet`, notifications go to the log instead of the terminal.
    pub fn open(settings: &Settings, quiet: bool) -> Result<Self> {
        let notifier: Arc<dyn Notifier> = if quiet {
            Arc::new(TracingNotifier)
        } else {
            Arc::new(ConsoleNotifier)
        };
        Ok(Self::with_notifier(open_store(settings)?, notifier))
    }

    /// Build an app around an already-open store.
    pub fn with_notifier(store: Box<dyn KvStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            manager: IdentityManager::new(store, notifier),
        }
    }
}

/// Open the backend selected in `settings`.
pub fn open_store(settings: &Settings) -> Result<Box<dyn KvStore>> {
    tracing::debug!(backend = ?settings.backend, data_dir = %settings.data_dir.display(), "Opening store");

    match settings.backend {
        Backend::File => Ok(Box::new(FileStore::open(settings.store_path())?)),
        Backend::Memory => Ok(Box::new(MemoryStore::new())),
        Backend::Rocksdb => open_rocksdb(settings),
    }
}

#[cfg(feature = "rocksdb-backend")]
fn open_rocksdb(settings: &Settings) -> Result<Box<dyn KvStore>> {
    Ok(Box::new(isain_storage::RocksDbStore::open_default(settings.rocksdb_path())?))
}

#[cfg(not(feature = "rocksdb-backend"))]
fn open_rocksdb(_settings: &Settings) -> Result<Box<dyn KvStore>> {
    Err(CliError::BackendUnavailable("rocksdb"))
}

fn outcome(ok: bool) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(CliError::Rejected)
    }
}

/// The password from `--password` / `ISAIN_PASSWORD`, else the first line of `input`.
///
/// The trailing line ending is stripped; other whitespace is kept.
pub fn resolve_password(given: Option<String>, input: &mut dyn BufRead) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }

    tracing::debug!("Reading password from stdin");
    let mut line = String::new();
    input.read_line(&mut line)?;
    let len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(len);
    Ok(line)
}

/// Create an account and sign in.
pub fn signup(app: &App, name: &str, email: &str, password: &str) -> Result<()> {
    outcome(app.manager.register(name, email, password))
}

/// Sign in.
pub fn signin(app: &App, email: &str, password: &str) -> Result<()> {
    outcome(app.manager.authenticate(email, password))
}

/// Sign out.
pub fn signout(app: &App) -> Result<()> {
    app.manager.end_session();
    Ok(())
}

/// Show who is signed in.
pub fn whoami(app: &App, json: bool, out: &mut dyn Write) -> Result<()> {
    match app.manager.current_session() {
        Some(account) if json => writeln!(out, "{}", serde_json::to_string_pretty(&account)?)?,
        Some(account) => writeln!(out, "{} <{}>", account.name, account.email)?,
        None if json => writeln!(out, "null")?,
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}

/// Show the profile of the signed-in account.
pub fn profile(app: &App, json: bool, out: &mut dyn Write) -> Result<()> {
    let account = app.manager.current_session().ok_or(CliError::NotSignedIn)?;
    let rated = app.manager.ratings().rated_count()?;
    let summary = ProfileSummary::for_account(&account, rated, Utc::now());

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }

    writeln!(out, "Name:               {}", summary.name)?;
    writeln!(out, "Email:              {}", summary.email)?;
    writeln!(out, "Member since:       {}", summary.member_since)?;
    writeln!(out, "Days as member:     {}", summary.days_as_member)?;
    writeln!(out, "Destinations rated: {}", summary.destinations_rated)?;
    Ok(())
}

/// Rate a destination.
pub fn rate(app: &App, destination: &str, stars: u8) -> Result<()> {
    outcome(app.manager.ratings().rate(destination, stars))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountRow<'a> {
    id: &'a str,
    name: &'a str,
    email: &'a str,
    created_at: String,
    signed_in: bool,
}

/// List registered accounts (never their passwords).
pub fn accounts(app: &App, json: bool, out: &mut dyn Write) -> Result<()> {
    let accounts = app.manager.accounts()?;
    let current = app.manager.current_session().map(|a| a.email);

    let rows: Vec<AccountRow<'_>> = accounts
        .iter()
        .map(|a| AccountRow {
            id: &a.id,
            name: &a.name,
            email: &a.email,
            created_at: a.created_at_iso(),
            signed_in: current.as_deref() == Some(a.email.as_str()),
        })
        .collect();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }

    if rows.is_empty() {
        writeln!(out, "No accounts registered")?;
        return Ok(());
    }

    for row in rows {
        let marker = if row.signed_in { "*" } else { " " };
        writeln!(out, "{} {:<15} {:<30} {} {}", marker, row.id, row.email, row.created_at, row.name)?;
    }
    Ok(())
}
