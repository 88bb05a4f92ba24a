mod commands;
mod error;
mod messenger;
mod session;

use anyhow::{Context as _, Result};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::error::{exit_code_for, invalid_input, report_error};
use crate::messenger::TerminalMessenger;
use crate::session::SessionOptions;
use addrbook_config::{self as config, Interface, StorageBackend};
use addrbook_store::{paths, BookStore, JsonStore, Store};

#[derive(Debug, Parser)]
#[command(name = "addrbook", version, about = "Contact book with birthday reminders")]
struct Cli {
    /// Address book file (defaults to the data directory)
    #[arg(long)]
    data_path: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Storage backend: sqlite or json
    #[arg(long, value_name = "BACKEND")]
    storage: Option<StorageBackend>,
    /// Message interface: terminal or web
    #[arg(long, value_name = "INTERFACE")]
    interface: Option<Interface>,
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        data_path,
        config: config_path,
        storage,
        interface,
        verbose,
    } = cli;

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    if interface.unwrap_or(app_config.interface) == Interface::Web {
        return Err(invalid_input("web interface is not available yet"));
    }

    let backend = storage.unwrap_or(app_config.storage.backend);
    let custom_path = data_path.or_else(|| app_config.storage.path.clone());
    let book_path = paths::resolve_book_path(custom_path, file_name_for(backend))
        .with_context(|| "resolve data path")?;
    debug!(path = %book_path.display(), backend = backend.as_str(), "data path resolved");

    let store = open_store(backend, &book_path)?;
    let mut book = store
        .load()
        .with_context(|| format!("load address book {}", book_path.display()))?;
    debug!(contacts = book.len(), "address book loaded");

    let options = SessionOptions {
        upcoming_days: app_config.upcoming_days,
        verbose,
        today: None,
    };
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut messenger = TerminalMessenger::new(io::stdout(), interactive);
    let outcome = session::run(&mut book, stdin.lock(), &mut messenger, &options);

    // Saved even when the session stream failed, so earlier edits survive.
    store
        .save(&book)
        .with_context(|| format!("save address book {}", book_path.display()))?;
    debug!(contacts = book.len(), "address book saved");

    let end = outcome.with_context(|| "read commands")?;
    debug!(?end, "session finished");
    Ok(())
}

fn file_name_for(backend: StorageBackend) -> &'static str {
    match backend {
        StorageBackend::Sqlite => paths::SQLITE_FILENAME,
        StorageBackend::Json => paths::JSON_FILENAME,
    }
}

fn open_store(backend: StorageBackend, path: &std::path::Path) -> Result<Box<dyn BookStore>> {
    match backend {
        StorageBackend::Sqlite => {
            let store = Store::open(path)
                .with_context(|| format!("open database {}", path.display()))?;
            store.migrate().with_context(|| "run migrations")?;
            Ok(Box::new(store))
        }
        StorageBackend::Json => Ok(Box::new(JsonStore::new(path))),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
