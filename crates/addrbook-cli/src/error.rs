use addrbook_config::ConfigError;
use addrbook_core::{CoreError, ErrorKind};
use addrbook_store::error::{StoreError, StoreErrorKind};
use anyhow::Error;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("missing argument for {command}: usage: {usage}")]
    MissingArgument {
        command: &'static str,
        usage: &'static str,
    },
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn missing_argument(command: &'static str, usage: &'static str) -> Error {
    CliError::MissingArgument { command, usage }.into()
}

pub fn report_error(err: &Error, verbose: bool) {
    eprintln!("{}", render_error(err, verbose));
}

/// One-line message shown for a failed command.
pub fn render_error(err: &Error, verbose: bool) -> String {
    if verbose {
        format!("error: {:#}", err)
    } else {
        format!("error: {}", err)
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    ExitCode::from(exit_code_value(err))
}

fn exit_code_value(err: &Error) -> u8 {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return match cli_err {
                CliError::InvalidInput(_) | CliError::MissingArgument { .. } => EXIT_INVALID_INPUT,
            };
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return store_exit_code(store_err);
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_exit_code(config_err);
        }
        if let Some(core_err) = cause.downcast_ref::<CoreError>() {
            return core_exit_code(core_err);
        }
    }
    EXIT_FAILURE
}

fn core_exit_code(err: &CoreError) -> u8 {
    match err.kind() {
        ErrorKind::Validation => EXIT_INVALID_INPUT,
        ErrorKind::NotFound => EXIT_NOT_FOUND,
    }
}

fn store_exit_code(err: &StoreError) -> u8 {
    match err.kind() {
        StoreErrorKind::InvalidDataPath
        | StoreErrorKind::UnsupportedVersion
        | StoreErrorKind::Json
        | StoreErrorKind::Core => EXIT_INVALID_INPUT,
        StoreErrorKind::MissingHomeDir
        | StoreErrorKind::Migration
        | StoreErrorKind::Sql
        | StoreErrorKind::Io => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidUpcomingDays(_)
        | ConfigError::InvalidStorageBackend(_)
        | ConfigError::InvalidInterface(_)
        | ConfigError::InvalidStoragePath(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}
