use crate::commands::{dispatch, help_text, parse_input, Command, Context};
use crate::error::{invalid_input, render_error};
use crate::messenger::Messenger;
use addrbook_core::rules::local_today;
use addrbook_core::AddressBook;
use anyhow::Result;
use chrono::NaiveDate;
use std::io::BufRead;
use tracing::debug;

pub const PROMPT: &str = "Enter a command: ";

pub struct SessionOptions {
    pub upcoming_days: i64,
    pub verbose: bool,
    /// Fixed reference date; the local calendar date is used when unset.
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Exit,
    EndOfInput,
}

/// Reads commands line by line until `close`/`exit` or end of input. Command
/// failures and undecodable lines are reported through `messenger` and never
/// end the session. An `Err` means the input or output stream itself failed;
/// the book still holds every change made before that point.
pub fn run<R: BufRead, M: Messenger>(
    book: &mut AddressBook,
    mut input: R,
    messenger: &mut M,
    options: &SessionOptions,
) -> Result<SessionEnd> {
    messenger.send(&help_text())?;

    let mut buf = Vec::new();
    loop {
        messenger.prompt(PROMPT)?;
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(SessionEnd::EndOfInput);
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(err) => {
                debug!(error = %err, "undecodable input line");
                let err = invalid_input("input line is not valid UTF-8");
                messenger.send(&render_error(&err, options.verbose))?;
                continue;
            }
        };
        let Some((word, args)) = parse_input(line) else {
            continue;
        };
        let Some(command) = Command::parse(word) else {
            debug!(command = word, "unknown command");
            messenger.send("Invalid command.")?;
            continue;
        };

        debug!(command = command.name(), args = args.len(), "dispatch");
        let mut ctx = Context {
            book: &mut *book,
            today: options.today.unwrap_or_else(local_today),
            upcoming_days: options.upcoming_days,
        };
        match dispatch(&mut ctx, command, &args) {
            Ok(reply) => messenger.send(&reply)?,
            Err(err) => {
                debug!(error = %err, "command failed");
                messenger.send(&render_error(&err, options.verbose))?;
            }
        }

        if command == Command::Exit {
            return Ok(SessionEnd::Exit);
        }
    }
}
