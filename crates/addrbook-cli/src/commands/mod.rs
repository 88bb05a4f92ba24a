use crate::error::missing_argument;
use addrbook_core::AddressBook;
use anyhow::Result;
use chrono::NaiveDate;

pub mod birthdays;
pub mod contacts;

pub const WELCOME: &str = "Welcome to the assistant bot!";

pub const HELP: &str = "Available commands:
  - hello: Say hello.
  - add <name> [phone]: Add a contact or add a phone to an existing one.
  - change <name> <old_phone> <new_phone>: Replace a phone number.
  - phone <name>: Show the phone numbers of a contact.
  - all: Show all contacts.
  - delete <name>: Delete a contact.
  - add-birthday <name> <DD.MM.YYYY>: Set the birthday of a contact.
  - show-birthday <name>: Show the birthday of a contact.
  - birthdays: Show birthdays coming up soon.
  - command: Show this list.
  - close/exit: Save and quit.";

pub struct Context<'a> {
    pub book: &'a mut AddressBook,
    pub today: NaiveDate,
    pub upcoming_days: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Hello,
    Help,
    Add,
    Change,
    Phone,
    All,
    Delete,
    AddBirthday,
    ShowBirthday,
    Birthdays,
    Exit,
}

impl Command {
    pub fn parse(word: &str) -> Option<Self> {
        let command = match word.to_lowercase().as_str() {
            "hello" => Command::Hello,
            "command" | "help" => Command::Help,
            "add" => Command::Add,
            "change" => Command::Change,
            "phone" => Command::Phone,
            "all" => Command::All,
            "delete" => Command::Delete,
            "add-birthday" => Command::AddBirthday,
            "show-birthday" => Command::ShowBirthday,
            "birthdays" => Command::Birthdays,
            "close" | "exit" => Command::Exit,
            _ => return None,
        };
        Some(command)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Hello => "hello",
            Command::Help => "command",
            Command::Add => "add",
            Command::Change => "change",
            Command::Phone => "phone",
            Command::All => "all",
            Command::Delete => "delete",
            Command::AddBirthday => "add-birthday",
            Command::ShowBirthday => "show-birthday",
            Command::Birthdays => "birthdays",
            Command::Exit => "exit",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Command::Hello => "hello",
            Command::Help => "command",
            Command::Add => "add <name> [phone]",
            Command::Change => "change <name> <old_phone> <new_phone>",
            Command::Phone => "phone <name>",
            Command::All => "all",
            Command::Delete => "delete <name>",
            Command::AddBirthday => "add-birthday <name> <DD.MM.YYYY>",
            Command::ShowBirthday => "show-birthday <name>",
            Command::Birthdays => "birthdays",
            Command::Exit => "exit",
        }
    }
}

/// Splits a line into the command word and its arguments. Returns `None` for
/// blank lines.
pub fn parse_input(line: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = line.split_whitespace();
    let command = parts.next()?;
    Some((command, parts.collect()))
}

pub fn help_text() -> String {
    format!("{WELCOME}\n{HELP}")
}

/// Runs one command against the book and returns the reply text. For `Exit`
/// this is only the farewell; ending the session is up to the caller.
pub fn dispatch(ctx: &mut Context<'_>, command: Command, args: &[&str]) -> Result<String> {
    match command {
        Command::Hello => Ok("How can I help you?".to_string()),
        Command::Help => Ok(help_text()),
        Command::Add => contacts::add_contact(ctx, args),
        Command::Change => contacts::change_phone(ctx, args),
        Command::Phone => contacts::show_phones(ctx, args),
        Command::All => Ok(contacts::all_contacts(ctx)),
        Command::Delete => contacts::delete_contact(ctx, args),
        Command::AddBirthday => birthdays::add_birthday(ctx, args),
        Command::ShowBirthday => birthdays::show_birthday(ctx, args),
        Command::Birthdays => Ok(birthdays::upcoming_birthdays(ctx)),
        Command::Exit => Ok("Good bye!".to_string()),
    }
}

pub(crate) fn required_arg<'a>(
    args: &[&'a str],
    index: usize,
    command: Command,
) -> Result<&'a str> {
    args.get(index)
        .copied()
        .ok_or_else(|| missing_argument(command.name(), command.usage()))
}


#[cfg(test)]
mod tests {
    use super::test_support::run;
    use super::{parse_input, Command};
    use crate::error::CliError;
    use addrbook_core::AddressBook;

    #[test]
    fn parse_input_splits_words() {
        let (command, args) = parse_input("  add   Ada  0501234567 ").unwrap();
        assert_eq!(command, "add");
        assert_eq!(args, ["Ada", "0501234567"]);
        assert!(parse_input("   ").is_none());
    }

    #[test]
    fn command_words_are_case_insensitive() {
        assert_eq!(Command::parse("ADD"), Some(Command::Add));
        assert_eq!(Command::parse("Show-Birthday"), Some(Command::ShowBirthday));
        assert_eq!(Command::parse("close"), Some(Command::Exit));
        assert_eq!(Command::parse("help"), Some(Command::Help));
        assert_eq!(Command::parse("frobnicate"), None);
    }

    #[test]
    fn hello_and_help() {
        let mut book = AddressBook::new();
        assert_eq!(run(&mut book, "hello").unwrap(), "How can I help you?");
        let help = run(&mut book, "command").unwrap();
        assert!(help.starts_with("Welcome to the assistant bot!"));
        assert!(help.contains("add-birthday <name> <DD.MM.YYYY>"));
    }

    #[test]
    fn missing_arguments_are_typed() {
        let mut book = AddressBook::new();
        let err = run(&mut book, "change Ada 0501234567").unwrap_err();
        match err.downcast_ref::<CliError>() {
            Some(CliError::MissingArgument { command, usage }) => {
                assert_eq!(*command, "change");
                assert_eq!(*usage, "change <name> <old_phone> <new_phone>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
