use crate::commands::{required_arg, Command, Context};
use addrbook_core::domain::Birthday;
use addrbook_core::CoreError;
use anyhow::Result;
use tracing::debug;

pub fn add_birthday(ctx: &mut Context<'_>, args: &[&str]) -> Result<String> {
    let name = required_arg(args, 0, Command::AddBirthday)?;
    let raw = required_arg(args, 1, Command::AddBirthday)?;

    let record = ctx
        .book
        .find_mut(name)
        .ok_or_else(|| CoreError::ContactNotFound(name.to_string()))?;
    record.set_birthday(Birthday::parse_on(raw, ctx.today)?);
    debug!(name, birthday = raw, "birthday set");
    Ok(format!("Birthday added for {name}."))
}

pub fn show_birthday(ctx: &mut Context<'_>, args: &[&str]) -> Result<String> {
    let name = required_arg(args, 0, Command::ShowBirthday)?;
    let record = ctx
        .book
        .find(name)
        .ok_or_else(|| CoreError::ContactNotFound(name.to_string()))?;
    match record.birthday() {
        Some(birthday) => Ok(format!("Birthday for {name}: {birthday}")),
        None => Ok(format!("No birthday set for {name}.")),
    }
}

pub fn upcoming_birthdays(ctx: &Context<'_>) -> String {
    let days = ctx.upcoming_days;
    let upcoming = ctx.book.upcoming_birthdays_within(ctx.today, days);
    debug!(count = upcoming.len(), days, "upcoming birthdays computed");

    if upcoming.is_empty() {
        return format!("No upcoming birthdays in the next {days} days.");
    }

    let mut lines = vec![format!("Upcoming birthdays (next {days} days):")];
    for item in upcoming {
        lines.push(format!("  {}  {}", item.formatted_date(), item.name));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use crate::commands::test_support::{run, today};
    use crate::commands::{dispatch, Command, Context};
    use addrbook_core::{AddressBook, CoreError};

    #[test]
    fn add_and_show_birthday() {
        let mut book = AddressBook::new();
        run(&mut book, "add Ada").unwrap();
        assert_eq!(
            run(&mut book, "show-birthday Ada").unwrap(),
            "No birthday set for Ada."
        );
        assert_eq!(
            run(&mut book, "add-birthday Ada 12.06.1990").unwrap(),
            "Birthday added for Ada."
        );
        assert_eq!(
            run(&mut book, "show-birthday Ada").unwrap(),
            "Birthday for Ada: 12.06.1990"
        );
    }

    #[test]
    fn add_birthday_rejects_future_and_malformed() {
        let mut book = AddressBook::new();
        run(&mut book, "add Ada").unwrap();

        let err = run(&mut book, "add-birthday Ada 11.06.2024").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::BirthdayInFuture(_))
        ));
        let err = run(&mut book, "add-birthday Ada 2024-01-01").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidBirthdayFormat(_))
        ));
        assert!(book.find("Ada").unwrap().birthday().is_none());
    }

    #[test]
    fn add_birthday_requires_contact() {
        let mut book = AddressBook::new();
        let err = run(&mut book, "add-birthday Ada 12.06.1990").unwrap_err();
        assert_eq!(err.to_string(), "contact not found: Ada");
    }

    #[test]
    fn birthdays_report() {
        let mut book = AddressBook::new();
        assert_eq!(
            run(&mut book, "birthdays").unwrap(),
            "No upcoming birthdays in the next 7 days."
        );

        for line in [
            "add Ada",
            "add-birthday Ada 12.06.1990",
            "add Grace",
            "add-birthday Grace 15.06.1990",
            "add Linus",
            "add-birthday Linus 01.01.1990",
        ] {
            run(&mut book, line).unwrap();
        }

        assert_eq!(
            run(&mut book, "birthdays").unwrap(),
            "Upcoming birthdays (next 7 days):\n  2024.06.12  Ada\n  2024.06.17  Grace"
        );
    }

    #[test]
    fn birthdays_honors_configured_window() {
        let mut book = AddressBook::new();
        run(&mut book, "add Ada").unwrap();
        run(&mut book, "add-birthday Ada 20.06.1990").unwrap();

        let mut ctx = Context {
            book: &mut book,
            today: today(),
            upcoming_days: 14,
        };
        let report = dispatch(&mut ctx, Command::Birthdays, &[]).unwrap();
        assert_eq!(
            report,
            "Upcoming birthdays (next 14 days):\n  2024.06.20  Ada"
        );
    }
}
