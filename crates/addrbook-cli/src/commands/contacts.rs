use crate::commands::{required_arg, Command, Context};
use addrbook_core::domain::{ContactRecord, Name, Phone};
use addrbook_core::CoreError;
use anyhow::Result;
use tracing::debug;

const NAME_WIDTH: usize = 20;
const PHONES_WIDTH: usize = 50;
const BIRTHDAY_WIDTH: usize = 20;

pub fn add_contact(ctx: &mut Context<'_>, args: &[&str]) -> Result<String> {
    let name = required_arg(args, 0, Command::Add)?;
    let phone = args.get(1).map(|raw| Phone::new(raw)).transpose()?;

    match ctx.book.find_mut(name) {
        Some(record) => {
            if let Some(phone) = phone {
                record.push_phone(phone);
            }
            debug!(name, "contact updated");
            Ok("Contact updated.".to_string())
        }
        None => {
            let mut record = ContactRecord::new(Name::new(name)?);
            if let Some(phone) = phone {
                record.push_phone(phone);
            }
            ctx.book.add_record(record);
            debug!(name, "contact added");
            Ok("Contact added.".to_string())
        }
    }
}

pub fn change_phone(ctx: &mut Context<'_>, args: &[&str]) -> Result<String> {
    let name = required_arg(args, 0, Command::Change)?;
    let old = required_arg(args, 1, Command::Change)?;
    let new = required_arg(args, 2, Command::Change)?;

    let record = ctx
        .book
        .find_mut(name)
        .ok_or_else(|| CoreError::ContactNotFound(name.to_string()))?;
    record.edit_phone(old, new)?;
    Ok("Phone number updated.".to_string())
}

pub fn show_phones(ctx: &mut Context<'_>, args: &[&str]) -> Result<String> {
    let name = required_arg(args, 0, Command::Phone)?;
    let record = ctx
        .book
        .find(name)
        .ok_or_else(|| CoreError::ContactNotFound(name.to_string()))?;
    if record.phones().is_empty() {
        return Ok(format!("No phones for {name}."));
    }
    Ok(record.phones_joined("; "))
}

pub fn delete_contact(ctx: &mut Context<'_>, args: &[&str]) -> Result<String> {
    let name = required_arg(args, 0, Command::Delete)?;
    ctx.book.delete(name)?;
    debug!(name, "contact deleted");
    Ok("Contact deleted.".to_string())
}

pub fn all_contacts(ctx: &Context<'_>) -> String {
    let header = table_row("Name", "Phones", "Birthday");
    let separator = "-".repeat(header.chars().count());

    let mut lines = vec![separator.clone(), header, separator.clone()];
    for record in ctx.book.iter() {
        let birthday = record.birthday().map(|b| b.as_str()).unwrap_or("");
        lines.push(table_row(
            record.name().as_str(),
            &record.phones_joined("; "),
            birthday,
        ));
    }
    lines.push(separator);
    lines.join("\n")
}

fn table_row(name: &str, phones: &str, birthday: &str) -> String {
    format!(
        "| {:<name_w$} | {:<phones_w$} | {:<birthday_w$} |",
        name,
        phones,
        birthday,
        name_w = NAME_WIDTH,
        phones_w = PHONES_WIDTH,
        birthday_w = BIRTHDAY_WIDTH,
    )
}
