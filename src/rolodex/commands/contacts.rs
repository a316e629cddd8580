use super::helpers::{record, record_mut};
use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RolodexError};
use crate::model::{Field, FieldKind, Name, Record};

/// Creates a contact. New contacts accept notes unless `plain` is set.
///
/// Names already in the book are rejected rather than overwritten.
pub fn add_name(book: &mut AddressBook, name: &str, plain: bool) -> Result<CmdResult> {
    let name = Name::parse(name)?;
    if book.contains(name.as_str()) {
        return Err(RolodexError::AlreadyExists(format!("contact '{}'", name)));
    }

    let record = if plain {
        Record::new(name.as_str())?
    } else {
        Record::with_notes(name.as_str())?
    };
    book.add_record(record.clone());

    Ok(CmdResult::default()
        .with_affected_record(record)
        .with_message(CmdMessage::success(format!("Contact {} created.", name))))
}

pub fn add_phone(book: &mut AddressBook, name: &str, phone: &str) -> Result<CmdResult> {
    let record = record_mut(book, name)?;
    record.add_phone(phone)?;
    tracing::debug!(name = %record.name(), phone, "phone added");
    let message = CmdMessage::success(format!("Phone {} added to {}.", phone, record.name()));
    Ok(CmdResult::default()
        .with_affected_record(record.clone())
        .with_message(message))
}

/// Removes a phone. An absent phone is reported, not an error.
pub fn delete_phone(book: &mut AddressBook, name: &str, phone: &str) -> Result<CmdResult> {
    let record = record_mut(book, name)?;
    if !record.remove_phone(phone) {
        return Ok(CmdResult::default().with_message(CmdMessage::warning(format!(
            "{} has no phone {}.",
            record.name(),
            phone
        ))));
    }
    tracing::debug!(name = %record.name(), phone, "phone removed");
    let message = CmdMessage::success(format!("Phone {} removed from {}.", phone, record.name()));
    Ok(CmdResult::default()
        .with_affected_record(record.clone())
        .with_message(message))
}

pub fn edit_phone(book: &mut AddressBook, name: &str, old: &str, new: &str) -> Result<CmdResult> {
    let record = record_mut(book, name)?;
    record.edit_phone(old, new)?;
    tracing::debug!(name = %record.name(), old, new, "phone edited");
    let message = CmdMessage::success(format!(
        "Phone {} of {} changed to {}.",
        old,
        record.name(),
        new
    ));
    Ok(CmdResult::default()
        .with_affected_record(record.clone())
        .with_message(message))
}

/// Validates `value` as a `kind` field and stores it on the contact.
pub fn set_field(
    book: &mut AddressBook,
    name: &str,
    kind: FieldKind,
    value: &str,
) -> Result<CmdResult> {
    let field = Field::parse(kind, value)?;
    let stored = field.render();
    let record = record_mut(book, name)?;
    record.set_field(field)?;
    tracing::debug!(name = %record.name(), %kind, value = %stored, "field set");
    let message = CmdMessage::success(format!(
        "{} of {} set to {}.",
        capitalize(&kind.to_string()),
        record.name(),
        stored
    ));
    Ok(CmdResult::default()
        .with_affected_record(record.clone())
        .with_message(message))
}

pub fn add_email(book: &mut AddressBook, name: &str, email: &str) -> Result<CmdResult> {
    set_field(book, name, FieldKind::Email, email)
}

pub fn add_address(book: &mut AddressBook, name: &str, address: &str) -> Result<CmdResult> {
    set_field(book, name, FieldKind::Address, address)
}

pub fn add_birthday(book: &mut AddressBook, name: &str, date: &str) -> Result<CmdResult> {
    set_field(book, name, FieldKind::Birthday, date)
}

pub fn show(book: &AddressBook, name: &str) -> Result<CmdResult> {
    let record = record(book, name)?;
    Ok(CmdResult::default().with_listed_records(vec![record.clone()]))
}

pub fn delete_contact(book: &mut AddressBook, name: &str) -> Result<CmdResult> {
    match book.delete(name) {
        Some(record) => {
            let message = CmdMessage::success(format!("Contact {} deleted.", record.name()));
            Ok(CmdResult::default()
                .with_affected_record(record)
                .with_message(message))
        }
        None => Err(RolodexError::NotFound(format!("contact '{}'", name.trim()))),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;

    fn book_with_max() -> AddressBook {
        let mut book = AddressBook::new();
        add_name(&mut book, "max", false).unwrap();
        book
    }

    #[test]
    fn add_name_normalizes_and_supports_notes_by_default() {
        let book = book_with_max();
        let max = book.find("Max").unwrap();
        assert_eq!(max.name().as_str(), "Max");
        assert!(max.supports_notes());
    }

    #[test]
    fn add_name_can_create_plain_contacts() {
        let mut book = AddressBook::new();
        let result = add_name(&mut book, "alex", true).unwrap();
        assert!(result.modified);
        assert!(!book.find("alex").unwrap().supports_notes());
    }

    #[test]
    fn add_name_rejects_duplicates_in_any_case() {
        let mut book = book_with_max();
        assert!(matches!(
            add_name(&mut book, "MAX", false),
            Err(RolodexError::AlreadyExists(_))
        ));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn add_name_rejects_blank_names() {
        let mut book = AddressBook::new();
        assert!(matches!(
            add_name(&mut book, "  ", false),
            Err(RolodexError::Validation { .. })
        ));
    }

    #[test]
    fn add_phone_validates_and_requires_contact() {
        let mut book = book_with_max();
        add_phone(&mut book, "max", "1234567890").unwrap();
        assert!(matches!(
            add_phone(&mut book, "max", "987-654-321"),
            Err(RolodexError::Validation { .. })
        ));
        assert!(matches!(
            add_phone(&mut book, "jane", "1234567890"),
            Err(RolodexError::NotFound(_))
        ));
        assert_eq!(book.find("max").unwrap().phones().len(), 1);
    }

    #[test]
    fn delete_phone_warns_when_absent() {
        let mut book = book_with_max();
        add_phone(&mut book, "max", "1234567890").unwrap();

        let result = delete_phone(&mut book, "max", "0000000000").unwrap();
        assert!(!result.modified);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);

        let result = delete_phone(&mut book, "max", "1234567890").unwrap();
        assert!(result.modified);
        assert!(book.find("max").unwrap().phones().is_empty());
    }

    #[test]
    fn edit_phone_replaces_matching_number() {
        let mut book = book_with_max();
        add_phone(&mut book, "max", "1234567890").unwrap();
        edit_phone(&mut book, "max", "1234567890", "7575757575").unwrap();
        assert!(book.find("max").unwrap().find_phone("7575757575").is_some());
        assert!(matches!(
            edit_phone(&mut book, "max", "1234567890", "1111111111"),
            Err(RolodexError::NotFound(_))
        ));
    }

    #[test]
    fn set_field_stores_email_address_and_birthday() {
        let mut book = book_with_max();
        let result = add_email(&mut book, "max", "Max <max@mail.ua>").unwrap();
        assert_eq!(result.messages[0].content, "Email of Max set to max@mail.ua.");
        add_address(&mut book, "max", "Kyiv").unwrap();
        add_birthday(&mut book, "max", "2011-12-03").unwrap();

        let max = book.find("max").unwrap();
        assert_eq!(max.email().unwrap().as_str(), "max@mail.ua");
        assert_eq!(max.address().unwrap().as_str(), "Kyiv");
        assert_eq!(max.birthday().unwrap().to_string(), "2011-12-03");
    }

    #[test]
    fn set_field_validates_before_touching_the_record() {
        let mut book = book_with_max();
        assert!(matches!(
            add_birthday(&mut book, "max", "1990/01/01"),
            Err(RolodexError::Validation { .. })
        ));
        assert!(book.find("max").unwrap().birthday().is_none());
    }

    #[test]
    fn delete_contact_removes_or_reports_missing() {
        let mut book = book_with_max();
        delete_contact(&mut book, "MAX").unwrap();
        assert!(book.is_empty());
        assert!(matches!(
            delete_contact(&mut book, "max"),
            Err(RolodexError::NotFound(_))
        ));
    }

    #[test]
    fn show_returns_a_copy_of_the_contact() {
        let book = book_with_max();
        let result = show(&book, "max").unwrap();
        assert_eq!(result.listed_records.len(), 1);
        assert!(!result.modified);
    }

    #[test]
    fn field_changes_are_logged() {
        let logs = crate::commands::helpers::capture_debug(|| {
            let mut book = book_with_max();
            add_phone(&mut book, "max", "1234567890").unwrap();
            edit_phone(&mut book, "max", "1234567890", "7575757575").unwrap();
            delete_phone(&mut book, "max", "7575757575").unwrap();
            add_email(&mut book, "max", "max@mail.ua").unwrap();
        });

        assert!(logs.contains("phone added"));
        assert!(logs.contains("phone edited"));
        assert!(logs.contains("phone removed"));
        assert!(logs.contains("field set"));
        assert!(logs.contains("max@mail.ua"));
    }
}
