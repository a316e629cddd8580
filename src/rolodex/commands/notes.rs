use super::helpers::{clean_tags, record, record_mut};
use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult, NoteEntry};
use crate::error::{Result, RolodexError};
use crate::model::Record;

fn entries(record: &Record) -> Vec<NoteEntry> {
    record
        .notes()
        .unwrap_or_default()
        .iter()
        .map(|note| NoteEntry {
            owner: record.name().to_string(),
            note: note.clone(),
        })
        .collect()
}

pub fn add(book: &mut AddressBook, name: &str, text: &str, tags: &[String]) -> Result<CmdResult> {
    let record = record_mut(book, name)?;
    let note = record.add_note(text.trim(), clean_tags(tags))?.clone();
    let owner = record.name().to_string();
    tracing::debug!(name = %owner, tags = note.tags.len(), "note added");
    let message = CmdMessage::success(format!("Note added to {}.", owner));

    let mut result = CmdResult::default()
        .with_affected_record(record.clone())
        .with_message(message);
    result.notes.push(NoteEntry { owner, note });
    Ok(result)
}

/// All notes of one contact.
pub fn find_by_name(book: &AddressBook, name: &str) -> Result<CmdResult> {
    let record = record(book, name)?;
    if !record.supports_notes() {
        return Err(RolodexError::UnsupportedOperation(format!(
            "{} does not support notes",
            record.name()
        )));
    }
    let notes = entries(record);
    let mut result = CmdResult::default();
    if notes.is_empty() {
        result.add_message(CmdMessage::info(format!("{} has no notes.", record.name())));
    }
    Ok(result.with_notes(notes))
}

/// Notes across the whole book whose text or tags contain `term`, ignoring
/// case. Contacts without note support are skipped.
pub fn find_by_term(book: &AddressBook, term: &str) -> Result<CmdResult> {
    if term.is_empty() {
        return Err(RolodexError::InvalidArgument(
            "search term cannot be empty".to_string(),
        ));
    }
    let mut hits = Vec::new();
    for record in book.records().filter(|r| r.supports_notes()) {
        for note in record.find_notes_by_term(term)? {
            hits.push(NoteEntry {
                owner: record.name().to_string(),
                note: note.clone(),
            });
        }
    }
    let mut result = CmdResult::default();
    if hits.is_empty() {
        result.add_message(CmdMessage::info(format!("No notes match '{}'.", term)));
    }
    Ok(result.with_notes(hits))
}

/// Every note in the book, grouped by contact in book order.
pub fn list(book: &AddressBook) -> Result<CmdResult> {
    let notes: Vec<NoteEntry> = book.records().flat_map(entries).collect();
    let mut result = CmdResult::default();
    if notes.is_empty() {
        result.add_message(CmdMessage::info("There are no notes yet."));
    }
    Ok(result.with_notes(notes))
}

/// Rewrites notes of a contact. Without `matching`, every note of the
/// contact gets the new text.
pub fn edit(
    book: &mut AddressBook,
    name: &str,
    matching: Option<&str>,
    new_text: &str,
    new_tags: Option<&[String]>,
) -> Result<CmdResult> {
    let record = record_mut(book, name)?;
    let edited = record.edit_note(matching, new_text.trim(), new_tags.map(|t| clean_tags(t)))?;

    let mut result = CmdResult::default();
    if edited == 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} has no notes to edit.",
            record.name()
        )));
        return Ok(result);
    }
    tracing::debug!(name = %record.name(), edited, "notes edited");
    if matching.is_none() && edited > 1 {
        result.add_message(CmdMessage::warning(format!(
            "All {} notes of {} now share the same text.",
            edited,
            record.name()
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "{} note(s) of {} edited.",
        edited,
        record.name()
    )));
    result.notes = entries(record);
    Ok(result.with_affected_record(record.clone()))
}

/// Deletes every note of a contact whose text equals `text`.
pub fn delete(book: &mut AddressBook, name: &str, text: &str) -> Result<CmdResult> {
    let record = record_mut(book, name)?;
    let removed = record.remove_note(text)?;
    if removed == 0 {
        return Ok(CmdResult::default().with_message(CmdMessage::warning(format!(
            "{} has no note '{}'.",
            record.name(),
            text
        ))));
    }
    tracing::debug!(name = %record.name(), removed, "notes removed");
    let message = CmdMessage::success(format!(
        "{} note(s) removed from {}.",
        removed,
        record.name()
    ));
    Ok(CmdResult::default()
        .with_affected_record(record.clone())
        .with_message(message))
}

pub fn delete_all(book: &mut AddressBook, name: &str) -> Result<CmdResult> {
    let record = record_mut(book, name)?;
    let removed = record.clear_notes()?;
    tracing::debug!(name = %record.name(), removed, "all notes cleared");
    let message = CmdMessage::success(format!(
        "All notes of {} deleted ({}).",
        record.name(),
        removed
    ));
    Ok(CmdResult::default()
        .with_affected_record(record.clone())
        .with_message(message))
}
