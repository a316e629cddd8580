use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RolodexError};
use crate::model::Record;

pub fn run(book: &AddressBook) -> Result<CmdResult> {
    let records: Vec<Record> = book.records().cloned().collect();
    let mut result = CmdResult::default().with_listed_records(records);
    if book.is_empty() {
        result.add_message(CmdMessage::info("The address book is empty."));
    }
    Ok(result)
}

/// Lists the book in full batches of `batch_size`. Records that would only
/// fill a partial last batch are left out and counted in a message.
pub fn batched(book: &AddressBook, batch_size: usize) -> Result<CmdResult> {
    if batch_size == 0 {
        return Err(RolodexError::InvalidArgument(
            "batch size must be at least 1".to_string(),
        ));
    }

    let batches: Vec<Vec<Record>> = book
        .iterator(batch_size)
        .map(|batch| batch.into_iter().cloned().collect())
        .collect();
    let shown: usize = batches.iter().map(Vec::len).sum();
    let left_out = book.len() - shown;

    let mut result = CmdResult::default().with_batches(batches);
    if left_out > 0 {
        result.add_message(CmdMessage::info(format!(
            "{} contact(s) did not fill a batch of {} and are not shown.",
            left_out, batch_size
        )));
    }
    Ok(result)
}
