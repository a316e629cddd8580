use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RolodexError};
use crate::model::Record;

/// Substring search over phones, email, address and name. A contact shows
/// up once per field that matched.
pub fn run(book: &AddressBook, term: &str) -> Result<CmdResult> {
    if term.is_empty() {
        return Err(RolodexError::InvalidArgument(
            "search term cannot be empty".to_string(),
        ));
    }

    let hits: Vec<Record> = book.find_by_term(term).into_iter().cloned().collect();
    let mut result = CmdResult::default();
    if hits.is_empty() {
        result.add_message(CmdMessage::info(format!("Nothing matches '{}'.", term)));
    }
    Ok(result.with_listed_records(hits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::contacts;

    fn demo_book() -> AddressBook {
        let mut book = AddressBook::new();
        for (name, phones) in [
            ("Max", ["1234567890", "7575757575"]),
            ("Grigi", ["8098465323", "2345678910"]),
            ("Selim", ["7098461111", "5010101010"]),
        ] {
            contacts::add_name(&mut book, name, false).unwrap();
            for phone in phones {
                contacts::add_phone(&mut book, name, phone).unwrap();
            }
        }
        book
    }

    #[test]
    fn finds_by_phone_fragment() {
        let result = run(&demo_book(), "757").unwrap();
        assert_eq!(result.listed_records.len(), 1);
        assert_eq!(result.listed_records[0].name().as_str(), "Max");
    }

    #[test]
    fn finds_by_name_fragment_ignoring_case() {
        let result = run(&demo_book(), "GRI").unwrap();
        assert_eq!(result.listed_records[0].name().as_str(), "Grigi");
    }

    #[test]
    fn reports_no_matches() {
        let result = run(&demo_book(), "zzz").unwrap();
        assert!(result.listed_records.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn rejects_empty_term() {
        assert!(run(&demo_book(), "").is_err());
    }
}
