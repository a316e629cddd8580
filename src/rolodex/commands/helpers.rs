use crate::book::AddressBook;
use crate::error::{Result, RolodexError};
use crate::model::Record;

pub fn record<'a>(book: &'a AddressBook, name: &str) -> Result<&'a Record> {
    book.find(name)
        .ok_or_else(|| RolodexError::NotFound(format!("contact '{}'", name.trim())))
}

pub fn record_mut<'a>(book: &'a mut AddressBook, name: &str) -> Result<&'a mut Record> {
    book.find_mut(name)
        .ok_or_else(|| RolodexError::NotFound(format!("contact '{}'", name.trim())))
}

/// Trims tags and drops empty ones, keeping order and duplicates.
pub fn clean_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Runs `f` under a debug-level subscriber and returns what it logged.
#[cfg(test)]
pub(crate) fn capture_debug<F: FnOnce()>(f: F) -> String {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_contact_is_not_found() {
        let mut book = AddressBook::new();
        assert!(matches!(
            record(&book, "ghost"),
            Err(RolodexError::NotFound(_))
        ));
        assert!(matches!(
            record_mut(&mut book, "ghost"),
            Err(RolodexError::NotFound(_))
        ));
    }

    #[test]
    fn clean_tags_trims_and_drops_blanks() {
        assert_eq!(
            clean_tags([" work", "", "  ", "work ", "home"]),
            vec!["work", "work", "home"]
        );
    }
}
