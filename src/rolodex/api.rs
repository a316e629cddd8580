//! # API Facade
//!
//! The single entry point for every rolodex operation. The facade owns the
//! [`AddressBook`] and the [`BookStore`] it persists to, dispatches to the
//! command layer, and returns structured [`CmdResult`]s.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Terminal I/O**: no stdout, stderr, or prompts
//! - **Saving on its own**: callers decide when to [`RolodexApi::save`];
//!   `modified` on a result says whether there is anything to save
//!
//! ## Generic Over BookStore
//!
//! - Production: `RolodexApi<FileStore>`
//! - Testing: `RolodexApi<MemStore>`

use crate::book::AddressBook;
use crate::commands;
use crate::error::Result;
use crate::store::BookStore;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

pub struct RolodexApi<S: BookStore> {
    book: AddressBook,
    store: S,
    data_dir: PathBuf,
}

impl<S: BookStore> RolodexApi<S> {
    /// An API over an empty book. Nothing is read from `store` until
    /// [`RolodexApi::load`].
    pub fn new(store: S, data_dir: PathBuf) -> Self {
        Self {
            book: AddressBook::new(),
            store,
            data_dir,
        }
    }

    /// An API over whatever `store` already holds.
    pub fn open(store: S, data_dir: PathBuf) -> Result<Self> {
        let mut api = Self::new(store, data_dir);
        api.book.load(&api.store)?;
        Ok(api)
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Points later saves and loads at `store`, keeping the book in memory.
    /// Returns the previous store.
    pub fn replace_store(&mut self, store: S) -> S {
        std::mem::replace(&mut self.store, store)
    }

    // --- Contacts ---

    pub fn add_name(&mut self, name: &str, plain: bool) -> Result<CmdResult> {
        commands::contacts::add_name(&mut self.book, name, plain)
    }

    pub fn add_phone(&mut self, name: &str, phone: &str) -> Result<CmdResult> {
        commands::contacts::add_phone(&mut self.book, name, phone)
    }

    pub fn delete_phone(&mut self, name: &str, phone: &str) -> Result<CmdResult> {
        commands::contacts::delete_phone(&mut self.book, name, phone)
    }

    pub fn edit_phone(&mut self, name: &str, old: &str, new: &str) -> Result<CmdResult> {
        commands::contacts::edit_phone(&mut self.book, name, old, new)
    }

    pub fn add_email(&mut self, name: &str, email: &str) -> Result<CmdResult> {
        commands::contacts::add_email(&mut self.book, name, email)
    }

    pub fn add_address(&mut self, name: &str, address: &str) -> Result<CmdResult> {
        commands::contacts::add_address(&mut self.book, name, address)
    }

    pub fn add_birthday(&mut self, name: &str, date: &str) -> Result<CmdResult> {
        commands::contacts::add_birthday(&mut self.book, name, date)
    }

    pub fn show(&self, name: &str) -> Result<CmdResult> {
        commands::contacts::show(&self.book, name)
    }

    pub fn delete_contact(&mut self, name: &str) -> Result<CmdResult> {
        commands::contacts::delete_contact(&mut self.book, name)
    }

    // --- Listing and search ---

    pub fn list_book(&self) -> Result<CmdResult> {
        commands::list::run(&self.book)
    }

    pub fn list_batched(&self, batch_size: usize) -> Result<CmdResult> {
        commands::list::batched(&self.book, batch_size)
    }

    pub fn find_by_term(&self, term: &str) -> Result<CmdResult> {
        commands::search::run(&self.book, term)
    }

    // --- Birthdays ---

    pub fn days_to_birthday(&self, name: &str) -> Result<CmdResult> {
        commands::birthdays::days_to_birthday(&self.book, name, today())
    }

    pub fn when(&self, days: i64) -> Result<CmdResult> {
        commands::birthdays::when(&self.book, days, today())
    }

    // --- Notes ---

    pub fn add_note(&mut self, name: &str, text: &str, tags: &[String]) -> Result<CmdResult> {
        commands::notes::add(&mut self.book, name, text, tags)
    }

    pub fn find_note_by_name(&self, name: &str) -> Result<CmdResult> {
        commands::notes::find_by_name(&self.book, name)
    }

    pub fn find_notes_by_term(&self, term: &str) -> Result<CmdResult> {
        commands::notes::find_by_term(&self.book, term)
    }

    pub fn list_notes(&self) -> Result<CmdResult> {
        commands::notes::list(&self.book)
    }

    pub fn edit_note(
        &mut self,
        name: &str,
        matching: Option<&str>,
        new_text: &str,
        new_tags: Option<&[String]>,
    ) -> Result<CmdResult> {
        commands::notes::edit(&mut self.book, name, matching, new_text, new_tags)
    }

    pub fn delete_note(&mut self, name: &str, text: &str) -> Result<CmdResult> {
        commands::notes::delete(&mut self.book, name, text)
    }

    pub fn delete_all_notes(&mut self, name: &str) -> Result<CmdResult> {
        commands::notes::delete_all(&mut self.book, name)
    }

    // --- Persistence ---

    pub fn save(&self) -> Result<CmdResult> {
        self.book.dump(&self.store)?;
        Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Address book saved ({} contact(s)).",
            self.book.len()
        ))))
    }

    /// Merges the saved book into the one in memory.
    pub fn load(&mut self) -> Result<CmdResult> {
        let count = self.book.load(&self.store)?;
        let message = if count == 0 {
            CmdMessage::info("No saved contacts to load.")
        } else {
            CmdMessage::success(format!("Loaded {} contact(s).", count))
        };
        Ok(CmdResult::default().with_message(message))
    }

    /// Saves and says goodbye. The caller ends the session.
    pub fn exit(&self) -> Result<CmdResult> {
        let mut result = self.save()?;
        result.add_message(CmdMessage::info("Bye."));
        Ok(result)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{BirthdayEntry, CmdMessage, CmdResult, MessageLevel, NoteEntry};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RolodexError;
    use crate::store::memory::MemStore;

    fn api() -> RolodexApi<MemStore> {
        RolodexApi::new(MemStore::new(), PathBuf::from("/nonexistent"))
    }

    #[test]
    fn contact_commands_reach_the_book() {
        let mut api = api();
        api.add_name("max", false).unwrap();
        api.add_phone("max", "1234567890").unwrap();
        api.add_phone("max", "7575757575").unwrap();
        api.add_birthday("max", "2011-12-03").unwrap();
        api.add_email("max", "max@mail.ua").unwrap();
        api.add_address("max", "Kyiv").unwrap();
        api.edit_phone("max", "1234567890", "1111111111").unwrap();
        api.delete_phone("max", "1111111111").unwrap();

        let max = api.book().find("max").unwrap();
        assert_eq!(max.phones().len(), 1);
        assert_eq!(api.show("max").unwrap().listed_records.len(), 1);

        let found = api.find_by_term("757").unwrap();
        assert_eq!(found.listed_records[0].name().as_str(), "Max");

        let days = api.days_to_birthday("max").unwrap().birthdays[0].days;
        assert!((0..=365).contains(&days));
    }

    #[test]
    fn note_commands_reach_the_book() {
        let mut api = api();
        api.add_name("kostya", false).unwrap();
        api.add_note("kostya", "student", &["goit".to_string()])
            .unwrap();
        assert_eq!(api.find_note_by_name("kostya").unwrap().notes.len(), 1);
        assert_eq!(api.find_notes_by_term("GOIT").unwrap().notes.len(), 1);
        api.edit_note("kostya", Some("student"), "graduate", None)
            .unwrap();
        assert_eq!(api.list_notes().unwrap().notes[0].note.text, "graduate");
        api.delete_note("kostya", "graduate").unwrap();
        api.delete_all_notes("kostya").unwrap();
    }

    #[test]
    fn save_then_open_restores_the_book() {
        let mut api = api();
        api.add_name("max", false).unwrap();
        api.add_phone("max", "1234567890").unwrap();
        api.exit().unwrap();

        let RolodexApi { store, .. } = api;
        let reopened = RolodexApi::open(store, PathBuf::from("/nonexistent")).unwrap();
        assert_eq!(reopened.book().len(), 1);
        assert_eq!(reopened.list_book().unwrap().listed_records.len(), 1);
    }

    #[test]
    fn load_merges_into_current_book() {
        let mut api = api();
        api.add_name("max", false).unwrap();
        api.save().unwrap();
        api.delete_contact("max").unwrap();
        api.add_name("jane", false).unwrap();

        api.load().unwrap();
        assert!(api.book().contains("max"));
        assert!(api.book().contains("jane"));
    }

    #[test]
    fn replaced_store_receives_the_next_save() {
        let mut api = api();
        api.add_name("max", false).unwrap();
        api.save().unwrap();

        let old = api.replace_store(MemStore::new());
        api.add_name("jane", false).unwrap();
        api.save().unwrap();

        let reopened = RolodexApi::open(old, PathBuf::from("/nonexistent")).unwrap();
        assert_eq!(reopened.book().len(), 1);
        let RolodexApi { store, .. } = api;
        let reopened = RolodexApi::open(store, PathBuf::from("/nonexistent")).unwrap();
        assert_eq!(reopened.book().len(), 2);
    }

    #[test]
    fn save_failure_surfaces_as_io_error() {
        let api = api();
        api.store().set_simulate_write_error(true);
        assert!(matches!(api.save(), Err(RolodexError::Io(_))));
    }
}
