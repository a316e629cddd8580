//! # Command Layer
//!
//! The business logic behind every rolodex operation. Each command is a
//! plain function over an [`AddressBook`](crate::book::AddressBook) that
//! returns a [`CmdResult`].
//!
//! Commands never print, prompt, or exit. They hand back the records,
//! notes and birthday entries to show plus leveled messages, and the UI
//! decides how to render them.
//!
//! Lookups that find nothing are reported as [`RolodexError::NotFound`]
//! here even though the book itself returns `Option`: at this level a
//! missing contact means the user asked for something that isn't there.
//!
//! ## Command Modules
//!
//! - [`contacts`]: create contacts and set their fields
//! - [`list`]: list the book, whole or in batches
//! - [`search`]: substring search across fields
//! - [`birthdays`]: days-to-birthday and the upcoming-birthdays forecast
//! - [`notes`]: notes on contacts that support them
//! - [`config`]: show and change configuration
//! - [`helpers`]: shared lookups

use crate::config::RolodexConfig;
use crate::model::{Birthday, Note, Record};
use serde::Serialize;

pub mod birthdays;
pub mod config;
pub mod contacts;
pub mod helpers;
pub mod list;
pub mod notes;
pub mod search;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A contact's birthday with the number of days until it comes round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayEntry {
    pub name: String,
    pub birthday: Option<Birthday>,
    /// `0` is today; [`crate::model::UNKNOWN_BIRTHDAY`] when unset.
    pub days: i64,
}

/// A note together with the contact it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub owner: String,
    pub note: Note,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<Record>,
    pub listed_records: Vec<Record>,
    pub batches: Vec<Vec<Record>>,
    pub birthdays: Vec<BirthdayEntry>,
    pub notes: Vec<NoteEntry>,
    pub config: Option<RolodexConfig>,
    pub messages: Vec<CmdMessage>,
    /// Whether the book changed and should be saved.
    pub modified: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_record(mut self, record: Record) -> Self {
        self.affected_records.push(record);
        self.modified = true;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<Record>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_batches(mut self, batches: Vec<Vec<Record>>) -> Self {
        self.batches = batches;
        self
    }

    pub fn with_birthdays(mut self, birthdays: Vec<BirthdayEntry>) -> Self {
        self.birthdays = birthdays;
        self
    }

    pub fn with_notes(mut self, notes: Vec<NoteEntry>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_config(mut self, config: RolodexConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}
