//! Domain types: validated fields, notes, and records.

pub mod field;
pub mod note;
pub mod record;

pub use field::{normalize_name, Address, Birthday, Email, Field, FieldKind, Name, Phone};
pub use note::Note;
pub use record::{Record, UNKNOWN_BIRTHDAY};
