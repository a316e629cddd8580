//! # Storage Layer
//!
//! The address book persists as a single opaque blob. A [`BookStore`] only
//! moves bytes; encoding and merge rules live in [`crate::book`].
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one file on disk, written atomically (temp file +
//!   rename) so an interrupted save leaves the previous file in place.
//! - [`memory::MemStore`]: keeps the blob in memory, for tests.

use crate::error::Result;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Raw blob storage for a single address book.
pub trait BookStore {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn read_blob(&self) -> Result<Option<Vec<u8>>>;

    /// Replaces the stored blob.
    fn write_blob(&self, blob: &[u8]) -> Result<()>;

    /// Where the blob lives. Virtual for non-file stores.
    fn location(&self) -> PathBuf;
}
