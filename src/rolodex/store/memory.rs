use super::BookStore;
use crate::error::{Result, RolodexError};
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory blob store for tests.
///
/// Uses `RefCell` since the book is single-threaded, which lets
/// `BookStore` take `&self` everywhere.
#[derive(Default)]
pub struct MemStore {
    blob: RefCell<Option<Vec<u8>>>,
    simulate_write_error: RefCell<bool>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Overwrites the stored bytes directly, bypassing the book.
    pub fn put_raw(&self, blob: Vec<u8>) {
        *self.blob.borrow_mut() = Some(blob);
    }
}

impl BookStore for MemStore {
    fn read_blob(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.blob.borrow().clone())
    }

    fn write_blob(&self, blob: &[u8]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RolodexError::Io(std::io::Error::other(
                "Simulated write error",
            )));
        }
        *self.blob.borrow_mut() = Some(blob.to_vec());
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://address-book")
    }
}
