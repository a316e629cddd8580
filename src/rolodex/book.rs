//! # Address Book
//!
//! The in-memory index of records, keyed by normalized name and kept in
//! insertion order.
//!
//! ## Keys
//!
//! Every insert and lookup goes through [`normalize_name`], so `"max"`,
//! `"MAX"` and `" Max "` all address the same entry. Re-adding a name
//! replaces the stored record in place; the command layer is where
//! duplicates are rejected.
//!
//! ## Persistence
//!
//! [`AddressBook::dump`] encodes the pair `(record_id, entries)` with
//! postcard and hands the bytes to a [`BookStore`]. [`AddressBook::load`]
//! merges a stored book into this one: loaded records win on name clashes
//! and a missing blob is not an error.
//!
//! ## Batches
//!
//! [`AddressBook::iterator`] groups records into fixed-size batches in
//! insertion order. A trailing batch that would come up short is dropped.
//! Each call starts a fresh pass over the book.

use crate::error::Result;
use crate::model::{normalize_name, Record};
use crate::store::BookStore;
use indexmap::map::Values;
use indexmap::IndexMap;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddressBook {
    record_id: u64,
    entries: IndexMap<String, Record>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Monotonic counter bumped for every new name. Persisted, not used for
    /// addressing.
    pub fn record_id(&self) -> u64 {
        self.record_id
    }

    /// Records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.values()
    }

    /// Inserts `record` under its name, returning the record it replaced.
    pub fn add_record(&mut self, record: Record) -> Option<Record> {
        let key = record.name().as_str().to_string();
        let previous = self.entries.insert(key, record);
        if previous.is_none() {
            self.record_id += 1;
        }
        tracing::debug!(
            record_id = self.record_id,
            replaced = previous.is_some(),
            "record stored"
        );
        previous
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_name(name))
    }

    pub fn find(&self, name: &str) -> Option<&Record> {
        self.entries.get(&normalize_name(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.entries.get_mut(&normalize_name(name))
    }

    /// Removes the record if present; absent names are a no-op.
    pub fn delete(&mut self, name: &str) -> Option<Record> {
        let removed = self.entries.shift_remove(&normalize_name(name));
        if let Some(record) = &removed {
            tracing::debug!(name = %record.name(), "record deleted");
        }
        removed
    }

    /// Substring search over phones, email, address and name.
    ///
    /// A record is listed once per matching phone, then once more for each
    /// of email, address and name that match. Phones, email and address are
    /// matched as-is; the name ignores case. An empty term matches nothing.
    pub fn find_by_term(&self, term: &str) -> Vec<&Record> {
        if term.is_empty() {
            return Vec::new();
        }
        let term_lower = term.to_lowercase();
        let mut hits = Vec::new();

        for record in self.entries.values() {
            for phone in record.phones() {
                if phone.as_str().contains(term) {
                    hits.push(record);
                }
            }
        }
        hits.extend(
            self.entries
                .values()
                .filter(|r| r.email().is_some_and(|e| e.as_str().contains(term))),
        );
        hits.extend(
            self.entries
                .values()
                .filter(|r| r.address().is_some_and(|a| a.as_str().contains(term))),
        );
        hits.extend(
            self.entries
                .values()
                .filter(|r| r.name().as_str().to_lowercase().contains(&term_lower)),
        );
        hits
    }

    /// Fixed-size batches in insertion order; a short trailing batch is
    /// dropped and `batch_size == 0` yields nothing.
    pub fn iterator(&self, batch_size: usize) -> Batches<'_> {
        Batches {
            records: self.entries.values(),
            size: batch_size,
        }
    }

    pub fn dump<S: BookStore>(&self, store: &S) -> Result<()> {
        let blob = postcard::to_stdvec(&(self.record_id, &self.entries))?;
        store.write_blob(&blob)?;
        tracing::info!(
            records = self.entries.len(),
            bytes = blob.len(),
            location = %store.location().display(),
            "address book saved"
        );
        Ok(())
    }

    /// Merges the stored book into this one and returns how many records
    /// were read. Nothing stored yet is `Ok(0)`.
    pub fn load<S: BookStore>(&mut self, store: &S) -> Result<usize> {
        let Some(blob) = store.read_blob()? else {
            tracing::info!(location = %store.location().display(), "no saved address book");
            return Ok(0);
        };
        let (record_id, entries): (u64, IndexMap<String, Record>) = postcard::from_bytes(&blob)?;
        let count = entries.len();

        for record in entries.into_values() {
            let key = record.name().as_str().to_string();
            self.entries.insert(key, record);
        }
        self.record_id = self.record_id.max(record_id);

        tracing::info!(
            records = count,
            location = %store.location().display(),
            "address book loaded"
        );
        Ok(count)
    }
}

/// Lazy batches over an [`AddressBook`], see [`AddressBook::iterator`].
pub struct Batches<'a> {
    records: Values<'a, String, Record>,
    size: usize,
}

impl<'a> Iterator for Batches<'a> {
    type Item = Vec<&'a Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.size == 0 {
            return None;
        }
        let batch: Vec<&'a Record> = self.records.by_ref().take(self.size).collect();
        (batch.len() == self.size).then_some(batch)
    }
}
