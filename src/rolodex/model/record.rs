use super::field::{Address, Birthday, Email, Field, Name, Phone};
use super::note::Note;
use crate::error::{Result, RolodexError};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Returned by [`Record::days_to_birthday`] when no birthday is set.
pub const UNKNOWN_BIRTHDAY: i64 = -1;

/// A named contact.
///
/// `notes` is `None` for plain records and `Some` for records that accept
/// notes; note operations on a plain record fail with
/// [`RolodexError::UnsupportedOperation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: Name,
    phones: Vec<Phone>,
    email: Option<Email>,
    address: Option<Address>,
    birthday: Option<Birthday>,
    notes: Option<Vec<Note>>,
}

impl Record {
    /// A plain record without note support.
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            name: Name::parse(name)?,
            phones: Vec::new(),
            email: None,
            address: None,
            birthday: None,
            notes: None,
        })
    }

    /// A record that accepts notes.
    pub fn with_notes(name: &str) -> Result<Self> {
        let mut record = Self::new(name)?;
        record.notes = Some(Vec::new());
        Ok(record)
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    pub fn supports_notes(&self) -> bool {
        self.notes.is_some()
    }

    /// Notes in insertion order, or `None` for a plain record.
    pub fn notes(&self) -> Option<&[Note]> {
        self.notes.as_deref()
    }

    // --- Contact fields ---

    pub fn add_phone(&mut self, phone: &str) -> Result<()> {
        self.phones.push(Phone::parse(phone)?);
        Ok(())
    }

    /// Removes every phone equal to `phone`. Returns false if none matched.
    pub fn remove_phone(&mut self, phone: &str) -> bool {
        let before = self.phones.len();
        self.phones.retain(|p| p.as_str() != phone);
        self.phones.len() != before
    }

    pub fn edit_phone(&mut self, old: &str, new: &str) -> Result<()> {
        let phone = self
            .phones
            .iter_mut()
            .find(|p| p.as_str() == old)
            .ok_or_else(|| {
                RolodexError::NotFound(format!("phone {} for {}", old, self.name))
            })?;
        phone.set(new)
    }

    pub fn find_phone(&self, phone: &str) -> Option<&Phone> {
        self.phones.iter().find(|p| p.as_str() == phone)
    }

    pub fn add_email(&mut self, email: &str) -> Result<()> {
        self.email = Some(Email::parse(email)?);
        Ok(())
    }

    pub fn add_address(&mut self, address: &str) {
        self.address = Some(Address::new(address));
    }

    pub fn add_birthday(&mut self, birthday: &str) -> Result<()> {
        self.birthday = Some(Birthday::parse(birthday)?);
        Ok(())
    }

    /// Stores an already-validated field. Phones are appended; email, address
    /// and birthday replace the previous value. The name cannot be changed.
    pub fn set_field(&mut self, field: Field) -> Result<()> {
        match field {
            Field::Name(_) => {
                return Err(RolodexError::UnsupportedOperation(format!(
                    "the name of {} cannot be changed",
                    self.name
                )))
            }
            Field::Phone(phone) => self.phones.push(phone),
            Field::Email(email) => self.email = Some(email),
            Field::Address(address) => self.address = Some(address),
            Field::Birthday(birthday) => self.birthday = Some(birthday),
        }
        Ok(())
    }

    /// Every stored field, name first, then phones in order.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Name(self.name.clone())];
        fields.extend(self.phones.iter().cloned().map(Field::Phone));
        fields.extend(self.email.clone().map(Field::Email));
        fields.extend(self.address.clone().map(Field::Address));
        fields.extend(self.birthday.map(Field::Birthday));
        fields
    }

    // --- Birthdays ---

    /// Days until the next birthday, counted from the local date. `0` means
    /// today, [`UNKNOWN_BIRTHDAY`] means no birthday is set.
    pub fn days_to_birthday(&self) -> i64 {
        self.days_to_birthday_on(Local::now().date_naive())
    }

    pub fn days_to_birthday_on(&self, today: NaiveDate) -> i64 {
        let Some(birthday) = self.birthday else {
            return UNKNOWN_BIRTHDAY;
        };
        let born = birthday.date();
        let next = match anniversary(born, today.year()) {
            Some(date) if date >= today => Some(date),
            _ => anniversary(born, today.year() + 1),
        };
        next.map_or(UNKNOWN_BIRTHDAY, |date| (date - today).num_days())
    }

    // --- Notes ---

    fn notes_mut(&mut self) -> Result<&mut Vec<Note>> {
        let name = &self.name;
        self.notes.as_mut().ok_or_else(|| {
            RolodexError::UnsupportedOperation(format!("{} does not support notes", name))
        })
    }

    pub fn add_note(&mut self, text: &str, tags: Vec<String>) -> Result<&Note> {
        if text.trim().is_empty() {
            return Err(RolodexError::InvalidArgument(
                "note text cannot be empty".to_string(),
            ));
        }
        let notes = self.notes_mut()?;
        notes.push(Note::new(text, tags));
        Ok(&notes[notes.len() - 1])
    }

    /// Removes every note whose text equals `text`. Returns how many went.
    pub fn remove_note(&mut self, text: &str) -> Result<usize> {
        if text.is_empty() {
            return Err(RolodexError::InvalidArgument(
                "note text to remove cannot be empty".to_string(),
            ));
        }
        let notes = self.notes_mut()?;
        let before = notes.len();
        notes.retain(|n| n.text != text);
        Ok(before - notes.len())
    }

    /// Rewrites notes in place, keeping their creation time.
    ///
    /// With `matching = None` every note gets the new text. With
    /// `Some(old)` only notes whose text equals `old` are rewritten, and
    /// finding none is [`RolodexError::NotFound`]. `new_tags = None` keeps
    /// each note's tags.
    pub fn edit_note(
        &mut self,
        matching: Option<&str>,
        new_text: &str,
        new_tags: Option<Vec<String>>,
    ) -> Result<usize> {
        if new_text.trim().is_empty() {
            return Err(RolodexError::InvalidArgument(
                "note text cannot be empty".to_string(),
            ));
        }
        let name = self.name.clone();
        let notes = self.notes_mut()?;

        let mut edited = 0;
        for note in notes
            .iter_mut()
            .filter(|n| matching.map_or(true, |old| n.text == old))
        {
            note.text = new_text.to_string();
            if let Some(tags) = &new_tags {
                note.tags = tags.clone();
            }
            edited += 1;
        }

        if let (Some(old), 0) = (matching, edited) {
            return Err(RolodexError::NotFound(format!(
                "note '{}' for {}",
                old, name
            )));
        }
        Ok(edited)
    }

    pub fn find_notes_by_term(&self, term: &str) -> Result<Vec<&Note>> {
        let notes = self.notes.as_ref().ok_or_else(|| {
            RolodexError::UnsupportedOperation(format!("{} does not support notes", self.name))
        })?;
        Ok(notes.iter().filter(|n| n.matches(term)).collect())
    }

    /// Drops all notes. Returns how many there were.
    pub fn clear_notes(&mut self) -> Result<usize> {
        let notes = self.notes_mut()?;
        let count = notes.len();
        notes.clear();
        Ok(count)
    }
}

/// The birthday's month/day in `year`; Feb 29 falls back to Feb 28.
fn anniversary(born: NaiveDate, year: i32) -> Option<NaiveDate> {
    born.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, born.month(), 28))
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phones: Vec<&str> = self.phones.iter().map(Phone::as_str).collect();
        write!(f, "{}: {}", self.name, phones.join("; "))?;
        if let Some(email) = &self.email {
            write!(f, ", email: {}", email)?;
        }
        if let Some(address) = &self.address {
            write!(f, ", address: {}", address)?;
        }
        if let Some(birthday) = &self.birthday {
            write!(f, ", birthday: {}", birthday)?;
        }
        Ok(())
    }
}
