//! Validated contact fields.
//!
//! Every field type validates on construction and on mutation, so a stored
//! value has always passed its own predicate:
//!
//! | Kind       | Rule                                                      |
//! |------------|-----------------------------------------------------------|
//! | `Name`     | non-empty after trimming, stored title-cased              |
//! | `Phone`    | exactly 10 ASCII digits                                   |
//! | `Email`    | first match of `[a-zA-Z0-9_.]+@\w+\.\w{2,3}` in the input |
//! | `Address`  | anything                                                  |
//! | `Birthday` | an ISO calendar date, `YYYY-MM-DD`                        |
//!
//! `Email` is permissive on purpose: `"mail me at joe@site.com!"` stores
//! `joe@site.com` rather than failing.
//!
//! The serde impls go through the same constructors, so a loaded book
//! cannot smuggle in values the setters would reject.

use crate::error::{Result, RolodexError};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const PHONE_LEN: usize = 10;
const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9_.]+@\w+\.\w{2,3}").expect("email pattern is a valid regex")
});

// chrono alone lets through signs, padding and short years
static BIRTHDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$").expect("birthday pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Name,
    Phone,
    Email,
    Address,
    Birthday,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldKind::Name => "name",
            FieldKind::Phone => "phone",
            FieldKind::Email => "email",
            FieldKind::Address => "address",
            FieldKind::Birthday => "birthday",
        };
        f.write_str(label)
    }
}

/// Title-cases each whitespace-separated word: `"anna  maria"` -> `"Anna Maria"`.
///
/// This is the key normalization for the address book; inserts and lookups
/// both go through it.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = normalize_name(raw);
        if normalized.is_empty() {
            return Err(RolodexError::validation(
                FieldKind::Name,
                "name cannot be empty",
            ));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn parse(raw: &str) -> Result<Self> {
        Self::check(raw)?;
        Ok(Self(raw.to_string()))
    }

    /// Replaces the number in place. On failure the old number is kept.
    pub fn set(&mut self, raw: &str) -> Result<()> {
        Self::check(raw)?;
        self.0 = raw.to_string();
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn check(raw: &str) -> Result<()> {
        if raw.len() != PHONE_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RolodexError::validation(
                FieldKind::Phone,
                format!("'{}' must be exactly {} digits", raw, PHONE_LEN),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self> {
        EMAIL_RE
            .find(raw)
            .map(|m| Self(m.as_str().to_string()))
            .ok_or_else(|| {
                RolodexError::validation(
                    FieldKind::Email,
                    format!("no email address found in '{}'", raw),
                )
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Birthday(NaiveDate);

impl Birthday {
    pub fn parse(raw: &str) -> Result<Self> {
        if !BIRTHDAY_RE.is_match(raw) {
            return Err(RolodexError::validation(
                FieldKind::Birthday,
                format!("'{}' is not a YYYY-MM-DD date", raw),
            ));
        }
        NaiveDate::parse_from_str(raw, BIRTHDAY_FORMAT)
            .map(Self)
            .map_err(|e| {
                RolodexError::validation(
                    FieldKind::Birthday,
                    format!("'{}' is not a YYYY-MM-DD date ({})", raw, e),
                )
            })
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

macro_rules! string_field_impls {
    ($($ty:ident),*) => {$(
        impl TryFrom<String> for $ty {
            type Error = RolodexError;

            fn try_from(value: String) -> Result<Self> {
                Self::parse(&value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> String {
                value.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    )*};
}

string_field_impls!(Name, Phone, Email);

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(BIRTHDAY_FORMAT))
    }
}

/// Any one validated field, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Name(Name),
    Phone(Phone),
    Email(Email),
    Address(Address),
    Birthday(Birthday),
}

impl Field {
    /// Builds a field of the given kind, running that kind's validation.
    pub fn parse(kind: FieldKind, raw: &str) -> Result<Self> {
        Ok(match kind {
            FieldKind::Name => Field::Name(Name::parse(raw)?),
            FieldKind::Phone => Field::Phone(Phone::parse(raw)?),
            FieldKind::Email => Field::Email(Email::parse(raw)?),
            FieldKind::Address => Field::Address(Address::new(raw)),
            FieldKind::Birthday => Field::Birthday(Birthday::parse(raw)?),
        })
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Name(_) => FieldKind::Name,
            Field::Phone(_) => FieldKind::Phone,
            Field::Email(_) => FieldKind::Email,
            Field::Address(_) => FieldKind::Address,
            Field::Birthday(_) => FieldKind::Birthday,
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Re-runs the kind's predicate against the rendered value.
    pub fn validate(&self) -> Result<()> {
        let reparsed = Field::parse(self.kind(), &self.render())?;
        if reparsed != *self {
            return Err(RolodexError::validation(
                self.kind(),
                format!("'{}' does not round-trip", self.render()),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name(v) => fmt::Display::fmt(v, f),
            Field::Phone(v) => fmt::Display::fmt(v, f),
            Field::Email(v) => fmt::Display::fmt(v, f),
            Field::Address(v) => fmt::Display::fmt(v, f),
            Field::Birthday(v) => fmt::Display::fmt(v, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_validation_err<T: fmt::Debug>(result: Result<T>, expected: FieldKind) {
        match result {
            Err(RolodexError::Validation { kind, .. }) => assert_eq!(kind, expected),
            other => panic!("expected {} validation error, got {:?}", expected, other),
        }
    }

    #[test]
    fn ten_digit_phone_is_accepted_and_renders_unchanged() {
        for raw in ["1234567890", "0000000000", "5551234567"] {
            let field = Field::parse(FieldKind::Phone, raw).unwrap();
            assert_eq!(field.render(), raw);
        }
    }

    #[test]
    fn malformed_phones_are_rejected() {
        for raw in [
            "",
            "123456789",
            "12345678901",
            "987-654-321",
            "12345 7890",
            " 123456789",
            "abcdefghij",
            "１２３４５６７８９０",
        ] {
            assert_validation_err(Phone::parse(raw), FieldKind::Phone);
        }
    }

    #[test]
    fn phone_set_keeps_old_value_on_failure() {
        let mut phone = Phone::parse("1234567890").unwrap();
        assert_validation_err(phone.set("987-654-321"), FieldKind::Phone);
        assert_eq!(phone.as_str(), "1234567890");

        phone.set("0987654321").unwrap();
        assert_eq!(phone.as_str(), "0987654321");
    }

    #[test]
    fn email_extracts_first_match() {
        let email = Email::parse("write to joe.doe@site.com please").unwrap();
        assert_eq!(email.as_str(), "joe.doe@site.com");

        let email = Email::parse("a@b.info").unwrap();
        assert_eq!(email.as_str(), "a@b.inf");
    }

    #[test]
    fn email_without_match_is_rejected() {
        for raw in ["", "joe", "joe@", "joe@site", "@site.com", "joe@site.c"] {
            assert_validation_err(Email::parse(raw), FieldKind::Email);
        }
    }

    #[test]
    fn birthday_accepts_real_dates_only() {
        assert_eq!(
            Birthday::parse("2011-12-03").unwrap().to_string(),
            "2011-12-03"
        );
        assert!(Birthday::parse("2024-02-29").is_ok());

        assert_eq!(Birthday::parse("2011-1-3").unwrap().to_string(), "2011-01-03");

        for raw in [
            "1990/01/01",
            "2023-02-29",
            "2011-13-01",
            "2011-12-32",
            "",
            "yesterday",
            " 2011-12-03",
            "2011-12-03 ",
            "+2011-12-03",
            "011-12-03",
            "12011-12-03",
            "２０１１-12-03",
        ] {
            assert_validation_err(Birthday::parse(raw), FieldKind::Birthday);
        }
    }

    #[test]
    fn name_is_trimmed_and_title_cased() {
        assert_eq!(Name::parse("  kostya ").unwrap().as_str(), "Kostya");
        assert_eq!(Name::parse("anna  MARIA").unwrap().as_str(), "Anna Maria");
        assert_validation_err(Name::parse("   "), FieldKind::Name);
    }

    #[test]
    fn address_accepts_anything() {
        let field = Field::parse(FieldKind::Address, "").unwrap();
        assert_eq!(field.kind(), FieldKind::Address);
        assert_eq!(field.render(), "");
    }

    #[test]
    fn revalidating_stored_fields_never_fails() {
        let fields = [
            Field::parse(FieldKind::Name, "max").unwrap(),
            Field::parse(FieldKind::Phone, "7575757575").unwrap(),
            Field::parse(FieldKind::Email, "<max@mail.ua>").unwrap(),
            Field::parse(FieldKind::Address, "Kyiv, Khreshchatyk 1").unwrap(),
            Field::parse(FieldKind::Birthday, "2011-12-03").unwrap(),
        ];
        for field in &fields {
            field.validate().unwrap();
        }
    }

    #[test]
    fn deserializing_runs_validation() {
        let ok: Phone = serde_json::from_str("\"1234567890\"").unwrap();
        assert_eq!(ok.as_str(), "1234567890");
        assert!(serde_json::from_str::<Phone>("\"12-34\"").is_err());
    }
}
