use super::helpers::record;
use crate::book::AddressBook;
use crate::commands::{BirthdayEntry, CmdMessage, CmdResult};
use crate::error::{Result, RolodexError};
use crate::model::{Record, UNKNOWN_BIRTHDAY};
use chrono::NaiveDate;

fn entry(record: &Record, today: NaiveDate) -> BirthdayEntry {
    BirthdayEntry {
        name: record.name().to_string(),
        birthday: record.birthday().copied(),
        days: record.days_to_birthday_on(today),
    }
}

pub fn days_to_birthday(book: &AddressBook, name: &str, today: NaiveDate) -> Result<CmdResult> {
    let record = record(book, name)?;
    let entry = entry(record, today);

    let message = match entry.days {
        UNKNOWN_BIRTHDAY => {
            CmdMessage::warning(format!("No birthday recorded for {}.", entry.name))
        }
        0 => CmdMessage::success(format!("{}'s birthday is today!", entry.name)),
        days => CmdMessage::info(format!("{}'s birthday is in {} day(s).", entry.name, days)),
    };

    Ok(CmdResult::default()
        .with_birthdays(vec![entry])
        .with_message(message))
}

/// Contacts whose birthday is today or less than `days` days away, soonest
/// first. Contacts without a birthday are skipped.
pub fn when(book: &AddressBook, days: i64, today: NaiveDate) -> Result<CmdResult> {
    if days < 0 {
        return Err(RolodexError::InvalidArgument(format!(
            "number of days must not be negative, got {}",
            days
        )));
    }

    let mut upcoming: Vec<BirthdayEntry> = book
        .records()
        .map(|r| entry(r, today))
        .filter(|e| e.days != UNKNOWN_BIRTHDAY && (e.days == 0 || e.days < days))
        .collect();
    upcoming.sort_by_key(|e| e.days);

    let mut result = CmdResult::default();
    if upcoming.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No birthdays in the next {} day(s).",
            days
        )));
    }
    Ok(result.with_birthdays(upcoming))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{contacts, MessageLevel};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn book() -> AddressBook {
        let mut book = AddressBook::new();
        for (name, birthday) in [
            ("Max", Some("2011-12-03")),
            ("Jane", Some("1990-12-10")),
            ("Grigi", Some("1985-12-01")),
            ("Alex", None),
        ] {
            contacts::add_name(&mut book, name, false).unwrap();
            if let Some(birthday) = birthday {
                contacts::add_birthday(&mut book, name, birthday).unwrap();
            }
        }
        book
    }

    #[test]
    fn days_to_birthday_counts_forward() {
        let result = days_to_birthday(&book(), "max", date("2024-12-01")).unwrap();
        assert_eq!(result.birthdays[0].days, 2);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn days_to_birthday_today_is_zero() {
        let result = days_to_birthday(&book(), "max", date("2024-12-03")).unwrap();
        assert_eq!(result.birthdays[0].days, 0);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn days_to_birthday_unknown_is_flagged() {
        let result = days_to_birthday(&book(), "alex", date("2024-12-03")).unwrap();
        assert_eq!(result.birthdays[0].days, UNKNOWN_BIRTHDAY);
        assert!(result.birthdays[0].birthday.is_none());
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn days_to_birthday_requires_contact() {
        assert!(matches!(
            days_to_birthday(&book(), "nobody", date("2024-12-03")),
            Err(RolodexError::NotFound(_))
        ));
    }

    #[test]
    fn when_lists_upcoming_soonest_first() {
        let result = when(&book(), 10, date("2024-12-01")).unwrap();
        let names: Vec<&str> = result.birthdays.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Grigi", "Max", "Jane"]);
        assert_eq!(result.birthdays[2].days, 9);
    }

    #[test]
    fn when_window_is_exclusive_but_always_includes_today() {
        let result = when(&book(), 9, date("2024-12-01")).unwrap();
        assert_eq!(result.birthdays.len(), 2);

        let result = when(&book(), 0, date("2024-12-01")).unwrap();
        assert_eq!(result.birthdays.len(), 1);
        assert_eq!(result.birthdays[0].name, "Grigi");
    }

    #[test]
    fn when_reports_empty_window_and_rejects_negative() {
        let result = when(&book(), 5, date("2024-06-01")).unwrap();
        assert!(result.birthdays.is_empty());
        assert_eq!(result.messages.len(), 1);
        assert!(when(&book(), -1, date("2024-06-01")).is_err());
    }
}
