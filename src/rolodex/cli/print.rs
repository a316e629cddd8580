use chrono::{DateTime, Utc};
use colored::Colorize;
use rolodex::api::{BirthdayEntry, CmdMessage, CmdResult, MessageLevel, NoteEntry};
use rolodex::config::{RolodexConfig, KEYS};
use rolodex::model::{Record, UNKNOWN_BIRTHDAY};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const COLUMN_MAX: usize = 32;
const GAP: &str = "  ";
const HEADERS: [&str; 5] = ["Name", "Phones", "Email", "Address", "Birthday"];

/// Prints everything a command handed back, data first, then messages.
pub(super) fn print_result(result: &CmdResult) {
    if !result.listed_records.is_empty() {
        print!("{}", render_records(&result.listed_records));
    }
    for (i, batch) in result.batches.iter().enumerate() {
        println!("{}", format!("Batch {}", i + 1).bold());
        print!("{}", render_records(batch));
    }
    if !result.birthdays.is_empty() {
        print!("{}", render_birthdays(&result.birthdays));
    }
    if !result.notes.is_empty() {
        print!("{}", render_notes(&result.notes));
    }
    if let Some(config) = &result.config {
        // A set already reports the one key it changed
        if result.messages.is_empty() {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn record_row(record: &Record) -> [String; 5] {
    let phones = record
        .phones()
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    [
        record.name().to_string(),
        phones,
        record.email().map(|e| e.to_string()).unwrap_or_default(),
        record.address().map(|a| a.to_string()).unwrap_or_default(),
        record.birthday().map(|b| b.to_string()).unwrap_or_default(),
    ]
}

pub(super) fn render_records(records: &[Record]) -> String {
    let rows: Vec<[String; 5]> = records.iter().map(record_row).collect();

    let mut widths = HEADERS.map(|h| h.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width()).min(COLUMN_MAX);
        }
    }

    let mut output = String::new();
    let header = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| pad_to_width(h, w))
        .collect::<Vec<_>>()
        .join(GAP);
    output.push_str(&format!("{}\n", header.trim_end().bold()));

    for (record, row) in records.iter().zip(&rows) {
        let mut cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| pad_to_width(&truncate_to_width(cell, w), w))
            .collect();
        if record.supports_notes() {
            let count = record.notes().map_or(0, |n| n.len());
            if count > 0 {
                cells.push(format!("({} note(s))", count).dimmed().to_string());
            }
        }
        output.push_str(cells.join(GAP).trim_end());
        output.push('\n');
    }
    output
}

pub(super) fn render_birthdays(entries: &[BirthdayEntry]) -> String {
    let name_width = entries
        .iter()
        .map(|e| e.name.width())
        .max()
        .unwrap_or(0)
        .min(COLUMN_MAX);

    let mut output = String::new();
    for entry in entries {
        let date = entry
            .birthday
            .map(|b| b.to_string())
            .unwrap_or_else(|| "----------".to_string());
        let when = match entry.days {
            UNKNOWN_BIRTHDAY => "unknown".dimmed(),
            0 => "today".green().bold(),
            1 => "tomorrow".yellow(),
            days => format!("in {} days", days).normal(),
        };
        output.push_str(&format!(
            "{}{}{}{}{}\n",
            pad_to_width(&truncate_to_width(&entry.name, name_width), name_width),
            GAP,
            date,
            GAP,
            when
        ));
    }
    output
}

pub(super) fn render_notes(entries: &[NoteEntry]) -> String {
    let owner_width = entries
        .iter()
        .map(|e| e.owner.width())
        .max()
        .unwrap_or(0)
        .min(COLUMN_MAX);

    let mut output = String::new();
    for entry in entries {
        let tags = if entry.note.tags.is_empty() {
            String::new()
        } else {
            format!(
                " {}",
                entry
                    .note
                    .tags
                    .iter()
                    .map(|t| format!("#{}", t))
                    .collect::<Vec<_>>()
                    .join(" ")
                    .cyan()
            )
        };
        output.push_str(&format!(
            "{}{}{}{}{}{}\n",
            pad_to_width(&entry.owner, owner_width).yellow(),
            GAP,
            entry.note.text,
            tags,
            GAP,
            format_time_ago(entry.note.created_at).dimmed()
        ));
    }
    output
}

pub(super) fn render_config(config: &RolodexConfig) -> String {
    KEYS.iter()
        .map(|key| {
            format!(
                "{} = {}\n",
                key,
                config.get(key).unwrap_or_default()
            )
        })
        .collect()
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
