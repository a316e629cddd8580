use clap::{Parser, Subcommand};

/// Returns the version string, with the git hash appended for non-release builds.
/// Format: "0.3.1" for releases, "0.3.1@abc1234" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "rolodex", bin_name = "rolodex", version = get_version())]
#[command(about = "Contacts, birthdays and notes from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Create a contact
    #[command(display_order = 1)]
    AddName {
        name: String,

        /// Create a contact that cannot hold notes
        #[arg(long)]
        plain: bool,
    },

    /// Add a phone number (10 digits)
    #[command(display_order = 2)]
    AddPhone { name: String, phone: String },

    /// Remove a phone number
    #[command(display_order = 3)]
    DeletePhone { name: String, phone: String },

    /// Replace one phone number with another
    #[command(display_order = 4)]
    EditPhone {
        name: String,
        old: String,
        new: String,
    },

    /// Set the email
    #[command(display_order = 5)]
    AddEmail { name: String, email: String },

    /// Set the address
    #[command(display_order = 6)]
    AddAddress {
        name: String,

        /// Address words (joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        address: Vec<String>,
    },

    /// Set the birthday (YYYY-MM-DD)
    #[command(display_order = 7)]
    AddBirthday { name: String, date: String },

    /// Show one contact
    #[command(display_order = 8)]
    Show { name: String },

    /// Delete a contact
    #[command(alias = "rm", display_order = 9)]
    Delete { name: String },

    /// List all contacts
    #[command(alias = "ls", display_order = 10)]
    List {
        /// Group contacts in batches (defaults to the configured batch-size)
        #[arg(long, value_name = "SIZE")]
        batched: Option<Option<usize>>,
    },

    /// Search phones, email, address and name
    #[command(alias = "search", display_order = 11)]
    Find { term: String },

    /// Days until a contact's birthday
    #[command(display_order = 12)]
    DaysToBirthday { name: String },

    /// Birthdays coming up within DAYS days
    #[command(display_order = 13)]
    When {
        #[arg(allow_negative_numbers = true)]
        days: i64,
    },

    /// Add a note to a contact
    #[command(display_order = 20)]
    AddNote {
        /// Tag for the note (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        name: String,

        /// Note words (joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Show the notes of one contact
    #[command(display_order = 21)]
    Notes { name: String },

    /// Search notes by text or tag across all contacts
    #[command(display_order = 22)]
    FindNotes { term: String },

    /// List every note in the book
    #[command(display_order = 23)]
    ListNotes,

    /// Rewrite a contact's notes (all of them unless --match is given)
    #[command(display_order = 24)]
    EditNote {
        /// Only edit notes whose text is exactly this
        #[arg(long = "match", value_name = "TEXT")]
        matching: Option<String>,

        /// Replace the tags (repeatable); tags are kept when omitted
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        name: String,

        /// New note words (joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Delete the notes with the given text
    #[command(display_order = 25)]
    DeleteNote {
        name: String,

        /// Note words (joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Delete every note of a contact
    #[command(display_order = 26)]
    DeleteAllNotes { name: String },

    /// Write the book to disk
    #[command(display_order = 30)]
    Save,

    /// Merge the saved book into the current one
    #[command(display_order = 31)]
    Load,

    /// Get or set configuration
    #[command(display_order = 32)]
    Config {
        /// Configuration key (data-file, batch-size, autosave)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Start an interactive session
    #[command(display_order = 33)]
    Shell,

    /// Save and leave
    #[command(aliases = ["close", "quit"], display_order = 34)]
    Exit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Commands {
        let cli = Cli::try_parse_from(std::iter::once("rolodex").chain(args.iter().copied()))
            .unwrap();
        cli.command.unwrap()
    }

    #[test]
    fn address_words_are_collected() {
        assert_eq!(
            parse(&["add-address", "max", "Odesa,", "Derybasivska", "5"]),
            Commands::AddAddress {
                name: "max".into(),
                address: vec!["Odesa,".into(), "Derybasivska".into(), "5".into()],
            }
        );
    }

    #[test]
    fn note_tags_come_before_the_text() {
        assert_eq!(
            parse(&["add-note", "-t", "goit", "--tag", "py", "kostya", "student", "again"]),
            Commands::AddNote {
                tags: vec!["goit".into(), "py".into()],
                name: "kostya".into(),
                text: vec!["student".into(), "again".into()],
            }
        );
    }

    #[test]
    fn batched_value_is_optional() {
        assert_eq!(parse(&["list"]), Commands::List { batched: None });
        assert_eq!(
            parse(&["list", "--batched"]),
            Commands::List {
                batched: Some(None)
            }
        );
        assert_eq!(
            parse(&["list", "--batched", "4"]),
            Commands::List {
                batched: Some(Some(4))
            }
        );
    }

    #[test]
    fn when_accepts_negative_days_for_validation_downstream() {
        assert_eq!(parse(&["when", "-3"]), Commands::When { days: -3 });
    }

    #[test]
    fn edit_note_match_is_optional() {
        assert_eq!(
            parse(&["edit-note", "--match", "old", "max", "new", "text"]),
            Commands::EditNote {
                matching: Some("old".into()),
                tags: vec![],
                name: "max".into(),
                text: vec!["new".into(), "text".into()],
            }
        );
    }
}
