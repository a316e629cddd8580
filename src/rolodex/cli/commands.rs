use super::print::{print_messages, print_result};
use super::setup::{Cli, Commands};
use super::telemetry;
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use rolodex::api::{CmdMessage, CmdResult, ConfigAction, RolodexApi};
use rolodex::config::RolodexConfig;
use rolodex::error::{Result, RolodexError};
use rolodex::store::fs::FileStore;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

const HOME_ENV: &str = "ROLODEX_HOME";
const PROMPT: &str = "rolodex> ";

struct AppContext {
    api: RolodexApi<FileStore>,
    config: RolodexConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    let mut ctx = init_context()?;

    match cli.command.unwrap_or(Commands::List { batched: None }) {
        Commands::Shell => run_shell(&mut ctx),
        command => {
            let result = execute(&mut ctx, command)?;
            print_result(&result);
            if result.modified && ctx.config.autosave {
                ctx.api.save()?;
            }
            Ok(())
        }
    }
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "rolodex", "rolodex")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| RolodexError::Config("Could not determine data directory".into()))
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir()?;
    let config = RolodexConfig::load(&data_dir)?;
    let store = FileStore::new(config.data_path(&data_dir));
    tracing::debug!(data_dir = %data_dir.display(), "opening address book");

    let api = RolodexApi::open(store, data_dir)?;
    Ok(AppContext { api, config })
}

fn execute(ctx: &mut AppContext, command: Commands) -> Result<CmdResult> {
    let api = &mut ctx.api;
    match command {
        Commands::AddName { name, plain } => api.add_name(&name, plain),
        Commands::AddPhone { name, phone } => api.add_phone(&name, &phone),
        Commands::DeletePhone { name, phone } => api.delete_phone(&name, &phone),
        Commands::EditPhone { name, old, new } => api.edit_phone(&name, &old, &new),
        Commands::AddEmail { name, email } => api.add_email(&name, &email),
        Commands::AddAddress { name, address } => api.add_address(&name, &address.join(" ")),
        Commands::AddBirthday { name, date } => api.add_birthday(&name, &date),
        Commands::Show { name } => api.show(&name),
        Commands::Delete { name } => api.delete_contact(&name),
        Commands::List { batched: None } => api.list_book(),
        Commands::List {
            batched: Some(size),
        } => api.list_batched(size.unwrap_or(ctx.config.batch_size)),
        Commands::Find { term } => api.find_by_term(&term),
        Commands::DaysToBirthday { name } => api.days_to_birthday(&name),
        Commands::When { days } => api.when(days),
        Commands::AddNote { tags, name, text } => api.add_note(&name, &text.join(" "), &tags),
        Commands::Notes { name } => api.find_note_by_name(&name),
        Commands::FindNotes { term } => api.find_notes_by_term(&term),
        Commands::ListNotes => api.list_notes(),
        Commands::EditNote {
            matching,
            tags,
            name,
            text,
        } => {
            let new_tags = (!tags.is_empty()).then_some(tags.as_slice());
            api.edit_note(&name, matching.as_deref(), &text.join(" "), new_tags)
        }
        Commands::DeleteNote { name, text } => api.delete_note(&name, &text.join(" ")),
        Commands::DeleteAllNotes { name } => api.delete_all_notes(&name),
        Commands::Save => api.save(),
        Commands::Load => api.load(),
        Commands::Config { key, value } => {
            let action = match (key, value) {
                (None, _) => ConfigAction::ShowAll,
                (Some(k), None) => ConfigAction::ShowKey(k),
                (Some(k), Some(v)) => ConfigAction::Set(k, v),
            };
            let mut result = api.config(action)?;
            if let Some(config) = result.config.clone() {
                if config.data_file != ctx.config.data_file {
                    let path = config.data_path(api.data_dir());
                    tracing::debug!(path = %path.display(), "switching book file");
                    result.add_message(CmdMessage::info(format!(
                        "The address book now saves to {}.",
                        path.display()
                    )));
                    api.replace_store(FileStore::new(path));
                }
                ctx.config = config;
            }
            Ok(result)
        }
        Commands::Exit => api.exit(),
        Commands::Shell => Ok(CmdResult::default()
            .with_message(CmdMessage::warning("Already in the shell."))),
    }
}

/// Reads commands from stdin until `exit` or end of input, then saves.
///
/// Each line goes through the same clap grammar as the command line. A
/// failing command prints its error and the loop carries on.
fn run_shell(ctx: &mut AppContext) -> Result<()> {
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        print_messages(&[CmdMessage::info(
            "Type a command (e.g. add-name max), --help for the list, exit to leave.",
        )]);
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{}", PROMPT);
            std::io::stdout().flush()?;
        }
        let Some(line) = lines.next().transpose()? else {
            break;
        };

        let words = match split_words(&line) {
            Ok(words) if words.is_empty() => continue,
            Ok(words) => words,
            Err(e) => {
                report(&e);
                continue;
            }
        };
        let command = match Cli::try_parse_from(std::iter::once("rolodex".to_string()).chain(words))
        {
            Ok(Cli {
                command: Some(command),
                ..
            }) => command,
            Ok(_) => continue,
            Err(e) => {
                // Help and version land here too
                let _ = e.print();
                continue;
            }
        };

        let leaving = command == Commands::Exit;
        match execute(ctx, command) {
            Ok(result) => print_result(&result),
            Err(e) => report(&e),
        }
        if leaving {
            return Ok(());
        }
    }

    let result = ctx.api.save()?;
    print_result(&result);
    Ok(())
}

fn report(error: &RolodexError) {
    eprintln!("{}", format!("Error: {}", error).red());
}

/// Splits a shell line into words. Single or double quotes group words;
/// quotes never nest.
fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(RolodexError::InvalidArgument(format!(
            "unterminated {} quote",
            q
        )));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
