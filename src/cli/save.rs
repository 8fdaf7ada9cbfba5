//! Save file CLI commands
//!
//! Implements decrypt, encrypt, show and edit for a single container file.

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::crypto::{self, DEFAULT_PASSWORD};
use crate::display::{format_document, format_summary, format_warnings};
use crate::document::SaveDocument;
use crate::error::{SaveError, SaveResult};
use crate::merge::{BatchEdit, FieldEdit, ResolvedFrom};
use crate::services::{SaveEditor, SaveSummary};
use crate::storage::{write_bytes_atomic, ContainerRepository};

/// Save file subcommands
#[derive(Subcommand)]
pub enum SaveCommands {
    /// Decrypt a save container to JSON
    Decrypt {
        /// Path to the .es3 container
        file: PathBuf,
        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Encrypt a JSON document into a save container
    Encrypt {
        /// Path to the JSON document
        json: PathBuf,
        /// Container path to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show world stats and players
    Show {
        /// Path to the .es3 container
        file: PathBuf,
        /// Print a one-line summary only
        #[arg(long)]
        summary: bool,
    },

    /// Edit fields and save the container
    Edit {
        /// Path to the .es3 container
        file: PathBuf,
        /// Field assignment, e.g. runStats.level=5 or playerHealth.<id>=100
        #[arg(short, long = "set", value_name = "PATH=VALUE")]
        set: Vec<String>,
        /// Assignment applied to every player, e.g. playerUpgradeSpeed=3
        #[arg(long = "all-players", value_name = "FIELD=VALUE")]
        all_players: Vec<String>,
        /// Replace the whole document with this JSON file (overrides --set)
        #[arg(long, value_name = "JSON_FILE")]
        raw: Option<PathBuf>,
        /// Write to this path instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a save command
pub fn handle_save_command<R>(repo: &R, settings: &Settings, cmd: SaveCommands) -> SaveResult<()>
where
    R: ContainerRepository + ?Sized,
{
    match cmd {
        SaveCommands::Decrypt { file, output } => {
            let bytes = repo.read_container(&file)?;
            let text = crypto::decode_string(&bytes, DEFAULT_PASSWORD)?;
            let pretty = SaveDocument::parse(&text)?.serialize_with_indent(settings.indent_width)?;

            match output {
                Some(path) => {
                    write_bytes_atomic(&path, pretty.as_bytes())?;
                    println!("Decrypted {} -> {}", file.display(), path.display());
                }
                None => println!("{}", pretty),
            }
        }

        SaveCommands::Encrypt { json, output } => {
            let text = std::fs::read_to_string(&json).map_err(|e| {
                SaveError::Io(format!("Failed to read {}: {}", json.display(), e))
            })?;
            // Refuse to produce a container the game cannot parse
            SaveDocument::parse(&text)?;

            let container = crypto::encode_string(&text, DEFAULT_PASSWORD);
            repo.write_container(&output, &container)?;
            println!(
                "Encrypted {} -> {} ({} bytes)",
                json.display(),
                output.display(),
                container.len()
            );
        }

        SaveCommands::Show { file, summary } => {
            let bytes = repo.read_container(&file)?;
            if summary {
                let summary = SaveSummary::from_container(&bytes, DEFAULT_PASSWORD)?;
                println!("{}", format_summary(&summary));
            } else {
                let (editor, warnings) = SaveEditor::load(&bytes, DEFAULT_PASSWORD)?;
                for warning in &warnings {
                    eprintln!("Note: {}", warning);
                }
                print!("{}", format_document(editor.document()));
            }
        }

        SaveCommands::Edit {
            file,
            set,
            all_players,
            raw,
            output,
        } => edit(repo, settings, &file, &set, &all_players, raw.as_deref(), output)?,
    }

    Ok(())
}

fn edit<R>(
    repo: &R,
    settings: &Settings,
    file: &Path,
    set: &[String],
    all_players: &[String],
    raw: Option<&Path>,
    output: Option<PathBuf>,
) -> SaveResult<()>
where
    R: ContainerRepository + ?Sized,
{
    // Parse every assignment before touching the container
    let batch = all_players
        .iter()
        .map(|s| BatchEdit::parse_assignment(s))
        .collect::<SaveResult<Vec<_>>>()?;
    let fields = set
        .iter()
        .map(|s| FieldEdit::parse_assignment(s))
        .collect::<SaveResult<Vec<_>>>()?;

    if batch.is_empty() && fields.is_empty() && raw.is_none() {
        println!("No edits given. Use --set, --all-players or --raw.");
        return Ok(());
    }

    let bytes = repo.read_container(file)?;
    let (editor, warnings) = SaveEditor::load(&bytes, DEFAULT_PASSWORD)?;
    let mut editor = editor.with_indent(settings.indent_width);
    for warning in &warnings {
        eprintln!("Note: {}", warning);
    }

    for edit in batch {
        editor.apply_batch(edit.field, edit.input);
    }
    for edit in fields {
        editor.set_field(edit.path, edit.input);
    }
    if let Some(raw) = raw {
        let text = std::fs::read_to_string(raw)
            .map_err(|e| SaveError::Io(format!("Failed to read {}: {}", raw.display(), e)))?;
        editor.edit_raw(text);
    }

    let target = output.unwrap_or_else(|| file.to_path_buf());
    let outcome = editor.save_to(repo, &target, DEFAULT_PASSWORD)?;

    eprint!("{}", format_warnings(&outcome.warnings));
    if outcome.source == ResolvedFrom::Raw && outcome.discarded > 0 {
        eprintln!(
            "Note: raw document supplied; {} structured edit(s) were discarded",
            outcome.discarded
        );
    }
    println!(
        "Saved {} ({} bytes)",
        target.display(),
        outcome.container.len()
    );
    Ok(())
}
