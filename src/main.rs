use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use repo_save::cli::{handle_save_command, SaveCommands};
use repo_save::config::{paths::RepoSavePaths, settings::Settings};
use repo_save::storage::FileRepository;

#[derive(Parser)]
#[command(
    name = "reposave",
    author = "Kaylee Beyene",
    version,
    about = "Editor for encrypted R.E.P.O. save files",
    long_about = "reposave decrypts, inspects and edits R.E.P.O. save containers \
                  (REPO_SAVE_*.es3). Edits are written back atomically, and an \
                  invalid raw document never overwrites a save."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Save(SaveCommands),

    /// Write default settings to the config directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = RepoSavePaths::new()?;
    let (settings, settings_error) = match Settings::load_or_create(&paths) {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    init_logging(&settings);
    if let Some(e) = settings_error {
        tracing::warn!(
            path = %paths.settings_file().display(),
            error = %e,
            "ignoring unreadable settings, using defaults"
        );
    }

    let repo = FileRepository::new();

    match cli.command {
        Some(Commands::Save(cmd)) => {
            handle_save_command(&repo, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Settings written to {}", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            println!("reposave Configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Indent width: {}", settings.indent_width);
            println!("  Log filter:   {}", settings.log_filter);
        }
        None => {
            println!("reposave - R.E.P.O. save editor");
            println!();
            println!("Run 'reposave --help' for usage information.");
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured filter. Logs go to stderr so
/// `decrypt` output stays pipeable.
fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
