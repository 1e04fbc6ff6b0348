//! companion-store: command-line access to the companion's saved data.
//!
//! Provides the backup actions of the app (export, import, clear all data)
//! and a read-only view of individual sections.

use clap::{Parser, Subcommand, ValueEnum};
use companion_store::storage::sections::{
    AiProfileSection, GallerySection, JournalSection, MemorySection, MessagesSection,
    SettingsSection, UserProfileSection, VoiceSettingsSection,
};
use companion_store::storage::backup::backup_file_name;
use companion_store::storage::{FileBackend, Section, DATA_DIR_ENV};
use companion_store::{SectionalStore, StoreConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "companion-store")]
#[command(author, version, about = "Backup and inspect AI companion data")]
#[command(propagate_version = true)]
struct Cli {
    /// Data directory (default: platform data directory)
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a backup of all data to a JSON file
    Export {
        /// Output file (default: ai-companion-backup-<ms>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore sections from a backup file
    Import {
        /// Backup file to read
        input: PathBuf,
    },

    /// Delete all stored data
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Print the current value of one section
    Show {
        #[arg(value_enum)]
        section: SectionArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SectionArg {
    Messages,
    AiProfile,
    UserProfile,
    Memory,
    Gallery,
    Journal,
    Settings,
    Voice,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match cli.data_dir {
        Some(dir) => StoreConfig::new(dir),
        None => StoreConfig::from_env()?,
    };
    let mut store = SectionalStore::open(&config)?;
    tracing::debug!("Using data directory {}", config.data_dir.display());

    match cli.command {
        Commands::Export { output } => cmd_export(&store, output)?,
        Commands::Import { input } => cmd_import(&mut store, &input)?,
        Commands::Clear { yes } => cmd_clear(&mut store, yes)?,
        Commands::Show { section } => cmd_show(&store, section)?,
    }
    Ok(())
}

fn cmd_export(
    store: &SectionalStore<FileBackend>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = store.export_all()?;
    let path = output.unwrap_or_else(|| PathBuf::from(backup_file_name(chrono::Utc::now())));
    fs::write(&path, json)?;
    println!("Backup written to {}", path.display());
    Ok(())
}

fn cmd_import(
    store: &mut SectionalStore<FileBackend>,
    input: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    if !store.import_all(&json) {
        return Err(format!("Could not import backup from {}", input.display()).into());
    }
    println!("Backup imported from {}", input.display());
    Ok(())
}

fn cmd_clear(
    store: &mut SectionalStore<FileBackend>,
    yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        return Err("Refusing to delete all data without --yes".into());
    }
    store.clear_all()?;
    println!("All data cleared");
    Ok(())
}

fn cmd_show(
    store: &SectionalStore<FileBackend>,
    section: SectionArg,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = match section {
        SectionArg::Messages => pretty::<MessagesSection>(store)?,
        SectionArg::AiProfile => pretty::<AiProfileSection>(store)?,
        SectionArg::UserProfile => pretty::<UserProfileSection>(store)?,
        SectionArg::Memory => pretty::<MemorySection>(store)?,
        SectionArg::Gallery => pretty::<GallerySection>(store)?,
        SectionArg::Journal => pretty::<JournalSection>(store)?,
        SectionArg::Settings => pretty::<SettingsSection>(store)?,
        SectionArg::Voice => pretty::<VoiceSettingsSection>(store)?,
    };
    println!("{}", json);
    Ok(())
}

fn pretty<S: Section>(
    store: &SectionalStore<FileBackend>,
) -> Result<String, Box<dyn std::error::Error>> {
    let value = store.get::<S>()?;
    Ok(serde_json::to_string_pretty(&value)?)
}
