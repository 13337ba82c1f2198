//! plcbind CLI: decode located variables and bind them to board pins.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;

use manifest::PlcbindManifest;

#[derive(Parser)]
#[command(name = "plcbind", version, about = "IEC 61131-3 located-variable pin binder")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new plcbind project
    Init {
        /// Project name
        name: String,
        /// Target platform
        #[arg(long, default_value = "esp8266")]
        platform: String,
    },
    /// Decode a located-variable literal (e.g., %IX0.0)
    Decode {
        /// Address literal
        literal: String,
    },
    /// Inspect platform pin tables
    Platform {
        #[command(subcommand)]
        action: PlatformAction,
    },
    /// Validate bindings and report every unbound address
    Check,
    /// Resolve used variables to pins and print the build plan
    Resolve {
        /// Output format (human, json)
        #[arg(long, default_value = "human")]
        format: String,
    },
}

#[derive(Subcommand)]
enum PlatformAction {
    /// List known platforms
    List,
    /// Show a platform's default pin table
    Describe {
        /// Platform name
        name: String,
        /// Output format (default: human-readable, "toml" for TOML)
        #[arg(long)]
        format: Option<String>,
    },
    /// Print a starter .pins.toml for a new platform
    Template {
        /// Platform name
        name: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name, platform } => commands::init::run(&name, &platform),

        Commands::Decode { literal } => commands::decode::run(&literal),

        Commands::Platform { action } => {
            let (_, project_dir) = load_manifest_optional(&cwd)?;
            let registry = manifest::load_registry(project_dir.as_deref())?;
            match action {
                PlatformAction::List => commands::platform::list(&registry),
                PlatformAction::Describe { name, format } => {
                    commands::platform::describe(&registry, &name, format.as_deref())
                }
                PlatformAction::Template { name } => commands::platform::template(&name),
            }
        }

        Commands::Check => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            commands::check::run(&project_dir, &manifest)
        }

        Commands::Resolve { format } => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            commands::resolve::run(&project_dir, &manifest, &format)
        }
    }
}

/// Load the manifest, failing if none is found.
fn load_manifest_required(cwd: &Path) -> anyhow::Result<(PlcbindManifest, PathBuf)> {
    match PlcbindManifest::find_and_load(cwd)? {
        Some(found) => Ok(found),
        None => anyhow::bail!(
            "no {} found in {} or any parent directory",
            manifest::MANIFEST_FILE,
            cwd.display()
        ),
    }
}

/// Load the manifest if one exists.
fn load_manifest_optional(
    cwd: &Path,
) -> anyhow::Result<(Option<PlcbindManifest>, Option<PathBuf>)> {
    match PlcbindManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}
