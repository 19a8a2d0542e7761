//! # cfgreg INI Tool
//!
//! Inspect and edit an INI configuration file through the same registry and
//! provider the libraries use.
//!
//! # Usage
//!
//! ```bash
//! # Print the parsed file (ini, json or toml)
//! cfgreg_ini --file app.ini dump --format json
//!
//! # Typed read
//! cfgreg_ini --file app.ini get network port --type int
//!
//! # Write a value (creates the file and section if needed)
//! cfgreg_ini --file app.ini set network port 8080
//!
//! # Verbose / JSON logging
//! cfgreg_ini --file app.ini -v --json sections
//! ```

#![deny(warnings)]

use cfgreg_common::prelude::*;
use cfgreg_ini::IniConfigProvider;
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Registration key of the single item the tool declares per invocation.
const CLI_KEY: &str = "cli";

/// cfgreg INI tool - inspect and edit INI configuration files
#[derive(Parser, Debug)]
#[command(name = "cfgreg_ini")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Inspect and edit INI configuration files")]
#[command(long_about = None)]
struct Args {
    /// Path to the INI file.
    #[arg(short, long, value_name = "PATH")]
    file: PathBuf,

    /// Enable verbose logging (same as --log-level debug)
    #[arg(short, long)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the whole parsed file
    Dump {
        #[arg(long, value_enum, default_value_t = DumpFormat::Ini)]
        format: DumpFormat,
    },
    /// List sections with their option counts
    Sections,
    /// Read one value
    Get {
        section: String,
        option: String,
        #[arg(short = 't', long = "type", value_enum, default_value_t = ValueType::String)]
        value_type: ValueType,
    },
    /// Write one value, creating file and section if needed
    Set {
        section: String,
        option: String,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DumpFormat {
    Ini,
    Json,
    Toml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ValueType {
    String,
    Int,
    Float,
    Bool,
}

fn main() {
    if let Err(e) = run() {
        error!("cfgreg_ini failed: {}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    setup_tracing(&args);

    info!("cfgreg_ini v{} on {}", env!("CARGO_PKG_VERSION"), args.file.display());

    match args.command {
        Command::Dump { format } => {
            let provider = IniConfigProvider::load(&args.file)?;
            let document = provider.document();
            let text = match format {
                DumpFormat::Ini => document.to_ini_string(),
                DumpFormat::Json => serde_json::to_string_pretty(document)? + "\n",
                DumpFormat::Toml => toml::to_string(document)?,
            };
            print!("{text}");
        }
        Command::Sections => {
            let provider = IniConfigProvider::load(&args.file)?;
            for (section, options) in provider.document().sections() {
                println!("{section}\t{}", options.len());
            }
        }
        Command::Get {
            section,
            option,
            value_type,
        } => {
            // Read-only: no initialize, so nothing is seeded or written.
            let provider = IniConfigProvider::load(&args.file)?;
            let registry = single_item_registry(provider, &section, &option, "")?;
            let text = match value_type {
                ValueType::String => registry.get_string(CLI_KEY)?,
                ValueType::Int => registry.get_int(CLI_KEY)?.to_string(),
                ValueType::Float => registry.get_float64(CLI_KEY)?.to_string(),
                ValueType::Bool => registry.get_bool(CLI_KEY)?.to_string(),
            };
            println!("{text}");
        }
        Command::Set {
            section,
            option,
            value,
        } => {
            let provider = IniConfigProvider::new(&args.file);
            let mut registry = single_item_registry(provider, &section, &option, &value)?;
            registry.initialize()?;
            registry.set_value(CLI_KEY, value)?;
            info!("Set [{section}] {option}");
        }
    }

    Ok(())
}

/// Registry holding one ad-hoc item for `(section, option)`.
fn single_item_registry(
    provider: IniConfigProvider,
    section: &str,
    option: &str,
    default: &str,
) -> Result<ConfigRegistry, ConfigError> {
    let mut registry = ConfigRegistry::with_provider(provider);
    let items = BTreeMap::from([(
        CLI_KEY.to_string(),
        ConfigItem::new(section, option, option, default),
    )]);
    registry.register_items(&items)?;
    Ok(registry)
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        args.log_level
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
