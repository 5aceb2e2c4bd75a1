//! Schematic Layout CLI
//!
//! Usage:
//!   schematic-layout [OPTIONS] [FILE]
//!
//! Options:
//!   -s, --settings <FILE>   Layout and style settings (TOML format)
//!   -c, --collapse <PATH>   Collapse a block (repeatable)
//!   -p, --pretty            Pretty-print the JSON output
//!   -l, --log-level <LEVEL> Log level (off, error, warn, info, debug, trace)
//!   -h, --help              Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::Parser;
use log::{debug, info, LevelFilter};

use schematic_layout::{
    layout_element, parse_element, Schematic, SchematicConfig, SchematicError, Settings,
};

#[derive(Parser, Debug)]
#[command(name = "schematic-layout")]
#[command(about = "Lay out hierarchical schematics as JSON node and connector descriptors")]
struct Cli {
    /// Input element tree in JSON (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Settings file for layout constants and styling (TOML format)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Collapse the block at this path
    #[arg(short, long)]
    collapse: Vec<String>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    debug!(cli:?; "Parsed arguments");

    // Load settings
    let settings = match &cli.settings {
        Some(path) => match Settings::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading settings '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Settings::default(),
    };

    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    process::exit(1);
                }
            }
        }
    };

    let root = match parse_element(&source) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("{}", e.format(&source, &filename));
            process::exit(1);
        }
    };

    let config = cli
        .collapse
        .iter()
        .fold(SchematicConfig::new().with_settings(settings), |config, path| {
            config.with_collapsed(path)
        });

    match layout_element(&root, &config).and_then(|schematic| write_json(&schematic, cli.pretty)) {
        Ok(json) => {
            println!("{}", json);
            info!(file = filename.as_str(); "Layout complete");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn write_json(schematic: &Schematic, pretty: bool) -> Result<String, SchematicError> {
    let json = if pretty {
        serde_json::to_string_pretty(schematic)?
    } else {
        serde_json::to_string(schematic)?
    };
    Ok(json)
}
