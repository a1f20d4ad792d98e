mod config;
mod layout;
mod session;

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use canvas::config::{CanvasConfig, ConfigError};
use canvas::doc::LoadError;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("cannot read or write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("store rejected: {0}")]
    Load(#[from] LoadError),
    #[error("script line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("block {id} has an empty span ({w}x{h})")]
    EmptyBlock { id: String, w: i32, h: i32 },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "spline", about = "Spline playground canvas: replay input scripts and resolve grid layouts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scripted pointer session and print the resulting camera and objects.
    Replay(ReplayArgs),
    /// Resolve a grid block file and print the placed blocks.
    Layout(LayoutArgs),
    /// Print the effective canvas configuration.
    Config,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(long, env = "SPLINE_STORE", help = "Persisted store blob to start from")]
    store: Option<PathBuf>,

    #[arg(long, default_value = "-", help = "Script file path, or - for stdin")]
    script: String,

    #[arg(long, help = "Write the final store blob here")]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    #[arg(long, default_value = "-", help = "Block file path, or - for stdin")]
    blocks: String,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    zoom: f64,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let config = config::from_env()?;

    match cli.command {
        Command::Replay(args) => run_replay(config, args),
        Command::Layout(args) => run_layout(config, args),
        Command::Config => print_json(&config),
    }
}

fn run_replay(config: CanvasConfig, args: ReplayArgs) -> Result<(), CliError> {
    let store = args.store.as_deref().map(read_path).transpose()?;

    let events = if args.script == "-" {
        session::parse_script(io::stdin().lock(), "<stdin>")?
    } else {
        let file = File::open(&args.script).map_err(|e| CliError::Io { path: args.script.clone(), source: e })?;
        session::parse_script(BufReader::new(file), &args.script)?
    };

    let report = session::replay(config, store.as_deref(), &events)?;

    if let Some(out) = &args.out {
        let blob = serde_json::to_string(&report.objects)?;
        fs::write(out, blob).map_err(|e| CliError::Io { path: out.display().to_string(), source: e })?;
        tracing::info!(path = %out.display(), objects = report.objects.len(), "store written");
    }
    print_json(&report)
}

fn run_layout(config: CanvasConfig, args: LayoutArgs) -> Result<(), CliError> {
    let blob = if args.blocks == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(|e| CliError::Io { path: "<stdin>".to_owned(), source: e })?;
        buf
    } else {
        read_path(Path::new(&args.blocks))?
    };
    let report = layout::resolve_file(config, &blob, args.zoom)?;
    print_json(&report)
}

fn read_path(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| CliError::Io { path: path.display().to_string(), source: e })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
