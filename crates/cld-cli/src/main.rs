// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `cld`: developer CLI for the causal-loop-diagram history store.
//!
//! Replays JSON edit scripts against a fresh store, runs the water/population
//! walkthrough, and reads or initializes saved editor preferences.

mod report;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use cld_app_core::config::ConfigService;
use cld_app_core::prefs::{EditorPrefs, ReportFormat, PREFS_KEY};
use cld_config_fs::FsConfigStore;
use cld_graph::Document;
use cld_history::{Command, History, HistoryConfig};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::report::{render, step_label, Summary};

const DEMO_SCRIPT: &str = include_str!("../scripts/demo.json");

#[derive(Parser)]
#[command(name = "cld", version, about = "Causal-loop-diagram history tools")]
struct Cli {
    /// Read and write preferences here instead of the platform config directory.
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a JSON array of edits/"undo"/"redo" steps and print the result.
    Replay(ReplayArgs),
    /// Run the water/population walkthrough, one table row per step.
    Demo,
    /// Inspect or initialize saved editor preferences.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args)]
struct ReplayArgs {
    /// Script file (JSON array of steps).
    script: PathBuf,

    /// Reject duplicate ids and dangling links (overrides prefs when set).
    #[arg(long)]
    strict: bool,

    /// Keep at most this many undo steps.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Start from this JSON document instead of the empty diagram.
    #[arg(long)]
    start: Option<PathBuf>,

    /// Output format (defaults to the saved preference).
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective preferences as JSON.
    Show,
    /// Write default preferences unless a file already exists.
    Init,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Table,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Table => Self::Table,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = open_config(cli.config_dir.as_deref());
    let prefs: EditorPrefs = config
        .as_ref()
        .map(|c| c.load_or_default(PREFS_KEY))
        .unwrap_or_default();

    match cli.command {
        Commands::Replay(args) => run_replay(&args, &prefs),
        Commands::Demo => run_demo(),
        Commands::Config(ConfigCommand::Show) => print_json(&prefs),
        Commands::Config(ConfigCommand::Init) => run_config_init(config.as_ref()),
    }
}

// Config is best-effort: tools keep working with defaults when the dir is unusable.
fn open_config(dir: Option<&Path>) -> Option<ConfigService<FsConfigStore>> {
    let store = match dir {
        Some(dir) => FsConfigStore::at(dir),
        None => FsConfigStore::new(),
    };
    match store {
        Ok(store) => Some(ConfigService::new(store)),
        Err(err) => {
            warn!(%err, "config store unavailable; using default prefs");
            None
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {what} {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {what} {}", path.display()))
}

fn run_replay(args: &ReplayArgs, prefs: &EditorPrefs) -> Result<()> {
    let commands: Vec<Command> = read_json(&args.script, "script")?;
    let start = match &args.start {
        Some(path) => read_json::<Document>(path, "document")?,
        None => Document::default(),
    };
    let config = HistoryConfig::permissive()
        .with_strict(args.strict || prefs.strict_validation)
        .with_max_depth(args.max_depth.or(prefs.history_limit));

    let mut history =
        History::from_document(start, config).context("validating start document")?;
    let mut rejected = 0usize;
    for (step, command) in commands.into_iter().enumerate() {
        let label = step_label(&command);
        match history.execute(command) {
            Ok(outcome) => debug!(step, label, ?outcome, "replayed"),
            Err(err) => {
                rejected += 1;
                warn!(step, label, %err, "step rejected");
            }
        }
    }

    match args.format.map_or(prefs.default_format, ReportFormat::from) {
        ReportFormat::Json => print_json(history.present()),
        ReportFormat::Table => {
            let table = render(&[Summary::of("final", &history)?]);
            let mut out = io::stdout().lock();
            writeln!(out, "{table}")?;
            writeln!(out, "rejected steps: {rejected}")?;
            Ok(())
        }
    }
}

fn run_demo() -> Result<()> {
    let commands: Vec<Command> =
        serde_json::from_str(DEMO_SCRIPT).context("parsing built-in demo script")?;
    let mut history = History::default();
    let mut rows = vec![Summary::of("initial", &history)?];
    for command in commands {
        let label = step_label(&command);
        history.execute(command)?;
        rows.push(Summary::of(label, &history)?);
    }
    writeln!(io::stdout().lock(), "{}", render(&rows))?;
    Ok(())
}

fn run_config_init(config: Option<&ConfigService<FsConfigStore>>) -> Result<()> {
    let Some(config) = config else {
        bail!("no usable config directory");
    };
    let wrote = config.save_if_absent(PREFS_KEY, &EditorPrefs::default())?;
    let path = config.store().base_dir().join(format!("{PREFS_KEY}.json"));
    let mut out = io::stdout().lock();
    if wrote {
        writeln!(out, "wrote default prefs to {}", path.display())?;
    } else {
        writeln!(out, "prefs already present at {}", path.display())?;
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
