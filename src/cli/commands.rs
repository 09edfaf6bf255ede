use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use crate::cli::output::{
    format_changed, format_removed, format_report, format_report_json, format_started,
    format_stopped, format_switched, use_color,
};
use crate::engine;
use crate::store::{resolve_path, RecordStore};

#[derive(Parser)]
#[command(name = "logwork")]
#[command(about = "Log Work - record when tasks start and stop, and report how long they took")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Record file (defaults to $LOGWORK_DB, then ./db.txt)
    #[arg(short = 'd', long = "database", value_name = "FILE", global = true)]
    pub database: Option<PathBuf>,
    /// Show debug logging on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a task (named Task-<n> when no name is given)
    Start {
        /// Task name (no whitespace, at most 31 bytes)
        name: Option<String>,
    },
    /// Stop running tasks
    Stop {
        /// Only stop running tasks with this name
        name: Option<String>,
    },
    /// Stop every running task and start a new one
    Switch {
        /// Name of the task to start
        name: Option<String>,
    },
    /// Rename every record of a task
    Change {
        /// Current task name
        old_name: String,
        /// New task name
        new_name: String,
    },
    /// Remove a record by name (first match) or by index
    Remove {
        /// Task name
        name: Option<String>,
        /// 0-based record index
        #[arg(short = 'i', long)]
        index: Option<usize>,
    },
    /// Print recorded tasks and durations
    Print {
        /// Only include records with this name, and print their total
        name: Option<String>,
        /// Hide finished records; running tasks and the total are still shown
        #[arg(short = 't', long)]
        totals: bool,
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse the command line and run the selected operation
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = RecordStore::new(resolve_path(cli.database));
    debug!("Using record store {}", store.path().display());

    match cli.command {
        Commands::Start { name } => handle_start(&store, name.as_deref()),
        Commands::Stop { name } => handle_stop(&store, name.as_deref()),
        Commands::Switch { name } => handle_switch(&store, name.as_deref()),
        Commands::Change { old_name, new_name } => handle_change(&store, &old_name, &new_name),
        Commands::Remove { name, index } => handle_remove(&store, name.as_deref(), index),
        Commands::Print { name, totals, json } => handle_print(&store, name.as_deref(), totals, json),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Handle `logwork start [name]`
fn handle_start(store: &RecordStore, name: Option<&str>) -> Result<()> {
    let started = engine::start(store, name)?;
    println!("{}", format_started(&started, use_color())?);
    Ok(())
}

/// Handle `logwork stop [name]`
fn handle_stop(store: &RecordStore, name: Option<&str>) -> Result<()> {
    let stopped = engine::stop(store, name)?;
    let color = use_color();
    for task in &stopped {
        println!("{}", format_stopped(task, color)?);
    }
    Ok(())
}

/// Handle `logwork switch [name]`
fn handle_switch(store: &RecordStore, name: Option<&str>) -> Result<()> {
    let outcome = engine::switch(store, name)?;
    let color = use_color();
    for task in &outcome.stopped {
        println!("{}", format_stopped(task, color)?);
    }
    println!("{}", format_started(&outcome.started, color)?);
    println!("{}", format_switched(&outcome.started, color));
    Ok(())
}

/// Handle `logwork change <old> <new>`
fn handle_change(store: &RecordStore, old_name: &str, new_name: &str) -> Result<()> {
    let outcome = engine::change(store, old_name, new_name)?;
    println!("{}", format_changed(&outcome));
    Ok(())
}

/// Handle `logwork remove [name] [--index N]`
fn handle_remove(store: &RecordStore, name: Option<&str>, index: Option<usize>) -> Result<()> {
    let removed = engine::remove(store, name, index)?;
    println!("{}", format_removed(&removed, use_color()));
    Ok(())
}

/// Handle `logwork print [name] [--totals] [--json]`
fn handle_print(store: &RecordStore, name: Option<&str>, totals_only: bool, json: bool) -> Result<()> {
    let report = engine::print(store, name, totals_only)?;

    if json {
        let out = format_report_json(&report).context("Failed to serialize report")?;
        println!("{}", out);
        return Ok(());
    }

    for line in format_report(&report, use_color())? {
        println!("{}", line);
    }
    Ok(())
}
