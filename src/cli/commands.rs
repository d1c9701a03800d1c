use clap::{Args, Parser, Subcommand};

use crate::model::task::Priority;

#[derive(Parser)]
#[command(name = "todo", about = concat!("[x] todo v", env!("CARGO_PKG_VERSION"), " - a to-do list in a JSON file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task file to use (default: `store.file` from todo.toml, or tasks.json)
    #[arg(long, global = true)]
    pub file: Option<String>,

    /// Run against a different directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add(AddArgs),
    /// List tasks, highest priority first
    List(ListArgs),
    /// Show one task
    Show(IdArgs),
    /// Mark a task completed
    Done(IdArgs),
    /// Delete a task
    Delete(IdArgs),
    /// Show completion statistics
    Stats,
    /// Show every task sorted by priority
    Sort,
    /// Show or change todo.toml settings
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Priority: high, medium, or low (default from todo.toml, else medium)
    #[arg(short, long)]
    pub priority: Option<Priority>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only show tasks with this priority
    #[arg(short, long)]
    pub priority: Option<Priority>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task ID
    pub id: u64,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Set the priority `add` uses when none is given
    #[arg(long, value_name = "PRIORITY")]
    pub default_priority: Option<Priority>,
    /// Set the task file name
    #[arg(long, value_name = "NAME")]
    pub file_name: Option<String>,
}
