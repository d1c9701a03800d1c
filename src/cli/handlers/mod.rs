use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::model::config::Config;
use crate::ops::store::TaskStore;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Where a command runs: the working directory and the flags that pick
/// the task file. The config is read per command so that `config` can
/// still repair a todo.toml that no longer parses.
pub struct Context {
    pub dir: PathBuf,
    pub file: Option<String>,
    pub json: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = match cli.dir {
            Some(ref dir) => std::fs::canonicalize(dir)
                .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
            None => std::env::current_dir()?,
        };
        Ok(Context {
            dir,
            file: cli.file.clone(),
            json: cli.json,
        })
    }

    pub fn config(&self) -> Result<Config, ConfigError> {
        config_io::read_config(&self.dir)
    }

    /// Task file from `--file`, else the config's `store.file`
    pub fn tasks_file(&self, config: &Config) -> PathBuf {
        let file = self.file.as_deref().unwrap_or(&config.store.file);
        resolve_path(&self.dir, file)
    }

    /// Open the task store. A file that cannot be read or parsed is
    /// reported and the command continues with an empty list.
    pub fn open_store(&self, config: &Config) -> TaskStore {
        let mut store = TaskStore::new(self.tasks_file(config));
        if let Err(e) = store.load() {
            eprintln!("warning: {}; starting with an empty task list", e);
        }
        store
    }
}

fn resolve_path(dir: &Path, file: &str) -> PathBuf {
    let path = Path::new(file);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let ctx = Context::from_cli(&cli)?;

    match cli.command {
        // Read commands
        Commands::List(args) => cmd_list(&ctx, args),
        Commands::Show(args) => cmd_show(&ctx, args),
        Commands::Stats => cmd_stats(&ctx),
        Commands::Sort => cmd_sort(&ctx),

        // Write commands
        Commands::Add(args) => cmd_add(&ctx, args),
        Commands::Done(args) => cmd_done(&ctx, args),
        Commands::Delete(args) => cmd_delete(&ctx, args),

        Commands::Config(args) => cmd_config(&ctx, args),
    }
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, args: ListArgs) -> CmdResult {
    let store = ctx.open_store(&ctx.config()?);
    let tasks = store.list(args.priority);

    if ctx.json {
        let out: Vec<TaskJson> = tasks.iter().map(task_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if tasks.is_empty() {
        println!("No tasks");
    } else {
        for line in format_task_list(&tasks) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_show(ctx: &Context, args: IdArgs) -> CmdResult {
    let store = ctx.open_store(&ctx.config()?);
    let task = store
        .find(args.id)
        .ok_or_else(|| format!("task not found: {}", args.id))?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
    } else {
        for line in format_task_detail(&task) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_stats(ctx: &Context) -> CmdResult {
    let store = ctx.open_store(&ctx.config()?);
    let stats = store.statistics();

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&stats_to_json(&stats))?);
    } else {
        for line in format_stats(&stats) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_sort(ctx: &Context) -> CmdResult {
    let store = ctx.open_store(&ctx.config()?);
    let tasks = store.sort_by_priority();

    if ctx.json {
        let out: Vec<TaskJson> = tasks.iter().map(task_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if tasks.is_empty() {
        println!("No tasks");
    } else {
        for line in format_sorted_list(&tasks) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write command handlers
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &Context, args: AddArgs) -> CmdResult {
    let config = ctx.config()?;
    let mut store = ctx.open_store(&config);
    let priority = args.priority.unwrap_or(config.defaults.priority);
    let task = store.add(&args.title, priority)?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
    } else {
        println!("{}", task.id);
    }
    Ok(())
}

fn cmd_done(ctx: &Context, args: IdArgs) -> CmdResult {
    let mut store = ctx.open_store(&ctx.config()?);
    let task = store.complete(args.id)?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
    } else {
        println!("{}", format_task_line(&task));
    }
    Ok(())
}

fn cmd_delete(ctx: &Context, args: IdArgs) -> CmdResult {
    let mut store = ctx.open_store(&ctx.config()?);
    let task = store.delete(args.id)?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
    } else {
        println!("deleted {} {}", task.id, task.title);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config(ctx: &Context, args: ConfigArgs) -> CmdResult {
    // Edits go through the raw document, so a config with a bad value
    // can be fixed; write_config validates the result.
    if args.default_priority.is_some() || args.file_name.is_some() {
        let mut doc = config_io::read_config_doc(&ctx.dir)?;
        if let Some(priority) = args.default_priority {
            config_io::set_default_priority(&mut doc, priority);
        }
        if let Some(ref name) = args.file_name {
            if name.trim().is_empty() {
                return Err("file name cannot be empty".into());
            }
            config_io::set_store_file(&mut doc, name.trim());
        }
        config_io::write_config(&ctx.dir, &doc)?;
    }
    let config = ctx.config()?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&config_to_json(&config))?);
    } else {
        for line in format_config(&config) {
            println!("{}", line);
        }
    }
    Ok(())
}
