use serde::Serialize;

use crate::model::config::Config;
use crate::model::task::{Priority, TIMESTAMP_FORMAT, Task};
use crate::ops::store::Statistics;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u64,
    pub title: String,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub completion_rate: f64,
}

#[derive(Serialize)]
pub struct ConfigJson {
    pub file: String,
    pub default_priority: Priority,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        title: task.title.clone(),
        priority: task.priority,
        completed: task.completed,
        created_at: task.created_at.format(TIMESTAMP_FORMAT).to_string(),
    }
}

pub fn stats_to_json(stats: &Statistics) -> StatsJson {
    StatsJson {
        total: stats.total,
        completed: stats.completed,
        pending: stats.pending,
        completion_rate: stats.completion_rate,
    }
}

pub fn config_to_json(config: &Config) -> ConfigJson {
    ConfigJson {
        file: config.store.file.clone(),
        default_priority: config.defaults.priority,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn status_char(task: &Task) -> char {
    if task.completed { 'x' } else { ' ' }
}

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    format!(
        "[{}] {} {} ({}) {}",
        status_char(task),
        task.id,
        task.title,
        task.priority,
        task.created_at.format(TIMESTAMP_FORMAT)
    )
}

/// Format a task list with ids right-aligned to the widest id
pub fn format_task_list(tasks: &[Task]) -> Vec<String> {
    let id_w = tasks
        .iter()
        .map(|t| t.id.to_string().len())
        .max()
        .unwrap_or(1);
    tasks
        .iter()
        .map(|t| {
            format!(
                "[{}] {:>w$} {} ({}) {}",
                status_char(t),
                t.id,
                t.title,
                t.priority,
                t.created_at.format(TIMESTAMP_FORMAT),
                w = id_w
            )
        })
        .collect()
}

/// Compact listing used by `sort`: status, priority, title
pub fn format_sorted_list(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .map(|t| format!("[{}] {:<6} {}", status_char(t), t.priority, t.title))
        .collect()
}

/// Format detailed task view
pub fn format_task_detail(task: &Task) -> Vec<String> {
    vec![
        format!("[{}] {} {}", status_char(task), task.id, task.title),
        format!("  priority: {}", task.priority),
        format!("  completed: {}", if task.completed { "yes" } else { "no" }),
        format!("  created: {}", task.created_at.format(TIMESTAMP_FORMAT)),
    ]
}

pub fn format_stats(stats: &Statistics) -> Vec<String> {
    vec![
        format!("Total:      {}", stats.total),
        format!("Completed:  {}", stats.completed),
        format!("Pending:    {}", stats.pending),
        format!("Completion: {:.1}%", stats.completion_rate),
    ]
}

pub fn format_config(config: &Config) -> Vec<String> {
    vec![
        format!("store.file = {}", config.store.file),
        format!("defaults.priority = {}", config.defaults.priority),
    ]
}
