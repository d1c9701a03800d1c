use serde::{Deserialize, Serialize};

use crate::model::task::Priority;

/// Configuration from todo.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Task file, relative to the working directory unless absolute
    #[serde(default = "default_file")]
    pub file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            file: default_file(),
        }
    }
}

fn default_file() -> String {
    "tasks.json".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Priority used by `add` when none is given
    #[serde(default)]
    pub priority: Priority,
}
