use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::Config;
use crate::model::task::Priority;

pub const CONFIG_FILE: &str = "todo.toml";

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not edit {path}: {source}")]
    EditError {
        path: PathBuf,
        source: toml_edit::TomlError,
    },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
}

/// Read todo.toml from `dir`. A missing file yields the default config.
pub fn read_config(dir: &Path) -> Result<Config, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    toml::from_str(&text).map_err(|e| ConfigError::ParseError { path, source: e })
}

/// Read todo.toml as an editable document. A missing file yields an
/// empty document.
pub fn read_config_doc(dir: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    text.parse::<toml_edit::DocumentMut>()
        .map_err(|e| ConfigError::EditError { path, source: e })
}

/// Write the config document back to disk, preserving formatting.
/// The result is re-validated before anything is written.
pub fn write_config(dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let path = dir.join(CONFIG_FILE);
    let text = doc.to_string();
    toml::from_str::<Config>(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;
    fs::write(&path, text).map_err(|e| ConfigError::WriteError { path, source: e })
}

/// Set `[defaults] priority`
pub fn set_default_priority(doc: &mut toml_edit::DocumentMut, priority: Priority) {
    ensure_table(doc, "defaults");
    doc["defaults"]["priority"] = toml_edit::value(priority.as_str());
}

/// Set `[store] file`
pub fn set_store_file(doc: &mut toml_edit::DocumentMut, file: &str) {
    ensure_table(doc, "store");
    doc["store"]["file"] = toml_edit::value(file);
}

fn ensure_table(doc: &mut toml_edit::DocumentMut, key: &str) {
    if !doc.contains_key(key) {
        doc[key] = toml_edit::Item::Table(toml_edit::Table::new());
    }
}
