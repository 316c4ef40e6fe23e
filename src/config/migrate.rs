//! Configuration file upgrades: detect and fill fields added by newer versions.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Fields every current configuration file is expected to carry.
pub const CONFIG_FIELDS: &[&str] = &[
    "database",
    "default_user",
    "default_priority",
    "separator_char",
    "show_weekday",
    "include_done",
];

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
    }
}

/// List the known fields absent from the configuration file at `path`.
pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;
    Ok(CONFIG_FIELDS
        .iter()
        .copied()
        .filter(|f| !map.contains_key(Value::String((*f).to_string())))
        .collect())
}

/// Add every missing field with its default value and rewrite the file.
/// Unknown keys are preserved. Returns the fields that were added.
pub fn migrate_config(path: &Path) -> AppResult<Vec<&'static str>> {
    let mut map = read_mapping(path)?;
    let defaults = match serde_yaml::to_value(Config::default())? {
        Value::Mapping(m) => m,
        _ => Mapping::new(),
    };

    let mut added = Vec::new();
    for field in CONFIG_FIELDS {
        let key = Value::String((*field).to_string());
        if map.contains_key(&key) {
            continue;
        }
        if let Some(v) = defaults.get(&key) {
            map.insert(key, v.clone());
            added.push(*field);
        }
    }

    if !added.is_empty() {
        let serialized = serde_yaml::to_string(&Value::Mapping(map))?;
        fs::write(path, serialized)?;
    }

    Ok(added)
}
