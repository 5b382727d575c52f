//! Where gifpick keeps its files, and how its configuration is read.

pub mod config;

use std::{
  path::{
    Path,
    PathBuf,
  },
  sync::OnceLock,
};

use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};

pub use config::{
  Config,
  ConfigError,
  LogConfig,
  PickerSection,
  SearchSection,
  ShortcutSection,
};

const APP_DIR: &str = "gifpick";
const WORKSPACE_DIR: &str = ".gifpick";

static CONFIG_FILE: OnceLock<PathBuf> = OnceLock::new();

static LOG_FILE: OnceLock<PathBuf> = OnceLock::new();

pub fn initialize_config_file(specified_file: Option<PathBuf>) {
  let config_file = specified_file.unwrap_or_else(default_config_file);
  ensure_parent_dir(&config_file);
  CONFIG_FILE.set(config_file).ok();
}

pub fn initialize_log_file(specified_file: Option<PathBuf>) {
  let log_file = specified_file.unwrap_or_else(default_log_file);
  ensure_parent_dir(&log_file);
  LOG_FILE.set(log_file).ok();
}

pub fn config_dir() -> PathBuf {
  if let Ok(dir) = std::env::var("GIFPICK_CONFIG_DIR") {
    return PathBuf::from(dir);
  }
  match choose_base_strategy() {
    Ok(strategy) => strategy.config_dir().join(APP_DIR),
    Err(err) => {
      log::warn!("unable to find the config directory: {err}");
      PathBuf::from(WORKSPACE_DIR)
    },
  }
}

pub fn cache_dir() -> PathBuf {
  if let Ok(dir) = std::env::var("GIFPICK_CACHE_DIR") {
    return PathBuf::from(dir);
  }
  match choose_base_strategy() {
    Ok(strategy) => strategy.cache_dir().join(APP_DIR),
    Err(err) => {
      log::warn!("unable to find the cache directory: {err}");
      PathBuf::from(WORKSPACE_DIR)
    },
  }
}

pub fn config_file() -> PathBuf {
  CONFIG_FILE.get_or_init(default_config_file).clone()
}

pub fn log_file() -> PathBuf {
  LOG_FILE
    .get_or_init(|| {
      let path = default_log_file();
      ensure_parent_dir(&path);
      path
    })
    .clone()
}

pub fn workspace_config_file() -> PathBuf {
  find_workspace().0.join(WORKSPACE_DIR).join("config.toml")
}

pub fn default_log_file() -> PathBuf {
  cache_dir().join("gifpick.log")
}

/// Merge two TOML documents, merging values from `right` onto `left`.
///
/// Tables present on both sides are merged key by key up to `merge_depth`
/// levels deep; below that, and for every other kind of value, `right` wins.
/// Arrays of tables are matched up by their `name` key.
pub fn merge_toml_values(left: toml::Value, right: toml::Value, merge_depth: usize) -> toml::Value {
  use toml::Value;

  fn get_name(v: &Value) -> Option<&str> {
    v.get("name").and_then(Value::as_str)
  }

  match (left, right) {
    (Value::Array(mut left_items), Value::Array(right_items)) => {
      if merge_depth == 0 {
        return Value::Array(right_items);
      }
      left_items.reserve(right_items.len());
      for rvalue in right_items {
        let lvalue = get_name(&rvalue)
          .and_then(|rname| left_items.iter().position(|v| get_name(v) == Some(rname)))
          .map(|lpos| left_items.remove(lpos));
        let mvalue = match lvalue {
          Some(lvalue) => merge_toml_values(lvalue, rvalue, merge_depth - 1),
          None => rvalue,
        };
        left_items.push(mvalue);
      }
      Value::Array(left_items)
    },
    (Value::Table(mut left_map), Value::Table(right_map)) => {
      if merge_depth == 0 {
        return Value::Table(right_map);
      }
      for (rname, rvalue) in right_map {
        let merged = match left_map.remove(&rname) {
          Some(lvalue) => merge_toml_values(lvalue, rvalue, merge_depth - 1),
          None => rvalue,
        };
        left_map.insert(rname, merged);
      }
      Value::Table(left_map)
    },
    (_, value) => value,
  }
}

/// Finds the workspace the user is in: the first ancestor of the current
/// directory holding `.git`, `.svn`, `.jj` or `.gifpick`. Returns
/// `(dir, true)` with the current directory itself when there is none.
pub fn find_workspace() -> (PathBuf, bool) {
  match std::env::current_dir() {
    Ok(current_dir) => find_workspace_in(current_dir),
    Err(_) => (PathBuf::new(), true),
  }
}

pub fn find_workspace_in(dir: impl AsRef<Path>) -> (PathBuf, bool) {
  let dir = dir.as_ref();
  for ancestor in dir.ancestors() {
    if ancestor.join(".git").exists()
      || ancestor.join(".svn").exists()
      || ancestor.join(".jj").exists()
      || ancestor.join(WORKSPACE_DIR).exists()
    {
      return (ancestor.to_owned(), false);
    }
  }

  (dir.to_owned(), true)
}

fn default_config_file() -> PathBuf {
  config_dir().join("config.toml")
}

fn ensure_parent_dir(path: &Path) {
  if let Some(parent) = path.parent()
    && !parent.exists()
  {
    std::fs::create_dir_all(parent).ok();
  }
}
