use std::{
  fs,
  io::ErrorKind,
  path::Path,
};

use serde::Deserialize;
use toml::Value;

use crate::merge_toml_values;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("failed to read config: {0}")]
  Io(#[from] std::io::Error),
  #[error("bad config: {0}")]
  BadConfig(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  pub search:   SearchSection,
  pub picker:   PickerSection,
  pub shortcut: ShortcutSection,
  pub log:      LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SearchSection {
  pub base_url:      String,
  /// Empty unless set here, by `GIFPICK_API_KEY`, or on the command line.
  pub api_key:       String,
  pub default_query: String,
  pub discard_stale: bool,
  pub timeout_ms:    Option<u64>,
}

impl Default for SearchSection {
  fn default() -> Self {
    Self {
      base_url:      "https://api.giphy.com".to_string(),
      api_key:       String::new(),
      default_query: "a".to_string(),
      discard_stale: true,
      timeout_ms:    None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PickerSection {
  pub debounce_ms:   u64,
  pub columns:       usize,
  pub close_on_pick: bool,
}

impl Default for PickerSection {
  fn default() -> Self {
    Self {
      debounce_ms:   200,
      columns:       2,
      close_on_pick: true,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ShortcutSection {
  pub key:     char,
  /// Off leaves the popover to the trigger alone.
  pub enabled: bool,
}

impl Default for ShortcutSection {
  fn default() -> Self {
    Self {
      key:     'i',
      enabled: true,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LogConfig {
  /// A `log` level name (`error` .. `trace`). Unset means warnings only.
  pub level: Option<String>,
}

impl Config {
  /// Build a config from the global and workspace documents, workspace
  /// values winning key by key. A document that could not be read counts as
  /// absent; one that does not parse is an error.
  pub fn load(
    global: Result<String, ConfigError>,
    local: Result<String, ConfigError>,
  ) -> Result<Config, ConfigError> {
    let documents = [global, local]
      .into_iter()
      .filter_map(|document| {
        match document {
          Ok(text) => Some(toml::from_str::<Value>(&text).map_err(ConfigError::BadConfig)),
          Err(ConfigError::BadConfig(err)) => Some(Err(ConfigError::BadConfig(err))),
          Err(ConfigError::Io(err)) => {
            if err.kind() != ErrorKind::NotFound {
              log::warn!("ignoring unreadable config: {err}");
            }
            None
          },
        }
      })
      .collect::<Result<Vec<_>, _>>()?;

    let merged = documents
      .into_iter()
      .reduce(|global, local| merge_toml_values(global, local, 3));

    match merged {
      Some(value) => value.try_into().map_err(ConfigError::BadConfig),
      None => Ok(Config::default()),
    }
  }

  pub fn load_paths(global: &Path, local: &Path) -> Result<Config, ConfigError> {
    Self::load(read(global), read(local))
  }

  /// Load `config.toml` from the config dir merged with the workspace's
  /// `.gifpick/config.toml`.
  pub fn load_user() -> Result<Config, ConfigError> {
    Self::load_paths(&crate::config_file(), &crate::workspace_config_file())
  }
}

fn read(path: &Path) -> Result<String, ConfigError> {
  fs::read_to_string(path).map_err(ConfigError::Io)
}
