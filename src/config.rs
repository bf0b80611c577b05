//! Settings read from the YAML config file.
//!
//! ```yaml
//! unicode: true
//! show_targets: false
//! log:
//!   enabled: true
//!   file: hotseat.log
//!   level: debug
//! ```
//!
//! Every field is optional. Missing fields take their default values.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use serde::Deserialize;
use simplelog::LevelFilter;

/// Name of the directory under the user's home directory that holds the config file
pub const APP_DIR: &str = ".hotseat";

/// Name of the config file within `APP_DIR`
pub const CONFIG_FILE: &str = "config.yaml";

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Settings for the terminal front end
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Draw the board with chess glyphs instead of letters
    pub unicode: bool,
    /// List the squares a piece may move to when a move is rejected
    pub show_targets: bool,
    /// Log settings
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            unicode: false,
            show_targets: true,
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Parses a config from YAML text.
    pub fn from_yaml(s: &str) -> Result<Config, ConfigError> {
        let config: Config = serde_yaml::from_str(s)
            .map_err(|err| ConfigError::Yaml(None, err))?;
        config.log.level_filter()?;

        Ok(config)
    }

    /// Reads the config file at `path`, which must exist.
    pub fn read(path: &Path) -> Result<Config, ConfigError> {
        let s = read_to_string(path).map_err(|err| ConfigError::Io(path.to_owned(), err))?;

        Config::from_yaml(&s).map_err(|err| match err {
            ConfigError::Yaml(None, err) => ConfigError::Yaml(Some(path.to_owned()), err),
            err => err,
        })
    }

    /// Reads the config file at `path` if given, and otherwise the one in the user's home
    /// directory. A missing default file gives the default config.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Config::read(path),
            None => match default_path() {
                Some(path) if path.is_file() => Config::read(&path),
                _ => Ok(Config::default()),
            },
        }
    }
}

/// Returns the default location of the config file, `$HOME/.hotseat/config.yaml`
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DIR).join(CONFIG_FILE))
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Log settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Turns on logging
    pub enabled: bool,
    /// The file to log to
    pub file: PathBuf,
    /// One of `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            enabled: false,
            file: PathBuf::from("hotseat.log"),
            level: "info".to_owned(),
        }
    }
}

impl LogConfig {
    /// Returns the configured log level.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        parse_level(&self.level)
    }
}

/// Parses a log level name.
pub fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    match level {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        _ => Err(ConfigError::LogLevel(level.to_owned())),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error reading a config file
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io(PathBuf, std::io::Error),
    /// The file is not a valid config
    Yaml(Option<PathBuf>, serde_yaml::Error),
    /// Unknown log level
    LogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, err) => format!("{}: {}", path.display(), err).fmt(f),
            ConfigError::Yaml(Some(path), err) => format!("{}: {}", path.display(), err).fmt(f),
            ConfigError::Yaml(None, err) => err.fmt(f),
            ConfigError::LogLevel(level) => format!("{}: invalid log level", level).fmt(f),
        }
    }
}

impl std::error::Error for ConfigError { }
