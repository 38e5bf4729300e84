// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Layered configuration for the terminal core: compiled-in defaults,
//! overridden by an optional system file, then a per-user file, then the
//! `VTCORE_CONFIG` environment variable, then an explicit caller path.
//!
//! This mirrors the reference terminal-emulator crate's GUI config
//! loader, scoped down to the values the core itself consumes (the GUI's
//! font/window settings have no counterpart here).

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use directories::BaseDirs;

use crate::colors::{DEFAULT_BASE16, Rgb};
use crate::cursor::CursorVisualStyle;

/// Top-level configuration consumed by the `Grid`/`Emulator` at
/// construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub rows: usize,
    pub cols: usize,
    pub scrollback_depth: usize,
    pub tab_width: usize,
    pub base_palette: [Rgb; 16],
    pub default_fg: Rgb,
    pub default_bg: Rgb,
    pub default_cursor_color: Rgb,
    pub word_delimiters: String,
    pub default_cursor_style: CursorVisualStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            rows: 24,
            cols: 80,
            scrollback_depth: 10_000,
            tab_width: 8,
            base_palette: DEFAULT_BASE16.map(Rgb::from),
            default_fg: Rgb(229, 229, 229),
            default_bg: Rgb(0, 0, 0),
            default_cursor_color: Rgb(229, 229, 229),
            word_delimiters: " ,'\"()[]{}".to_string(),
            default_cursor_style: CursorVisualStyle::BlinkingBlockDefault,
        }
    }
}

/// Partial config used for layered merging: every field optional so a
/// fragment file only needs to mention what it overrides.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigPartial {
    pub version: Option<u32>,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub scrollback_depth: Option<usize>,
    pub tab_width: Option<usize>,
    pub base_palette: Option<[Rgb; 16]>,
    pub default_fg: Option<Rgb>,
    pub default_bg: Option<Rgb>,
    pub default_cursor_color: Option<Rgb>,
    pub word_delimiters: Option<String>,
    pub default_cursor_style: Option<CursorVisualStyle>,
}

impl Config {
    fn apply_partial(&mut self, partial: ConfigPartial) {
        if let Some(v) = partial.version {
            self.version = v;
        }
        if let Some(v) = partial.rows {
            self.rows = v;
        }
        if let Some(v) = partial.cols {
            self.cols = v;
        }
        if let Some(v) = partial.scrollback_depth {
            self.scrollback_depth = v;
        }
        if let Some(v) = partial.tab_width {
            self.tab_width = v;
        }
        if let Some(v) = partial.base_palette {
            self.base_palette = v;
        }
        if let Some(v) = partial.default_fg {
            self.default_fg = v;
        }
        if let Some(v) = partial.default_bg {
            self.default_bg = v;
        }
        if let Some(v) = partial.default_cursor_color {
            self.default_cursor_color = v;
        }
        if let Some(v) = partial.word_delimiters {
            self.word_delimiters = v;
        }
        if let Some(v) = partial.default_cursor_style {
            self.default_cursor_style = v;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::Validation(format!(
                "rows/cols must both be >= 1 (got {}x{})",
                self.rows, self.cols
            )));
        }

        if self.tab_width == 0 {
            return Err(ConfigError::Validation("tab_width must be >= 1".to_string()));
        }

        if self.scrollback_depth > 1_000_000 {
            return Err(ConfigError::Validation(format!(
                "scrollback_depth={} exceeds the allowed maximum (1,000,000)",
                self.scrollback_depth
            )));
        }

        if self.version == 0 {
            return Err(ConfigError::Validation("version must be >= 1".to_string()));
        }

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// Loads the configuration by applying layers in the following order
/// (later layers override earlier ones): compiled-in defaults, system
/// file, user file, `VTCORE_CONFIG` env var, explicit path.
///
/// # Errors
/// Returns `ConfigError` if any config file cannot be read or parsed, or
/// if the final merged config fails validation.
#[tracing::instrument(level = "debug", skip_all)]
pub fn load_config(explicit_path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();

    if let Some(system_path) = system_config_path()
        && system_path.is_file()
    {
        let partial = load_partial(&system_path)?;
        cfg.apply_partial(partial);
    }

    if let Some(user_path) = user_config_path()
        && user_path.is_file()
    {
        let partial = load_partial(&user_path)?;
        cfg.apply_partial(partial);
    }

    if let Ok(env_path) = env::var("VTCORE_CONFIG") {
        let path = PathBuf::from(env_path);
        if path.is_file() {
            let partial = load_partial(&path)?;
            cfg.apply_partial(partial);
        }
    }

    if let Some(path) = explicit_path
        && path.is_file()
    {
        let partial = load_partial(path)?;
        cfg.apply_partial(partial);
    }

    cfg.validate()?;
    Ok(cfg)
}

fn load_partial(path: &Path) -> Result<ConfigPartial, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[allow(clippy::unnecessary_wraps)]
fn system_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        Some(PathBuf::from("/etc/vt-core/config.toml"))
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

fn user_config_path() -> Option<PathBuf> {
    let base = BaseDirs::new()?;
    let dir = base.config_dir().join("vt-core");
    Some(dir.join("config.toml"))
}
