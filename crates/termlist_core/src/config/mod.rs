use crate::error::AppError;
use crate::interpreter::Style;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "TERMLIST_CONFIG_PATH";

/// ANSI prefixes for each output style; empty prefixes leave text bare.
#[derive(Debug, Clone)]
pub struct Palette {
    pub dim: &'static str,
    pub err: &'static str,
    pub ok: &'static str,
    pub done: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn paint(&self, text: &str, style: Style) -> String {
        let prefix = match style {
            Style::Plain => "",
            Style::Dim => self.dim,
            Style::Err => self.err,
            Style::Ok => self.ok,
            Style::Done => self.done,
        };
        if prefix.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", prefix, text, self.reset)
        }
    }
}

pub fn palette_for_theme(theme: Option<&str>) -> Palette {
    let name = theme.and_then(canonical_theme_name);
    match name.as_deref() {
        Some("mono") => Palette {
            dim: "",
            err: "",
            ok: "",
            done: "",
            reset: "",
        },
        _ => Palette {
            dim: "\x1b[2m",
            err: "\x1b[31m",
            ok: "\x1b[32m",
            done: "\x1b[38;5;245m",
            reset: "\x1b[0m",
        },
    }
}

/// Normalizes a theme name; unknown names pass through and resolve to the
/// default palette.
pub fn canonical_theme_name(raw: &str) -> Option<String> {
    let cleaned = raw.trim().to_ascii_lowercase();
    if cleaned.is_empty() {
        return Some("default".to_string());
    }

    match cleaned.as_str() {
        "plain" | "none" | "no-color" | "nocolor" => Some("mono".to_string()),
        "color" | "colors" | "ansi" => Some("default".to_string()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::storage("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("termlist")
            .join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::storage("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("termlist")
            .join(CONFIG_FILE_NAME))
    }
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::storage(format!("{}: {}", path.display(), err)))?;
    let mut config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::storage(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    config.theme = config.theme.as_deref().and_then(canonical_theme_name);
    Ok(config)
}
