use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use menu_tree::{Menu, MenuError, MenuItem};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("menu file not found at: {0}")]
    NotFound(PathBuf),

    #[error("failed to read menu file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse menu file {path}: {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse menu file {path}: {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid menu in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: MenuError,
    },

    #[error("failed to serialize menu: {0}")]
    SerializeToml(#[from] toml::ser::Error),

    #[error("failed to serialize menu: {0}")]
    SerializeJson(#[from] serde_json::Error),

    #[error("failed to write menu file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFormat {
    Toml,
    Json,
}

impl MenuFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => MenuFormat::Json,
            _ => MenuFormat::Toml,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MenuFile {
    #[serde(default)]
    menu: Vec<MenuItem>,
}

/// A menu loaded from disk, remembering where and how to save it.
#[derive(Debug, Clone)]
pub struct MenuConfig {
    pub path: PathBuf,
    pub format: MenuFormat,
    pub menu: Menu,
}

impl MenuConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let path = if path.is_dir() {
            path.join("menu.toml")
        } else {
            path.to_owned()
        };
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let format = MenuFormat::from_path(&path);
        let menu = Self::parse(&text, format, &path)?;
        debug!(path = %path.display(), nodes = menu.len(), "Loaded menu");
        Ok(MenuConfig { path, format, menu })
    }

    pub fn parse(text: &str, format: MenuFormat, path: &Path) -> Result<Menu, ConfigError> {
        let file: MenuFile = match format {
            MenuFormat::Toml => toml::from_str(text).map_err(|source| ConfigError::ParseToml {
                path: path.to_owned(),
                source,
            })?,
            MenuFormat::Json => {
                serde_json::from_str(text).map_err(|source| ConfigError::ParseJson {
                    path: path.to_owned(),
                    source,
                })?
            }
        };
        Menu::from_items(file.menu).map_err(|source| ConfigError::Invalid {
            path: path.to_owned(),
            source,
        })
    }

    pub fn render(&self) -> Result<String, ConfigError> {
        let file = MenuFile {
            menu: self.menu.to_items(),
        };
        let text = match self.format {
            MenuFormat::Toml => toml::to_string_pretty(&file)?,
            MenuFormat::Json => serde_json::to_string_pretty(&file)?,
        };
        Ok(text)
    }

    /// Writes the menu next to its file and renames it into place, so a
    /// failed save leaves the previous file untouched.
    pub fn save(&self) -> Result<(), ConfigError> {
        let text = self.render()?;
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir).map_err(|source| self.write_error(source))?;
        file.write_all(text.as_bytes())
            .map_err(|source| self.write_error(source))?;
        file.persist(&self.path)
            .map_err(|err| self.write_error(err.error))?;
        debug!(path = %self.path.display(), bytes = text.len(), "Wrote menu file");
        Ok(())
    }

    fn write_error(&self, source: io::Error) -> ConfigError {
        ConfigError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
