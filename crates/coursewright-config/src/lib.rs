//! Settings for the coursewright tools, read from
//! `~/.config/coursewright/config.toml`:
//!
//! ```toml
//! content_path = "~/courses/rust-101"
//!
//! [editor]
//! default_code_language = "rust"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("cannot write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot encode config: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Language given to new code blocks when the config does not say.
pub const DEFAULT_CODE_LANGUAGE: &str = "javascript";

fn default_code_language() -> String {
    DEFAULT_CODE_LANGUAGE.to_string()
}

/// The `[editor]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_code_language")]
    pub default_code_language: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_code_language: default_code_language(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `categories.json`, `course.json` and `bodies/`.
    pub content_path: PathBuf,
    #[serde(default)]
    pub editor: EditorConfig,
}

impl Config {
    pub fn new(content_path: impl Into<PathBuf>) -> Self {
        Self {
            content_path: content_path.into(),
            editor: EditorConfig::default(),
        }
    }

    /// Where the tools look for their config.
    pub fn config_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde("~/.config/coursewright/config.toml").as_ref())
    }

    /// Reads the config at the default location. `Ok(None)` when there is
    /// none.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    /// Reads a config file. `~` and `$VARS` in `content_path` are expanded;
    /// a path that does not expand is kept as written.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let mut config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(expanded) = expand(&config.content_path) {
            config.content_path = expanded;
        }
        log::debug!("loaded config from {}", path.display());
        Ok(Some(config))
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(Self::config_path())
    }

    /// Writes the config as TOML, creating parent directories.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(write_err)?;
        }
        fs::write(path, text).map_err(write_err)
    }

    /// Where lesson and article bodies live.
    pub fn bodies_dir(&self) -> PathBuf {
        self.content_path.join("bodies")
    }
}

fn expand(path: &Path) -> Option<PathBuf> {
    shellexpand::full(&path.to_string_lossy())
        .ok()
        .map(|expanded| PathBuf::from(expanded.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, text: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn default_location_is_expanded() {
        let path = Config::config_path();
        assert!(path.is_absolute());
        assert!(path.ends_with(".config/coursewright/config.toml"));
    }

    #[rstest]
    #[case("content_path = \"/srv/content\"\n", DEFAULT_CODE_LANGUAGE)]
    #[case("content_path = \"/srv/content\"\n[editor]\n", DEFAULT_CODE_LANGUAGE)]
    #[case(
        "content_path = \"/srv/content\"\n[editor]\ndefault_code_language = \"rust\"\n",
        "rust"
    )]
    fn editor_language(#[case] text: &str, #[case] language: &str) {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_path(write_config(&dir, text))
            .unwrap()
            .unwrap();

        assert_eq!(config.content_path, PathBuf::from("/srv/content"));
        assert_eq!(config.editor.default_code_language, language);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::load_from_path(dir.path().join("absent.toml")).unwrap(), None);
    }

    #[test]
    fn missing_content_path_names_the_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load_from_path(write_config(&dir, "[editor]\n")).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn directory_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load_from_path(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn tilde_in_content_path_is_expanded() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_path(write_config(&dir, "content_path = \"~/courses\"\n"))
            .unwrap()
            .unwrap();

        assert!(config.content_path.is_absolute());
        assert!(config.content_path.ends_with("courses"));
    }

    #[test]
    fn env_var_in_content_path_is_expanded() {
        unsafe {
            std::env::set_var("COURSEWRIGHT_TEST_ROOT", "/custom/content");
        }

        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "content_path = \"$COURSEWRIGHT_TEST_ROOT/rust-101\"\n");
        let config = Config::load_from_path(path).unwrap().unwrap();

        assert_eq!(config.content_path, PathBuf::from("/custom/content/rust-101"));
        assert_eq!(
            config.bodies_dir(),
            PathBuf::from("/custom/content/rust-101/bodies")
        );

        unsafe {
            std::env::remove_var("COURSEWRIGHT_TEST_ROOT");
        }
    }

    #[test]
    fn unknown_variable_keeps_the_path() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "content_path = \"$COURSEWRIGHT_UNSET_VAR/x\"\n");
        let config = Config::load_from_path(path).unwrap().unwrap();

        assert_eq!(config.content_path, PathBuf::from("$COURSEWRIGHT_UNSET_VAR/x"));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/config.toml");
        let mut config = Config::new("/tmp/test-content");
        config.editor.default_code_language = "python".into();

        config.save_to_path(&path).unwrap();

        assert_eq!(Config::load_from_path(&path).unwrap(), Some(config));
    }
}
