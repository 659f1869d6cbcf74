use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreFormat {
    #[default]
    Json,
    Csv,
}

impl StoreFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreFormat::Json => "json",
            StoreFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for StoreFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreFormat {
    type Err = ParseFormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StoreFormat::Json),
            "csv" => Ok(StoreFormat::Csv),
            _ => Err(ParseFormatError {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFormatError {
    value: String,
}

impl fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid store format '{}': expected json or csv",
            self.value
        )
    }
}

impl Error for ParseFormatError {}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub file: String,
    pub format: StoreFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: "todos.json".to_string(),
            format: StoreFormat::Json,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error: {}", err),
            ConfigError::Parse(err) => write!(f, "config parse error: {}", err),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Parse(value)
    }
}

/// Resolves symbolic store names to absolute locations inside the data
/// directory. The store core only ever sees the resolved paths.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    pub fn ensure_root(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    /// Missing config means defaults; a malformed file is an error rather
    /// than silently falling back.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let path = self.resolve(CONFIG_FILE);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Config::default());
            }
            Err(err) => return Err(ConfigError::Io(err)),
        };
        Ok(toml::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::str::FromStr;

    use uuid::Uuid;

    use super::{Config, ConfigError, StoreFormat, Workspace, CONFIG_FILE};

    fn unique_workspace() -> PathBuf {
        let root = std::env::temp_dir().join(format!("agenda-workspace-test-{}", Uuid::now_v7()));
        std::fs::create_dir_all(&root).expect("workspace should be creatable");
        root
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let root = unique_workspace();
        let workspace = Workspace::open(&root);

        let config = workspace.load_config().expect("defaults should load");
        assert_eq!(config, Config::default());
        assert_eq!(config.file, "todos.json");
        assert_eq!(config.format, StoreFormat::Json);

        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let root = unique_workspace();
        let workspace = Workspace::open(&root);
        std::fs::write(
            workspace.resolve(CONFIG_FILE),
            "file = \"list.csv\"\nformat = \"csv\"\n",
        )
        .expect("config should write");

        let config = workspace.load_config().expect("config should load");
        assert_eq!(config.file, "list.csv");
        assert_eq!(config.format, StoreFormat::Csv);

        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let root = unique_workspace();
        let workspace = Workspace::open(&root);
        std::fs::write(workspace.resolve(CONFIG_FILE), "format = \"csv\"\n")
            .expect("config should write");

        let config = workspace.load_config().expect("config should load");
        assert_eq!(config.file, "todos.json");
        assert_eq!(config.format, StoreFormat::Csv);

        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let root = unique_workspace();
        let workspace = Workspace::open(&root);
        std::fs::write(workspace.resolve(CONFIG_FILE), "format = [broken\n")
            .expect("config should write");

        let err = workspace.load_config().expect_err("load should fail");
        assert!(matches!(err, ConfigError::Parse(_)));

        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn resolve_joins_names_under_the_root() {
        let workspace = Workspace::open("/data/agenda");
        assert_eq!(
            workspace.resolve("todos.json"),
            PathBuf::from("/data/agenda/todos.json")
        );
    }

    #[test]
    fn store_format_parses_and_displays() {
        assert_eq!(StoreFormat::from_str("JSON").unwrap(), StoreFormat::Json);
        assert_eq!(StoreFormat::from_str("csv").unwrap(), StoreFormat::Csv);
        assert!(StoreFormat::from_str("xml").is_err());
        assert_eq!(StoreFormat::Csv.to_string(), "csv");
    }
}
