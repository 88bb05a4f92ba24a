use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use addrbook_core::rules::{validate_upcoming_days, DEFAULT_UPCOMING_DAYS};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "addrbook";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub upcoming_days: i64,
    pub interface: Interface,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interface {
    Terminal,
    Web,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    Json,
}

impl StorageBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::Json => "json",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "json" => Ok(StorageBackend::Json),
            _ => Err(ConfigError::InvalidStorageBackend(raw.to_string())),
        }
    }
}

impl FromStr for Interface {
    type Err = ConfigError;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "terminal" => Ok(Interface::Terminal),
            "web" => Ok(Interface::Web),
            _ => Err(ConfigError::InvalidInterface(raw.to_string())),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            interface: Interface::Terminal,
            storage: StorageConfig {
                backend: StorageBackend::Sqlite,
                path: None,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid upcoming_days value: {0}")]
    InvalidUpcomingDays(i64),
    #[error("invalid storage backend: {0} (expected sqlite|json)")]
    InvalidStorageBackend(String),
    #[error("invalid interface: {0} (expected terminal|web)")]
    InvalidInterface(String),
    #[error("invalid storage.path: {0}")]
    InvalidStoragePath(PathBuf),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    upcoming_days: Option<i64>,
    interface: Option<Interface>,
    storage: Option<StorageFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StorageFile {
    backend: Option<StorageBackend>,
    path: Option<PathBuf>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path.clone()) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(days) = parsed.upcoming_days {
        config.upcoming_days =
            validate_upcoming_days(days).map_err(|_| ConfigError::InvalidUpcomingDays(days))?;
    }

    if let Some(interface) = parsed.interface {
        config.interface = interface;
    }

    if let Some(storage) = parsed.storage {
        if let Some(backend) = storage.backend {
            config.storage.backend = backend;
        }
        if let Some(path) = storage.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidStoragePath(path));
            }
            config.storage.path = Some(path);
        }
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        load_at_path, merge_config, ConfigError, ConfigFile, Interface, StorageBackend,
        StorageFile,
    };
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::str::FromStr;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            upcoming_days: Some(3),
            interface: Some(Interface::Web),
            storage: Some(StorageFile {
                backend: Some(StorageBackend::Json),
                path: Some(PathBuf::from("/tmp/book.json")),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.upcoming_days, 3);
        assert_eq!(merged.interface, Interface::Web);
        assert_eq!(merged.storage.backend, StorageBackend::Json);
        assert_eq!(merged.storage.path, Some(PathBuf::from("/tmp/book.json")));
    }

    #[test]
    fn merge_config_defaults() {
        let parsed = ConfigFile {
            upcoming_days: None,
            interface: None,
            storage: None,
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.upcoming_days, 7);
        assert_eq!(merged.interface, Interface::Terminal);
        assert_eq!(merged.storage.backend, StorageBackend::Sqlite);
        assert!(merged.storage.path.is_none());
    }

    #[test]
    fn merge_config_rejects_out_of_range_days() {
        let parsed = ConfigFile {
            upcoming_days: Some(400),
            interface: None,
            storage: None,
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUpcomingDays(400)));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "upcoming_days = 5\ninterface = \"terminal\"\n[storage]\nbackend = \"json\"\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.upcoming_days, 5);
        assert_eq!(config.storage.backend, StorageBackend::Json);
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "soon_days = 5\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "upcoming_days = 5\n").expect("write config");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&path, perms).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }

    #[test]
    fn enums_parse_from_flags() {
        assert_eq!(
            StorageBackend::from_str("JSON").unwrap(),
            StorageBackend::Json
        );
        assert_eq!(Interface::from_str("web").unwrap(), Interface::Web);
        assert!(StorageBackend::from_str("csv").is_err());
    }
}
