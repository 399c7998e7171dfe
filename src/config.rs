//! Server configuration.
//!
//! The configuration is read once at startup and shared read-only between the
//! acceptor and every connection task. All fields have defaults, so an absent
//! or partial YAML file is valid.

use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed location of the optional startup configuration file.
pub const CONFIG_PATH: &str = "/var/www/docserve.yaml";

/// Ports the server is allowed to listen on.
pub const PORT_RANGE: RangeInclusive<u16> = 49152..=65535;

pub const DEFAULT_PORT: u16 = 50000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("can't read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("port must be between {min} and {max}, got {0}", min = PORT_RANGE.start(), max = PORT_RANGE.end())]
    PortOutOfRange(u16),
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port bound on all interfaces.
    pub port: u16,
    /// Upper bound on connections handled at the same time.
    pub max_connections: usize,
    /// Size of the single read a request is taken from.
    pub request_buffer_size: usize,
    /// Size of the chunks a file body is streamed in.
    pub chunk_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub document_root: PathBuf,
    /// Directory holding the `404.html`, `405.html`, `415.html` and `500.html` pages.
    pub responses_dir: PathBuf,
    /// Ordered suffix table. The first matching entry wins.
    pub extensions: Vec<ExtensionMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtensionMapping {
    pub extension: String,
    pub content_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory holding `access.log` and `error.log`.
    pub dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_connections: 1024,
            request_buffer_size: 4096,
            chunk_size: 4096,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            document_root: PathBuf::from("/var/www/htdocs/"),
            responses_dir: PathBuf::from("/var/www/responses/"),
            extensions: default_extensions(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("/var/www/logs/"),
        }
    }
}

fn default_extensions() -> Vec<ExtensionMapping> {
    [
        ("gif", "image/gif"),
        ("jpg", "image/jpeg"),
        ("jpeg", "image/jpeg"),
        ("png", "image/png"),
        ("zip", "image/zip"),
        ("gz", "image/gz"),
        ("tar", "image/tar"),
        ("htm", "text/html"),
        ("html", "text/html"),
        ("cgi", "text/cgi"),
        ("xml", "text/xml"),
        ("js", "text/js"),
        ("css", "text/css"),
    ]
    .into_iter()
    .map(|(extension, content_type)| ExtensionMapping {
        extension: extension.to_string(),
        content_type: content_type.to_string(),
    })
    .collect()
}

impl Config {
    /// Loads the configuration from [`CONFIG_PATH`], falling back to the
    /// built-in defaults when the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_yaml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Config = serde_yaml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !PORT_RANGE.contains(&self.server.port) {
            return Err(ConfigError::PortOutOfRange(self.server.port));
        }
        if self.server.max_connections == 0 {
            return Err(ConfigError::Zero("server.max_connections"));
        }
        if self.server.request_buffer_size == 0 {
            return Err(ConfigError::Zero("server.request_buffer_size"));
        }
        if self.server.chunk_size == 0 {
            return Err(ConfigError::Zero("server.chunk_size"));
        }
        Ok(())
    }

    /// Path of a fixed error page, e.g. `404.html`, inside the responses directory.
    pub fn error_page(&self, code: u16) -> PathBuf {
        self.static_files.responses_dir.join(format!("{code}.html"))
    }
}

impl StaticFilesConfig {
    /// Returns the content type of the first table entry whose extension is a
    /// suffix of `file_name`. Matching is case-sensitive.
    pub fn content_type_for(&self, file_name: impl AsRef<[u8]>) -> Option<&str> {
        let file_name = file_name.as_ref();
        self.extensions
            .iter()
            .find(|m| file_name.ends_with(m.extension.as_bytes()))
            .map(|m| m.content_type.as_str())
    }
}
