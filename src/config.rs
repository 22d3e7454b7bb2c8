//! Configuration management for the virtual filesystem
//!
//! The root directory and the path buffer capacity are fixed for the lifetime
//! of a session; they are read once and handed to [`crate::Session::open`].

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root exposed to clients when nothing else is configured
pub const DEFAULT_ROOT: &str = "/sdcard/";

/// Longest absolute path a session buffer can hold, in bytes
pub const DEFAULT_MAX_PATH_LEN: usize = 255;

/// Permission bits for directories created by clients
pub const DEFAULT_DIR_MODE: u32 = 0o777;

/// Session configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct VfsConfig {
    /// Real directory that becomes `/` for clients.
    /// Environment: FTP_VFS_ROOT
    pub root: String,

    /// Capacity of each session path buffer.
    /// Environment: FTP_VFS_MAX_PATH_LEN
    pub max_path_len: usize,

    /// Mode passed to mkdir (unix only).
    /// Environment: FTP_VFS_DIR_MODE
    #[serde(default = "default_dir_mode")]
    pub dir_mode: u32,
}

fn default_dir_mode() -> u32 {
    DEFAULT_DIR_MODE
}

impl Default for VfsConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT.to_string(),
            max_path_len: DEFAULT_MAX_PATH_LEN,
            dir_mode: DEFAULT_DIR_MODE,
        }
    }
}

impl VfsConfig {
    /// Default configuration rooted at `root`
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_max_path_len(mut self, max_path_len: usize) -> Self {
        self.max_path_len = max_path_len;
        self
    }

    pub fn with_dir_mode(mut self, dir_mode: u32) -> Self {
        self.dir_mode = dir_mode;
        self
    }

    /// Load configuration from ./vfs.toml (optional) with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("vfs")
    }

    /// Load configuration from `path` (extension optional, file optional)
    /// with environment overrides
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("root", DEFAULT_ROOT)?
            .set_default("max_path_len", DEFAULT_MAX_PATH_LEN as i64)?
            .set_default("dir_mode", DEFAULT_DIR_MODE as i64)?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("FTP_VFS"))
            .build()?;

        let config: VfsConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root.is_empty() {
            return Err(ConfigError::Message("root cannot be empty".into()));
        }

        if !self.root.starts_with('/') {
            return Err(ConfigError::Message(format!(
                "root must be an absolute path: {}",
                self.root
            )));
        }

        if self.root.contains('\0') {
            return Err(ConfigError::Message("root cannot contain NUL".into()));
        }

        if self.max_path_len == 0 {
            return Err(ConfigError::Message(
                "max_path_len must be greater than 0".into(),
            ));
        }

        if self.root_prefix().len() > self.max_path_len {
            return Err(ConfigError::Message(format!(
                "root {} does not fit in max_path_len {}",
                self.root, self.max_path_len
            )));
        }

        Ok(())
    }

    /// Root with exactly one trailing separator
    pub fn root_prefix(&self) -> String {
        format!("{}/", self.root.trim_end_matches('/'))
    }
}
