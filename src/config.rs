//! Runtime configuration.
//!
//! Defaults are the constants below; a JSON document can override any subset of
//! fields (missing fields fall back to the defaults).

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Candidate count at which per-document scoring moves onto the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Daily scan credits granted to a regular account.
pub const DEFAULT_DAILY_CREDITS: u32 = 20;

/// Scan credits granted to an admin account.
pub const DEFAULT_ADMIN_CREDITS: u32 = 9999;

/// Number of accounts listed in the "top users" analytics table.
pub const DEFAULT_TOP_USERS_LIMIT: usize = 10;

/// File extension accepted by uploads when none is configured.
pub const DEFAULT_ACCEPTED_EXTENSION: &str = "txt";

/// Settings of the similarity search itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Score candidates in parallel once there are at least this many.
    /// `0` always scores in parallel.
    pub parallel_threshold: usize,
    /// Keep document vectors between searches, keyed by document and content.
    pub cache_vectors: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            cache_vectors: false,
        }
    }
}

/// Settings of the account, upload and analytics layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub default_credits: u32,
    pub admin_credits: u32,
    /// Lower-case extensions without the dot
    pub accepted_extensions: Vec<String>,
    pub top_users_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_credits: DEFAULT_DAILY_CREDITS,
            admin_credits: DEFAULT_ADMIN_CREDITS,
            accepted_extensions: vec![DEFAULT_ACCEPTED_EXTENSION.to_string()],
            top_users_limit: DEFAULT_TOP_USERS_LIMIT,
        }
    }
}

impl ServiceConfig {
    /// Whether a file called `name` may be uploaded (extension check, case-insensitive)
    pub fn accepts_file_name(&self, name: &str) -> bool {
        match Path::new(name).extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self
                .accepted_extensions
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub service: ServiceConfig,
}

impl Config {
    /// Parse a JSON document; absent fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.search.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert!(!config.search.cache_vectors);
        assert_eq!(config.service.default_credits, 20);
        assert_eq!(config.service.admin_credits, 9999);
        assert_eq!(config.service.accepted_extensions, vec!["txt".to_string()]);
        assert_eq!(config.service.top_users_limit, 10);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = Config::from_json_str(r#"{"search": {"cache_vectors": true}}"#).unwrap();
        assert!(config.search.cache_vectors);
        assert_eq!(config.search.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(config.service, ServiceConfig::default());
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Config::from_json_str("{}").unwrap(), Config::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Config::from_json_str("{ not json").is_err());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"service": {{"default_credits": 5}}}}"#).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.service.default_credits, 5);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Config::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, crate::error::DocMatchError::Io(_)));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let service = ServiceConfig::default();
        assert!(service.accepts_file_name("notes.txt"));
        assert!(service.accepts_file_name("NOTES.TXT"));
        assert!(!service.accepts_file_name("image.png"));
        assert!(!service.accepts_file_name("README"));
        assert!(!service.accepts_file_name("archive.txt.gz"));
    }
}
