//! Configuration management for routinely.
//!
//! Configuration can be set via environment variables:
//! - `ROUTINELY_DATA_DIR` - Optional. Directory holding the persisted
//!   records. Defaults to `$HOME/.routinely`.
//! - `ROUTINELY_MOCK_DATA` - Optional. When truthy, run against
//!   seeded in-memory sample data instead of the data directory.

use std::path::PathBuf;

use crate::util::env_var_bool;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for the persisted records
    pub data_dir: PathBuf,

    /// Run against seeded in-memory sample data
    pub mock_data: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let data_dir = std::env::var("ROUTINELY_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(crate::util::home_dir()).join(".routinely"));

        let mock_data = env_var_bool("ROUTINELY_MOCK_DATA", false);

        Self {
            data_dir,
            mock_data,
        }
    }
}
