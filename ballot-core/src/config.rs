//! Client configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.ballot/
//!   config.yaml      (endpoint, contract address, wallet accounts — 0600)
//!   deployments/     (one JSON record per deployment run)
//!   run/             (daemon socket)
//! ```
//!
//! # API pattern
//!
//! Every accessor has two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Address;

/// Default reconciliation period, in seconds.
pub const DEFAULT_REFRESH_SECS: u64 = 30;

/// Client-side configuration: where the contract lives and which accounts
/// the wallet holds. The contract address must be set to a deployed,
/// non-zero address before the client can do anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// RPC endpoint URL of the ledger node.
    pub endpoint: String,
    /// Address of the deployed voting contract.
    pub contract_address: Address,
    /// Wallet accounts available for authorization, in preference order.
    #[serde(default)]
    pub accounts: Vec<Address>,
    /// Reconciliation period override.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

fn default_refresh_secs() -> u64 {
    DEFAULT_REFRESH_SECS
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.ballot/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".ballot").join("config.yaml")
}

/// `<home>/.ballot/deployments/` — pure, no I/O.
pub fn deployments_dir_at(home: &Path) -> PathBuf {
    home.join(".ballot").join("deployments")
}

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load the client config from `<home>/.ballot/config.yaml`.
///
/// Returns `ConfigError::ConfigNotFound` if absent,
/// `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(home: &Path) -> Result<ClientConfig, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound { path });
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<ClientConfig, ConfigError> {
    load_at(&home()?)
}

// ---------------------------------------------------------------------------
// Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save the client config.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
/// `.tmp` stays in the target directory (same filesystem — no EXDEV).
pub fn save_at(home: &Path, config: &ClientConfig) -> Result<(), ConfigError> {
    let path = config_path_at(home);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_file_name("config.yaml.tmp");

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp_path, yaml)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(())
}

/// `save_at` convenience wrapper.
pub fn save(config: &ClientConfig) -> Result<(), ConfigError> {
    save_at(&home()?, config)
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
