//! Error types for ballot-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from client configuration handling.
///
/// Configuration errors are fatal to initialization: the caller renders a
/// blocking message and offers no further interaction.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The config file did not exist at the expected path.
    #[error("no client config at {path}; run `ballot deploy` and record the contract address first")]
    ConfigNotFound { path: PathBuf },

    /// The configured contract address is the zero-identifier sentinel.
    #[error("contract address is the zero sentinel; set `contract_address` in the client config")]
    ZeroContractAddress,

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.ballot/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

/// Input validation failures for write actions. Raised before any remote
/// call is attempted; the message is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a candidate name")]
    EmptyCandidateName,

    #[error("Please enter a valid ledger address")]
    MalformedAddress,

    #[error("Please enter a valid duration in minutes")]
    NonPositiveDuration,

    #[error("Please select a candidate")]
    NoCandidateSelected,
}
