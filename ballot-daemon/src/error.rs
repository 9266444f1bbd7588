use std::path::PathBuf;

use thiserror::Error;

use ballot_chain::WalletError;

/// Error surface for the session runtime and UI protocol.
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("channel closed: {0}")]
    ChannelClosed(&'static str),

    #[error("session protocol error: {0}")]
    Protocol(String),

    #[error("session daemon is not running (socket missing: {socket})")]
    NotRunning { socket: PathBuf },

    /// Fatal to initialization; rendered as a blocking message.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<WalletError> for DaemonError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Unavailable => DaemonError::Configuration(
                "no wallet provider is available; configure wallet accounts first".to_owned(),
            ),
            WalletError::Declined => DaemonError::Protocol(err.to_string()),
        }
    }
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DaemonError {
    DaemonError::Io {
        path: path.into(),
        source,
    }
}
