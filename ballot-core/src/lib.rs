//! Ballot core library — domain types, views, validation, client config.
//!
//! Public API surface:
//! - [`types`] — addresses, view snapshots, the deployment record
//! - [`validate`] — pre-submit input validation for write actions
//! - [`config`] — client configuration load / save
//! - [`error`] — [`ConfigError`], [`ValidationError`]

pub mod config;
pub mod error;
pub mod types;
pub mod validate;

pub use config::ClientConfig;
pub use error::{ConfigError, ValidationError};
pub use types::{
    Address, CandidateView, DeploymentRecord, HeaderView, ResultsView, TxHash, VoterStatusView,
    VoterUiState, VotingWindowView,
};
