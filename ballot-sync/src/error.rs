//! Error types for ballot-sync.

use thiserror::Error;

use ballot_chain::ChainError;
use ballot_core::ValidationError;

/// A reconciliation batch that had at least one failed read step.
///
/// Partial view updates applied before (and after) the failure are kept —
/// the batch is best-effort, not transactional.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("reconciliation finished with {failed} failed read step(s); first: {first}")]
    Reconcile { failed: usize, first: String },
}

/// Outcome of a rejected write action. The message text is surfaced to the
/// user as a transient status line.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Local validation failed — no remote call was issued.
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    /// The remote call was rejected or failed in transit.
    #[error("{0}")]
    Rejected(#[from] ChainError),
}
