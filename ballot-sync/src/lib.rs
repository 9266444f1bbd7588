//! Client state synchronizer.
//!
//! Keeps a [`ViewSet`] of disposable snapshots consistent with the
//! external voting contract and mediates every write operation through
//! it: validate locally, submit exactly one write, reconcile on success.

pub mod actions;
pub mod error;
pub mod reconcile;
pub mod views;

pub use actions::ActionOutcome;
pub use error::{ActionError, SyncError};
pub use reconcile::Synchronizer;
pub use views::ViewSet;
