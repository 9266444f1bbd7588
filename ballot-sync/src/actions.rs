//! Write actions.
//!
//! All five mutating operations share one shape: validate the input
//! locally (rejecting with zero remote calls), submit exactly one write
//! authorized as the active identity, await its confirmation, and on
//! success run exactly one full reconciliation. A failed write triggers
//! none — the views only ever change from reads.

use ballot_chain::ChainError;
use ballot_core::types::{Address, ResultsView, TxHash};
use ballot_core::validate;

use crate::error::ActionError;
use crate::reconcile::Synchronizer;

/// Report of a confirmed write: the transient status line plus the
/// confirmation identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub message: String,
    pub transaction_hash: TxHash,
}

impl Synchronizer {
    fn require_identity(&self) -> Result<Address, ActionError> {
        self.identity()
            .cloned()
            .ok_or(ActionError::Rejected(ChainError::NoIdentity))
    }

    /// Reconcile once after a confirmed write. A refresh failure does not
    /// undo the action — the next timer tick retries everything anyway.
    async fn reconcile_after_write(&mut self) {
        if let Err(err) = self.reconcile().await {
            tracing::warn!("post-write reconciliation incomplete: {err}");
        }
    }

    pub async fn add_candidate(&mut self, raw_name: &str) -> Result<ActionOutcome, ActionError> {
        let name = validate::candidate_name(raw_name)?;
        let from = self.require_identity()?;
        let transaction_hash = self.contract().add_candidate(&name, &from).await?;
        self.reconcile_after_write().await;
        Ok(ActionOutcome {
            message: "Candidate added successfully!".to_owned(),
            transaction_hash,
        })
    }

    pub async fn register_voter(&mut self, raw_address: &str) -> Result<ActionOutcome, ActionError> {
        let voter = validate::voter_address(raw_address)?;
        let from = self.require_identity()?;
        let transaction_hash = self.contract().register_voter(&voter, &from).await?;
        self.reconcile_after_write().await;
        Ok(ActionOutcome {
            message: "Voter registered successfully!".to_owned(),
            transaction_hash,
        })
    }

    pub async fn start_voting(&mut self, minutes: u64) -> Result<ActionOutcome, ActionError> {
        let minutes = validate::duration_minutes(minutes)?;
        let from = self.require_identity()?;
        let transaction_hash = self.contract().start_voting(minutes, &from).await?;
        self.reconcile_after_write().await;
        Ok(ActionOutcome {
            message: "Voting started successfully!".to_owned(),
            transaction_hash,
        })
    }

    pub async fn end_voting(&mut self) -> Result<ActionOutcome, ActionError> {
        let from = self.require_identity()?;
        let transaction_hash = self.contract().end_voting(&from).await?;
        self.reconcile_after_write().await;
        Ok(ActionOutcome {
            message: "Voting ended successfully!".to_owned(),
            transaction_hash,
        })
    }

    pub async fn cast_vote(&mut self, selected: Option<u32>) -> Result<ActionOutcome, ActionError> {
        let ordinal = validate::candidate_selection(selected)?;
        let from = self.require_identity()?;
        let transaction_hash = self.contract().cast_vote(ordinal, &from).await?;
        self.reconcile_after_write().await;
        Ok(ActionOutcome {
            message: "Vote cast successfully!".to_owned(),
            transaction_hash,
        })
    }

    /// On-demand results read. Never cached, never part of the periodic
    /// refresh, and never written into the view set.
    pub async fn results(&self) -> Result<ResultsView, ChainError> {
        self.contract().results().await
    }
}
