//! The reconciliation engine.
//!
//! One [`Synchronizer`] owns the view set and the contract handle for a
//! session. `reconcile` runs a best-effort, non-transactional batch of
//! reads in a fixed order: a failed step is logged and recorded, already
//! applied view updates stay in place, and later steps still run. The
//! contract is the single source of truth — views are only ever written
//! from reads, never predicted from writes.

use std::sync::Arc;

use chrono::Utc;

use ballot_chain::{ChainError, VotingContract};
use ballot_core::types::{Address, CandidateView, HeaderView, VoterUiState};

use crate::error::SyncError;
use crate::views::ViewSet;

pub struct Synchronizer {
    contract: Arc<dyn VotingContract>,
    identity: Option<Address>,
    views: ViewSet,
}

impl Synchronizer {
    pub fn new(contract: Arc<dyn VotingContract>) -> Synchronizer {
        Synchronizer {
            contract,
            identity: None,
            views: ViewSet::default(),
        }
    }

    pub fn views(&self) -> &ViewSet {
        &self.views
    }

    pub fn identity(&self) -> Option<&Address> {
        self.identity.as_ref()
    }

    pub(crate) fn contract(&self) -> &Arc<dyn VotingContract> {
        &self.contract
    }

    /// Replace the active identity (wallet account change). The views are
    /// stale against the new identity until the caller reconciles.
    pub fn set_identity(&mut self, identity: Option<Address>) {
        self.identity = identity.clone();
        self.views.identity = identity;
    }

    /// One full reconciliation batch.
    ///
    /// Read steps, in fixed order: (a) header, (b) admin-panel derivation,
    /// (c) voting window, (d) candidate enumeration, (e) voter status.
    /// Any failed step makes the batch report failure, but every other
    /// step still runs and its updates stick.
    pub async fn reconcile(&mut self) -> Result<(), SyncError> {
        let mut failures: Vec<ChainError> = Vec::new();

        // (a) Header: title, counters, owner.
        match self.read_header().await {
            Ok(header) => self.views.header = Some(header),
            Err(err) => {
                tracing::warn!("header refresh failed: {err}");
                failures.push(err);
            }
        }

        // (b) Admin panel: active identity vs owner, case-insensitive.
        // Works off the freshest owner we have — stale if (a) just failed.
        self.views.admin_panel = match (&self.identity, &self.views.header) {
            (Some(identity), Some(header)) => *identity == header.owner,
            _ => false,
        };

        // (c) Voting window.
        match self.contract.voting_status().await {
            Ok(window) => {
                self.views.window_display =
                    format!("{} — {}", window.status_label(), window.countdown());
                self.views.window = Some(window);
            }
            Err(err) => {
                tracing::warn!("voting window refresh failed: {err}");
                failures.push(err);
            }
        }

        // (d) Candidate enumeration, 1..=count. One ordinal failing is a
        // degraded state, not a batch failure: log, skip, continue.
        match self.read_candidates().await {
            Ok(candidates) => self.views.candidates = candidates,
            Err(err) => {
                tracing::warn!("candidate enumeration failed: {err}");
                failures.push(err);
            }
        }

        // (e) Voter status for the active identity, if any.
        if let Some(identity) = self.identity.clone() {
            match self.contract.voter_info(&identity).await {
                Ok(status) => {
                    self.views.voter = Some(status);
                    self.views.voter_ui = status.ui_state();
                }
                Err(err) => {
                    tracing::warn!("voter status refresh failed: {err}");
                    failures.push(err);
                }
            }
        } else {
            self.views.voter = None;
            self.views.voter_ui = VoterUiState::NotRegistered;
        }

        self.views.last_refreshed = Some(Utc::now());

        if failures.is_empty() {
            tracing::info!(
                "reconciliation complete: {} candidate(s)",
                self.views.candidates.len()
            );
            Ok(())
        } else {
            Err(SyncError::Reconcile {
                failed: failures.len(),
                first: failures[0].to_string(),
            })
        }
    }

    async fn read_header(&self) -> Result<HeaderView, ChainError> {
        let title = self.contract.title().await?;
        let candidate_count = self.contract.candidate_count().await?;
        let total_votes = self.contract.total_votes().await?;
        let owner = self.contract.owner().await?;
        Ok(HeaderView {
            title,
            candidate_count,
            total_votes,
            owner,
        })
    }

    async fn read_candidates(&self) -> Result<Vec<CandidateView>, ChainError> {
        let count = self.contract.candidate_count().await?;
        let mut candidates = Vec::with_capacity(count as usize);
        for ordinal in 1..=count {
            match self.contract.candidate(ordinal).await {
                Ok(candidate) => candidates.push(candidate),
                Err(err) => {
                    tracing::warn!("skipping candidate {ordinal}: {err}");
                }
            }
        }
        Ok(candidates)
    }
}
