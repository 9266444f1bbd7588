//! The UI-bound view set.
//!
//! One struct holding every snapshot the UI renders. Each field is
//! replaced wholesale by reconciliation; nothing in here is ever mutated
//! incrementally or merged, so the local copy can lag the ledger but
//! never drift from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ballot_core::types::{
    Address, CandidateView, HeaderView, VoterStatusView, VoterUiState, VotingWindowView,
};

/// Full UI-bound state, serializable so the session runtime can ship it to
/// the UI surface verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewSet {
    /// Title, counters, owner. `None` until the first successful header read.
    pub header: Option<HeaderView>,
    /// Whether the administrative control panel is visible — the active
    /// identity matches the contract owner (case-insensitively).
    pub admin_panel: bool,
    /// The voting window as last read.
    pub window: Option<VotingWindowView>,
    /// Countdown / status line derived from `window`.
    pub window_display: String,
    /// Complete candidate list, 1-based ordinals. Replaced in full every
    /// reconciliation; may be partial when individual ordinal reads failed.
    pub candidates: Vec<CandidateView>,
    /// Status of the active identity, when one is authorized.
    pub voter: Option<VoterStatusView>,
    /// Derived state of the cast-vote control.
    pub voter_ui: VoterUiState,
    /// The active identity the views were derived against.
    pub identity: Option<Address>,
    /// When the last reconciliation batch finished (success or partial).
    pub last_refreshed: Option<DateTime<Utc>>,
}

impl ViewSet {
    /// Selection choices for the voting control: one `(ordinal, name)` per
    /// known candidate. Empty list ⇒ the control offers no choices.
    pub fn choices(&self) -> Vec<(u32, String)> {
        self.candidates
            .iter()
            .map(|c| (c.ordinal, c.name.clone()))
            .collect()
    }
}
