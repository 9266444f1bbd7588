//! Domain types for the ballot client.
//!
//! Every view struct is a disposable snapshot of remote contract state,
//! replaced wholesale on each reconciliation — never merged or diffed.
//! All types are serializable/deserializable via serde.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A ledger account address: `0x` followed by 40 hex digits.
///
/// Equality and hashing ignore ASCII case — ledger addresses carry
/// mixed-case display checksums, so `0xAB…` and `0xab…` name the same
/// account. The original casing is preserved for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Parse a well-formed address; rejects anything that is not
    /// `0x` + 40 hex digits.
    pub fn parse(raw: &str) -> Option<Address> {
        let trimmed = raw.trim();
        let hex = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X"))?;
        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Address(trimmed.to_owned()))
    }

    /// The zero-identifier sentinel — an address no deployed contract can have.
    pub fn zero() -> Address {
        Address(format!("0x{}", "0".repeat(40)))
    }

    pub fn is_zero(&self) -> bool {
        self.0[2..].bytes().all(|b| b == b'0')
    }

    /// Shortened display form: first six characters, ellipsis, last four.
    pub fn short(&self) -> String {
        if self.0.len() < 12 {
            return self.0.clone();
        }
        format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A transaction identifier returned as a write confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TxHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TxHash {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// View snapshots
// ---------------------------------------------------------------------------

/// Header data: title, counters, and the contract owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderView {
    pub title: String,
    pub candidate_count: u32,
    pub total_votes: u64,
    pub owner: Address,
}

/// One candidate entry, indexed by its 1-based ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateView {
    pub ordinal: u32,
    pub name: String,
    pub vote_count: u64,
}

/// Registration and participation status for the active identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterStatusView {
    pub is_registered: bool,
    pub has_voted: bool,
}

impl VoterStatusView {
    pub fn ui_state(&self) -> VoterUiState {
        match (self.is_registered, self.has_voted) {
            (false, _) => VoterUiState::NotRegistered,
            (true, false) => VoterUiState::CanVote,
            (true, true) => VoterUiState::AlreadyVoted,
        }
    }
}

/// Derived UI state for the voting control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VoterUiState {
    #[default]
    NotRegistered,
    CanVote,
    AlreadyVoted,
}

impl VoterUiState {
    /// Whether the cast-vote control is enabled in this state.
    pub fn can_vote(&self) -> bool {
        matches!(self, VoterUiState::CanVote)
    }

    pub fn label(&self) -> &'static str {
        match self {
            VoterUiState::NotRegistered => "Not Registered",
            VoterUiState::CanVote => "Registered - Can Vote",
            VoterUiState::AlreadyVoted => "Registered - Already Voted",
        }
    }
}

/// The voting window as reported by the contract, in contract server time
/// (Unix seconds). `server_time` comes from the same read as the bounds, so
/// the derived countdown never mixes clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingWindowView {
    pub active: bool,
    pub start_time: u64,
    pub end_time: u64,
    pub server_time: u64,
}

impl VotingWindowView {
    pub fn status_label(&self) -> &'static str {
        if self.active {
            "ACTIVE"
        } else {
            "INACTIVE"
        }
    }

    /// Seconds until the window closes, clamped to zero.
    pub fn remaining_secs(&self) -> u64 {
        self.end_time.saturating_sub(self.server_time)
    }

    /// Countdown line for display. Never renders a negative duration.
    pub fn countdown(&self) -> String {
        if !self.active {
            return "Voting is not currently active".to_owned();
        }
        let left = self.remaining_secs();
        if left == 0 {
            return "Voting period has ended".to_owned();
        }
        let hours = left / 3600;
        let minutes = (left % 3600) / 60;
        let seconds = left % 60;
        format!("Time left: {hours}h {minutes}m {seconds}s")
    }
}

/// Final tally, fetched on demand — never part of the periodic refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsView {
    pub winner_name: String,
    pub winner_votes: u64,
    pub total_votes: u64,
}

// ---------------------------------------------------------------------------
// Deployment record
// ---------------------------------------------------------------------------

/// Durable record of one deployment run. One JSON file per run,
/// never overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub contract_address: Address,
    pub contract_owner: Address,
    pub voting_title: String,
    pub network: String,
    pub deployer_address: Address,
    pub transaction_hash: TxHash,
    pub deployed_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
