//! The voting contract seam.
//!
//! The contract's rules (who may vote, when the window opens, how the
//! winner is computed) live on the ledger; these traits only describe the
//! calls the client is allowed to make. Every write is authorized by a
//! caller identity and settles asynchronously into a confirmation or an
//! error.

use async_trait::async_trait;

use ballot_core::types::{
    Address, CandidateView, ResultsView, TxHash, VoterStatusView, VotingWindowView,
};

use crate::error::ChainError;

/// Read/write surface of a deployed voting contract.
#[async_trait]
pub trait VotingContract: Send + Sync {
    // Reads.
    async fn title(&self) -> Result<String, ChainError>;
    async fn candidate_count(&self) -> Result<u32, ChainError>;
    async fn total_votes(&self) -> Result<u64, ChainError>;
    async fn owner(&self) -> Result<Address, ChainError>;
    /// Fetch one candidate by its 1-based ordinal.
    async fn candidate(&self, ordinal: u32) -> Result<CandidateView, ChainError>;
    async fn voting_status(&self) -> Result<VotingWindowView, ChainError>;
    async fn voter_info(&self, voter: &Address) -> Result<VoterStatusView, ChainError>;
    async fn results(&self) -> Result<ResultsView, ChainError>;

    // Writes — each authorized as `from`, each settling into exactly one
    // confirmation or one error. No retries at this layer.
    async fn add_candidate(&self, name: &str, from: &Address) -> Result<TxHash, ChainError>;
    async fn register_voter(&self, voter: &Address, from: &Address) -> Result<TxHash, ChainError>;
    async fn start_voting(
        &self,
        duration_minutes: u64,
        from: &Address,
    ) -> Result<TxHash, ChainError>;
    async fn end_voting(&self, from: &Address) -> Result<TxHash, ChainError>;
    async fn cast_vote(&self, ordinal: u32, from: &Address) -> Result<TxHash, ChainError>;
}

/// Result of instantiating the contract on the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instantiation {
    pub address: Address,
    pub owner: Address,
    pub transaction_hash: TxHash,
}

/// Instantiates the external contract. Used only by the deployment
/// orchestrator; the confirmation defines deployment success.
#[async_trait]
pub trait ContractFactory: Send + Sync {
    async fn instantiate(&self, title: &str, from: &Address) -> Result<Instantiation, ChainError>;

    /// Human-readable descriptor of the target network, recorded in the
    /// deployment record.
    fn network(&self) -> String;
}
