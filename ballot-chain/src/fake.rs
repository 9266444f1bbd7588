//! In-memory doubles for the contract, factory, and wallet seams.
//!
//! Used by the test suites across the workspace and by nothing in
//! production. The fakes count every remote call and support per-operation
//! failure injection so callers can assert the zero-call and partial-list
//! invariants.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};

use ballot_core::types::{
    Address, CandidateView, ResultsView, TxHash, VoterStatusView, VotingWindowView,
};

use crate::contract::{ContractFactory, Instantiation, VotingContract};
use crate::error::ChainError;
use crate::wallet::{WalletError, WalletProvider};

fn rejected(method: &str, message: impl Into<String>) -> ChainError {
    ChainError::Rejected {
        method: method.to_owned(),
        code: -32000,
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// FakeContract
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct FakeContractState {
    title: String,
    owner: Option<Address>,
    candidates: Vec<(String, u64)>,
    voters: HashMap<Address, VoterStatusView>,
    window_active: bool,
    window_start: u64,
    window_end: u64,
    total_votes: u64,
    fail_reads: HashSet<String>,
    fail_ordinals: HashSet<u32>,
    reject_writes: Option<String>,
}

/// In-memory voting contract. Mirrors only the rules the client can
/// observe: owner-gated admin writes, registration-gated voting, one vote
/// per voter, an explicit voting window.
pub struct FakeContract {
    state: Mutex<FakeContractState>,
    now: AtomicU64,
    read_calls: AtomicU64,
    write_calls: AtomicU64,
}

impl FakeContract {
    pub fn new(title: &str, owner: Address) -> FakeContract {
        FakeContract {
            state: Mutex::new(FakeContractState {
                title: title.to_owned(),
                owner: Some(owner),
                ..FakeContractState::default()
            }),
            now: AtomicU64::new(1_000_000),
            read_calls: AtomicU64::new(0),
            write_calls: AtomicU64::new(0),
        }
    }

    // --- test setup -------------------------------------------------------

    /// Contract server clock, in Unix seconds.
    pub fn set_now(&self, unix_secs: u64) {
        self.now.store(unix_secs, Ordering::Relaxed);
    }

    pub async fn push_candidate(&self, name: &str, votes: u64) {
        let mut state = self.state.lock().await;
        state.candidates.push((name.to_owned(), votes));
    }

    pub async fn register(&self, voter: Address) {
        let mut state = self.state.lock().await;
        state.voters.insert(
            voter,
            VoterStatusView {
                is_registered: true,
                has_voted: false,
            },
        );
    }

    pub async fn open_window(&self, start: u64, end: u64) {
        let mut state = self.state.lock().await;
        state.window_active = true;
        state.window_start = start;
        state.window_end = end;
    }

    /// Make the named read operation fail from now on.
    pub async fn fail_read(&self, operation: &str) {
        let mut state = self.state.lock().await;
        state.fail_reads.insert(operation.to_owned());
    }

    /// Make `getCandidate` fail for one specific ordinal only.
    pub async fn fail_ordinal(&self, ordinal: u32) {
        let mut state = self.state.lock().await;
        state.fail_ordinals.insert(ordinal);
    }

    /// Reject every write with the given message.
    pub async fn reject_writes(&self, message: &str) {
        let mut state = self.state.lock().await;
        state.reject_writes = Some(message.to_owned());
    }

    // --- call accounting --------------------------------------------------

    pub fn read_calls(&self) -> u64 {
        self.read_calls.load(Ordering::Relaxed)
    }

    pub fn write_calls(&self) -> u64 {
        self.write_calls.load(Ordering::Relaxed)
    }

    // --- internals --------------------------------------------------------

    async fn read_gate(&self, operation: &str) -> Result<(), ChainError> {
        self.read_calls.fetch_add(1, Ordering::Relaxed);
        let state = self.state.lock().await;
        if state.fail_reads.contains(operation) {
            return Err(rejected(operation, format!("{operation} read failed")));
        }
        Ok(())
    }

    async fn write_gate(
        &self,
        operation: &str,
        from: &Address,
        owner_only: bool,
    ) -> Result<(), ChainError> {
        self.write_calls.fetch_add(1, Ordering::Relaxed);
        let state = self.state.lock().await;
        if let Some(message) = &state.reject_writes {
            return Err(rejected(operation, message.clone()));
        }
        if owner_only && state.owner.as_ref() != Some(from) {
            return Err(rejected(
                operation,
                "only the contract owner may call this",
            ));
        }
        Ok(())
    }

    fn tx(&self, operation: &str) -> TxHash {
        let n = self.write_calls.load(Ordering::Relaxed);
        TxHash(format!("0xfake-{operation}-{n}"))
    }
}

#[async_trait]
impl VotingContract for FakeContract {
    async fn title(&self) -> Result<String, ChainError> {
        self.read_gate("votingTitle").await?;
        Ok(self.state.lock().await.title.clone())
    }

    async fn candidate_count(&self) -> Result<u32, ChainError> {
        self.read_gate("candidateCount").await?;
        Ok(self.state.lock().await.candidates.len() as u32)
    }

    async fn total_votes(&self) -> Result<u64, ChainError> {
        self.read_gate("totalVotes").await?;
        Ok(self.state.lock().await.total_votes)
    }

    async fn owner(&self) -> Result<Address, ChainError> {
        self.read_gate("owner").await?;
        let state = self.state.lock().await;
        state
            .owner
            .clone()
            .ok_or_else(|| rejected("owner", "contract has no owner"))
    }

    async fn candidate(&self, ordinal: u32) -> Result<CandidateView, ChainError> {
        self.read_gate("getCandidate").await?;
        let state = self.state.lock().await;
        if state.fail_ordinals.contains(&ordinal) {
            return Err(rejected(
                "getCandidate",
                format!("candidate {ordinal} read failed"),
            ));
        }
        let index = ordinal
            .checked_sub(1)
            .map(|i| i as usize)
            .filter(|i| *i < state.candidates.len())
            .ok_or_else(|| rejected("getCandidate", "candidate does not exist"))?;
        let (name, vote_count) = state.candidates[index].clone();
        Ok(CandidateView {
            ordinal,
            name,
            vote_count,
        })
    }

    async fn voting_status(&self) -> Result<VotingWindowView, ChainError> {
        self.read_gate("getVotingStatus").await?;
        let state = self.state.lock().await;
        Ok(VotingWindowView {
            active: state.window_active,
            start_time: state.window_start,
            end_time: state.window_end,
            server_time: self.now.load(Ordering::Relaxed),
        })
    }

    async fn voter_info(&self, voter: &Address) -> Result<VoterStatusView, ChainError> {
        self.read_gate("getVoterInfo").await?;
        let state = self.state.lock().await;
        Ok(state.voters.get(voter).copied().unwrap_or(VoterStatusView {
            is_registered: false,
            has_voted: false,
        }))
    }

    async fn results(&self) -> Result<ResultsView, ChainError> {
        self.read_gate("getResults").await?;
        let state = self.state.lock().await;
        let (winner_name, winner_votes) = state
            .candidates
            .iter()
            .max_by_key(|(_, votes)| *votes)
            .cloned()
            .ok_or_else(|| rejected("getResults", "no candidates yet"))?;
        Ok(ResultsView {
            winner_name,
            winner_votes,
            total_votes: state.total_votes,
        })
    }

    async fn add_candidate(&self, name: &str, from: &Address) -> Result<TxHash, ChainError> {
        self.write_gate("addCandidate", from, true).await?;
        let mut state = self.state.lock().await;
        state.candidates.push((name.to_owned(), 0));
        Ok(self.tx("addCandidate"))
    }

    async fn register_voter(&self, voter: &Address, from: &Address) -> Result<TxHash, ChainError> {
        self.write_gate("registerVoter", from, true).await?;
        let mut state = self.state.lock().await;
        state.voters.insert(
            voter.clone(),
            VoterStatusView {
                is_registered: true,
                has_voted: false,
            },
        );
        Ok(self.tx("registerVoter"))
    }

    async fn start_voting(
        &self,
        duration_minutes: u64,
        from: &Address,
    ) -> Result<TxHash, ChainError> {
        self.write_gate("startVoting", from, true).await?;
        let now = self.now.load(Ordering::Relaxed);
        let mut state = self.state.lock().await;
        state.window_active = true;
        state.window_start = now;
        state.window_end = now + duration_minutes * 60;
        Ok(self.tx("startVoting"))
    }

    async fn end_voting(&self, from: &Address) -> Result<TxHash, ChainError> {
        self.write_gate("endVoting", from, true).await?;
        let mut state = self.state.lock().await;
        state.window_active = false;
        Ok(self.tx("endVoting"))
    }

    async fn cast_vote(&self, ordinal: u32, from: &Address) -> Result<TxHash, ChainError> {
        self.write_gate("castVote", from, false).await?;
        let mut state = self.state.lock().await;
        if !state.window_active {
            return Err(rejected("castVote", "voting is not active"));
        }
        let index = ordinal
            .checked_sub(1)
            .map(|i| i as usize)
            .filter(|i| *i < state.candidates.len())
            .ok_or_else(|| rejected("castVote", "candidate does not exist"))?;
        let voter = state.voters.get(from).copied().unwrap_or(VoterStatusView {
            is_registered: false,
            has_voted: false,
        });
        if !voter.is_registered {
            return Err(rejected("castVote", "voter is not registered"));
        }
        if voter.has_voted {
            return Err(rejected("castVote", "voter has already voted"));
        }
        state.candidates[index].1 += 1;
        state.total_votes += 1;
        state.voters.insert(
            from.clone(),
            VoterStatusView {
                is_registered: true,
                has_voted: true,
            },
        );
        Ok(self.tx("castVote"))
    }
}

// ---------------------------------------------------------------------------
// FakeFactory
// ---------------------------------------------------------------------------

/// Deterministic instantiation results; flips to failure on demand.
pub struct FakeFactory {
    pub address: Address,
    pub owner: Address,
    pub fail: bool,
    pub instantiated_titles: Mutex<Vec<String>>,
}

impl FakeFactory {
    pub fn new(address: Address, owner: Address) -> FakeFactory {
        FakeFactory {
            address,
            owner,
            fail: false,
            instantiated_titles: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(mut self) -> FakeFactory {
        self.fail = true;
        self
    }
}

#[async_trait]
impl ContractFactory for FakeFactory {
    async fn instantiate(&self, title: &str, _from: &Address) -> Result<Instantiation, ChainError> {
        if self.fail {
            return Err(rejected("deploy", "instantiation reverted"));
        }
        self.instantiated_titles.lock().await.push(title.to_owned());
        Ok(Instantiation {
            address: self.address.clone(),
            owner: self.owner.clone(),
            transaction_hash: TxHash::from("0xfake-deploy-1"),
        })
    }

    fn network(&self) -> String {
        "fakenet".to_owned()
    }
}

// ---------------------------------------------------------------------------
// FakeWallet
// ---------------------------------------------------------------------------

/// Wallet double with a switchable account list and an identity-change
/// stream tests can drive.
pub struct FakeWallet {
    accounts: Mutex<Vec<Address>>,
    changes: broadcast::Sender<Vec<Address>>,
    decline: bool,
}

impl FakeWallet {
    pub fn new(accounts: Vec<Address>) -> FakeWallet {
        let (changes, _) = broadcast::channel(8);
        FakeWallet {
            accounts: Mutex::new(accounts),
            changes,
            decline: false,
        }
    }

    /// A wallet whose user declines every authorization request.
    pub fn declining() -> FakeWallet {
        let mut wallet = FakeWallet::new(Vec::new());
        wallet.decline = true;
        wallet
    }

    /// Replace the account list and notify subscribers.
    pub async fn switch_accounts(&self, accounts: Vec<Address>) {
        *self.accounts.lock().await = accounts.clone();
        let _ = self.changes.send(accounts);
    }
}

#[async_trait]
impl WalletProvider for FakeWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        if self.decline {
            return Err(WalletError::Declined);
        }
        Ok(self.accounts.lock().await.clone())
    }

    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.accounts.lock().await.clone())
    }

    fn subscribe_accounts(&self) -> broadcast::Receiver<Vec<Address>> {
        self.changes.subscribe()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Address {
        Address::parse("0xabcdef1234567890abcdef1234567890abcdef12").expect("valid")
    }

    fn voter() -> Address {
        Address::parse("0x1111111111111111111111111111111111111111").expect("valid")
    }

    #[tokio::test]
    async fn full_voting_round() {
        let contract = FakeContract::new("Test Election", owner());
        contract.add_candidate("Alice", &owner()).await.expect("add");
        contract.add_candidate("Bob", &owner()).await.expect("add");
        contract
            .register_voter(&voter(), &owner())
            .await
            .expect("register");
        contract.start_voting(10, &owner()).await.expect("start");

        contract.cast_vote(1, &voter()).await.expect("vote");

        assert_eq!(contract.total_votes().await.unwrap(), 1);
        let winner = contract.results().await.unwrap();
        assert_eq!(winner.winner_name, "Alice");
        assert_eq!(winner.winner_votes, 1);

        let status = contract.voter_info(&voter()).await.unwrap();
        assert!(status.has_voted);
    }

    #[tokio::test]
    async fn double_vote_is_rejected() {
        let contract = FakeContract::new("Test Election", owner());
        contract.add_candidate("Alice", &owner()).await.expect("add");
        contract.register(voter()).await;
        contract.open_window(0, u64::MAX).await;

        contract.cast_vote(1, &voter()).await.expect("first vote");
        let err = contract.cast_vote(1, &voter()).await.expect_err("second");
        assert!(err.to_string().contains("already voted"));
    }

    #[tokio::test]
    async fn admin_writes_are_owner_gated() {
        let contract = FakeContract::new("Test Election", owner());
        let err = contract
            .add_candidate("Mallory", &voter())
            .await
            .expect_err("non-owner");
        assert!(err.to_string().contains("owner"));
    }

    #[tokio::test]
    async fn owner_check_is_case_insensitive() {
        let contract = FakeContract::new("Test Election", owner());
        let shouting =
            Address::parse("0xABCDEF1234567890ABCDEF1234567890ABCDEF12").expect("valid");
        contract
            .add_candidate("Alice", &shouting)
            .await
            .expect("same owner, different case");
    }

    #[tokio::test]
    async fn injected_ordinal_failure_only_hits_that_ordinal() {
        let contract = FakeContract::new("Test Election", owner());
        contract.push_candidate("Alice", 0).await;
        contract.push_candidate("Bob", 0).await;
        contract.fail_ordinal(1).await;

        assert!(contract.candidate(1).await.is_err());
        assert_eq!(contract.candidate(2).await.unwrap().name, "Bob");
    }

    #[tokio::test]
    async fn call_counters_track_reads_and_writes() {
        let contract = FakeContract::new("Test Election", owner());
        let _ = contract.title().await;
        let _ = contract.candidate_count().await;
        let _ = contract.add_candidate("Alice", &owner()).await;
        assert_eq!(contract.read_calls(), 2);
        assert_eq!(contract.write_calls(), 1);
    }

    #[tokio::test]
    async fn wallet_switch_notifies_subscribers() {
        let wallet = FakeWallet::new(vec![owner()]);
        let mut changes = wallet.subscribe_accounts();
        wallet.switch_accounts(vec![voter()]).await;
        let event = changes.recv().await.expect("change event");
        assert_eq!(event, vec![voter()]);
    }
}
