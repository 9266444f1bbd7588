//! Reconciliation batch behavior against an in-memory contract.

use std::sync::Arc;

use ballot_chain::fake::FakeContract;
use ballot_chain::VotingContract;
use ballot_core::types::{Address, VoterUiState};
use ballot_sync::{Synchronizer, ViewSet};

fn owner() -> Address {
    Address::parse("0xabcdef1234567890abcdef1234567890abcdef12").expect("valid")
}

fn voter() -> Address {
    Address::parse("0x1111111111111111111111111111111111111111").expect("valid")
}

async fn seeded_contract() -> Arc<FakeContract> {
    let contract = Arc::new(FakeContract::new("2024 Community Leadership Election", owner()));
    contract.push_candidate("Alice Johnson - Progressive Party", 2).await;
    contract.push_candidate("Bob Smith - Conservative Alliance", 1).await;
    contract.push_candidate("Carol Davis - Independent", 0).await;
    contract
}

#[tokio::test]
async fn full_batch_populates_every_view() {
    let contract = seeded_contract().await;
    contract.register(voter()).await;
    contract.open_window(1_000_000, 1_000_600).await;
    contract.set_now(1_000_000);

    let mut sync = Synchronizer::new(contract.clone());
    sync.set_identity(Some(voter()));
    sync.reconcile().await.expect("clean batch");

    let views = sync.views();
    let header = views.header.as_ref().expect("header");
    assert_eq!(header.title, "2024 Community Leadership Election");
    assert_eq!(header.candidate_count, 3);
    assert_eq!(header.owner, owner());

    assert_eq!(views.candidates.len(), 3);
    assert_eq!(views.candidates[0].name, "Alice Johnson - Progressive Party");
    assert_eq!(views.candidates[0].ordinal, 1);

    let window = views.window.expect("window");
    assert!(window.active);
    assert_eq!(window.remaining_secs(), 600);
    assert_eq!(views.window_display, "ACTIVE — Time left: 0h 10m 0s");

    assert_eq!(views.voter_ui, VoterUiState::CanVote);
    assert!(!views.admin_panel, "voter is not the owner");
    assert!(views.last_refreshed.is_some());
}

#[tokio::test]
async fn partial_list_invariant_one_failed_ordinal_skips_only_that_entry() {
    let contract = seeded_contract().await;
    let mut sync = Synchronizer::new(contract.clone());
    sync.reconcile().await.expect("first batch");
    assert_eq!(sync.views().candidates.len(), 3);

    contract.fail_ordinal(2).await;
    // A single failed ordinal is a degraded state, not a batch failure.
    sync.reconcile().await.expect("degraded batch still succeeds");

    let ordinals: Vec<u32> = sync.views().candidates.iter().map(|c| c.ordinal).collect();
    assert_eq!(ordinals, vec![1, 3], "only ordinal 2 is skipped");
    assert_eq!(sync.views().candidates[0].name, "Alice Johnson - Progressive Party");
    assert_eq!(sync.views().candidates[1].name, "Carol Davis - Independent");
}

#[tokio::test]
async fn failed_header_step_leaves_prior_header_and_later_steps_run() {
    let contract = seeded_contract().await;
    let mut sync = Synchronizer::new(contract.clone());
    sync.reconcile().await.expect("first batch");

    contract.fail_read("votingTitle").await;
    contract.open_window(1_000_000, 1_000_060).await;
    let err = sync.reconcile().await.expect_err("batch reports failure");
    assert!(err.to_string().contains("1 failed read step"));

    // Prior header snapshot is kept; the window read after the failed
    // header step was still attempted and applied.
    let views = sync.views();
    assert_eq!(
        views.header.as_ref().expect("header kept").title,
        "2024 Community Leadership Election"
    );
    assert!(views.window.expect("window refreshed").active);
}

#[tokio::test]
async fn reconcile_is_idempotent_without_state_changes() {
    let contract = seeded_contract().await;
    contract.register(voter()).await;
    let mut sync = Synchronizer::new(contract.clone());
    sync.set_identity(Some(voter()));

    sync.reconcile().await.expect("first");
    let mut first = sync.views().clone();
    sync.reconcile().await.expect("second");
    let mut second = sync.views().clone();

    // The refresh timestamp advances; every view content must not.
    first.last_refreshed = None;
    second.last_refreshed = None;
    assert_eq!(first, second);
}

#[tokio::test]
async fn admin_panel_owner_match_is_case_insensitive() {
    let contract = Arc::new(FakeContract::new(
        "Test Election",
        Address::parse("0xabcdef1234567890abcdef1234567890abcdef12").expect("valid"),
    ));
    let mut sync = Synchronizer::new(contract);
    sync.set_identity(Some(
        Address::parse("0xABCDEF1234567890ABCDEF1234567890ABCDEF12").expect("valid"),
    ));
    sync.reconcile().await.expect("batch");
    assert!(sync.views().admin_panel, "case must not break the owner match");
}

#[tokio::test]
async fn no_identity_means_no_voter_view_and_no_admin_panel() {
    let contract = seeded_contract().await;
    let mut sync = Synchronizer::new(contract);
    sync.reconcile().await.expect("batch");
    assert!(sync.views().voter.is_none());
    assert_eq!(sync.views().voter_ui, VoterUiState::NotRegistered);
    assert!(!sync.views().admin_panel);
}

#[tokio::test]
async fn voter_progression_not_registered_then_can_vote_then_voted() {
    let contract = seeded_contract().await;
    contract.open_window(0, u64::MAX).await;
    let mut sync = Synchronizer::new(contract.clone());
    sync.set_identity(Some(voter()));

    sync.reconcile().await.expect("batch");
    assert_eq!(sync.views().voter_ui, VoterUiState::NotRegistered);
    assert!(!sync.views().voter_ui.can_vote());

    contract.register(voter()).await;
    sync.reconcile().await.expect("batch");
    assert_eq!(sync.views().voter_ui, VoterUiState::CanVote);
    assert!(sync.views().voter_ui.can_vote());

    contract.cast_vote(1, &voter()).await.expect("vote");
    sync.reconcile().await.expect("batch");
    assert_eq!(sync.views().voter_ui, VoterUiState::AlreadyVoted);
    assert!(!sync.views().voter_ui.can_vote());
}

#[tokio::test]
async fn inactive_window_renders_fixed_message() {
    let contract = seeded_contract().await;
    let mut sync = Synchronizer::new(contract);
    sync.reconcile().await.expect("batch");
    assert_eq!(
        sync.views().window_display,
        "INACTIVE — Voting is not currently active"
    );
}

#[tokio::test]
async fn empty_contract_yields_empty_list_and_empty_choices() {
    let contract = Arc::new(FakeContract::new("Empty Election", owner()));
    let mut sync = Synchronizer::new(contract);
    sync.reconcile().await.expect("batch");

    assert!(sync.views().candidates.is_empty());
    assert!(sync.views().choices().is_empty());
    assert_eq!(sync.views().header.as_ref().unwrap().candidate_count, 0);
}

#[tokio::test]
async fn default_view_set_is_blank_before_first_batch() {
    let views = ViewSet::default();
    assert!(views.header.is_none());
    assert!(views.window.is_none());
    assert!(views.last_refreshed.is_none());
}
