//! `ballot deploy` — the deployment orchestrator.
//!
//! Instantiate → await confirmation → best-effort seeding → read back
//! counters → write one timestamped record file. Deployment success is
//! defined solely by the instantiation confirming; seeding and read-back
//! failures are reported as warnings and never abort the run. Nothing
//! here retries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Args;
use colored::Colorize;

use ballot_chain::{
    ChainError, ContractFactory, ContractHandle, InterfaceSpec, JsonRpcClient, JsonRpcContract,
    VotingContract,
};
use ballot_core::config;
use ballot_core::types::{Address, DeploymentRecord};

/// Election title used when `--title` is not given.
pub const DEFAULT_TITLE: &str = "2024 Community Leadership Election";

/// Seeded on every deploy unless the contract rejects them.
pub const SAMPLE_CANDIDATES: [&str; 3] = [
    "Alice Johnson - Progressive Party",
    "Bob Smith - Conservative Alliance",
    "Carol Davis - Independent",
];

/// At most this many wallet accounts are registered as sample voters.
pub const MAX_SAMPLE_VOTERS: usize = 5;

/// Arguments for `ballot deploy`.
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Election title for the deployed contract.
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// RPC endpoint override; defaults to the configured endpoint.
    #[arg(long)]
    pub endpoint: Option<String>,
}

impl DeployArgs {
    pub fn run(self) -> Result<()> {
        let home: PathBuf = dirs::home_dir().context("could not determine home directory")?;
        let config = config::load_at(&home)
            .context("deployment needs a client config — run `ballot init` first")?;
        let endpoint = self.endpoint.unwrap_or(config.endpoint);

        let Some(deployer) = config.accounts.first().cloned() else {
            bail!("no wallet account configured; add one with `ballot init --account <address>`");
        };

        let client = JsonRpcClient::new(endpoint);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("failed to build async runtime")?;

        let bind_client = client.clone();
        let summary = runtime
            .block_on(run_deployment(
                &client,
                move |address| {
                    let handle =
                        ContractHandle::bind(address.clone(), InterfaceSpec::voting_v1())?;
                    Ok(Arc::new(JsonRpcContract::new(bind_client, handle)) as Arc<dyn VotingContract>)
                },
                &deployer,
                &config.accounts,
                &self.title,
            ))
            .context("deployment failed")?;

        print_summary(&summary);

        let record_path = write_record_at(&config::deployments_dir_at(&home), &summary.record)
            .context("failed to write deployment record")?;
        println!("💾 Deployment record saved to: {}", record_path.display());
        Ok(())
    }
}

/// Everything one deployment run produced.
#[derive(Debug)]
pub struct DeploymentSummary {
    pub record: DeploymentRecord,
    /// Read-back counters; `None` when the read-back itself failed.
    pub candidate_count: Option<u32>,
    pub total_votes: Option<u64>,
    pub voting_active: Option<bool>,
    /// Why seeding stopped, if it did.
    pub seed_warning: Option<String>,
}

/// The orchestration sequence. `bind` turns the fresh address into a
/// usable contract for the seeding and read-back calls.
pub async fn run_deployment<F>(
    factory: &dyn ContractFactory,
    bind: F,
    deployer: &Address,
    accounts: &[Address],
    title: &str,
) -> Result<DeploymentSummary, ChainError>
where
    F: FnOnce(&Address) -> Result<Arc<dyn VotingContract>, ChainError>,
{
    // Steps 1–2: instantiate and await confirmation. The only fatal step.
    let instantiation = factory.instantiate(title, deployer).await?;

    let record = DeploymentRecord {
        contract_address: instantiation.address.clone(),
        contract_owner: instantiation.owner,
        voting_title: title.to_owned(),
        network: factory.network(),
        deployer_address: deployer.clone(),
        transaction_hash: instantiation.transaction_hash,
        deployed_at: Utc::now(),
    };

    let contract = bind(&instantiation.address)?;

    // Step 3: best-effort seeding.
    let seed_warning = match seed_contract(contract.as_ref(), deployer, accounts).await {
        Ok(()) => None,
        Err(err) => Some(err.to_string()),
    };

    // Step 4: read back counters; degraded output rather than failure.
    let candidate_count = contract.candidate_count().await.ok();
    let total_votes = contract.total_votes().await.ok();
    let voting_active = contract.voting_status().await.ok().map(|w| w.active);

    Ok(DeploymentSummary {
        record,
        candidate_count,
        total_votes,
        voting_active,
        seed_warning,
    })
}

async fn seed_contract(
    contract: &dyn VotingContract,
    deployer: &Address,
    accounts: &[Address],
) -> Result<(), ChainError> {
    for name in SAMPLE_CANDIDATES {
        contract.add_candidate(name, deployer).await?;
    }
    for account in accounts.iter().take(MAX_SAMPLE_VOTERS) {
        contract.register_voter(account, deployer).await?;
    }
    Ok(())
}

/// Write the record as a new JSON file keyed by creation timestamp.
/// Existing files are never overwritten — a collision gets a suffix.
pub fn write_record_at(dir: &Path, record: &DeploymentRecord) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create deployments dir {}", dir.display()))?;

    let stamp = record.deployed_at.timestamp_millis();
    let mut path = dir.join(format!("deployment-{stamp}.json"));
    let mut suffix = 1;
    while path.exists() {
        path = dir.join(format!("deployment-{stamp}-{suffix}.json"));
        suffix += 1;
    }

    let json = serde_json::to_string_pretty(record).context("cannot serialize record")?;
    std::fs::write(&path, json).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(path)
}

fn print_summary(summary: &DeploymentSummary) {
    let record = &summary.record;
    println!("{}", "✓ Contract deployed successfully!".green());
    println!("  Address:  {}", record.contract_address);
    println!("  Owner:    {}", record.contract_owner);
    println!("  Title:    {}", record.voting_title);
    println!("  Network:  {}", record.network);
    println!("  Tx:       {}", record.transaction_hash);

    match &summary.seed_warning {
        None => println!(
            "✓ Seeded {} sample candidates and registered sample voters",
            SAMPLE_CANDIDATES.len()
        ),
        Some(warning) => println!(
            "{} could not finish seeding sample data: {warning}",
            "⚠".yellow()
        ),
    }

    println!(
        "  Candidates: {}  Votes: {}  Voting active: {}",
        display_counter(summary.candidate_count),
        display_counter(summary.total_votes),
        display_counter(summary.voting_active),
    );
}

fn display_counter<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "unavailable".to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
