//! Write-action subcommands, plus `results` and `refresh`.
//!
//! Each maps 1:1 to a session protocol command; the daemon validates,
//! submits, and reconciles. Success prints the transient status message
//! and the confirmation hash.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use serde_json::Value;

use ballot_daemon::{request_action, request_refresh, request_results, DaemonError, UiRequest};

#[derive(Args, Debug)]
pub struct AddCandidateArgs {
    /// Candidate display name.
    pub name: String,
}

impl AddCandidateArgs {
    pub fn run(self) -> Result<()> {
        submit(UiRequest {
            name: Some(self.name),
            ..UiRequest::bare("add-candidate")
        })
    }
}

#[derive(Args, Debug)]
pub struct RegisterVoterArgs {
    /// Ledger address of the voter to register.
    pub address: String,
}

impl RegisterVoterArgs {
    pub fn run(self) -> Result<()> {
        submit(UiRequest {
            address: Some(self.address),
            ..UiRequest::bare("register-voter")
        })
    }
}

#[derive(Args, Debug)]
pub struct StartVotingArgs {
    /// Voting window duration, in minutes.
    pub minutes: u64,
}

impl StartVotingArgs {
    pub fn run(self) -> Result<()> {
        submit(UiRequest {
            duration_minutes: Some(self.minutes),
            ..UiRequest::bare("start-voting")
        })
    }
}

#[derive(Args, Debug)]
pub struct VoteArgs {
    /// 1-based ordinal of the candidate to vote for.
    pub candidate: u32,
}

impl VoteArgs {
    pub fn run(self) -> Result<()> {
        submit(UiRequest {
            candidate: Some(self.candidate),
            ..UiRequest::bare("cast-vote")
        })
    }
}

pub fn end_voting() -> Result<()> {
    submit(UiRequest::bare("end-voting"))
}

pub fn results() -> Result<()> {
    let home = session_home()?;
    let results = request_results(&home).map_err(friendly)?;
    println!("{}", "🏆 Voting Results".bold());
    println!("  Winner:           {}", results["winner_name"].as_str().unwrap_or("?"));
    println!("  Winning votes:    {}", results["winner_votes"]);
    println!("  Total votes cast: {}", results["total_votes"]);
    Ok(())
}

pub fn refresh() -> Result<()> {
    let home = session_home()?;
    let views = request_refresh(&home).map_err(friendly)?;
    println!("{} views reconciled", "✓".green());
    if let Some(refreshed) = views["last_refreshed"].as_str() {
        println!("  Last refreshed: {refreshed}");
    }
    Ok(())
}

fn submit(request: UiRequest) -> Result<()> {
    let home = session_home()?;
    let data: Value = request_action(&home, &request).map_err(friendly)?;
    println!(
        "{} {}",
        "✓".green(),
        data["message"].as_str().unwrap_or("confirmed")
    );
    if let Some(tx) = data["transaction_hash"].as_str() {
        println!("  Tx: {tx}");
    }
    Ok(())
}

fn session_home() -> Result<PathBuf> {
    dirs::home_dir().context("could not determine home directory")
}

/// Turn protocol failures into the transient status message the session
/// reported, without the error-chain noise.
fn friendly(err: DaemonError) -> anyhow::Error {
    match err {
        DaemonError::NotRunning { .. } => {
            anyhow!("session daemon is not running; start it with `ballot daemon start`")
        }
        DaemonError::Protocol(message) => anyhow!("{}", message),
        other => anyhow!(other),
    }
}
