//! `ballot view` — render the current view set.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use ballot_daemon::{request_view, DaemonError};
use ballot_sync::ViewSet;

/// Arguments for `ballot view`.
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "#")]
    ordinal: u32,
    #[tabled(rename = "candidate")]
    name: String,
    #[tabled(rename = "votes")]
    votes: u64,
}

impl ViewArgs {
    pub fn run(self) -> Result<()> {
        let home: PathBuf = dirs::home_dir().context("could not determine home directory")?;
        let raw = match request_view(&home) {
            Ok(raw) => raw,
            Err(DaemonError::NotRunning { .. }) => {
                return Err(anyhow!(
                    "session daemon is not running; start it with `ballot daemon start`"
                ));
            }
            Err(err) => return Err(err).context("failed to fetch views"),
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&raw).context("failed to render view JSON")?
            );
            return Ok(());
        }

        let views: ViewSet =
            serde_json::from_value(raw).context("session returned an unexpected view shape")?;
        print_views(&views);
        Ok(())
    }
}

fn print_views(views: &ViewSet) {
    match &views.header {
        Some(header) => {
            println!("{}", header.title.bold());
            println!(
                "  Owner: {}  Candidates: {}  Total votes: {}",
                header.owner.short(),
                header.candidate_count,
                header.total_votes
            );
        }
        None => println!("{}", "No contract data yet — waiting for first refresh".dimmed()),
    }

    if let Some(window) = &views.window {
        let label = if window.active {
            window.status_label().green()
        } else {
            window.status_label().red()
        };
        println!("  Voting: {label} — {}", window.countdown());
    }

    match &views.identity {
        Some(identity) => {
            let voter_line = views.voter_ui.label();
            let voter_line = if views.voter_ui.can_vote() {
                voter_line.green()
            } else {
                voter_line.yellow()
            };
            println!("  You: {} — {voter_line}", identity.short());
        }
        None => println!("  You: {}", "no authorized identity (read-only)".dimmed()),
    }

    if views.admin_panel {
        println!(
            "  {}",
            "Admin controls available: add-candidate, register-voter, start-voting, end-voting"
                .cyan()
        );
    }

    if views.candidates.is_empty() {
        println!("\nNo candidates yet.");
    } else {
        let rows: Vec<CandidateRow> = views
            .candidates
            .iter()
            .map(|candidate| CandidateRow {
                ordinal: candidate.ordinal,
                name: candidate.name.clone(),
                votes: candidate.vote_count,
            })
            .collect();
        println!("\n{}", Table::new(rows).with(Style::rounded()));
    }

    if let Some(refreshed) = &views.last_refreshed {
        println!("\nLast refreshed: {}", refreshed.to_rfc3339());
    }
}
