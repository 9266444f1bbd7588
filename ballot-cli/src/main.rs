//! Ballot — voting contract deployment and session client CLI.
//!
//! # Usage
//!
//! ```text
//! ballot init --endpoint <url> --contract <address> [--account <address>]...
//! ballot deploy [--title <title>] [--endpoint <url>]
//! ballot daemon start|stop|status
//! ballot view [--json]
//! ballot add-candidate <name>
//! ballot register-voter <address>
//! ballot start-voting <minutes>
//! ballot end-voting
//! ballot vote <candidate-ordinal>
//! ballot results
//! ballot refresh
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    action::{
        AddCandidateArgs, RegisterVoterArgs, StartVotingArgs, VoteArgs,
    },
    daemon::DaemonCommand,
    deploy::DeployArgs,
    init::InitArgs,
    view::ViewArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "ballot",
    version,
    about = "Deploy and drive a ledger-backed voting contract",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the client configuration (endpoint, contract address, accounts).
    Init(InitArgs),

    /// Instantiate the voting contract and write a deployment record.
    Deploy(DeployArgs),

    /// Manage the session daemon (reconciliation loop + UI socket).
    Daemon {
        #[command(subcommand)]
        command: DaemonCommand,
    },

    /// Show the current view set as last reconciled.
    View(ViewArgs),

    /// Add a candidate (contract owner only).
    AddCandidate(AddCandidateArgs),

    /// Register a voter address (contract owner only).
    RegisterVoter(RegisterVoterArgs),

    /// Open the voting window (contract owner only).
    StartVoting(StartVotingArgs),

    /// Close the voting window (contract owner only).
    EndVoting,

    /// Cast a vote for a candidate by ordinal.
    Vote(VoteArgs),

    /// Fetch the results on demand.
    Results,

    /// Trigger a manual reconciliation.
    Refresh,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Deploy(args) => args.run(),
        Commands::Daemon { command } => commands::daemon::run(command),
        Commands::View(args) => args.run(),
        Commands::AddCandidate(args) => args.run(),
        Commands::RegisterVoter(args) => args.run(),
        Commands::StartVoting(args) => args.run(),
        Commands::EndVoting => commands::action::end_voting(),
        Commands::Vote(args) => args.run(),
        Commands::Results => commands::action::results(),
        Commands::Refresh => commands::action::refresh(),
    }
}
