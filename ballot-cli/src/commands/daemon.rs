//! `ballot daemon` — session runtime lifecycle.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Subcommand;

use ballot_chain::{
    ChainError, ContractHandle, InterfaceSpec, JsonRpcClient, JsonRpcContract, StaticWallet,
};
use ballot_core::config;
use ballot_daemon::paths::socket_path_at;
use ballot_daemon::{request_status, request_stop, runtime, DaemonError};

#[derive(Subcommand, Debug)]
pub enum DaemonCommand {
    /// Run the session daemon in the foreground.
    Start,
    /// Request graceful shutdown over the session socket.
    Stop,
    /// Query session liveness over the socket.
    Status,
}

pub fn run(command: DaemonCommand) -> Result<()> {
    let home = dirs::home_dir().context("could not determine home directory")?;

    match command {
        DaemonCommand::Start => {
            let config = config::load_at(&home)
                .context("the session needs a client config — run `ballot init` first")?;

            // Binding refuses the zero sentinel outright: there is no UI to
            // serve without a deployed contract to read from.
            let handle =
                match ContractHandle::bind(config.contract_address, InterfaceSpec::voting_v1()) {
                    Ok(handle) => handle,
                    Err(err @ ChainError::ZeroAddress) => {
                        eprintln!("⚠ Configuration required");
                        eprintln!(
                            "  Set `contract_address` in ~/.ballot/config.yaml to your deployed \
                             contract address (see `ballot deploy`)."
                        );
                        return Err(err).context("cannot start session");
                    }
                    Err(err) => return Err(err).context("cannot bind contract handle"),
                };

            let client = JsonRpcClient::new(config.endpoint);
            let contract = Arc::new(JsonRpcContract::new(client, handle));
            let wallet = Arc::new(StaticWallet::new(config.accounts));
            let options = runtime::SessionOptions {
                refresh_period: Duration::from_secs(config.refresh_secs),
            };

            runtime::start_blocking(&home, contract, wallet, options)
                .context("session daemon exited with error")?;
        }
        DaemonCommand::Stop => match request_stop(&home) {
            Ok(()) => println!("session stop requested"),
            Err(DaemonError::NotRunning { .. }) => {
                println!("session daemon is not running");
            }
            Err(err) => return Err(err).context("failed to stop session daemon"),
        },
        DaemonCommand::Status => match request_status(&home) {
            Ok(status) => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&status)
                        .context("failed to render session status JSON")?
                );
            }
            Err(DaemonError::NotRunning { .. }) => {
                let payload = serde_json::json!({
                    "running": false,
                    "socket": socket_path_at(&home).display().to_string(),
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&payload)
                        .context("failed to render session status JSON")?
                );
            }
            Err(err) => return Err(err).context("failed to query session status"),
        },
    }

    Ok(())
}
