//! `ballot init` — write the client configuration.

use anyhow::{bail, Context, Result};
use clap::Args;

use ballot_core::config::{self, ClientConfig, DEFAULT_REFRESH_SECS};
use ballot_core::types::Address;

/// Write `~/.ballot/config.yaml`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// RPC endpoint URL of the ledger node.
    #[arg(long)]
    pub endpoint: String,

    /// Address of the deployed voting contract.
    #[arg(long)]
    pub contract: String,

    /// Wallet account to authorize, in preference order. Repeatable.
    #[arg(long = "account")]
    pub accounts: Vec<String>,

    /// Reconciliation period in seconds.
    #[arg(long, default_value_t = DEFAULT_REFRESH_SECS)]
    pub refresh_secs: u64,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let contract_address = match Address::parse(&self.contract) {
            Some(address) => address,
            None => bail!("'{}' is not a well-formed ledger address", self.contract),
        };
        if contract_address.is_zero() {
            bail!("the zero address is a placeholder, not a deployed contract; run `ballot deploy` first");
        }

        let mut accounts = Vec::with_capacity(self.accounts.len());
        for raw in &self.accounts {
            match Address::parse(raw) {
                Some(address) => accounts.push(address),
                None => bail!("account '{raw}' is not a well-formed ledger address"),
            }
        }

        let config = ClientConfig {
            endpoint: self.endpoint,
            contract_address,
            accounts,
            refresh_secs: self.refresh_secs,
        };
        config::save(&config).context("failed to save client config")?;

        println!("✓ Client configured for contract {}", config.contract_address.short());
        println!("  Saved to: ~/.ballot/config.yaml");
        Ok(())
    }
}
