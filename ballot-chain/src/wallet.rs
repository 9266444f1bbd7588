//! The wallet/connection provider seam.
//!
//! The wallet owns key material and account authorization; the client only
//! asks for accounts and listens for identity changes. A declined
//! authorization is non-fatal — the session degrades to read-only until an
//! identity becomes available.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

use ballot_core::types::Address;

/// Errors surfaced by a wallet provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// No provider is reachable at all — a fatal configuration error.
    #[error("no wallet provider is available")]
    Unavailable,

    /// The user declined account authorization — degrade to read-only.
    #[error("account authorization was declined")]
    Declined,
}

/// Connection to an external wallet.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the user to authorize at least one account.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Currently authorized accounts, in preference order.
    async fn accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Identity-change notification stream. Each event carries the full
    /// new account list; an empty list means the wallet disconnected.
    fn subscribe_accounts(&self) -> broadcast::Receiver<Vec<Address>>;
}

/// Config-backed provider: a fixed account list, no interactive prompt,
/// no identity changes. Suitable for a headless session where the
/// accounts were authorized out of band.
pub struct StaticWallet {
    accounts: Vec<Address>,
    changes: broadcast::Sender<Vec<Address>>,
}

impl StaticWallet {
    pub fn new(accounts: Vec<Address>) -> StaticWallet {
        let (changes, _) = broadcast::channel(8);
        StaticWallet { accounts, changes }
    }
}

#[async_trait]
impl WalletProvider for StaticWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        if self.accounts.is_empty() {
            return Err(WalletError::Declined);
        }
        Ok(self.accounts.clone())
    }

    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.accounts.clone())
    }

    fn subscribe_accounts(&self) -> broadcast::Receiver<Vec<Address>> {
        self.changes.subscribe()
    }
}
