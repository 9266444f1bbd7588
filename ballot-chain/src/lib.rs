//! Consumed external interfaces of the ballot client.
//!
//! The voting contract lives on an external ledger and is never
//! reimplemented here; this crate defines the seams through which it is
//! consumed:
//! - [`contract`] — [`VotingContract`] / [`ContractFactory`] async traits
//! - [`wallet`] — [`WalletProvider`] and the config-backed [`StaticWallet`]
//! - [`iface`] — the published interface description and [`ContractHandle`]
//! - [`rpc`] — JSON-RPC 2.0 over HTTP binding
//! - [`fake`] — in-memory doubles with call counters and failure injection

pub mod contract;
pub mod error;
pub mod fake;
pub mod iface;
pub mod rpc;
pub mod wallet;

pub use contract::{ContractFactory, Instantiation, VotingContract};
pub use error::ChainError;
pub use iface::{ContractHandle, InterfaceSpec, OperationKind};
pub use rpc::{JsonRpcClient, JsonRpcContract};
pub use wallet::{StaticWallet, WalletError, WalletProvider};
