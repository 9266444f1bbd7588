//! The published interface description of the voting contract, and the
//! handle that binds it to a target address.
//!
//! A [`ContractHandle`] is the client's only route to the contract: binding
//! fails outright on the zero-address sentinel, so no call can ever be
//! attempted against an unconfigured target.

use serde::{Deserialize, Serialize};

use ballot_core::types::Address;

use crate::error::ChainError;

/// Whether an operation reads contract state or mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Read,
    Write,
}

/// One callable operation of the published interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSpec {
    pub name: String,
    pub kind: OperationKind,
}

/// The fixed set of operations the deployed voting contract exposes.
/// Cached client-side; the names match the contract's published functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSpec {
    pub name: String,
    pub operations: Vec<OperationSpec>,
}

impl InterfaceSpec {
    /// The v1 voting interface: eight reads, five writes, one constructor.
    pub fn voting_v1() -> InterfaceSpec {
        fn op(name: &str, kind: OperationKind) -> OperationSpec {
            OperationSpec {
                name: name.to_owned(),
                kind,
            }
        }
        InterfaceSpec {
            name: "voting/v1".to_owned(),
            operations: vec![
                op("votingTitle", OperationKind::Read),
                op("candidateCount", OperationKind::Read),
                op("totalVotes", OperationKind::Read),
                op("owner", OperationKind::Read),
                op("getCandidate", OperationKind::Read),
                op("getVotingStatus", OperationKind::Read),
                op("getVoterInfo", OperationKind::Read),
                op("getResults", OperationKind::Read),
                op("deploy", OperationKind::Write),
                op("addCandidate", OperationKind::Write),
                op("registerVoter", OperationKind::Write),
                op("startVoting", OperationKind::Write),
                op("endVoting", OperationKind::Write),
                op("castVote", OperationKind::Write),
            ],
        }
    }

    pub fn supports(&self, operation: &str) -> bool {
        self.operations.iter().any(|op| op.name == operation)
    }

    pub fn kind_of(&self, operation: &str) -> Option<OperationKind> {
        self.operations
            .iter()
            .find(|op| op.name == operation)
            .map(|op| op.kind)
    }
}

/// A fixed interface description bound to a deployed, non-zero address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractHandle {
    pub address: Address,
    pub interface: InterfaceSpec,
}

impl ContractHandle {
    /// Bind the interface to a target address.
    ///
    /// Refuses the zero sentinel — callers must surface this as a
    /// configuration error and render no contract-backed UI at all.
    pub fn bind(address: Address, interface: InterfaceSpec) -> Result<ContractHandle, ChainError> {
        if address.is_zero() {
            return Err(ChainError::ZeroAddress);
        }
        Ok(ContractHandle { address, interface })
    }
}
