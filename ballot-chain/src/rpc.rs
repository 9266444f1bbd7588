//! JSON-RPC 2.0 binding for the voting contract.
//!
//! The ledger node exposes the published contract operations as
//! `voting_<operation>` methods. The HTTP transport is blocking, so every
//! call hops through `spawn_blocking`; the node's own timeout behavior is
//! relied upon entirely — no local timeout, no retries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use ballot_core::types::{
    Address, CandidateView, ResultsView, TxHash, VoterStatusView, VotingWindowView,
};

use crate::contract::{ContractFactory, Instantiation, VotingContract};
use crate::error::ChainError;
use crate::iface::ContractHandle;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

fn request_body(id: u64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    })
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// One JSON-RPC endpoint. Cheap to clone; the underlying agent pools
/// connections.
#[derive(Clone)]
pub struct JsonRpcClient {
    agent: ureq::Agent,
    endpoint: String,
    next_id: Arc<AtomicU64>,
}

impl JsonRpcClient {
    pub fn new(endpoint: impl Into<String>) -> JsonRpcClient {
        JsonRpcClient {
            agent: ureq::agent(),
            endpoint: endpoint.into(),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue one JSON-RPC call and return its `result` value.
    ///
    /// A JSON-RPC error object maps to [`ChainError::Rejected`] with the
    /// remote message text intact — that text is what the UI surfaces.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        let agent = self.agent.clone();
        let endpoint = self.endpoint.clone();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = request_body(id, method, params);
        let method_name = method.to_owned();

        let response = tokio::task::spawn_blocking(move || -> Result<RpcResponse, ChainError> {
            let http = agent
                .post(&endpoint)
                .send_json(body)
                .map_err(|e| ChainError::Transport {
                    method: method_name.clone(),
                    message: e.to_string(),
                })?;
            http.into_json::<RpcResponse>()
                .map_err(|e| ChainError::MalformedResponse {
                    method: method_name.clone(),
                    message: e.to_string(),
                })
        })
        .await
        .map_err(|e| ChainError::Transport {
            method: method.to_owned(),
            message: format!("call task join failure: {e}"),
        })??;

        if let Some(err) = response.error {
            return Err(ChainError::Rejected {
                method: method.to_owned(),
                code: err.code,
                message: err.message,
            });
        }
        Ok(response.result.unwrap_or(Value::Null))
    }
}

fn decode<T: DeserializeOwned>(method: &str, value: Value) -> Result<T, ChainError> {
    serde_json::from_value(value).map_err(|e| ChainError::MalformedResponse {
        method: method.to_owned(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Wire shapes — field names follow the contract's published outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidateWire {
    name: String,
    vote_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VotingStatusWire {
    active: bool,
    start_time: u64,
    end_time: u64,
    current_time: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VoterInfoWire {
    is_registered: bool,
    has_voted: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultsWire {
    winner_name: String,
    winner_votes: u64,
    total_votes_cast: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstantiationWire {
    address: Address,
    owner: Address,
    transaction_hash: String,
}

// ---------------------------------------------------------------------------
// Bound contract
// ---------------------------------------------------------------------------

/// A [`VotingContract`] implementation over a bound handle.
pub struct JsonRpcContract {
    client: JsonRpcClient,
    handle: ContractHandle,
}

impl JsonRpcContract {
    pub fn new(client: JsonRpcClient, handle: ContractHandle) -> JsonRpcContract {
        JsonRpcContract { client, handle }
    }

    pub fn handle(&self) -> &ContractHandle {
        &self.handle
    }

    async fn dispatch(
        &self,
        operation: &str,
        args: Value,
        from: Option<&Address>,
    ) -> Result<Value, ChainError> {
        if !self.handle.interface.supports(operation) {
            return Err(ChainError::UnsupportedOperation(operation.to_owned()));
        }
        let params = json!({
            "contract": self.handle.address,
            "args": args,
            "from": from,
        });
        self.client
            .call(&format!("voting_{operation}"), params)
            .await
    }

    async fn write(&self, operation: &str, args: Value, from: &Address) -> Result<TxHash, ChainError> {
        let value = self.dispatch(operation, args, Some(from)).await?;
        let hash: String = decode(operation, value)?;
        Ok(TxHash(hash))
    }
}

#[async_trait]
impl VotingContract for JsonRpcContract {
    async fn title(&self) -> Result<String, ChainError> {
        let value = self.dispatch("votingTitle", json!([]), None).await?;
        decode("votingTitle", value)
    }

    async fn candidate_count(&self) -> Result<u32, ChainError> {
        let value = self.dispatch("candidateCount", json!([]), None).await?;
        decode("candidateCount", value)
    }

    async fn total_votes(&self) -> Result<u64, ChainError> {
        let value = self.dispatch("totalVotes", json!([]), None).await?;
        decode("totalVotes", value)
    }

    async fn owner(&self) -> Result<Address, ChainError> {
        let value = self.dispatch("owner", json!([]), None).await?;
        decode("owner", value)
    }

    async fn candidate(&self, ordinal: u32) -> Result<CandidateView, ChainError> {
        let value = self.dispatch("getCandidate", json!([ordinal]), None).await?;
        let wire: CandidateWire = decode("getCandidate", value)?;
        Ok(CandidateView {
            ordinal,
            name: wire.name,
            vote_count: wire.vote_count,
        })
    }

    async fn voting_status(&self) -> Result<VotingWindowView, ChainError> {
        let value = self.dispatch("getVotingStatus", json!([]), None).await?;
        let wire: VotingStatusWire = decode("getVotingStatus", value)?;
        Ok(VotingWindowView {
            active: wire.active,
            start_time: wire.start_time,
            end_time: wire.end_time,
            server_time: wire.current_time,
        })
    }

    async fn voter_info(&self, voter: &Address) -> Result<VoterStatusView, ChainError> {
        let value = self.dispatch("getVoterInfo", json!([voter]), None).await?;
        let wire: VoterInfoWire = decode("getVoterInfo", value)?;
        Ok(VoterStatusView {
            is_registered: wire.is_registered,
            has_voted: wire.has_voted,
        })
    }

    async fn results(&self) -> Result<ResultsView, ChainError> {
        let value = self.dispatch("getResults", json!([]), None).await?;
        let wire: ResultsWire = decode("getResults", value)?;
        Ok(ResultsView {
            winner_name: wire.winner_name,
            winner_votes: wire.winner_votes,
            total_votes: wire.total_votes_cast,
        })
    }

    async fn add_candidate(&self, name: &str, from: &Address) -> Result<TxHash, ChainError> {
        self.write("addCandidate", json!([name]), from).await
    }

    async fn register_voter(&self, voter: &Address, from: &Address) -> Result<TxHash, ChainError> {
        self.write("registerVoter", json!([voter]), from).await
    }

    async fn start_voting(
        &self,
        duration_minutes: u64,
        from: &Address,
    ) -> Result<TxHash, ChainError> {
        self.write("startVoting", json!([duration_minutes]), from)
            .await
    }

    async fn end_voting(&self, from: &Address) -> Result<TxHash, ChainError> {
        self.write("endVoting", json!([]), from).await
    }

    async fn cast_vote(&self, ordinal: u32, from: &Address) -> Result<TxHash, ChainError> {
        self.write("castVote", json!([ordinal]), from).await
    }
}

/// Instantiation goes straight through the client: there is no bound
/// handle yet while the contract is being deployed.
#[async_trait]
impl ContractFactory for JsonRpcClient {
    async fn instantiate(&self, title: &str, from: &Address) -> Result<Instantiation, ChainError> {
        let params = json!({ "args": [title], "from": from });
        let value = self.call("voting_deploy", params).await?;
        let wire: InstantiationWire = decode("deploy", value)?;
        Ok(Instantiation {
            address: wire.address,
            owner: wire.owner,
            transaction_hash: TxHash(wire.transaction_hash),
        })
    }

    fn network(&self) -> String {
        self.endpoint.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
