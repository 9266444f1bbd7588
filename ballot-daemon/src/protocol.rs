//! UI command protocol: newline-delimited JSON over the session socket.
//!
//! Requests map 1:1 to the write actions plus `view`, `results`,
//! `refresh`, `status`, and `stop`. The client side here is blocking —
//! it is used from the CLI, outside the daemon's runtime.

use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::thread::sleep;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{io_err, DaemonError};
use crate::paths::socket_path_at;

/// JSON newline-delimited request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiRequest {
    pub cmd: String,
    /// Candidate name (`add-candidate`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Voter address (`register-voter`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Voting duration (`start-voting`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u64>,
    /// Selected candidate ordinal (`cast-vote`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<u32>,
}

impl UiRequest {
    pub fn bare(cmd: &str) -> UiRequest {
        UiRequest {
            cmd: cmd.to_owned(),
            name: None,
            address: None,
            duration_minutes: None,
            candidate: None,
        }
    }
}

/// JSON newline-delimited response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UiResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Send one JSON request to the session socket and return one response.
pub fn send_request(home: &Path, request: &UiRequest) -> Result<UiResponse, DaemonError> {
    let socket = socket_path_at(home);
    if !socket.exists() {
        return Err(DaemonError::NotRunning { socket });
    }

    let mut stream = UnixStream::connect(&socket).map_err(|err| {
        if matches!(
            err.kind(),
            std::io::ErrorKind::NotFound
                | std::io::ErrorKind::ConnectionRefused
                | std::io::ErrorKind::ConnectionReset
        ) {
            DaemonError::NotRunning {
                socket: socket.clone(),
            }
        } else {
            io_err(&socket, err)
        }
    })?;

    let payload = serde_json::to_string(request)?;
    stream
        .write_all(payload.as_bytes())
        .map_err(|e| io_err(&socket, e))?;
    stream.write_all(b"\n").map_err(|e| io_err(&socket, e))?;
    stream.flush().map_err(|e| io_err(&socket, e))?;

    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    let read = reader.read_line(&mut line).map_err(|e| io_err(&socket, e))?;
    if read == 0 {
        return Err(DaemonError::Protocol(
            "session daemon closed connection before responding".to_string(),
        ));
    }

    let response: UiResponse = serde_json::from_str(line.trim_end())?;
    Ok(response)
}

/// Liveness query; retries briefly so `daemon start` followed by `status`
/// does not race socket creation.
pub fn request_status(home: &Path) -> Result<Value, DaemonError> {
    let request = UiRequest::bare("status");

    let mut last_not_running: Option<DaemonError> = None;
    for attempt in 0..5 {
        match send_request(home, &request) {
            Ok(response) => return response_into_data(response),
            Err(err @ DaemonError::NotRunning { .. }) => {
                last_not_running = Some(err);
                if attempt < 4 {
                    sleep(Duration::from_millis(100));
                    continue;
                }
            }
            Err(err) => return Err(err),
        }
    }

    Err(last_not_running.unwrap_or_else(|| {
        DaemonError::Protocol("status retry loop exited unexpectedly".to_string())
    }))
}

pub fn request_stop(home: &Path) -> Result<(), DaemonError> {
    let response = send_request(home, &UiRequest::bare("stop"))?;
    response_into_data(response).map(|_| ())
}

/// Current view set, as last reconciled.
pub fn request_view(home: &Path) -> Result<Value, DaemonError> {
    let response = send_request(home, &UiRequest::bare("view"))?;
    response_into_data(response)
}

/// Manual reconciliation; returns the refreshed view set.
pub fn request_refresh(home: &Path) -> Result<Value, DaemonError> {
    let response = send_request(home, &UiRequest::bare("refresh"))?;
    response_into_data(response)
}

/// On-demand results read.
pub fn request_results(home: &Path) -> Result<Value, DaemonError> {
    let response = send_request(home, &UiRequest::bare("results"))?;
    response_into_data(response)
}

/// One write action; the returned value carries the transient status
/// message and the confirmation hash.
pub fn request_action(home: &Path, request: &UiRequest) -> Result<Value, DaemonError> {
    let response = send_request(home, request)?;
    response_into_data(response)
}

fn response_into_data(response: UiResponse) -> Result<Value, DaemonError> {
    if response.ok {
        Ok(response.data.unwrap_or(Value::Null))
    } else {
        Err(DaemonError::Protocol(
            response
                .error
                .unwrap_or_else(|| "unknown session error".to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_request_serializes_without_optional_fields() {
        let json = serde_json::to_string(&UiRequest::bare("view")).expect("serialize");
        assert_eq!(json, r#"{"cmd":"view"}"#);
    }

    #[test]
    fn action_request_carries_its_field() {
        let request = UiRequest {
            candidate: Some(2),
            ..UiRequest::bare("cast-vote")
        };
        let json = serde_json::to_string(&request).expect("serialize");
        assert_eq!(json, r#"{"cmd":"cast-vote","candidate":2}"#);
    }

    #[test]
    fn error_response_roundtrip() {
        let response = UiResponse::error("Please select a candidate");
        let json = serde_json::to_string(&response).expect("serialize");
        let back: UiResponse = serde_json::from_str(&json).expect("deserialize");
        assert!(!back.ok);
        assert_eq!(back.error.as_deref(), Some("Please select a candidate"));
    }
}
