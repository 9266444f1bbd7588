//! Session runtime for the ballot client.
//!
//! Owns the event loop: a single-writer processor task holding the
//! [`ballot_sync::Synchronizer`], a periodic refresh timer, the wallet
//! identity watcher, and the Unix-socket UI protocol.

pub mod error;
pub mod paths;
pub mod protocol;
pub mod runtime;

pub use error::DaemonError;
pub use protocol::{
    request_action, request_refresh, request_results, request_status, request_stop, request_view,
    send_request, UiRequest, UiResponse,
};
pub use runtime::{run, start_blocking, SessionOptions};
