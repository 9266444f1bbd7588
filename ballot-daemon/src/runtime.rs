//! Session runtime.
//!
//! One processor task owns the [`Synchronizer`] and is the only writer of
//! the view set; every reconciliation and write action — whether from the
//! refresh timer, the wallet identity stream, or the UI socket — is a job
//! on one queue. Overlapping refresh requests therefore serialize instead
//! of racing.

use std::fs;
use std::io::ErrorKind;
use std::os::unix::net::UnixStream as StdUnixStream;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::unix::OwnedWriteHalf;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{broadcast, mpsc, oneshot};

use ballot_chain::{VotingContract, WalletError, WalletProvider};
use ballot_core::config::DEFAULT_REFRESH_SECS;
use ballot_core::types::Address;
use ballot_sync::Synchronizer;

use crate::error::{io_err, DaemonError};
use crate::paths::{run_dir_at, socket_path_at};
use crate::protocol::{UiRequest, UiResponse};

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Period of the reconciliation timer.
    pub refresh_period: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            refresh_period: Duration::from_secs(DEFAULT_REFRESH_SECS),
        }
    }
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum ActionRequest {
    AddCandidate { name: String },
    RegisterVoter { address: String },
    StartVoting { minutes: u64 },
    EndVoting,
    CastVote { candidate: Option<u32> },
}

#[derive(Debug, Clone)]
enum JobKind {
    Reconcile { source: &'static str },
    Action(ActionRequest),
    Results,
    View,
    SetIdentity(Option<Address>),
}

struct SessionJob {
    kind: JobKind,
    respond_to: Option<oneshot::Sender<Result<Value, String>>>,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Start the session runtime and block the current thread until it exits.
pub fn start_blocking(
    home: &Path,
    contract: Arc<dyn VotingContract>,
    wallet: Arc<dyn WalletProvider>,
    options: SessionOptions,
) -> Result<(), DaemonError> {
    init_tracing();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime.block_on(run(home.to_path_buf(), contract, wallet, options))
}

/// Run the session runtime.
///
/// The contract must already be bound to a non-zero address — binding (and
/// the zero-address refusal) happens before the runtime is constructed, so
/// no call can be attempted against an unconfigured target.
pub async fn run(
    home: PathBuf,
    contract: Arc<dyn VotingContract>,
    wallet: Arc<dyn WalletProvider>,
    options: SessionOptions,
) -> Result<(), DaemonError> {
    ensure_runtime_dirs(&home)?;
    let started_at_unix = unix_seconds_now();

    // Connection first: without a provider there is nothing to talk
    // through, and no contract interaction may be attempted at all.
    let known_accounts = wallet.accounts().await?;

    // Authorization: a decline degrades to read-only, it does not abort.
    let authorized = match wallet.request_accounts().await {
        Ok(accounts) => accounts,
        Err(WalletError::Declined) => {
            tracing::warn!("account authorization declined; continuing read-only");
            Vec::new()
        }
        Err(err @ WalletError::Unavailable) => return Err(err.into()),
    };

    let identity = authorized
        .first()
        .or_else(|| known_accounts.first())
        .cloned();
    match &identity {
        Some(address) => tracing::info!(identity = %address.short(), "active identity resolved"),
        None => tracing::warn!("no authorized identity; write actions will be rejected"),
    }

    let mut synchronizer = Synchronizer::new(contract);
    synchronizer.set_identity(identity);

    let (sync_tx, sync_rx) = mpsc::channel::<SessionJob>(64);
    let (shutdown_tx, _) = broadcast::channel::<()>(16);

    let processor_handle = {
        let shutdown = shutdown_tx.clone();
        tokio::spawn(async move {
            let result = session_processor_task(synchronizer, sync_rx, shutdown.subscribe()).await;
            let _ = shutdown.send(());
            result
        })
    };

    let socket_handle = {
        let shutdown = shutdown_tx.clone();
        let home = home.clone();
        let sync_tx = sync_tx.clone();
        tokio::spawn(async move {
            let result = socket_server_task(
                home,
                sync_tx,
                shutdown.clone(),
                shutdown.subscribe(),
                started_at_unix,
                options.refresh_period,
            )
            .await;
            let _ = shutdown.send(());
            result
        })
    };

    let watcher_handle = {
        let shutdown = shutdown_tx.clone();
        let sync_tx = sync_tx.clone();
        let wallet = wallet.clone();
        tokio::spawn(async move {
            let result = identity_watcher_task(wallet, sync_tx, shutdown.subscribe()).await;
            let _ = shutdown.send(());
            result
        })
    };

    // Initial reconciliation completes (or fails visibly) before the
    // periodic timer starts.
    match enqueue(&sync_tx, JobKind::Reconcile { source: "startup" }).await {
        Ok(_) => tracing::info!("initial reconciliation complete"),
        Err(err) => tracing::warn!("initial reconciliation failed: {err}"),
    }

    let timer_handle = {
        let shutdown = shutdown_tx.clone();
        let sync_tx = sync_tx.clone();
        tokio::spawn(async move {
            let result =
                refresh_timer_task(options.refresh_period, sync_tx, shutdown.subscribe()).await;
            let _ = shutdown.send(());
            result
        })
    };

    let signal_handle = {
        let shutdown = shutdown_tx.clone();
        tokio::spawn(async move {
            let mut shutdown_rx = shutdown.subscribe();
            tokio::select! {
                _ = shutdown_rx.recv() => Ok(()),
                signal = tokio::signal::ctrl_c() => {
                    match signal {
                        Ok(()) => {
                            tracing::info!("received ctrl-c, shutting down session");
                            let _ = shutdown.send(());
                            Ok(())
                        }
                        Err(err) => Err(DaemonError::Protocol(format!("ctrl-c handler failed: {err}"))),
                    }
                }
            }
        })
    };

    let (processor_result, socket_result, watcher_result, timer_result, signal_result) = tokio::join!(
        processor_handle,
        socket_handle,
        watcher_handle,
        timer_handle,
        signal_handle
    );

    handle_join("session_processor", processor_result)?;
    handle_join("socket_server", socket_result)?;
    handle_join("identity_watcher", watcher_result)?;
    handle_join("refresh_timer", timer_result)?;
    handle_join("signal_handler", signal_result)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Processor — the single writer of the view set
// ---------------------------------------------------------------------------

async fn session_processor_task(
    mut synchronizer: Synchronizer,
    mut sync_rx: mpsc::Receiver<SessionJob>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), DaemonError> {
    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            maybe_job = sync_rx.recv() => {
                let Some(job) = maybe_job else { break };
                let outcome = execute_job(&mut synchronizer, job.kind).await;
                match job.respond_to {
                    Some(respond_to) => {
                        let _ = respond_to.send(outcome);
                    }
                    None => {
                        if let Err(err) = outcome {
                            tracing::warn!("background job failed: {err}");
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

async fn execute_job(synchronizer: &mut Synchronizer, kind: JobKind) -> Result<Value, String> {
    match kind {
        JobKind::Reconcile { source } => match synchronizer.reconcile().await {
            Ok(()) => {
                tracing::debug!("{source} reconciliation complete");
                serde_json::to_value(synchronizer.views()).map_err(|e| e.to_string())
            }
            Err(err) => Err(err.to_string()),
        },
        JobKind::View => serde_json::to_value(synchronizer.views()).map_err(|e| e.to_string()),
        JobKind::Results => match synchronizer.results().await {
            Ok(results) => serde_json::to_value(results).map_err(|e| e.to_string()),
            Err(err) => Err(err.to_string()),
        },
        JobKind::SetIdentity(identity) => {
            match &identity {
                Some(address) => tracing::info!(
                    "wallet identity changed to {}",
                    address.short()
                ),
                None => tracing::warn!("wallet disconnected all accounts"),
            }
            synchronizer.set_identity(identity);
            if let Err(err) = synchronizer.reconcile().await {
                tracing::warn!("post-identity-change reconciliation failed: {err}");
            }
            serde_json::to_value(synchronizer.views()).map_err(|e| e.to_string())
        }
        JobKind::Action(action) => {
            let outcome = match action {
                ActionRequest::AddCandidate { name } => synchronizer.add_candidate(&name).await,
                ActionRequest::RegisterVoter { address } => {
                    synchronizer.register_voter(&address).await
                }
                ActionRequest::StartVoting { minutes } => synchronizer.start_voting(minutes).await,
                ActionRequest::EndVoting => synchronizer.end_voting().await,
                ActionRequest::CastVote { candidate } => synchronizer.cast_vote(candidate).await,
            };
            match outcome {
                Ok(report) => Ok(json!({
                    "message": report.message,
                    "transaction_hash": report.transaction_hash,
                })),
                Err(err) => Err(err.to_string()),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Timer and identity watcher
// ---------------------------------------------------------------------------

async fn refresh_timer_task(
    period: Duration,
    sync_tx: mpsc::Sender<SessionJob>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), DaemonError> {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    interval.tick().await; // consume the immediate tick; startup reconciliation is explicit

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            _ = interval.tick() => {
                match enqueue(&sync_tx, JobKind::Reconcile { source: "timer" }).await {
                    Ok(_) => tracing::debug!("timer reconciliation complete"),
                    Err(err) => tracing::warn!("timer reconciliation failed: {err}"),
                }
            }
        }
    }
    Ok(())
}

async fn identity_watcher_task(
    wallet: Arc<dyn WalletProvider>,
    sync_tx: mpsc::Sender<SessionJob>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), DaemonError> {
    let mut changes = wallet.subscribe_accounts();
    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            event = changes.recv() => {
                match event {
                    Ok(accounts) => {
                        let identity = accounts.first().cloned();
                        if let Err(err) =
                            enqueue(&sync_tx, JobKind::SetIdentity(identity)).await
                        {
                            tracing::warn!("identity change handling failed: {err}");
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Only the latest account list matters; skipped
                        // intermediates are fine.
                        tracing::warn!("identity stream lagged, skipped {skipped} event(s)");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Socket server — the UI input surface
// ---------------------------------------------------------------------------

async fn socket_server_task(
    home: PathBuf,
    sync_tx: mpsc::Sender<SessionJob>,
    shutdown_tx: broadcast::Sender<()>,
    mut shutdown_rx: broadcast::Receiver<()>,
    started_at_unix: u64,
    refresh_period: Duration,
) -> Result<(), DaemonError> {
    let socket = socket_path_at(&home);
    prepare_socket_for_bind(&socket)?;

    let listener = UnixListener::bind(&socket).map_err(|e| io_err(&socket, e))?;
    set_socket_permissions(&socket)?;

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            accepted = listener.accept() => {
                let (stream, _) = accepted.map_err(|e| io_err(&socket, e))?;
                let socket_path = socket.clone();
                let sync_tx = sync_tx.clone();
                let shutdown_tx = shutdown_tx.clone();
                tokio::spawn(async move {
                    if let Err(err) = handle_socket_client(
                        stream,
                        sync_tx,
                        shutdown_tx,
                        started_at_unix,
                        refresh_period,
                        socket_path,
                    ).await {
                        tracing::error!("socket client error: {err}");
                    }
                });
            }
        }
    }

    if socket.exists() {
        let _ = fs::remove_file(&socket);
    }
    Ok(())
}

async fn handle_socket_client(
    stream: UnixStream,
    sync_tx: mpsc::Sender<SessionJob>,
    shutdown_tx: broadcast::Sender<()>,
    started_at_unix: u64,
    refresh_period: Duration,
    socket: PathBuf,
) -> Result<(), DaemonError> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| io_err("session socket read", e))?
    {
        if line.trim().is_empty() {
            continue;
        }

        let request: Result<UiRequest, _> = serde_json::from_str(&line);
        let request = match request {
            Ok(request) => request,
            Err(err) => {
                write_response(
                    &mut writer,
                    &UiResponse::error(format!("invalid request JSON: {err}")),
                )
                .await?;
                continue;
            }
        };

        let cmd = request.cmd.clone();
        let response = match cmd.as_str() {
            "status" => UiResponse::ok(json!({
                "running": true,
                "started_at_unix": started_at_unix,
                "refresh_period_secs": refresh_period.as_secs(),
                "socket": socket.display().to_string(),
            })),
            "stop" => {
                let _ = shutdown_tx.send(());
                UiResponse::ok(json!({ "stopping": true }))
            }
            _ => match request_into_job(request) {
                Ok(kind) => match enqueue(&sync_tx, kind).await {
                    Ok(data) => UiResponse::ok(data),
                    Err(err) => UiResponse::error(err.to_string()),
                },
                Err(message) => UiResponse::error(message),
            },
        };

        write_response(&mut writer, &response).await?;
        if cmd == "stop" {
            break;
        }
    }

    Ok(())
}

/// Map a UI request onto a processor job. Missing action fields fall
/// through to the synchronizer's own input validation so the user sees the
/// same message a blank form field would produce.
fn request_into_job(request: UiRequest) -> Result<JobKind, String> {
    match request.cmd.as_str() {
        "view" => Ok(JobKind::View),
        "refresh" => Ok(JobKind::Reconcile { source: "manual" }),
        "results" => Ok(JobKind::Results),
        "add-candidate" => Ok(JobKind::Action(ActionRequest::AddCandidate {
            name: request.name.unwrap_or_default(),
        })),
        "register-voter" => Ok(JobKind::Action(ActionRequest::RegisterVoter {
            address: request.address.unwrap_or_default(),
        })),
        "start-voting" => Ok(JobKind::Action(ActionRequest::StartVoting {
            minutes: request.duration_minutes.unwrap_or(0),
        })),
        "end-voting" => Ok(JobKind::Action(ActionRequest::EndVoting)),
        "cast-vote" => Ok(JobKind::Action(ActionRequest::CastVote {
            candidate: request.candidate,
        })),
        other => Err(format!("unknown command '{other}'")),
    }
}

// ---------------------------------------------------------------------------
// Plumbing
// ---------------------------------------------------------------------------

async fn enqueue(
    sync_tx: &mpsc::Sender<SessionJob>,
    kind: JobKind,
) -> Result<Value, DaemonError> {
    let (tx, rx) = oneshot::channel();
    sync_tx
        .send(SessionJob {
            kind,
            respond_to: Some(tx),
        })
        .await
        .map_err(|_| DaemonError::ChannelClosed("session queue"))?;

    let outcome = rx
        .await
        .map_err(|_| DaemonError::ChannelClosed("session response"))?;
    outcome.map_err(DaemonError::Protocol)
}

fn ensure_runtime_dirs(home: &Path) -> Result<(), DaemonError> {
    let run = run_dir_at(home);
    if !run.exists() {
        fs::create_dir_all(&run).map_err(|e| io_err(&run, e))?;
    }
    Ok(())
}

fn prepare_socket_for_bind(socket: &Path) -> Result<(), DaemonError> {
    if !socket.exists() {
        return Ok(());
    }

    match StdUnixStream::connect(socket) {
        Ok(_) => {
            return Err(DaemonError::Protocol(format!(
                "session socket already in use: {}",
                socket.display()
            )));
        }
        Err(err) => {
            tracing::warn!(
                "removing stale session socket {} before bind: {err}",
                socket.display()
            );
        }
    }

    match fs::remove_file(socket) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(io_err(socket, err)),
    }
}

async fn write_response(
    writer: &mut OwnedWriteHalf,
    response: &UiResponse,
) -> Result<(), DaemonError> {
    let payload = serde_json::to_string(response)?;
    writer
        .write_all(payload.as_bytes())
        .await
        .map_err(|e| io_err("session socket write", e))?;
    writer
        .write_all(b"\n")
        .await
        .map_err(|e| io_err("session socket write", e))?;
    writer
        .flush()
        .await
        .map_err(|e| io_err("session socket flush", e))?;
    Ok(())
}

fn handle_join(
    task: &str,
    result: Result<Result<(), DaemonError>, tokio::task::JoinError>,
) -> Result<(), DaemonError> {
    match result {
        Ok(inner) => inner,
        Err(err) => Err(DaemonError::Protocol(format!(
            "{task} task join failure: {err}"
        ))),
    }
}

fn unix_seconds_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

#[cfg(unix)]
fn set_socket_permissions(path: &Path) -> Result<(), DaemonError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| io_err(path, e))
}

#[cfg(not(unix))]
fn set_socket_permissions(_path: &Path) -> Result<(), DaemonError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ballot_chain::fake::FakeContract;

    use super::*;

    fn owner() -> Address {
        Address::parse("0xabcdef1234567890abcdef1234567890abcdef12").expect("valid")
    }

    fn admin_synchronizer(contract: Arc<FakeContract>) -> Synchronizer {
        let mut synchronizer = Synchronizer::new(contract);
        synchronizer.set_identity(Some(owner()));
        synchronizer
    }

    #[tokio::test]
    async fn action_job_returns_status_message_and_confirmation() {
        let contract = Arc::new(FakeContract::new("Test Election", owner()));
        let mut synchronizer = admin_synchronizer(contract);

        let data = execute_job(
            &mut synchronizer,
            JobKind::Action(ActionRequest::AddCandidate {
                name: "Dave".to_owned(),
            }),
        )
        .await
        .expect("confirmed action");

        assert_eq!(data["message"], "Candidate added successfully!");
        assert!(data["transaction_hash"].is_string());
    }

    #[tokio::test]
    async fn invalid_action_job_reports_validation_message() {
        let contract = Arc::new(FakeContract::new("Test Election", owner()));
        let mut synchronizer = admin_synchronizer(contract.clone());

        let err = execute_job(
            &mut synchronizer,
            JobKind::Action(ActionRequest::AddCandidate {
                name: "  ".to_owned(),
            }),
        )
        .await
        .expect_err("invalid input");

        assert_eq!(err, "Please enter a candidate name");
        assert_eq!(contract.write_calls(), 0, "zero-call invariant");
    }

    #[tokio::test]
    async fn view_job_reflects_reconciled_state() {
        let contract = Arc::new(FakeContract::new("Test Election", owner()));
        contract.push_candidate("Alice", 0).await;
        let mut synchronizer = admin_synchronizer(contract);

        execute_job(&mut synchronizer, JobKind::Reconcile { source: "test" })
            .await
            .expect("batch");
        let view = execute_job(&mut synchronizer, JobKind::View)
            .await
            .expect("view");

        assert_eq!(view["header"]["title"], "Test Election");
        assert_eq!(view["candidates"][0]["name"], "Alice");
        assert_eq!(view["admin_panel"], true);
    }

    #[tokio::test]
    async fn identity_change_job_rederives_views() {
        let contract = Arc::new(FakeContract::new("Test Election", owner()));
        let mut synchronizer = admin_synchronizer(contract);
        execute_job(&mut synchronizer, JobKind::Reconcile { source: "test" })
            .await
            .expect("batch");
        assert!(synchronizer.views().admin_panel);

        let stranger =
            Address::parse("0x2222222222222222222222222222222222222222").expect("valid");
        execute_job(&mut synchronizer, JobKind::SetIdentity(Some(stranger)))
            .await
            .expect("identity change");
        assert!(!synchronizer.views().admin_panel, "panel hidden for non-owner");
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = request_into_job(UiRequest::bare("explode")).expect_err("unknown");
        assert!(err.contains("unknown command"));
    }

    #[test]
    fn missing_action_fields_defer_to_input_validation() {
        let kind = request_into_job(UiRequest::bare("add-candidate")).expect("job");
        match kind {
            JobKind::Action(ActionRequest::AddCandidate { name }) => assert_eq!(name, ""),
            other => panic!("unexpected job {other:?}"),
        }
    }

    #[tokio::test(start_paused = true, flavor = "current_thread")]
    async fn refresh_timer_enqueues_on_schedule() {
        let (sync_tx, mut sync_rx) = mpsc::channel::<SessionJob>(8);
        let (shutdown_tx, _) = broadcast::channel::<()>(1);
        let ticks = Arc::new(AtomicUsize::new(0));

        let counter = ticks.clone();
        tokio::spawn(async move {
            while let Some(job) = sync_rx.recv().await {
                assert!(matches!(job.kind, JobKind::Reconcile { source: "timer" }));
                counter.fetch_add(1, Ordering::SeqCst);
                if let Some(respond_to) = job.respond_to {
                    let _ = respond_to.send(Ok(Value::Null));
                }
            }
        });

        let timer_shutdown = shutdown_tx.subscribe();
        tokio::spawn(refresh_timer_task(
            Duration::from_secs(30),
            sync_tx,
            timer_shutdown,
        ));
        // Let the timer task register its interval before the clock moves.
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        for _ in 0..3 {
            tokio::time::advance(Duration::from_secs(30)).await;
            for _ in 0..4 {
                tokio::task::yield_now().await;
            }
        }

        assert_eq!(ticks.load(Ordering::SeqCst), 3, "one reconciliation per period");
        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn processor_serializes_jobs_in_arrival_order() {
        let contract = Arc::new(FakeContract::new("Test Election", owner()));
        let synchronizer = admin_synchronizer(contract.clone());

        let (sync_tx, sync_rx) = mpsc::channel::<SessionJob>(8);
        let (shutdown_tx, _) = broadcast::channel::<()>(1);
        let handle = tokio::spawn(session_processor_task(
            synchronizer,
            sync_rx,
            shutdown_tx.subscribe(),
        ));

        let first = enqueue(
            &sync_tx,
            JobKind::Action(ActionRequest::AddCandidate {
                name: "Alice".to_owned(),
            }),
        )
        .await
        .expect("first action");
        assert_eq!(first["message"], "Candidate added successfully!");

        let view = enqueue(&sync_tx, JobKind::View).await.expect("view");
        assert_eq!(
            view["candidates"][0]["name"], "Alice",
            "the action's reconciliation landed before the view read"
        );

        let _ = shutdown_tx.send(());
        handle.await.expect("join").expect("processor");
    }
}
