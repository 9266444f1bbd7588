//! Full session round trip: runtime + UI protocol over a real socket.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use ballot_chain::fake::{FakeContract, FakeWallet};
use ballot_core::types::Address;
use ballot_daemon::{
    request_action, request_results, request_status, request_stop, request_view, runtime,
    UiRequest,
};

fn owner() -> Address {
    Address::parse("0xabcdef1234567890abcdef1234567890abcdef12").expect("valid")
}

fn voter() -> Address {
    Address::parse("0x1111111111111111111111111111111111111111").expect("valid")
}

/// Protocol helpers are blocking; hop off the runtime to call them.
async fn blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.expect("blocking join")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn session_round_trip_over_socket() {
    let home = TempDir::new().expect("home");
    let home_path: PathBuf = home.path().to_path_buf();

    let contract = Arc::new(FakeContract::new("Socket Election", owner()));
    let wallet = Arc::new(FakeWallet::new(vec![owner()]));

    let session = tokio::spawn(runtime::run(
        home_path.clone(),
        contract.clone(),
        wallet.clone(),
        runtime::SessionOptions {
            // Keep the timer quiet for the duration of the test.
            refresh_period: Duration::from_secs(3600),
        },
    ));

    // `request_status` retries while the socket comes up.
    let status = {
        let home = home_path.clone();
        blocking(move || request_status(&home)).await.expect("status")
    };
    assert_eq!(status["running"], true);
    assert_eq!(status["refresh_period_secs"], 3600);

    // Write action: validate → submit → reconcile, then observe via view.
    let added = {
        let home = home_path.clone();
        blocking(move || {
            request_action(
                &home,
                &UiRequest {
                    name: Some("Dave".to_owned()),
                    ..UiRequest::bare("add-candidate")
                },
            )
        })
        .await
        .expect("add-candidate")
    };
    assert_eq!(added["message"], "Candidate added successfully!");

    let view = {
        let home = home_path.clone();
        blocking(move || request_view(&home)).await.expect("view")
    };
    assert_eq!(view["header"]["title"], "Socket Election");
    assert_eq!(view["candidates"][0]["name"], "Dave");
    assert_eq!(view["admin_panel"], true);

    // Invalid input is rejected with the validation message and no write.
    let writes_before = contract.write_calls();
    let err = {
        let home = home_path.clone();
        blocking(move || request_action(&home, &UiRequest::bare("cast-vote"))).await
    }
    .expect_err("no selection");
    assert!(err.to_string().contains("Please select a candidate"));
    assert_eq!(contract.write_calls(), writes_before);

    // On-demand results.
    let results = {
        let home = home_path.clone();
        blocking(move || request_results(&home)).await.expect("results")
    };
    assert_eq!(results["winner_name"], "Dave");

    // Identity change flows through the watcher into the views.
    wallet.switch_accounts(vec![voter()]).await;
    let mut identity_seen = false;
    for _ in 0..50 {
        let view = {
            let home = home_path.clone();
            blocking(move || request_view(&home)).await.expect("view")
        };
        if view["identity"] == voter().as_str() {
            identity_seen = true;
            assert_eq!(view["admin_panel"], false, "new identity is not the owner");
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(identity_seen, "identity change never reached the view set");

    // Graceful stop tears the runtime down.
    {
        let home = home_path.clone();
        blocking(move || request_stop(&home)).await.expect("stop");
    }
    session
        .await
        .expect("session join")
        .expect("session runtime exits cleanly");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn declined_authorization_degrades_to_read_only() {
    let home = TempDir::new().expect("home");
    let home_path: PathBuf = home.path().to_path_buf();

    let contract = Arc::new(FakeContract::new("Read Only Election", owner()));
    contract.push_candidate("Alice", 0).await;
    let wallet = Arc::new(FakeWallet::declining());

    let session = tokio::spawn(runtime::run(
        home_path.clone(),
        contract.clone(),
        wallet,
        runtime::SessionOptions {
            refresh_period: Duration::from_secs(3600),
        },
    ));

    let view = {
        let home = home_path.clone();
        // Wait for the socket, then read the views.
        blocking(move || {
            request_status(&home)?;
            request_view(&home)
        })
        .await
        .expect("view")
    };
    assert_eq!(view["candidates"][0]["name"], "Alice", "reads still work");
    assert_eq!(view["identity"], serde_json::Value::Null);

    // Writes are rejected locally — no identity to authorize them.
    let err = {
        let home = home_path.clone();
        blocking(move || request_action(&home, &UiRequest::bare("end-voting"))).await
    }
    .expect_err("read-only session");
    assert!(err.to_string().contains("no authorized identity"));
    assert_eq!(contract.write_calls(), 0);

    {
        let home = home_path.clone();
        blocking(move || request_stop(&home)).await.expect("stop");
    }
    session.await.expect("join").expect("clean exit");
}
