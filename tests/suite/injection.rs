//! The same application component driven by both dispatchers.

use std::sync::Arc;
use std::time::Duration;

use dispatch_config::{RecorderConfig, RuntimeConfig};
use dispatch_runtime::TokioDispatcher;
use dispatch_testing::RecordingDispatcher;

use crate::common::{Uploader, init_tracing};

#[test]
fn upload_is_observable_immediately_with_recorder() {
    init_tracing();
    let recording = Arc::new(RecordingDispatcher::new());
    let uploader = Uploader::new(recording.clone());

    uploader.upload("report.json");

    assert_eq!(uploader.sent(), vec!["report.json"]);
    assert_eq!(uploader.notified(), 1);
    assert_eq!(recording.dispatch_async_calls(), 1);
    assert_eq!(recording.main_invocations().count(), 1);
}

#[test]
fn held_notifications_release_on_replay() {
    let recording = Arc::new(RecordingDispatcher::with_config(&RecorderConfig {
        run_on_main_inline: false,
    }));
    let uploader = Uploader::new(recording.clone());

    uploader.upload("a");
    uploader.upload("b");

    assert_eq!(uploader.sent(), vec!["a", "b"]);
    assert_eq!(uploader.notified(), 0);

    recording.replay_pending_main();
    assert_eq!(uploader.notified(), 2);
}

#[test]
fn retries_wait_for_replay() {
    let recording = Arc::new(RecordingDispatcher::new());
    let uploader = Uploader::new(recording.clone());

    uploader.retry_later("first", Duration::from_secs(30));
    uploader.retry_later("second", Duration::from_secs(1));
    assert!(uploader.sent().is_empty());

    recording.replay_deferred();
    assert_eq!(uploader.sent(), vec!["first", "second"]);
}

#[test]
fn recorder_lets_guarded_setup_run_repeatedly() {
    let recording = Arc::new(RecordingDispatcher::new());
    let uploader = Uploader::new(recording.clone());

    uploader.start();
    uploader.start();

    assert_eq!(uploader.setups(), 2);
}

#[tokio::test]
async fn runtime_dispatcher_enforces_setup_gate() -> anyhow::Result<()> {
    init_tracing();
    let (dispatcher, _main) = TokioDispatcher::current(&RuntimeConfig::default())?;
    let uploader = Uploader::new(Arc::new(dispatcher));

    uploader.start();
    uploader.start();

    assert_eq!(uploader.setups(), 1);
    Ok(())
}

#[tokio::test]
async fn runtime_dispatcher_notifies_through_main_queue() -> anyhow::Result<()> {
    let (dispatcher, mut main) = TokioDispatcher::current(&RuntimeConfig::default())?;
    let uploader = Uploader::new(Arc::new(dispatcher));

    uploader.upload("report.json");

    // The notification is only enqueued once the background send finished.
    assert!(main.run_next().await);
    assert_eq!(uploader.sent(), vec!["report.json"]);
    assert_eq!(uploader.notified(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn runtime_dispatcher_delivers_retry_after_delay() -> anyhow::Result<()> {
    let (dispatcher, mut main) = TokioDispatcher::current(&RuntimeConfig::default())?;
    let uploader = Uploader::new(Arc::new(dispatcher));

    uploader.retry_later("late", Duration::from_secs(5));
    tokio::time::advance(Duration::from_secs(4)).await;
    assert_eq!(main.drain(), 0);
    assert!(uploader.sent().is_empty());

    assert!(main.run_next().await);
    assert_eq!(uploader.sent(), vec!["late"]);
    Ok(())
}
