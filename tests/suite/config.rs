//! Building dispatchers from a config file on disk.

use std::fs;
use std::sync::atomic::Ordering;

use dispatch_config::{ConfigError, DispatchConfig};
use dispatch_runtime::TokioDispatcher;
use dispatch_testing::RecordingDispatcher;
use dispatch_types::Dispatch;

use crate::common::counting_task;

#[test]
fn recorder_section_controls_main_queue() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("dispatch.toml");
    fs::write(&path, "[recorder]\nrun_on_main_inline = false\n")?;

    let config = DispatchConfig::load(&path)?.unwrap_or_default();
    let dispatcher = RecordingDispatcher::with_config(&config.recorder());
    let (counter, task) = counting_task();

    dispatcher.dispatch_on_main(task);
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    dispatcher.replay_pending_main();
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn runtime_section_sets_label() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("dispatch.toml");
    fs::write(&path, "[runtime]\nlabel = \"uploads\"\n")?;

    let config = DispatchConfig::load(&path)?.unwrap_or_default();
    let (dispatcher, _main) = TokioDispatcher::current(&config.runtime())?;

    assert_eq!(dispatcher.label(), "uploads");
    Ok(())
}

#[test]
fn missing_file_falls_back_to_inline_main() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = DispatchConfig::load(dir.path().join("missing.toml"))?.unwrap_or_default();
    let dispatcher = RecordingDispatcher::with_config(&config.recorder());
    let (counter, task) = counting_task();

    dispatcher.dispatch_on_main(task);

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn malformed_file_is_a_parse_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("dispatch.toml");
    fs::write(&path, "[runtime\nlabel = 3")?;

    match DispatchConfig::load(&path) {
        Err(err @ ConfigError::Parse { .. }) => assert_eq!(err.path(), path.as_path()),
        other => panic!("expected parse error, got {other:?}"),
    }
    Ok(())
}
