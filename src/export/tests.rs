use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::file::FileSaveConfig;
use super::manager::{SubmitManager, SubmitOptions};
use super::remote::RemoteSink;
use super::types::{Submission, SubmitError, SubmitStatus};

/// Records every delivered submission.
#[derive(Default)]
struct RecordingSink {
    deliveries: Mutex<Vec<Submission>>,
}

#[async_trait]
impl RemoteSink for RecordingSink {
    async fn deliver(&self, submission: &Submission) -> Result<(), SubmitError> {
        self.deliveries.lock().await.push(submission.clone());
        Ok(())
    }
}

/// Always fails, simulating an unreachable endpoint.
struct FailingSink;

#[async_trait]
impl RemoteSink for FailingSink {
    async fn deliver(&self, _submission: &Submission) -> Result<(), SubmitError> {
        Err(SubmitError::Remote("simulated outage".to_string()))
    }
}

fn save_config(dir: &std::path::Path) -> FileSaveConfig {
    FileSaveConfig {
        save_directory: dir.to_path_buf(),
        filename_prefix: "sketch".to_string(),
    }
}

fn saved_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect()
}

async fn wait_for_status(manager: &SubmitManager, expected: SubmitStatus) {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if manager.status().await == expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("status never reached");
}

#[tokio::test]
async fn empty_identifier_aborts_before_any_sink() {
    let temp = tempfile::TempDir::new().unwrap();
    let sink = Arc::new(RecordingSink::default());

    let manager = SubmitManager::new(
        &tokio::runtime::Handle::current(),
        SubmitOptions {
            save: save_config(temp.path()),
            remote: Some(sink.clone()),
            require_identifier: true,
        },
    );

    let result = manager.request_submit("   ", b"png".to_vec());
    assert!(matches!(result, Err(SubmitError::MissingIdentifier)));
    assert!(matches!(
        manager.status().await,
        SubmitStatus::ValidationError(_)
    ));

    // Nothing was enqueued; give the worker a moment to prove it.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(saved_files(temp.path()).is_empty());
    assert!(sink.deliveries.lock().await.is_empty());
}

#[tokio::test]
async fn local_save_succeeds_even_when_remote_fails() {
    let temp = tempfile::TempDir::new().unwrap();

    let manager = SubmitManager::new(
        &tokio::runtime::Handle::current(),
        SubmitOptions {
            save: save_config(temp.path()),
            remote: Some(Arc::new(FailingSink)),
            require_identifier: true,
        },
    );

    manager
        .request_submit("user@example.com", b"png-bytes".to_vec())
        .unwrap();
    wait_for_status(&manager, SubmitStatus::Success).await;

    let files = saved_files(temp.path());
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("sketch_"));
    assert!(name.ends_with(".png"));
    assert_eq!(std::fs::read(&files[0]).unwrap(), b"png-bytes");
}

#[tokio::test]
async fn remote_sink_receives_the_submission_body() {
    let temp = tempfile::TempDir::new().unwrap();
    let sink = Arc::new(RecordingSink::default());

    let manager = SubmitManager::new(
        &tokio::runtime::Handle::current(),
        SubmitOptions {
            save: save_config(temp.path()),
            remote: Some(sink.clone()),
            require_identifier: true,
        },
    );

    manager
        .request_submit("user@example.com", b"\x89PNG".to_vec())
        .unwrap();
    wait_for_status(&manager, SubmitStatus::Success).await;

    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if !sink.deliveries.lock().await.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("delivery never arrived");

    let deliveries = sink.deliveries.lock().await;
    assert_eq!(deliveries[0].identifier, "user@example.com");
    assert!(deliveries[0].image_data.starts_with("data:image/png;base64,"));
    assert!(!deliveries[0].timestamp.is_empty());
}

#[tokio::test]
async fn identifier_is_optional_when_not_required() {
    let temp = tempfile::TempDir::new().unwrap();

    let manager = SubmitManager::new(
        &tokio::runtime::Handle::current(),
        SubmitOptions {
            save: save_config(temp.path()),
            remote: None,
            require_identifier: false,
        },
    );

    manager.request_submit("", b"png".to_vec()).unwrap();
    wait_for_status(&manager, SubmitStatus::Success).await;
    assert_eq!(saved_files(temp.path()).len(), 1);
}

#[tokio::test]
async fn reset_returns_status_to_idle() {
    let temp = tempfile::TempDir::new().unwrap();

    let manager = SubmitManager::new(
        &tokio::runtime::Handle::current(),
        SubmitOptions {
            save: save_config(temp.path()),
            remote: None,
            require_identifier: false,
        },
    );

    manager.request_submit("", b"png".to_vec()).unwrap();
    wait_for_status(&manager, SubmitStatus::Success).await;

    manager.reset().await;
    assert_eq!(manager.status().await, SubmitStatus::Idle);
}
