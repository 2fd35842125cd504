//! Submission orchestration: validate, save locally, fire remote delivery.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::sync::{Mutex, mpsc};

use crate::export::{
    file::{self, FileSaveConfig},
    remote::{self, RemoteSink},
    types::{Submission, SubmitError, SubmitStatus},
};

/// A validated submission handed to the background worker.
#[derive(Debug)]
struct SubmitRequest {
    png: Vec<u8>,
    identifier: String,
    timestamp: DateTime<Utc>,
}

/// Everything the submit worker needs; split out so tests can inject a
/// mock remote sink.
pub struct SubmitOptions {
    /// Where and under what name sketches are saved.
    pub save: FileSaveConfig,
    /// Remote destination; `None` means local-only operation.
    pub remote: Option<Arc<dyn RemoteSink>>,
    /// Whether an empty identifier aborts the flow before any I/O.
    pub require_identifier: bool,
}

/// Shared state for managing async submissions.
///
/// Bridges the synchronous UI thread with the async delivery world, in the
/// same shape as an event loop posting work to a runtime: requests go over
/// a channel to a background task, and the shell polls a shared status for
/// its status surface.
#[derive(Clone)]
pub struct SubmitManager {
    /// Channel for sending validated submissions to the worker.
    request_tx: mpsc::UnboundedSender<SubmitRequest>,
    /// Shared status of the current submission flow.
    status: Arc<Mutex<SubmitStatus>>,
    /// Whether submissions without an identifier are rejected.
    require_identifier: bool,
}

impl SubmitManager {
    /// Creates a new submit manager.
    ///
    /// Spawns a background task on the given runtime that saves each
    /// submission locally and then fires remote delivery without awaiting
    /// it. The local result alone drives the shared status.
    pub fn new(runtime_handle: &tokio::runtime::Handle, options: SubmitOptions) -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<SubmitRequest>();
        let status = Arc::new(Mutex::new(SubmitStatus::Idle));

        let status_clone = status.clone();
        let save = options.save;
        let remote_sink = options.remote;

        runtime_handle.spawn(async move {
            while let Some(request) = request_rx.recv().await {
                log::debug!("Processing submission ({} bytes)", request.png.len());

                let filename =
                    file::generate_filename(&save.filename_prefix, &request.timestamp);

                match file::save_sketch(&request.png, &save, &filename) {
                    Ok(path) => {
                        log::info!("Sketch saved: {}", path.display());
                        *status_clone.lock().await = SubmitStatus::Success;
                    }
                    Err(err) => {
                        log::error!("Failed to save sketch: {err}");
                        *status_clone.lock().await = SubmitStatus::Failed(err.to_string());
                        // Without the local file there is nothing worth
                        // delivering remotely either.
                        continue;
                    }
                }

                if let Some(sink) = remote_sink.clone() {
                    let submission = Submission {
                        identifier: request.identifier,
                        image_data: remote::png_data_url(&request.png),
                        timestamp: request
                            .timestamp
                            .to_rfc3339_opts(SecondsFormat::Millis, true),
                    };

                    // Fire-and-forget: the Success status above was already
                    // set and never waits on this task.
                    tokio::spawn(async move {
                        match sink.deliver(&submission).await {
                            Ok(()) => log::debug!("Submission delivered"),
                            Err(err) => log::error!("Remote delivery failed (ignored): {err}"),
                        }
                    });
                }
            }
        });

        Self {
            request_tx,
            status,
            require_identifier: options.require_identifier,
        }
    }

    /// Validates and enqueues a submission. Non-blocking.
    ///
    /// The PNG payload is a point-in-time capture taken by the caller; this
    /// method never touches the surface. When an identifier is required and
    /// missing, the flow aborts before any filesystem or network I/O and
    /// the status surface shows a validation error.
    pub fn request_submit(&self, identifier: &str, png: Vec<u8>) -> Result<(), SubmitError> {
        let identifier = identifier.trim();

        if self.require_identifier && identifier.is_empty() {
            let err = SubmitError::MissingIdentifier;
            log::warn!("Submission rejected: {err}");
            self.set_status(SubmitStatus::ValidationError(err.to_string()));
            return Err(SubmitError::MissingIdentifier);
        }

        self.set_status(SubmitStatus::InProgress);

        self.request_tx
            .send(SubmitRequest {
                png,
                identifier: identifier.to_string(),
                timestamp: Utc::now(),
            })
            .map_err(|_| SubmitError::WorkerGone)
    }

    /// Gets the current submission status.
    pub async fn status(&self) -> SubmitStatus {
        self.status.lock().await.clone()
    }

    /// Tries to get the status without waiting (for the sync UI loop).
    pub fn try_status(&self) -> Option<SubmitStatus> {
        self.status.try_lock().ok().map(|status| status.clone())
    }

    /// Resets the status to idle.
    pub async fn reset(&self) {
        *self.status.lock().await = SubmitStatus::Idle;
    }

    fn set_status(&self, new_status: SubmitStatus) {
        // The worker only holds the lock for an assignment, so a failed
        // try_lock here means it is about to overwrite the status anyway.
        if let Ok(mut status) = self.status.try_lock() {
            *status = new_status;
        }
    }
}
