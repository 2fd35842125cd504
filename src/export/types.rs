//! Data types for the export and submission flow.

use serde::Serialize;
use thiserror::Error;

/// JSON body delivered to the remote collection endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// User-supplied identifier (e.g. an email address).
    pub identifier: String,
    /// PNG content encoded as a base64 `data:` URL.
    pub image_data: String,
    /// RFC3339 UTC timestamp of the capture.
    pub timestamp: String,
}

/// Errors that can occur during export or submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("an identifier is required before submitting")]
    MissingIdentifier,

    #[error("failed to encode sketch: {0}")]
    Encode(String),

    #[error("failed to save sketch: {0}")]
    Save(#[from] std::io::Error),

    #[error("remote delivery failed: {0}")]
    Remote(String),

    #[error("submit worker is not running")]
    WorkerGone,
}

/// Status of the submit flow, mirrored to the host shell's status surface.
///
/// The shell distinguishes the error variants with a color cue; this
/// component only reports the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    /// No submission started or the last one was acknowledged.
    Idle,
    /// A submission has been accepted and is being processed.
    InProgress,
    /// The local save completed (remote delivery is never awaited).
    Success,
    /// A required field was missing; nothing was exported or sent.
    ValidationError(String),
    /// The local save failed.
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_serializes_with_camel_case_keys() {
        let submission = Submission {
            identifier: "you@example.com".to_string(),
            image_data: "data:image/png;base64,AAAA".to_string(),
            timestamp: "2026-08-27T12:00:00Z".to_string(),
        };

        let body = serde_json::to_value(&submission).unwrap();
        assert_eq!(body["identifier"], "you@example.com");
        assert_eq!(body["imageData"], "data:image/png;base64,AAAA");
        assert_eq!(body["timestamp"], "2026-08-27T12:00:00Z");
        assert_eq!(body.as_object().unwrap().len(), 3);
    }
}
