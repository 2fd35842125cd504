//! Best-effort remote delivery of submissions.

use super::types::{Submission, SubmitError};
use async_trait::async_trait;
use base64::Engine as _;
use std::time::Duration;
use url::Url;

/// A destination for sketch submissions.
///
/// Delivery is best-effort: the submit flow spawns deliveries without
/// awaiting them, logs failures, and never lets the outcome affect the
/// local save path. Implementations must therefore be safe to abandon.
#[async_trait]
pub trait RemoteSink: Send + Sync {
    async fn deliver(&self, submission: &Submission) -> Result<(), SubmitError>;
}

/// HTTP sink POSTing the submission as a JSON body.
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSink {
    /// Builds a sink for the given endpoint with a request timeout.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SubmitError::Remote(err.to_string()))?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl RemoteSink for HttpSink {
    async fn deliver(&self, submission: &Submission) -> Result<(), SubmitError> {
        log::debug!(
            "Submitting sketch for '{}' to {}",
            submission.identifier,
            self.endpoint
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await
            .map_err(|err| SubmitError::Remote(err.to_string()))?;

        // The response body is never parsed; only transport-level success
        // is observed, and a non-2xx counts as a delivery failure.
        response
            .error_for_status()
            .map_err(|err| SubmitError::Remote(err.to_string()))?;

        Ok(())
    }
}

/// Encodes PNG bytes as a base64 `data:` URL for the submission body.
pub fn png_data_url(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_has_png_media_type() {
        let url = png_data_url(b"\x89PNG");
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(url.len() > "data:image/png;base64,".len());
    }
}
