//! Export and submission pipeline.
//!
//! Serializes the surface's raster content to PNG, saves it locally, and
//! optionally delivers it to a remote collection endpoint. Local capture is
//! the primary guarantee; remote delivery is a best-effort enhancement
//! whose failure is logged and swallowed.

pub mod file;
pub mod manager;
pub mod remote;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types at module level
pub use file::FileSaveConfig;
pub use manager::{SubmitManager, SubmitOptions};
pub use remote::{HttpSink, RemoteSink};
pub use types::{Submission, SubmitError, SubmitStatus};
