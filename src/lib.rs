//! Freehand sketch-capture widget.
//!
//! Exposes the widget core - raster surface, stroke tracking, tool state,
//! and PNG export with best-effort remote submission - so host shells can
//! embed it. The `inkpad` binary hosts it in a small demo window.

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod ui;
pub mod util;

pub use config::Config;
