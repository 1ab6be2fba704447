//! Browser harvesting pipeline — Chromium lifecycle, navigation, cookie
//! extraction.
//!
//! One [`HarvestSession`] per request. The pipeline in [`pipeline`] owns the
//! session for its whole scope and releases it on every exit path; no
//! session handle ever escapes that scope.

pub mod harvest;
pub mod lifecycle;
pub mod navigate;
pub mod pipeline;

pub use lifecycle::HarvestSession;
pub use pipeline::{run, HarvestCapture};
