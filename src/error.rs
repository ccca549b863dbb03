//! Error types for the input hook library.

use thiserror::Error;

/// Result type alias for inputhook operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during input hooking operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The host platform has no usable capture backend.
    #[error("platform unsupported: {0}")]
    PlatformUnsupported(String),

    /// Native capture resources could not be acquired.
    ///
    /// The message carries a remediation hint where one is known (grant
    /// accessibility permission, set DISPLAY, enable the RECORD extension).
    /// This is fatal at construction and is never retried automatically.
    #[error("failed to initialize capture: {0}")]
    CaptureInit(String),

    /// A synthetic input event could not be issued.
    #[error("failed to inject event: {0}")]
    Injection(String),

    /// The hook has been disposed; only `dispose()` is valid now.
    #[error("hook has been disposed")]
    Disposed,

    /// Capture-thread management failure.
    #[error("thread error: {0}")]
    Thread(String),
}
