//! Shared error classification.
//!
//! Every error the editor can surface implements [`ErrorCode`] so the host can
//! map it to a stable code and decide whether to offer a retry in the toast.

/// Stable machine-readable classification for user-facing errors.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
