//! Application error type.
//!
//! Per-product fetch failures are *data*, not errors: they are recorded in the
//! run report and never abort the crawl. `AppError` is reserved for failures
//! that end the run (bad configuration, snapshot write failures, exhausted
//! retries bubbling out of a single request). The process exit code is always
//! 1 for these, so the error only carries a message.

#[derive(Clone)]
pub struct AppError {
    message: String,
}

impl AppError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
