//! Result and error types for the test suite.

use thiserror::Error;

/// Result type for suite operations
pub type E2eResult<T> = Result<T, E2eError>;

/// Errors that can occur while driving the application under test
#[derive(Debug, Error)]
pub enum E2eError {
    /// A polled condition never became true within its bound
    #[error("Timed out after {ms}ms: {message}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// Caller-supplied diagnostic message
        message: String,
    },

    /// Element missing, detached or not interactable
    #[error("Element error: {message}")]
    Element {
        /// Error message
        message: String,
    },

    /// An expectation about page state did not hold
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Screenshot capture error
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// Fixture setup or teardown failed
    #[error("Fixture error: {message}")]
    Fixture {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display_carries_message() {
        let err = E2eError::Timeout {
            ms: 10_000,
            message: "toast never appeared".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("10000ms"));
        assert!(rendered.contains("toast never appeared"));
    }

    #[test]
    fn test_navigation_display_carries_url() {
        let err = E2eError::Navigation {
            url: "https://example.com/dashboard".to_string(),
            message: "net::ERR_CONNECTION_REFUSED".to_string(),
        };
        assert!(err.to_string().contains("https://example.com/dashboard"));
    }

    #[test]
    fn test_io_error_converts() {
        fn read() -> E2eResult<String> {
            Ok(std::fs::read_to_string("/nonexistent/path")?)
        }
        assert!(matches!(read(), Err(E2eError::Io(_))));
    }
}
