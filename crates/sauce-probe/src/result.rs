//! Result and error types for sauce-probe.

use thiserror::Error;

/// Result type for sauce-probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while driving the storefront
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    Page {
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

    /// Operation timed out
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// No element matched the selector
    #[error("No element matches {selector}")]
    ElementNotFound {
        /// Selector that matched nothing
        selector: String,
    },

    /// Element exists but cannot receive the interaction
    #[error("Element {selector} is not actionable: {reason}")]
    NotActionable {
        /// Selector of the element
        selector: String,
        /// Why the interaction was refused
        reason: String,
    },

    /// Script evaluation error
    #[error("Script evaluation failed: {message}")]
    Script {
        /// Error message
        message: String,
    },

    /// Product key outside the catalog
    #[error("Unknown product key '{key}'")]
    UnknownProduct {
        /// Offending key
        key: String,
    },

    /// Displayed text could not be parsed
    #[error("Could not parse {what} from '{text}'")]
    Parse {
        /// What was being parsed
        what: String,
        /// Raw text
        text: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ProbeError {
    /// Create a page error
    #[must_use]
    pub fn page(message: impl Into<String>) -> Self {
        Self::Page {
            message: message.into(),
        }
    }

    /// Create a parse error
    #[must_use]
    pub fn parse(what: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Parse {
            what: what.into(),
            text: text.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// True when the error means the target element was simply not there
    #[must_use]
    pub const fn is_absence(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. } | Self::Timeout { .. })
    }
}

/// Outcome of reading an element that may legitimately be missing.
///
/// Accessors return the observation and leave the policy to the caller:
/// [`Observation::or_closed`] treats absence as a default value,
/// [`Observation::required`] turns absence into an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation<T> {
    /// The element was present and yielded a value
    Present(T),
    /// The element was not on the page
    Absent,
}

impl<T> Observation<T> {
    /// Check whether a value was observed
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Fail-closed: absence becomes `default`
    pub fn or_closed(self, default: T) -> T {
        match self {
            Self::Present(value) => value,
            Self::Absent => default,
        }
    }

    /// Fail-open: absence becomes [`ProbeError::ElementNotFound`]
    pub fn required(self, what: impl Into<String>) -> ProbeResult<T> {
        match self {
            Self::Present(value) => Ok(value),
            Self::Absent => Err(ProbeError::ElementNotFound {
                selector: what.into(),
            }),
        }
    }

    /// Transform the observed value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Observation<U> {
        match self {
            Self::Present(value) => Observation::Present(f(value)),
            Self::Absent => Observation::Absent,
        }
    }

    /// Convert into an `Option`
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }
}

impl<T: Default> Observation<T> {
    /// Fail-closed with the type's default
    pub fn or_default(self) -> T {
        self.or_closed(T::default())
    }
}

impl<T> From<Option<T>> for Observation<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}
