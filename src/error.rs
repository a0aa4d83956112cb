//! Unified error types for the CatPoint alarm core.
//!
//! A single [`Error`] enum that constructors and config loading convert into.
//! The coordinator's own transitions are total and never return errors;
//! these types only surface from constructors, configuration loading and
//! the vision-client port.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A public entry point was handed an argument it cannot accept.
    InvalidArgument(&'static str),
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(String),
    /// The config document is not valid JSON for [`SystemConfig`].
    ///
    /// [`SystemConfig`]: crate::config::SystemConfig
    Parse(String),
    /// A field failed validation.  The `&'static str` names the field and why.
    Validation(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Validation(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Detection errors
// ---------------------------------------------------------------------------

/// Failure reported by a [`VisionClient`].  Never converted into [`Error`]:
/// the detector boundary turns it into "no cat".
///
/// [`VisionClient`]: crate::app::ports::VisionClient
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    /// The client was never initialised (missing credentials, no endpoint).
    Unavailable,
    /// The service refused the request.
    Rejected(String),
    /// The frame could not be handed to the service.
    Io(String),
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "vision client unavailable"),
            Self::Rejected(msg) => write!(f, "request rejected: {msg}"),
            Self::Io(msg) => write!(f, "frame I/O failed: {msg}"),
        }
    }
}

impl std::error::Error for DetectionError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
