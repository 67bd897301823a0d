//! Error type definitions.
//!
//! This module defines all error and activity types used throughout the
//! library.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for sending a bound request.
///
/// These are the transport layer's own failures. Binding never validates a
/// descriptor up front, so a malformed one surfaces here at send time.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The descriptor resolved no target: the element declared no
    /// `data-request-uri` and carries no `href`.
    #[error("no request target: element declared no URI and carries no href")]
    MissingTarget,

    /// The target could not be parsed as absolute nor joined to the base URL.
    #[error("invalid request target {target:?}: {source}")]
    InvalidTarget {
        /// The raw target value from the descriptor.
        target: String,
        /// The underlying URL parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The declared method is not a valid HTTP method token.
    #[error("invalid request method {0:?}")]
    InvalidMethod(String),

    /// The request was sent but failed below the HTTP layer (connect,
    /// timeout, protocol error).
    #[error("request failed: {0}")]
    RequestFailed(#[from] ReqwestError),
}

/// Activity recorded while a session routes activations.
///
/// Covers the whole activation funnel: what was ignored, what was sent, and
/// what the response handlers decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ActivityType {
    /// A bound request was dispatched to the transport.
    RequestSent,
    /// A `Location`-directed navigation was applied to the session.
    NavigationApplied,
    /// The current location was reloaded.
    ReloadApplied,
    /// A keydown activation carried a non-Enter key and was dropped.
    KeydownIgnored,
    /// An activation arrived for an element with no stored descriptor.
    UnboundActivation,
    /// An activation hit a non-intercepting binding (plain GET hyperlink).
    PassthroughActivation,
    /// The transport produced no HTTP response at all.
    TransportFailure,
    /// An error status outside the handled branches; no action taken.
    UnhandledErrorStatus,
    /// A named-method dispatch found no such public method.
    UnknownInvoke,
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ActivityType {
    /// Returns a human-readable string representation of the activity type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::RequestSent => "Requests sent",
            ActivityType::NavigationApplied => "Navigations applied",
            ActivityType::ReloadApplied => "Reloads applied",
            ActivityType::KeydownIgnored => "Keydowns ignored",
            ActivityType::UnboundActivation => "Activations on unbound elements",
            ActivityType::PassthroughActivation => "Passthrough activations",
            ActivityType::TransportFailure => "Transport failures",
            ActivityType::UnhandledErrorStatus => "Unhandled error statuses",
            ActivityType::UnknownInvoke => "Unknown method dispatches",
        }
    }
}
