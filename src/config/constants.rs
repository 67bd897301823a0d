//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the
//! library, including the consumed element attributes, activation defaults,
//! and transport limits.

// Consumed element attributes
/// Attribute declaring the HTTP method an element's activation should use.
pub const ATTR_REQUEST_METHOD: &str = "data-request-method";
/// Attribute declaring the request target, overriding the element's `href`.
pub const ATTR_REQUEST_URI: &str = "data-request-uri";
/// Native hyperlink attribute, the last fallback for the request target.
pub const ATTR_HREF: &str = "href";

/// Selector matching every element that opts into binding at document load.
pub const DECLARED_BINDING_SELECTOR_STR: &str = "[data-request-method]";

// Binding defaults
/// Method used when neither options nor attributes declare one.
pub const DEFAULT_METHOD: &str = "get";
/// Tag name whose native navigation already covers plain GET bindings.
pub const ANCHOR_TAG: &str = "a";
/// Cursor style reported for elements that intercept activations.
pub const POINTER_CURSOR: &str = "pointer";

// Activation
/// Key code accepted for keydown activation (Enter).
pub const ENTER_KEY_CODE: u16 = 13;

// Transport
/// Per-request timeout in seconds.
/// Matches the interactive feel of a browser request: slow enough for a real
/// round trip, fast enough that a stuck activation doesn't hang the session.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via [`Config::user_agent`](crate::Config).
pub const DEFAULT_USER_AGENT: &str = concat!("actionlink/", env!("CARGO_PKG_VERSION"));

/// Maximum fetched document size in bytes (2MB).
/// Documents larger than this are dropped rather than parsed to prevent
/// memory exhaustion when a navigation target misbehaves.
pub const MAX_DOCUMENT_BODY_SIZE: usize = 2 * 1024 * 1024;
