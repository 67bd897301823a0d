//! Response-directed navigation.
//!
//! A bound request's reply decides what happens to the browser-side location:
//! navigate to a `Location`-supplied target, reload the current document, or
//! stay put. The decision is made by a fixed two-variant strategy object
//! injected at bind time, defaulting to the standard handlers in this module.

use std::fmt;
use std::sync::Arc;

use reqwest::Url;

use crate::transport::TransportReply;

/// What a response handler decided should happen to the session location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Navigate to the given target, resolved against the current location
    /// at apply time.
    Navigate(String),
    /// Reload the current location.
    Reload,
    /// Leave the location alone.
    Stay,
}

/// A response handler: maps a transport reply to a navigation decision.
pub type ResponseHandler = Arc<dyn Fn(&TransportReply) -> NavigationOutcome + Send + Sync>;

/// The two-variant response strategy attached to every binding.
///
/// One handler for replies that classify as success, one for the rest.
/// Cloning is cheap; the handlers are shared.
#[derive(Clone)]
pub struct ResponseStrategy {
    on_success: ResponseHandler,
    on_error: ResponseHandler,
}

impl ResponseStrategy {
    /// Builds a strategy from explicit handlers.
    pub fn new(on_success: ResponseHandler, on_error: ResponseHandler) -> Self {
        ResponseStrategy {
            on_success,
            on_error,
        }
    }

    /// Routes a reply to the matching handler and returns its decision.
    ///
    /// Success means a 2xx status or 304; everything else goes to the error
    /// handler.
    pub fn on_reply(&self, reply: &TransportReply) -> NavigationOutcome {
        if reply.is_success() {
            (self.on_success)(reply)
        } else {
            (self.on_error)(reply)
        }
    }
}

impl Default for ResponseStrategy {
    fn default() -> Self {
        ResponseStrategy {
            on_success: Arc::new(default_on_success),
            on_error: Arc::new(default_on_error),
        }
    }
}

impl fmt::Debug for ResponseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseStrategy").finish_non_exhaustive()
    }
}

/// Returns the standard strategy built from [`default_on_success`] and
/// [`default_on_error`].
pub fn standard_strategy() -> ResponseStrategy {
    ResponseStrategy::default()
}

/// Standard success handler.
///
/// Redirects to the URL carried in the reply's `Location` header, or reloads
/// the current document when the server supplied none.
pub fn default_on_success(reply: &TransportReply) -> NavigationOutcome {
    match reply.location() {
        Some(location) => NavigationOutcome::Navigate(location.to_string()),
        None => NavigationOutcome::Reload,
    }
}

/// Standard error handler.
///
/// - 200: the server responded ok but the redirect target cannot be
///   determined, so reload the current document.
/// - 204: client-side detectable condition; navigate to the `Location`
///   header value.
/// - anything else: no defined action.
pub fn default_on_error(reply: &TransportReply) -> NavigationOutcome {
    match reply.status().as_u16() {
        200 => NavigationOutcome::Reload,
        204 => match reply.location() {
            Some(location) => NavigationOutcome::Navigate(location.to_string()),
            None => {
                log::warn!("204 reply carried no Location header, staying put");
                NavigationOutcome::Stay
            }
        },
        status => {
            log::debug!("no action defined for error status {status}");
            NavigationOutcome::Stay
        }
    }
}

/// Resolves a navigation target against the current location.
///
/// Absolute targets are used as-is; anything else is joined onto the base,
/// the same way `Location` headers behave in redirect handling.
///
/// # Errors
///
/// Returns an error if the target neither parses as absolute nor joins onto
/// the base.
pub fn resolve_target(base: &Url, target: &str) -> Result<Url, url::ParseError> {
    Url::parse(target).or_else(|_| base.join(target))
}
