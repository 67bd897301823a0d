//! Request descriptor resolution.
//!
//! A descriptor is built once per element at bind time. Every field resolves
//! in the same order: explicit option, then the element's data attribute,
//! then (for the target only) the element's native `href`, then the built-in
//! default.

use std::fmt;

use scraper::ElementRef;

use crate::config::{ATTR_HREF, ATTR_REQUEST_METHOD, ATTR_REQUEST_URI, DEFAULT_METHOD};
use crate::navigation::ResponseStrategy;
use crate::transport::RequestOverrides;

/// Optional overrides supplied when binding an element.
///
/// Any field left `None` falls back to the element's attributes and the
/// built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct BindOptions {
    /// HTTP method, overriding `data-request-method`.
    pub method: Option<String>,

    /// Request target, overriding `data-request-uri` and `href`.
    pub target: Option<String>,

    /// Response strategy, overriding the registered default handlers.
    pub strategy: Option<ResponseStrategy>,

    /// Transport overrides attached to every request this binding sends.
    pub overrides: Option<RequestOverrides>,
}

/// Resolved request parameters for one bound element.
///
/// Immutable once stored; the element keeps this descriptor until the
/// session replaces the document.
pub struct RequestDescriptor {
    method: String,
    target: Option<String>,
    strategy: ResponseStrategy,
    overrides: Option<RequestOverrides>,
}

impl RequestDescriptor {
    /// Resolves a descriptor from bind options and element attributes.
    ///
    /// A missing target is kept as `None` rather than rejected; the
    /// transport reports the failure at send time.
    pub(crate) fn resolve(
        element: ElementRef<'_>,
        options: BindOptions,
        default_strategy: &ResponseStrategy,
    ) -> Self {
        let method = options
            .method
            .or_else(|| element.value().attr(ATTR_REQUEST_METHOD).map(str::to_string))
            .unwrap_or_else(|| DEFAULT_METHOD.to_string())
            .to_ascii_lowercase();

        let target = options
            .target
            .or_else(|| element.value().attr(ATTR_REQUEST_URI).map(str::to_string))
            .or_else(|| element.value().attr(ATTR_HREF).map(str::to_string));

        let strategy = options
            .strategy
            .unwrap_or_else(|| default_strategy.clone());

        RequestDescriptor {
            method,
            target,
            strategy,
            overrides: options.overrides,
        }
    }

    /// The HTTP method, lowercased.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request target, if any resolution source supplied one.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// The response strategy attached to this binding.
    pub fn strategy(&self) -> &ResponseStrategy {
        &self.strategy
    }

    /// Transport overrides, if any were supplied.
    pub fn overrides(&self) -> Option<&RequestOverrides> {
        self.overrides.as_ref()
    }
}

impl fmt::Debug for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("method", &self.method)
            .field("target", &self.target)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}
