//! Element binding.
//!
//! Bindings associate a markup element with exactly one resolved
//! [`RequestDescriptor`]. They live in an explicit side table keyed by
//! element identity rather than on the elements themselves, which makes the
//! idempotency rule cheap: an element already present keeps its descriptor,
//! whatever options a later bind call carries.

mod activation;
mod descriptor;

pub use activation::{ActivationEvent, ActivationOutcome};
pub use descriptor::{BindOptions, RequestDescriptor};

use std::collections::HashMap;

use scraper::ElementRef;

use crate::config::{ANCHOR_TAG, DEFAULT_METHOD, POINTER_CURSOR};
use crate::dom::ElementId;
use crate::navigation::ResponseStrategy;

/// What a bind call should do with each element of a collection.
#[derive(Debug, Clone)]
pub enum BindDirective {
    /// Bind unbound elements with these options.
    Options(BindOptions),
    /// Ensure elements are bound with defaults, then dispatch the string as
    /// a method name on each stored binding instance.
    Invoke(String),
}

/// Result of binding a single element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindStatus {
    /// A descriptor was resolved and stored.
    Bound,
    /// The element was already bound; the stored descriptor was kept.
    Retained,
}

/// A bound element: its descriptor plus whether activations are intercepted.
pub struct BoundElement {
    descriptor: RequestDescriptor,
    intercepts: bool,
}

impl BoundElement {
    /// The resolved request parameters.
    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    /// Whether activations on this element are intercepted.
    ///
    /// False for a plain GET hyperlink, whose native navigation already does
    /// the job.
    pub fn intercepts(&self) -> bool {
        self.intercepts
    }

    /// The cursor style this binding reports for its element.
    pub fn cursor(&self) -> Option<&'static str> {
        self.intercepts.then_some(POINTER_CURSOR)
    }
}

/// Side table of bindings for the current document.
#[derive(Default)]
pub struct Binder {
    bound: HashMap<ElementId, BoundElement>,
}

impl Binder {
    /// Creates an empty binder.
    pub fn new() -> Self {
        Binder {
            bound: HashMap::new(),
        }
    }

    /// Binds an element, resolving a descriptor from options and attributes.
    ///
    /// Re-binding an already-bound element is a no-op that keeps the stored
    /// descriptor. A resolved GET on an `<a>` element is registered as
    /// non-intercepting.
    pub fn bind(
        &mut self,
        id: ElementId,
        element: ElementRef<'_>,
        options: BindOptions,
        default_strategy: &ResponseStrategy,
    ) -> BindStatus {
        if self.bound.contains_key(&id) {
            log::debug!("element {id:?} already bound, keeping stored descriptor");
            return BindStatus::Retained;
        }

        let descriptor = RequestDescriptor::resolve(element, options, default_strategy);
        let intercepts = !(descriptor.method() == DEFAULT_METHOD
            && element.value().name().eq_ignore_ascii_case(ANCHOR_TAG));

        log::debug!(
            "binding element {id:?}: {} {:?} (intercepts: {intercepts})",
            descriptor.method(),
            descriptor.target()
        );
        self.bound.insert(
            id,
            BoundElement {
                descriptor,
                intercepts,
            },
        );
        BindStatus::Bound
    }

    /// Looks up the binding for an element.
    pub fn get(&self, id: ElementId) -> Option<&BoundElement> {
        self.bound.get(&id)
    }

    /// Whether the element has a stored binding.
    pub fn is_bound(&self, id: ElementId) -> bool {
        self.bound.contains_key(&id)
    }

    /// Number of bound elements.
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    /// Whether no elements are bound.
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Drops every binding. Called when the session replaces its document.
    pub(crate) fn clear(&mut self) {
        self.bound.clear();
    }

    /// Dispatches a named method call on a stored binding instance.
    ///
    /// Binding instances expose no public methods today, so every name
    /// misses; the miss is logged and `false` returned. Unbound elements
    /// also return `false`.
    pub fn dispatch(&self, id: ElementId, method_name: &str) -> bool {
        if !self.bound.contains_key(&id) {
            return false;
        }
        log::debug!("no public method {method_name:?} on binding instance for {id:?}");
        false
    }
}
