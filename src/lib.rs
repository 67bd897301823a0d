//! actionlink library: declarative request bindings for markup elements
//!
//! This library lets plain HTML elements issue asynchronous HTTP requests with
//! an arbitrary method and follow server-directed navigation. Elements carrying
//! `data-request-method` (and optionally `data-request-uri`) are bound when a
//! document is loaded into a [`Session`]; an activation (a click, or an Enter
//! keydown) on a bound element sends the declared request, and the response's
//! `Location` header and status code decide whether the session navigates,
//! reloads, or stays put.
//!
//! # Example
//!
//! ```no_run
//! use actionlink::{ActivationEvent, Config, Session};
//! use url::Url;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let page = r#"<button data-request-method="post" data-request-uri="/issues/7/close">
//!                   Close issue
//!               </button>"#;
//!
//! let base = Url::parse("https://tracker.example/issues/7")?;
//! let mut session = Session::load(page, base, Config::default()).await?;
//!
//! session.activate("button", ActivationEvent::Click).await?;
//! println!("now at {}", session.location());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod binding;
pub mod config;
mod dom;
mod error_handling;
pub mod initialization;
mod navigation;
mod session;
mod transport;

// Re-export public API
pub use binding::{
    ActivationEvent, ActivationOutcome, BindDirective, BindOptions, BindStatus, Binder,
    BoundElement, RequestDescriptor,
};
pub use config::Config;
pub use dom::{DocumentView, ElementId};
pub use error_handling::{ActivationStats, ActivityType, InitializationError, TransportError};
pub use initialization::{install, restore, Registration};
pub use navigation::{
    default_on_error, default_on_success, standard_strategy, NavigationOutcome, ResponseHandler,
    ResponseStrategy,
};
pub use session::Session;
pub use transport::{send_request, RequestOverrides, TransportReply};
