//! Library initialization.
//!
//! This module provides functions to initialize the HTTP client and logger,
//! and the process-wide bind registration with its explicit install/restore
//! pair.

mod client;
mod logger;
mod registration;

pub use client::init_client;
pub use logger::init_logger_with;
pub use registration::{active_registration, install, restore, Registration};
