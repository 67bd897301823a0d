//! Error handling and activity tracking.
//!
//! This module defines the library's typed errors and the thread-safe
//! statistics used to keep activation behavior observable without surfacing
//! anything to the user.

mod stats;
mod types;

pub use stats::ActivationStats;
pub use types::{ActivityType, InitializationError, TransportError};
