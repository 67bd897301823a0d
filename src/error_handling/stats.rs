//! Activation statistics tracking.
//!
//! This module provides thread-safe counters for everything a session does
//! with activations: requests sent, navigations applied, events ignored, and
//! failures swallowed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ActivityType;

/// Thread-safe activation statistics tracker.
///
/// Tracks every [`ActivityType`] with an atomic counter, allowing concurrent
/// access from multiple tasks. All counters are initialized to zero on
/// creation.
///
/// # Thread Safety
///
/// This struct is thread-safe and can be shared across tasks using `Arc`.
pub struct ActivationStats {
    counters: HashMap<ActivityType, AtomicUsize>,
}

impl ActivationStats {
    /// Creates a tracker with all counters initialized to zero.
    pub fn new() -> Self {
        let mut counters = HashMap::new();
        for activity in ActivityType::iter() {
            counters.insert(activity, AtomicUsize::new(0));
        }

        ActivationStats { counters }
    }

    /// Increment an activity counter.
    ///
    /// All activity types are initialized in the constructor, so the lookup
    /// can only miss if a variant was added without rebuilding the map; that
    /// case is logged rather than panicking.
    pub fn increment(&self, activity: ActivityType) {
        if let Some(counter) = self.counters.get(&activity) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter for {:?} which is not in the map. \
                 This indicates a bug in ActivationStats initialization.",
                activity
            );
        }
    }

    /// Get the count for an activity type.
    ///
    /// Returns 0 if the activity type is not in the map (should never happen
    /// if properly initialized).
    pub fn count(&self, activity: ActivityType) -> usize {
        self.counters
            .get(&activity)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or_else(|| {
                log::warn!(
                    "Activity type {:?} not found in stats map, returning 0. \
                     This indicates a bug in ActivationStats initialization.",
                    activity
                );
                0
            })
    }

    /// Get the total count across all activity types.
    pub fn total(&self) -> usize {
        ActivityType::iter().map(|a| self.count(a)).sum()
    }

    /// Logs every non-zero counter at info level.
    pub fn log_summary(&self) {
        for activity in ActivityType::iter() {
            let count = self.count(activity);
            if count > 0 {
                log::info!("{}: {}", activity, count);
            }
        }
    }
}

impl Default for ActivationStats {
    fn default() -> Self {
        Self::new()
    }
}
