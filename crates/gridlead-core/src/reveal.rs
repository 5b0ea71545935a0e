//! Reveal-on-scroll bookkeeping.
//!
//! Sections fade in the first time enough of them becomes visible and stay
//! revealed afterwards.

use std::collections::BTreeSet;

/// Visible fraction at which a section counts as in view.
pub const REVEAL_THRESHOLD: f64 = 0.13;

/// Class added to a revealed section.
pub const IN_VIEW_CLASS: &str = "in-view";

/// Tracks which sections have been revealed.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    threshold: f64,
    revealed: BTreeSet<String>,
}

impl Default for RevealTracker {
    fn default() -> Self {
        Self::new(REVEAL_THRESHOLD)
    }
}

impl RevealTracker {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            revealed: BTreeSet::new(),
        }
    }

    /// Record an intersection change for `section`.
    ///
    /// Returns `true` only the first time the section reaches the threshold,
    /// i.e. when [`IN_VIEW_CLASS`] should be added.
    pub fn observe(&mut self, section: &str, visible_ratio: f64) -> bool {
        if visible_ratio < self.threshold || visible_ratio <= 0.0 {
            return false;
        }
        self.revealed.insert(section.to_owned())
    }

    #[must_use]
    pub fn is_revealed(&self, section: &str) -> bool {
        self.revealed.contains(section)
    }

    pub fn revealed(&self) -> impl Iterator<Item = &str> {
        self.revealed.iter().map(String::as_str)
    }
}
