//! # Scroll Mode Tracker
//!
//! Turns the raw scroll offset stream into the boolean "compact" signal
//! that switches the header chrome.
//!
//! ## Edge-Triggered Output
//! ```text
//! offset:   0 ──► 25 ──► 30 ──► 5 ──► 3
//!           │     │      │      │     │
//! compact:  F     T      T      F     F
//! emitted:  -   Some(T) None  Some(F) None
//! ```
//! Only flips are emitted, so downstream composition runs once per flip
//! rather than once per scroll event.

use crate::types::ScrollState;

/// Offset (CSS pixels) past which the header turns compact.
pub const COMPACT_THRESHOLD_PX: f64 = 20.0;

/// `true` when `offset_y` is strictly past `threshold`.
///
/// NaN offsets never count as scrolled.
#[inline]
pub fn is_compact(offset_y: f64, threshold: f64) -> bool {
    offset_y > threshold
}

/// Stateful, edge-triggered view of the scroll stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollModeTracker {
    threshold: f64,
    compact: bool,
}

impl ScrollModeTracker {
    /// Tracker with the standard 20px threshold, starting non-compact.
    pub fn new() -> Self {
        Self::with_threshold(COMPACT_THRESHOLD_PX)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        ScrollModeTracker {
            threshold,
            compact: false,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Current compact flag.
    #[inline]
    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Feeds one scroll event.
    ///
    /// Returns `Some(compact)` when the flag flipped, `None` otherwise.
    ///
    /// ```rust
    /// use aura_core::{ScrollModeTracker, ScrollState};
    ///
    /// let mut tracker = ScrollModeTracker::new();
    /// assert_eq!(tracker.observe(ScrollState::at(25.0)), Some(true));
    /// assert_eq!(tracker.observe(ScrollState::at(30.0)), None);
    /// assert_eq!(tracker.observe(ScrollState::at(5.0)), Some(false));
    /// ```
    pub fn observe(&mut self, state: ScrollState) -> Option<bool> {
        let compact = is_compact(state.offset_y, self.threshold);
        if compact == self.compact {
            return None;
        }
        self.compact = compact;
        Some(compact)
    }

    /// Drops back to the non-compact state (no scroll source, or torn down).
    ///
    /// Returns `Some(false)` if this was a flip.
    pub fn reset(&mut self) -> Option<bool> {
        if !self.compact {
            return None;
        }
        self.compact = false;
        Some(false)
    }
}

impl Default for ScrollModeTracker {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        assert!(!is_compact(20.0, COMPACT_THRESHOLD_PX));
        assert!(is_compact(20.5, COMPACT_THRESHOLD_PX));
        assert!(!is_compact(f64::NAN, COMPACT_THRESHOLD_PX));
    }

    #[test]
    fn test_flip_sequence() {
        let mut tracker = ScrollModeTracker::new();
        assert!(!tracker.is_compact());

        // 0 → 25 flips on
        assert_eq!(tracker.observe(ScrollState::at(0.0)), None);
        assert_eq!(tracker.observe(ScrollState::at(25.0)), Some(true));

        // 25 → 30: both past the threshold, nothing emitted
        assert_eq!(tracker.observe(ScrollState::at(30.0)), None);
        assert!(tracker.is_compact());

        // 30 → 5 flips back off
        assert_eq!(tracker.observe(ScrollState::at(5.0)), Some(false));
        assert!(!tracker.is_compact());
    }

    #[test]
    fn test_reset_only_emits_on_flip() {
        let mut tracker = ScrollModeTracker::new();
        assert_eq!(tracker.reset(), None);

        tracker.observe(ScrollState::at(100.0));
        assert_eq!(tracker.reset(), Some(false));
        assert_eq!(tracker.reset(), None);
    }

    #[test]
    fn test_custom_threshold() {
        let mut tracker = ScrollModeTracker::with_threshold(64.0);
        assert_eq!(tracker.observe(ScrollState::at(25.0)), None);
        assert_eq!(tracker.observe(ScrollState::at(65.0)), Some(true));
    }
}
