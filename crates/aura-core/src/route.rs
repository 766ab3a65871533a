//! # Active Route Matcher
//!
//! Decides which navigation entry is highlighted for the current path.
//!
//! Matching is exact string equality. `/product/42` does NOT activate the
//! `/product` entry; nested routes render with nothing highlighted.

use crate::navigation::NavigationEntry;

/// Id of the entry whose path equals `current_path`, if any.
///
/// Entries are assumed to have disjoint paths (enforced when the
/// `NavigationModel` is built), so the first hit is the only hit.
///
/// ```rust
/// use aura_core::{route::match_active, NavigationModel};
///
/// let model = NavigationModel::storefront_default();
/// assert_eq!(match_active("/product", model.entries()), Some("shop"));
/// assert_eq!(match_active("/product/42", model.entries()), None);
/// ```
pub fn match_active<'a>(current_path: &str, entries: &'a [NavigationEntry]) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.path == current_path)
        .map(|entry| entry.id.as_str())
}

// =============================================================================
// Unit Tests
// =============================================================================
