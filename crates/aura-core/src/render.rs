//! # Render State Composer
//!
//! Combines every input of the navigation shell into one immutable
//! [`RenderState`] snapshot.
//!
//! ## Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       RenderInputs (one batch)                          │
//! │                                                                         │
//! │  compact ──────────────────────────────────────────┐                   │
//! │  cart ───────► total_cart_items() ─────────────────┤                   │
//! │  wishlist ───► total_wishlist_items() ─────────────┤                   │
//! │  current_path ► match_active(model.entries()) ─────┤                   │
//! │  theme ────────────────────────────────────────────┤                   │
//! │                                                    ▼                   │
//! │                                  ┌──────────────────────────────┐      │
//! │                                  │ RenderState (Arc, immutable) │      │
//! │                                  └──────────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Memoization
//! [`RenderStateComposer`] keeps the last inputs and the last snapshot.
//! Equal inputs return the cached `Arc` without recomputing; inputs that
//! differ but derive an equal state also keep the cached `Arc`, so
//! observers can skip re-rendering with a pointer comparison.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::aggregate::{total_cart_items, total_wishlist_items};
use crate::navigation::NavigationModel;
use crate::route::match_active;
use crate::types::{CartSnapshot, Theme, WishlistSnapshot};

// =============================================================================
// Inputs
// =============================================================================

/// Everything the render state is derived from, read in one batch.
///
/// `None` snapshots mean the store has not produced one yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderInputs {
    pub compact: bool,
    pub cart: Option<CartSnapshot>,
    pub wishlist: Option<WishlistSnapshot>,
    pub current_path: String,
    pub theme: Theme,
}

// =============================================================================
// Render State
// =============================================================================

/// The single derived structure every surface renders from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RenderState {
    /// Header is past the scroll threshold.
    pub compact: bool,

    /// Sum of cart quantities.
    pub total_cart_items: u64,

    /// Number of wishlist entries.
    pub total_wishlist_items: u64,

    /// Entry whose path equals the current path.
    pub active_entry_id: Option<String>,

    pub theme: Theme,
}

impl RenderState {
    /// Whether `entry_id` is the highlighted entry.
    pub fn is_active(&self, entry_id: &str) -> bool {
        self.active_entry_id.as_deref() == Some(entry_id)
    }
}

/// Derives a [`RenderState`]. Total and deterministic.
///
/// ```rust
/// use aura_core::{compose, CartLine, CartSnapshot, NavigationModel, RenderInputs, Theme};
///
/// let model = NavigationModel::storefront_default();
/// let inputs = RenderInputs {
///     compact: true,
///     cart: Some(CartSnapshot::from(vec![CartLine::new("a", 2), CartLine::new("b", 3)])),
///     wishlist: None,
///     current_path: "/".to_string(),
///     theme: Theme::Dark,
/// };
///
/// let state = compose(&inputs, &model);
/// assert_eq!(state.total_cart_items, 5);
/// assert_eq!(state.total_wishlist_items, 0);
/// assert_eq!(state.active_entry_id.as_deref(), Some("home"));
/// assert_eq!(state, compose(&inputs, &model));
/// ```
pub fn compose(inputs: &RenderInputs, model: &NavigationModel) -> RenderState {
    RenderState {
        compact: inputs.compact,
        total_cart_items: total_cart_items(inputs.cart.as_ref()),
        total_wishlist_items: total_wishlist_items(inputs.wishlist.as_ref()),
        active_entry_id: match_active(&inputs.current_path, model.entries()).map(str::to_string),
        theme: inputs.theme,
    }
}

// =============================================================================
// Memoizing Composer
// =============================================================================

/// Result of one [`RenderStateComposer::compose`] call.
#[derive(Debug, Clone)]
pub struct Composition {
    /// Current snapshot (possibly the cached one).
    pub state: Arc<RenderState>,
    /// The derivation actually ran.
    pub recomputed: bool,
    /// The snapshot differs from the previous one.
    pub changed: bool,
}

/// Memoizing wrapper around [`compose`].
#[derive(Debug)]
pub struct RenderStateComposer {
    model: Arc<NavigationModel>,
    last_inputs: Option<RenderInputs>,
    current: Option<Arc<RenderState>>,
    recomputes: u64,
}

impl RenderStateComposer {
    pub fn new(model: Arc<NavigationModel>) -> Self {
        RenderStateComposer {
            model,
            last_inputs: None,
            current: None,
            recomputes: 0,
        }
    }

    pub fn model(&self) -> &Arc<NavigationModel> {
        &self.model
    }

    /// Last composed snapshot, if any.
    pub fn current(&self) -> Option<&Arc<RenderState>> {
        self.current.as_ref()
    }

    /// How many times the derivation has actually run.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Returns the snapshot for `inputs`, recomputing only if they changed.
    pub fn compose(&mut self, inputs: RenderInputs) -> Composition {
        if let (Some(last), Some(current)) = (&self.last_inputs, &self.current) {
            if *last == inputs {
                return Composition {
                    state: Arc::clone(current),
                    recomputed: false,
                    changed: false,
                };
            }
        }

        let next = compose(&inputs, &self.model);
        self.recomputes += 1;
        self.last_inputs = Some(inputs);

        let (state, changed) = match &self.current {
            Some(current) if **current == next => (Arc::clone(current), false),
            _ => (Arc::new(next), true),
        };
        self.current = Some(Arc::clone(&state));

        Composition {
            state,
            recomputed: true,
            changed,
        }
    }

    /// Forgets the cached inputs and snapshot.
    pub fn clear(&mut self) {
        self.last_inputs = None;
        self.current = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CartLine;

    fn inputs(path: &str, quantities: &[u32]) -> RenderInputs {
        RenderInputs {
            compact: false,
            cart: Some(
                quantities
                    .iter()
                    .enumerate()
                    .map(|(i, q)| CartLine::new(format!("item-{i}"), *q))
                    .collect(),
            ),
            wishlist: Some(["x"].into_iter().collect()),
            current_path: path.to_string(),
            theme: Theme::Light,
        }
    }

    #[test]
    fn test_compose_is_idempotent() {
        let model = NavigationModel::storefront_default();
        for case in [inputs("/", &[]), inputs("/about", &[2, 3]), RenderInputs::default()] {
            assert_eq!(compose(&case, &model), compose(&case, &model));
        }
    }

    #[test]
    fn test_missing_snapshots_compose_to_zero() {
        let model = NavigationModel::storefront_default();
        let state = compose(&RenderInputs::default(), &model);
        assert_eq!(state.total_cart_items, 0);
        assert_eq!(state.total_wishlist_items, 0);
        assert_eq!(state.active_entry_id, None);
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn test_composer_skips_equal_inputs() {
        let mut composer = RenderStateComposer::new(Arc::new(NavigationModel::default()));

        let first = composer.compose(inputs("/", &[2, 3]));
        assert!(first.recomputed && first.changed);
        assert_eq!(first.state.total_cart_items, 5);

        let second = composer.compose(inputs("/", &[2, 3]));
        assert!(!second.recomputed && !second.changed);
        assert!(Arc::ptr_eq(&first.state, &second.state));
        assert_eq!(composer.recompute_count(), 1);
    }

    #[test]
    fn test_composer_keeps_arc_when_derived_state_is_equal() {
        let mut composer = RenderStateComposer::new(Arc::new(NavigationModel::default()));
        let first = composer.compose(inputs("/", &[2, 3]));

        // Different lines, same total
        let second = composer.compose(inputs("/", &[1, 4]));
        assert!(second.recomputed);
        assert!(!second.changed);
        assert!(Arc::ptr_eq(&first.state, &second.state));
    }

    #[test]
    fn test_composer_moves_route_and_counts_together() {
        let mut composer = RenderStateComposer::new(Arc::new(NavigationModel::default()));
        composer.compose(inputs("/", &[1]));

        let next = composer.compose(inputs("/product", &[1, 1]));
        assert!(next.changed);
        assert_eq!(next.state.active_entry_id.as_deref(), Some("shop"));
        assert_eq!(next.state.total_cart_items, 2);
        assert_eq!(composer.recompute_count(), 2);
    }

    #[test]
    fn test_render_state_wire_format() {
        let state = RenderState {
            compact: true,
            total_cart_items: 5,
            total_wishlist_items: 1,
            active_entry_id: Some("home".to_string()),
            theme: Theme::Dark,
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["totalCartItems"], 5);
        assert_eq!(json["activeEntryId"], "home");
        assert_eq!(json["theme"], "dark");
        assert!(state.is_active("home"));
        assert!(!state.is_active("shop"));
    }
}
