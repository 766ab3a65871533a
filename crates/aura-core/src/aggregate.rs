//! # Derived Count Aggregator
//!
//! Pure reductions from store snapshots to the badge counts shown in the
//! header.
//!
//! ## Reductions
//! ```text
//! CartSnapshot                          totalCartItems
//! ┌───────────────────────┐
//! │ { "a", quantity: 2 }  │──┐
//! │ { "b", quantity: 3 }  │──┼── Σ quantity ──►  5
//! └───────────────────────┘  │
//!                            │
//! WishlistSnapshot           │          totalWishlistItems
//! [ "x" ] ───────────────── count ────►  1
//!
//! None (store not ready) ───────────────►  0
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{CartSnapshot, WishlistSnapshot};

/// Total units in the cart: the sum of every line's quantity.
///
/// A missing snapshot counts as the empty cart.
///
/// ```rust
/// use aura_core::{aggregate::total_cart_items, CartLine, CartSnapshot};
///
/// let cart = CartSnapshot::from(vec![CartLine::new("a", 2), CartLine::new("b", 3)]);
/// assert_eq!(total_cart_items(Some(&cart)), 5);
/// assert_eq!(total_cart_items(None), 0);
/// ```
pub fn total_cart_items(cart: Option<&CartSnapshot>) -> u64 {
    cart.map_or(0, |cart| {
        cart.lines().iter().map(|line| u64::from(line.quantity)).sum()
    })
}

/// Number of wishlist entries. A missing snapshot counts as empty.
pub fn total_wishlist_items(wishlist: Option<&WishlistSnapshot>) -> u64 {
    wishlist.map_or(0, |wishlist| wishlist.len() as u64)
}

// =============================================================================
// Badge
// =============================================================================

/// A count bubble on a header icon.
///
/// Suppressed entirely when the count is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Badge {
    pub count: u64,
}

impl Badge {
    /// `None` for zero, so the surface renders no bubble at all.
    ///
    /// ```rust
    /// use aura_core::aggregate::Badge;
    ///
    /// assert_eq!(Badge::for_count(0), None);
    /// assert_eq!(Badge::for_count(1).map(|b| b.count), Some(1));
    /// ```
    pub fn for_count(count: u64) -> Option<Badge> {
        (count > 0).then_some(Badge { count })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
