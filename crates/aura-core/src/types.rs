//! # Domain Types
//!
//! Input types read from the external collaborators.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Input Types                                     │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CartSnapshot   │   │WishlistSnapshot │   │  ScrollState    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  [CartLine]     │   │  [item id]      │   │  offset_y (px)  │       │
//! │  │   item_id       │   │                 │   │                 │       │
//! │  │   quantity ≥ 1  │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │     Theme       │   │    IconRef      │                              │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  Light          │   │  Home, Grid,    │                              │
//! │  │  Dark           │   │  Heart, ...     │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Snapshots are owned by their stores. The core receives read-only copies
//! and never mutates them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Theme
// =============================================================================

/// Process-wide color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the opposite theme.
    ///
    /// ```rust
    /// use aura_core::Theme;
    ///
    /// assert_eq!(Theme::Light.toggled(), Theme::Dark);
    /// assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    /// ```
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon shown on the toggle button: the sun while dark, the moon while light.
    #[inline]
    pub const fn toggle_icon(self) -> IconRef {
        match self {
            Theme::Light => IconRef::Moon,
            Theme::Dark => IconRef::Sun,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

// =============================================================================
// Scroll State
// =============================================================================

/// Vertical scroll position of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScrollState {
    /// Offset from the top of the document, in CSS pixels.
    pub offset_y: f64,
}

impl ScrollState {
    #[inline]
    pub const fn at(offset_y: f64) -> Self {
        ScrollState { offset_y }
    }
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// One line of the cart as seen by the navigation shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Item identifier assigned by the cart store.
    pub item_id: String,

    /// Units of this item (the store guarantees ≥ 1).
    pub quantity: u32,
}

impl CartLine {
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        CartLine {
            item_id: item_id.into(),
            quantity,
        }
    }
}

/// Read-only copy of the cart store's lines, in store order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartSnapshot(Vec<CartLine>);

impl CartSnapshot {
    /// The empty cart.
    pub fn empty() -> Self {
        CartSnapshot(Vec::new())
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<CartLine>> for CartSnapshot {
    fn from(lines: Vec<CartLine>) -> Self {
        CartSnapshot(lines)
    }
}

impl FromIterator<CartLine> for CartSnapshot {
    fn from_iter<I: IntoIterator<Item = CartLine>>(iter: I) -> Self {
        CartSnapshot(iter.into_iter().collect())
    }
}

// =============================================================================
// Wishlist Snapshot
// =============================================================================

/// Read-only copy of the wishlist store's item identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WishlistSnapshot(Vec<String>);

impl WishlistSnapshot {
    pub fn empty() -> Self {
        WishlistSnapshot(Vec::new())
    }

    pub fn item_ids(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for WishlistSnapshot {
    fn from(ids: Vec<String>) -> Self {
        WishlistSnapshot(ids)
    }
}

impl<'a> FromIterator<&'a str> for WishlistSnapshot {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        WishlistSnapshot(iter.into_iter().map(str::to_string).collect())
    }
}

// =============================================================================
// Icon Reference
// =============================================================================

/// Symbolic icon name. Rendering the glyph is the frontend's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum IconRef {
    Home,
    ShoppingCart,
    Grid,
    User,
    Info,
    Heart,
    Award,
    ShoppingBag,
    Search,
    Menu,
    Close,
    Sun,
    Moon,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle_is_involution() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.toggled().toggled(), theme);
        }
    }

    #[test]
    fn test_theme_toggle_icon() {
        assert_eq!(Theme::Dark.toggle_icon(), IconRef::Sun);
        assert_eq!(Theme::Light.toggle_icon(), IconRef::Moon);
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" Light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!("system".parse::<Theme>().is_err());
    }

    #[test]
    fn test_cart_line_wire_format() {
        let json = serde_json::to_string(&CartLine::new("a", 2)).unwrap();
        assert_eq!(json, r#"{"itemId":"a","quantity":2}"#);

        let snapshot: CartSnapshot =
            serde_json::from_str(r#"[{"itemId":"a","quantity":2},{"itemId":"b","quantity":3}]"#)
                .unwrap();
        assert_eq!(snapshot.lines().len(), 2);
    }

    #[test]
    fn test_icon_names_are_kebab_case() {
        let json = serde_json::to_string(&IconRef::ShoppingCart).unwrap();
        assert_eq!(json, r#""shopping-cart""#);
    }
}
