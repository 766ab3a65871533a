//! # aura-core: Pure View-State Logic for the AuraClear Navigation Shell
//!
//! This crate derives everything the storefront's navigation surfaces draw
//! from the state of external stores. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Navigation Shell Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        External stores (cart, wishlist, theme, router, scroll)  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ watch channels                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               aura-shell (NavShell, SurfaceSync)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ RenderInputs                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ aura-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  scroll   │  │ aggregate │  │   route   │  │navigation │  │   │
//! │  │   │  compact  │  │  badges   │  │  active   │  │  entries  │  │   │
//! │  │   └─────┬─────┘  └─────┬─────┘  └─────┬─────┘  └───────────┘  │   │
//! │  │         └──────────────┼──────────────┘                        │   │
//! │  │                  ┌─────▼─────┐        ┌───────────┐             │   │
//! │  │                  │  render   │───────►│   views   │             │   │
//! │  │                  │RenderState│        │ 3 surfaces│             │   │
//! │  │                  └───────────┘        └───────────┘             │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CHANNELS • NO LOGGING • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Snapshot and theme types read from collaborators
//! - [`navigation`] - The validated, immutable NavigationModel
//! - [`scroll`] - Edge-triggered compact-mode tracker
//! - [`aggregate`] - Cart and wishlist badge counts
//! - [`route`] - Exact-match active entry lookup
//! - [`render`] - RenderState composition and memoization
//! - [`menu`] - Mobile sheet open/closed state machine
//! - [`views`] - View models for the desktop bar, sheet and bottom tabs
//! - [`error`] - Model construction errors
//! - [`validation`] - Entry field validation
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use aura_core::{CartLine, CartSnapshot, NavigationModel, RenderInputs, RenderStateComposer};
//!
//! let model = Arc::new(NavigationModel::storefront_default());
//! let mut composer = RenderStateComposer::new(Arc::clone(&model));
//!
//! let composition = composer.compose(RenderInputs {
//!     cart: Some(CartSnapshot::from(vec![CartLine::new("serum", 2)])),
//!     current_path: "/product".to_string(),
//!     ..RenderInputs::default()
//! });
//!
//! assert_eq!(composition.state.total_cart_items, 2);
//! assert_eq!(composition.state.active_entry_id.as_deref(), Some("shop"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod error;
pub mod menu;
pub mod navigation;
pub mod render;
pub mod route;
pub mod scroll;
pub mod types;
pub mod validation;
pub mod views;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use menu::{MenuEvent, MenuState, MobileMenu, Transition};
pub use navigation::{HeaderAction, NavigationEntry, NavigationModel};
pub use render::{compose, Composition, RenderInputs, RenderState, RenderStateComposer};
pub use scroll::{ScrollModeTracker, COMPACT_THRESHOLD_PX};
pub use types::*;
pub use views::{BottomTabsView, Brand, DesktopBarView, MobileSheetView};
