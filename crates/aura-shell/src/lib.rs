//! # aura-shell: Navigation Shell Controller
//!
//! This crate keeps the storefront's three navigation surfaces in step with
//! the application state they display.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Navigation Shell Architecture                       │
//! │                                                                         │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐      │
//! │  │  Cart    │ │ Wishlist │ │  Theme   │ │  Router  │ │ Viewport │      │
//! │  │  store   │ │  store   │ │ setting  │ │          │ │ (scroll) │      │
//! │  └────┬─────┘ └────┬─────┘ └────┬─────┘ └────┬─────┘ └────┬─────┘      │
//! │       └────────────┴──── watch receivers ────┴────────────┘            │
//! │                               │                                         │
//! │                               ▼                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      NavShell (controller)                        │  │
//! │  │                                                                  │  │
//! │  │  ScrollModeTracker ─► RenderStateComposer (memoized, 1 / batch)  │  │
//! │  │  MobileMenu ─► Overlay (focus trap)                              │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │ Arc<RenderState>                        │
//! │                               ▼                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SurfaceSync                              │  │
//! │  │   Frame { revision, state, model, brand }                        │  │
//! │  │        │               │                 │              │        │  │
//! │  │        ▼               ▼                 ▼              ▼        │  │
//! │  │   DesktopBar      MobileSheet       BottomTabs     observers     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`sources`] - Collaborator traits and watch-backed stores
//! - [`overlay`] - Sheet open/close with focus trap and restore
//! - [`surfaces`] - The three render surfaces
//! - [`sync`] - Frame fan-out to the surfaces
//! - [`controller`] - `NavShell` lifecycle and user actions
//! - [`config`] - TOML + environment configuration
//! - [`logging`] - Subscriber setup
//! - [`error`] - Shell error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aura_shell::{init_tracing, LocalStores, NavShell, ShellConfig, SheetOverlay};
//!
//! let config = ShellConfig::load_or_default(None);
//! init_tracing(&config.logging.filter);
//!
//! let stores = LocalStores::new(config.theme.initial, "/");
//! let mut shell = NavShell::mount(
//!     Arc::new(config.navigation_model()?),
//!     config.shell_options(),
//!     stores.sources(),
//!     Arc::new(SheetOverlay::default()),
//! );
//!
//! stores.viewport.scroll_to(64.0);
//! let frame = shell.pump();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod overlay;
pub mod sources;
pub mod surfaces;
pub mod sync;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::ShellConfig;
pub use controller::{DispatchOutcome, NavShell, ShellAction, ShellHandle, ShellOptions};
pub use error::{ShellError, ShellResult};
pub use logging::init_tracing;
pub use overlay::{Overlay, SheetOverlay};
pub use sources::{
    LocalStores, RouteSource, ScrollSource, ShellSources, SnapshotSource, Store, ThemeSource,
};
pub use surfaces::{BottomTabs, DesktopBar, MobileSheet, RenderSurface, SurfaceKind};
pub use sync::{Frame, SurfaceSync};
