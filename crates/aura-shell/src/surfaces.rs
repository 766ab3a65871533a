//! # Render Surfaces
//!
//! The three presentations of the navigation state, plus the trait hosts
//! implement to observe frames themselves.
//!
//! A surface receives a [`Frame`] and nothing else. It builds its view with
//! the pure builders of `aura_core::views` and keeps the result for the host
//! to draw.

use std::fmt;
use std::sync::Arc;

use aura_core::views::{self, BottomTabsView, DesktopBarView, MobileSheetView};
use aura_core::RenderState;
use serde::{Deserialize, Serialize};

use crate::sync::Frame;

/// Which surface an action or view came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    DesktopBar,
    MobileSheet,
    BottomTabs,
    /// A host-registered observer.
    Observer,
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceKind::DesktopBar => write!(f, "desktop_bar"),
            SurfaceKind::MobileSheet => write!(f, "mobile_sheet"),
            SurfaceKind::BottomTabs => write!(f, "bottom_tabs"),
            SurfaceKind::Observer => write!(f, "observer"),
        }
    }
}

/// Something that draws frames.
pub trait RenderSurface: Send {
    fn kind(&self) -> SurfaceKind;

    /// Draws `frame`. Must not read any state besides the frame.
    fn render(&mut self, frame: &Frame);
}

/// A surface that keeps the last view it built.
pub struct ViewSurface<V> {
    kind: SurfaceKind,
    build: fn(&Frame) -> V,
    view: Option<V>,
    rendered: Option<Arc<RenderState>>,
    revision: Option<u64>,
    renders: u64,
}

impl<V> ViewSurface<V> {
    /// Last built view.
    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    /// Snapshot the last view was built from.
    pub fn last_state(&self) -> Option<&Arc<RenderState>> {
        self.rendered.as_ref()
    }

    /// Revision of the last rendered frame.
    pub fn last_revision(&self) -> Option<u64> {
        self.revision
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }
}

impl<V: Send> RenderSurface for ViewSurface<V> {
    fn kind(&self) -> SurfaceKind {
        self.kind
    }

    fn render(&mut self, frame: &Frame) {
        self.view = Some((self.build)(frame));
        self.rendered = Some(Arc::clone(&frame.state));
        self.revision = Some(frame.revision);
        self.renders += 1;
    }
}

impl<V: fmt::Debug> fmt::Debug for ViewSurface<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewSurface")
            .field("kind", &self.kind)
            .field("revision", &self.revision)
            .field("renders", &self.renders)
            .field("view", &self.view)
            .finish()
    }
}

/// The fixed header.
pub type DesktopBar = ViewSurface<DesktopBarView>;

/// The slide-out menu content.
pub type MobileSheet = ViewSurface<MobileSheetView>;

/// The bottom tab bar.
pub type BottomTabs = ViewSurface<BottomTabsView>;

impl ViewSurface<DesktopBarView> {
    pub fn new() -> Self {
        ViewSurface::with_builder(SurfaceKind::DesktopBar, |frame| {
            views::desktop_bar(&frame.state, &frame.model, &frame.brand)
        })
    }
}

impl ViewSurface<MobileSheetView> {
    pub fn new() -> Self {
        ViewSurface::with_builder(SurfaceKind::MobileSheet, |frame| {
            views::mobile_sheet(&frame.state, &frame.model, &frame.brand)
        })
    }
}

impl ViewSurface<BottomTabsView> {
    pub fn new() -> Self {
        ViewSurface::with_builder(SurfaceKind::BottomTabs, |frame| {
            views::bottom_tabs(&frame.state, &frame.model)
        })
    }
}

impl<V> ViewSurface<V> {
    /// Surface of `kind` building its view with `build`.
    pub fn with_builder(kind: SurfaceKind, build: fn(&Frame) -> V) -> Self {
        ViewSurface {
            kind,
            build,
            view: None,
            rendered: None,
            revision: None,
            renders: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_core::{Brand, NavigationModel, Theme};

    fn frame(revision: u64, cart: u64) -> Frame {
        Frame {
            revision,
            state: Arc::new(RenderState {
                total_cart_items: cart,
                active_entry_id: Some("home".to_string()),
                theme: Theme::Dark,
                ..RenderState::default()
            }),
            model: Arc::new(NavigationModel::storefront_default()),
            brand: Arc::new(Brand::default()),
        }
    }

    #[test]
    fn test_surface_keeps_last_view() {
        let mut bar = DesktopBar::new();
        assert!(bar.view().is_none());

        bar.render(&frame(1, 3));
        bar.render(&frame(2, 5));

        assert_eq!(bar.render_count(), 2);
        assert_eq!(bar.last_revision(), Some(2));
        assert_eq!(bar.last_state().map(|s| s.total_cart_items), Some(5));
        assert_eq!(bar.view().map(|v| v.links.len()), Some(5));
    }

    #[test]
    fn test_surface_kinds() {
        assert_eq!(DesktopBar::new().kind(), SurfaceKind::DesktopBar);
        assert_eq!(MobileSheet::new().kind(), SurfaceKind::MobileSheet);
        assert_eq!(BottomTabs::new().kind(), SurfaceKind::BottomTabs);
        assert_eq!(SurfaceKind::MobileSheet.to_string(), "mobile_sheet");
    }
}
