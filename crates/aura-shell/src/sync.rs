//! # Surface Synchronization
//!
//! Fans one render-state snapshot out to every surface.
//!
//! ## Frame Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         publish(state)                                  │
//! │                                                                         │
//! │   Arc<RenderState> ──► Frame { revision: n+1, state, model, brand }     │
//! │                          │                                              │
//! │          ┌───────────────┼────────────────┬──────────────────┐          │
//! │          ▼               ▼                ▼                  ▼          │
//! │     DesktopBar      BottomTabs     MobileSheet        observers         │
//! │                                    (only while open)                    │
//! │                          │                                              │
//! │                          └──► watch::Sender<Option<Frame>>              │
//! │                                                                         │
//! │  Opening the sheet renders it from the last frame. Nothing is          │
//! │  recomputed, so the sheet can never disagree with the header.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use aura_core::{Brand, NavigationModel, RenderState};
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::surfaces::{BottomTabs, DesktopBar, MobileSheet, RenderSurface};

/// One published snapshot, with everything a surface needs to draw it.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Increments by one per publish.
    pub revision: u64,
    pub state: Arc<RenderState>,
    pub model: Arc<NavigationModel>,
    pub brand: Arc<Brand>,
}

/// Owns the surfaces and keeps them on the same frame.
pub struct SurfaceSync {
    model: Arc<NavigationModel>,
    brand: Arc<Brand>,
    desktop: DesktopBar,
    sheet: MobileSheet,
    tabs: BottomTabs,
    observers: Vec<Box<dyn RenderSurface>>,
    sheet_open: bool,
    revision: u64,
    current: Option<Frame>,
    frame_tx: watch::Sender<Option<Frame>>,
}

impl SurfaceSync {
    pub fn new(model: Arc<NavigationModel>, brand: Arc<Brand>) -> Self {
        let (frame_tx, _rx) = watch::channel(None);
        SurfaceSync {
            model,
            brand,
            desktop: DesktopBar::new(),
            sheet: MobileSheet::new(),
            tabs: BottomTabs::new(),
            observers: Vec::new(),
            sheet_open: false,
            revision: 0,
            current: None,
            frame_tx,
        }
    }

    /// Wraps `state` in a new frame and renders every visible surface.
    pub fn publish(&mut self, state: Arc<RenderState>) -> Frame {
        self.revision += 1;
        let frame = Frame {
            revision: self.revision,
            state,
            model: Arc::clone(&self.model),
            brand: Arc::clone(&self.brand),
        };

        self.desktop.render(&frame);
        self.tabs.render(&frame);
        if self.sheet_open {
            self.sheet.render(&frame);
        }
        for observer in &mut self.observers {
            trace!(kind = %observer.kind(), revision = frame.revision, "Rendering observer");
            observer.render(&frame);
        }

        debug!(
            revision = frame.revision,
            compact = frame.state.compact,
            cart = frame.state.total_cart_items,
            wishlist = frame.state.total_wishlist_items,
            active = ?frame.state.active_entry_id,
            theme = %frame.state.theme,
            "Published frame"
        );

        self.current = Some(frame.clone());
        self.frame_tx.send_replace(Some(frame.clone()));
        frame
    }

    /// Shows or hides the sheet. Showing renders it from the last frame.
    pub fn set_sheet_open(&mut self, open: bool) {
        self.sheet_open = open;
        if !open {
            return;
        }
        if let Some(frame) = &self.current {
            self.sheet.render(frame);
        }
    }

    pub fn is_sheet_open(&self) -> bool {
        self.sheet_open
    }

    /// Registers an extra surface and brings it up to date.
    pub fn add_observer(&mut self, mut observer: Box<dyn RenderSurface>) {
        if let Some(frame) = &self.current {
            observer.render(frame);
        }
        self.observers.push(observer);
    }

    /// Frames as they are published. `None` before the first publish and
    /// after [`SurfaceSync::retire`].
    pub fn subscribe(&self) -> watch::Receiver<Option<Frame>> {
        self.frame_tx.subscribe()
    }

    /// Last published frame.
    pub fn frame(&self) -> Option<&Frame> {
        self.current.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn desktop(&self) -> &DesktopBar {
        &self.desktop
    }

    pub fn sheet(&self) -> &MobileSheet {
        &self.sheet
    }

    pub fn tabs(&self) -> &BottomTabs {
        &self.tabs
    }

    /// Drops the current frame and tells frame subscribers the shell is gone.
    /// Surfaces keep their last view.
    pub fn retire(&mut self) {
        self.sheet_open = false;
        self.current = None;
        self.frame_tx.send_replace(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::surfaces::SurfaceKind;

    fn sync() -> SurfaceSync {
        SurfaceSync::new(
            Arc::new(NavigationModel::storefront_default()),
            Arc::new(Brand::default()),
        )
    }

    fn state(cart: u64) -> Arc<RenderState> {
        Arc::new(RenderState {
            total_cart_items: cart,
            ..RenderState::default()
        })
    }

    struct Recorder(Arc<Mutex<Vec<u64>>>);

    impl RenderSurface for Recorder {
        fn kind(&self) -> SurfaceKind {
            SurfaceKind::Observer
        }

        fn render(&mut self, frame: &Frame) {
            if let Ok(mut seen) = self.0.lock() {
                seen.push(frame.revision);
            }
        }
    }

    #[test]
    fn test_publish_renders_visible_surfaces() {
        let mut sync = sync();
        let frame = sync.publish(state(2));

        assert_eq!(frame.revision, 1);
        assert_eq!(sync.desktop().render_count(), 1);
        assert_eq!(sync.tabs().render_count(), 1);
        assert_eq!(sync.sheet().render_count(), 0);
    }

    #[test]
    fn test_opening_sheet_reuses_last_frame() {
        let mut sync = sync();
        sync.publish(state(5));
        sync.set_sheet_open(true);

        let desktop = sync.desktop().last_state().cloned();
        let sheet = sync.sheet().last_state().cloned();
        assert!(matches!((desktop, sheet), (Some(a), Some(b)) if Arc::ptr_eq(&a, &b)));
        assert_eq!(sync.sheet().last_revision(), Some(1));
        assert_eq!(sync.revision(), 1);

        // While open, the sheet follows every publish
        sync.publish(state(6));
        assert_eq!(sync.sheet().last_revision(), Some(2));

        sync.set_sheet_open(false);
        sync.publish(state(7));
        assert_eq!(sync.sheet().last_revision(), Some(2));
    }

    #[test]
    fn test_observer_caught_up_then_follows() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut sync = sync();
        sync.publish(state(1));
        sync.add_observer(Box::new(Recorder(Arc::clone(&seen))));
        sync.publish(state(2));

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_frame_channel_tracks_publishes() {
        let mut sync = sync();
        let mut rx = sync.subscribe();
        assert!(rx.borrow_and_update().is_none());

        sync.publish(state(3));
        sync.publish(state(4));
        assert!(rx.has_changed().unwrap());
        let latest = rx.borrow_and_update().clone();
        assert_eq!(latest.map(|f| f.state.total_cart_items), Some(4));

        sync.retire();
        assert!(rx.borrow_and_update().is_none());
        assert!(sync.frame().is_none());
    }
}
