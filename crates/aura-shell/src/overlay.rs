//! # Overlay Collaborator
//!
//! The sheet primitive that actually shows the mobile menu. It owns the
//! open/closed state: the shell asks it to open or close, but the overlay may
//! also close itself (Escape, a tap outside) and publishes every change on a
//! watch channel the shell follows. Focus handling is entirely its own.
//!
//! ## Accessibility Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  open()                                                                 │
//! │    1. remember the element that had focus (the menu trigger)           │
//! │    2. trap focus inside the sheet                                      │
//! │                                                                         │
//! │  close()                                                                │
//! │    1. release the trap                                                 │
//! │    2. restore focus to the remembered element                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Mutex, MutexGuard};

use tokio::sync::watch;

/// Element id the sheet focuses when it opens.
pub const SHEET_FOCUS_TARGET: &str = "nav-sheet";

/// Open/close control of the sheet primitive.
pub trait Overlay: Send + Sync {
    fn open(&self);
    fn close(&self);
    fn is_open(&self) -> bool;

    /// Open/closed changes, including the ones the overlay makes on its own.
    fn subscribe(&self) -> watch::Receiver<bool>;
}

#[derive(Debug)]
struct SheetInner {
    focused: String,
    restore_to: Option<String>,
}

/// In-memory sheet that keeps the focus bookkeeping a real overlay would.
#[derive(Debug)]
pub struct SheetOverlay {
    inner: Mutex<SheetInner>,
    open_tx: watch::Sender<bool>,
}

impl SheetOverlay {
    /// Sheet whose trigger currently holds focus.
    pub fn new(initial_focus: impl Into<String>) -> Self {
        SheetOverlay {
            inner: Mutex::new(SheetInner {
                focused: initial_focus.into(),
                restore_to: None,
            }),
            open_tx: watch::channel(false).0,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SheetInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Element that currently holds focus.
    pub fn focused(&self) -> String {
        self.lock().focused.clone()
    }

    /// Whether focus is confined to the sheet.
    pub fn focus_trapped(&self) -> bool {
        self.lock().restore_to.is_some()
    }

    /// Moves focus, as a user tabbing would. Ignored while trapped unless the
    /// target is inside the sheet.
    pub fn move_focus(&self, element: impl Into<String>) -> bool {
        let element = element.into();
        let mut inner = self.lock();
        if inner.restore_to.is_some() && !element.starts_with(SHEET_FOCUS_TARGET) {
            return false;
        }
        inner.focused = element;
        true
    }
}

impl Default for SheetOverlay {
    fn default() -> Self {
        SheetOverlay::new("menu-trigger")
    }
}

impl Overlay for SheetOverlay {
    fn open(&self) {
        let mut inner = self.lock();
        if *self.open_tx.borrow() {
            return;
        }
        let previous = std::mem::replace(&mut inner.focused, SHEET_FOCUS_TARGET.to_string());
        inner.restore_to = Some(previous);
        self.open_tx.send_replace(true);
    }

    fn close(&self) {
        let mut inner = self.lock();
        if !*self.open_tx.borrow() {
            return;
        }
        if let Some(previous) = inner.restore_to.take() {
            inner.focused = previous;
        }
        self.open_tx.send_replace(false);
    }

    fn is_open(&self) -> bool {
        *self.open_tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.open_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_trapped_and_restored() {
        let sheet = SheetOverlay::new("menu-trigger");
        sheet.open();
        assert!(sheet.is_open());
        assert!(sheet.focus_trapped());
        assert_eq!(sheet.focused(), SHEET_FOCUS_TARGET);

        // Tabbing out of the sheet is refused while trapped
        assert!(!sheet.move_focus("search-box"));
        assert!(sheet.move_focus("nav-sheet-link-shop"));

        sheet.close();
        assert!(!sheet.is_open());
        assert!(!sheet.focus_trapped());
        assert_eq!(sheet.focused(), "menu-trigger");
    }

    #[test]
    fn test_open_and_close_are_idempotent() {
        let sheet = SheetOverlay::default();
        sheet.close();
        assert_eq!(sheet.focused(), "menu-trigger");

        sheet.open();
        sheet.open();
        sheet.close();
        assert_eq!(sheet.focused(), "menu-trigger");
    }

    #[test]
    fn test_open_state_is_published() {
        let sheet = SheetOverlay::default();
        let mut rx = sheet.subscribe();
        assert!(!*rx.borrow_and_update());

        sheet.open();
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());

        // Repeated opens do not notify
        sheet.open();
        assert!(!rx.has_changed().unwrap());

        sheet.close();
        assert!(!*rx.borrow_and_update());
    }
}
