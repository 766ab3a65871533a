//! # Mobile Menu State Machine
//!
//! Open/closed lifecycle of the slide-out sheet. Independent of
//! [`crate::RenderState`]: transitions here never touch counts or theme.
//!
//! ## Transitions
//! ```text
//!                       Trigger
//!            ┌────────────────────────────┐
//!            │                            ▼
//!      ┌──────────┐                 ┌──────────┐
//!      │  Closed  │                 │   Open   │
//!      └──────────┘                 └──────────┘
//!            ▲                            │
//!            └────────────────────────────┘
//!             Close | OutsideDismiss | Navigate
//! ```
//! Every other (state, event) pair is a no-op.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Sheet visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuEvent {
    /// The menu button was activated.
    Trigger,
    /// The sheet's own close control.
    Close,
    /// Click/tap outside the sheet, or Escape.
    OutsideDismiss,
    /// An entry inside the sheet was selected.
    Navigate,
}

/// Outcome of applying an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened,
    Closed(MenuEvent),
    Ignored,
}

/// The mobile sheet's state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MobileMenu {
    state: MenuState,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Applies `event`.
    ///
    /// ```rust
    /// use aura_core::menu::{MenuEvent, MobileMenu, Transition};
    ///
    /// let mut menu = MobileMenu::new();
    /// assert_eq!(menu.apply(MenuEvent::Trigger), Transition::Opened);
    /// assert_eq!(menu.apply(MenuEvent::Navigate), Transition::Closed(MenuEvent::Navigate));
    /// assert_eq!(menu.apply(MenuEvent::Close), Transition::Ignored);
    /// ```
    pub fn apply(&mut self, event: MenuEvent) -> Transition {
        match (self.state, event) {
            (MenuState::Closed, MenuEvent::Trigger) => {
                self.state = MenuState::Open;
                Transition::Opened
            }
            (
                MenuState::Open,
                MenuEvent::Close | MenuEvent::OutsideDismiss | MenuEvent::Navigate,
            ) => {
                self.state = MenuState::Closed;
                Transition::Closed(event)
            }
            _ => Transition::Ignored,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_closing_event_closes() {
        for event in [MenuEvent::Close, MenuEvent::OutsideDismiss, MenuEvent::Navigate] {
            let mut menu = MobileMenu::new();
            menu.apply(MenuEvent::Trigger);
            assert!(menu.is_open());
            assert_eq!(menu.apply(event), Transition::Closed(event));
            assert_eq!(menu.state(), MenuState::Closed);
        }
    }

    #[test]
    fn test_no_op_transitions() {
        let mut menu = MobileMenu::new();
        for event in [MenuEvent::Close, MenuEvent::OutsideDismiss, MenuEvent::Navigate] {
            assert_eq!(menu.apply(event), Transition::Ignored);
            assert!(!menu.is_open());
        }

        menu.apply(MenuEvent::Trigger);
        assert_eq!(menu.apply(MenuEvent::Trigger), Transition::Ignored);
        assert!(menu.is_open());
    }
}
