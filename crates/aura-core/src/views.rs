//! # Surface View Models
//!
//! Pure builders that turn `(RenderState, NavigationModel)` into what each
//! render surface draws. Builders take nothing else: a surface cannot read a
//! store, so it cannot disagree with its siblings.
//!
//! ## Surfaces
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ DesktopBarView                                                          │
//! │  AuraClear   หน้าหลัก ร้านค้า หมวดหมู่ ...     ☾  ★  ♥(1)  🛍(5)  👤       │
//! └─────────────────────────────────────────────────────────────────────────┘
//!                                          ┌──────────────────────────────┐
//!                                          │ MobileSheetView              │
//!                                          │  AuraClear              ☾    │
//!                                          │  ⌂ หน้าหลัก                   │
//!                                          │  🛒 ร้านค้า                   │
//!                                          │  ...                         │
//!                                          │  [บัญชีผู้ใช้] [ค้นหา] ...      │
//!                                          └──────────────────────────────┘
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ BottomTabsView     ⌂        🛒        ▦        👤        ⓘ             │
//! │                  ▔▔▔▔                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! All three iterate [`NavigationModel::entries`] through [`nav_links`], so
//! order and subset are identical by construction.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::aggregate::Badge;
use crate::navigation::{HeaderAction, NavigationModel};
use crate::render::RenderState;
use crate::types::{IconRef, Theme};

/// Title announced to screen readers when the sheet opens.
pub const SHEET_TITLE: &str = "เมนูนำทาง";

// =============================================================================
// Shared Pieces
// =============================================================================

/// Wordmark in the header and the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Brand {
    #[serde(default = "default_brand_name")]
    pub name: String,
    /// Second half of the wordmark, drawn in the accent color.
    #[serde(default = "default_brand_accent")]
    pub accent: String,
}

fn default_brand_name() -> String {
    "Aura".to_string()
}

fn default_brand_accent() -> String {
    "Clear".to_string()
}

impl Default for Brand {
    fn default() -> Self {
        Brand {
            name: default_brand_name(),
            accent: default_brand_accent(),
        }
    }
}

/// Header background treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum HeaderChrome {
    /// Page top: no background.
    Transparent,
    /// Scrolled: blurred solid background with shadow.
    Solid,
}

impl HeaderChrome {
    pub fn for_compact(compact: bool) -> Self {
        if compact {
            HeaderChrome::Solid
        } else {
            HeaderChrome::Transparent
        }
    }
}

/// One navigation link as drawn by any surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NavLinkView {
    pub id: String,
    pub label: String,
    pub path: String,
    pub icon: IconRef,
    pub active: bool,
}

/// One header control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActionView {
    pub action: HeaderAction,
    pub icon: IconRef,
    pub path: Option<String>,
    pub aria_label: String,
    pub badge: Option<Badge>,
}

/// Links for every entry, in model order, with the active flag applied.
pub fn nav_links(state: &RenderState, model: &NavigationModel) -> Vec<NavLinkView> {
    model
        .iter()
        .map(|entry| NavLinkView {
            id: entry.id.clone(),
            label: model.label_of(entry).to_string(),
            path: entry.path.clone(),
            icon: entry.icon,
            active: state.is_active(&entry.id),
        })
        .collect()
}

/// View of a single header control under `state`.
pub fn action_view(action: HeaderAction, state: &RenderState) -> ActionView {
    let (icon, badge) = match action {
        HeaderAction::ToggleTheme => (state.theme.toggle_icon(), None),
        HeaderAction::Wishlist => (action.icon(), Badge::for_count(state.total_wishlist_items)),
        HeaderAction::Cart => (action.icon(), Badge::for_count(state.total_cart_items)),
        _ => (action.icon(), None),
    };

    ActionView {
        action,
        icon,
        path: action.path().map(str::to_string),
        aria_label: action.aria_label().to_string(),
        badge,
    }
}

fn action_views(actions: &[HeaderAction], state: &RenderState) -> Vec<ActionView> {
    actions.iter().map(|a| action_view(*a, state)).collect()
}

// =============================================================================
// Desktop Bar
// =============================================================================

/// The fixed header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DesktopBarView {
    pub chrome: HeaderChrome,
    pub brand: Brand,
    pub theme: Theme,
    pub links: Vec<NavLinkView>,
    /// Controls shown on wide screens.
    pub actions: Vec<ActionView>,
    /// Controls shown on narrow screens (ends with the menu trigger).
    pub mobile_actions: Vec<ActionView>,
}

pub fn desktop_bar(state: &RenderState, model: &NavigationModel, brand: &Brand) -> DesktopBarView {
    DesktopBarView {
        chrome: HeaderChrome::for_compact(state.compact),
        brand: brand.clone(),
        theme: state.theme,
        links: nav_links(state, model),
        actions: action_views(&HeaderAction::DESKTOP, state),
        mobile_actions: action_views(&HeaderAction::MOBILE, state),
    }
}

// =============================================================================
// Mobile Sheet
// =============================================================================

/// A shortcut row in the sheet footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SheetShortcutView {
    pub action: ActionView,
    pub label: String,
}

/// Content of the slide-out sheet. Visibility is the overlay's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MobileSheetView {
    pub title: String,
    pub brand: Brand,
    pub theme: Theme,
    pub theme_toggle: ActionView,
    pub links: Vec<NavLinkView>,
    pub shortcuts: Vec<SheetShortcutView>,
    /// Cart badge, repeated here so the open sheet shows the same count as
    /// the header behind it.
    pub cart_badge: Option<Badge>,
    pub wishlist_badge: Option<Badge>,
}

pub fn mobile_sheet(state: &RenderState, model: &NavigationModel, brand: &Brand) -> MobileSheetView {
    MobileSheetView {
        title: SHEET_TITLE.to_string(),
        brand: brand.clone(),
        theme: state.theme,
        theme_toggle: action_view(HeaderAction::ToggleTheme, state),
        links: nav_links(state, model),
        shortcuts: HeaderAction::SHEET_FOOTER
            .iter()
            .map(|action| SheetShortcutView {
                action: action_view(*action, state),
                label: action.localized_label().to_string(),
            })
            .collect(),
        cart_badge: Badge::for_count(state.total_cart_items),
        wishlist_badge: Badge::for_count(state.total_wishlist_items),
    }
}

// =============================================================================
// Bottom Tabs
// =============================================================================

/// One tab of the bottom bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TabView {
    pub link: NavLinkView,
    /// Underline marker under the active tab.
    pub indicator: bool,
}

/// The app-like bottom tab bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BottomTabsView {
    pub tabs: Vec<TabView>,
}

pub fn bottom_tabs(state: &RenderState, model: &NavigationModel) -> BottomTabsView {
    BottomTabsView {
        tabs: nav_links(state, model)
            .into_iter()
            .map(|link| TabView {
                indicator: link.active,
                link,
            })
            .collect(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
