//! # Navigation Model
//!
//! The static, ordered list of destinations shared by every render surface.
//!
//! ## Single Source of Truth
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    NavigationModel (built once)                         │
//! │                                                                         │
//! │   [ home "/" ] [ shop "/product" ] [ categories ] [ account ] [ about ] │
//! │         │                 │                                             │
//! │         └────────┬────────┴──────────────────┐                         │
//! │                  ▼                 ▼          ▼                         │
//! │           Desktop bar        Mobile sheet   Bottom tabs                 │
//! │                                                                         │
//! │  Every surface iterates the SAME slice in the SAME order. No surface   │
//! │  filters, reorders, or re-creates entries.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Construction Invariants
//! Checked once in [`NavigationModel::new`]:
//! - every field passes [`crate::validation`]
//! - ids are unique
//! - paths are unique (so exact route matching yields at most one entry)

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::IconRef;
use crate::validation::{validate_entry_id, validate_label, validate_path};

// =============================================================================
// Navigation Entry
// =============================================================================

/// A navigation destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NavigationEntry {
    /// Stable identifier, unique within the model.
    pub id: String,

    /// Base (English) label.
    pub label: String,

    /// Label in the storefront's locale. Preferred for display when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_label: Option<String>,

    /// Route path, matched exactly against the router's current path.
    pub path: String,

    /// Icon shown in the sheet and the bottom tabs.
    pub icon: IconRef,
}

impl NavigationEntry {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        path: impl Into<String>,
        icon: IconRef,
    ) -> Self {
        NavigationEntry {
            id: id.into(),
            label: label.into(),
            localized_label: None,
            path: path.into(),
            icon,
        }
    }

    /// Sets the localized label.
    pub fn localized(mut self, label: impl Into<String>) -> Self {
        self.localized_label = Some(label.into());
        self
    }

    /// Label to display: the localized one when preferred and present,
    /// otherwise the base label.
    pub fn display_label(&self, prefer_localized: bool) -> &str {
        match (&self.localized_label, prefer_localized) {
            (Some(localized), true) if !localized.trim().is_empty() => localized,
            _ => &self.label,
        }
    }

    fn validate(&self) -> CoreResult<()> {
        validate_entry_id(&self.id)?;
        validate_label("label", &self.label)?;
        if let Some(localized) = &self.localized_label {
            validate_label("localized_label", localized)?;
        }
        validate_path(&self.path)?;
        Ok(())
    }
}

// =============================================================================
// Navigation Model
// =============================================================================

/// The validated, immutable list of navigation entries.
///
/// Share it behind an `Arc`; [`NavigationModel::entries`] hands out the same
/// slice for the whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationModel {
    entries: Vec<NavigationEntry>,
    prefer_localized: bool,
}

impl NavigationModel {
    /// Builds a model, checking every construction invariant.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyModel`] for an empty list
    /// - [`CoreError::Validation`] for a malformed field
    /// - [`CoreError::DuplicateEntryId`] / [`CoreError::DuplicatePath`]
    ///
    /// ## Example
    /// ```rust
    /// use aura_core::{IconRef, NavigationEntry, NavigationModel};
    ///
    /// let model = NavigationModel::new(vec![
    ///     NavigationEntry::new("home", "Home", "/", IconRef::Home),
    ///     NavigationEntry::new("cart", "Cart", "/cart", IconRef::ShoppingBag),
    /// ])
    /// .unwrap();
    /// assert_eq!(model.len(), 2);
    ///
    /// let clash = NavigationModel::new(vec![
    ///     NavigationEntry::new("home", "Home", "/", IconRef::Home),
    ///     NavigationEntry::new("start", "Start", "/", IconRef::Home),
    /// ]);
    /// assert!(clash.is_err());
    /// ```
    pub fn new(entries: Vec<NavigationEntry>) -> CoreResult<Self> {
        if entries.is_empty() {
            return Err(CoreError::EmptyModel);
        }

        let mut ids: HashSet<&str> = HashSet::with_capacity(entries.len());
        let mut paths: HashMap<&str, &str> = HashMap::with_capacity(entries.len());

        for entry in &entries {
            entry.validate()?;

            if !ids.insert(entry.id.as_str()) {
                return Err(CoreError::DuplicateEntryId(entry.id.clone()));
            }

            if let Some(first) = paths.insert(entry.path.as_str(), entry.id.as_str()) {
                return Err(CoreError::DuplicatePath {
                    path: entry.path.clone(),
                    first: first.to_string(),
                    second: entry.id.clone(),
                });
            }
        }

        Ok(NavigationModel {
            entries,
            prefer_localized: true,
        })
    }

    /// The storefront's built-in catalog (Home, Shop, Categories, Account, About).
    pub fn storefront_default() -> Self {
        NavigationModel {
            entries: default_entries(),
            prefer_localized: true,
        }
    }

    /// Chooses between localized and base labels for display.
    pub fn with_prefer_localized(mut self, prefer_localized: bool) -> Self {
        self.prefer_localized = prefer_localized;
        self
    }

    pub fn prefer_localized(&self) -> bool {
        self.prefer_localized
    }

    /// All entries, in display order.
    #[inline]
    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &NavigationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: &str) -> Option<&NavigationEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Display label of an entry under this model's locale preference.
    pub fn label_of<'a>(&self, entry: &'a NavigationEntry) -> &'a str {
        entry.display_label(self.prefer_localized)
    }
}

impl Default for NavigationModel {
    fn default() -> Self {
        Self::storefront_default()
    }
}

/// Entries of the built-in catalog.
pub fn default_entries() -> Vec<NavigationEntry> {
    vec![
        NavigationEntry::new("home", "Home", "/", IconRef::Home).localized("หน้าหลัก"),
        NavigationEntry::new("shop", "Shop", "/product", IconRef::ShoppingCart)
            .localized("ร้านค้า"),
        NavigationEntry::new("categories", "Categories", "/categories", IconRef::Grid)
            .localized("หมวดหมู่"),
        NavigationEntry::new("account", "Account", "/account", IconRef::User)
            .localized("บัญชีผู้ใช้"),
        NavigationEntry::new("about", "About", "/about", IconRef::Info).localized("เกี่ยวกับ"),
    ]
}

// =============================================================================
// Header Actions
// =============================================================================

/// Secondary header controls: quick links with badges, the theme toggle and
/// the menu trigger. Not part of the navigation entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum HeaderAction {
    ToggleTheme,
    Points,
    Wishlist,
    Cart,
    Account,
    Search,
    OpenMenu,
}

impl HeaderAction {
    /// Actions in the wide-screen header, left to right.
    pub const DESKTOP: [HeaderAction; 5] = [
        HeaderAction::ToggleTheme,
        HeaderAction::Points,
        HeaderAction::Wishlist,
        HeaderAction::Cart,
        HeaderAction::Account,
    ];

    /// Actions in the narrow-screen header, left to right.
    pub const MOBILE: [HeaderAction; 4] = [
        HeaderAction::Points,
        HeaderAction::Wishlist,
        HeaderAction::Cart,
        HeaderAction::OpenMenu,
    ];

    /// Shortcut list at the bottom of the mobile sheet.
    pub const SHEET_FOOTER: [HeaderAction; 5] = [
        HeaderAction::Account,
        HeaderAction::Search,
        HeaderAction::Points,
        HeaderAction::Wishlist,
        HeaderAction::Cart,
    ];

    /// Link target, if the action is a link.
    pub const fn path(self) -> Option<&'static str> {
        match self {
            HeaderAction::Points => Some("/points"),
            HeaderAction::Wishlist => Some("/wishlist"),
            HeaderAction::Cart => Some("/cart"),
            _ => None,
        }
    }

    pub const fn icon(self) -> IconRef {
        match self {
            HeaderAction::ToggleTheme => IconRef::Moon,
            HeaderAction::Points => IconRef::Award,
            HeaderAction::Wishlist => IconRef::Heart,
            HeaderAction::Cart => IconRef::ShoppingBag,
            HeaderAction::Account => IconRef::User,
            HeaderAction::Search => IconRef::Search,
            HeaderAction::OpenMenu => IconRef::Menu,
        }
    }

    /// Accessible name of the control.
    pub const fn aria_label(self) -> &'static str {
        match self {
            HeaderAction::ToggleTheme => "Toggle theme",
            HeaderAction::Points => "Points",
            HeaderAction::Wishlist => "Wishlist",
            HeaderAction::Cart => "Cart",
            HeaderAction::Account => "Account",
            HeaderAction::Search => "Search",
            HeaderAction::OpenMenu => "Open menu",
        }
    }

    /// Label used in the sheet footer.
    pub const fn localized_label(self) -> &'static str {
        match self {
            HeaderAction::ToggleTheme => "สลับธีม",
            HeaderAction::Points => "คะแนนสะสม",
            HeaderAction::Wishlist => "สินค้าที่ชอบ",
            HeaderAction::Cart => "ตะกร้าสินค้า",
            HeaderAction::Account => "บัญชีผู้ใช้",
            HeaderAction::Search => "ค้นหา",
            HeaderAction::OpenMenu => "เมนูนำทาง",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
