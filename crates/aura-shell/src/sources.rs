//! # State Sources
//!
//! Read interfaces of the external collaborators, plus in-memory stores
//! backed by `tokio::sync::watch` that implement them.
//!
//! ## Collaborators
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    External Collaborators                               │
//! │                                                                         │
//! │  Collaborator   Trait             Read              Write (by shell)    │
//! │  ────────────   ─────             ────              ────────────────    │
//! │  Cart store     SnapshotSource    snapshot()        never               │
//! │  Wishlist       SnapshotSource    snapshot()        never               │
//! │  Theme          ThemeSource       current()         set() on toggle     │
//! │  Router         RouteSource       current_path()    never               │
//! │  Viewport       ScrollSource      (watch only)      never               │
//! │                                                                         │
//! │  Every trait also hands out a watch::Receiver. The receiver IS the     │
//! │  subscription: dropping it deregisters, nothing can fire afterwards.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why watch?
//! A watch channel keeps only the latest value. Several writes between two
//! shell passes collapse into one observed change, which is exactly the
//! batching the shell needs.

use std::sync::Arc;

use aura_core::{CartSnapshot, ScrollState, Theme, WishlistSnapshot};
use tokio::sync::watch;

// =============================================================================
// Collaborator Traits
// =============================================================================

/// A store producing snapshots of `T`. `None` until the store is ready.
pub trait SnapshotSource<T>: Send + Sync {
    /// Latest snapshot.
    fn snapshot(&self) -> Option<T>;

    /// Change notifications.
    fn subscribe(&self) -> watch::Receiver<Option<T>>;
}

/// The process-wide theme setting.
pub trait ThemeSource: Send + Sync {
    fn current(&self) -> Theme;

    /// Requests a new theme. Persisting it is the collaborator's concern.
    fn set(&self, theme: Theme);

    fn subscribe(&self) -> watch::Receiver<Theme>;
}

/// The router's current location.
pub trait RouteSource: Send + Sync {
    fn current_path(&self) -> String;

    fn subscribe(&self) -> watch::Receiver<String>;
}

/// The viewport's scroll position.
pub trait ScrollSource: Send + Sync {
    fn subscribe(&self) -> watch::Receiver<ScrollState>;
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// A single value with change notification.
///
/// Writes are synchronous and never fail, even with no subscribers.
#[derive(Debug)]
pub struct Store<T> {
    tx: watch::Sender<T>,
}

impl<T> Store<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Store { tx }
    }

    /// Replaces the value and notifies subscribers.
    pub fn replace(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Raw receiver for this store.
    pub fn watch(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Store<T> {
    /// Copy of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T: PartialEq> Store<T> {
    /// Replaces the value, notifying only if it differs.
    pub fn set_if_changed(&self, value: T) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Store::new(T::default())
    }
}

impl<T> SnapshotSource<T> for Store<Option<T>>
where
    T: Clone + Send + Sync,
{
    fn snapshot(&self) -> Option<T> {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.tx.subscribe()
    }
}

impl ThemeSource for Store<Theme> {
    fn current(&self) -> Theme {
        *self.tx.borrow()
    }

    fn set(&self, theme: Theme) {
        self.set_if_changed(theme);
    }

    fn subscribe(&self) -> watch::Receiver<Theme> {
        self.tx.subscribe()
    }
}

impl RouteSource for Store<String> {
    fn current_path(&self) -> String {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }
}

impl ScrollSource for Store<ScrollState> {
    fn subscribe(&self) -> watch::Receiver<ScrollState> {
        self.tx.subscribe()
    }
}

/// Cart store stand-in: `None` until the store has loaded.
pub type CartStore = Store<Option<CartSnapshot>>;

/// Wishlist store stand-in.
pub type WishlistStore = Store<Option<WishlistSnapshot>>;

/// Theme setting.
pub type ThemeStore = Store<Theme>;

/// Router location.
pub type RouterStore = Store<String>;

/// Viewport scroll position.
pub type Viewport = Store<ScrollState>;

impl RouterStore {
    /// Router starting at `path`.
    pub fn at(path: impl Into<String>) -> Self {
        Store::new(path.into())
    }
}

impl Viewport {
    /// Emits a scroll event.
    pub fn scroll_to(&self, offset_y: f64) {
        self.replace(ScrollState::at(offset_y));
    }
}

// =============================================================================
// Source Bundle
// =============================================================================

/// Every read-side collaborator the shell subscribes to.
#[derive(Clone)]
pub struct ShellSources {
    pub cart: Arc<dyn SnapshotSource<CartSnapshot>>,
    pub wishlist: Arc<dyn SnapshotSource<WishlistSnapshot>>,
    pub theme: Arc<dyn ThemeSource>,
    pub router: Arc<dyn RouteSource>,
    /// `None` when the host has no scrolling viewport; the header then
    /// stays non-compact.
    pub scroll: Option<Arc<dyn ScrollSource>>,
}

/// Concrete in-memory stores, handy for hosts without their own.
#[derive(Clone, Default)]
pub struct LocalStores {
    pub cart: Arc<CartStore>,
    pub wishlist: Arc<WishlistStore>,
    pub theme: Arc<ThemeStore>,
    pub router: Arc<RouterStore>,
    pub viewport: Arc<Viewport>,
}

impl LocalStores {
    /// Stores with the given initial theme and path; cart and wishlist not
    /// yet loaded.
    pub fn new(theme: Theme, path: impl Into<String>) -> Self {
        LocalStores {
            cart: Arc::new(CartStore::default()),
            wishlist: Arc::new(WishlistStore::default()),
            theme: Arc::new(ThemeStore::new(theme)),
            router: Arc::new(RouterStore::at(path)),
            viewport: Arc::new(Viewport::default()),
        }
    }

    /// Bundles the stores as shell sources.
    pub fn sources(&self) -> ShellSources {
        ShellSources {
            cart: self.cart.clone(),
            wishlist: self.wishlist.clone(),
            theme: self.theme.clone(),
            router: self.router.clone(),
            scroll: Some(self.viewport.clone()),
        }
    }

    /// Live subscriptions across all stores.
    pub fn subscriber_count(&self) -> usize {
        self.cart.subscriber_count()
            + self.wishlist.subscriber_count()
            + self.theme.subscriber_count()
            + self.router.subscriber_count()
            + self.viewport.subscriber_count()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
