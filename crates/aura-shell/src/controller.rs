//! # Navigation Shell Controller
//!
//! Mount-scoped owner of every subscription the navigation shell holds.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        NavShell Lifecycle                               │
//! │                                                                         │
//! │  mount()                                                               │
//! │    • subscribe to cart, wishlist, theme, router (and viewport)         │
//! │    • publish frame #1 from the current values                          │
//! │                                                                         │
//! │  pump()                         one call = one batch                   │
//! │    • read every source once                                            │
//! │    • scroll offset ──► ScrollModeTracker ──► compact                   │
//! │    • RenderStateComposer (memoized)                                    │
//! │    • publish a frame only when the snapshot changed                    │
//! │                                                                         │
//! │    • follow the overlay if it opened or closed on its own              │
//! │                                                                         │
//! │  dispatch(action)               user intents from any surface          │
//! │    • ToggleTheme ──► ThemeSource::set                                  │
//! │    • menu events ──► MobileMenu ──► Overlay::open/close                │
//! │    • Select      ──► closes the menu, returns the path to route to     │
//! │                                                                         │
//! │  unmount() / Drop                                                      │
//! │    • drop every receiver (deregisters synchronously)                   │
//! │    • close the overlay, retire the frame channel                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Driving Modes
//! A host on its own event loop calls [`NavShell::pump`] after each input
//! batch. An async host hands the shell to [`NavShell::spawn`] and talks to
//! it through a [`ShellHandle`]; the loop then pumps whenever a source
//! changes. Watch receivers only keep the latest value, so a burst of writes
//! between two passes still yields one recompute.

use std::fmt;
use std::future::pending;
use std::sync::Arc;

use aura_core::{
    Brand, CartSnapshot, HeaderAction, MenuEvent, MobileMenu, NavigationModel, RenderInputs,
    RenderStateComposer, ScrollModeTracker, ScrollState, Theme, Transition, WishlistSnapshot,
    COMPACT_THRESHOLD_PX,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::error::{ShellError, ShellResult};
use crate::overlay::Overlay;
use crate::sources::ShellSources;
use crate::surfaces::{RenderSurface, SurfaceKind};
use crate::sync::{Frame, SurfaceSync};

// =============================================================================
// Options & Actions
// =============================================================================

/// Mount-time settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellOptions {
    pub brand: Brand,
    /// Offset above which the header turns compact.
    pub compact_threshold: f64,
}

impl Default for ShellOptions {
    fn default() -> Self {
        ShellOptions {
            brand: Brand::default(),
            compact_threshold: COMPACT_THRESHOLD_PX,
        }
    }
}

/// A user intent raised by one of the surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShellAction {
    /// The theme button, from the desktop bar or the sheet.
    ToggleTheme { from: SurfaceKind },
    /// The menu trigger.
    OpenMenu,
    /// The sheet's close control.
    CloseMenu,
    /// Tap outside the sheet, or Escape.
    DismissMenu,
    /// A navigation entry was selected.
    Select { entry_id: String, from: SurfaceKind },
    /// A header or sheet-footer shortcut was activated.
    Activate { action: HeaderAction, from: SurfaceKind },
}

/// What [`NavShell::dispatch`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The theme collaborator was asked to switch to this theme.
    ThemeRequested(Theme),
    /// The mobile menu moved (or refused to).
    Menu(Transition),
    /// The host should route to `path`. Any open menu has been closed.
    Navigate { path: String, menu: Transition },
    /// Nothing to do.
    Ignored,
}

// =============================================================================
// Subscriptions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceId {
    Cart,
    Wishlist,
    Theme,
    Route,
    Scroll,
    Overlay,
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::Cart => write!(f, "cart"),
            SourceId::Wishlist => write!(f, "wishlist"),
            SourceId::Theme => write!(f, "theme"),
            SourceId::Route => write!(f, "route"),
            SourceId::Scroll => write!(f, "scroll"),
            SourceId::Overlay => write!(f, "overlay"),
        }
    }
}

enum Wake {
    Changed(SourceId),
    Closed(SourceId),
}

impl Wake {
    fn from_recv(source: SourceId, ok: bool) -> Self {
        if ok {
            Wake::Changed(source)
        } else {
            Wake::Closed(source)
        }
    }
}

enum LoopEvent {
    Shutdown,
    Command(ShellCommand),
    Wake(Wake),
}

/// The receivers held while mounted. Dropping this struct is the
/// deregistration.
struct Subscriptions {
    cart: watch::Receiver<Option<CartSnapshot>>,
    wishlist: watch::Receiver<Option<WishlistSnapshot>>,
    theme: watch::Receiver<Theme>,
    route: watch::Receiver<String>,
    scroll: Option<watch::Receiver<ScrollState>>,
    overlay: watch::Receiver<bool>,
    closed: Vec<SourceId>,
}

impl Subscriptions {
    fn open(sources: &ShellSources, overlay: &dyn Overlay) -> Self {
        Subscriptions {
            cart: sources.cart.subscribe(),
            wishlist: sources.wishlist.subscribe(),
            theme: sources.theme.subscribe(),
            route: sources.router.subscribe(),
            scroll: sources.scroll.as_ref().map(|s| s.subscribe()),
            overlay: overlay.subscribe(),
            closed: Vec::new(),
        }
    }

    fn is_live(&self, source: SourceId) -> bool {
        !self.closed.contains(&source)
    }

    /// Whether every required source has gone away. The viewport is optional.
    fn all_closed(&self) -> bool {
        [SourceId::Cart, SourceId::Wishlist, SourceId::Theme, SourceId::Route]
            .iter()
            .all(|s| self.closed.contains(s))
    }

    /// Reads every source once, marking all of them seen.
    fn read(&mut self, tracker: &mut ScrollModeTracker) -> RenderInputs {
        if let Some(scroll) = self.scroll.as_mut() {
            let state = *scroll.borrow_and_update();
            if let Some(compact) = tracker.observe(state) {
                debug!(offset_y = state.offset_y, compact, "Compact mode changed");
            }
        }

        RenderInputs {
            compact: tracker.is_compact(),
            cart: self.cart.borrow_and_update().clone(),
            wishlist: self.wishlist.borrow_and_update().clone(),
            current_path: self.route.borrow_and_update().clone(),
            theme: *self.theme.borrow_and_update(),
        }
    }

    /// Resolves once any live source changes or closes.
    async fn changed(&mut self) -> Wake {
        let cart_live = self.is_live(SourceId::Cart);
        let wishlist_live = self.is_live(SourceId::Wishlist);
        let theme_live = self.is_live(SourceId::Theme);
        let route_live = self.is_live(SourceId::Route);
        let scroll_live = self.is_live(SourceId::Scroll);
        let overlay_live = self.is_live(SourceId::Overlay);

        tokio::select! {
            ok = wait(&mut self.cart, cart_live) => Wake::from_recv(SourceId::Cart, ok),
            ok = wait(&mut self.wishlist, wishlist_live) => Wake::from_recv(SourceId::Wishlist, ok),
            ok = wait(&mut self.theme, theme_live) => Wake::from_recv(SourceId::Theme, ok),
            ok = wait(&mut self.route, route_live) => Wake::from_recv(SourceId::Route, ok),
            ok = wait_optional(self.scroll.as_mut(), scroll_live) => Wake::from_recv(SourceId::Scroll, ok),
            ok = wait(&mut self.overlay, overlay_live) => Wake::from_recv(SourceId::Overlay, ok),
        }
    }
}

/// `true` on change, `false` once the sender is gone. Never resolves for a
/// source already known to be closed.
async fn wait<T>(rx: &mut watch::Receiver<T>, live: bool) -> bool {
    if !live {
        return pending().await;
    }
    rx.changed().await.is_ok()
}

async fn wait_optional<T>(rx: Option<&mut watch::Receiver<T>>, live: bool) -> bool {
    match rx {
        Some(rx) => wait(rx, live).await,
        None => pending().await,
    }
}

// =============================================================================
// Controller
// =============================================================================

/// The view-state synchronization controller.
pub struct NavShell {
    model: Arc<NavigationModel>,
    sources: ShellSources,
    overlay: Arc<dyn Overlay>,
    subscriptions: Option<Subscriptions>,
    tracker: ScrollModeTracker,
    composer: RenderStateComposer,
    surfaces: SurfaceSync,
    menu: MobileMenu,
}

impl NavShell {
    /// Subscribes to every source and publishes the first frame.
    pub fn mount(
        model: Arc<NavigationModel>,
        options: ShellOptions,
        sources: ShellSources,
        overlay: Arc<dyn Overlay>,
    ) -> Self {
        let subscriptions = Subscriptions::open(&sources, overlay.as_ref());
        if subscriptions.scroll.is_none() {
            info!("No scroll source, header stays non-compact");
        }

        let mut shell = NavShell {
            composer: RenderStateComposer::new(Arc::clone(&model)),
            surfaces: SurfaceSync::new(Arc::clone(&model), Arc::new(options.brand)),
            tracker: ScrollModeTracker::with_threshold(options.compact_threshold),
            model,
            sources,
            overlay,
            subscriptions: Some(subscriptions),
            menu: MobileMenu::new(),
        };

        shell.pump();
        info!(
            entries = shell.model.len(),
            threshold = shell.tracker.threshold(),
            "Navigation shell mounted"
        );
        shell
    }

    pub fn is_mounted(&self) -> bool {
        self.subscriptions.is_some()
    }

    /// Runs one batch: reads every source, recomputes if an input changed,
    /// and publishes if the snapshot changed. Returns the published frame.
    pub fn pump(&mut self) -> Option<Frame> {
        self.follow_overlay();
        let subscriptions = self.subscriptions.as_mut()?;
        let inputs = subscriptions.read(&mut self.tracker);

        let composition = self.composer.compose(inputs);
        if composition.recomputed {
            trace!(
                recomputes = self.composer.recompute_count(),
                changed = composition.changed,
                "Render state recomputed"
            );
        }

        if !composition.changed && self.surfaces.frame().is_some() {
            return None;
        }
        Some(self.surfaces.publish(composition.state))
    }

    /// Handles a user intent.
    pub fn dispatch(&mut self, action: ShellAction) -> DispatchOutcome {
        if !self.is_mounted() {
            warn!(?action, "Dispatch after unmount ignored");
            return DispatchOutcome::Ignored;
        }
        debug!(?action, "Dispatching shell action");
        self.follow_overlay();

        match action {
            ShellAction::ToggleTheme { from } => {
                let next = self.sources.theme.current().toggled();
                debug!(%from, theme = %next, "Theme toggle requested");
                self.sources.theme.set(next);
                DispatchOutcome::ThemeRequested(next)
            }
            ShellAction::OpenMenu => DispatchOutcome::Menu(self.apply_menu(MenuEvent::Trigger)),
            ShellAction::CloseMenu => DispatchOutcome::Menu(self.apply_menu(MenuEvent::Close)),
            ShellAction::DismissMenu => {
                DispatchOutcome::Menu(self.apply_menu(MenuEvent::OutsideDismiss))
            }
            ShellAction::Select { entry_id, from } => {
                let Some(path) = self.model.get(&entry_id).map(|e| e.path.clone()) else {
                    warn!(%entry_id, %from, "Selected unknown navigation entry");
                    return DispatchOutcome::Ignored;
                };
                let menu = self.apply_menu(MenuEvent::Navigate);
                DispatchOutcome::Navigate { path, menu }
            }
            ShellAction::Activate { action, from } => match action {
                HeaderAction::ToggleTheme => self.dispatch(ShellAction::ToggleTheme { from }),
                HeaderAction::OpenMenu => self.dispatch(ShellAction::OpenMenu),
                _ => match action.path() {
                    Some(path) => {
                        let menu = self.apply_menu(MenuEvent::Navigate);
                        DispatchOutcome::Navigate {
                            path: path.to_string(),
                            menu,
                        }
                    }
                    None => {
                        debug!(?action, %from, "Shortcut has no route");
                        DispatchOutcome::Ignored
                    }
                },
            },
        }
    }

    /// Brings the menu in line with the overlay, which may have opened or
    /// closed without going through the shell.
    fn follow_overlay(&mut self) {
        let Some(subscriptions) = self.subscriptions.as_mut() else {
            return;
        };
        let open = *subscriptions.overlay.borrow_and_update();
        if open == self.menu.is_open() {
            return;
        }
        let event = if open {
            MenuEvent::Trigger
        } else {
            MenuEvent::OutsideDismiss
        };
        self.menu.apply(event);
        self.surfaces.set_sheet_open(open);
        debug!(open, "Menu followed the overlay");
    }

    fn apply_menu(&mut self, event: MenuEvent) -> Transition {
        let transition = self.menu.apply(event);
        match transition {
            Transition::Opened => {
                self.overlay.open();
                self.surfaces.set_sheet_open(true);
            }
            Transition::Closed(_) => {
                self.overlay.close();
                self.surfaces.set_sheet_open(false);
            }
            Transition::Ignored => {}
        }
        trace!(?event, ?transition, "Menu event applied");
        transition
    }

    /// Drops every subscription and closes the overlay. Idempotent.
    pub fn unmount(&mut self) {
        if self.subscriptions.take().is_none() {
            return;
        }
        if self.menu.is_open() {
            self.menu.apply(MenuEvent::Close);
        }
        if self.overlay.is_open() {
            self.overlay.close();
        }
        self.tracker.reset();
        self.composer.clear();
        self.surfaces.retire();
        info!("Navigation shell unmounted");
    }

    /// Registers an extra render surface.
    pub fn add_surface(&mut self, surface: Box<dyn RenderSurface>) {
        self.surfaces.add_observer(surface);
    }

    /// Published frames.
    pub fn subscribe_frames(&self) -> watch::Receiver<Option<Frame>> {
        self.surfaces.subscribe()
    }

    pub fn surfaces(&self) -> &SurfaceSync {
        &self.surfaces
    }

    pub fn model(&self) -> &Arc<NavigationModel> {
        &self.model
    }

    pub fn menu(&self) -> &MobileMenu {
        &self.menu
    }

    /// How many times the render state has been derived.
    pub fn recompute_count(&self) -> u64 {
        self.composer.recompute_count()
    }

    /// Moves the shell onto its own task.
    pub fn spawn(self) -> ShellResult<(ShellHandle, JoinHandle<ShellResult<()>>)> {
        if !self.is_mounted() {
            return Err(ShellError::NotMounted);
        }
        let (command_tx, command_rx) = mpsc::channel(32);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let handle = ShellHandle {
            command_tx,
            shutdown_tx,
            frames: self.subscribe_frames(),
        };
        let task = tokio::spawn(self.run(command_rx, shutdown_rx));
        Ok((handle, task))
    }

    /// Pumps whenever a source changes and dispatches incoming commands,
    /// until shutdown. Unmounts on every exit path.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<ShellCommand>,
        mut shutdown: mpsc::Receiver<()>,
    ) -> ShellResult<()> {
        if !self.is_mounted() {
            return Err(ShellError::NotMounted);
        }
        info!("Navigation shell loop started");

        let result = loop {
            let Some(subscriptions) = self.subscriptions.as_mut() else {
                break Err(ShellError::NotMounted);
            };

            let event = tokio::select! {
                _ = shutdown.recv() => LoopEvent::Shutdown,
                Some(command) = commands.recv() => LoopEvent::Command(command),
                wake = subscriptions.changed() => LoopEvent::Wake(wake),
            };

            match event {
                LoopEvent::Shutdown => {
                    info!("Navigation shell received shutdown");
                    break Ok(());
                }
                LoopEvent::Command(command) => {
                    let outcome = self.dispatch(command.action);
                    self.pump();
                    if command.reply.send(outcome).is_err() {
                        debug!("Dispatch caller went away before the reply");
                    }
                }
                LoopEvent::Wake(Wake::Changed(source)) => {
                    trace!(%source, "Source changed");
                    self.pump();
                }
                LoopEvent::Wake(Wake::Closed(source)) => {
                    warn!(%source, "Source closed, keeping its last value");
                    if self.mark_closed(source) {
                        break Err(ShellError::ChannelError("all state sources closed".into()));
                    }
                    self.pump();
                }
            }
        };

        self.unmount();
        info!("Navigation shell loop stopped");
        result
    }
}

impl NavShell {
    /// Stops waiting on `source`. Returns true once every required source
    /// is gone.
    fn mark_closed(&mut self, source: SourceId) -> bool {
        match self.subscriptions.as_mut() {
            Some(subscriptions) => {
                subscriptions.closed.push(source);
                subscriptions.all_closed()
            }
            None => true,
        }
    }
}

impl Drop for NavShell {
    fn drop(&mut self) {
        self.unmount();
    }
}

// =============================================================================
// Handle
// =============================================================================

/// A dispatch request for a running shell.
#[derive(Debug)]
pub struct ShellCommand {
    pub action: ShellAction,
    pub reply: oneshot::Sender<DispatchOutcome>,
}

/// Controls a shell running on its own task.
#[derive(Clone)]
pub struct ShellHandle {
    command_tx: mpsc::Sender<ShellCommand>,
    shutdown_tx: mpsc::Sender<()>,
    frames: watch::Receiver<Option<Frame>>,
}

impl ShellHandle {
    /// Dispatches `action` and waits for the outcome.
    pub async fn dispatch(&self, action: ShellAction) -> ShellResult<DispatchOutcome> {
        let (reply, outcome) = oneshot::channel();
        self.command_tx
            .send(ShellCommand { action, reply })
            .await
            .map_err(|_| ShellError::ChannelError("shell loop stopped".into()))?;
        outcome
            .await
            .map_err(|_| ShellError::ChannelError("shell dropped the reply".into()))
    }

    /// Published frames.
    pub fn frames(&self) -> watch::Receiver<Option<Frame>> {
        self.frames.clone()
    }

    /// Signals the shell loop to stop.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use aura_core::{CartLine, IconRef, NavigationEntry};

    use crate::overlay::SheetOverlay;
    use crate::sources::{LocalStores, RouteSource, SnapshotSource, ThemeSource};

    /// A source whose sender can be dropped, like a store torn down while
    /// the shell is still running.
    struct Feed<T> {
        tx: Mutex<Option<watch::Sender<T>>>,
        rx: watch::Receiver<T>,
    }

    impl<T> Feed<T> {
        fn new(initial: T) -> Arc<Self> {
            let (tx, rx) = watch::channel(initial);
            Arc::new(Feed {
                tx: Mutex::new(Some(tx)),
                rx,
            })
        }

        fn push(&self, value: T) {
            if let Some(tx) = self.tx.lock().unwrap().as_ref() {
                tx.send_replace(value);
            }
        }

        fn cut(&self) {
            self.tx.lock().unwrap().take();
        }
    }

    impl<T: Clone + Send + Sync> SnapshotSource<T> for Feed<Option<T>> {
        fn snapshot(&self) -> Option<T> {
            self.rx.borrow().clone()
        }

        fn subscribe(&self) -> watch::Receiver<Option<T>> {
            self.rx.clone()
        }
    }

    impl ThemeSource for Feed<Theme> {
        fn current(&self) -> Theme {
            *self.rx.borrow()
        }

        fn set(&self, theme: Theme) {
            self.push(theme);
        }

        fn subscribe(&self) -> watch::Receiver<Theme> {
            self.rx.clone()
        }
    }

    impl RouteSource for Feed<String> {
        fn current_path(&self) -> String {
            self.rx.borrow().clone()
        }

        fn subscribe(&self) -> watch::Receiver<String> {
            self.rx.clone()
        }
    }

    struct Fixture {
        stores: LocalStores,
        overlay: Arc<SheetOverlay>,
        shell: NavShell,
    }

    fn mount_with(model: NavigationModel, path: &str) -> Fixture {
        let stores = LocalStores::new(Theme::Light, path);
        let overlay = Arc::new(SheetOverlay::default());
        let shell = NavShell::mount(
            Arc::new(model),
            ShellOptions::default(),
            stores.sources(),
            overlay.clone(),
        );
        Fixture {
            stores,
            overlay,
            shell,
        }
    }

    fn mount() -> Fixture {
        mount_with(NavigationModel::storefront_default(), "/")
    }

    fn cart(lines: &[(&str, u32)]) -> Option<CartSnapshot> {
        Some(lines.iter().map(|(id, q)| CartLine::new(*id, *q)).collect())
    }

    fn model_with_cart_entry() -> NavigationModel {
        NavigationModel::new(vec![
            NavigationEntry::new("home", "Home", "/", IconRef::Home),
            NavigationEntry::new("cart", "Cart", "/cart", IconRef::ShoppingCart),
            NavigationEntry::new("about", "About", "/about", IconRef::Info),
        ])
        .unwrap()
    }

    #[test]
    fn test_mount_publishes_first_frame() {
        let f = mount();
        let frame = f.shell.surfaces().frame().cloned().unwrap();

        assert_eq!(frame.revision, 1);
        assert_eq!(frame.state.total_cart_items, 0);
        assert_eq!(frame.state.active_entry_id.as_deref(), Some("home"));
        assert_eq!(f.shell.recompute_count(), 1);
        assert_eq!(f.stores.subscriber_count(), 5);
    }

    #[test]
    fn test_cart_total_reaches_all_surfaces() {
        let mut f = mount();
        f.stores.cart.replace(cart(&[("a", 2), ("b", 3)]));
        let frame = f.shell.pump().unwrap();

        assert_eq!(frame.state.total_cart_items, 5);
        let desktop = f.shell.surfaces().desktop().last_state().unwrap();
        let tabs = f.shell.surfaces().tabs().last_state().unwrap();
        assert!(Arc::ptr_eq(desktop, tabs));
    }

    #[test]
    fn test_wishlist_badge_follows_count() {
        let mut f = mount();
        f.stores.wishlist.replace(Some(Vec::<String>::new().into()));
        f.shell.pump();
        let badge = |shell: &NavShell| {
            let view = shell.surfaces().desktop().view().unwrap();
            view.actions
                .iter()
                .find(|a| a.action == HeaderAction::Wishlist)
                .and_then(|a| a.badge)
        };
        assert!(badge(&f.shell).is_none());

        f.stores.wishlist.replace(Some(["x"].into_iter().collect()));
        f.shell.pump();
        assert_eq!(badge(&f.shell).map(|b| b.count), Some(1));
    }

    #[test]
    fn test_scroll_flips_compact_without_redundant_recompute() {
        let mut f = mount();
        let base = f.shell.recompute_count();

        f.stores.viewport.scroll_to(25.0);
        assert!(f.shell.pump().unwrap().state.compact);
        assert_eq!(f.shell.recompute_count(), base + 1);

        f.stores.viewport.scroll_to(30.0);
        assert!(f.shell.pump().is_none());
        assert_eq!(f.shell.recompute_count(), base + 1);

        f.stores.viewport.scroll_to(5.0);
        assert!(!f.shell.pump().unwrap().state.compact);
        assert_eq!(f.shell.recompute_count(), base + 2);
    }

    #[test]
    fn test_batch_of_writes_recomputes_once() {
        let mut f = mount();
        let base = f.shell.recompute_count();
        let revision = f.shell.surfaces().revision();

        f.stores.cart.replace(cart(&[("a", 1)]));
        f.stores.cart.replace(cart(&[("a", 4)]));
        f.stores.viewport.scroll_to(80.0);
        f.stores.theme.replace(Theme::Dark);
        let frame = f.shell.pump().unwrap();

        assert_eq!(f.shell.recompute_count(), base + 1);
        assert_eq!(frame.revision, revision + 1);
        assert_eq!(frame.state.total_cart_items, 4);
        assert!(frame.state.compact);
        assert_eq!(frame.state.theme, Theme::Dark);
    }

    #[test]
    fn test_opening_sheet_reuses_snapshot() {
        let mut f = mount();
        f.stores.cart.replace(cart(&[("a", 2), ("b", 3)]));
        f.shell.pump();
        let recomputes = f.shell.recompute_count();

        let outcome = f.shell.dispatch(ShellAction::OpenMenu);
        assert_eq!(outcome, DispatchOutcome::Menu(Transition::Opened));
        assert!(f.overlay.is_open());
        assert!(f.overlay.focus_trapped());

        let surfaces = f.shell.surfaces();
        let sheet = surfaces.sheet().view().unwrap();
        assert_eq!(sheet.cart_badge.map(|b| b.count), Some(5));
        assert!(Arc::ptr_eq(
            surfaces.sheet().last_state().unwrap(),
            surfaces.desktop().last_state().unwrap()
        ));
        assert_eq!(f.shell.recompute_count(), recomputes);

        f.shell.dispatch(ShellAction::CloseMenu);
        assert!(!f.overlay.is_open());
        assert_eq!(f.overlay.focused(), "menu-trigger");
        assert!(f.shell.pump().is_none());
        assert_eq!(
            f.shell.surfaces().frame().map(|fr| fr.state.total_cart_items),
            Some(5)
        );
    }

    #[test]
    fn test_menu_reopens_after_overlay_dismisses_itself() {
        let mut f = mount();
        f.shell.dispatch(ShellAction::OpenMenu);
        assert!(f.shell.surfaces().is_sheet_open());

        // Escape, handled by the overlay without the shell
        f.overlay.close();
        assert!(f.shell.pump().is_none());
        assert!(!f.shell.menu().is_open());
        assert!(!f.shell.surfaces().is_sheet_open());

        let outcome = f.shell.dispatch(ShellAction::OpenMenu);
        assert_eq!(outcome, DispatchOutcome::Menu(Transition::Opened));
        assert!(f.overlay.is_open());
        assert!(f.shell.menu().is_open());
        assert!(f.shell.surfaces().is_sheet_open());
    }

    #[test]
    fn test_trigger_after_overlay_dismiss_without_pump() {
        let mut f = mount();
        f.shell.dispatch(ShellAction::OpenMenu);
        f.overlay.close();

        let outcome = f.shell.dispatch(ShellAction::OpenMenu);
        assert_eq!(outcome, DispatchOutcome::Menu(Transition::Opened));
        assert!(f.overlay.is_open());

        // Opened by the overlay itself: a close from the sheet still closes
        f.shell.dispatch(ShellAction::CloseMenu);
        f.overlay.open();
        let outcome = f.shell.dispatch(ShellAction::CloseMenu);
        assert_eq!(outcome, DispatchOutcome::Menu(Transition::Closed(MenuEvent::Close)));
        assert!(!f.overlay.is_open());
        assert!(!f.shell.surfaces().is_sheet_open());
    }

    #[test]
    fn test_navigation_lands_in_one_frame() {
        let mut f = mount_with(model_with_cart_entry(), "/");
        f.stores.cart.replace(cart(&[("a", 1)]));
        f.shell.pump();
        f.shell.dispatch(ShellAction::OpenMenu);

        let outcome = f.shell.dispatch(ShellAction::Select {
            entry_id: "cart".into(),
            from: SurfaceKind::MobileSheet,
        });
        assert_eq!(
            outcome,
            DispatchOutcome::Navigate {
                path: "/cart".into(),
                menu: Transition::Closed(MenuEvent::Navigate),
            }
        );
        assert!(!f.overlay.is_open());

        let mut frames = f.shell.subscribe_frames();
        frames.borrow_and_update();

        // The host routes and adds to the cart in the same batch
        f.stores.router.replace("/cart".into());
        f.stores.cart.replace(cart(&[("a", 1), ("b", 2)]));
        f.shell.pump();

        let frame = frames.borrow_and_update().clone().unwrap();
        assert_eq!(frame.state.active_entry_id.as_deref(), Some("cart"));
        assert_eq!(frame.state.total_cart_items, 3);
        assert!(!frames.has_changed().unwrap());
    }

    #[test]
    fn test_theme_toggle_from_either_surface() {
        let mut f = mount();

        let outcome = f.shell.dispatch(ShellAction::ToggleTheme {
            from: SurfaceKind::DesktopBar,
        });
        assert_eq!(outcome, DispatchOutcome::ThemeRequested(Theme::Dark));
        f.shell.dispatch(ShellAction::OpenMenu);
        f.shell.pump();

        let surfaces = f.shell.surfaces();
        assert_eq!(surfaces.desktop().view().unwrap().theme, Theme::Dark);
        assert_eq!(surfaces.sheet().view().unwrap().theme, Theme::Dark);

        f.shell.dispatch(ShellAction::ToggleTheme {
            from: SurfaceKind::MobileSheet,
        });
        f.shell.pump();
        let surfaces = f.shell.surfaces();
        assert_eq!(surfaces.desktop().view().unwrap().theme, Theme::Light);
        assert_eq!(surfaces.sheet().view().unwrap().theme, Theme::Light);
        assert_eq!(f.stores.theme.current(), Theme::Light);
    }

    #[test]
    fn test_shortcut_activation() {
        let mut f = mount();
        f.shell.dispatch(ShellAction::OpenMenu);

        let outcome = f.shell.dispatch(ShellAction::Activate {
            action: HeaderAction::Wishlist,
            from: SurfaceKind::MobileSheet,
        });
        assert!(matches!(outcome, DispatchOutcome::Navigate { ref path, .. } if path == "/wishlist"));
        assert!(!f.shell.menu().is_open());

        let outcome = f.shell.dispatch(ShellAction::Activate {
            action: HeaderAction::Search,
            from: SurfaceKind::MobileSheet,
        });
        assert_eq!(outcome, DispatchOutcome::Ignored);
    }

    #[test]
    fn test_unknown_entry_ignored() {
        let mut f = mount();
        let outcome = f.shell.dispatch(ShellAction::Select {
            entry_id: "missing".into(),
            from: SurfaceKind::BottomTabs,
        });
        assert_eq!(outcome, DispatchOutcome::Ignored);
    }

    #[test]
    fn test_unmount_releases_everything() {
        let mut f = mount();
        f.shell.dispatch(ShellAction::OpenMenu);
        let mut frames = f.shell.subscribe_frames();

        f.shell.unmount();
        assert_eq!(f.stores.subscriber_count(), 0);
        assert!(!f.overlay.is_open());
        assert!(frames.borrow_and_update().is_none());

        // Writes after teardown are harmless and unobserved
        f.stores.cart.replace(cart(&[("a", 9)]));
        assert!(f.shell.pump().is_none());
        assert_eq!(f.shell.dispatch(ShellAction::OpenMenu), DispatchOutcome::Ignored);
        f.shell.unmount();
    }

    #[test]
    fn test_drop_unsubscribes() {
        let f = mount();
        let stores = f.stores.clone();
        drop(f);
        assert_eq!(stores.subscriber_count(), 0);
    }

    #[test]
    fn test_missing_scroll_source_stays_expanded() {
        let stores = LocalStores::new(Theme::Light, "/");
        let mut sources = stores.sources();
        sources.scroll = None;
        let mut shell = NavShell::mount(
            Arc::new(NavigationModel::storefront_default()),
            ShellOptions::default(),
            sources,
            Arc::new(SheetOverlay::default()),
        );

        stores.viewport.scroll_to(500.0);
        assert!(shell.pump().is_none());
        assert!(!shell.surfaces().frame().unwrap().state.compact);
    }

    #[tokio::test]
    async fn test_spawned_shell_follows_sources() {
        let stores = LocalStores::new(Theme::Light, "/");
        let shell = NavShell::mount(
            Arc::new(NavigationModel::storefront_default()),
            ShellOptions::default(),
            stores.sources(),
            Arc::new(SheetOverlay::default()),
        );
        let (handle, task) = shell.spawn().unwrap();
        let mut frames = handle.frames();
        frames.borrow_and_update();

        stores.cart.replace(cart(&[("a", 2), ("b", 3)]));
        frames.changed().await.unwrap();
        let frame = frames.borrow_and_update().clone().unwrap();
        assert_eq!(frame.revision, 2);
        assert_eq!(frame.state.total_cart_items, 5);

        let outcome = handle
            .dispatch(ShellAction::ToggleTheme {
                from: SurfaceKind::DesktopBar,
            })
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::ThemeRequested(Theme::Dark));
        assert_eq!(
            frames.borrow_and_update().as_ref().map(|f| f.state.theme),
            Some(Theme::Dark)
        );

        handle.shutdown().await;
        task.await.unwrap().unwrap();
        assert_eq!(stores.subscriber_count(), 0);
        assert!(handle.dispatch(ShellAction::OpenMenu).await.is_err());
    }

    #[tokio::test]
    async fn test_closed_source_keeps_last_value() {
        let stores = LocalStores::new(Theme::Light, "/");
        let cart_feed: Arc<Feed<Option<CartSnapshot>>> = Feed::new(None);
        let mut sources = stores.sources();
        sources.cart = cart_feed.clone();
        let shell = NavShell::mount(
            Arc::new(NavigationModel::storefront_default()),
            ShellOptions::default(),
            sources,
            Arc::new(SheetOverlay::default()),
        );
        let (handle, task) = shell.spawn().unwrap();
        let mut frames = handle.frames();
        frames.borrow_and_update();

        cart_feed.push(cart(&[("a", 2)]));
        frames.changed().await.unwrap();
        assert_eq!(
            frames.borrow_and_update().as_ref().map(|f| f.state.total_cart_items),
            Some(2)
        );

        cart_feed.cut();
        stores.wishlist.replace(Some(["x"].into_iter().collect()));
        frames.changed().await.unwrap();
        let frame = frames.borrow_and_update().clone().unwrap();
        assert_eq!(frame.state.total_cart_items, 2);
        assert_eq!(frame.state.total_wishlist_items, 1);

        handle.shutdown().await;
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_all_sources_closed_stops_the_loop() {
        let cart_feed: Arc<Feed<Option<CartSnapshot>>> = Feed::new(None);
        let wishlist_feed: Arc<Feed<Option<WishlistSnapshot>>> = Feed::new(None);
        let theme_feed: Arc<Feed<Theme>> = Feed::new(Theme::Light);
        let route_feed: Arc<Feed<String>> = Feed::new("/".to_string());
        let sources = ShellSources {
            cart: cart_feed.clone(),
            wishlist: wishlist_feed.clone(),
            theme: theme_feed.clone(),
            router: route_feed.clone(),
            scroll: None,
        };
        let shell = NavShell::mount(
            Arc::new(NavigationModel::storefront_default()),
            ShellOptions::default(),
            sources,
            Arc::new(SheetOverlay::default()),
        );
        let (handle, task) = shell.spawn().unwrap();

        cart_feed.cut();
        wishlist_feed.cut();
        theme_feed.cut();
        route_feed.cut();

        let result = task.await.unwrap();
        assert!(matches!(result, Err(ShellError::ChannelError(_))));
        assert!(handle.dispatch(ShellAction::OpenMenu).await.is_err());
    }

    #[tokio::test]
    async fn test_run_requires_mount() {
        let mut f = mount();
        f.shell.unmount();
        let (_cmd_tx, cmd_rx) = mpsc::channel(1);
        let (_stop_tx, stop_rx) = mpsc::channel(1);
        let result = f.shell.run(cmd_rx, stop_rx).await;
        assert!(matches!(result, Err(ShellError::NotMounted)));
    }
}
