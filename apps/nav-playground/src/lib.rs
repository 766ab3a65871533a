//! # nav-playground
//!
//! Replays a scripted session against the navigation shell.
//!
//! ## Scenario Format
//! ```json
//! {
//!   "start_path": "/",
//!   "theme": "light",
//!   "steps": [
//!     { "events": [
//!         { "event": "cart", "lines": [{ "itemId": "a", "quantity": 2 }] },
//!         { "event": "scroll", "offset_y": 25 }
//!     ] },
//!     { "events": [{ "event": "action", "type": "open_menu" }] }
//!   ]
//! }
//! ```
//!
//! Each step is one input batch: every event is applied, then the shell is
//! pumped once. Navigation outcomes are routed back into the router store,
//! the way a real host would.

use std::path::Path;
use std::sync::Arc;

use aura_core::{
    BottomTabsView, CartLine, CartSnapshot, DesktopBarView, MobileSheetView, RenderState, Theme,
};
use aura_shell::{
    DispatchOutcome, LocalStores, NavShell, ShellAction, ShellConfig, ShellError, SheetOverlay,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("Failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scenario: {0}")]
    Scenario(#[from] serde_json::Error),

    #[error(transparent)]
    Shell(#[from] ShellError),
}

pub type PlaygroundResult<T> = Result<T, PlaygroundError>;

// =============================================================================
// Scenario
// =============================================================================

/// A scripted session.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_start_path")]
    pub start_path: String,
    /// Overrides the configured initial theme.
    #[serde(default)]
    pub theme: Option<Theme>,
    pub steps: Vec<Step>,
}

fn default_start_path() -> String {
    "/".to_string()
}

/// One input batch.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub events: Vec<ScenarioEvent>,
}

/// Something that happens in the outside world, or a user intent.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScenarioEvent {
    Scroll { offset_y: f64 },
    Cart { lines: Vec<CartLine> },
    /// The cart store goes back to its not-yet-loaded state.
    CartUnloaded,
    Wishlist { items: Vec<String> },
    Navigate { path: String },
    Action(ShellAction),
}

impl Scenario {
    pub fn from_json(json: &str) -> PlaygroundResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> PlaygroundResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

// =============================================================================
// Replay
// =============================================================================

/// What the surfaces show after one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: usize,
    /// A new frame was published by this step.
    pub published: bool,
    pub revision: u64,
    pub recomputes: u64,
    pub menu_open: bool,
    pub state: Option<RenderState>,
    pub desktop: Option<DesktopBarView>,
    /// Present while the sheet is open.
    pub sheet: Option<MobileSheetView>,
    pub tabs: Option<BottomTabsView>,
}

/// Mounts a shell from `config`, plays `scenario`, and unmounts.
pub fn replay(scenario: &Scenario, config: &ShellConfig) -> PlaygroundResult<Vec<StepReport>> {
    let model = Arc::new(config.navigation_model()?);
    let stores = LocalStores::new(
        scenario.theme.unwrap_or(config.theme.initial),
        scenario.start_path.clone(),
    );
    let mut shell = NavShell::mount(
        model,
        config.shell_options(),
        stores.sources(),
        Arc::new(SheetOverlay::default()),
    );

    let mut reports = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        for event in &step.events {
            apply(&mut shell, &stores, event);
        }
        let published = shell.pump().is_some();
        debug!(step = index, published, "Step replayed");
        reports.push(report(index, published, &shell));
    }

    shell.unmount();
    info!(steps = reports.len(), "Scenario finished");
    Ok(reports)
}

fn apply(shell: &mut NavShell, stores: &LocalStores, event: &ScenarioEvent) {
    match event {
        ScenarioEvent::Scroll { offset_y } => stores.viewport.scroll_to(*offset_y),
        ScenarioEvent::Cart { lines } => {
            stores.cart.replace(Some(CartSnapshot::from(lines.clone())));
        }
        ScenarioEvent::CartUnloaded => stores.cart.replace(None),
        ScenarioEvent::Wishlist { items } => {
            stores.wishlist.replace(Some(items.clone().into()));
        }
        ScenarioEvent::Navigate { path } => stores.router.replace(path.clone()),
        ScenarioEvent::Action(action) => {
            if let DispatchOutcome::Navigate { path, .. } = shell.dispatch(action.clone()) {
                stores.router.replace(path);
            }
        }
    }
}

fn report(step: usize, published: bool, shell: &NavShell) -> StepReport {
    let surfaces = shell.surfaces();
    let sheet_open = surfaces.is_sheet_open();
    StepReport {
        step,
        published,
        revision: surfaces.revision(),
        recomputes: shell.recompute_count(),
        menu_open: shell.menu().is_open(),
        state: surfaces.frame().map(|f| (*f.state).clone()),
        desktop: surfaces.desktop().view().cloned(),
        sheet: sheet_open.then(|| surfaces.sheet().view().cloned()).flatten(),
        tabs: surfaces.tabs().view().cloned(),
    }
}
