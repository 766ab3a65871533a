//! # Shell Configuration
//!
//! Configuration management for the navigation shell.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     AURA_COMPACT_THRESHOLD=32                                          │
//! │     AURA_THEME=dark                                                    │
//! │     AURA_PREFER_LOCALIZED=false                                        │
//! │     AURA_LOG=debug                                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $AURA_NAV_CONFIG, or                                               │
//! │     ~/.config/storefront/nav.toml (Linux)                              │
//! │     ~/Library/Application Support/com.auraclear.storefront/nav.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     20px threshold, light theme, the storefront catalog                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # nav.toml
//! [brand]
//! name = "Aura"
//! accent = "Clear"
//!
//! [scroll]
//! compact_threshold = 20.0
//!
//! [theme]
//! initial = "light"
//!
//! [locale]
//! prefer_localized = true
//!
//! [logging]
//! filter = "info,aura=debug"
//!
//! [[navigation]]
//! id = "home"
//! label = "Home"
//! localized_label = "หน้าหลัก"
//! path = "/"
//! icon = "home"
//! ```
//!
//! The navigation list is checked when the config is validated, so a file
//! with a duplicate id or path never reaches the shell.

use std::path::PathBuf;

use aura_core::navigation::default_entries;
use aura_core::{Brand, NavigationEntry, NavigationModel, Theme, COMPACT_THRESHOLD_PX};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::controller::ShellOptions;
use crate::error::{ShellError, ShellResult};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "AURA_NAV_CONFIG";

/// Default log filter.
pub const DEFAULT_LOG_FILTER: &str = "info,aura=debug";

// =============================================================================
// Sections
// =============================================================================

/// Scroll behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollSettings {
    /// Offset (px) above which the header turns compact. Strictly greater.
    #[serde(default = "default_compact_threshold")]
    pub compact_threshold: f64,
}

fn default_compact_threshold() -> f64 {
    COMPACT_THRESHOLD_PX
}

impl Default for ScrollSettings {
    fn default() -> Self {
        ScrollSettings {
            compact_threshold: default_compact_threshold(),
        }
    }
}

/// Theme used until the theme collaborator says otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(default)]
    pub initial: Theme,
}

/// Label language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleSettings {
    /// Show localized labels where an entry has one.
    #[serde(default = "default_true")]
    pub prefer_localized: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LocaleSettings {
    fn default() -> Self {
        LocaleSettings {
            prefer_localized: true,
        }
    }
}

/// Logging setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is
    /// unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Shell Configuration
// =============================================================================

/// Complete shell configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub brand: Brand,

    #[serde(default)]
    pub scroll: ScrollSettings,

    #[serde(default)]
    pub theme: ThemeSettings,

    #[serde(default)]
    pub locale: LocaleSettings,

    #[serde(default)]
    pub logging: LoggingSettings,

    /// Ordered destinations shown on every surface.
    #[serde(default = "default_entries")]
    pub navigation: Vec<NavigationEntry>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            brand: Brand::default(),
            scroll: ScrollSettings::default(),
            theme: ThemeSettings::default(),
            locale: LocaleSettings::default(),
            logging: LoggingSettings::default(),
            navigation: default_entries(),
        }
    }
}

impl ShellConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (nav.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ShellResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading navigation config from file");
                let contents = std::fs::read_to_string(&path).map_err(|e| {
                    ShellError::ConfigLoadFailed(format!("{}: {}", path.display(), e))
                })?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load navigation config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Does not validate.
    pub fn from_toml(contents: &str) -> ShellResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ShellResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ShellError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Navigation config saved");
        Ok(())
    }

    /// Validates the configuration, including the navigation list.
    pub fn validate(&self) -> ShellResult<()> {
        let threshold = self.scroll.compact_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ShellError::InvalidConfig(format!(
                "compact_threshold must be a finite, non-negative number, got {}",
                threshold
            )));
        }

        if self.brand.name.trim().is_empty() {
            return Err(ShellError::InvalidConfig("brand.name must not be empty".into()));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ShellError::InvalidConfig(
                "logging.filter must not be empty".into(),
            ));
        }

        self.navigation_model()?;
        Ok(())
    }

    /// Applies environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Compact threshold
        if let Some(value) = lookup("AURA_COMPACT_THRESHOLD") {
            match value.parse::<f64>() {
                Ok(threshold) => {
                    debug!(threshold, "Overriding compact threshold from environment");
                    self.scroll.compact_threshold = threshold;
                }
                Err(_) => warn!(value = %value, "Invalid AURA_COMPACT_THRESHOLD in environment"),
            }
        }

        // Initial theme
        if let Some(value) = lookup("AURA_THEME") {
            match value.parse::<Theme>() {
                Ok(theme) => self.theme.initial = theme,
                Err(e) => warn!(error = %e, "Invalid AURA_THEME in environment"),
            }
        }

        // Label language
        if let Some(value) = lookup("AURA_PREFER_LOCALIZED") {
            match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.locale.prefer_localized = true,
                "0" | "false" | "no" => self.locale.prefer_localized = false,
                _ => warn!(value = %value, "Invalid AURA_PREFER_LOCALIZED in environment"),
            }
        }

        // Log filter
        if let Some(filter) = lookup("AURA_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "auraclear", "storefront")
            .map(|dirs| dirs.config_dir().join("nav.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Builds the navigation model described by this config.
    pub fn navigation_model(&self) -> ShellResult<NavigationModel> {
        let model = NavigationModel::new(self.navigation.clone())?;
        Ok(model.with_prefer_localized(self.locale.prefer_localized))
    }

    /// Mount options for [`crate::NavShell::mount`].
    pub fn shell_options(&self) -> ShellOptions {
        ShellOptions {
            brand: self.brand.clone(),
            compact_threshold: self.scroll.compact_threshold,
        }
    }
}
