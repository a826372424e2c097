//! Navigation declaration loading for docnav.
//!
//! Parses `docnav.toml` declarations with serde, auto-discovers the file in
//! parent directories, and resolves the declaration into a
//! [`NavigationConfig`](docnav_model::NavigationConfig).
//!
//! CLI settings are applied during resolution via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `title`
//! - `base`
//! - `nav[].link`

mod declaration;
mod expand;

use std::path::{Path, PathBuf};

use docnav_model::{DisplayOverrides, LastUpdated, NavError, NavigationConfig};

pub use declaration::{
    Declaration, RawDisplaySettings, RawHeadTag, RawLastUpdated, RawNavLink, RawSidebar,
    RawSidebarGroup, RawSidebarItem,
};

/// Declaration filename to search for.
pub const DECLARATION_FILENAME: &str = "docnav.toml";

/// CLI settings that override declared display settings.
///
/// All fields are optional. Only non-None values override the declaration.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override sidebar depth.
    pub sidebar_depth: Option<i64>,
    /// Override the "last updated" label.
    pub last_updated: Option<LastUpdated>,
}

impl CliSettings {
    /// Display overrides applied on top of the declaration.
    #[must_use]
    pub fn overrides(&self) -> DisplayOverrides {
        DisplayOverrides {
            sidebar_depth: self.sidebar_depth,
            last_updated: self.last_updated.clone(),
        }
    }
}

/// Declaration loading or resolution error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Declaration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Reload requested for a config that was not loaded from a file.
    #[error("No declaration file to reload from")]
    NoDeclarationFile,
    /// Validation error outside the navigation model.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Declaration field (e.g., "`nav[3].link`").
        field: String,
        /// Error message (e.g., "${`DOCS_URL`} not set").
        message: String,
    },
    /// Navigation model rejected a declared value.
    #[error("Invalid {field}: {source}")]
    Navigation {
        /// Declaration field (e.g., "`nav[0]`", "`sidebar.\"/technical/\"[0].children`").
        field: String,
        /// Model error.
        source: NavError,
    },
}

/// A declaration together with the file it was loaded from.
#[derive(Debug, Default)]
pub struct LoadedDeclaration {
    /// Parsed declaration with environment variables expanded.
    pub declaration: Declaration,
    /// Path to the declaration file (`None` when defaults are used).
    pub path: Option<PathBuf>,
}

impl LoadedDeclaration {
    /// Load a declaration.
    ///
    /// If `path` is provided, loads from that file. Otherwise, searches for
    /// `docnav.toml` in the current directory and parents, falling back to an
    /// empty declaration.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `path` doesn't exist, reading or parsing
    /// fails, or an environment variable is missing.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        match Self::discover() {
            Some(discovered) => Self::load_from_file(&discovered),
            None => {
                tracing::debug!("No {DECLARATION_FILENAME} found, using empty declaration");
                Ok(Self::default())
            }
        }
    }

    /// Load and expand a declaration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns error if reading, parsing or expansion fails.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut declaration = Declaration::from_toml(&content)?;
        declaration.expand_env_vars()?;

        tracing::debug!(path = %path.display(), "Loaded navigation declaration");

        Ok(Self {
            declaration,
            path: Some(path.to_path_buf()),
        })
    }

    /// Resolve the declaration with optional CLI settings applied last.
    ///
    /// # Errors
    ///
    /// Returns the first validation error.
    pub fn resolve(&self, cli_settings: Option<&CliSettings>) -> Result<NavigationConfig, ConfigError> {
        let overrides = cli_settings.map(CliSettings::overrides).unwrap_or_default();
        self.declaration.resolve(&overrides)
    }

    /// Search for the declaration file in current directory and parents.
    fn discover() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        discover_from(&current)
    }
}

/// Search for the declaration file in `start` and its parents.
fn discover_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(DECLARATION_FILENAME))
        .find(|candidate| candidate.exists())
}

/// Load and resolve a navigation declaration in one step.
///
/// # Errors
///
/// Returns any loading or validation error.
pub fn load_navigation(
    path: Option<&Path>,
    cli_settings: Option<&CliSettings>,
) -> Result<NavigationConfig, ConfigError> {
    LoadedDeclaration::load(path)?.resolve(cli_settings)
}
