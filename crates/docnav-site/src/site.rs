//! Active navigation configuration with atomic reload.
//!
//! # Thread Safety
//!
//! `NavigationSite` is designed for concurrent access by rendering tasks:
//! - `current()` returns `Arc<NavigationConfig>` with minimal locking (just Arc clone)
//! - `reload()` rebuilds a complete config and swaps the `Arc` only on success
//! - `current_or_reload()` uses double-checked locking after `invalidate()`
//! - `invalidate()` is lock-free (atomic flag)
//!
//! Readers holding an `Arc` from before a reload keep seeing the previous
//! config. A live config is never modified in place.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use docnav_config::{CliSettings, ConfigError, LoadedDeclaration};
use docnav_model::{NavigationConfig, RoutePath, SidebarGroup};

/// Navigation configuration shared with renderers.
pub struct NavigationSite {
    /// Declaration file, `None` when running on defaults.
    path: Option<PathBuf>,
    cli_settings: CliSettings,
    /// Mutex for serializing reload operations.
    reload_lock: Mutex<()>,
    /// Current config snapshot (atomically swappable).
    current: RwLock<Arc<NavigationConfig>>,
    /// Cache validity flag.
    valid: AtomicBool,
}

impl NavigationSite {
    /// Load and resolve the declaration.
    ///
    /// If `path` is `None`, `docnav.toml` is discovered from the current
    /// directory. The discovered path is kept for later reloads.
    ///
    /// # Errors
    ///
    /// Returns the first loading or validation error. No site is created
    /// from an invalid declaration.
    pub fn load(path: Option<&Path>, cli_settings: CliSettings) -> Result<Self, ConfigError> {
        let loaded = LoadedDeclaration::load(path)?;
        let config = loaded.resolve(Some(&cli_settings))?;

        Ok(Self {
            path: loaded.path,
            cli_settings,
            reload_lock: Mutex::new(()),
            current: RwLock::new(Arc::new(config)),
            valid: AtomicBool::new(true),
        })
    }

    /// Wrap an already resolved config.
    ///
    /// The site has no declaration file, so [`Self::reload`] fails and the
    /// wrapped config stays active.
    #[must_use]
    pub fn from_config(config: NavigationConfig, cli_settings: CliSettings) -> Self {
        Self {
            path: None,
            cli_settings,
            reload_lock: Mutex::new(()),
            current: RwLock::new(Arc::new(config)),
            valid: AtomicBool::new(true),
        }
    }

    /// Declaration file backing this site.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current config snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn current(&self) -> Arc<NavigationConfig> {
        self.current.read().unwrap().clone()
    }

    /// Sidebar groups for a page from the current snapshot.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    #[must_use]
    pub fn sidebar_for(&self, page: &RoutePath) -> Vec<SidebarGroup> {
        self.current_or_reload().sidebar_for(page).to_vec()
    }

    /// Re-run the whole resolution pipeline and swap in the result.
    ///
    /// On failure the previous config stays active.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDeclarationFile`] when the site was built
    /// without a declaration file, otherwise the first loading or validation
    /// error.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn reload(&self) -> Result<Arc<NavigationConfig>, ConfigError> {
        let _guard = self.reload_lock.lock().unwrap();
        self.reload_locked()
    }

    /// Mark the config as stale.
    ///
    /// Next `current_or_reload()` will reload. Current readers continue
    /// using their existing `Arc<NavigationConfig>`.
    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }

    /// Current config, reloading first if invalidated.
    ///
    /// Uses double-checked locking pattern:
    /// 1. Fast path: return current snapshot if valid
    /// 2. Slow path: acquire `reload_lock`, recheck, then reload
    ///
    /// A failed reload is logged and the previous snapshot is returned. The
    /// site is then considered valid until the next `invalidate()`.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn current_or_reload(&self) -> Arc<NavigationConfig> {
        if self.valid.load(Ordering::Acquire) {
            return self.current();
        }

        let _guard = self.reload_lock.lock().unwrap();

        if self.valid.load(Ordering::Acquire) {
            return self.current();
        }

        match self.reload_locked() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to reload navigation, keeping previous config");
                self.valid.store(true, Ordering::Release);
                self.current()
            }
        }
    }

    /// Reload while holding `reload_lock`.
    fn reload_locked(&self) -> Result<Arc<NavigationConfig>, ConfigError> {
        let Some(path) = &self.path else {
            return Err(ConfigError::NoDeclarationFile);
        };
        let loaded = LoadedDeclaration::load_from_file(path)?;
        let config = Arc::new(loaded.resolve(Some(&self.cli_settings))?);

        *self.current.write().unwrap() = Arc::clone(&config);
        self.valid.store(true, Ordering::Release);

        tracing::info!(
            nav = config.top_nav().len(),
            sidebars = config.sidebar().len(),
            "Navigation reloaded"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    // Ensure NavigationSite is Send + Sync for use with Arc
    static_assertions::assert_impl_all!(super::NavigationSite: Send, Sync);

    use std::fs;
    use std::thread;

    use docnav_model::NavLink;
    use pretty_assertions::assert_eq;

    use super::*;

    const INITIAL: &str = r#"
[[nav]]
text = "Home"
link = "/"

[sidebar]
"/technical/" = [{ title = "Technical documentation", collapsable = false, children = ["/technical/", "/technical/setup"] }]

[display_settings]
sidebar_depth = 2
"#;

    const UPDATED: &str = r#"
[[nav]]
text = "Home"
link = "/"

[[nav]]
text = "Release notes"
link = "/releasenotes/"

[sidebar]
"/technical/" = [{ title = "Technical", children = ["/technical/"] }]
"/releasenotes/" = ["/releasenotes/"]
"#;

    fn create_site(content: &str) -> (tempfile::TempDir, PathBuf, NavigationSite) {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("docnav.toml");
        fs::write(&path, content).unwrap();
        let site = NavigationSite::load(Some(&path), CliSettings::default()).unwrap();
        (temp_dir, path, site)
    }

    fn route(raw: &str) -> RoutePath {
        RoutePath::normalize(raw).unwrap()
    }

    fn labels(config: &NavigationConfig) -> Vec<String> {
        config.top_nav().iter().map(NavLink::label).map(str::to_owned).collect()
    }

    #[test]
    fn test_load_resolves_config() {
        let (_dir, path, site) = create_site(INITIAL);

        let config = site.current();

        assert_eq!(site.path(), Some(path.as_path()));
        assert_eq!(labels(&config), vec!["Home"]);
        assert_eq!(config.settings().sidebar_depth, 2);
    }

    #[test]
    fn test_load_invalid_declaration_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("docnav.toml");
        fs::write(&path, "[display_settings]\nsidebar_depth = -1\n").unwrap();

        let result = NavigationSite::load(Some(&path), CliSettings::default());

        assert!(matches!(result, Err(ConfigError::Navigation { .. })));
    }

    #[test]
    fn test_reload_swaps_config() {
        let (_dir, path, site) = create_site(INITIAL);
        let before = site.current();

        fs::write(&path, UPDATED).unwrap();
        let after = site.reload().unwrap();

        assert_eq!(labels(&before), vec!["Home"]);
        assert_eq!(labels(&after), vec!["Home", "Release notes"]);
        assert_eq!(labels(&site.current()), vec!["Home", "Release notes"]);
    }

    #[test]
    fn test_failed_reload_keeps_previous_config() {
        let (_dir, path, site) = create_site(INITIAL);

        fs::write(
            &path,
            "[sidebar]\n\"/a\" = [\"/a/\"]\n\"/a/\" = [\"/a/b\"]\n",
        )
        .unwrap();
        let result = site.reload();

        assert!(result.is_err());
        assert_eq!(labels(&site.current()), vec!["Home"]);
    }

    #[test]
    fn test_invalidate_then_current_or_reload() {
        let (_dir, path, site) = create_site(INITIAL);

        fs::write(&path, UPDATED).unwrap();
        assert_eq!(labels(&site.current_or_reload()), vec!["Home"]);

        site.invalidate();
        let config = site.current_or_reload();

        assert_eq!(labels(&config), vec!["Home", "Release notes"]);
        assert_eq!(config.sidebar_for(&route("/releasenotes/x")).len(), 1);
    }

    #[test]
    fn test_current_or_reload_failure_returns_previous() {
        let (_dir, path, site) = create_site(INITIAL);

        fs::write(&path, "not = [valid").unwrap();
        site.invalidate();

        assert_eq!(labels(&site.current_or_reload()), vec!["Home"]);
    }

    #[test]
    fn test_sidebar_for() {
        let (_dir, _path, site) = create_site(INITIAL);

        let groups = site.sidebar_for(&route("/technical/setup"));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title(), Some("Technical documentation"));
        assert!(site.sidebar_for(&route("/unknown/page")).is_empty());
    }

    #[test]
    fn test_from_config_reload_keeps_config() {
        let (_dir, _path, loaded) = create_site(INITIAL);
        let cli = CliSettings {
            sidebar_depth: Some(4),
            ..Default::default()
        };
        let site = NavigationSite::from_config((*loaded.current()).clone(), cli);

        assert_eq!(site.path(), None);
        assert_eq!(labels(&site.current()), vec!["Home"]);

        let result = site.reload();
        assert!(matches!(result, Err(ConfigError::NoDeclarationFile)));
        assert_eq!(labels(&site.current()), vec!["Home"]);

        site.invalidate();
        assert_eq!(labels(&site.current_or_reload()), vec!["Home"]);
    }

    #[test]
    fn test_concurrent_readers_see_complete_configs() {
        let (_dir, path, site) = create_site(INITIAL);
        let site = Arc::new(site);

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let site = Arc::clone(&site);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let config = site.current();
                        let nav = labels(&config);
                        let sidebars = config.sidebar().len();
                        // Each snapshot is one of the two complete declarations
                        assert!(
                            (nav.len() == 1 && sidebars == 1) || (nav.len() == 2 && sidebars == 2),
                            "torn config: {nav:?} with {sidebars} sidebars"
                        );
                    }
                })
            })
            .collect();

        for content in [UPDATED, INITIAL, UPDATED] {
            fs::write(&path, content).unwrap();
            site.reload().unwrap();
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
