//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod nav;
pub(crate) mod sidebar;

use std::path::PathBuf;

use clap::Args;
use docnav_config::CliSettings;
use docnav_model::LastUpdated;
use docnav_site::NavigationSite;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use nav::NavArgs;
pub(crate) use sidebar::SidebarArgs;

/// Arguments shared by commands that load a declaration.
#[derive(Args)]
pub(crate) struct DeclarationArgs {
    /// Path to declaration file (default: auto-discover docnav.toml).
    #[arg(short, long, env = "DOCNAV_CONFIG")]
    config: Option<PathBuf>,

    /// Sidebar depth (overrides declaration).
    #[arg(long, allow_negative_numbers = true)]
    sidebar_depth: Option<i64>,

    /// "Last updated" label text (overrides declaration).
    #[arg(long)]
    last_updated: Option<String>,

    /// Disable the "last updated" label.
    #[arg(long, conflicts_with = "last_updated")]
    no_last_updated: bool,

    /// Enable verbose output (show resolution logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl DeclarationArgs {
    /// Load and resolve the navigation declaration.
    pub(crate) fn load_site(&self) -> Result<NavigationSite, CliError> {
        let cli_settings = CliSettings {
            sidebar_depth: self.sidebar_depth,
            last_updated: self.resolve_last_updated(),
        };
        tracing::debug!(config = ?self.config, ?cli_settings, "Loading navigation declaration");
        Ok(NavigationSite::load(self.config.as_deref(), cli_settings)?)
    }

    /// Resolve `last_updated` from --last-updated/--no-last-updated flags.
    fn resolve_last_updated(&self) -> Option<LastUpdated> {
        if self.no_last_updated {
            return Some(LastUpdated::Disabled);
        }
        self.last_updated.clone().map(LastUpdated::Label)
    }
}
