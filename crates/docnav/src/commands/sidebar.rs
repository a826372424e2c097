//! `docnav sidebar` command implementation.

use clap::Args;
use docnav_model::{RoutePath, SidebarGroup};

use crate::commands::DeclarationArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sidebar command.
#[derive(Args)]
pub(crate) struct SidebarArgs {
    /// Page route to resolve (e.g. /technical/setup).
    page: String,

    #[command(flatten)]
    pub declaration: DeclarationArgs,

    /// Treat the page as served under the site base and strip it first.
    #[arg(long)]
    served: bool,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl SidebarArgs {
    /// Execute the sidebar command.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration or the page route is invalid.
    pub(crate) fn execute(&self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.declaration.load_site()?.current();

        let mut page = RoutePath::normalize(&self.page)?;
        if self.served {
            match config.site().strip_base(&page) {
                Some(stripped) => page = stripped,
                None => {
                    output.warning(&format!(
                        "{page} is outside the site base {}",
                        config.site().base
                    ));
                }
            }
        }

        let groups = config.sidebar_for(&page);

        if self.json {
            output.line(&serde_json::to_string_pretty(groups)?);
            return Ok(());
        }

        match config.sidebar().matching_prefix(&page) {
            Some(prefix) => output.muted(&format!("{page} uses sidebar {prefix}")),
            None => {
                output.info(&format!("No sidebar for {page}"));
                return Ok(());
            }
        }

        for group in groups {
            print_group(&output, group, &page);
        }

        Ok(())
    }
}

fn print_group(output: &Output, group: &SidebarGroup, page: &RoutePath) {
    if let Some(title) = group.title() {
        let state = if group.collapsable() { "" } else { " (always open)" };
        output.highlight(&format!("{title}{state}"));
    }
    for child in group.children() {
        let marker = if child == page { "*" } else { "-" };
        output.line(&format!("  {marker} {child}"));
    }
}
