//! `docnav check` command implementation.

use clap::Args;

use crate::commands::DeclarationArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub declaration: DeclarationArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns the first loading or validation error.
    pub(crate) fn execute(&self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.declaration.load_site()?;
        let config = site.current();

        match site.path() {
            Some(path) => output.info(&format!("Declaration: {}", path.display())),
            None => output.warning("No docnav.toml found, using empty declaration"),
        }

        let external = config.top_nav().iter().filter(|link| link.is_external()).count();
        output.info(&format!(
            "Top navigation: {} links ({external} external)",
            config.top_nav().len()
        ));
        output.info(&format!(
            "Sidebars: {} prefixes, {} routes referenced",
            config.sidebar().len(),
            config.sidebar().referenced_routes().count()
        ));
        output.info(&format!("Sidebar depth: {}", config.settings().sidebar_depth));
        match config.settings().last_updated.label() {
            Some(label) => output.info(&format!("Last updated label: {label}")),
            None => output.info("Last updated label: disabled"),
        }
        // Page existence is checked by the renderer, not here
        output.success("Navigation declaration is valid");

        Ok(())
    }
}
