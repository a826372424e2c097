//! `docnav nav` command implementation.

use clap::Args;
use docnav_model::NavLink;

use crate::commands::DeclarationArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    pub declaration: DeclarationArgs,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns the first loading or validation error.
    pub(crate) fn execute(&self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.declaration.load_site()?.current();

        if self.json {
            output.line(&serde_json::to_string_pretty(config.top_nav())?);
            return Ok(());
        }

        for link in config.top_nav() {
            output.line(&format_link(link));
        }

        Ok(())
    }
}

fn format_link(link: &NavLink) -> String {
    let marker = if link.is_external() { " (external)" } else { "" };
    format!("{} -> {}{marker}", link.label(), link.href())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_format_internal_link() {
        let link = NavLink::classify("Technical documentation", "/technical").unwrap();
        assert_eq!(format_link(&link), "Technical documentation -> /technical/");
    }

    #[test]
    fn test_format_external_link() {
        let link = NavLink::classify("allel.es", "http://allel.es").unwrap();
        assert_eq!(format_link(&link), "allel.es -> http://allel.es (external)");
    }
}
