//! Live navigation configuration for docnav.
//!
//! This crate provides [`NavigationSite`], the holder renderers read the
//! active [`NavigationConfig`](docnav_model::NavigationConfig) from. Reloads
//! rebuild the whole config from the declaration file and replace it with a
//! single pointer swap.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use docnav_config::CliSettings;
//! use docnav_model::RoutePath;
//! use docnav_site::NavigationSite;
//!
//! let site = NavigationSite::load(Some(Path::new("docnav.toml")), CliSettings::default())?;
//!
//! let page = RoutePath::normalize("/technical/setup")?;
//! let groups = site.sidebar_for(&page);
//!
//! // After the declaration changes on disk
//! site.invalidate();
//! let config = site.current_or_reload();
//! # Ok(())
//! # }
//! ```

mod site;

pub use site::NavigationSite;
