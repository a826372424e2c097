//! Navigation and sidebar model for docnav.
//!
//! This crate provides the validated, immutable model a documentation
//! renderer consumes:
//! - [`RoutePath`]: Normalized site route used as link target and sidebar key
//! - [`NavLink`]: Top navigation entry pointing inside or outside the site
//! - [`SidebarGroup`] and [`SidebarTree`]: Route-prefix keyed sidebar menus
//! - [`DisplaySettings`]: Global display settings with override resolution
//! - [`NavigationConfig`]: The resolved configuration
//!
//! Every constructor validates its input and fails fast with a [`NavError`]
//! naming the offending raw value.
//!
//! # Example
//!
//! ```
//! use docnav_model::{
//!     DisplaySettings, NavLink, NavigationConfig, RoutePath, SidebarGroup, SidebarTree, SiteMeta,
//! };
//!
//! let group = SidebarGroup::build(
//!     Some("Technical documentation"),
//!     Some(false),
//!     ["/technical/", "/technical/setup"],
//! )?;
//! let sidebar = SidebarTree::assemble([("/technical/", vec![group])])?;
//! let nav = vec![NavLink::classify("Home", "/")?];
//! let config = NavigationConfig::new(SiteMeta::default(), nav, sidebar, DisplaySettings::default());
//!
//! let page = RoutePath::normalize("/technical/setup")?;
//! assert_eq!(config.sidebar_for(&page)[0].title(), Some("Technical documentation"));
//! # Ok::<(), docnav_model::NavError>(())
//! ```

mod error;
mod link;
mod navigation;
mod route;
mod settings;
mod sidebar;

pub use error::{InvalidRouteReason, NavError};
pub use link::{LinkTarget, NavLink};
pub use navigation::{HeadTag, NavigationConfig, SiteMeta};
pub use route::RoutePath;
pub use settings::{DisplayOverrides, DisplaySettings, LastUpdated};
pub use sidebar::{SidebarGroup, SidebarTree};
