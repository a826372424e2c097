//! Resolved navigation configuration handed to the renderer.

use std::collections::BTreeMap;

use crate::error::NavError;
use crate::link::NavLink;
use crate::route::RoutePath;
use crate::settings::DisplaySettings;
use crate::sidebar::{SidebarGroup, SidebarTree};

/// Extra element injected into every page `<head>`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeadTag {
    /// Element name (e.g. `link`, `meta`).
    pub tag: String,
    /// Element attributes.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "BTreeMap::is_empty"))]
    pub attrs: BTreeMap<String, String>,
}

/// Site-wide metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SiteMeta {
    /// Site title.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub title: Option<String>,
    /// Route the site is served under.
    pub base: RoutePath,
    /// Extra `<head>` elements.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub head: Vec<HeadTag>,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: None,
            base: RoutePath::root(),
            head: Vec::new(),
        }
    }
}

impl SiteMeta {
    /// Strip the site base from a served route.
    ///
    /// Returns `None` if the route is outside the base.
    #[must_use]
    pub fn strip_base(&self, served: &RoutePath) -> Option<RoutePath> {
        let rest = served.as_str().strip_prefix(self.base.as_str())?;
        RoutePath::normalize(&format!("/{rest}")).ok()
    }
}

/// Validated, immutable navigation configuration.
///
/// Built once by the resolution pipeline and shared read-only with the
/// renderer, typically behind an `Arc`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NavigationConfig {
    site: SiteMeta,
    nav: Vec<NavLink>,
    sidebar: SidebarTree,
    settings: DisplaySettings,
}

impl NavigationConfig {
    /// Create a configuration from already validated parts.
    #[must_use]
    pub fn new(
        site: SiteMeta,
        nav: Vec<NavLink>,
        sidebar: SidebarTree,
        settings: DisplaySettings,
    ) -> Self {
        Self {
            site,
            nav,
            sidebar,
            settings,
        }
    }

    /// Top navigation links in declaration order.
    #[must_use]
    pub fn top_nav(&self) -> &[NavLink] {
        &self.nav
    }

    /// Sidebar groups for a page, empty when the page has no sidebar.
    #[must_use]
    pub fn sidebar_for(&self, page: &RoutePath) -> &[SidebarGroup] {
        self.sidebar.resolve(page)
    }

    /// Sidebar groups for a raw page path.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::InvalidRoute`] if `page` is not a valid route.
    pub fn sidebar_for_str(&self, page: &str) -> Result<&[SidebarGroup], NavError> {
        let page = RoutePath::normalize(page)?;
        Ok(self.sidebar.resolve(&page))
    }

    /// Resolved display settings.
    #[must_use]
    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// Site metadata.
    #[must_use]
    pub fn site(&self) -> &SiteMeta {
        &self.site
    }

    /// Full sidebar tree.
    #[must_use]
    pub fn sidebar(&self) -> &SidebarTree {
        &self.sidebar
    }
}

#[cfg(test)]
mod tests {
    // Shared read-only across rendering threads
    static_assertions::assert_impl_all!(super::NavigationConfig: Send, Sync);

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::settings::{DisplayOverrides, LastUpdated};

    fn route(raw: &str) -> RoutePath {
        RoutePath::normalize(raw).unwrap()
    }

    fn example_config() -> NavigationConfig {
        let nav = vec![NavLink::classify("Home", "/").unwrap()];
        let sidebar = SidebarTree::assemble([(
            "/technical/",
            vec![
                SidebarGroup::build(
                    Some("Technical documentation"),
                    Some(false),
                    ["/technical/", "/technical/setup"],
                )
                .unwrap(),
            ],
        )])
        .unwrap();
        let settings = DisplaySettings::resolve(
            &DisplaySettings::default(),
            &DisplayOverrides {
                sidebar_depth: Some(2),
                ..Default::default()
            },
        )
        .unwrap();

        NavigationConfig::new(SiteMeta::default(), nav, sidebar, settings)
    }

    #[test]
    fn test_end_to_end_example() {
        let config = example_config();

        let groups = config.sidebar_for(&route("/technical/setup"));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title(), Some("Technical documentation"));
        assert!(!groups[0].collapsable());
        assert_eq!(
            groups[0].children(),
            &[route("/technical/"), route("/technical/setup")]
        );
        assert_eq!(config.settings().sidebar_depth, 2);
        assert_eq!(config.settings().last_updated, LastUpdated::Disabled);
    }

    #[test]
    fn test_top_nav() {
        let config = example_config();
        assert_eq!(config.top_nav().len(), 1);
        assert_eq!(config.top_nav()[0].label(), "Home");
    }

    #[test]
    fn test_sidebar_for_str() {
        let config = example_config();
        assert_eq!(config.sidebar_for_str("/technical/setup").unwrap().len(), 1);
        assert!(config.sidebar_for_str("/unknown/page").unwrap().is_empty());
        assert!(config.sidebar_for_str("technical").is_err());
    }

    #[test]
    fn test_strip_base() {
        let site = SiteMeta {
            base: route("/anno-docs/"),
            ..Default::default()
        };

        assert_eq!(
            site.strip_base(&route("/anno-docs/technical/setup")),
            Some(route("/technical/setup"))
        );
        assert_eq!(site.strip_base(&route("/anno-docs/")), Some(RoutePath::root()));
        assert_eq!(site.strip_base(&route("/elsewhere/")), None);
    }

    #[test]
    fn test_strip_root_base_is_identity() {
        let site = SiteMeta::default();
        assert_eq!(site.strip_base(&route("/a/b")), Some(route("/a/b")));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_for_renderer() {
        let json = serde_json::to_value(example_config()).unwrap();

        assert_eq!(json["settings"]["sidebarDepth"], 2);
        assert_eq!(json["settings"]["lastUpdated"], false);
        assert_eq!(json["nav"][0]["target"]["kind"], "internal");
        assert_eq!(
            json["sidebar"]["/technical/"][0]["children"][1],
            "/technical/setup/"
        );
    }
}
