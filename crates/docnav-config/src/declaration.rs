//! Raw navigation declaration and its resolution.
//!
//! A [`Declaration`] holds the navigation exactly as written in
//! `docnav.toml`, unvalidated. [`Declaration::resolve`] runs the whole
//! pipeline (route normalization, link classification, sidebar group and
//! tree construction, display settings) and either returns a complete
//! [`NavigationConfig`] or the first error encountered.

use std::collections::BTreeMap;
use std::fmt;

use docnav_model::{
    DisplayOverrides, DisplaySettings, HeadTag, LastUpdated, NavError, NavLink, NavigationConfig,
    RoutePath, SidebarGroup, SidebarTree, SiteMeta,
};
use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::{ConfigError, expand};

/// Unresolved navigation declaration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Declaration {
    /// Site title.
    pub title: Option<String>,
    /// Route the site is served under (defaults to `/`).
    pub base: Option<String>,
    /// Extra `<head>` elements.
    pub head: Vec<RawHeadTag>,
    /// Top navigation links in display order.
    pub nav: Vec<RawNavLink>,
    /// Sidebars keyed by route prefix, sorted by prefix.
    pub sidebar: BTreeMap<String, RawSidebar>,
    /// Display setting overrides.
    pub display_settings: RawDisplaySettings,
}

/// `[[head]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawHeadTag {
    /// Element name.
    pub tag: String,
    /// Element attributes.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

/// `[[nav]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawNavLink {
    /// Link label.
    pub text: String,
    /// Internal route or absolute URL.
    pub link: String,
}

/// Sidebar declared under one prefix.
///
/// Deserialized by value shape (array or table) so that errors inside a
/// group, such as a misspelled field, are reported as they are.
#[derive(Debug)]
pub enum RawSidebar {
    /// List of bare routes and group objects.
    Items(Vec<RawSidebarItem>),
    /// A single group object.
    Group(RawSidebarGroup),
}

/// Element of a sidebar list.
#[derive(Debug)]
pub enum RawSidebarItem {
    /// Bare route.
    Route(String),
    /// Group object.
    Group(RawSidebarGroup),
}

impl<'de> Deserialize<'de> for RawSidebar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SidebarVisitor;

        impl<'de> Visitor<'de> for SidebarVisitor {
            type Value = RawSidebar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array of routes and groups, or a group table")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
                Vec::deserialize(SeqAccessDeserializer::new(seq)).map(RawSidebar::Items)
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                RawSidebarGroup::deserialize(MapAccessDeserializer::new(map)).map(RawSidebar::Group)
            }
        }

        deserializer.deserialize_any(SidebarVisitor)
    }
}

impl<'de> Deserialize<'de> for RawSidebarItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ItemVisitor;

        impl<'de> Visitor<'de> for ItemVisitor {
            type Value = RawSidebarItem;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a route string or a group table")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(RawSidebarItem::Route(value.to_owned()))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                RawSidebarGroup::deserialize(MapAccessDeserializer::new(map))
                    .map(RawSidebarItem::Group)
            }
        }

        deserializer.deserialize_any(ItemVisitor)
    }
}

/// Sidebar group object.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSidebarGroup {
    /// Group title.
    pub title: Option<String>,
    /// Whether the group can be collapsed (defaults to true).
    pub collapsable: Option<bool>,
    /// Child routes in render order.
    #[serde(default)]
    pub children: Vec<String>,
}

/// `[display_settings]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawDisplaySettings {
    /// Sidebar heading depth.
    pub sidebar_depth: Option<i64>,
    /// "Last updated" label: text, `true` for the default text, or `false`.
    pub last_updated: Option<RawLastUpdated>,
}

/// "Last updated" value as declared.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawLastUpdated {
    /// `true` or `false`.
    Flag(bool),
    /// Custom label text.
    Label(String),
}

impl From<&RawLastUpdated> for LastUpdated {
    fn from(raw: &RawLastUpdated) -> Self {
        match raw {
            RawLastUpdated::Flag(enabled) => LastUpdated::from_flag(*enabled),
            RawLastUpdated::Label(text) => LastUpdated::Label(text.clone()),
        }
    }
}

impl From<&RawDisplaySettings> for DisplayOverrides {
    fn from(raw: &RawDisplaySettings) -> Self {
        Self {
            sidebar_depth: raw.sidebar_depth,
            last_updated: raw.last_updated.as_ref().map(LastUpdated::from),
        }
    }
}

/// Attach the declaration field that produced a model error.
fn at(field: impl Into<String>) -> impl FnOnce(NavError) -> ConfigError {
    let field = field.into();
    move |source| ConfigError::Navigation { field, source }
}

impl Declaration {
    /// Parse a declaration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed or does not
    /// match the declaration shape.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Expand environment variable references in `title`, `base` and nav links.
    pub(crate) fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(title) = &mut self.title {
            expand::expand_in_place(title, "title")?;
        }
        if let Some(base) = &mut self.base {
            expand::expand_in_place(base, "base")?;
        }
        for (i, link) in self.nav.iter_mut().enumerate() {
            expand::expand_in_place(&mut link.link, &format!("nav[{i}].link"))?;
        }
        Ok(())
    }

    /// Resolve into an immutable [`NavigationConfig`].
    ///
    /// `extra` overrides are applied after the declaration's own
    /// `[display_settings]`, each present field replacing the previous value.
    ///
    /// # Errors
    ///
    /// Returns the first validation error, tagged with the declaration field
    /// it came from.
    pub fn resolve(&self, extra: &DisplayOverrides) -> Result<NavigationConfig, ConfigError> {
        let site = self.resolve_site()?;
        let nav = self.resolve_nav()?;
        let sidebar = self.resolve_sidebar()?;

        let declared = DisplaySettings::resolve(
            &DisplaySettings::default(),
            &DisplayOverrides::from(&self.display_settings),
        )
        .map_err(at("display_settings.sidebar_depth"))?;
        let settings = DisplaySettings::resolve(&declared, extra).map_err(at("sidebar_depth"))?;

        tracing::debug!(
            nav = nav.len(),
            sidebars = sidebar.len(),
            sidebar_depth = settings.sidebar_depth,
            "Resolved navigation config"
        );

        Ok(NavigationConfig::new(site, nav, sidebar, settings))
    }

    fn resolve_site(&self) -> Result<SiteMeta, ConfigError> {
        let base = match &self.base {
            Some(raw) => RoutePath::normalize(raw).map_err(at("base"))?,
            None => RoutePath::root(),
        };

        let head = self
            .head
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                if raw.tag.trim().is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "head[{i}].tag cannot be empty"
                    )));
                }
                Ok(HeadTag {
                    tag: raw.tag.clone(),
                    attrs: raw.attrs.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SiteMeta {
            title: self.title.clone(),
            base,
            head,
        })
    }

    fn resolve_nav(&self) -> Result<Vec<NavLink>, ConfigError> {
        self.nav
            .iter()
            .enumerate()
            .map(|(i, raw)| NavLink::classify(&raw.text, &raw.link).map_err(at(format!("nav[{i}]"))))
            .collect()
    }

    fn resolve_sidebar(&self) -> Result<SidebarTree, ConfigError> {
        let declarations = self
            .sidebar
            .iter()
            .map(|(prefix, raw)| {
                let field = format!("sidebar.\"{prefix}\"");
                let groups = match raw {
                    RawSidebar::Items(items) => build_groups(items, &field)?,
                    RawSidebar::Group(group) => vec![build_group(group, &field)?],
                };
                Ok((prefix.as_str(), groups))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        SidebarTree::assemble(declarations).map_err(at("sidebar"))
    }
}

fn build_group(raw: &RawSidebarGroup, field: &str) -> Result<SidebarGroup, ConfigError> {
    SidebarGroup::build(raw.title.as_deref(), raw.collapsable, &raw.children)
        .map_err(at(format!("{field}.children")))
}

/// Build groups from a sidebar list.
///
/// Consecutive bare routes are gathered into one untitled group, so
/// `["/a", "/b", {group}, "/c"]` yields three groups.
fn build_groups(items: &[RawSidebarItem], field: &str) -> Result<Vec<SidebarGroup>, ConfigError> {
    let mut groups = Vec::new();
    let mut pending: Vec<RoutePath> = Vec::new();

    for (i, item) in items.iter().enumerate() {
        match item {
            RawSidebarItem::Route(route) => {
                pending.push(RoutePath::normalize(route).map_err(at(format!("{field}[{i}]")))?);
            }
            RawSidebarItem::Group(group) => {
                if !pending.is_empty() {
                    groups.push(SidebarGroup::untitled(pending.drain(..)).map_err(at(field))?);
                }
                groups.push(build_group(group, &format!("{field}[{i}]"))?);
            }
        }
    }
    if !pending.is_empty() {
        groups.push(SidebarGroup::untitled(pending).map_err(at(field))?);
    }

    Ok(groups)
}
