//! Sidebar groups and the route-keyed sidebar tree.
//!
//! # Lookup
//!
//! A page is matched to the sidebar declared under its longest prefix,
//! measured in path segments. The lookup walks from the page route up
//! through its ancestors and stops at the first declared prefix, so a page
//! at `/technical/setup/` uses the `/technical/` sidebar even when `/` is
//! also declared. Pages without a matching prefix have no sidebar.

use std::collections::HashMap;

use crate::error::NavError;
use crate::route::RoutePath;

/// Titled, optionally collapsable cluster of sidebar links.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SidebarGroup {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    title: Option<String>,
    collapsable: bool,
    children: Vec<RoutePath>,
}

impl SidebarGroup {
    /// Collapsable flag used when a declaration does not set one.
    pub const DEFAULT_COLLAPSABLE: bool = true;

    /// Build a group, normalizing each child route in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first [`NavError::InvalidRoute`] among the children.
    pub fn build<I, S>(
        title: Option<&str>,
        collapsable: Option<bool>,
        raw_children: I,
    ) -> Result<Self, NavError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let children = raw_children
            .into_iter()
            .map(|raw| RoutePath::normalize(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            title: title.map(str::to_owned),
            collapsable: collapsable.unwrap_or(Self::DEFAULT_COLLAPSABLE),
            children,
        })
    }

    /// Build an untitled, non-collapsable group from a bare list of routes.
    ///
    /// # Errors
    ///
    /// Returns the first [`NavError::InvalidRoute`] among the children.
    pub fn untitled<I, S>(raw_children: I) -> Result<Self, NavError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(None, Some(false), raw_children)
    }

    /// Group title, `None` for a bare route list.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Whether the renderer may collapse this group.
    #[must_use]
    pub fn collapsable(&self) -> bool {
        self.collapsable
    }

    /// Child routes in render order.
    #[must_use]
    pub fn children(&self) -> &[RoutePath] {
        &self.children
    }
}

/// Sidebar declared under one route prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SidebarEntry {
    raw_prefix: String,
    prefix: RoutePath,
    groups: Vec<SidebarGroup>,
}

/// Route-prefix keyed collection of sidebar groups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarTree {
    entries: Vec<SidebarEntry>,
    prefix_index: HashMap<RoutePath, usize>,
}

impl SidebarTree {
    /// Assemble a tree from raw prefixes and their groups.
    ///
    /// Entries keep the order in which `declarations` yields them.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::InvalidRoute`] for a malformed prefix and
    /// [`NavError::DuplicateRoutePrefix`] when two raw prefixes normalize to
    /// the same route.
    pub fn assemble<I, S>(declarations: I) -> Result<Self, NavError>
    where
        I: IntoIterator<Item = (S, Vec<SidebarGroup>)>,
        S: AsRef<str>,
    {
        let mut tree = Self::default();

        for (raw_prefix, groups) in declarations {
            let raw_prefix = raw_prefix.as_ref();
            let prefix = RoutePath::normalize(raw_prefix)?;

            if let Some(&existing) = tree.prefix_index.get(&prefix) {
                return Err(NavError::DuplicateRoutePrefix {
                    first: tree.entries[existing].raw_prefix.clone(),
                    second: raw_prefix.to_owned(),
                    normalized: prefix.to_string(),
                });
            }

            tree.prefix_index.insert(prefix.clone(), tree.entries.len());
            tree.entries.push(SidebarEntry {
                raw_prefix: raw_prefix.to_owned(),
                prefix,
                groups,
            });
        }

        Ok(tree)
    }

    /// Sidebar groups for a page, by longest prefix match.
    ///
    /// Returns an empty slice when no prefix matches.
    #[must_use]
    pub fn resolve(&self, page: &RoutePath) -> &[SidebarGroup] {
        page.ancestors()
            .find_map(|candidate| self.prefix_index.get(&candidate))
            .map(|&idx| self.entries[idx].groups.as_slice())
            .unwrap_or_default()
    }

    /// Prefix the given page resolves to, if any.
    #[must_use]
    pub fn matching_prefix(&self, page: &RoutePath) -> Option<&RoutePath> {
        page.ancestors()
            .find_map(|candidate| self.prefix_index.get(&candidate))
            .map(|&idx| &self.entries[idx].prefix)
    }

    /// Declared prefixes in assembly order.
    pub fn prefixes(&self) -> impl Iterator<Item = &RoutePath> {
        self.entries.iter().map(|entry| &entry.prefix)
    }

    /// Every route referenced by a sidebar group, in assembly order.
    ///
    /// Routes are only checked for syntax here. Renderers use this to check
    /// that each route has a content page.
    pub fn referenced_routes(&self) -> impl Iterator<Item = &RoutePath> {
        self.entries
            .iter()
            .flat_map(|entry| &entry.groups)
            .flat_map(|group| group.children())
    }

    /// Number of declared prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no sidebar is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SidebarTree {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.prefix, &entry.groups)?;
        }
        map.end()
    }
}
