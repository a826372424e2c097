//! Normalized site route paths.
//!
//! A [`RoutePath`] is a slash-delimited logical path identifying a section or
//! page of the site. The canonical form always begins and ends with `/`
//! (`/` for the root, `/technical/setup/` for a nested page), so `/technical`
//! and `/technical/` denote the same route.

use std::fmt;
use std::str::FromStr;

use crate::error::{InvalidRouteReason, NavError};

/// Normalized route path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoutePath(String);

impl RoutePath {
    /// The site root (`/`).
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_owned())
    }

    /// Normalize a raw route string.
    ///
    /// A trailing slash is appended when missing. Normalizing the string form
    /// of an already normalized route yields the same route.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::InvalidRoute`] if `raw` is empty, does not start
    /// with `/`, contains `//`, contains a `.` or `..` segment, or carries a
    /// query or fragment.
    pub fn normalize(raw: &str) -> Result<Self, NavError> {
        let invalid = |reason| NavError::InvalidRoute {
            raw: raw.to_owned(),
            reason,
        };

        if raw.is_empty() {
            return Err(invalid(InvalidRouteReason::Empty));
        }
        let Some(rest) = raw.strip_prefix('/') else {
            return Err(invalid(InvalidRouteReason::MissingLeadingSlash));
        };
        if raw.contains("//") {
            return Err(invalid(InvalidRouteReason::DoubledSlash));
        }
        if raw.contains(['?', '#']) {
            return Err(invalid(InvalidRouteReason::QueryOrFragment));
        }

        let rest = rest.strip_suffix('/').unwrap_or(rest);
        if rest.is_empty() {
            return Ok(Self::root());
        }
        for segment in rest.split('/') {
            match segment {
                ".." => return Err(invalid(InvalidRouteReason::ParentTraversal)),
                "." => return Err(invalid(InvalidRouteReason::CurrentSegment)),
                _ => {}
            }
        }

        Ok(Self(format!("/{rest}/")))
    }

    /// Canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments, root first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }

    /// Number of segments (0 for the root).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Whether this is the site root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Whether `prefix` is a segment-wise prefix of this route.
    ///
    /// `/technical/setup/` starts with `/technical/` but not with `/tech/`.
    #[must_use]
    pub fn starts_with(&self, prefix: &RoutePath) -> bool {
        // Both sides end with '/', so a string prefix is a segment prefix.
        self.0.starts_with(prefix.as_str())
    }

    /// Parent route, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<RoutePath> {
        if self.is_root() {
            return None;
        }
        let trimmed = &self.0[..self.0.len() - 1];
        let (parent, _) = trimmed.rsplit_once('/')?;
        Some(Self(format!("{parent}/")))
    }

    /// This route followed by each of its ancestors, ending with the root.
    pub fn ancestors(&self) -> impl Iterator<Item = RoutePath> {
        std::iter::successors(Some(self.clone()), RoutePath::parent)
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoutePath {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RoutePath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
