//! Site-wide display settings.
//!
//! Settings are resolved once from global defaults and a single layer of
//! overrides. Each field present in the overrides replaces the global value;
//! absent fields keep it. Fields are never deep merged.
//!
//! Sidebar depth is global. Groups carry their own `collapsable` flag but
//! there is no per-group depth.

use crate::error::NavError;

/// "Last updated" label shown under each page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LastUpdated {
    /// No label is shown.
    #[default]
    Disabled,
    /// Show the label with this prefix text.
    Label(String),
}

impl LastUpdated {
    /// Label text used when the setting is enabled without custom text.
    pub const DEFAULT_LABEL: &'static str = "Last Updated";

    /// Build from a boolean switch, using [`Self::DEFAULT_LABEL`] when enabled.
    #[must_use]
    pub fn from_flag(enabled: bool) -> Self {
        if enabled {
            Self::Label(Self::DEFAULT_LABEL.to_owned())
        } else {
            Self::Disabled
        }
    }

    /// Label text, `None` when disabled.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Disabled => None,
            Self::Label(text) => Some(text),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LastUpdated {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::Label(text) => serializer.serialize_str(text),
        }
    }
}

/// Resolved display settings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct DisplaySettings {
    /// How many heading levels the sidebar expands below each page link.
    pub sidebar_depth: u32,
    /// "Last updated" label control.
    pub last_updated: LastUpdated,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            sidebar_depth: 1,
            last_updated: LastUpdated::Disabled,
        }
    }
}

/// Partial display settings.
///
/// Depth is kept as a signed integer so negative declarations can be
/// reported instead of failing deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayOverrides {
    /// Sidebar depth override.
    pub sidebar_depth: Option<i64>,
    /// "Last updated" override.
    pub last_updated: Option<LastUpdated>,
}

impl DisplayOverrides {
    /// Check if no field is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sidebar_depth.is_none() && self.last_updated.is_none()
    }
}

impl DisplaySettings {
    /// Apply overrides on top of global settings.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::InvalidDepth`] if the depth override is negative or
    /// does not fit in a `u32`.
    pub fn resolve(global: &Self, overrides: &DisplayOverrides) -> Result<Self, NavError> {
        let sidebar_depth = match overrides.sidebar_depth {
            Some(raw) => u32::try_from(raw).map_err(|_| NavError::InvalidDepth { raw })?,
            None => global.sidebar_depth,
        };

        let last_updated = overrides
            .last_updated
            .clone()
            .unwrap_or_else(|| global.last_updated.clone());

        Ok(Self {
            sidebar_depth,
            last_updated,
        })
    }
}
