//! Top-level navigation links.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::NavError;
use crate::route::RoutePath;

/// Absolute URL with a scheme and a non-empty host.
static EXTERNAL_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^/?#\s]+").expect("invalid external URL regex")
});

/// Where a navigation link points.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "kind", content = "href", rename_all = "lowercase")
)]
pub enum LinkTarget {
    /// Route inside the site.
    Internal(RoutePath),
    /// Absolute URL outside the site, kept verbatim.
    External(String),
}

/// Top-level navigation entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NavLink {
    label: String,
    target: LinkTarget,
    /// Query and fragment of an internal target (`?tab=api#intro`).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    suffix: Option<String>,
}

impl NavLink {
    /// Build a navigation link, classifying its target.
    ///
    /// Targets with a scheme and host (`https://example.com`) are external
    /// and passed through untouched. Everything else is parsed as a
    /// [`RoutePath`] after splitting off any query or fragment, which is kept
    /// as written and appended again by [`Self::href`]. The label is stored
    /// trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::EmptyLabel`] if the label is blank and
    /// [`NavError::InvalidRoute`] if an internal target is malformed.
    pub fn classify(label: &str, target: &str) -> Result<Self, NavError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(NavError::EmptyLabel {
                label: label.to_owned(),
                target: target.to_owned(),
            });
        }

        if EXTERNAL_URL.is_match(target) {
            return Ok(Self {
                label: trimmed.to_owned(),
                target: LinkTarget::External(target.to_owned()),
                suffix: None,
            });
        }

        let (path, suffix) = match target.find(['?', '#']) {
            Some(idx) => (&target[..idx], Some(target[idx..].to_owned())),
            None => (target, None),
        };
        let route = RoutePath::normalize(path).map_err(|err| match err {
            NavError::InvalidRoute { reason, .. } => NavError::InvalidRoute {
                raw: target.to_owned(),
                reason,
            },
            other => other,
        })?;

        Ok(Self {
            label: trimmed.to_owned(),
            target: LinkTarget::Internal(route),
            suffix,
        })
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Link target.
    #[must_use]
    pub fn target(&self) -> &LinkTarget {
        &self.target
    }

    /// Whether the link leaves the site.
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self.target, LinkTarget::External(_))
    }

    /// Query and fragment kept from an internal target.
    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Target as a string suitable for an `href` attribute.
    #[must_use]
    pub fn href(&self) -> Cow<'_, str> {
        match (&self.target, &self.suffix) {
            (LinkTarget::Internal(route), None) => Cow::Borrowed(route.as_str()),
            (LinkTarget::Internal(route), Some(suffix)) => Cow::Owned(format!("{route}{suffix}")),
            (LinkTarget::External(url), _) => Cow::Borrowed(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::InvalidRouteReason;

    #[test]
    fn test_classify_internal_link() {
        let link = NavLink::classify("Technical documentation", "/technical/").unwrap();

        assert_eq!(link.label(), "Technical documentation");
        assert_eq!(
            link.target(),
            &LinkTarget::Internal(RoutePath::normalize("/technical/").unwrap())
        );
        assert!(!link.is_external());
    }

    #[test]
    fn test_classify_root_link() {
        let link = NavLink::classify("Home", "/").unwrap();
        assert_eq!(link.href(), "/");
    }

    #[test]
    fn test_classify_external_link_kept_verbatim() {
        let link = NavLink::classify("allel.es", "http://allel.es").unwrap();

        assert!(link.is_external());
        assert_eq!(link.href(), "http://allel.es");
    }

    #[test]
    fn test_classify_external_link_with_path_and_query() {
        let url = "https://github.com/org/repo/blob/main/README.md?plain=1#L10";
        let link = NavLink::classify("Source", url).unwrap();
        assert_eq!(link.target(), &LinkTarget::External(url.to_owned()));
    }

    #[test]
    fn test_classify_scheme_without_host_is_not_external() {
        let err = NavLink::classify("Mail", "mailto:team@example.com").unwrap_err();
        assert!(matches!(
            err,
            NavError::InvalidRoute {
                reason: InvalidRouteReason::MissingLeadingSlash,
                ..
            }
        ));
    }

    #[test]
    fn test_classify_trims_label() {
        let link = NavLink::classify("  Release notes \t", "/releasenotes/").unwrap();
        assert_eq!(link.label(), "Release notes");
    }

    #[test]
    fn test_classify_blank_label_fails() {
        let err = NavLink::classify("   ", "/technical/").unwrap_err();
        assert_eq!(
            err,
            NavError::EmptyLabel {
                label: "   ".to_owned(),
                target: "/technical/".to_owned(),
            }
        );
    }

    #[test]
    fn test_classify_malformed_internal_target_fails() {
        let err = NavLink::classify("Setup", "/technical/../setup").unwrap_err();
        assert!(matches!(
            err,
            NavError::InvalidRoute { ref raw, .. } if raw == "/technical/../setup"
        ));
    }

    #[test]
    fn test_internal_href_is_normalized() {
        let link = NavLink::classify("Setup", "/technical/setup").unwrap();
        assert_eq!(link.href(), "/technical/setup/");
        assert_eq!(link.suffix(), None);
    }

    #[test]
    fn test_classify_keeps_fragment_after_route() {
        let link = NavLink::classify("Intro", "/guide/#intro").unwrap();

        assert_eq!(
            link.target(),
            &LinkTarget::Internal(RoutePath::normalize("/guide/").unwrap())
        );
        assert_eq!(link.suffix(), Some("#intro"));
        assert_eq!(link.href(), "/guide/#intro");
    }

    #[test]
    fn test_classify_keeps_query_and_fragment() {
        let link = NavLink::classify("API", "/a/b?x=1#top").unwrap();
        assert_eq!(link.href(), "/a/b/?x=1#top");
    }

    #[test]
    fn test_classify_fragment_only_target_fails_with_full_raw() {
        let err = NavLink::classify("Intro", "#intro").unwrap_err();
        assert_eq!(
            err,
            NavError::InvalidRoute {
                raw: "#intro".to_owned(),
                reason: InvalidRouteReason::Empty,
            }
        );
    }
}
