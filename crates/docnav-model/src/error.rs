//! Navigation model errors.
//!
//! All errors are raised while building the model and carry the raw,
//! unnormalized value that caused them.

use std::fmt;

/// Reason a raw string was rejected as a route path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidRouteReason {
    /// The raw string is empty.
    Empty,
    /// The raw string does not start with `/`.
    MissingLeadingSlash,
    /// The raw string contains `//`.
    DoubledSlash,
    /// The raw string contains a `..` segment.
    ParentTraversal,
    /// The raw string contains a `.` segment.
    CurrentSegment,
    /// The raw string carries a query or fragment (`?` or `#`).
    QueryOrFragment,
}

impl fmt::Display for InvalidRouteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Empty => "route is empty",
            Self::MissingLeadingSlash => "route must start with '/'",
            Self::DoubledSlash => "route contains an empty segment ('//')",
            Self::ParentTraversal => "route contains a '..' segment",
            Self::CurrentSegment => "route contains a '.' segment",
            Self::QueryOrFragment => "route contains a query or fragment ('?' or '#')",
        };
        f.write_str(reason)
    }
}

/// Error raised while resolving navigation declarations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// A route string is not a valid route path.
    #[error("Invalid route '{raw}': {reason}")]
    InvalidRoute {
        /// Route as declared.
        raw: String,
        /// Why the route was rejected.
        reason: InvalidRouteReason,
    },

    /// A navigation link has a blank label.
    #[error("Navigation link to '{target}' has an empty label ('{label}')")]
    EmptyLabel {
        /// Label as declared.
        label: String,
        /// Link target as declared.
        target: String,
    },

    /// Two sidebar prefixes resolve to the same route.
    #[error("Duplicate sidebar prefix: '{first}' and '{second}' both resolve to '{normalized}'")]
    DuplicateRoutePrefix {
        /// First raw prefix.
        first: String,
        /// Second raw prefix.
        second: String,
        /// Route both prefixes normalize to.
        normalized: String,
    },

    /// Sidebar depth is negative or out of range.
    #[error("Invalid sidebar depth {raw}: must be a non-negative integer")]
    InvalidDepth {
        /// Depth as declared.
        raw: i64,
    },
}
