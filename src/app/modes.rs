//! Sort and load mode types for the event list.
//!
//! These enums select how visible events are ordered and which loading flag a
//! page request raises.
//!
//! # Example
//!
//! ```rust
//! use eventboard::app::modes::{LoadKind, SortMode};
//!
//! assert_eq!(SortMode::default(), SortMode::Nearest);
//! assert_eq!(LoadKind::for_page(1), LoadKind::Initial);
//! assert_eq!(LoadKind::for_page(3), LoadKind::More);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordering applied to visible events after filtering.
///
/// Exactly one mode is active at a time. Sorting is stable, so events that
/// compare equal keep their accumulated (server) order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Earliest date first. Events without a parseable date sort as today.
    #[default]
    Nearest,

    /// Most recent date first. Events without a parseable date sort as today.
    Newest,

    /// Lowest price first. Events without a parseable price sort last.
    Cheapest,
}

impl SortMode {
    /// Wire/CLI name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Newest => "newest",
            Self::Cheapest => "cheapest",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "newest" => Ok(Self::Newest),
            "cheapest" => Ok(Self::Cheapest),
            other => Err(format!(
                "unknown sort mode '{other}' (expected nearest, newest or cheapest)"
            )),
        }
    }
}

/// Which loading flag a page request raises.
///
/// Page 1 is always an initial load, every later page is a load-more, regardless
/// of whether the response is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// First page; raises `loading`.
    Initial,

    /// Any later page; raises `loading_more`.
    More,
}

impl LoadKind {
    #[must_use]
    pub const fn for_page(page: u32) -> Self {
        if page <= 1 {
            Self::Initial
        } else {
            Self::More
        }
    }
}
