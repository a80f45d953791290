//! Visible-subset filter for the task list.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Which subset of the task list is presented.
///
/// Not persisted; every process starts at `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    /// Every task.
    #[default]
    All,
    /// Completed tasks only.
    Completed,
    /// Incomplete tasks only.
    Remaining,
}

/// Error when a filter label cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported filter `{0}`; expected All|Completed|Remaining")]
pub struct InvalidFilter(pub String);

impl Filter {
    /// All filters in dialog order.
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Completed, Filter::Remaining];

    /// Stable display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Completed => "Completed",
            Self::Remaining => "Remaining",
        }
    }

    /// Returns whether a task with the given completion flag passes.
    pub fn admits(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Completed => completed,
            Self::Remaining => !completed,
        }
    }

    /// Whether the "Clear Completed" action is offered under this filter.
    pub fn offers_clear_completed(self) -> bool {
        matches!(self, Self::All | Self::Completed)
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = InvalidFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "remaining" => Ok(Self::Remaining),
            _ => Err(InvalidFilter(value.to_string())),
        }
    }
}
