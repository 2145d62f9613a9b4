//! Todo status and its lane mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Todo status (one board lane per value).
///
/// Lanes are laid out in a fixed order:
/// - 0: TODO
/// - 1: IN_PROGRESS
/// - 2: DONE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoStatus {
    /// Not started.
    Todo,

    /// Being worked on.
    InProgress,

    /// Finished. A finished todo cannot start a timer.
    Done,
}

impl TodoStatus {
    /// All statuses in lane order.
    pub const ALL: [TodoStatus; 3] = [TodoStatus::Todo, TodoStatus::InProgress, TodoStatus::Done];

    /// Lane position of this status.
    pub fn lane_index(self) -> usize {
        match self {
            TodoStatus::Todo => 0,
            TodoStatus::InProgress => 1,
            TodoStatus::Done => 2,
        }
    }

    /// Status for a lane position (`None` for anything past the last lane).
    pub fn from_lane_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn is_done(self) -> bool {
        matches!(self, TodoStatus::Done)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TodoStatus::Todo => "TODO",
            TodoStatus::InProgress => "IN_PROGRESS",
            TodoStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
