//! Status - lane ごとの件数
//!
//! board の見出しや CLI の出力で使う集計です。

use serde::{Deserialize, Serialize};

use crate::domain::{BoardProjection, TodoStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl LaneCounts {
    pub fn of(projection: &BoardProjection) -> Self {
        Self {
            todo: projection.lane(TodoStatus::Todo).len(),
            in_progress: projection.lane(TodoStatus::InProgress).len(),
            done: projection.lane(TodoStatus::Done).len(),
        }
    }

    pub fn total(&self) -> usize {
        self.todo + self.in_progress + self.done
    }
}
