//! Board projection: todos partitioned into status lanes.
//!
//! The projection is always rebuilt from the full record list. It is never
//! patched incrementally from server data, so it cannot drift from the
//! source; the only local edit is the optimistic card move.

use super::errors::BoardError;
use super::ids::TodoId;
use super::state::TodoStatus;
use super::todo::TodoRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardProjection {
    /// Indexed by `TodoStatus::lane_index`.
    lanes: [Vec<TodoRecord>; 3],
}

impl BoardProjection {
    /// Partition `todos` by status, keeping input order within each lane.
    pub fn project(todos: &[TodoRecord]) -> Self {
        let mut lanes: [Vec<TodoRecord>; 3] = Default::default();
        for todo in todos {
            lanes[todo.status.lane_index()].push(todo.clone());
        }
        Self { lanes }
    }

    pub fn lane(&self, status: TodoStatus) -> &[TodoRecord] {
        &self.lanes[status.lane_index()]
    }

    /// Lanes in fixed order: TODO, IN_PROGRESS, DONE.
    pub fn lanes(&self) -> impl Iterator<Item = (TodoStatus, &[TodoRecord])> {
        TodoStatus::ALL
            .into_iter()
            .map(move |status| (status, self.lane(status)))
    }

    /// Total number of cards across all lanes.
    pub fn len(&self) -> usize {
        self.lanes.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, id: TodoId) -> Option<&TodoRecord> {
        self.lanes.iter().flatten().find(|t| t.id == id)
    }

    /// Lane and position of a card.
    pub fn locate(&self, id: TodoId) -> Option<(TodoStatus, usize)> {
        self.lanes().find_map(|(status, cards)| {
            cards
                .iter()
                .position(|t| t.id == id)
                .map(|pos| (status, pos))
        })
    }

    /// Move a card from `from` to `to`, inserting at `position` (clamped to
    /// the lane length) or appending. The moved card takes the new status.
    pub fn move_card(
        &mut self,
        id: TodoId,
        from: TodoStatus,
        to: TodoStatus,
        position: Option<usize>,
    ) -> Result<(), BoardError> {
        let source = &mut self.lanes[from.lane_index()];
        let index = source
            .iter()
            .position(|t| t.id == id)
            .ok_or(BoardError::UnknownTodo(id))?;
        let mut card = source.remove(index);
        card.status = to;

        let dest = &mut self.lanes[to.lane_index()];
        let at = position.map_or(dest.len(), |p| p.min(dest.len()));
        dest.insert(at, card);
        Ok(())
    }
}
