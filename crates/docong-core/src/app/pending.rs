//! PendingMoves - 楽観的なカード移動の台帳
//!
//! カード移動は画面に即時反映し、サーバーへのステータス変更は後から確定します。
//! その間の操作をここに記録し、成功なら settle、失敗なら compensate で
//! そのカードだけを元のレーン・位置へ戻します。
//! 他のカードの移動（確定済みも未確定も）には触れません。
//!
//! # 世代（generation）
//! board は `sync` のたびに世代を進めます。移動開始後に正本から
//! 取り直していれば、正本の方が新しいので巻き戻しは行いません。

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{OpId, TodoId, TodoStatus};
use crate::ports::{Clock, IdGenerator};

/// One optimistic move waiting for the status change to land.
#[derive(Debug, Clone)]
pub struct PendingMove {
    pub op_id: OpId,
    pub todo_id: TodoId,
    pub from: TodoStatus,
    /// Index of the card in the `from` lane before the move.
    pub from_index: usize,
    pub to: TodoStatus,
    pub issued_at: DateTime<Utc>,
    generation: u64,
}

pub struct PendingMoves {
    ops: HashMap<OpId, PendingMove>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl PendingMoves {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ops: HashMap::new(),
            ids,
            clock,
        }
    }

    /// Record a move of `todo_id` out of position `from_index` in `from`,
    /// applied at board generation `generation`.
    pub fn begin(
        &mut self,
        todo_id: TodoId,
        (from, from_index): (TodoStatus, usize),
        to: TodoStatus,
        generation: u64,
    ) -> OpId {
        let op_id = self.ids.generate_op_id();
        self.ops.insert(
            op_id,
            PendingMove {
                op_id,
                todo_id,
                from,
                from_index,
                to,
                issued_at: self.clock.now(),
                generation,
            },
        );
        op_id
    }

    /// The status change landed; forget the record.
    pub fn settle(&mut self, op_id: OpId) -> Option<PendingMove> {
        self.ops.remove(&op_id)
    }

    /// The status change failed. Returns the move to undo, or `None` when
    /// a sync at a later generation already replaced the board.
    pub fn compensate(&mut self, op_id: OpId, current_generation: u64) -> Option<PendingMove> {
        let op = self.ops.remove(&op_id)?;
        (op.generation == current_generation).then_some(op)
    }

    pub fn get(&self, op_id: OpId) -> Option<&PendingMove> {
        self.ops.get(&op_id)
    }

    /// Pending moves, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PendingMove> {
        let mut ops: Vec<_> = self.ops.values().collect();
        ops.sort_by_key(|op| op.op_id);
        ops.into_iter()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
