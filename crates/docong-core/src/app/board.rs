//! Board - group todo board controller
//!
//! 正本（永続化 API）から受け取った todo リストを lane に分け、
//! カード移動・削除・選択・タイマー開始をガードしてからポートへ依頼します。
//!
//! # フロー
//! 1. `sync()` で正本のリストから projection を作り直す
//! 2. ユーザー操作（move / delete / select / start_timer）を 1 件ずつ処理
//! 3. 外部への依頼結果は次の `sync()` で正本として戻ってくる

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::pending::{PendingMove, PendingMoves};
use crate::app::status::LaneCounts;
use crate::domain::{
    BoardError, BoardProjection, CardAction, DomainEvent, OpId, Session, TodoId, TodoRecord,
    TodoStatus, policy,
};
use crate::ports::{EventSink, TimerControl, TodoStore};

/// A drag-and-drop result reported by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardMove {
    pub todo_id: TodoId,
    pub from: TodoStatus,
    pub to: TodoStatus,

    /// Index in the destination lane; `None` appends.
    pub position: Option<usize>,
}

impl CardMove {
    pub fn new(todo_id: TodoId, from: TodoStatus, to: TodoStatus) -> Self {
        Self {
            todo_id,
            from,
            to,
            position: None,
        }
    }

    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

pub struct Board {
    projection: BoardProjection,

    /// Bumped on every sync from the source of truth.
    generation: u64,

    /// Local single selection (a snapshot of the card).
    selected: Option<TodoRecord>,

    /// First step of the two-step delete.
    staged_delete: Option<TodoId>,

    pending: PendingMoves,
    store: Arc<dyn TodoStore>,
    timer: Arc<dyn TimerControl>,
    events: Arc<dyn EventSink>,
}

impl Board {
    pub fn new(
        store: Arc<dyn TodoStore>,
        timer: Arc<dyn TimerControl>,
        events: Arc<dyn EventSink>,
        pending: PendingMoves,
    ) -> Self {
        Self {
            projection: BoardProjection::default(),
            generation: 0,
            selected: None,
            staged_delete: None,
            pending,
            store,
            timer,
            events,
        }
    }

    pub fn projection(&self) -> &BoardProjection {
        &self.projection
    }

    pub fn counts(&self) -> LaneCounts {
        LaneCounts::of(&self.projection)
    }

    pub fn selected(&self) -> Option<&TodoRecord> {
        self.selected.as_ref()
    }

    pub fn staged_delete(&self) -> Option<TodoId> {
        self.staged_delete
    }

    pub fn pending(&self) -> &PendingMoves {
        &self.pending
    }

    /// Rebuild the projection from the latest record list.
    ///
    /// `None` means the list has not been fetched yet; the board is left as is.
    /// When the shared timer selection is still in the list, its latest
    /// snapshot is republished so the timer shows current progress.
    pub fn sync(&mut self, todos: Option<&[TodoRecord]>, session: &Session) {
        let Some(todos) = todos else {
            return;
        };

        self.projection = BoardProjection::project(todos);
        self.generation += 1;

        if let Some(selected) = &self.selected {
            self.selected = self.projection.find(selected.id).cloned();
        }

        if let Some(current) = &session.timer_selection
            && let Some(latest) = todos.iter().find(|t| t.id == current.id)
        {
            self.events
                .emit(DomainEvent::TimerSelectionChanged(Some(latest.clone())));
        }

        let counts = self.counts();
        debug!(
            generation = self.generation,
            todo = counts.todo,
            in_progress = counts.in_progress,
            done = counts.done,
            "board synced"
        );
    }

    /// Apply a move optimistically and open a pending record.
    ///
    /// The caller sends the status change and reports back with
    /// [`Board::complete_move`]. Use [`Board::move_card`] to do both.
    pub fn begin_move(&mut self, card_move: CardMove) -> Result<PendingMove, BoardError> {
        let CardMove {
            todo_id,
            from,
            to,
            position,
        } = card_move;

        let lane = self.projection.lane(from);
        let from_index = lane
            .iter()
            .position(|t| t.id == todo_id)
            .ok_or(BoardError::UnknownTodo(todo_id))?;

        if let Err(err) = policy::ensure_unlocked(&lane[from_index], CardAction::Move) {
            info!(%todo_id, "move refused: timer running");
            return Err(err);
        }

        self.projection.move_card(todo_id, from, to, position)?;
        let op_id = self
            .pending
            .begin(todo_id, (from, from_index), to, self.generation);
        debug!(%op_id, %todo_id, %from, %to, "move applied optimistically");

        self.pending
            .get(op_id)
            .cloned()
            .ok_or(BoardError::UnknownTodo(todo_id))
    }

    /// Settle or compensate a move opened by [`Board::begin_move`].
    pub fn complete_move(
        &mut self,
        op_id: OpId,
        result: Result<(), BoardError>,
        session: &Session,
    ) -> Result<(), BoardError> {
        match result {
            Ok(()) => {
                let Some(op) = self.pending.settle(op_id) else {
                    return Ok(());
                };
                let was_timer_todo = session
                    .timer_selection
                    .as_ref()
                    .is_some_and(|t| t.id == op.todo_id);
                if was_timer_todo && op.to.is_done() {
                    info!(todo_id = %op.todo_id, "timer todo finished; clearing timer selection");
                    self.events.emit(DomainEvent::TimerSelectionChanged(None));
                }
                Ok(())
            }
            Err(err) => {
                let Some(op) = self.pending.compensate(op_id, self.generation) else {
                    warn!(%op_id, error = %err, "status change failed; board already resynced");
                    return Err(err);
                };
                // Only this card goes back; other moves stay where they landed.
                match self
                    .projection
                    .move_card(op.todo_id, op.to, op.from, Some(op.from_index))
                {
                    Ok(()) => {
                        warn!(%op_id, todo_id = %op.todo_id, error = %err, "status change failed; move rolled back");
                    }
                    Err(_) => {
                        warn!(%op_id, todo_id = %op.todo_id, error = %err, "status change failed; card moved again, not rolled back");
                    }
                }
                Err(err)
            }
        }
    }

    /// Move a card between lanes and send the status change.
    pub async fn move_card(
        &mut self,
        card_move: CardMove,
        session: &Session,
    ) -> Result<OpId, BoardError> {
        let op = self.begin_move(card_move)?;
        let result = self.store.modify_todo_status(op.todo_id, op.to).await;
        self.complete_move(op.op_id, result, session)?;
        Ok(op.op_id)
    }

    /// First delete step: stage the card for confirmation.
    pub fn request_delete(&mut self, todo_id: TodoId) -> Result<(), BoardError> {
        let card = self
            .projection
            .find(todo_id)
            .ok_or(BoardError::UnknownTodo(todo_id))?;

        if let Err(err) = policy::ensure_unlocked(card, CardAction::Delete) {
            info!(%todo_id, "delete refused: timer running");
            return Err(err);
        }

        self.staged_delete = Some(todo_id);
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.staged_delete = None;
    }

    /// Second delete step. On failure the card stays staged so the user can retry.
    pub async fn confirm_delete(&mut self) -> Result<TodoId, BoardError> {
        let todo_id = self.staged_delete.take().ok_or(BoardError::NothingStaged)?;

        if let Err(err) = self.store.delete_todo(todo_id).await {
            warn!(%todo_id, error = %err, "delete failed");
            self.staged_delete = Some(todo_id);
            return Err(err);
        }

        info!(%todo_id, "todo deleted");
        Ok(todo_id)
    }

    /// Toggle selection: selecting the selected card clears it.
    pub fn select(&mut self, todo_id: TodoId) -> Result<Option<&TodoRecord>, BoardError> {
        if self.selected.as_ref().is_some_and(|t| t.id == todo_id) {
            self.selected = None;
            return Ok(None);
        }

        let card = self
            .projection
            .find(todo_id)
            .ok_or(BoardError::UnknownTodo(todo_id))?;
        self.selected = Some(card.clone());
        Ok(self.selected.as_ref())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Start the shared timer on the selected card.
    ///
    /// A finished or foreign card also drops the local selection.
    pub async fn start_timer(&mut self, session: &Session) -> Result<(), BoardError> {
        let (Some(selected), Some(user)) = (self.selected.as_ref(), session.user.as_ref()) else {
            return Err(if self.selected.is_none() {
                BoardError::NoSelection
            } else {
                BoardError::NoCurrentUser
            });
        };

        if let Err(err) = policy::check_timer_start(selected, user) {
            info!(todo_id = %selected.id, error = %err, "timer start refused");
            if matches!(err, BoardError::AlreadyDone(_) | BoardError::NotAssignee { .. }) {
                self.selected = None;
            }
            return Err(err);
        }

        let todo = selected.clone();
        self.timer.start_todo_timer(&todo).await?;
        info!(todo_id = %todo.id, "timer started");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{SystemClock, UlidGenerator};
    use crate::testing::{Call, FakeStore, RecordingSink, profile, todo};

    const KIM: &str = "kim@example.com";
    const LEE: &str = "lee@example.com";

    fn board() -> (Board, Arc<FakeStore>, Arc<RecordingSink>) {
        let store = Arc::new(FakeStore::default());
        let sink = Arc::new(RecordingSink::default());
        let clock = Arc::new(SystemClock);
        let pending = PendingMoves::new(Arc::new(UlidGenerator::new(clock.clone())), clock);
        let board = Board::new(store.clone(), store.clone(), sink.clone(), pending);
        (board, store, sink)
    }

    fn todos() -> Vec<TodoRecord> {
        let mut running = todo(3, TodoStatus::InProgress, KIM);
        running.active = true;
        vec![
            todo(1, TodoStatus::Todo, KIM),
            todo(2, TodoStatus::Todo, LEE),
            running,
            todo(4, TodoStatus::Done, KIM),
        ]
    }

    fn kim() -> Session {
        Session::signed_in(profile(KIM))
    }

    #[test]
    fn sync_without_list_keeps_board() {
        let (mut board, _, sink) = board();
        board.sync(Some(&todos()), &kim());
        board.sync(None, &kim());
        assert_eq!(board.projection().len(), 4);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn sync_republishes_timer_selection_snapshot() {
        let (mut board, _, sink) = board();
        let stale = todo(1, TodoStatus::Todo, KIM);
        let session = kim().with_timer_selection(stale);

        let mut fresh = todos();
        fresh[0].real_pomo = 3;
        board.sync(Some(&fresh), &session);

        assert_eq!(
            sink.events(),
            vec![DomainEvent::TimerSelectionChanged(Some(fresh[0].clone()))]
        );
    }

    #[test]
    fn sync_leaves_timer_selection_alone_when_absent() {
        let (mut board, _, sink) = board();
        let session = kim().with_timer_selection(todo(99, TodoStatus::Todo, KIM));
        board.sync(Some(&todos()), &session);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn sync_refreshes_or_drops_local_selection() {
        let (mut board, _, _) = board();
        board.sync(Some(&todos()), &kim());
        board.select(TodoId::new(1)).unwrap();

        let mut next = todos();
        next[0].title = "renamed".into();
        board.sync(Some(&next), &kim());
        assert_eq!(board.selected().unwrap().title, "renamed");

        next.remove(0);
        board.sync(Some(&next), &kim());
        assert!(board.selected().is_none());
    }

    #[tokio::test]
    async fn move_sends_status_change() {
        let (mut board, store, _) = board();
        board.sync(Some(&todos()), &kim());

        let mv = CardMove::new(TodoId::new(1), TodoStatus::Todo, TodoStatus::InProgress).at(0);
        board.move_card(mv, &kim()).await.unwrap();

        assert_eq!(
            board.projection().locate(TodoId::new(1)),
            Some((TodoStatus::InProgress, 0))
        );
        assert_eq!(store.calls(), vec![Call::Status(TodoId::new(1), TodoStatus::InProgress)]);
        assert!(board.pending().is_empty());
    }

    #[tokio::test]
    async fn moving_active_card_changes_nothing() {
        let (mut board, store, _) = board();
        board.sync(Some(&todos()), &kim());
        let before = board.projection().clone();

        let mv = CardMove::new(TodoId::new(3), TodoStatus::InProgress, TodoStatus::Done);
        let err = board.move_card(mv, &kim()).await.unwrap_err();

        assert!(matches!(err, BoardError::Locked { action: CardAction::Move, .. }));
        assert_eq!(board.projection(), &before);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn moving_timer_todo_to_done_clears_timer_selection() {
        let (mut board, _, sink) = board();
        let session = kim().with_timer_selection(todo(1, TodoStatus::Todo, KIM));
        board.sync(Some(&todos()), &kim());

        let mv = CardMove::new(TodoId::new(1), TodoStatus::Todo, TodoStatus::Done);
        board.move_card(mv, &session).await.unwrap();

        assert_eq!(sink.events(), vec![DomainEvent::TimerSelectionChanged(None)]);
    }

    #[tokio::test]
    async fn moving_other_todo_to_done_keeps_timer_selection() {
        let (mut board, _, sink) = board();
        let session = kim().with_timer_selection(todo(1, TodoStatus::Todo, KIM));
        board.sync(Some(&todos()), &kim());

        let mv = CardMove::new(TodoId::new(2), TodoStatus::Todo, TodoStatus::Done);
        board.move_card(mv, &session).await.unwrap();

        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn failed_status_change_rolls_back() {
        let (mut board, store, _) = board();
        board.sync(Some(&todos()), &kim());
        let before = board.projection().clone();
        store.fail();

        let mv = CardMove::new(TodoId::new(1), TodoStatus::Todo, TodoStatus::Done);
        let err = board.move_card(mv, &kim()).await.unwrap_err();

        assert!(matches!(err, BoardError::External { .. }));
        assert_eq!(board.projection(), &before);
        assert!(board.pending().is_empty());
    }

    #[test]
    fn failed_move_keeps_other_settled_move() {
        let (mut board, _, _) = board();
        board.sync(Some(&todos()), &kim());

        let first = board
            .begin_move(CardMove::new(TodoId::new(1), TodoStatus::Todo, TodoStatus::Done))
            .unwrap();
        let second = board
            .begin_move(CardMove::new(TodoId::new(2), TodoStatus::Todo, TodoStatus::InProgress))
            .unwrap();

        board.complete_move(second.op_id, Ok(()), &kim()).unwrap();
        let failure = Err(BoardError::external("status change", "timeout"));
        assert!(board.complete_move(first.op_id, failure, &kim()).is_err());

        let lane_ids = |status: TodoStatus| -> Vec<TodoId> {
            board.projection().lane(status).iter().map(|t| t.id).collect()
        };
        assert_eq!(lane_ids(TodoStatus::Todo), vec![TodoId::new(1)]);
        assert_eq!(lane_ids(TodoStatus::InProgress), vec![TodoId::new(3), TodoId::new(2)]);
        assert_eq!(lane_ids(TodoStatus::Done), vec![TodoId::new(4)]);
        assert_eq!(board.projection().lane(TodoStatus::Todo)[0].status, TodoStatus::Todo);
        assert!(board.pending().is_empty());
    }

    #[test]
    fn failed_move_returns_card_to_its_old_position() {
        let (mut board, _, _) = board();
        board.sync(Some(&todos()), &kim());

        let op = board
            .begin_move(CardMove::new(TodoId::new(2), TodoStatus::Todo, TodoStatus::Done).at(0))
            .unwrap();
        let failure = Err(BoardError::external("status change", "timeout"));
        assert!(board.complete_move(op.op_id, failure, &kim()).is_err());

        let todo_lane: Vec<_> = board.projection().lane(TodoStatus::Todo).iter().map(|t| t.id).collect();
        assert_eq!(todo_lane, vec![TodoId::new(1), TodoId::new(2)]);
    }

    #[test]
    fn failure_after_resync_keeps_authoritative_board() {
        let (mut board, _, _) = board();
        board.sync(Some(&todos()), &kim());

        let mv = CardMove::new(TodoId::new(1), TodoStatus::Todo, TodoStatus::Done);
        let op = board.begin_move(mv).unwrap();

        let mut server = todos();
        server[0].status = TodoStatus::InProgress;
        board.sync(Some(&server), &kim());
        let synced = board.projection().clone();

        let failure = Err(BoardError::external("status change", "timeout"));
        assert!(board.complete_move(op.op_id, failure, &kim()).is_err());
        assert_eq!(board.projection(), &synced);
    }

    #[test]
    fn move_from_wrong_lane_is_unknown() {
        let (mut board, _, _) = board();
        board.sync(Some(&todos()), &kim());
        let mv = CardMove::new(TodoId::new(1), TodoStatus::Done, TodoStatus::Todo);
        assert_eq!(board.begin_move(mv).unwrap_err(), BoardError::UnknownTodo(TodoId::new(1)));
    }

    #[tokio::test]
    async fn delete_needs_stage_and_confirm() {
        let (mut board, store, _) = board();
        board.sync(Some(&todos()), &kim());

        board.request_delete(TodoId::new(2)).unwrap();
        assert_eq!(board.staged_delete(), Some(TodoId::new(2)));
        assert!(store.calls().is_empty());

        let deleted = board.confirm_delete().await.unwrap();
        assert_eq!(deleted, TodoId::new(2));
        assert_eq!(store.calls(), vec![Call::Delete(TodoId::new(2))]);
        assert!(board.staged_delete().is_none());
    }

    #[tokio::test]
    async fn cancelled_delete_changes_nothing() {
        let (mut board, store, _) = board();
        board.sync(Some(&todos()), &kim());
        let before = board.projection().clone();

        board.request_delete(TodoId::new(2)).unwrap();
        board.cancel_delete();

        assert_eq!(board.confirm_delete().await.unwrap_err(), BoardError::NothingStaged);
        assert_eq!(board.projection(), &before);
        assert!(store.calls().is_empty());
    }

    #[test]
    fn active_card_cannot_be_staged() {
        let (mut board, _, _) = board();
        board.sync(Some(&todos()), &kim());
        let err = board.request_delete(TodoId::new(3)).unwrap_err();
        assert!(matches!(err, BoardError::Locked { action: CardAction::Delete, .. }));
        assert!(board.staged_delete().is_none());
    }

    #[tokio::test]
    async fn failed_delete_stays_staged() {
        let (mut board, store, _) = board();
        board.sync(Some(&todos()), &kim());
        store.fail();

        board.request_delete(TodoId::new(1)).unwrap();
        assert!(board.confirm_delete().await.is_err());
        assert_eq!(board.staged_delete(), Some(TodoId::new(1)));
    }

    #[test]
    fn select_toggles() {
        let (mut board, _, _) = board();
        board.sync(Some(&todos()), &kim());

        assert_eq!(board.select(TodoId::new(1)).unwrap().map(|t| t.id), Some(TodoId::new(1)));
        assert_eq!(board.select(TodoId::new(2)).unwrap().map(|t| t.id), Some(TodoId::new(2)));
        assert!(board.select(TodoId::new(2)).unwrap().is_none());
        assert!(board.selected().is_none());
    }

    #[tokio::test]
    async fn start_timer_on_own_card() {
        let (mut board, store, _) = board();
        board.sync(Some(&todos()), &kim());
        board.select(TodoId::new(1)).unwrap();

        board.start_timer(&kim()).await.unwrap();
        assert_eq!(store.calls(), vec![Call::StartTimer(TodoId::new(1))]);
    }

    #[tokio::test]
    async fn start_timer_needs_selection_and_user() {
        let (mut board, _, _) = board();
        board.sync(Some(&todos()), &kim());

        assert_eq!(board.start_timer(&kim()).await.unwrap_err(), BoardError::NoSelection);

        board.select(TodoId::new(1)).unwrap();
        let err = board.start_timer(&Session::default()).await.unwrap_err();
        assert_eq!(err, BoardError::NoCurrentUser);
    }

    #[tokio::test]
    async fn start_timer_on_foreign_card_is_refused() {
        let (mut board, store, sink) = board();
        let session = kim().with_timer_selection(todo(1, TodoStatus::Todo, KIM));
        board.sync(Some(&todos()), &kim());
        board.select(TodoId::new(2)).unwrap();

        let err = board.start_timer(&session).await.unwrap_err();
        assert!(matches!(err, BoardError::NotAssignee { .. }));
        assert!(board.selected().is_none());
        assert!(store.calls().is_empty());
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn start_timer_on_done_card_is_refused() {
        let (mut board, store, _) = board();
        board.sync(Some(&todos()), &kim());
        board.select(TodoId::new(4)).unwrap();

        let err = board.start_timer(&kim()).await.unwrap_err();
        assert_eq!(err, BoardError::AlreadyDone(TodoId::new(4)));
        assert!(board.selected().is_none());
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn start_timer_on_running_card_keeps_selection() {
        let (mut board, _, _) = board();
        board.sync(Some(&todos()), &kim());
        board.select(TodoId::new(3)).unwrap();

        let err = board.start_timer(&kim()).await.unwrap_err();
        assert_eq!(err, BoardError::AlreadyRunning(TodoId::new(3)));
        assert!(board.selected().is_some());
    }
}
