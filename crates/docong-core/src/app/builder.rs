//! BoardBuilder - ワークスペース（board + フォーム）の構築とワイヤリング
//!
//! # 設計
//! - 必須のポートは build() 時にまとめて検証（Fail-fast）
//! - 不足しているポートはすべて名前付きで報告する
//! - Clock と IdGenerator は省略可能（SystemClock / UlidGenerator）

use std::sync::Arc;

use crate::app::{Board, GroupRenameForm, PendingMoves, TodoForm, TrackerSettingsForm};
use crate::domain::GroupId;
use crate::ports::{
    Clock, EffortPredictor, EventSink, GroupStore, IdGenerator, SystemClock, TimerControl,
    TodoStore, UlidGenerator,
};

/// BoardBuilder はグループ 1 つ分のワークスペースを構築
///
/// # 使用例
/// ```ignore
/// let workspace = BoardBuilder::new()
///     .team(GroupId::new(1))
///     .todo_store(store.clone())
///     .timer(store.clone())
///     .group_store(store)
///     .predictor(predictor)
///     .events(sink)
///     .build()?;
/// ```
#[derive(Default)]
pub struct BoardBuilder {
    team: Option<GroupId>,
    todo_store: Option<Arc<dyn TodoStore>>,
    timer: Option<Arc<dyn TimerControl>>,
    group_store: Option<Arc<dyn GroupStore>>,
    predictor: Option<Arc<dyn EffortPredictor>>,
    events: Option<Arc<dyn EventSink>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
}

/// BuildError はワークスペース構築時のエラー
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("missing ports: {0:?}. These must be provided before build().")]
    MissingPorts(Vec<&'static str>),
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn team(mut self, team: GroupId) -> Self {
        self.team = Some(team);
        self
    }

    pub fn todo_store(mut self, store: Arc<dyn TodoStore>) -> Self {
        self.todo_store = Some(store);
        self
    }

    pub fn timer(mut self, timer: Arc<dyn TimerControl>) -> Self {
        self.timer = Some(timer);
        self
    }

    pub fn group_store(mut self, store: Arc<dyn GroupStore>) -> Self {
        self.group_store = Some(store);
        self
    }

    pub fn predictor(mut self, predictor: Arc<dyn EffortPredictor>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// # 検証
    /// - 必須ポートがすべて設定されているかチェック
    /// - 不足があれば BuildError::MissingPorts を返す
    pub fn build(self) -> Result<GroupWorkspace, BuildError> {
        let missing: Vec<&'static str> = [
            ("team", self.team.is_none()),
            ("todo_store", self.todo_store.is_none()),
            ("timer", self.timer.is_none()),
            ("group_store", self.group_store.is_none()),
            ("predictor", self.predictor.is_none()),
            ("events", self.events.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(team), Some(todo_store), Some(timer), Some(group_store), Some(predictor), Some(events)) = (
            self.team,
            self.todo_store,
            self.timer,
            self.group_store,
            self.predictor,
            self.events,
        ) else {
            return Err(BuildError::MissingPorts(missing));
        };

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let ids = self
            .ids
            .unwrap_or_else(|| Arc::new(UlidGenerator::new(clock.clone())));
        let pending = PendingMoves::new(ids, clock.clone());

        Ok(GroupWorkspace {
            team,
            board: Board::new(todo_store.clone(), timer, events.clone(), pending),
            todo_form: TodoForm::new(team, todo_store, predictor, clock),
            group_form: GroupRenameForm::new(group_store),
            tracker_form: TrackerSettingsForm::new(events),
        })
    }
}

/// GroupWorkspace は 1 グループ分の board とフォーム
pub struct GroupWorkspace {
    pub team: GroupId,
    pub board: Board,
    pub todo_form: TodoForm,
    pub group_form: GroupRenameForm,
    pub tracker_form: TrackerSettingsForm,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Session, TodoStatus};
    use crate::testing::{FakePredictor, FakeStore, RecordingSink, TEAM, profile, todo};

    fn complete() -> BoardBuilder {
        let store = Arc::new(FakeStore::default());
        BoardBuilder::new()
            .team(TEAM)
            .todo_store(store.clone())
            .timer(store.clone())
            .group_store(store)
            .predictor(Arc::new(FakePredictor::new(4.0)))
            .events(Arc::new(RecordingSink::default()))
    }

    #[test]
    fn build_success() {
        let mut workspace = complete().build().unwrap();
        assert_eq!(workspace.team, TEAM);

        let session = Session::signed_in(profile("kim@example.com"));
        let todos = vec![todo(1, TodoStatus::Todo, "kim@example.com")];
        workspace.board.sync(Some(&todos), &session);
        assert_eq!(workspace.board.counts().total(), 1);

        workspace.todo_form.open_create(&session).unwrap();
        assert_eq!(workspace.todo_form.draft().team_id, TEAM);
    }

    #[test]
    fn build_reports_every_missing_port() {
        let result = BoardBuilder::new()
            .team(TEAM)
            .events(Arc::new(RecordingSink::default()))
            .build();
        assert!(matches!(
            result,
            Err(BuildError::MissingPorts(missing))
                if missing == vec!["todo_store", "timer", "group_store", "predictor"]
        ));
    }

    #[test]
    fn empty_builder_lists_all_required_ports() {
        let Err(BuildError::MissingPorts(missing)) = BoardBuilder::new().build() else {
            panic!("expected missing ports");
        };
        assert_eq!(missing.len(), 6);
    }
}
