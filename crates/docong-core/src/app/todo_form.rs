//! TodoForm - todo の作成・編集フォーム
//!
//! draft は送信されるまでローカルにだけ存在し、閉じると捨てられます。
//!
//! # フロー
//! 1. `open_create()` / `open_modify()` で draft を用意
//! 2. setter で 1 フィールドずつ書き換え（必要なら `predict_effort()`）
//! 3. `submit()` で検証してから TodoStore へ渡す

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    BoardError, CardAction, GroupId, GroupRecord, PredictionRequest, Session, TodoId, TodoInput, TodoRecord,
    WorkImportance, WorkProficiency, WorkType, effort_from_score, policy,
};
use crate::ports::{Clock, EffortPredictor, TodoStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    Create,
    Modify(TodoId),
}

pub struct TodoForm {
    team_id: GroupId,
    mode: FormMode,
    draft: TodoInput,
    store: Arc<dyn TodoStore>,
    predictor: Arc<dyn EffortPredictor>,
    clock: Arc<dyn Clock>,
}

impl TodoForm {
    pub fn new(
        team_id: GroupId,
        store: Arc<dyn TodoStore>,
        predictor: Arc<dyn EffortPredictor>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            team_id,
            mode: FormMode::Closed,
            draft: TodoInput::new(team_id, ""),
            store,
            predictor,
            clock,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Closed
    }

    pub fn draft(&self) -> &TodoInput {
        &self.draft
    }

    /// Open an empty draft owned by the current user.
    pub fn open_create(&mut self, session: &Session) -> Result<(), BoardError> {
        let email = session.user_email().ok_or(BoardError::NoCurrentUser)?;
        self.draft = TodoInput::new(self.team_id, email);
        self.mode = FormMode::Create;
        Ok(())
    }

    /// Open a draft seeded from `card`. Refused while its timer runs.
    pub fn open_modify(&mut self, card: &TodoRecord) -> Result<(), BoardError> {
        if let Err(err) = policy::ensure_unlocked(card, CardAction::Edit) {
            info!(todo_id = %card.id, "edit refused: timer running");
            return Err(err);
        }
        self.draft = TodoInput::from_record(card, self.team_id);
        self.mode = FormMode::Modify(card.id);
        Ok(())
    }

    /// Discard the draft.
    pub fn close(&mut self) {
        self.mode = FormMode::Closed;
        self.draft = TodoInput::new(self.team_id, "");
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    /// Manual effort entry. Any value is accepted here.
    pub fn set_predicted_pomo(&mut self, pomo: u32) {
        self.draft.predicted_pomo = pomo;
    }

    pub fn set_importance(&mut self, importance: WorkImportance) {
        self.draft.work_importance = importance;
    }

    pub fn set_proficiency(&mut self, proficiency: WorkProficiency) {
        self.draft.work_proficiency = proficiency;
    }

    pub fn set_work_type(&mut self, work_type: WorkType) {
        self.draft.work_type = work_type;
    }

    /// Assign the draft to a member of `group`.
    pub fn set_assignee(&mut self, email: &str, group: &GroupRecord) -> Result<(), BoardError> {
        if group.member(email).is_none() {
            return Err(BoardError::NotMember {
                email: email.to_string(),
            });
        }
        self.draft.user_email = email.to_string();
        Ok(())
    }

    /// Whether the prediction control should be enabled for this session.
    pub fn can_predict(&self, session: &Session) -> bool {
        session.user.as_ref().is_some_and(|u| u.can_predict())
    }

    /// Ask the model for an effort estimate and write it into the draft.
    ///
    /// Only `predicted_pomo` changes; every other draft field is kept.
    pub async fn predict_effort(&mut self, session: &Session) -> Result<u32, BoardError> {
        if !self.is_open() {
            return Err(BoardError::FormClosed);
        }
        let user = session.user.as_ref().ok_or(BoardError::NoCurrentUser)?;
        let request =
            PredictionRequest::new(user, &self.draft, self.clock.now(), self.clock.local_offset())?;

        let score = match self.predictor.predict(&request).await {
            Ok(score) => score,
            Err(err) => {
                warn!(error = %err, "effort prediction failed");
                return Err(err);
            }
        };

        let effort = effort_from_score(score);
        debug!(score, effort, "effort predicted");
        self.draft.predicted_pomo = effort;
        Ok(effort)
    }

    /// Validate and hand the draft to the store, then close.
    ///
    /// On a store failure the form stays open with the draft intact.
    pub async fn submit(&mut self) -> Result<(), BoardError> {
        if self.mode == FormMode::Closed {
            return Err(BoardError::FormClosed);
        }
        policy::require_text("title", &self.draft.title)?;
        policy::require_text("content", &self.draft.content)?;

        let result = match self.mode {
            FormMode::Modify(id) => self.store.modify_todo(id, self.draft.clone()).await,
            _ => self.store.create_todo(self.draft.clone()).await,
        };

        if let Err(err) = result {
            warn!(error = %err, "todo submit failed");
            return Err(err);
        }

        info!(mode = ?self.mode, title = %self.draft.title, "todo submitted");
        self.close();
        Ok(())
    }
}
