//! TrackerSettingsForm - 課題トラッカー（Jira）連携の設定フォーム
//!
//! # 再シード規則
//! - 開いたとき: 現在のグループの値で draft を作る
//! - 開いている間にグループの値が変わった: 作り直す
//! - 閉じている間に変わった: 覚えておき、次に開いたときに反映
//!
//! 送信は同期的です。結果はイベントとしてホストへ渡します。

use std::sync::Arc;

use tracing::info;

use crate::domain::{BoardError, DomainEvent, GroupId, GroupRecord, TrackerCredentials, policy};
use crate::ports::EventSink;

pub struct TrackerSettingsForm {
    team_id: Option<GroupId>,

    /// Latest values from the group record.
    source: TrackerCredentials,
    draft: TrackerCredentials,
    open: bool,
    events: Arc<dyn EventSink>,
}

impl TrackerSettingsForm {
    pub fn new(events: Arc<dyn EventSink>) -> Self {
        Self {
            team_id: None,
            source: TrackerCredentials::default(),
            draft: TrackerCredentials::default(),
            open: false,
            events,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &TrackerCredentials {
        &self.draft
    }

    /// Feed the current group record.
    pub fn observe_group(&mut self, group: &GroupRecord) {
        let source = group.tracker.clone();
        let changed = self.team_id != Some(group.id) || self.source != source;
        self.team_id = Some(group.id);
        self.source = source;
        if changed && self.open {
            self.draft = self.source.clone();
        }
    }

    pub fn open(&mut self) {
        self.draft = self.source.clone();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.draft.domain = domain.into();
    }

    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.draft.user_id = user_id.into();
    }

    pub fn set_api_token(&mut self, api_token: impl Into<String>) {
        self.draft.api_token = api_token.into();
    }

    pub fn set_project_key(&mut self, project_key: impl Into<String>) {
        self.draft.project_key = project_key.into();
    }

    pub fn submit(&mut self) -> Result<(), BoardError> {
        if !self.open {
            return Err(BoardError::FormClosed);
        }
        let team_id = self.team_id.ok_or(BoardError::FormClosed)?;
        policy::require_text("domain", &self.draft.domain)?;
        policy::require_text("user id", &self.draft.user_id)?;
        policy::require_text("api token", &self.draft.api_token)?;
        policy::require_text("project key", &self.draft.project_key)?;

        self.events.emit(DomainEvent::TrackerSettingsSubmitted {
            team_id,
            settings: self.draft.clone(),
        });
        info!(%team_id, project = %self.draft.project_key, "tracker settings submitted");
        self.open = false;
        Ok(())
    }
}
