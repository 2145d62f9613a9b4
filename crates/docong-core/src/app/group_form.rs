//! GroupRenameForm - グループ名の変更フォーム
//!
//! 現在のグループとユーザーから draft を作り、どちらかが変わったら作り直します。

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    BoardError, GroupId, GroupModifyInput, GroupRecord, Session, group::GROUP_NAME_MAX_CHARS,
    policy,
};
use crate::ports::GroupStore;

/// What the draft was seeded from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Source {
    team_id: GroupId,
    name: String,
    user_email: Option<String>,
}

pub struct GroupRenameForm {
    source: Option<Source>,
    name: String,
    store: Arc<dyn GroupStore>,
}

impl GroupRenameForm {
    pub fn new(store: Arc<dyn GroupStore>) -> Self {
        Self {
            source: None,
            name: String::new(),
            store,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Feed the current group and user. The draft is reseeded only when
    /// one of them differs from what it was seeded with.
    pub fn observe(&mut self, group: &GroupRecord, session: &Session) {
        let source = Source {
            team_id: group.id,
            name: group.name.clone(),
            user_email: session.user_email().map(str::to_owned),
        };
        if self.source.as_ref() != Some(&source) {
            self.name = source.name.clone();
            self.source = Some(source);
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub async fn submit(&mut self) -> Result<(), BoardError> {
        let source = self.source.as_ref().ok_or(BoardError::FormClosed)?;
        let user_email = source.user_email.clone().ok_or(BoardError::NoCurrentUser)?;
        policy::require_text("name", &self.name)?;
        policy::limit_chars("name", &self.name, GROUP_NAME_MAX_CHARS)?;

        let input = GroupModifyInput {
            user_email,
            team_id: source.team_id,
            name: self.name.clone(),
        };
        let team_id = input.team_id;
        if let Err(err) = self.store.modify_group(input).await {
            warn!(%team_id, error = %err, "group rename failed");
            return Err(err);
        }
        info!(%team_id, name = %self.name, "group renamed");
        Ok(())
    }
}
