//! Session snapshot - ホストから注入される読み取り専用の共有状態
//!
//! 現在のユーザーとタイマー選択はホスト（状態ストア）が所有します。
//! この crate は snapshot を引数で受け取って読むだけで、変更は
//! `EventSink` 経由の `DomainEvent` で依頼します。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::todo::TodoRecord;

/// Signed-in user profile.
///
/// Demographic attributes are optional; effort prediction needs `birth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub birth: Option<NaiveDate>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub job: Option<String>,

    #[serde(default)]
    pub mbti: Option<String>,

    #[serde(default)]
    pub position: Option<String>,
}

impl UserProfile {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: String::new(),
            birth: None,
            gender: None,
            job: None,
            mbti: None,
            position: None,
        }
    }

    pub fn can_predict(&self) -> bool {
        self.birth.is_some()
    }
}

/// Snapshot of host-owned shared state for one event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Current signed-in user, if any.
    pub user: Option<UserProfile>,

    /// Todo currently selected for the shared timer.
    pub timer_selection: Option<TodoRecord>,
}

impl Session {
    pub fn signed_in(user: UserProfile) -> Self {
        Self {
            user: Some(user),
            timer_selection: None,
        }
    }

    pub fn with_timer_selection(mut self, todo: TodoRecord) -> Self {
        self.timer_selection = Some(todo);
        self
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }
}
