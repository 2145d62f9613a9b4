//! Todo record, work attributes, and the editable todo draft.
//!
//! Field names follow the REST API (camelCase, `seq`, `activate`, ...).
//! Work attributes serialize as the labels the API and the prediction model
//! expect.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{GroupId, TodoId};
use super::state::TodoStatus;

/// Error returned when a work-attribute label is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} label: {label}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub label: String,
}

/// Implements `label()`, `ALL`, `Display` and `FromStr` for a label enum.
macro_rules! labelled {
    ($ty:ident, $kind:literal, [$($variant:ident => $label:literal),+ $(,)?]) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label() == s.trim())
                    .ok_or_else(|| UnknownLabel {
                        kind: $kind,
                        label: s.to_string(),
                    })
            }
        }
    };
}

/// Work classification (closed list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkType {
    #[serde(rename = "기획")]
    Planning,
    #[serde(rename = "설계")]
    Architecture,
    #[serde(rename = "디자인")]
    Design,
    #[serde(rename = "컨설팅")]
    Consulting,
    #[serde(rename = "개발")]
    Development,
    #[serde(rename = "QA")]
    Qa,
    #[serde(rename = "분석")]
    Analysis,
    #[serde(rename = "운영")]
    Operations,
    #[serde(rename = "회계")]
    Accounting,
    #[serde(rename = "제작")]
    Production,
    #[serde(rename = "관리")]
    Management,
    #[serde(rename = "홍보")]
    Marketing,
    #[serde(rename = "인사")]
    HumanResources,
    #[serde(rename = "문서화")]
    Documentation,
    #[serde(rename = "학습")]
    Study,
    #[serde(rename = "독서")]
    Reading,
    #[serde(rename = "기타")]
    Other,
}

labelled!(WorkType, "work type", [
    Planning => "기획",
    Architecture => "설계",
    Design => "디자인",
    Consulting => "컨설팅",
    Development => "개발",
    Qa => "QA",
    Analysis => "분석",
    Operations => "운영",
    Accounting => "회계",
    Production => "제작",
    Management => "관리",
    Marketing => "홍보",
    HumanResources => "인사",
    Documentation => "문서화",
    Study => "학습",
    Reading => "독서",
    Other => "기타",
]);

/// Importance, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WorkImportance {
    #[serde(rename = "하")]
    Low,
    #[serde(rename = "중하")]
    MediumLow,
    #[serde(rename = "중")]
    Medium,
    #[serde(rename = "중상")]
    MediumHigh,
    #[serde(rename = "상")]
    High,
}

labelled!(WorkImportance, "importance", [
    Low => "하",
    MediumLow => "중하",
    Medium => "중",
    MediumHigh => "중상",
    High => "상",
]);

/// Proficiency, least experienced first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WorkProficiency {
    #[serde(rename = "초급")]
    Beginner,
    #[serde(rename = "초중급")]
    Elementary,
    #[serde(rename = "중급")]
    Intermediate,
    #[serde(rename = "중상급")]
    Advanced,
    #[serde(rename = "상급")]
    Expert,
}

labelled!(WorkProficiency, "proficiency", [
    Beginner => "초급",
    Elementary => "초중급",
    Intermediate => "중급",
    Advanced => "중상급",
    Expert => "상급",
]);

/// Who a todo is assigned to, plus display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Assignee {
    #[serde(rename = "userEmail")]
    pub email: String,

    #[serde(rename = "userName", default)]
    pub name: String,

    #[serde(rename = "userImg", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A todo as the persistence API returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    #[serde(rename = "seq")]
    pub id: TodoId,

    pub title: String,

    #[serde(default)]
    pub content: String,

    pub status: TodoStatus,

    /// Predicted effort in pomodoros.
    pub predicted_pomo: u32,

    /// Actual effort, accumulated by the timer service.
    #[serde(default)]
    pub real_pomo: u32,

    pub work_type: WorkType,
    pub work_importance: WorkImportance,
    pub work_proficiency: WorkProficiency,

    #[serde(flatten)]
    pub assignee: Assignee,

    /// A timer is currently running on this todo.
    #[serde(rename = "activate", default)]
    pub active: bool,
}

/// Draft submitted by the create/modify forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    pub title: String,
    pub content: String,
    pub predicted_pomo: u32,
    pub team_id: GroupId,
    pub user_email: String,
    pub work_importance: WorkImportance,
    pub work_proficiency: WorkProficiency,
    pub work_type: WorkType,
}

impl TodoInput {
    pub const DEFAULT_PREDICTED_POMO: u32 = 1;

    /// Blank draft for the create form.
    pub fn new(team_id: GroupId, user_email: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            predicted_pomo: Self::DEFAULT_PREDICTED_POMO,
            team_id,
            user_email: user_email.into(),
            work_importance: WorkImportance::Medium,
            work_proficiency: WorkProficiency::Intermediate,
            work_type: WorkType::Development,
        }
    }

    /// Draft seeded from an existing record (modify form).
    pub fn from_record(record: &TodoRecord, team_id: GroupId) -> Self {
        Self {
            title: record.title.clone(),
            content: record.content.clone(),
            predicted_pomo: record.predicted_pomo,
            team_id,
            user_email: record.assignee.email.clone(),
            work_importance: record.work_importance,
            work_proficiency: record.work_proficiency,
            work_type: record.work_type,
        }
    }
}
