//! Errors - エラー型と分類
//!
//! すべての variant の Display はそのままユーザーに見せるメッセージです。
//! `ErrorKind` で運用上の分類を取り出せます。

use std::fmt;

use thiserror::Error;

use super::ids::TodoId;

/// ErrorKind は失敗の分類
///
/// - Validation: 必須項目の未入力など（フォームは開いたまま）
/// - Conflict: 状態と矛盾する操作（実行中 todo の編集など、副作用なし）
/// - External: 外部協力者（API, 予測サービス）の失敗
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    External,
}

/// Card operations that are locked while a timer runs on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit,
    Delete,
    Move,
}

impl fmt::Display for CardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CardAction::Edit => "edited",
            CardAction::Delete => "deleted",
            CardAction::Move => "moved",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{email} is not a member of this group")]
    NotMember { email: String },

    #[error("a todo in progress cannot be {action}")]
    Locked { id: TodoId, action: CardAction },

    #[error("select a todo first")]
    NoSelection,

    #[error("sign in first")]
    NoCurrentUser,

    #[error("this todo is already running")]
    AlreadyRunning(TodoId),

    #[error("a finished todo cannot be started")]
    AlreadyDone(TodoId),

    #[error("only your own todos can be started")]
    NotAssignee { id: TodoId, assignee: String },

    #[error("add your birth date to your profile to predict effort")]
    ProfileIncomplete,

    #[error("the form is not open")]
    FormClosed,

    #[error("no todo is waiting for delete confirmation")]
    NothingStaged,

    #[error("{0} is not on the board")]
    UnknownTodo(TodoId),

    #[error("{operation} failed: {message}")]
    External {
        operation: &'static str,
        message: String,
    },
}

impl BoardError {
    /// Wrap a collaborator failure.
    pub fn external(operation: &'static str, err: impl fmt::Display) -> Self {
        BoardError::External {
            operation,
            message: err.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::MissingField(_)
            | BoardError::TooLong { .. }
            | BoardError::NotMember { .. } => ErrorKind::Validation,
            BoardError::External { .. } => ErrorKind::External,
            BoardError::Locked { .. }
            | BoardError::NoSelection
            | BoardError::NoCurrentUser
            | BoardError::AlreadyRunning(_)
            | BoardError::AlreadyDone(_)
            | BoardError::NotAssignee { .. }
            | BoardError::ProfileIncomplete
            | BoardError::FormClosed
            | BoardError::NothingStaged
            | BoardError::UnknownTodo(_) => ErrorKind::Conflict,
        }
    }
}
