//! TodoStore port - todo の正本（source of truth）を持つ永続化 API
//!
//! board とフォームはここに変更を依頼するだけです。結果は次回の
//! `Board::sync` で正本から取り直したリストとして戻ってきます。

use async_trait::async_trait;

use crate::domain::{BoardError, TodoId, TodoInput, TodoStatus};

/// TodoStore は todo の CRUD とステータス変更を受け付ける
///
/// # 設計原則
/// - ローカルのレコードは書き換えない（楽観的更新は board 側の責務）
/// - 失敗は `BoardError::External` で返す
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn create_todo(&self, input: TodoInput) -> Result<(), BoardError>;

    async fn modify_todo(&self, id: TodoId, input: TodoInput) -> Result<(), BoardError>;

    async fn delete_todo(&self, id: TodoId) -> Result<(), BoardError>;

    async fn modify_todo_status(&self, id: TodoId, status: TodoStatus) -> Result<(), BoardError>;
}
