//! GroupStore port - group 情報の更新

use async_trait::async_trait;

use crate::domain::{BoardError, GroupModifyInput};

#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Rename a group on behalf of `input.user_email`.
    async fn modify_group(&self, input: GroupModifyInput) -> Result<(), BoardError>;
}
