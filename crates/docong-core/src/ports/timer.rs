//! TimerControl port - pomodoro タイマーの開始

use async_trait::async_trait;

use crate::domain::{BoardError, TodoRecord};

/// TimerControl は選択された todo でタイマーを開始する
///
/// 開始可否の判定（実行中・完了済み・他人の todo）は board 側で済ませてから呼びます。
#[async_trait]
pub trait TimerControl: Send + Sync {
    async fn start_todo_timer(&self, todo: &TodoRecord) -> Result<(), BoardError>;
}
