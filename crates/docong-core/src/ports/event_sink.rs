//! EventSink port - ホストの状態ストアへの dispatch
//!
//! # 実装
//! - **ChannelEventSink**: tokio mpsc にイベントを流す
//! - **NoopEventSink**: 何もしない（共有状態を持たないホスト向け）

use crate::domain::DomainEvent;

/// EventSink は共有状態の更新依頼を受け取る
///
/// dispatch は同期的で、失敗しません（受け手がいなければ捨てる）。
pub trait EventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);
}
