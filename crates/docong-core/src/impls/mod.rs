//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **HttpEffortPredictor**: REST API の予測エンドポイント（本番用）
//! - **InMemoryBoardStore**: 開発用・デモ用の正本（TodoStore / TimerControl / GroupStore）
//! - **ChannelEventSink** / **NoopEventSink**: ホストへのイベント配送

pub mod event_sink;
pub mod http_predictor;
pub mod inmem_store;

// 主要な型を再エクスポート
pub use self::event_sink::{ChannelEventSink, NoopEventSink};
pub use self::http_predictor::{HttpEffortPredictor, PredictError};
pub use self::inmem_store::InMemoryBoardStore;
