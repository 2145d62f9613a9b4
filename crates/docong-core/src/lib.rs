//! docong-core
//!
//! Core building blocks for the docong group todo board.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, todo, group, state, board, policy, estimate, errors, events）
//! - **ports**: 抽象化レイヤー（TodoStore, TimerControl, GroupStore, EffortPredictor, EventSink, など）
//! - **app**: アプリケーションロジック（Board, フォーム, PendingMoves, BoardBuilder）
//! - **impls**: 実装（HttpEffortPredictor, InMemoryBoardStore, ChannelEventSink）
//! - **settings**: 実行時設定（config crate）
//!
//! # 設計原則
//! - 正本（永続化 API）のリストから projection を毎回作り直す
//! - 共有状態（現在のユーザー, タイマー選択）は `Session` で受け取り、`DomainEvent` で変更を依頼する
//! - 外部への依頼はすべて ports 経由

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod settings;

#[cfg(test)]
pub(crate) mod testing;
