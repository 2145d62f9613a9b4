//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部の協力者（永続化 API, タイマー, 予測サービス, 状態ストア）への
//! インターフェースを提供し、実装の詳細を隠蔽します。
//!
//! # 設計原則
//! - 永続化 API が source of truth（正本）
//! - board / フォームは正本を直接書き換えず、ポート経由で依頼する
//! - 共有状態の変更は EventSink へのイベントで依頼する

pub mod todo_store;
pub mod timer;
pub mod group_store;
pub mod predictor;
pub mod clock;
pub mod id_generator;
pub mod event_sink;

// 主要な trait を再エクスポート
pub use self::todo_store::TodoStore;
pub use self::timer::TimerControl;
pub use self::group_store::GroupStore;
pub use self::predictor::EffortPredictor;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::event_sink::EventSink;
