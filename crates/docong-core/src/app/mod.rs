//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせて board とフォームの振る舞いを実装します。
//!
//! # 主要コンポーネント
//! - **BoardBuilder**: ワークスペースの構築とワイヤリング
//! - **Board**: lane 分割、カード移動・削除・選択・タイマー開始のガード
//! - **PendingMoves**: 楽観的なカード移動の台帳（settle / compensate）
//! - **TodoForm**: todo の作成・編集と所要 pomodoro 数の予測
//! - **GroupRenameForm**: グループ名の変更
//! - **TrackerSettingsForm**: 課題トラッカー連携の設定
//! - **LaneCounts**: lane ごとの件数

pub mod board;
pub mod builder;
pub mod group_form;
pub mod pending;
pub mod status;
pub mod todo_form;
pub mod tracker_form;

// 主要な型を再エクスポート
pub use self::board::{Board, CardMove};
pub use self::builder::{BoardBuilder, BuildError, GroupWorkspace};
pub use self::group_form::GroupRenameForm;
pub use self::pending::{PendingMove, PendingMoves};
pub use self::status::LaneCounts;
pub use self::todo_form::{FormMode, TodoForm};
pub use self::tracker_form::TrackerSettingsForm;
