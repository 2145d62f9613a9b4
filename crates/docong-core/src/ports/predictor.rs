//! EffortPredictor port - 所要 pomodoro 数の予測
//!
//! # 実装
//! - **HttpEffortPredictor**: `POST {base_url}/api/todo/predict`（本番用）

use async_trait::async_trait;

use crate::domain::{BoardError, PredictionRequest};

/// EffortPredictor はリクエストに対する生のスコアを返す
///
/// スコアから pomodoro 数への変換（`effort_from_score`）は呼び出し側で行います。
#[async_trait]
pub trait EffortPredictor: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<f64, BoardError>;
}
