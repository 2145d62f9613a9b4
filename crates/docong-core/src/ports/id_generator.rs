//! IdGenerator port - 操作 ID 生成の抽象化
//!
//! pending 操作（楽観的なカード移動）を識別する ID を発行します。
//! テスト容易性のために、trait として抽象化しています。
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（本番用）

use crate::domain::OpId;
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は pending 操作の ID を生成
///
/// # ULID の特性
/// - 時刻でソート可能（発行順に並ぶ）
/// - 128-bit
pub trait IdGenerator: Send + Sync {
    fn generate_op_id(&self) -> OpId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
/// これにより、テスト時に FixedClock を使ってタイムスタンプを固定できます。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_op_id(&self) -> OpId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        let ulid = Ulid::from_parts(timestamp_ms, rand::random());
        OpId::from(ulid)
    }
}
