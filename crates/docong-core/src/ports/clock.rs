//! Clock port - 時刻の抽象化
//!
//! - **SystemClock**: 本番用（OS の現在時刻とローカルのタイムゾーン）
//! - **FixedClock**: テスト用（時刻とオフセットを固定）

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

/// Clock は現在時刻とローカルの UTC オフセットを提供
///
/// # テスト容易性
/// - trait により時刻を差し替え可能
/// - テストでは FixedClock を使用
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn local_offset(&self) -> FixedOffset;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn local_offset(&self) -> FixedOffset {
        (**self).local_offset()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_offset(&self) -> FixedOffset {
        *Local::now().offset()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    /// Fixed instant in UTC (offset zero).
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            offset: Utc.fix(),
        }
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn local_offset(&self) -> FixedOffset {
        self.offset
    }
}
