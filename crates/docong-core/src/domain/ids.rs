//! Domain identifiers (strongly-typed IDs).
//!
//! # レコード ID と操作 ID
//! - **レコード ID**（`TodoId`, `GroupId`）: サーバーが採番する整数 `seq`。
//!   Phantom type パターンで型を分け、`TodoId` と `GroupId` を混同できないようにします。
//! - **操作 ID**（`OpId`）: ローカルで発行する ULID。楽観的更新（カード移動）の
//!   pending 記録を識別するために使います。時刻でソート可能なので発行順に並びます。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"todo-", "group-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// サーバー採番のジェネリック ID 型
///
/// JSON 上はただの整数（`"seq": 42`）として読み書きします。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    seq: i64,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub const fn new(seq: i64) -> Self {
        Self {
            seq,
            _marker: PhantomData,
        }
    }

    pub fn get(&self) -> i64 {
        self.seq
    }
}

impl<T: IdMarker> From<i64> for Id<T> {
    fn from(seq: i64) -> Self {
        Self::new(seq)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.seq)
    }
}

/// Todo のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Todo {}

impl IdMarker for Todo {
    fn prefix() -> &'static str {
        "todo-"
    }
}

/// Group（team）のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Group {}

impl IdMarker for Group {
    fn prefix() -> &'static str {
        "group-"
    }
}

/// Identifier of a todo record (`seq` on the wire).
pub type TodoId = Id<Todo>;

/// Identifier of a group (`teamSeq` on the wire).
pub type GroupId = Id<Group>;

/// Identifier of a locally issued pending operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OpId(Ulid);

impl OpId {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for OpId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op-{}", self.0)
    }
}
