//! Position grant lookups

use crate::identifiers::UserId;
use crate::position::Position;
use crate::CursusResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Read-only view of the positions held by users
#[async_trait]
pub trait PositionStore: Send + Sync {
    /// All positions currently held by `user`; empty for unknown users
    async fn positions_of(&self, user: UserId) -> CursusResult<Vec<Position>>;
}

#[async_trait]
impl<T: PositionStore + ?Sized> PositionStore for Arc<T> {
    async fn positions_of(&self, user: UserId) -> CursusResult<Vec<Position>> {
        (**self).positions_of(user).await
    }
}
