//! In-memory position grant store

use async_trait::async_trait;
use cursus_core::{CursusError, CursusResult, Position, PositionId, PositionStore, UserId};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Position grants held in memory, indexed by holder
#[derive(Debug, Default)]
pub struct MemoryPositionStore {
    by_user: RwLock<HashMap<UserId, Vec<Position>>>,
}

impl MemoryPositionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new position
    pub fn grant(&self, position: Position) -> CursusResult<()> {
        let mut by_user = self.by_user.write();
        if by_user
            .values()
            .flatten()
            .any(|existing| existing.id() == position.id())
        {
            return Err(CursusError::invalid(format!(
                "{} already granted",
                position.id()
            )));
        }
        tracing::debug!(
            position = %position.id(),
            user = %position.user(),
            role = %position.role(),
            scope = %position.scope(),
            "position granted"
        );
        by_user.entry(position.user()).or_default().push(position);
        Ok(())
    }

    /// Revoke a position; returns the revoked grant if it existed
    pub fn revoke(&self, id: PositionId) -> Option<Position> {
        let mut by_user = self.by_user.write();
        for positions in by_user.values_mut() {
            if let Some(index) = positions.iter().position(|p| p.id() == id) {
                let revoked = positions.swap_remove(index);
                tracing::debug!(position = %id, user = %revoked.user(), "position revoked");
                return Some(revoked);
            }
        }
        None
    }
}

#[async_trait]
impl PositionStore for MemoryPositionStore {
    async fn positions_of(&self, user: UserId) -> CursusResult<Vec<Position>> {
        Ok(self
            .by_user
            .read()
            .get(&user)
            .cloned()
            .unwrap_or_default())
    }
}
