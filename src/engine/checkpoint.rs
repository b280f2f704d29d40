//! Snapshots of engine state taken before applying a bot's decision.

use super::context::EngineContext;
use crate::core::GameResult;

/// A full copy of an `EngineContext`.
///
/// Capturing is cheap: the table and deck are persistent structures, so the
/// clone shares storage with the live state until one side is modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    snapshot: EngineContext,
}

impl Checkpoint {
    #[must_use]
    pub fn capture(ctx: &EngineContext) -> Self {
        Self { snapshot: ctx.clone() }
    }

    /// Overwrite `ctx` with the captured state.
    pub fn restore(self, ctx: &mut EngineContext) {
        *ctx = self.snapshot;
    }

    #[must_use]
    pub fn snapshot(&self) -> &EngineContext {
        &self.snapshot
    }

    /// Canonical byte encoding of the captured state.
    pub fn to_bytes(&self) -> GameResult<Vec<u8>> {
        Ok(bincode::serialize(&self.snapshot)?)
    }

    /// Whether `ctx` is byte-for-byte the captured state.
    pub fn matches(&self, ctx: &EngineContext) -> GameResult<bool> {
        Ok(self.to_bytes()? == bincode::serialize(ctx)?)
    }
}
