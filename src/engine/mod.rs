//! Game setup, the turn/phase state machine, checkpoints, and win checks.

pub mod checkpoint;
pub mod context;
pub mod driver;
pub mod setup;
pub mod win;

pub use checkpoint::Checkpoint;
pub use context::{EngineContext, TurnPhase};
pub use driver::{GameEngine, GameSummary};
pub use setup::{build_deck, build_game_state, integrity_cards, new_context};
pub use win::{evaluate, WinCondition};
