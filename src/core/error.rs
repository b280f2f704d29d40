//! Error types.
//!
//! `InvalidMove` is the recoverable kind: the turn driver answers it with a
//! rollback and a Pass. `GameError` covers setup failures that stop a game
//! from starting at all.

use thiserror::Error;

use super::cards::EquipmentCard;
use super::player::PlayerId;
use super::state::CardIndex;
use crate::engine::TurnPhase;
use crate::operators::ActionType;

/// Reasons a proposed action or equipment consumption is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidMove {
    #[error("{0} is not seated at this table")]
    UnknownPlayer(PlayerId),

    #[error("{0} is dead")]
    PlayerDead(PlayerId),

    #[error("{0} is not dead")]
    PlayerNotDead(PlayerId),

    #[error("{player} has no integrity card at index {index}")]
    CardOutOfRange { player: PlayerId, index: CardIndex },

    /// Flip target is already face-up while the player still has face-down cards.
    #[error("card {index} of {player} is already face-up")]
    CardAlreadyFaceUp { player: PlayerId, index: CardIndex },

    #[error("{0} cannot target themselves")]
    SelfTarget(PlayerId),

    #[error("{0} named twice")]
    SamePlayer(PlayerId),

    #[error("no equipment cards left to draw")]
    NoEquipmentLeft,

    #[error("no guns left in the pool")]
    NoGunsLeft,

    #[error("{0} already holds an equipment card")]
    AlreadyEquipped(PlayerId),

    #[error("{0} already has a gun")]
    AlreadyArmed(PlayerId),

    #[error("{0} has no gun")]
    Unarmed(PlayerId),

    #[error("{actor} is not aiming at {target}")]
    NotAimedAt { actor: PlayerId, target: PlayerId },

    #[error("{player} does not hold {card}")]
    MissingEquipment { player: PlayerId, card: EquipmentCard },

    #[error("{submitted} is not allowed during the {phase} phase")]
    WrongPhase { submitted: ActionType, phase: TurnPhase },

    /// A bot submitted a move on someone else's behalf.
    #[error("{submitted_by} submitted a move for {actor}")]
    ActorMismatch { submitted_by: PlayerId, actor: PlayerId },
}

/// Errors that prevent a game from being set up or checkpointed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("player count {got} outside {min}..={max}")]
    InvalidPlayerCount { got: usize, min: usize, max: usize },

    #[error("table has {expected} seats but {got} bots were supplied")]
    BotCountMismatch { expected: usize, got: usize },

    #[error("seats must be numbered 0..{players} without gaps, found {seat}")]
    NonContiguousSeats { seat: PlayerId, players: usize },

    #[error("failed to encode checkpoint: {0}")]
    Encode(String),
}

impl From<bincode::Error> for GameError {
    fn from(err: bincode::Error) -> Self {
        GameError::Encode(err.to_string())
    }
}

/// Result of validating or playing an operator.
pub type MoveResult<T> = Result<T, InvalidMove>;

/// Result type for setup and engine-level operations.
pub type GameResult<T> = Result<T, GameError>;
