//! The operator protocol shared by actions and equipment effects.
//!
//! ## Contract
//!
//! - `validate` is a pure check against the true table and deck.
//! - `play` builds the next table and deck from copies of the inputs. It
//!   must only be called on an operator that validates; the inputs are never
//!   touched, so a failure part way through leaves nothing behind.
//! - `notify` publishes the attempt. The payload carries actor, targets and
//!   indices, never hidden card values.
//! - `private_notify` delivers whatever only specific players may learn.
//!
//! `Action` and `EquipmentConsumption` are closed enums: adding a card means
//! adding a variant, and every match below stops compiling until it is handled.

pub mod action;
pub mod equipment;

pub use action::{Action, ActionType};
pub use equipment::EquipmentConsumption;

use crate::core::{
    CardIndex, DeckState, EquipmentCard, InvalidMove, MoveResult, PlayerGameState, PlayerId,
    TableState,
};
use crate::notify::{UpdateId, UpdatePayload, UpdateSink};

/// Validate, apply, and announce a move.
pub trait Operator {
    /// The player making the move.
    fn actor(&self) -> PlayerId;

    /// Check the move against the true table and deck.
    fn validate(&self, table: &TableState, deck: &DeckState) -> MoveResult<()>;

    fn is_valid(&self, table: &TableState, deck: &DeckState) -> bool {
        self.validate(table, deck).is_ok()
    }

    /// Produce the next table and deck. Only call after `validate` succeeds.
    fn play(&self, table: &TableState, deck: &DeckState) -> MoveResult<(TableState, DeckState)>;

    /// Public payload describing the attempt.
    fn announcement(&self) -> UpdatePayload;

    /// Publish the attempt to every bot.
    fn notify(&self, sink: &mut dyn UpdateSink) -> UpdateId {
        sink.publish(Some(self.actor()), self.announcement())
    }

    /// Send private results. `table` is the state after `play`.
    fn private_notify(&self, _table: &TableState, _sink: &mut dyn UpdateSink) {}

    /// Card flip caused by this move, given the state before `play`.
    fn card_flip(&self, _before: &TableState) -> Option<UpdatePayload> {
        None
    }
}

/// The player's record, if they are seated.
pub(crate) fn seated(table: &TableState, player: PlayerId) -> MoveResult<&PlayerGameState> {
    table.player(player).ok_or(InvalidMove::UnknownPlayer(player))
}

/// The player's record, if they are seated and alive.
pub(crate) fn living(table: &TableState, player: PlayerId) -> MoveResult<&PlayerGameState> {
    let state = seated(table, player)?;
    if !state.is_alive() {
        return Err(InvalidMove::PlayerDead(player));
    }
    Ok(state)
}

pub(crate) fn seated_mut(table: &mut TableState, player: PlayerId) -> MoveResult<&mut PlayerGameState> {
    table.player_mut(player).ok_or(InvalidMove::UnknownPlayer(player))
}

pub(crate) fn not_self(actor: PlayerId, target: PlayerId) -> MoveResult<()> {
    if actor == target {
        return Err(InvalidMove::SelfTarget(actor));
    }
    Ok(())
}

pub(crate) fn card_in_range(state: &PlayerGameState, player: PlayerId, index: CardIndex) -> MoveResult<()> {
    if index >= state.integrity_cards.len() {
        return Err(InvalidMove::CardOutOfRange { player, index });
    }
    Ok(())
}

/// The flip rule for Equip and ArmAndAim: the chosen card must be face-down,
/// unless every card is already face-up.
pub(crate) fn check_flip(state: &PlayerGameState, player: PlayerId, index: CardIndex) -> MoveResult<()> {
    card_in_range(state, player, index)?;
    if state.all_face_up() {
        return Ok(());
    }
    if state.integrity_cards[index].face_up {
        return Err(InvalidMove::CardAlreadyFaceUp { player, index });
    }
    Ok(())
}

pub(crate) fn holding(state: &PlayerGameState, player: PlayerId, card: EquipmentCard) -> MoveResult<()> {
    if state.equipment != Some(card) {
        return Err(InvalidMove::MissingEquipment { player, card });
    }
    Ok(())
}
