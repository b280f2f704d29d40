//! Equipment consumptions, proposed during the pre-round.
//!
//! Every consumption spends the user's held card: the user's equipment slot
//! empties and the card goes back to the bottom of the equipment deck.

use serde::{Deserialize, Serialize};

use super::{card_in_range, holding, living, not_self, seated, seated_mut, Operator};
use crate::core::{
    CardIndex, DeckState, EquipmentCard, InvalidMove, MoveResult, PlayerHealth, PlayerId,
    TableState,
};
use crate::notify::{UpdatePayload, UpdateSink};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentConsumption {
    /// Take `target`'s gun and point it at `aimed_at`.
    Taser {
        user: PlayerId,
        target: PlayerId,
        aimed_at: PlayerId,
    },
    /// Bring a dead player back.
    Defibrillator { user: PlayerId, target: PlayerId },
    /// Flip every good/bad cop card `target` holds.
    Blackmail { user: PlayerId, target: PlayerId },
    /// User and target see each other's hands.
    Polygraph { user: PlayerId, target: PlayerId },
    /// Exchange one card of `player_a` with one card of `player_b`.
    Swap {
        user: PlayerId,
        player_a: PlayerId,
        card_a: CardIndex,
        player_b: PlayerId,
        card_b: CardIndex,
    },
}

impl EquipmentConsumption {
    /// Equipment card this consumption spends.
    #[must_use]
    pub const fn card(&self) -> EquipmentCard {
        match self {
            EquipmentConsumption::Taser { .. } => EquipmentCard::Taser,
            EquipmentConsumption::Defibrillator { .. } => EquipmentCard::Defibrillator,
            EquipmentConsumption::Blackmail { .. } => EquipmentCard::Blackmail,
            EquipmentConsumption::Polygraph { .. } => EquipmentCard::Polygraph,
            EquipmentConsumption::Swap { .. } => EquipmentCard::Swap,
        }
    }

    #[must_use]
    pub const fn user(&self) -> PlayerId {
        match *self {
            EquipmentConsumption::Taser { user, .. }
            | EquipmentConsumption::Defibrillator { user, .. }
            | EquipmentConsumption::Blackmail { user, .. }
            | EquipmentConsumption::Polygraph { user, .. }
            | EquipmentConsumption::Swap { user, .. } => user,
        }
    }
}

impl Operator for EquipmentConsumption {
    fn actor(&self) -> PlayerId {
        self.user()
    }

    fn validate(&self, table: &TableState, _deck: &DeckState) -> MoveResult<()> {
        let user = self.user();
        holding(living(table, user)?, user, self.card())?;

        match *self {
            EquipmentConsumption::Taser { user, target, aimed_at } => {
                not_self(user, target)?;
                not_self(user, aimed_at)?;
                let target_state = living(table, target)?;
                living(table, aimed_at)?;
                if !target_state.gun.has_gun() {
                    return Err(InvalidMove::Unarmed(target));
                }
                if seated(table, user)?.gun.has_gun() {
                    return Err(InvalidMove::AlreadyArmed(user));
                }
                Ok(())
            }
            EquipmentConsumption::Defibrillator { target, .. } => {
                if seated(table, target)?.is_alive() {
                    return Err(InvalidMove::PlayerNotDead(target));
                }
                Ok(())
            }
            EquipmentConsumption::Blackmail { target, .. } => living(table, target).map(|_| ()),
            EquipmentConsumption::Polygraph { user, target } => {
                not_self(user, target)?;
                living(table, target).map(|_| ())
            }
            EquipmentConsumption::Swap { player_a, card_a, player_b, card_b, .. } => {
                if player_a == player_b {
                    return Err(InvalidMove::SamePlayer(player_a));
                }
                card_in_range(living(table, player_a)?, player_a, card_a)?;
                card_in_range(living(table, player_b)?, player_b, card_b)
            }
        }
    }

    fn play(&self, table: &TableState, deck: &DeckState) -> MoveResult<(TableState, DeckState)> {
        debug_assert!(self.is_valid(table, deck), "play called on invalid {self:?}");

        let mut table = table.clone();
        let mut deck = deck.clone();

        match *self {
            EquipmentConsumption::Taser { user, target, aimed_at } => {
                seated_mut(&mut table, target)?.gun.disarm();
                seated_mut(&mut table, user)?.gun.arm(aimed_at);
            }
            EquipmentConsumption::Defibrillator { target, .. } => {
                seated_mut(&mut table, target)?.health = PlayerHealth::Alive;
            }
            EquipmentConsumption::Blackmail { target, .. } => {
                for card in seated_mut(&mut table, target)?.integrity_cards.iter_mut() {
                    card.card = card.card.flip();
                }
            }
            EquipmentConsumption::Polygraph { .. } => {}
            EquipmentConsumption::Swap { player_a, card_a, player_b, card_b, .. } => {
                let out_of_range = |player, index| InvalidMove::CardOutOfRange { player, index };
                let a = *seated(&table, player_a)?
                    .integrity_cards
                    .get(card_a)
                    .ok_or(out_of_range(player_a, card_a))?;
                let b = *seated(&table, player_b)?
                    .integrity_cards
                    .get(card_b)
                    .ok_or(out_of_range(player_b, card_b))?;
                seated_mut(&mut table, player_a)?.integrity_cards[card_a] = b;
                seated_mut(&mut table, player_b)?.integrity_cards[card_b] = a;
            }
        }

        seated_mut(&mut table, self.user())?.equipment = None;
        deck.return_equipment(self.card());

        Ok((table, deck))
    }

    fn announcement(&self) -> UpdatePayload {
        UpdatePayload::Equipment(*self)
    }

    fn private_notify(&self, table: &TableState, sink: &mut dyn UpdateSink) {
        let EquipmentConsumption::Polygraph { user, target } = *self else {
            return;
        };
        let (Some(user_state), Some(target_state)) = (table.player(user), table.player(target)) else {
            return;
        };

        let payload = UpdatePayload::PolygraphResult {
            user,
            target,
            user_hand: user_state.card_values(),
            target_hand: target_state.card_values(),
        };
        sink.send_private(user, Some(user), payload.clone());
        sink.send_private(target, Some(user), payload);
    }
}
