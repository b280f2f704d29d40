//! Turn actions: what the current player does in the ACTION and AIM phases.
//!
//! | Action | Effect |
//! |---|---|
//! | Investigate | nothing public; the card value goes privately to the actor |
//! | Equip | draw the top equipment card, flip a card face-up |
//! | ArmAndAim | take a gun from the pool aimed at a target, flip a card face-up |
//! | Aim | point an existing gun at someone else |
//! | Shoot | fire at the aimed-at target; the gun goes back to the pool |
//! | Pass | nothing |

use serde::{Deserialize, Serialize};

use super::{card_in_range, check_flip, living, not_self, seated_mut, Operator};
use crate::core::{CardIndex, DeckState, InvalidMove, MoveResult, PlayerId, TableState};
use crate::notify::{UpdatePayload, UpdateSink};

/// Tag for an action, used in phase checks and update kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Investigate,
    Equip,
    ArmAndAim,
    Aim,
    Shoot,
    Pass,
}

impl ActionType {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionType::Investigate => "Investigate",
            ActionType::Equip => "Equip",
            ActionType::ArmAndAim => "Arm and Aim",
            ActionType::Aim => "Aim",
            ActionType::Shoot => "Shoot",
            ActionType::Pass => "Pass",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A turn action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Investigate {
        actor: PlayerId,
        target: PlayerId,
        card: CardIndex,
    },
    Equip {
        actor: PlayerId,
        card_to_flip: CardIndex,
    },
    ArmAndAim {
        actor: PlayerId,
        target: PlayerId,
        card_to_flip: CardIndex,
    },
    Aim {
        actor: PlayerId,
        target: PlayerId,
    },
    Shoot {
        actor: PlayerId,
        target: PlayerId,
    },
    Pass {
        actor: PlayerId,
    },
}

impl Action {
    #[must_use]
    pub const fn investigate(actor: PlayerId, target: PlayerId, card: CardIndex) -> Self {
        Action::Investigate { actor, target, card }
    }

    #[must_use]
    pub const fn equip(actor: PlayerId, card_to_flip: CardIndex) -> Self {
        Action::Equip { actor, card_to_flip }
    }

    #[must_use]
    pub const fn arm_and_aim(actor: PlayerId, target: PlayerId, card_to_flip: CardIndex) -> Self {
        Action::ArmAndAim { actor, target, card_to_flip }
    }

    #[must_use]
    pub const fn aim(actor: PlayerId, target: PlayerId) -> Self {
        Action::Aim { actor, target }
    }

    #[must_use]
    pub const fn shoot(actor: PlayerId, target: PlayerId) -> Self {
        Action::Shoot { actor, target }
    }

    #[must_use]
    pub const fn pass(actor: PlayerId) -> Self {
        Action::Pass { actor }
    }

    #[must_use]
    pub const fn action_type(&self) -> ActionType {
        match self {
            Action::Investigate { .. } => ActionType::Investigate,
            Action::Equip { .. } => ActionType::Equip,
            Action::ArmAndAim { .. } => ActionType::ArmAndAim,
            Action::Aim { .. } => ActionType::Aim,
            Action::Shoot { .. } => ActionType::Shoot,
            Action::Pass { .. } => ActionType::Pass,
        }
    }

    /// Card of the actor's that this action turns face-up.
    #[must_use]
    pub const fn card_to_flip(&self) -> Option<CardIndex> {
        match self {
            Action::Equip { card_to_flip, .. } | Action::ArmAndAim { card_to_flip, .. } => {
                Some(*card_to_flip)
            }
            _ => None,
        }
    }
}

impl Operator for Action {
    fn actor(&self) -> PlayerId {
        match *self {
            Action::Investigate { actor, .. }
            | Action::Equip { actor, .. }
            | Action::ArmAndAim { actor, .. }
            | Action::Aim { actor, .. }
            | Action::Shoot { actor, .. }
            | Action::Pass { actor } => actor,
        }
    }

    fn validate(&self, table: &TableState, deck: &DeckState) -> MoveResult<()> {
        match *self {
            Action::Investigate { actor, target, card } => {
                living(table, actor)?;
                let target_state = living(table, target)?;
                card_in_range(target_state, target, card)
            }
            Action::Equip { actor, card_to_flip } => {
                let state = living(table, actor)?;
                if deck.equipment_count() == 0 {
                    return Err(InvalidMove::NoEquipmentLeft);
                }
                if state.equipment.is_some() {
                    return Err(InvalidMove::AlreadyEquipped(actor));
                }
                check_flip(state, actor, card_to_flip)
            }
            Action::ArmAndAim { actor, target, card_to_flip } => {
                let state = living(table, actor)?;
                living(table, target)?;
                not_self(actor, target)?;
                if state.gun.has_gun() {
                    return Err(InvalidMove::AlreadyArmed(actor));
                }
                if deck.guns() == 0 {
                    return Err(InvalidMove::NoGunsLeft);
                }
                check_flip(state, actor, card_to_flip)
            }
            Action::Aim { actor, target } => {
                let state = living(table, actor)?;
                living(table, target)?;
                not_self(actor, target)?;
                if !state.gun.has_gun() {
                    return Err(InvalidMove::Unarmed(actor));
                }
                Ok(())
            }
            Action::Shoot { actor, target } => {
                let state = living(table, actor)?;
                living(table, target)?;
                if !state.gun.has_gun() {
                    return Err(InvalidMove::Unarmed(actor));
                }
                if state.gun.aimed_at() != Some(target) {
                    return Err(InvalidMove::NotAimedAt { actor, target });
                }
                Ok(())
            }
            Action::Pass { .. } => Ok(()),
        }
    }

    fn play(&self, table: &TableState, deck: &DeckState) -> MoveResult<(TableState, DeckState)> {
        debug_assert!(self.is_valid(table, deck), "play called on invalid {self:?}");

        let mut table = table.clone();
        let mut deck = deck.clone();

        match *self {
            Action::Investigate { .. } | Action::Pass { .. } => {}
            Action::Equip { actor, card_to_flip } => {
                let drawn = deck.draw_equipment().ok_or(InvalidMove::NoEquipmentLeft)?;
                let state = seated_mut(&mut table, actor)?;
                state.equipment = Some(drawn);
                state.reveal(card_to_flip);
            }
            Action::ArmAndAim { actor, target, card_to_flip } => {
                if !deck.take_gun() {
                    return Err(InvalidMove::NoGunsLeft);
                }
                let state = seated_mut(&mut table, actor)?;
                state.gun.arm(target);
                state.reveal(card_to_flip);
            }
            Action::Aim { actor, target } => {
                let state = seated_mut(&mut table, actor)?;
                if !state.gun.has_gun() {
                    return Err(InvalidMove::Unarmed(actor));
                }
                state.gun.retarget(target);
            }
            Action::Shoot { actor, target } => {
                seated_mut(&mut table, actor)?.gun.disarm();
                deck.return_gun();
                seated_mut(&mut table, target)?.take_shot();
            }
        }

        Ok((table, deck))
    }

    fn announcement(&self) -> UpdatePayload {
        UpdatePayload::Action(*self)
    }

    fn private_notify(&self, table: &TableState, sink: &mut dyn UpdateSink) {
        match *self {
            Action::Investigate { actor, target, card } => {
                let value = table
                    .player(target)
                    .and_then(|s| s.integrity_cards.get(card))
                    .map(|c| c.card);
                if let Some(value) = value {
                    sink.send_private(
                        actor,
                        Some(actor),
                        UpdatePayload::InvestigationResult { target, index: card, value },
                    );
                }
            }
            Action::Equip { actor, .. } => {
                if let Some(drawn) = table.player(actor).and_then(|s| s.equipment) {
                    sink.send_private(actor, Some(actor), UpdatePayload::EquipmentDrawn(drawn));
                }
            }
            _ => {}
        }
    }

    fn card_flip(&self, before: &TableState) -> Option<UpdatePayload> {
        let index = self.card_to_flip()?;
        let card = before.player(self.actor())?.integrity_cards.get(index)?;
        (!card.face_up).then_some(UpdatePayload::CardFlip {
            index,
            value: card.card,
            trigger: *self,
        })
    }
}
