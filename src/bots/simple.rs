//! Reference bots.
//!
//! `PassBot` never does anything. `RandomBot` plays uniformly among moves
//! that validate against what it can see plus what it has been told
//! privately, which makes it a useful fuzzer for the engine.

use super::Bot;
use crate::core::{
    DeckState, EquipmentCard, GameRng, IntegrityCard, PlayerId, TableState, HAND_SIZE,
};
use crate::notify::{Update, UpdateId, UpdatePayload};
use crate::operators::{Action, EquipmentConsumption, Operator};

/// Always passes, never uses equipment, never re-aims.
#[derive(Clone, Copy, Debug)]
pub struct PassBot {
    me: PlayerId,
}

impl PassBot {
    #[must_use]
    pub fn new(me: PlayerId) -> Self {
        Self { me }
    }
}

impl Bot for PassBot {
    fn action(&mut self, _table: &TableState, _deck: &DeckState) -> Action {
        Action::pass(self.me)
    }
}

/// Picks uniformly among currently legal moves.
#[derive(Clone, Debug)]
pub struct RandomBot {
    me: PlayerId,
    rng: GameRng,
    /// True values of our own cards, from private `Hand` updates.
    hand: Option<Vec<IntegrityCard>>,
    equipment: Option<EquipmentCard>,
    /// Our last consumption attempt, so a rollback can hand the card back.
    pending_use: Option<(UpdateId, EquipmentCard)>,
    /// Chance of spending equipment in a given pre-round pass.
    use_probability: f64,
}

impl RandomBot {
    #[must_use]
    pub fn new(me: PlayerId, seed: u64) -> Self {
        Self {
            me,
            rng: GameRng::new(seed),
            hand: None,
            equipment: None,
            pending_use: None,
            use_probability: 0.5,
        }
    }

    /// Set how eagerly held equipment is spent (clamped to 0..=1).
    #[must_use]
    pub fn with_use_probability(mut self, probability: f64) -> Self {
        self.use_probability = probability.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn equipment(&self) -> Option<EquipmentCard> {
        self.equipment
    }

    #[must_use]
    pub fn hand(&self) -> Option<&[IntegrityCard]> {
        self.hand.as_deref()
    }

    /// The opaque table with our own seat filled in from private knowledge.
    fn view(&self, table: &TableState) -> TableState {
        let mut view = table.clone();
        if let Some(state) = view.player_mut(self.me) {
            state.equipment = self.equipment;
            if let Some(hand) = &self.hand {
                for (slot, value) in state.integrity_cards.iter_mut().zip(hand) {
                    slot.card = *value;
                }
            }
        }
        view
    }

    fn pick<T: Operator + Copy>(&mut self, candidates: &[T], table: &TableState, deck: &DeckState) -> Option<T> {
        let legal: Vec<T> = candidates
            .iter()
            .copied()
            .filter(|op| op.is_valid(table, deck))
            .collect();
        self.rng.choose(&legal).copied()
    }

    fn consumptions(&self, card: EquipmentCard, table: &TableState) -> Vec<EquipmentConsumption> {
        let user = self.me;
        let seats: Vec<PlayerId> = table.players().collect();
        let mut out = Vec::new();

        match card {
            EquipmentCard::Taser => {
                for &target in &seats {
                    for &aimed_at in &seats {
                        out.push(EquipmentConsumption::Taser { user, target, aimed_at });
                    }
                }
            }
            EquipmentCard::Defibrillator => {
                out.extend(seats.iter().map(|&target| EquipmentConsumption::Defibrillator { user, target }));
            }
            EquipmentCard::Blackmail => {
                out.extend(seats.iter().map(|&target| EquipmentConsumption::Blackmail { user, target }));
            }
            EquipmentCard::Polygraph => {
                out.extend(seats.iter().map(|&target| EquipmentConsumption::Polygraph { user, target }));
            }
            EquipmentCard::Swap => {
                for (i, &player_a) in seats.iter().enumerate() {
                    for &player_b in &seats[i + 1..] {
                        for card_a in 0..HAND_SIZE {
                            for card_b in 0..HAND_SIZE {
                                out.push(EquipmentConsumption::Swap {
                                    user,
                                    player_a,
                                    card_a,
                                    player_b,
                                    card_b,
                                });
                            }
                        }
                    }
                }
            }
            EquipmentCard::Unknown => {}
        }
        out
    }

    fn actions(&self, table: &TableState) -> Vec<Action> {
        let me = self.me;
        let mut out = vec![Action::pass(me)];

        for target in table.players().filter(|&p| p != me) {
            for card in 0..HAND_SIZE {
                out.push(Action::investigate(me, target, card));
                out.push(Action::arm_and_aim(me, target, card));
            }
            out.push(Action::shoot(me, target));
        }
        out.extend((0..HAND_SIZE).map(|card| Action::equip(me, card)));
        out
    }
}

impl Bot for RandomBot {
    fn pre_round(&mut self, table: &TableState, deck: &DeckState) -> Option<EquipmentConsumption> {
        let card = self.equipment?;
        if !self.rng.gen_bool(self.use_probability) {
            return None;
        }
        let view = self.view(table);
        let candidates = self.consumptions(card, &view);
        self.pick(&candidates, &view, deck)
    }

    fn action(&mut self, table: &TableState, deck: &DeckState) -> Action {
        let view = self.view(table);
        let candidates = self.actions(&view);
        self.pick(&candidates, &view, deck)
            .unwrap_or(Action::pass(self.me))
    }

    fn aim(&mut self, table: &TableState, deck: &DeckState) -> Option<Action> {
        if !self.rng.gen_bool(0.5) {
            return None;
        }
        let view = self.view(table);
        let candidates: Vec<Action> = view
            .players()
            .map(|target| Action::aim(self.me, target))
            .collect();
        self.pick(&candidates, &view, deck)
    }

    fn on_board_update(&mut self, update: &Update) {
        match &update.payload {
            UpdatePayload::Hand(values) if update.actor == Some(self.me) => {
                self.hand = Some(values.clone());
            }
            UpdatePayload::EquipmentDrawn(card) => {
                self.equipment = Some(*card);
            }
            UpdatePayload::Equipment(consumption) if consumption.user() == self.me => {
                self.pending_use = Some((update.id, consumption.card()));
                self.equipment = None;
            }
            UpdatePayload::Rollback(id) => {
                if let Some((pending, card)) = self.pending_use {
                    if pending == *id {
                        self.equipment = Some(card);
                        self.pending_use = None;
                    }
                }
            }
            _ => {}
        }
    }
}
