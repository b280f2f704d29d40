//! Bot collaborators and the manager that owns them.
//!
//! ## Bot
//!
//! Bots are in-process decision makers. They only ever see opaque views of
//! the table and deck and return proposals by value; they never hold
//! references into live engine state.
//!
//! ## BotManager
//!
//! Owns one bot per seat and the notification log. It is the engine's
//! `UpdateSink`: every update is appended to the log first, then delivered to
//! every bot (public) or to one bot (private).

pub mod simple;

pub use simple::{PassBot, RandomBot};

use crate::core::{DeckState, PlayerId, PlayerMap, TableState};
use crate::notify::{Audience, NotificationBus, Update, UpdateId, UpdatePayload, UpdateSink};
use crate::operators::{Action, EquipmentConsumption};

/// A player's decision maker.
pub trait Bot {
    /// Optionally spend held equipment before the round's action.
    fn pre_round(&mut self, _table: &TableState, _deck: &DeckState) -> Option<EquipmentConsumption> {
        None
    }

    /// Choose this turn's action. Anything other than Investigate, Equip,
    /// ArmAndAim, Shoot or Pass is rejected.
    fn action(&mut self, table: &TableState, deck: &DeckState) -> Action;

    /// Optionally re-aim a held gun. Only `Aim` is accepted.
    fn aim(&mut self, _table: &TableState, _deck: &DeckState) -> Option<Action> {
        None
    }

    /// Receive a public update, or a private update addressed to this bot.
    fn on_board_update(&mut self, _update: &Update) {}
}

/// One bot per seat plus the update log.
pub struct BotManager {
    bots: PlayerMap<Box<dyn Bot>>,
    bus: NotificationBus,
}

impl BotManager {
    /// Bots in seat order.
    #[must_use]
    pub fn new(bots: Vec<Box<dyn Bot>>) -> Self {
        Self {
            bots: PlayerMap::from_vec(bots),
            bus: NotificationBus::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bots.player_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every update delivered so far.
    #[must_use]
    pub fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    pub fn pre_round(
        &mut self,
        player: PlayerId,
        table: &TableState,
        deck: &DeckState,
    ) -> Option<EquipmentConsumption> {
        self.bots.get_mut(player)?.pre_round(table, deck)
    }

    /// `None` only when no bot sits at `player`.
    pub fn action(&mut self, player: PlayerId, table: &TableState, deck: &DeckState) -> Option<Action> {
        self.bots.get_mut(player).map(|bot| bot.action(table, deck))
    }

    pub fn aim(&mut self, player: PlayerId, table: &TableState, deck: &DeckState) -> Option<Action> {
        self.bots.get_mut(player)?.aim(table, deck)
    }

    fn deliver(&mut self, update: &Update) {
        match update.audience {
            Audience::Public => {
                for (_, bot) in self.bots.iter_mut() {
                    bot.on_board_update(update);
                }
            }
            Audience::Private(player) => {
                if let Some(bot) = self.bots.get_mut(player) {
                    bot.on_board_update(update);
                }
            }
        }
    }
}

impl UpdateSink for BotManager {
    fn publish(&mut self, actor: Option<PlayerId>, payload: UpdatePayload) -> UpdateId {
        let update = self.bus.record(Audience::Public, actor, payload);
        self.deliver(&update);
        update.id
    }

    fn send_private(
        &mut self,
        recipient: PlayerId,
        actor: Option<PlayerId>,
        payload: UpdatePayload,
    ) -> UpdateId {
        let update = self.bus.record(Audience::Private(recipient), actor, payload);
        self.deliver(&update);
        update.id
    }
}

impl std::fmt::Debug for BotManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotManager")
            .field("bots", &self.len())
            .field("updates", &self.bus.len())
            .finish()
    }
}
