//! Append-only notification log and the sink trait operators publish through.
//!
//! Operators never talk to bots directly: they hand payloads to an
//! `UpdateSink`. The engine's sink is `BotManager`, which records each update
//! on a `NotificationBus` and then fans it out. History is never rewritten;
//! undoing an attempt appends a rollback marker instead.

use im::Vector;

use super::update::{Audience, Update, UpdateId, UpdatePayload};
use crate::core::{IntegrityCard, PlayerId, TableState};

/// Destination for updates emitted while a move is applied.
pub trait UpdateSink {
    /// Emit an update every bot sees.
    fn publish(&mut self, actor: Option<PlayerId>, payload: UpdatePayload) -> UpdateId;

    /// Emit an update only `recipient` sees.
    fn send_private(
        &mut self,
        recipient: PlayerId,
        actor: Option<PlayerId>,
        payload: UpdatePayload,
    ) -> UpdateId;
}

/// Ordered log of every update emitted during a game.
#[derive(Clone, Debug, Default)]
pub struct NotificationBus {
    next_id: u64,
    history: Vector<Update>,
}

impl NotificationBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next id and append.
    pub fn record(
        &mut self,
        audience: Audience,
        actor: Option<PlayerId>,
        payload: UpdatePayload,
    ) -> Update {
        let update = Update {
            id: UpdateId(self.next_id),
            audience,
            actor,
            payload,
        };
        self.next_id += 1;
        self.history.push_back(update.clone());
        update
    }

    #[must_use]
    pub fn history(&self) -> &Vector<Update> {
        &self.history
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Everything `player` was shown, in order.
    pub fn updates_for(&self, player: PlayerId) -> impl Iterator<Item = &Update> + '_ {
        self.history
            .iter()
            .filter(move |u| u.audience.includes(player))
    }

    #[must_use]
    pub fn find(&self, id: UpdateId) -> Option<&Update> {
        // Ids are assigned densely from zero.
        usize::try_from(id.0)
            .ok()
            .and_then(|index| self.history.get(index))
            .filter(|u| u.id == id)
    }
}

impl UpdateSink for NotificationBus {
    fn publish(&mut self, actor: Option<PlayerId>, payload: UpdatePayload) -> UpdateId {
        self.record(Audience::Public, actor, payload).id
    }

    fn send_private(
        &mut self,
        recipient: PlayerId,
        actor: Option<PlayerId>,
        payload: UpdatePayload,
    ) -> UpdateId {
        self.record(Audience::Private(recipient), actor, payload).id
    }
}

/// Players whose true card values differ between two tables, with their new hands.
#[must_use]
pub fn changed_hands(before: &TableState, after: &TableState) -> Vec<(PlayerId, Vec<IntegrityCard>)> {
    after
        .iter()
        .filter_map(|(player, state)| {
            let now = state.card_values();
            let was = before.player(player).map(|s| s.card_values());
            (was.as_ref() != Some(&now)).then_some((player, now))
        })
        .collect()
}
