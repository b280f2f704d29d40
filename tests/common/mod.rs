//! Shared fixtures for integration tests.
//!
//! `ScriptedBot` replays fixed decisions and records every update it is
//! shown, so tests can check both what the engine did and who saw it.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use gcbc::{
    Action, Bot, DeckState, EngineConfig, EngineContext, EquipmentCard, EquipmentConsumption,
    GameEngine, IntegrityCard, PlayerGameState, PlayerId, TableState, Update, UpdatePayload,
};

pub type UpdateLog = Rc<RefCell<Vec<Update>>>;

pub fn p(id: u8) -> PlayerId {
    PlayerId::new(id)
}

/// A bot that plays back queued decisions.
///
/// A queued consumption is offered on every pre-round pass until the engine
/// announces it, so a slower bot keeps proposing after losing a pass.
pub struct ScriptedBot {
    me: PlayerId,
    consumptions: VecDeque<EquipmentConsumption>,
    actions: VecDeque<Action>,
    aims: VecDeque<Action>,
    delay: Duration,
    log: UpdateLog,
}

impl ScriptedBot {
    pub fn new(me: PlayerId) -> Self {
        Self {
            me,
            consumptions: VecDeque::new(),
            actions: VecDeque::new(),
            aims: VecDeque::new(),
            delay: Duration::ZERO,
            log: UpdateLog::default(),
        }
    }

    pub fn consume(mut self, consumption: EquipmentConsumption) -> Self {
        self.consumptions.push_back(consumption);
        self
    }

    pub fn act(mut self, action: Action) -> Self {
        self.actions.push_back(action);
        self
    }

    pub fn aim_with(mut self, action: Action) -> Self {
        self.aims.push_back(action);
        self
    }

    /// Sleep this long before every pre-round answer.
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn log(&self) -> UpdateLog {
        Rc::clone(&self.log)
    }

    pub fn boxed(self) -> Box<dyn Bot> {
        Box::new(self)
    }
}

impl Bot for ScriptedBot {
    fn pre_round(&mut self, _table: &TableState, _deck: &DeckState) -> Option<EquipmentConsumption> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.consumptions.front().copied()
    }

    fn action(&mut self, _table: &TableState, _deck: &DeckState) -> Action {
        self.actions.pop_front().unwrap_or(Action::pass(self.me))
    }

    fn aim(&mut self, _table: &TableState, _deck: &DeckState) -> Option<Action> {
        self.aims.pop_front()
    }

    fn on_board_update(&mut self, update: &Update) {
        if let UpdatePayload::Equipment(consumption) = &update.payload {
            if self.consumptions.front() == Some(consumption) {
                self.consumptions.pop_front();
            }
        }
        self.log.borrow_mut().push(update.clone());
    }
}

/// Face-down hands in seat order.
pub fn table(hands: &[[IntegrityCard; 3]]) -> TableState {
    hands
        .iter()
        .enumerate()
        .map(|(i, hand)| (p(i as u8), PlayerGameState::dealt(*hand)))
        .collect()
}

/// Four players, nobody holding both leaders.
pub fn standard_table() -> TableState {
    use gcbc::IntegrityCard::{Agent, BadCop, GoodCop, Kingpin};
    table(&[
        [Agent, GoodCop, GoodCop],
        [Kingpin, BadCop, BadCop],
        [GoodCop, GoodCop, BadCop],
        [BadCop, BadCop, GoodCop],
    ])
}

pub fn standard_deck() -> DeckState {
    DeckState::new(
        [
            EquipmentCard::Taser,
            EquipmentCard::Defibrillator,
            EquipmentCard::Blackmail,
            EquipmentCard::Polygraph,
            EquipmentCard::Swap,
        ],
        2,
    )
}

/// Give `player` an equipment card directly.
pub fn equip(table: &mut TableState, player: PlayerId, card: EquipmentCard) {
    if let Some(state) = table.player_mut(player) {
        state.equipment = Some(card);
    }
}

/// Build an engine over a fixed table with the given bots.
pub fn engine(table: TableState, deck: DeckState, bots: Vec<Box<dyn Bot>>) -> GameEngine {
    let config = EngineConfig::new().with_player_count(table.player_count());
    GameEngine::new(config, EngineContext::new(table, deck), bots).unwrap()
}

/// Scripted bots that pass at every decision.
pub fn idle_bots(n: usize) -> Vec<ScriptedBot> {
    PlayerId::all(n).map(ScriptedBot::new).collect()
}

pub fn boxed(bots: Vec<ScriptedBot>) -> Vec<Box<dyn Bot>> {
    bots.into_iter().map(ScriptedBot::boxed).collect()
}

/// Payloads of every update in order.
pub fn payloads(engine: &GameEngine) -> Vec<UpdatePayload> {
    engine.history().iter().map(|u| u.payload.clone()).collect()
}

/// Public updates after the initial hand deal.
pub fn public_payloads(engine: &GameEngine) -> Vec<UpdatePayload> {
    engine
        .history()
        .iter()
        .filter(|u| u.is_public())
        .map(|u| u.payload.clone())
        .collect()
}
