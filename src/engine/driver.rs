//! The turn driver.
//!
//! ## Round structure
//!
//! 1. **Pre-round**: every living bot not blacklisted this round may propose
//!    an equipment consumption. Proposals are timed; only the fastest is
//!    applied per pass, and passes repeat until nobody proposes. A proposer
//!    whose consumption fails is blacklisted until the next round.
//! 2. **Action**: the current player picks one action.
//! 3. **Aim**: an armed current player may re-aim.
//!
//! Turn order then advances to the next living seat and the win conditions
//! are checked.
//!
//! ## Recovery
//!
//! Every bot decision goes through `enact`: checkpoint, announce, validate,
//! play, commit. Any failure restores the checkpoint and publishes a rollback
//! marker naming the announced update. In the action and aim phases the
//! failed decision is then replaced by a Pass.

use std::time::{Duration, Instant};

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::checkpoint::Checkpoint;
use super::context::{EngineContext, TurnPhase};
use super::setup::new_context;
use super::win::{self, WinCondition};
use crate::bots::{Bot, BotManager};
use crate::core::{EngineConfig, GameError, GameResult, InvalidMove, MoveResult, PlayerId};
use crate::notify::{changed_hands, Update, UpdatePayload, UpdateSink};
use crate::operators::{Action, ActionType, EquipmentConsumption, Operator};

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// `None` when the round limit was hit first.
    pub win_condition: Option<WinCondition>,
    pub rounds_played: u32,
}

/// Runs a game: owns the engine state, the bots, and the update log.
#[derive(Debug)]
pub struct GameEngine {
    ctx: EngineContext,
    bots: BotManager,
    config: EngineConfig,
}

impl GameEngine {
    /// Deal a new game from `config`, one bot per seat in seat order.
    pub fn new_game(config: EngineConfig, bots: Vec<Box<dyn Bot>>) -> GameResult<Self> {
        let ctx = new_context(&config)?;
        Self::new(config, ctx, bots)
    }

    /// Start from an existing context. Every bot is privately told its hand.
    ///
    /// Bots are seated by position, so the table must hold seats `0..n`.
    pub fn new(config: EngineConfig, ctx: EngineContext, bots: Vec<Box<dyn Bot>>) -> GameResult<Self> {
        let players = ctx.table.player_count();
        if bots.len() != players {
            return Err(GameError::BotCountMismatch { expected: players, got: bots.len() });
        }
        let gap = ctx.table.players().zip(PlayerId::all(players)).find(|(seat, want)| seat != want);
        if let Some((seat, _)) = gap {
            return Err(GameError::NonContiguousSeats { seat, players });
        }

        let mut engine = Self {
            ctx,
            bots: BotManager::new(bots),
            config,
        };
        engine.deal_hands();
        Ok(engine)
    }

    #[must_use]
    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn bots(&self) -> &BotManager {
        &self.bots
    }

    /// Every update emitted so far, public and private.
    #[must_use]
    pub fn history(&self) -> &Vector<Update> {
        self.bots.bus().history()
    }

    fn deal_hands(&mut self) {
        let hands: Vec<_> = self
            .ctx
            .table
            .iter()
            .map(|(player, state)| (player, state.card_values()))
            .collect();
        for (player, hand) in hands {
            self.bots.send_private(player, Some(player), UpdatePayload::Hand(hand));
        }
    }

    /// Play rounds until someone wins or the round limit is reached.
    pub fn play_game(&mut self) -> GameSummary {
        loop {
            if let Some(condition) = self.play_round() {
                info!(%condition, rounds = self.ctx.round, "game over");
                return GameSummary {
                    win_condition: Some(condition),
                    rounds_played: self.ctx.round,
                };
            }
            if self.config.round_limit_reached(self.ctx.round) {
                info!(rounds = self.ctx.round, "round limit reached without a winner");
                return GameSummary {
                    win_condition: None,
                    rounds_played: self.ctx.round,
                };
            }
        }
    }

    /// Play one full round for the current player, then advance the turn.
    pub fn play_round(&mut self) -> Option<WinCondition> {
        self.run_pre_round();
        self.run_action();
        self.run_aim();

        self.ctx.advance();
        self.ctx.round += 1;
        win::evaluate(&self.ctx.table)
    }

    fn begin_phase(&mut self, phase: TurnPhase) {
        self.ctx.phase = phase;
        debug!(%phase, player = %self.ctx.current_player, round = self.ctx.round, "phase start");
        self.bots.publish(None, UpdatePayload::PhaseStart(phase));
    }

    /// Offer equipment consumptions until nobody proposes one.
    pub fn run_pre_round(&mut self) {
        self.begin_phase(TurnPhase::PreRound);
        let mut blacklist: FxHashSet<PlayerId> = FxHashSet::default();

        while let Some((latency, player, consumption)) = self.fastest_proposal(&blacklist) {
            debug!(%player, ?consumption, ?latency, "applying fastest pre-round proposal");
            if self.enact(player, &consumption, Ok(())).is_err() {
                blacklist.insert(player);
            }
        }
    }

    /// Ask every eligible bot and keep the quickest answer. Ties go to the lower seat.
    fn fastest_proposal(
        &mut self,
        blacklist: &FxHashSet<PlayerId>,
    ) -> Option<(Duration, PlayerId, EquipmentConsumption)> {
        let table = self.ctx.table.opaque_state();
        let deck = self.ctx.deck.opaque_state();
        let eligible: Vec<PlayerId> = self
            .ctx
            .table
            .alive_players()
            .filter(|p| !blacklist.contains(p))
            .collect();

        let mut proposals = Vec::new();
        for player in eligible {
            let started = Instant::now();
            let proposal = self.bots.pre_round(player, &table, &deck);
            let latency = started.elapsed();
            if let Some(consumption) = proposal {
                proposals.push((latency, player, consumption));
            }
        }

        proposals
            .into_iter()
            .min_by_key(|(latency, player, _)| (*latency, *player))
    }

    /// The current player's action. Anything rejected becomes a Pass.
    pub fn run_action(&mut self) {
        self.begin_phase(TurnPhase::Action);
        let player = self.ctx.current_player;
        if !self.ctx.table.is_alive(player) {
            self.pass(player);
            return;
        }

        let table = self.ctx.table.opaque_state();
        let deck = self.ctx.deck.opaque_state();
        let Some(action) = self.bots.action(player, &table, &deck) else {
            self.pass(player);
            return;
        };

        let admissible = allowed_in(TurnPhase::Action, &action);
        if self.enact(player, &action, admissible).is_err() {
            self.pass(player);
        }
    }

    /// The current player's chance to re-aim. Unarmed players pass.
    pub fn run_aim(&mut self) {
        self.begin_phase(TurnPhase::Aim);
        let player = self.ctx.current_player;
        let armed = self
            .ctx
            .table
            .player(player)
            .is_some_and(|s| s.is_alive() && s.gun.has_gun());
        if !armed {
            self.pass(player);
            return;
        }

        let table = self.ctx.table.opaque_state();
        let deck = self.ctx.deck.opaque_state();
        match self.bots.aim(player, &table, &deck) {
            None => self.pass(player),
            Some(action) => {
                let admissible = allowed_in(TurnPhase::Aim, &action);
                if self.enact(player, &action, admissible).is_err() {
                    self.pass(player);
                }
            }
        }
    }

    fn pass(&mut self, player: PlayerId) {
        Action::pass(player).notify(&mut self.bots);
    }

    /// Announce and apply `op` on behalf of `submitted_by`, rolling back on failure.
    fn enact<O>(&mut self, submitted_by: PlayerId, op: &O, admissible: MoveResult<()>) -> MoveResult<()>
    where
        O: Operator + std::fmt::Debug,
    {
        let checkpoint = Checkpoint::capture(&self.ctx);
        let id = op.notify(&mut self.bots);

        match self.apply(submitted_by, op, admissible) {
            Ok(()) => {
                debug!(player = %submitted_by, update = %id, ?op, "applied");
                Ok(())
            }
            Err(reason) => {
                warn!(player = %submitted_by, update = %id, %reason, "rolling back");
                checkpoint.restore(&mut self.ctx);
                self.bots.publish(None, UpdatePayload::Rollback(id));
                Err(reason)
            }
        }
    }

    fn apply<O: Operator>(&mut self, submitted_by: PlayerId, op: &O, admissible: MoveResult<()>) -> MoveResult<()> {
        admissible?;
        if op.actor() != submitted_by {
            return Err(InvalidMove::ActorMismatch {
                submitted_by,
                actor: op.actor(),
            });
        }
        op.validate(&self.ctx.table, &self.ctx.deck)?;

        let (table, deck) = op.play(&self.ctx.table, &self.ctx.deck)?;
        let before = std::mem::replace(&mut self.ctx.table, table);
        self.ctx.deck = deck;

        if let Some(flip) = op.card_flip(&before) {
            self.bots.publish(Some(op.actor()), flip);
        }
        op.private_notify(&self.ctx.table, &mut self.bots);
        for (player, hand) in changed_hands(&before, &self.ctx.table) {
            self.bots.send_private(player, Some(player), UpdatePayload::Hand(hand));
        }
        Ok(())
    }
}

/// Which action types each phase accepts from a bot.
fn allowed_in(phase: TurnPhase, action: &Action) -> MoveResult<()> {
    let submitted = action.action_type();
    let ok = match phase {
        TurnPhase::PreRound => false,
        TurnPhase::Action => !matches!(submitted, ActionType::Aim),
        TurnPhase::Aim => matches!(submitted, ActionType::Aim),
    };
    if ok {
        Ok(())
    } else {
        Err(InvalidMove::WrongPhase { submitted, phase })
    }
}
