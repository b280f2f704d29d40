//! Turn driver tests: phase sequencing, pre-round ordering, visibility,
//! and recovery from bad bot decisions.

mod common;

use std::time::Duration;

use common::*;
use gcbc::{
    Action, Bot, DeckState, EngineConfig, EquipmentCard, EquipmentConsumption, GameEngine,
    IntegrityCard, PlayerHealth, PlayerId, RandomBot, TurnPhase, UpdateId, UpdateKind,
    UpdatePayload, WinCondition,
};

fn id_of(engine: &GameEngine, payload: &UpdatePayload) -> UpdateId {
    engine
        .history()
        .iter()
        .find(|u| u.payload == *payload)
        .map(|u| u.id)
        .unwrap()
}

fn count_kind(engine: &GameEngine, kind: UpdateKind) -> usize {
    engine.history().iter().filter(|u| u.kind() == kind).count()
}

/// Every bot is told its own hand, and only its own, before play starts.
#[test]
fn test_initial_hands_are_private() {
    let bots = idle_bots(4);
    let logs: Vec<_> = bots.iter().map(ScriptedBot::log).collect();
    let engine = engine(standard_table(), standard_deck(), boxed(bots));

    for (seat, log) in logs.iter().enumerate() {
        let log = log.borrow();
        assert_eq!(log.len(), 1);
        let expected = engine.context().table.player(p(seat as u8)).unwrap().card_values();
        assert_eq!(log[0].payload, UpdatePayload::Hand(expected));
    }
}

/// An idle round emits exactly the three phase starts and two passes.
#[test]
fn test_idle_round_sequence() {
    let mut engine = engine(standard_table(), standard_deck(), boxed(idle_bots(4)));
    assert_eq!(engine.play_round(), None);

    assert_eq!(
        public_payloads(&engine),
        vec![
            UpdatePayload::PhaseStart(TurnPhase::PreRound),
            UpdatePayload::PhaseStart(TurnPhase::Action),
            UpdatePayload::Action(Action::pass(p(0))),
            UpdatePayload::PhaseStart(TurnPhase::Aim),
            UpdatePayload::Action(Action::pass(p(0))),
        ]
    );
    assert_eq!(engine.context().current_player, p(1));
    assert_eq!(engine.context().phase, TurnPhase::Aim);
}

/// An Aim submitted during the action phase is rejected and replaced by a Pass.
#[test]
fn test_aim_in_action_phase_becomes_pass() {
    let mut bots = idle_bots(4);
    bots[0] = ScriptedBot::new(p(0)).act(Action::aim(p(0), p(1)));
    let mut table = standard_table();
    table.player_mut(p(0)).unwrap().gun.arm(p(2));
    let mut engine = engine(table, standard_deck(), boxed(bots));
    let before = engine.context().clone();

    engine.run_action();

    let ctx = engine.context();
    assert_eq!(ctx.table, before.table);
    assert_eq!(ctx.deck, before.deck);
    assert_eq!(ctx.current_player, before.current_player);

    let aim = UpdatePayload::Action(Action::aim(p(0), p(1)));
    let aim_id = id_of(&engine, &aim);
    assert_eq!(
        public_payloads(&engine),
        vec![
            UpdatePayload::PhaseStart(TurnPhase::Action),
            aim,
            UpdatePayload::Rollback(aim_id),
            UpdatePayload::Action(Action::pass(p(0))),
        ]
    );
}

/// A failing action is announced, rolled back, and followed by a Pass.
#[test]
fn test_invalid_action_rolls_back_and_passes() {
    let mut bots = idle_bots(4);
    bots[0] = ScriptedBot::new(p(0)).act(Action::shoot(p(0), p(1)));
    let mut engine = engine(standard_table(), standard_deck(), boxed(bots));

    engine.run_action();

    let shoot = UpdatePayload::Action(Action::shoot(p(0), p(1)));
    let shoot_id = id_of(&engine, &shoot);
    let public = public_payloads(&engine);
    assert_eq!(public[1..], [shoot, UpdatePayload::Rollback(shoot_id), UpdatePayload::Action(Action::pass(p(0)))]);
    assert_eq!(engine.context().table.player(p(1)).unwrap().health, PlayerHealth::Alive);
}

/// A bot cannot act on another player's behalf.
#[test]
fn test_actor_mismatch_rejected() {
    let mut bots = idle_bots(4);
    bots[0] = ScriptedBot::new(p(0)).act(Action::investigate(p(1), p(2), 0));
    let mut engine = engine(standard_table(), standard_deck(), boxed(bots));

    engine.run_action();

    assert_eq!(count_kind(&engine, UpdateKind::RollbackIncluding), 1);
    assert_eq!(count_kind(&engine, UpdateKind::InvestigationResult), 0);
    assert_eq!(
        engine.history().last().map(|u| u.payload.clone()),
        Some(UpdatePayload::Action(Action::pass(p(0))))
    );
}

/// Equip flips the chosen card publicly and tells only the actor what was drawn.
#[test]
fn test_equip_visibility() {
    let mut bots = idle_bots(4);
    bots[0] = ScriptedBot::new(p(0)).act(Action::equip(p(0), 1));
    let logs: Vec<_> = bots.iter().map(ScriptedBot::log).collect();
    let mut engine = engine(standard_table(), standard_deck(), boxed(bots));

    engine.run_action();

    let state = engine.context().table.player(p(0)).unwrap();
    assert_eq!(state.equipment, Some(EquipmentCard::Swap));
    assert!(state.integrity_cards[1].face_up);
    assert_eq!(engine.context().deck.equipment_count(), 4);

    let equip = Action::equip(p(0), 1);
    assert_eq!(
        public_payloads(&engine),
        vec![
            UpdatePayload::PhaseStart(TurnPhase::Action),
            UpdatePayload::Action(equip),
            UpdatePayload::CardFlip { index: 1, value: IntegrityCard::GoodCop, trigger: equip },
        ]
    );

    let drawn = UpdatePayload::EquipmentDrawn(EquipmentCard::Swap);
    assert!(logs[0].borrow().iter().any(|u| u.payload == drawn));
    for log in &logs[1..] {
        assert!(!log.borrow().iter().any(|u| u.payload == drawn));
    }
}

/// No CardFlip is published when every card was already face-up.
#[test]
fn test_no_flip_event_when_all_face_up() {
    let mut table = standard_table();
    for i in 0..3 {
        table.player_mut(p(0)).unwrap().reveal(i);
    }
    let mut bots = idle_bots(4);
    bots[0] = ScriptedBot::new(p(0)).act(Action::arm_and_aim(p(0), p(3), 2));
    let mut engine = engine(table, standard_deck(), boxed(bots));

    engine.run_action();

    assert!(engine.context().table.player(p(0)).unwrap().gun.has_gun());
    assert_eq!(count_kind(&engine, UpdateKind::CardFlip), 0);
}

/// Investigation results reach only the investigator.
#[test]
fn test_investigate_is_private() {
    let mut bots = idle_bots(4);
    bots[0] = ScriptedBot::new(p(0)).act(Action::investigate(p(0), p(1), 0));
    let logs: Vec<_> = bots.iter().map(ScriptedBot::log).collect();
    let mut engine = engine(standard_table(), standard_deck(), boxed(bots));

    engine.run_action();

    let result = UpdatePayload::InvestigationResult { target: p(1), index: 0, value: IntegrityCard::Kingpin };
    assert!(logs[0].borrow().iter().any(|u| u.payload == result));
    assert!(!logs[1].borrow().iter().any(|u| u.payload == result));
}

/// An armed player may re-aim; anything else in the aim phase is a Pass.
#[test]
fn test_aim_phase() {
    let mut table = standard_table();
    table.player_mut(p(0)).unwrap().gun.arm(p(1));

    let mut bots = idle_bots(4);
    bots[0] = ScriptedBot::new(p(0))
        .aim_with(Action::aim(p(0), p(2)))
        .aim_with(Action::shoot(p(0), p(2)));
    let mut engine = engine(table, standard_deck(), boxed(bots));

    engine.run_aim();
    assert_eq!(engine.context().table.player(p(0)).unwrap().gun.aimed_at(), Some(p(2)));

    engine.run_aim();
    assert_eq!(engine.context().table.player(p(2)).unwrap().health, PlayerHealth::Alive);
    assert_eq!(count_kind(&engine, UpdateKind::RollbackIncluding), 1);
    assert_eq!(
        engine.history().last().map(|u| u.payload.clone()),
        Some(UpdatePayload::Action(Action::pass(p(0))))
    );
}

/// Unarmed players are not asked to aim.
#[test]
fn test_unarmed_aim_phase_passes() {
    let mut bots = idle_bots(4);
    bots[0] = ScriptedBot::new(p(0)).aim_with(Action::aim(p(0), p(1)));
    let mut engine = engine(standard_table(), standard_deck(), boxed(bots));

    engine.run_aim();

    assert_eq!(
        public_payloads(&engine),
        vec![
            UpdatePayload::PhaseStart(TurnPhase::Aim),
            UpdatePayload::Action(Action::pass(p(0))),
        ]
    );
    assert_eq!(count_kind(&engine, UpdateKind::RollbackIncluding), 0);
}

/// Polygraph: equipment returns to the deck and both participants see both hands.
#[test]
fn test_polygraph_scenario() {
    let mut table = standard_table();
    equip(&mut table, p(0), EquipmentCard::Polygraph);
    let mut bots = idle_bots(4);
    bots[0] = ScriptedBot::new(p(0)).consume(EquipmentConsumption::Polygraph { user: p(0), target: p(2) });
    let logs: Vec<_> = bots.iter().map(ScriptedBot::log).collect();
    let mut engine = engine(table, DeckState::new([EquipmentCard::Taser], 2), boxed(bots));

    engine.run_pre_round();

    let ctx = engine.context();
    assert_eq!(ctx.table.player(p(0)).unwrap().equipment, None);
    assert!(ctx.deck.contains_equipment(EquipmentCard::Polygraph));
    assert_eq!(ctx.deck.equipment_count(), 2);

    let result = UpdatePayload::PolygraphResult {
        user: p(0),
        target: p(2),
        user_hand: vec![IntegrityCard::Agent, IntegrityCard::GoodCop, IntegrityCard::GoodCop],
        target_hand: vec![IntegrityCard::GoodCop, IntegrityCard::GoodCop, IntegrityCard::BadCop],
    };
    for (seat, log) in logs.iter().enumerate() {
        let saw = log.borrow().iter().any(|u| u.payload == result);
        assert_eq!(saw, seat == 0 || seat == 2, "seat {seat}");
    }
}

/// Swap sends fresh private hands to both affected players.
#[test]
fn test_swap_sends_new_hands() {
    let mut table = standard_table();
    equip(&mut table, p(0), EquipmentCard::Swap);
    let mut bots = idle_bots(4);
    bots[0] = ScriptedBot::new(p(0)).consume(EquipmentConsumption::Swap {
        user: p(0),
        player_a: p(1),
        card_a: 0,
        player_b: p(2),
        card_b: 0,
    });
    let logs: Vec<_> = bots.iter().map(ScriptedBot::log).collect();
    let mut engine = engine(table, standard_deck(), boxed(bots));

    engine.run_pre_round();

    let last_hand = |seat: usize| {
        logs[seat]
            .borrow()
            .iter()
            .rev()
            .find_map(|u| match &u.payload {
                UpdatePayload::Hand(hand) => Some(hand.clone()),
                _ => None,
            })
            .unwrap()
    };
    assert_eq!(last_hand(1), vec![IntegrityCard::GoodCop, IntegrityCard::BadCop, IntegrityCard::BadCop]);
    assert_eq!(last_hand(2), vec![IntegrityCard::Kingpin, IntegrityCard::GoodCop, IntegrityCard::BadCop]);
    assert_eq!(count_kind(&engine, UpdateKind::Hand), 4 + 2);
}

/// A failed proposer is blacklisted for the rest of the round only.
#[test]
fn test_pre_round_blacklist_is_per_round() {
    let bogus = EquipmentConsumption::Blackmail { user: p(1), target: p(0) };
    let mut bots = idle_bots(4);
    bots[1] = ScriptedBot::new(p(1)).consume(bogus).consume(bogus);
    let mut engine = engine(standard_table(), standard_deck(), boxed(bots));

    engine.run_pre_round();
    assert_eq!(count_kind(&engine, UpdateKind::EquipmentCard), 1);
    assert_eq!(count_kind(&engine, UpdateKind::RollbackIncluding), 1);

    engine.run_pre_round();
    assert_eq!(count_kind(&engine, UpdateKind::EquipmentCard), 2);
    assert_eq!(count_kind(&engine, UpdateKind::RollbackIncluding), 2);
}

/// The quickest proposal is applied first; the slower bot goes in the next pass.
#[test]
fn test_pre_round_fastest_first() {
    let mut table = standard_table();
    equip(&mut table, p(0), EquipmentCard::Blackmail);
    equip(&mut table, p(1), EquipmentCard::Blackmail);

    let slow = EquipmentConsumption::Blackmail { user: p(0), target: p(2) };
    let fast = EquipmentConsumption::Blackmail { user: p(1), target: p(3) };
    let mut bots = idle_bots(4);
    bots[0] = ScriptedBot::new(p(0)).consume(slow).slow(Duration::from_millis(40));
    bots[1] = ScriptedBot::new(p(1)).consume(fast);
    let mut engine = engine(table, standard_deck(), boxed(bots));

    engine.run_pre_round();

    let applied: Vec<_> = engine
        .history()
        .iter()
        .filter_map(|u| match u.payload {
            UpdatePayload::Equipment(c) => Some(c),
            _ => None,
        })
        .collect();
    assert_eq!(applied, vec![fast, slow]);
    assert_eq!(count_kind(&engine, UpdateKind::RollbackIncluding), 0);
}

/// Shooting a wounded Agent ends the game at the end of the round.
#[test]
fn test_shoot_wins_game() {
    let mut table = table(&[
        [IntegrityCard::GoodCop, IntegrityCard::GoodCop, IntegrityCard::BadCop],
        [IntegrityCard::Agent, IntegrityCard::GoodCop, IntegrityCard::BadCop],
        [IntegrityCard::Kingpin, IntegrityCard::BadCop, IntegrityCard::BadCop],
    ]);
    table.player_mut(p(0)).unwrap().gun.arm(p(1));
    table.player_mut(p(1)).unwrap().health = PlayerHealth::Wounded;

    let mut bots = idle_bots(3);
    bots[0] = ScriptedBot::new(p(0)).act(Action::shoot(p(0), p(1)));
    let mut engine = engine(table, DeckState::new([], 0), boxed(bots));

    assert_eq!(engine.play_round(), Some(WinCondition::AgentDead));
    let ctx = engine.context();
    assert_eq!(ctx.table.player(p(1)).unwrap().health, PlayerHealth::Dead);
    assert_eq!(ctx.deck.guns(), 1);
    assert!(!ctx.table.player(p(0)).unwrap().gun.has_gun());
    // Turn order skips the seat that just died.
    assert_eq!(ctx.current_player, p(2));
}

/// Dead players are skipped when the turn advances.
#[test]
fn test_turn_order_skips_dead() {
    let mut table = standard_table();
    table.player_mut(p(1)).unwrap().health = PlayerHealth::Wounded;
    table.player_mut(p(2)).unwrap().health = PlayerHealth::Dead;
    let mut engine = engine(table, standard_deck(), boxed(idle_bots(4)));

    engine.play_round();
    assert_eq!(engine.context().current_player, p(1));
    engine.play_round();
    assert_eq!(engine.context().current_player, p(3));
    engine.play_round();
    assert_eq!(engine.context().current_player, p(0));
}

fn random_bots(n: usize, seed: u64) -> Vec<Box<dyn Bot>> {
    PlayerId::all(n)
        .map(|p| Box::new(RandomBot::new(p, seed * 31 + u64::from(p.0))) as Box<dyn Bot>)
        .collect()
}

/// Random games always finish, conserve guns and equipment, and only roll
/// back announced attempts.
#[test]
fn test_random_games_hold_invariants() {
    for n in 2..=8 {
        for seed in 0..4 {
            let config = EngineConfig::new().with_player_count(n).with_seed(seed).with_max_rounds(200);
            let guns = config.gun_count();
            let mut engine = GameEngine::new_game(config, random_bots(n, seed)).unwrap();
            let summary = engine.play_game();
            assert!(summary.rounds_played >= 1 && summary.rounds_played <= 200);

            let ctx = engine.context();
            let held_guns = ctx.table.iter().filter(|(_, s)| s.gun.has_gun()).count() as u32;
            assert_eq!(ctx.deck.guns() + held_guns, guns, "{n} players, seed {seed}");

            let held_equipment = ctx.table.iter().filter(|(_, s)| s.equipment.is_some()).count();
            assert_eq!(ctx.deck.equipment_count() + held_equipment, EquipmentCard::PLAYABLE.len());

            for (_, state) in ctx.table.iter() {
                if !state.gun.has_gun() {
                    assert_eq!(state.gun.aimed_at(), None);
                }
            }

            for update in engine.history() {
                if let UpdatePayload::Rollback(id) = update.payload {
                    let undone = engine.bots().bus().find(id).unwrap();
                    assert!(undone.id < update.id);
                    assert!(undone.is_public());
                    assert!(matches!(
                        undone.kind(),
                        UpdateKind::Action(_) | UpdateKind::EquipmentCard
                    ));
                }
            }
        }
    }
}
