//! Dealing a new game.
//!
//! ## Integrity deck
//!
//! One Kingpin, one Agent, and enough cops to give every seat three cards.
//! Half the table (rounded down) is bad: with `bad = n / 2` and
//! `good = n - bad`, the deck holds `good * 3 - 1` good cops and
//! `bad * 3 - 1` bad cops.
//!
//! | Players | Good cops | Bad cops |
//! |---|---|---|
//! | 4 | 5 | 5 |
//! | 5 | 8 | 5 |
//! | 7 | 11 | 8 |

use crate::core::{
    DeckState, EngineConfig, EquipmentCard, GameError, GameResult, GameRng, IntegrityCard,
    PlayerGameState, PlayerId, TableState, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS,
};

use super::context::EngineContext;

/// Unshuffled integrity deck for an `n`-player table.
#[must_use]
pub fn integrity_cards(player_count: usize) -> Vec<IntegrityCard> {
    let bad = player_count / 2;
    let good = player_count - bad;

    let mut cards = Vec::with_capacity(player_count * HAND_SIZE);
    cards.push(IntegrityCard::Kingpin);
    cards.push(IntegrityCard::Agent);
    cards.extend(std::iter::repeat(IntegrityCard::GoodCop).take((good * HAND_SIZE).saturating_sub(1)));
    cards.extend(std::iter::repeat(IntegrityCard::BadCop).take((bad * HAND_SIZE).saturating_sub(1)));
    cards
}

/// Shuffle the integrity deck and deal three face-down cards to each seat.
pub fn build_game_state(player_count: usize, rng: &mut GameRng) -> GameResult<TableState> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return Err(GameError::InvalidPlayerCount {
            got: player_count,
            min: MIN_PLAYERS,
            max: MAX_PLAYERS,
        });
    }

    let mut cards = integrity_cards(player_count);
    rng.shuffle(&mut cards);

    Ok(PlayerId::all(player_count)
        .zip(cards.chunks_exact(HAND_SIZE))
        .map(|(player, hand)| {
            let hand: [IntegrityCard; HAND_SIZE] = std::array::from_fn(|i| hand[i]);
            (player, PlayerGameState::dealt(hand))
        })
        .collect())
}

/// Shuffled equipment deck plus the loose gun pool.
pub fn build_deck(guns: u32, rng: &mut GameRng) -> DeckState {
    let mut cards = EquipmentCard::PLAYABLE.to_vec();
    rng.shuffle(&mut cards);
    DeckState::new(cards, guns)
}

/// Deal a complete game from a config.
///
/// The integrity and equipment decks come from separate RNG streams derived
/// from `config.seed`.
pub fn new_context(config: &EngineConfig) -> GameResult<EngineContext> {
    config.validate()?;

    let rng = GameRng::new(config.seed);
    let table = build_game_state(config.player_count, &mut rng.for_context("integrity"))?;
    let deck = build_deck(config.gun_count(), &mut rng.for_context("equipment"));

    Ok(EngineContext::new(table, deck))
}
