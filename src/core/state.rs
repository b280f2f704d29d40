//! Board state: per-player records, the table, and the deck.
//!
//! ## TableState
//!
//! Mapping from seat to `PlayerGameState`; the single source of truth for
//! everything on the board. Backed by `im::OrdMap`, so cloning is O(1) and
//! operators can build the next state copy-on-write.
//!
//! ## DeckState
//!
//! Remaining equipment cards (drawn from the back, returned to the front)
//! and the loose gun pool.
//!
//! Both support `opaque_state()`, the only projection bots ever see.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::cards::{EquipmentCard, IntegrityCard};
use super::player::PlayerId;

/// Index into a player's integrity cards.
pub type CardIndex = usize;

/// Integrity cards dealt to each player.
pub const HAND_SIZE: usize = 3;

/// A player's integrity cards, in seat order.
pub type Hand = SmallVec<[PlayerIntegrityCardState; HAND_SIZE]>;

/// One integrity card and whether it has been revealed.
///
/// Once face-up a card never turns face-down again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerIntegrityCardState {
    pub card: IntegrityCard,
    pub face_up: bool,
}

impl PlayerIntegrityCardState {
    #[must_use]
    pub const fn face_down(card: IntegrityCard) -> Self {
        Self { card, face_up: false }
    }

    #[must_use]
    pub const fn face_up(card: IntegrityCard) -> Self {
        Self { card, face_up: true }
    }
}

/// Gun ownership and aim.
///
/// Fields are private: `aimed_at` can only be `Some` while `has_gun` is true,
/// and the mutators below are the only way to change either. Deserialization
/// rejects records that break this.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GunStateRecord")]
pub struct PlayerGunState {
    has_gun: bool,
    aimed_at: Option<PlayerId>,
}

#[derive(Deserialize)]
struct GunStateRecord {
    has_gun: bool,
    aimed_at: Option<PlayerId>,
}

impl TryFrom<GunStateRecord> for PlayerGunState {
    type Error = &'static str;

    fn try_from(record: GunStateRecord) -> Result<Self, Self::Error> {
        match (record.has_gun, record.aimed_at) {
            (false, Some(_)) => Err("aimed_at set without a gun"),
            (has_gun, aimed_at) => Ok(Self { has_gun, aimed_at }),
        }
    }
}

impl PlayerGunState {
    #[must_use]
    pub const fn unarmed() -> Self {
        Self { has_gun: false, aimed_at: None }
    }

    /// A held gun, optionally pointed at someone.
    #[must_use]
    pub const fn armed(aimed_at: Option<PlayerId>) -> Self {
        Self { has_gun: true, aimed_at }
    }

    #[must_use]
    pub const fn has_gun(&self) -> bool {
        self.has_gun
    }

    #[must_use]
    pub const fn aimed_at(&self) -> Option<PlayerId> {
        self.aimed_at
    }

    /// Pick up a gun aimed at `target`.
    pub fn arm(&mut self, target: PlayerId) {
        self.has_gun = true;
        self.aimed_at = Some(target);
    }

    /// Point the held gun somewhere else.
    pub fn retarget(&mut self, target: PlayerId) {
        debug_assert!(self.has_gun, "retarget without a gun");
        if self.has_gun {
            self.aimed_at = Some(target);
        }
    }

    /// Give up the gun. Clears the aim as well.
    pub fn disarm(&mut self) {
        self.has_gun = false;
        self.aimed_at = None;
    }
}

/// Health track. Leaders go Alive -> Wounded -> Dead, everyone else dies
/// on the first shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerHealth {
    Dead,
    Alive,
    Wounded,
}

impl PlayerHealth {
    /// Wounded players are still alive.
    #[must_use]
    pub const fn is_alive(self) -> bool {
        !matches!(self, PlayerHealth::Dead)
    }
}

/// Everything the table knows about one player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerGameState {
    pub integrity_cards: Hand,
    pub gun: PlayerGunState,
    pub equipment: Option<EquipmentCard>,
    pub health: PlayerHealth,
}

impl PlayerGameState {
    /// A freshly dealt player: three face-down cards, no gun, no equipment.
    #[must_use]
    pub fn dealt(cards: [IntegrityCard; HAND_SIZE]) -> Self {
        Self {
            integrity_cards: cards
                .into_iter()
                .map(PlayerIntegrityCardState::face_down)
                .collect(),
            gun: PlayerGunState::unarmed(),
            equipment: None,
            health: PlayerHealth::Alive,
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    /// Whether any of this player's cards is `card`, face-up or not.
    #[must_use]
    pub fn holds(&self, card: IntegrityCard) -> bool {
        self.integrity_cards.iter().any(|c| c.card == card)
    }

    /// Holds the Agent or the Kingpin.
    #[must_use]
    pub fn is_leader(&self) -> bool {
        self.integrity_cards.iter().any(|c| c.card.is_leader())
    }

    #[must_use]
    pub fn all_face_up(&self) -> bool {
        self.integrity_cards.iter().all(|c| c.face_up)
    }

    /// True card values in seat order.
    #[must_use]
    pub fn card_values(&self) -> Vec<IntegrityCard> {
        self.integrity_cards.iter().map(|c| c.card).collect()
    }

    /// Turn a card face-up. Returns whether anything changed.
    pub fn reveal(&mut self, index: CardIndex) -> bool {
        match self.integrity_cards.get_mut(index) {
            Some(card) if !card.face_up => {
                card.face_up = true;
                true
            }
            _ => false,
        }
    }

    /// Resolve one shot against this player.
    pub fn take_shot(&mut self) {
        self.health = match (self.health, self.is_leader()) {
            (PlayerHealth::Alive, true) => PlayerHealth::Wounded,
            _ => PlayerHealth::Dead,
        };
    }

    /// What any other player is allowed to see of this one.
    #[must_use]
    pub fn opaque(&self) -> Self {
        Self {
            integrity_cards: self
                .integrity_cards
                .iter()
                .map(|c| {
                    if c.face_up {
                        *c
                    } else {
                        PlayerIntegrityCardState::face_down(IntegrityCard::Unknown)
                    }
                })
                .collect(),
            gun: self.gun,
            equipment: self.equipment.map(|_| EquipmentCard::Unknown),
            health: self.health,
        }
    }
}

/// The board: every seated player's state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    players: OrdMap<PlayerId, PlayerGameState>,
}

impl TableState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a player, replacing any previous record for that seat.
    pub fn insert(&mut self, player: PlayerId, state: PlayerGameState) {
        self.players.insert(player, state);
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerGameState> {
        self.players.get(&player)
    }

    pub fn player_mut(&mut self, player: PlayerId) -> Option<&mut PlayerGameState> {
        self.players.get_mut(&player)
    }

    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.contains_key(&player)
    }

    /// Seated and not dead. Unknown seats are never alive.
    #[must_use]
    pub fn is_alive(&self, player: PlayerId) -> bool {
        self.player(player).is_some_and(PlayerGameState::is_alive)
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Seats in ascending order.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &PlayerGameState)> + '_ {
        self.players.iter().map(|(p, s)| (*p, s))
    }

    pub fn alive_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.iter().filter(|(_, s)| s.is_alive()).map(|(p, _)| p)
    }

    /// Projection with face-down cards and held equipment hidden.
    #[must_use]
    pub fn opaque_state(&self) -> Self {
        Self {
            players: self.players.iter().map(|(p, s)| (*p, s.opaque())).collect(),
        }
    }
}

impl FromIterator<(PlayerId, PlayerGameState)> for TableState {
    fn from_iter<I: IntoIterator<Item = (PlayerId, PlayerGameState)>>(iter: I) -> Self {
        Self {
            players: iter.into_iter().collect(),
        }
    }
}

/// Equipment cards left to draw and the loose gun pool.
///
/// The top of the equipment deck is the back of the vector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckState {
    equipment_cards: Vector<EquipmentCard>,
    guns: u32,
}

impl DeckState {
    #[must_use]
    pub fn new(equipment_cards: impl IntoIterator<Item = EquipmentCard>, guns: u32) -> Self {
        Self {
            equipment_cards: equipment_cards.into_iter().collect(),
            guns,
        }
    }

    /// Cards bottom to top.
    pub fn equipment_cards(&self) -> impl Iterator<Item = EquipmentCard> + '_ {
        self.equipment_cards.iter().copied()
    }

    #[must_use]
    pub fn equipment_count(&self) -> usize {
        self.equipment_cards.len()
    }

    #[must_use]
    pub fn contains_equipment(&self, card: EquipmentCard) -> bool {
        self.equipment_cards.iter().any(|c| *c == card)
    }

    #[must_use]
    pub fn guns(&self) -> u32 {
        self.guns
    }

    /// Take a gun from the pool. Returns false if none are left.
    pub fn take_gun(&mut self) -> bool {
        if self.guns == 0 {
            return false;
        }
        self.guns -= 1;
        true
    }

    pub fn return_gun(&mut self) {
        self.guns += 1;
    }

    /// Draw from the top of the equipment deck.
    pub fn draw_equipment(&mut self) -> Option<EquipmentCard> {
        self.equipment_cards.pop_back()
    }

    /// Put a consumed card back at the bottom.
    pub fn return_equipment(&mut self, card: EquipmentCard) {
        self.equipment_cards.push_front(card);
    }

    /// Same size and gun count, every card hidden.
    #[must_use]
    pub fn opaque_state(&self) -> Self {
        Self {
            equipment_cards: self
                .equipment_cards
                .iter()
                .map(|_| EquipmentCard::Unknown)
                .collect(),
            guns: self.guns,
        }
    }
}
