//! Update records delivered to bots.
//!
//! Every update shares the shape `{id, audience, actor, payload}`. The id is
//! unique for the life of a game so that a rollback marker can name exactly
//! which attempt it undid.

use serde::{Deserialize, Serialize};

use crate::core::{CardIndex, EquipmentCard, IntegrityCard, PlayerId};
use crate::engine::TurnPhase;
use crate::operators::{Action, ActionType, EquipmentConsumption};

/// Identity of an update. Ids increase monotonically and are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UpdateId(pub u64);

impl std::fmt::Display for UpdateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Who may see an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Audience {
    Public,
    Private(PlayerId),
}

impl Audience {
    /// Whether `player` receives updates with this audience.
    #[must_use]
    pub fn includes(self, player: PlayerId) -> bool {
        match self {
            Audience::Public => true,
            Audience::Private(p) => p == player,
        }
    }
}

/// Coarse tag for an update, independent of its data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateKind {
    Action(ActionType),
    EquipmentCard,
    CardFlip,
    TurnPhaseStart,
    InvestigationResult,
    EquipmentDrawn,
    PolygraphResult,
    Hand,
    RollbackIncluding,
}

/// Structured data carried by an update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdatePayload {
    /// An action attempt, public.
    Action(Action),

    /// An equipment consumption attempt, public.
    Equipment(EquipmentConsumption),

    /// A face-down card turned face-up as a side effect of `trigger`.
    CardFlip {
        index: CardIndex,
        value: IntegrityCard,
        trigger: Action,
    },

    PhaseStart(TurnPhase),

    /// Private to the investigator.
    InvestigationResult {
        target: PlayerId,
        index: CardIndex,
        value: IntegrityCard,
    },

    /// Private to the player who drew it.
    EquipmentDrawn(EquipmentCard),

    /// Private to both participants: true hands of both.
    PolygraphResult {
        user: PlayerId,
        target: PlayerId,
        user_hand: Vec<IntegrityCard>,
        target_hand: Vec<IntegrityCard>,
    },

    /// Private to the holder: true values of their own cards.
    Hand(Vec<IntegrityCard>),

    /// Everything from the named update onwards was undone.
    Rollback(UpdateId),
}

impl UpdatePayload {
    #[must_use]
    pub fn kind(&self) -> UpdateKind {
        match self {
            UpdatePayload::Action(action) => UpdateKind::Action(action.action_type()),
            UpdatePayload::Equipment(_) => UpdateKind::EquipmentCard,
            UpdatePayload::CardFlip { .. } => UpdateKind::CardFlip,
            UpdatePayload::PhaseStart(_) => UpdateKind::TurnPhaseStart,
            UpdatePayload::InvestigationResult { .. } => UpdateKind::InvestigationResult,
            UpdatePayload::EquipmentDrawn(_) => UpdateKind::EquipmentDrawn,
            UpdatePayload::PolygraphResult { .. } => UpdateKind::PolygraphResult,
            UpdatePayload::Hand(_) => UpdateKind::Hand,
            UpdatePayload::Rollback(_) => UpdateKind::RollbackIncluding,
        }
    }
}

/// One entry in the notification log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub id: UpdateId,
    pub audience: Audience,
    /// Player the update is about. `None` for phase starts and rollbacks.
    pub actor: Option<PlayerId>,
    pub payload: UpdatePayload,
}

impl Update {
    #[must_use]
    pub fn kind(&self) -> UpdateKind {
        self.payload.kind()
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        self.audience == Audience::Public
    }
}
