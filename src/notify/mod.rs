//! Notifications: update records, the sink trait, and the update log.

pub mod bus;
pub mod update;

pub use bus::{changed_hands, NotificationBus, UpdateSink};
pub use update::{Audience, Update, UpdateId, UpdateKind, UpdatePayload};
