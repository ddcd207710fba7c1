use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The flow a reminder mail belongs to. Several reminder flows share the
/// same ledger table, so every record carries the kind that produced it and
/// each flow only ever queries its own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    PendingBookingConfirmation,
    BookingReview,
}

impl ReminderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingBookingConfirmation => "pending_booking_confirmation",
            Self::BookingReview => "booking_review",
        }
    }
}

impl Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidReminderKindError {
    #[error("Reminder kind: {0} is not known")]
    Unknown(String),
}

impl FromStr for ReminderKind {
    type Err = InvalidReminderKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_booking_confirmation" => Ok(Self::PendingBookingConfirmation),
            "booking_review" => Ok(Self::BookingReview),
            _ => Err(InvalidReminderKindError::Unknown(s.to_string())),
        }
    }
}

/// One sent reminder. Records are written exactly once after a successful
/// send and are never updated or deleted: they are both the audit trail and
/// the dedup fence that keeps a booking from being reminded twice for the
/// same threshold. A record at `elapsed_minutes` E also fences every
/// threshold below E for the same booking and kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderRecord {
    pub id: ID,
    pub booking_id: ID,
    pub kind: ReminderKind,
    /// How long the booking had been awaiting confirmation, in minutes,
    /// when the reminder was sent
    pub elapsed_minutes: i64,
    pub created: DateTime<Utc>,
}

impl ReminderRecord {
    pub fn new(booking_id: ID, kind: ReminderKind, elapsed_minutes: i64, created: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            booking_id,
            kind,
            elapsed_minutes,
            created,
        }
    }
}

impl Entity<ID> for ReminderRecord {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reminder_kind_roundtrips_through_str() {
        for kind in [
            ReminderKind::PendingBookingConfirmation,
            ReminderKind::BookingReview,
        ] {
            assert_eq!(kind.as_str().parse::<ReminderKind>().unwrap(), kind);
        }
        assert!("send_invoice".parse::<ReminderKind>().is_err());
    }
}
