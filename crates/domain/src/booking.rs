use crate::shared::entity::{Entity, ID};
use avtale_utils::create_random_secret;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

const BOOKING_UID_LEN: usize = 21;

/// Where a booking is in its confirmation lifecycle. Only `Pending`
/// bookings are eligible for confirmation reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidBookingStatusError {
    #[error("Booking status: {0} is not known")]
    Unknown(String),
}

impl FromStr for BookingStatus {
    type Err = InvalidBookingStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "rejected" => Ok(Self::Rejected),
            _ => Err(InvalidBookingStatusError::Unknown(s.to_string())),
        }
    }
}

/// Reference to the calendar a confirmed booking should be written to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDestination {
    pub integration: String,
    pub external_id: String,
}

/// Projection of the user that owns the booked event type and has to
/// confirm or reject the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organizer {
    pub email: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub timezone: Option<Tz>,
    pub locale: Option<String>,
    pub destination_calendar: Option<CalendarDestination>,
}

impl Organizer {
    /// The name shown in notifications. The profile name wins, the login
    /// username is the fallback.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.username.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendee {
    pub name: String,
    pub email: String,
    pub timezone: Tz,
    pub locale: Option<String>,
}

/// A booking request made against an organizer's calendar. The reminder
/// dispatcher only ever reads bookings; they are created and moved out of
/// `Pending` by the booking flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: ID,
    /// Correlation uid shared with clients and notification payloads
    pub uid: String,
    pub status: BookingStatus,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Answers the invitee gave to the organizer's custom booking questions
    pub custom_inputs: Option<serde_json::Value>,
    pub created: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub organizer: Organizer,
    pub attendees: Vec<Attendee>,
    pub destination_calendar: Option<CalendarDestination>,
}

impl Booking {
    pub fn new(
        title: &str,
        organizer: Organizer,
        created: DateTime<Utc>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Default::default(),
            uid: create_random_secret(BOOKING_UID_LEN),
            status: BookingStatus::Pending,
            title: title.to_string(),
            description: None,
            location: None,
            custom_inputs: None,
            created,
            start_time,
            end_time,
            organizer,
            attendees: Vec::new(),
            destination_calendar: None,
        }
    }
}

impl Entity<ID> for Booking {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn organizer() -> Organizer {
        Organizer {
            email: "jane@example.org".into(),
            name: None,
            username: None,
            timezone: Some(chrono_tz::UTC),
            locale: None,
            destination_calendar: None,
        }
    }

    #[test]
    fn organizer_display_name_prefers_profile_name() {
        let mut organizer = organizer();
        organizer.name = Some("Jane Doe".into());
        organizer.username = Some("jane".into());
        assert_eq!(organizer.display_name(), Some("Jane Doe"));
    }

    #[test]
    fn organizer_display_name_falls_back_to_username() {
        let mut organizer = organizer();
        organizer.username = Some("jane".into());
        assert_eq!(organizer.display_name(), Some("jane"));
    }

    #[test]
    fn organizer_without_any_name_has_no_display_name() {
        assert_eq!(organizer().display_name(), None);
    }

    #[test]
    fn booking_status_roundtrips_through_str() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert!("tentative".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn new_bookings_are_pending_with_a_uid() {
        let now = Utc::now();
        let booking = Booking::new("30 min intro", organizer(), now, now, now);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.uid.len(), 21);
    }
}
