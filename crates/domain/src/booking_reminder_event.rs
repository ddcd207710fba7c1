use crate::booking::{Booking, CalendarDestination};
use crate::shared::translation::Translator;
use chrono_tz::Tz;
use serde_json::{Map, Value};

/// Language block attached to every participant so the notification channel
/// can phrase its messages per recipient.
#[derive(Debug, Clone)]
pub struct EventLanguage {
    pub translator: Translator,
    pub locale: String,
}

#[derive(Debug, Clone)]
pub struct EventPerson {
    pub email: String,
    pub name: String,
    pub timezone: Tz,
    pub language: EventLanguage,
}

/// The payload handed to the notification channel for one pending booking.
/// Composed in full before anything is sent; a partially resolved payload
/// never leaves this module.
#[derive(Debug, Clone)]
pub struct BookingReminderEvent {
    pub uid: String,
    pub event_type: String,
    pub title: String,
    pub description: Option<String>,
    /// Only present when the booking's custom inputs form a key/value object
    pub custom_inputs: Option<Map<String, Value>>,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
    pub organizer: EventPerson,
    pub attendees: Vec<EventPerson>,
    pub destination_calendar: Option<CalendarDestination>,
}

impl BookingReminderEvent {
    /// Builds the payload from a validated booking. The organizer name and
    /// timezone are passed in separately because their presence has already
    /// been checked by the caller; `attendee_translators` must line up with
    /// `booking.attendees`.
    pub fn compose(
        booking: &Booking,
        organizer_name: &str,
        organizer_timezone: Tz,
        organizer_translator: Translator,
        attendee_translators: Vec<Translator>,
    ) -> Self {
        let attendees = booking
            .attendees
            .iter()
            .zip(attendee_translators)
            .map(|(attendee, translator)| EventPerson {
                email: attendee.email.clone(),
                name: attendee.name.clone(),
                timezone: attendee.timezone,
                language: EventLanguage {
                    locale: translator.locale().to_string(),
                    translator,
                },
            })
            .collect();

        Self {
            uid: booking.uid.clone(),
            event_type: booking.title.clone(),
            title: booking.title.clone(),
            description: booking.description.clone(),
            custom_inputs: match &booking.custom_inputs {
                Some(Value::Object(inputs)) => Some(inputs.clone()),
                _ => None,
            },
            location: booking.location.clone().unwrap_or_default(),
            start_time: booking.start_time.to_rfc3339(),
            end_time: booking.end_time.to_rfc3339(),
            organizer: EventPerson {
                email: booking.organizer.email.clone(),
                name: organizer_name.to_string(),
                timezone: organizer_timezone,
                language: EventLanguage {
                    locale: organizer_translator.locale().to_string(),
                    translator: organizer_translator,
                },
            },
            attendees,
            destination_calendar: booking
                .destination_calendar
                .clone()
                .or_else(|| booking.organizer.destination_calendar.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{Attendee, Organizer};
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn translator(locale: &str) -> Translator {
        Translator::new(locale, Arc::new(HashMap::new()))
    }

    fn booking() -> Booking {
        let organizer = Organizer {
            email: "jane@example.org".into(),
            name: Some("Jane".into()),
            username: None,
            timezone: Some(chrono_tz::UTC),
            locale: None,
            destination_calendar: Some(CalendarDestination {
                integration: "google_calendar".into(),
                external_id: "jane@example.org".into(),
            }),
        };
        let created = Utc.with_ymd_and_hms(2021, 2, 19, 9, 30, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2021, 2, 24, 12, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2021, 2, 24, 12, 30, 0).unwrap();
        let mut booking = Booking::new("30 min intro", organizer, created, start, end);
        booking.attendees = vec![Attendee {
            name: "Ola Nordmann".into(),
            email: "ola@example.org".into(),
            timezone: chrono_tz::Europe::Oslo,
            locale: Some("nb".into()),
        }];
        booking
    }

    fn compose(booking: &Booking) -> BookingReminderEvent {
        BookingReminderEvent::compose(
            booking,
            "Jane",
            chrono_tz::UTC,
            translator("en"),
            vec![translator("nb")],
        )
    }

    #[test]
    fn uses_the_title_as_both_event_type_and_title() {
        let event = compose(&booking());
        assert_eq!(event.event_type, "30 min intro");
        assert_eq!(event.title, "30 min intro");
    }

    #[test]
    fn formats_instants_as_rfc3339() {
        let event = compose(&booking());
        assert_eq!(event.start_time, "2021-02-24T12:00:00+00:00");
        assert_eq!(event.end_time, "2021-02-24T12:30:00+00:00");
    }

    #[test]
    fn missing_location_becomes_an_empty_string() {
        let mut booking = booking();
        booking.location = None;
        assert_eq!(compose(&booking).location, "");

        booking.location = Some("Oslo HQ".into());
        assert_eq!(compose(&booking).location, "Oslo HQ");
    }

    #[test]
    fn custom_inputs_are_kept_only_when_they_are_an_object() {
        let mut booking = booking();
        booking.custom_inputs = Some(json!({"Phone": "+47 123 45 678"}));
        let inputs = compose(&booking).custom_inputs.expect("Object inputs kept");
        assert_eq!(inputs.get("Phone"), Some(&json!("+47 123 45 678")));

        booking.custom_inputs = Some(json!(["free", "form"]));
        assert!(compose(&booking).custom_inputs.is_none());

        booking.custom_inputs = None;
        assert!(compose(&booking).custom_inputs.is_none());
    }

    #[test]
    fn booking_destination_calendar_wins_over_the_organizers() {
        let mut booking = booking();
        booking.destination_calendar = Some(CalendarDestination {
            integration: "office365_calendar".into(),
            external_id: "team@example.org".into(),
        });
        let destination = compose(&booking).destination_calendar.unwrap();
        assert_eq!(destination.integration, "office365_calendar");
    }

    #[test]
    fn falls_back_to_the_organizers_destination_calendar() {
        let event = compose(&booking());
        let destination = event.destination_calendar.unwrap();
        assert_eq!(destination.integration, "google_calendar");
    }

    #[test]
    fn attendee_blocks_carry_their_resolved_language() {
        let event = compose(&booking());
        assert_eq!(event.attendees.len(), 1);
        assert_eq!(event.attendees[0].language.locale, "nb");
        assert_eq!(event.attendees[0].timezone, chrono_tz::Europe::Oslo);
    }
}
