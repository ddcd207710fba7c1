use super::IMailerService;
use crate::config::SmtpConfig;
use avtale_domain::BookingReminderEvent;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

/// Delivers reminder notifications to the organizer's mailbox over SMTP
pub struct SmtpMailerService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailerService {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.relay)?
            .port(config.port)
            .credentials(credentials)
            .build();
        let sender = config.sender.parse::<Mailbox>()?;
        Ok(Self { transport, sender })
    }
}

fn render_subject(event: &BookingReminderEvent) -> String {
    let t = &event.organizer.language.translator;
    format!("{}: {}", t.t("event_awaiting_approval_subject"), event.title)
}

fn render_body(event: &BookingReminderEvent) -> String {
    let t = &event.organizer.language.translator;
    let mut body = format!(
        "{} {},\n\n{}\n\n{}: {}\n{}: {} - {}\n",
        t.t("hi"),
        event.organizer.name,
        t.t("event_awaiting_approval"),
        t.t("event_type"),
        event.event_type,
        t.t("when"),
        event.start_time,
        event.end_time,
    );
    if !event.location.is_empty() {
        body.push_str(&format!("{}: {}\n", t.t("where"), event.location));
    }
    for attendee in &event.attendees {
        body.push_str(&format!(
            "{}: {} <{}>\n",
            t.t("invitee"),
            attendee.name,
            attendee.email
        ));
    }
    if let Some(description) = &event.description {
        body.push_str(&format!("\n{}\n", description));
    }
    if let Some(inputs) = &event.custom_inputs {
        for (key, value) in inputs {
            body.push_str(&format!("{}: {}\n", key, value));
        }
    }
    body.push_str(&format!("\n{}\n", t.t("confirm_or_reject_request")));
    body
}

#[async_trait::async_trait]
impl IMailerService for SmtpMailerService {
    async fn send_confirmation_reminder(&self, event: &BookingReminderEvent) -> anyhow::Result<()> {
        let to = format!("{} <{}>", event.organizer.name, event.organizer.email)
            .parse::<Mailbox>()?;
        let email = Message::builder()
            .from(self.sender.clone())
            .to(to)
            .subject(render_subject(event))
            .header(ContentType::TEXT_PLAIN)
            .body(render_body(event))?;

        self.transport.send(email).await?;
        info!(
            "Confirmation reminder sent to organizer: {}",
            event.organizer.email
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avtale_domain::{EventLanguage, EventPerson, Translator};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn translator() -> Translator {
        let mut phrases = HashMap::new();
        phrases.insert(
            "event_awaiting_approval_subject".to_string(),
            "Booking still waiting for your approval".to_string(),
        );
        phrases.insert("hi".to_string(), "Hi".to_string());
        phrases.insert("where".to_string(), "Where".to_string());
        phrases.insert("invitee".to_string(), "Invitee".to_string());
        Translator::new("en", Arc::new(phrases))
    }

    fn person(email: &str, name: &str) -> EventPerson {
        EventPerson {
            email: email.into(),
            name: name.into(),
            timezone: chrono_tz::UTC,
            language: EventLanguage {
                translator: translator(),
                locale: "en".into(),
            },
        }
    }

    fn event() -> BookingReminderEvent {
        BookingReminderEvent {
            uid: "booking-uid".into(),
            event_type: "30 min intro".into(),
            title: "30 min intro".into(),
            description: Some("Quick walkthrough".into()),
            custom_inputs: None,
            location: "Oslo HQ".into(),
            start_time: "2021-02-24T12:00:00+00:00".into(),
            end_time: "2021-02-24T12:30:00+00:00".into(),
            organizer: person("jane@example.org", "Jane"),
            attendees: vec![person("ola@example.org", "Ola Nordmann")],
            destination_calendar: None,
        }
    }

    #[test]
    fn subject_is_phrased_in_the_organizers_locale() {
        assert_eq!(
            render_subject(&event()),
            "Booking still waiting for your approval: 30 min intro"
        );
    }

    #[test]
    fn body_lists_location_attendees_and_description() {
        let body = render_body(&event());
        assert!(body.starts_with("Hi Jane,"));
        assert!(body.contains("Where: Oslo HQ"));
        assert!(body.contains("Invitee: Ola Nordmann <ola@example.org>"));
        assert!(body.contains("Quick walkthrough"));
    }

    #[test]
    fn body_skips_the_location_line_when_empty() {
        let mut event = event();
        event.location = String::new();
        assert!(!render_body(&event).contains("Where:"));
    }
}
