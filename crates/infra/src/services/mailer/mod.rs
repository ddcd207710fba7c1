mod inmemory;
mod smtp;

use avtale_domain::BookingReminderEvent;
pub use inmemory::InMemoryMailerService;
pub use smtp::SmtpMailerService;

#[async_trait::async_trait]
pub trait IMailerService: Send + Sync {
    /// Delivers one "booking is still awaiting your confirmation"
    /// notification to the organizer of the event.
    async fn send_confirmation_reminder(&self, event: &BookingReminderEvent) -> anyhow::Result<()>;
}
