use super::IMailerService;
use avtale_domain::BookingReminderEvent;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Records outgoing notifications instead of delivering them. Tests inspect
/// what was sent and can make every send fail.
pub struct InMemoryMailerService {
    sent: Mutex<Vec<BookingReminderEvent>>,
    failing: AtomicBool,
}

impl InMemoryMailerService {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            failing: AtomicBool::new(false),
        }
    }

    pub fn sent(&self) -> Vec<BookingReminderEvent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Default for InMemoryMailerService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMailerService for InMemoryMailerService {
    async fn send_confirmation_reminder(&self, event: &BookingReminderEvent) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("Mailer transport unavailable");
        }
        self.sent.lock().unwrap().push(event.clone());
        Ok(())
    }
}
