mod mailer;
mod translation;

use crate::config::Config;
pub use mailer::{IMailerService, InMemoryMailerService, SmtpMailerService};
use std::sync::Arc;
pub use translation::{ITranslationResolver, TranslationRegistry, DEFAULT_LOCALE};

/// External collaborators of the reminder dispatcher: the notification
/// channel and the locale resolver.
#[derive(Clone)]
pub struct Services {
    pub mailer: Arc<dyn IMailerService>,
    pub translations: Arc<dyn ITranslationResolver>,
}

impl Services {
    pub fn create_smtp(config: &Config) -> Self {
        let smtp = config
            .smtp
            .as_ref()
            .expect("SMTP credentials must be set and valid");
        let mailer = SmtpMailerService::new(smtp).expect("SMTP credentials must be set and valid");
        Self {
            mailer: Arc::new(mailer),
            translations: Arc::new(TranslationRegistry::from_embedded()),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            mailer: Arc::new(InMemoryMailerService::new()),
            translations: Arc::new(TranslationRegistry::from_embedded()),
        }
    }
}
