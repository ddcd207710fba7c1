use avtale_utils::create_random_secret;
use tracing::{info, warn};

const CRON_API_KEY_LEN: usize = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret the periodic reminder trigger must present
    pub cron_api_key: String,
    /// Port for the application to run on
    pub port: usize,
    /// Outbound SMTP settings. Contexts that never deliver real email
    /// (tests) run without them.
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub relay: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Mailbox reminders are sent from, e.g. `Avtale <noreply@avtale.app>`
    pub sender: String,
}

impl SmtpConfig {
    fn from_env() -> Option<Self> {
        let relay = std::env::var("SMTP_RELAY").ok()?;
        let username = std::env::var("SMTP_USERNAME").ok()?;
        let password = std::env::var("SMTP_PASSWORD").ok()?;
        let sender = std::env::var("SMTP_SENDER").ok()?;
        let default_port = 587;
        let port = match std::env::var("SMTP_PORT") {
            Ok(port) => match port.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given SMTP_PORT: {} is not valid, falling back to the default port: {}.",
                        port, default_port
                    );
                    default_port
                }
            },
            Err(_) => default_port,
        };
        Some(Self {
            relay,
            port,
            username,
            password,
            sender,
        })
    }
}

impl Config {
    pub fn new() -> Self {
        let cron_api_key = match std::env::var("CRON_API_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find CRON_API_KEY environment variable. Going to create one.");
                let key = create_random_secret(CRON_API_KEY_LEN);
                info!(
                    "Secret key for triggering the reminder job was generated and set to: {}",
                    key
                );
                key
            }
        };
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };
        Self {
            cron_api_key,
            port,
            smtp: SmtpConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
