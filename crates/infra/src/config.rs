use chrono_tz::Tz;
use mynote_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// The civil timezone reminder times are given in. Reminder times are
    /// wall-clock times without an offset and are interpreted in this zone.
    pub reminder_timezone: Tz,
    /// Secret used to verify the HS256 signed user tokens
    pub jwt_secret: String,
    /// Where notifications are posted to. When not set notifications
    /// are only written to the log.
    pub notifier_webhook_url: Option<String>,
    /// Sent along with every notification posted to `notifier_webhook_url`
    pub notifier_webhook_key: String,
}

const DEFAULT_REMINDER_TIMEZONE: Tz = chrono_tz::Asia::Bangkok;

impl Config {
    pub fn new() -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find JWT_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(32);
                info!("Secret for verifying user tokens was generated and set to: {}", secret);
                secret
            }
        };
        let default_port = 5000;
        let port = match std::env::var("PORT") {
            Ok(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, default_port
                    );
                    default_port
                }
            },
            Err(_) => default_port,
        };
        let reminder_timezone = match std::env::var("REMINDER_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given REMINDER_TIMEZONE: {} is not a known timezone, falling back to: {}.",
                        tz, DEFAULT_REMINDER_TIMEZONE
                    );
                    DEFAULT_REMINDER_TIMEZONE
                }
            },
            Err(_) => DEFAULT_REMINDER_TIMEZONE,
        };
        let notifier_webhook_url = std::env::var("NOTIFIER_WEBHOOK_URL").ok();
        if notifier_webhook_url.is_none() {
            info!("Did not find NOTIFIER_WEBHOOK_URL environment variable. Reminder notifications will only be logged.");
        }
        Self {
            port,
            reminder_timezone,
            jwt_secret,
            notifier_webhook_url,
            notifier_webhook_key: std::env::var("NOTIFIER_WEBHOOK_KEY").unwrap_or_default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
