//! Application configuration loaded from environment variables.

use std::env;

use booked_infra::database::DatabaseConfig;

/// Where notification mail goes.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Sender address of every notification.
    pub from: String,
    /// HTTP relay endpoint. Mail is only logged when unset.
    pub webhook_url: Option<String>,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub mail: MailConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database: DatabaseConfig::from_env(),
            mail: MailConfig {
                from: env::var("MAIL_FROM").unwrap_or_else(|_| "noreply@booked.local".to_string()),
                webhook_url: env::var("MAIL_WEBHOOK_URL").ok().filter(|u| !u.is_empty()),
            },
        }
    }
}
