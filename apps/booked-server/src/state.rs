//! Application state - shared across all handlers.

use std::sync::Arc;

use booked_core::Services;
use booked_core::ports::{Mailer, PasswordService, Repositories, SystemClock, TokenService};
use booked_infra::auth::{Argon2PasswordService, JwtTokenService};
use booked_infra::database::DatabaseConfig;
use booked_infra::{InMemoryStore, LogMailer};

use crate::config::{AppConfig, MailConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    /// Backing store name, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (repos, storage) = repositories(config.database.as_ref()).await;
        let mailer = mailer(&config.mail);

        let services = Services::new(
            repos,
            mailer,
            config.mail.from.clone(),
            Arc::new(SystemClock),
        );

        tracing::info!(storage, "Application state initialized");

        Self::from_parts(
            services,
            Arc::new(JwtTokenService::from_env()),
            Arc::new(Argon2PasswordService::new()),
            storage,
        )
    }

    pub fn from_parts(
        services: Services,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
        storage: &'static str,
    ) -> Self {
        Self {
            services,
            tokens,
            passwords,
            storage,
        }
    }
}

fn in_memory() -> (Repositories, &'static str) {
    (Repositories::from_store(Arc::new(InMemoryStore::new())), "memory")
}

#[cfg(feature = "postgres")]
async fn repositories(config: Option<&DatabaseConfig>) -> (Repositories, &'static str) {
    use booked_infra::database::{PostgresStore, connect};

    let Some(config) = config else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return in_memory();
    };

    match connect(config).await {
        Ok(conn) => (
            Repositories::from_store(Arc::new(PostgresStore::new(conn))),
            "postgres",
        ),
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            in_memory()
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn repositories(config: Option<&DatabaseConfig>) -> (Repositories, &'static str) {
    if config.is_some() {
        tracing::warn!("DATABASE_URL is set but the postgres feature is disabled");
    }
    tracing::info!("Running without postgres feature - using in-memory store");
    in_memory()
}

fn mailer(config: &MailConfig) -> Arc<dyn Mailer> {
    match &config.webhook_url {
        #[cfg(feature = "webhook-mail")]
        Some(url) => {
            tracing::info!("Mail relay configured");
            Arc::new(booked_infra::WebhookMailer::new(url.clone()))
        }
        #[cfg(not(feature = "webhook-mail"))]
        Some(_) => {
            tracing::warn!("MAIL_WEBHOOK_URL is set but the webhook-mail feature is disabled");
            Arc::new(LogMailer)
        }
        None => Arc::new(LogMailer),
    }
}
