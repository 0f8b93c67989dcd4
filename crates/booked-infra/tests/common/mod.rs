#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeDelta, Utc};

use booked_core::Services;
use booked_core::domain::{Post, User};
use booked_core::ports::{Clock, Repositories};
use booked_infra::{InMemoryMailer, InMemoryStore};

/// Clock that only moves when told to.
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self(Mutex::new(start))
    }

    pub fn advance(&self, by: TimeDelta) {
        *self.0.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub struct Harness {
    pub services: Services,
    pub store: Arc<InMemoryStore>,
    pub mailer: Arc<InMemoryMailer>,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_mailer(InMemoryMailer::new())
    }

    pub fn with_mailer(mailer: InMemoryMailer) -> Self {
        let mailer = Arc::new(mailer);
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = Arc::new(InMemoryStore::new());
        let repos = Repositories::from_store(store.clone());
        let services = Services::new(repos, mailer.clone(), "noreply@booked.test", clock.clone());

        Self {
            services,
            store,
            mailer,
            clock,
        }
    }

    pub async fn user(&self, name: &str) -> User {
        self.services
            .accounts
            .sign_up(
                name.to_string(),
                format!("{name}@example.com"),
                "hash".to_string(),
            )
            .await
            .unwrap()
    }

    /// Create a post one second after the previous one.
    pub async fn post(&self, author: &User, heading: &str) -> Post {
        self.clock.advance(TimeDelta::seconds(1));
        self.services
            .posts
            .create_post(author.id, heading.to_string(), "body".to_string())
            .await
            .unwrap()
    }
}
