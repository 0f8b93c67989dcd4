//! Services - the business rules, written against the ports only.

mod accounts;
mod feed;
mod moderation;
mod notify;
mod posts;
mod social;

use std::sync::Arc;

pub use accounts::{AccountService, UserExportRow};
pub use feed::FeedService;
pub use moderation::ModerationService;
pub use notify::NotificationService;
pub use posts::{PostDetails, PostService};
pub use social::{ProfileView, SocialGraphService};

use crate::ports::{Clock, Mailer, Repositories};

/// Every service, wired to one set of adapters.
#[derive(Clone)]
pub struct Services {
    pub accounts: Arc<AccountService>,
    pub social: Arc<SocialGraphService>,
    pub feed: Arc<FeedService>,
    pub posts: Arc<PostService>,
    pub moderation: Arc<ModerationService>,
    pub notifications: Arc<NotificationService>,
}

impl Services {
    pub fn new(
        repos: Repositories,
        mailer: Arc<dyn Mailer>,
        mail_from: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let notifications = Arc::new(NotificationService::new(repos.clone(), mailer, mail_from));

        Self {
            accounts: Arc::new(AccountService::new(repos.clone(), clock.clone())),
            social: Arc::new(SocialGraphService::new(repos.clone())),
            feed: Arc::new(FeedService::new(repos.clone())),
            posts: Arc::new(PostService::new(
                repos.clone(),
                notifications.clone(),
                clock.clone(),
            )),
            moderation: Arc::new(ModerationService::new(repos, clock)),
            notifications,
        }
    }
}
