use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which of the two outgoing edge sets of a profile an operation targets.
///
/// The sets are independent: holding an edge in one never implies, adds or
/// removes an edge in the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FollowKind {
    /// "A sees B's posts in A's feed."
    Follow,
    /// "A receives an email when B posts."
    EmailFollow,
}

/// Per-user record holding the follow and email-follow relations.
///
/// Exactly one profile exists per user. It is created together with the user
/// and removed only with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: Uuid,
    pub follows: BTreeSet<Uuid>,
    pub email_follows: BTreeSet<Uuid>,
}

impl Profile {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            follows: BTreeSet::new(),
            email_follows: BTreeSet::new(),
        }
    }

    pub fn edges(&self, kind: FollowKind) -> &BTreeSet<Uuid> {
        match kind {
            FollowKind::Follow => &self.follows,
            FollowKind::EmailFollow => &self.email_follows,
        }
    }

    fn edges_mut(&mut self, kind: FollowKind) -> &mut BTreeSet<Uuid> {
        match kind {
            FollowKind::Follow => &mut self.follows,
            FollowKind::EmailFollow => &mut self.email_follows,
        }
    }

    /// Returns `true` if the edge was not present before.
    pub fn add(&mut self, kind: FollowKind, target: Uuid) -> bool {
        self.edges_mut(kind).insert(target)
    }

    /// Returns `true` if the edge was present.
    pub fn remove(&mut self, kind: FollowKind, target: Uuid) -> bool {
        self.edges_mut(kind).remove(&target)
    }

    pub fn contains(&self, kind: FollowKind, target: Uuid) -> bool {
        self.edges(kind).contains(&target)
    }
}
