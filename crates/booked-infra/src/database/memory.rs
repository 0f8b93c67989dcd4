//! In-memory store - used when no database is configured, and by tests.
//!
//! Every table sits behind one async RwLock, so each repository call is
//! atomic with respect to every other call.
//! Note: Data is lost on process restart.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use booked_core::domain::{Comment, FollowKind, Post, Profile, Report, ReportOutcome, User};
use booked_core::error::RepoError;
use booked_core::ports::{
    CommentRepository, PostRepository, ProfileRepository, ReportRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    profiles: HashMap<Uuid, Profile>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
    reports: HashMap<Uuid, Report>,
}

impl Tables {
    fn username_taken(&self, username: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| u.username == username && Some(u.id) != except)
    }

    /// Remove a post with its comments and reports.
    fn remove_post(&mut self, id: Uuid) -> bool {
        let existed = self.posts.remove(&id).is_some();
        self.comments.retain(|_, c| c.post_id != id);
        self.reports.retain(|_, r| r.post_id != id);
        existed
    }

    fn report_count(&self, post_id: Uuid) -> usize {
        self.reports.values().filter(|r| r.post_id == post_id).count()
    }
}

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

/// All repositories over plain hash maps.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let tables = self.tables.read().await;
        let wanted: HashSet<&Uuid> = ids.iter().collect();
        Ok(tables
            .users
            .values()
            .filter(|u| wanted.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn create(&self, user: User) -> Result<(User, Profile), RepoError> {
        let mut tables = self.tables.write().await;

        if tables.users.contains_key(&user.id) || tables.username_taken(&user.username, None) {
            return Err(RepoError::Constraint(
                "Username is already in use.".to_string(),
            ));
        }

        let profile = Profile::new(user.id);
        tables.profiles.insert(user.id, profile.clone());
        tables.users.insert(user.id, user.clone());

        Ok((user, profile))
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        if tables.username_taken(&user.username, Some(user.id)) {
            return Err(RepoError::Constraint(
                "Username is already in use.".to_string(),
            ));
        }

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, RepoError> {
        Ok(self.tables.read().await.profiles.get(&user_id).cloned())
    }

    async fn add_edge(
        &self,
        kind: FollowKind,
        actor: Uuid,
        target: Uuid,
    ) -> Result<bool, RepoError> {
        let mut tables = self.tables.write().await;
        let profile = tables.profiles.get_mut(&actor).ok_or(RepoError::NotFound)?;
        Ok(profile.add(kind, target))
    }

    async fn remove_edge(
        &self,
        kind: FollowKind,
        actor: Uuid,
        target: Uuid,
    ) -> Result<bool, RepoError> {
        let mut tables = self.tables.write().await;
        let profile = tables.profiles.get_mut(&actor).ok_or(RepoError::NotFound)?;
        Ok(profile.remove(kind, target))
    }

    async fn inbound(&self, kind: FollowKind, target: Uuid) -> Result<Vec<User>, RepoError> {
        let tables = self.tables.read().await;

        let mut users: Vec<User> = tables
            .profiles
            .values()
            .filter(|p| p.contains(kind, target))
            .filter_map(|p| tables.users.get(&p.user_id))
            .cloned()
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));

        Ok(users)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.posts.contains_key(&post.id) {
            return Err(RepoError::Constraint("Post already exists".to_string()));
        }
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables.posts.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        if self.tables.write().await.remove_post(id) {
            Ok(())
        } else {
            Err(RepoError::NotFound)
        }
    }

    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.posts.values().cloned().collect()))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables
                .posts
                .values()
                .filter(|p| p.user_id == Some(user_id))
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_authors(&self, authors: &[Uuid]) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let authors: HashSet<&Uuid> = authors.iter().collect();
        Ok(newest_first(
            tables
                .posts
                .values()
                .filter(|p| p.user_id.as_ref().is_some_and(|id| authors.contains(id)))
                .cloned()
                .collect(),
        ))
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(RepoError::NotFound);
        }
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }
}

#[async_trait]
impl ReportRepository for InMemoryStore {
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Report>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .reports
            .values()
            .filter(|r| r.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn file(&self, report: Report) -> Result<ReportOutcome, RepoError> {
        let mut tables = self.tables.write().await;

        let post_id = report.post_id;
        if !tables.posts.contains_key(&post_id) {
            return Err(RepoError::NotFound);
        }

        tables.reports.insert(report.id, report);
        let outcome = ReportOutcome::for_count(tables.report_count(post_id));
        if outcome.is_removed() {
            tables.remove_post(post_id);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};

    fn user(name: &str) -> User {
        User::new(name.to_string(), format!("{name}@example.com"), "hash".to_string())
    }

    #[tokio::test]
    async fn test_create_user_creates_profile() {
        let store = InMemoryStore::new();
        let (alice, profile) = store.create(user("alice")).await.unwrap();

        assert_eq!(profile.user_id, alice.id);
        assert_eq!(
            ProfileRepository::find_by_user_id(&store, alice.id)
                .await
                .unwrap(),
            Some(Profile::new(alice.id))
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = InMemoryStore::new();
        store.create(user("alice")).await.unwrap();

        let result = store.create(user("alice")).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_listing_is_newest_first() {
        let store = InMemoryStore::new();
        let (alice, _) = store.create(user("alice")).await.unwrap();
        let now = Utc::now();

        let older = Post::new(alice.id, "old".into(), "x".into(), now - TimeDelta::minutes(1));
        let newer = Post::new(alice.id, "new".into(), "x".into(), now);
        PostRepository::insert(&store, older.clone()).await.unwrap();
        PostRepository::insert(&store, newer.clone()).await.unwrap();

        let posts = store.list_recent().await.unwrap();
        assert_eq!(posts, vec![newer, older]);
    }

    #[tokio::test]
    async fn test_delete_post_cascades() {
        let store = InMemoryStore::new();
        let (alice, _) = store.create(user("alice")).await.unwrap();
        let post = Post::new(alice.id, "h".into(), "t".into(), Utc::now());
        PostRepository::insert(&store, post.clone()).await.unwrap();
        CommentRepository::insert(
            &store,
            Comment::new(post.id, alice.id, "c".into(), Utc::now()),
        )
        .await
        .unwrap();

        PostRepository::delete(&store, post.id).await.unwrap();

        assert!(CommentRepository::find_by_post_id(&store, post.id).await.unwrap().is_empty());
        assert!(matches!(
            PostRepository::delete(&store, post.id).await,
            Err(RepoError::NotFound)
        ));
    }
}
