//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use booked_core::domain::{Comment, FollowKind, Post, Profile, Report, ReportOutcome, User};
use booked_core::error::RepoError;
use booked_core::ports::{
    CommentRepository, PostRepository, ProfileRepository, ReportRepository, UserRepository,
};

use super::entity::{comment, email_follow, follow, post, profile, report, user};

fn db_err(e: DbErr) -> RepoError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Constraint(msg),
        _ => match e {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(e.to_string()),
            other => RepoError::Query(other.to_string()),
        },
    }
}

/// Delete a post with its comments and reports. Returns the number of post rows removed.
async fn delete_post_rows<C: ConnectionTrait>(conn: &C, post_id: Uuid) -> Result<u64, RepoError> {
    comment::Entity::delete_many()
        .filter(comment::Column::PostId.eq(post_id))
        .exec(conn)
        .await
        .map_err(db_err)?;
    report::Entity::delete_many()
        .filter(report::Column::PostId.eq(post_id))
        .exec(conn)
        .await
        .map_err(db_err)?;
    let result = post::Entity::delete_by_id(post_id)
        .exec(conn)
        .await
        .map_err(db_err)?;

    Ok(result.rows_affected)
}

/// All repositories over one PostgreSQL connection pool.
pub struct PostgresStore {
    pub(crate) db: DbConn,
}

impl PostgresStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn users_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = user::Entity::find()
            .filter(user::Column::Id.is_in(ids))
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(users.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl UserRepository for PostgresStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        self.users_by_ids(ids.to_vec()).await
    }

    async fn create(&self, new_user: User) -> Result<(User, Profile), RepoError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let model = user::ActiveModel::from(new_user)
            .insert(&txn)
            .await
            .map_err(db_err)?;
        profile::ActiveModel {
            user_id: Set(model.id),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        let created: User = model.into();
        let profile = Profile::new(created.id);
        Ok((created, profile))
    }

    async fn update(&self, changed: User) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(changed)
            .update(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.into())
    }
}

#[async_trait]
impl ProfileRepository for PostgresStore {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, RepoError> {
        let exists = profile::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if exists.is_none() {
            return Ok(None);
        }

        let follows = follow::Entity::find()
            .filter(follow::Column::FollowerId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let email_follows = email_follow::Entity::find()
            .filter(email_follow::Column::FollowerId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Some(Profile {
            user_id,
            follows: follows.into_iter().map(|m| m.followee_id).collect(),
            email_follows: email_follows.into_iter().map(|m| m.followee_id).collect(),
        }))
    }

    async fn add_edge(
        &self,
        kind: FollowKind,
        actor: Uuid,
        target: Uuid,
    ) -> Result<bool, RepoError> {
        let inserted = match kind {
            FollowKind::Follow => follow::Entity::insert(follow::ActiveModel {
                follower_id: Set(actor),
                followee_id: Set(target),
            })
            .on_conflict(
                OnConflict::columns([follow::Column::FollowerId, follow::Column::FolloweeId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await,
            FollowKind::EmailFollow => email_follow::Entity::insert(email_follow::ActiveModel {
                follower_id: Set(actor),
                followee_id: Set(target),
            })
            .on_conflict(
                OnConflict::columns([
                    email_follow::Column::FollowerId,
                    email_follow::Column::FolloweeId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await,
        }
        .map_err(db_err)?;

        Ok(inserted > 0)
    }

    async fn remove_edge(
        &self,
        kind: FollowKind,
        actor: Uuid,
        target: Uuid,
    ) -> Result<bool, RepoError> {
        let result = match kind {
            FollowKind::Follow => {
                follow::Entity::delete_many()
                    .filter(follow::Column::FollowerId.eq(actor))
                    .filter(follow::Column::FolloweeId.eq(target))
                    .exec(&self.db)
                    .await
            }
            FollowKind::EmailFollow => {
                email_follow::Entity::delete_many()
                    .filter(email_follow::Column::FollowerId.eq(actor))
                    .filter(email_follow::Column::FolloweeId.eq(target))
                    .exec(&self.db)
                    .await
            }
        }
        .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn inbound(&self, kind: FollowKind, target: Uuid) -> Result<Vec<User>, RepoError> {
        let follower_ids: Vec<Uuid> = match kind {
            FollowKind::Follow => follow::Entity::find()
                .filter(follow::Column::FolloweeId.eq(target))
                .all(&self.db)
                .await
                .map_err(db_err)?
                .into_iter()
                .map(|m| m.follower_id)
                .collect(),
            FollowKind::EmailFollow => email_follow::Entity::find()
                .filter(email_follow::Column::FolloweeId.eq(target))
                .all(&self.db)
                .await
                .map_err(db_err)?
                .into_iter()
                .map(|m| m.follower_id)
                .collect(),
        };

        self.users_by_ids(follower_ids).await
    }
}

#[async_trait]
impl PostRepository for PostgresStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, new_post: Post) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(new_post)
            .insert(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.into())
    }

    async fn update(&self, changed: Post) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(changed)
            .update(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        if delete_post_rows(&txn, id).await? == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(db_err)
    }

    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let result = post::Entity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = post::Entity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_authors(&self, authors: &[Uuid]) -> Result<Vec<Post>, RepoError> {
        if authors.is_empty() {
            return Ok(Vec::new());
        }

        let result = post::Entity::find()
            .filter(post::Column::UserId.is_in(authors.to_vec()))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresStore {
    async fn insert(&self, new_comment: Comment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel::from(new_comment)
            .insert(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.into())
    }

    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = comment::Entity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ReportRepository for PostgresStore {
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Report>, RepoError> {
        let result = report::Entity::find()
            .filter(report::Column::PostId.eq(post_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn file(&self, new_report: Report) -> Result<ReportOutcome, RepoError> {
        let post_id = new_report.post_id;
        let txn = self.db.begin().await.map_err(db_err)?;

        // Row lock on the post serializes concurrent reports against it.
        let locked = post::Entity::find_by_id(post_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_err)?;
        if locked.is_none() {
            return Err(RepoError::NotFound);
        }

        report::ActiveModel::from(new_report)
            .insert(&txn)
            .await
            .map_err(db_err)?;

        let count = report::Entity::find()
            .filter(report::Column::PostId.eq(post_id))
            .count(&txn)
            .await
            .map_err(db_err)?;

        let outcome = ReportOutcome::for_count(count as usize);
        if outcome.is_removed() {
            delete_post_rows(&txn, post_id).await?;
        }

        txn.commit().await.map_err(db_err)?;
        Ok(outcome)
    }
}
