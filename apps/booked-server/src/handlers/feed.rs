//! Feed handlers.

use actix_web::{HttpResponse, web};

use super::convert::posts_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/feed - posts by everyone the caller follows
pub async fn feed(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.services.feed.feed(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(posts_response(&posts)))
}

/// GET /api/me/posts
pub async fn my_posts(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.services.feed.posts_by(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(posts_response(&posts)))
}
