//! Post, comment and report handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use booked_shared::ApiResponse;
use booked_shared::dto::{CommentRequest, PostRequest, ReportRequest};

use super::convert::{
    comment_response, details_response, post_response, posts_response, report_response,
};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts - every post, newest first
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.services.feed.home().await?;
    Ok(HttpResponse::Ok().json(posts_response(&posts)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .services
        .posts
        .create_post(identity.user_id, req.heading, req.text)
        .await?;

    Ok(HttpResponse::Created().json(post_response(&post)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let viewer = identity.0.map(|i| i.user_id);
    let details = state
        .services
        .posts
        .post_details(path.into_inner(), viewer)
        .await?;

    Ok(HttpResponse::Ok().json(details_response(&details)))
}

/// PUT /api/posts/{id}
pub async fn edit_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .services
        .posts
        .edit_post(path.into_inner(), identity.user_id, req.heading, req.text)
        .await?;

    Ok(HttpResponse::Ok().json(post_response(&post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .services
        .posts
        .delete_post(path.into_inner(), identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Post deleted")))
}

/// POST /api/posts/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .services
        .posts
        .comment(path.into_inner(), identity.user_id, body.into_inner().text)
        .await?;

    Ok(HttpResponse::Created().json(comment_response(&comment)))
}

/// POST /api/posts/{id}/reports
pub async fn report_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<ReportRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let outcome = state
        .services
        .moderation
        .report(path.into_inner(), identity.user_id, req.reason, req.detail)
        .await?;

    let message = if outcome.is_removed() {
        "Post has been removed after multiple reports"
    } else {
        "Post has been reported"
    };
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        report_response(outcome),
        message,
    )))
}
