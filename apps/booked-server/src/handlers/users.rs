//! Profile and follow handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use booked_shared::ApiResponse;
use booked_shared::dto::{EditProfileRequest, UserSummary};

use super::convert::{profile_response, user_response, user_summary};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/users/{id}
pub async fn view_profile(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let view = state
        .services
        .social
        .view_profile(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(profile_response(&view)))
}

/// PUT /api/me/profile
pub async fn edit_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<EditProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = state
        .services
        .accounts
        .edit_profile(identity.user_id, req.username, req.email)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        user_response(&user),
        "Profile updated",
    )))
}

/// GET /api/me/followers
pub async fn followers(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let users = state.services.social.followers(identity.user_id).await?;
    let body: Vec<UserSummary> = users.iter().map(user_summary).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/me/following
pub async fn following(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let users = state.services.social.following(identity.user_id).await?;
    let body: Vec<UserSummary> = users.iter().map(user_summary).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/users/{id}/follow
pub async fn follow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let target = state.services.accounts.find(path.into_inner()).await?;
    state.services.social.follow(identity.user_id, target.id).await?;
    tracing::debug!(follower = %identity.username, followee = %target.username, "Follow");

    Ok(HttpResponse::Ok().json(ApiResponse::message(format!(
        "You are now following {}",
        target.username
    ))))
}

/// DELETE /api/users/{id}/follow
pub async fn unfollow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let target = state.services.accounts.find(path.into_inner()).await?;
    state.services.social.unfollow(identity.user_id, target.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message(format!(
        "You have stopped following {}",
        target.username
    ))))
}

/// POST /api/users/{id}/email-follow
pub async fn email_follow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let target = state.services.accounts.find(path.into_inner()).await?;
    state
        .services
        .social
        .email_follow(identity.user_id, target.id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message(format!(
        "You will be emailed when {} posts",
        target.username
    ))))
}

/// DELETE /api/users/{id}/email-follow
pub async fn email_unfollow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let target = state.services.accounts.find(path.into_inner()).await?;
    state
        .services
        .social
        .email_unfollow(identity.user_id, target.id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message(format!(
        "You will no longer be emailed when {} posts",
        target.username
    ))))
}
