//! HTTP handlers and route configuration.

mod auth;
mod convert;
mod feed;
mod health;
mod posts;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Posts
            .service(
                web::resource("/posts")
                    .route(web::get().to(posts::list_posts))
                    .route(web::post().to(posts::create_post)),
            )
            .service(
                web::resource("/posts/{id}")
                    .route(web::get().to(posts::get_post))
                    .route(web::put().to(posts::edit_post))
                    .route(web::delete().to(posts::delete_post)),
            )
            .route("/posts/{id}/comments", web::post().to(posts::add_comment))
            .route("/posts/{id}/reports", web::post().to(posts::report_post))
            .route("/feed", web::get().to(feed::feed))
            // The signed-in user
            .service(
                web::scope("/me")
                    .route("/posts", web::get().to(feed::my_posts))
                    .route("/profile", web::put().to(users::edit_profile))
                    .route("/followers", web::get().to(users::followers))
                    .route("/following", web::get().to(users::following)),
            )
            // Other users
            .service(
                web::scope("/users")
                    .route("/{id}", web::get().to(users::view_profile))
                    .service(
                        web::resource("/{id}/follow")
                            .route(web::post().to(users::follow))
                            .route(web::delete().to(users::unfollow)),
                    )
                    .service(
                        web::resource("/{id}/email-follow")
                            .route(web::post().to(users::email_follow))
                            .route(web::delete().to(users::email_unfollow)),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use booked_core::Services;
    use booked_core::ports::{Repositories, SystemClock};
    use booked_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
    use booked_infra::{InMemoryMailer, InMemoryStore};
    use booked_shared::dto::{AuthResponse, PostResponse};

    use super::configure_routes;
    use crate::state::AppState;

    fn state() -> AppState {
        let repos = Repositories::from_store(Arc::new(InMemoryStore::new()));
        let services = Services::new(
            repos,
            Arc::new(InMemoryMailer::new()),
            "noreply@booked.test",
            Arc::new(SystemClock),
        );
        let tokens = JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "booked-test".to_string(),
        });

        AppState::from_parts(
            services,
            Arc::new(tokens),
            Arc::new(Argon2PasswordService::new()),
            "memory",
        )
    }

    /// Register a user and return their bearer header value.
    macro_rules! sign_up {
        ($app:expr, $name:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({
                    "username": $name,
                    "email": format!("{}@example.com", $name),
                    "password": "long enough password",
                }))
                .to_request();
            let auth: AuthResponse = test::call_and_read_body_json(&$app, req).await;
            format!("Bearer {}", auth.access_token)
        }};
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }

    #[actix_web::test]
    async fn test_register_login_and_me() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure_routes),
        )
        .await;
        let _alice = sign_up!(app, "alice");

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": "alice", "password": "wrong password" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": "alice", "password": "long enough password" }))
            .to_request();
        let auth: AuthResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(("Authorization", format!("Bearer {}", auth.access_token)))
            .to_request();
        let me: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(me["username"], "alice");
        assert_eq!(me["email"], "alice@example.com");
    }

    #[actix_web::test]
    async fn test_protected_route_requires_token() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/feed").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_followed_post_reaches_feed() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure_routes),
        )
        .await;
        let alice = sign_up!(app, "alice");
        let bob = sign_up!(app, "bob");

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("Authorization", bob.clone()))
            .set_json(json!({ "heading": "Hi", "text": "from bob" }))
            .to_request();
        let post: PostResponse = test::call_and_read_body_json(&app, req).await;
        let bob_id = post.author.unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/api/users/{bob_id}/follow"))
            .insert_header(("Authorization", alice.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/feed")
            .insert_header(("Authorization", alice))
            .to_request();
        let feed: Vec<PostResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, post.id);
    }

    #[actix_web::test]
    async fn test_only_owner_may_edit() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure_routes),
        )
        .await;
        let alice = sign_up!(app, "alice");
        let bob = sign_up!(app, "bob");

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("Authorization", alice.clone()))
            .set_json(json!({ "heading": "Mine", "text": "x" }))
            .to_request();
        let post: PostResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", post.id))
            .insert_header(("Authorization", bob))
            .set_json(json!({ "heading": "Stolen", "text": "y" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", post.id))
            .insert_header(("Authorization", alice))
            .set_json(json!({ "heading": "Mine", "text": "z" }))
            .to_request();
        let edited: PostResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(edited.heading, "Mine (edited)");
    }

    #[actix_web::test]
    async fn test_unknown_post_is_problem_details() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", uuid::Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["title"], "Not Found");
    }
}
