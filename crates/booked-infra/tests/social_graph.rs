mod common;

use booked_core::DomainError;
use uuid::Uuid;

use common::Harness;

#[tokio::test]
async fn test_follow_and_unfollow() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    let bob = h.user("bob").await;
    let social = &h.services.social;

    social.follow(alice.id, bob.id).await.unwrap();
    assert!(social.is_following(alice.id, bob.id).await.unwrap());
    assert!(!social.is_following(bob.id, alice.id).await.unwrap());

    let followers = social.followers(bob.id).await.unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].id, alice.id);

    social.unfollow(alice.id, bob.id).await.unwrap();
    assert!(!social.is_following(alice.id, bob.id).await.unwrap());
    assert!(social.followers(bob.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_follow_twice_is_a_no_op() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    let bob = h.user("bob").await;
    let social = &h.services.social;

    social.follow(alice.id, bob.id).await.unwrap();
    social.follow(alice.id, bob.id).await.unwrap();
    assert_eq!(social.following(alice.id).await.unwrap().len(), 1);

    social.unfollow(alice.id, bob.id).await.unwrap();
    social.unfollow(alice.id, bob.id).await.unwrap();
    assert!(social.following(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_email_follow_is_independent_of_follow() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    let bob = h.user("bob").await;
    let social = &h.services.social;

    social.follow(alice.id, bob.id).await.unwrap();
    social.email_follow(alice.id, bob.id).await.unwrap();

    social.unfollow(alice.id, bob.id).await.unwrap();
    assert!(!social.is_following(alice.id, bob.id).await.unwrap());
    assert!(social.has_email_follow(alice.id, bob.id).await.unwrap());

    social.email_unfollow(alice.id, bob.id).await.unwrap();
    assert!(!social.has_email_follow(alice.id, bob.id).await.unwrap());
}

#[tokio::test]
async fn test_following_is_sorted_by_username() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    let carol = h.user("carol").await;
    let bob = h.user("bob").await;
    let social = &h.services.social;

    social.follow(alice.id, carol.id).await.unwrap();
    social.follow(alice.id, bob.id).await.unwrap();

    let names: Vec<String> = social
        .following(alice.id)
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, vec!["bob", "carol"]);
}

#[tokio::test]
async fn test_follow_unknown_user_is_not_found() {
    let h = Harness::new();
    let alice = h.user("alice").await;

    let result = h.services.social.follow(alice.id, Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_follow_lists_of_unknown_user_are_not_found() {
    let h = Harness::new();
    let stranger = Uuid::new_v4();

    let followers = h.services.social.followers(stranger).await;
    assert!(matches!(followers, Err(DomainError::NotFound { .. })));

    let following = h.services.social.following(stranger).await;
    assert!(matches!(following, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_self_follow_is_allowed() {
    let h = Harness::new();
    let alice = h.user("alice").await;

    h.services.social.follow(alice.id, alice.id).await.unwrap();
    assert!(h.services.social.is_following(alice.id, alice.id).await.unwrap());
}

#[tokio::test]
async fn test_view_profile_flags() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    let bob = h.user("bob").await;
    h.post(&bob, "hello").await;
    h.services.social.email_follow(alice.id, bob.id).await.unwrap();

    let view = h.services.social.view_profile(alice.id, bob.id).await.unwrap();
    assert_eq!(view.user.id, bob.id);
    assert_eq!(view.posts.len(), 1);
    assert!(!view.own_profile);
    assert!(!view.is_following);
    assert!(view.emails_enabled);

    let own = h.services.social.view_profile(bob.id, bob.id).await.unwrap();
    assert!(own.own_profile);
}
