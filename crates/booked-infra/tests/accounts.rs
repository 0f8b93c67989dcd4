mod common;

use booked_core::DomainError;
use uuid::Uuid;

use common::Harness;

#[tokio::test]
async fn test_sign_up_creates_profile() {
    let h = Harness::new();
    let alice = h.user("alice").await;

    let view = h.services.social.view_profile(alice.id, alice.id).await.unwrap();
    assert!(view.own_profile);
    assert!(h.services.social.following(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let h = Harness::new();
    h.user("alice").await;

    let result = h
        .services
        .accounts
        .sign_up(
            "alice".to_string(),
            "other@example.com".to_string(),
            "hash".to_string(),
        )
        .await;
    assert!(matches!(result, Err(DomainError::Duplicate(_))));
}

#[tokio::test]
async fn test_edit_profile() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    h.user("bob").await;
    let accounts = &h.services.accounts;

    let taken = accounts
        .edit_profile(alice.id, "bob".to_string(), "a@example.com".to_string())
        .await;
    assert!(matches!(taken, Err(DomainError::Validation(_))));

    let updated = accounts
        .edit_profile(alice.id, "alicia".to_string(), "alicia@example.com".to_string())
        .await
        .unwrap();
    assert_eq!(updated.username, "alicia");
    assert!(accounts.find_by_username("alice").await.unwrap().is_none());

    let same_name = accounts
        .edit_profile(alice.id, "alicia".to_string(), "new@example.com".to_string())
        .await
        .unwrap();
    assert_eq!(same_name.email, "new@example.com");
}

#[tokio::test]
async fn test_export_keeps_requested_order() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    let bob = h.user("bob").await;

    let rows = h
        .services
        .accounts
        .export_users(&[bob.id, alice.id])
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].username, "bob");
    assert_eq!(rows[0].id, bob.id);
    assert_eq!(rows[0].email, "bob@example.com");
    assert_eq!(rows[1].username, "alice");

    let missing = h
        .services
        .accounts
        .export_users(&[alice.id, Uuid::new_v4()])
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}
