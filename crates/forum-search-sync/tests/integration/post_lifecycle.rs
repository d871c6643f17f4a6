//! Integration tests for post create, edit and delete.

use forum_search_core::PostId;
use forum_search_index::{EntityStatus, EntityType};

use crate::common::{TestHarness, post, reference_post, tags};

#[tokio::test]
async fn test_upsert_post_reference_example() {
    let harness = TestHarness::new();
    harness.sync.upsert_post(&reference_post()).await.unwrap();

    let post_entry = harness.store.get(EntityType::Post, 42).await.unwrap();
    assert_eq!(post_entry.body, "hello");
    assert_eq!(post_entry.timestamp, 1000);
    assert_eq!(post_entry.status, EntityStatus::Active);
    assert_eq!(
        post_entry.tags,
        tags(&[
            "forum_post",
            "forum_post_user_id_3",
            "forum_post_group_id_5",
            "forum_post_group_id_5_user_id_3",
            "forum_post_section_id_1",
            "forum_post_section_id_1_user_id_3",
            "forum_post_topic_id_7",
            "forum_post_id_42",
            "forum_post_public",
        ])
    );

    let topic_entry = harness.store.get(EntityType::Topic, 7).await.unwrap();
    assert_eq!(topic_entry.body, "hello");
    assert_eq!(topic_entry.timestamp, 1000);
    assert_eq!(topic_entry.status, EntityStatus::Active);
    assert_eq!(
        topic_entry.tags,
        tags(&[
            "forum_topic",
            "forum_topic_user_id_3",
            "forum_topic_group_id_5",
            "forum_topic_group_id_5_user_id_3",
            "forum_topic_section_id_1",
            "forum_topic_section_id_1_user_id_3",
            "forum_post_topic_id_7",
            "forum_post_id_42",
            "forum_topic_public",
        ])
    );

    assert_eq!(harness.store.len().await, 2);
}

#[tokio::test]
async fn test_upsert_post_twice_keeps_one_entry_per_identity() {
    let harness = TestHarness::new();
    harness.sync.upsert_post(&reference_post()).await.unwrap();

    let mut edited = reference_post();
    edited.text = "hello again".to_string();
    harness.sync.upsert_post(&edited).await.unwrap();

    assert_eq!(harness.store.len().await, 2);
    assert_eq!(harness.tagged("forum_post_id_42").await.len(), 2);
    let post_entry = harness.store.get(EntityType::Post, 42).await.unwrap();
    assert_eq!(post_entry.body, "hello again");
}

#[tokio::test]
async fn test_upsert_post_in_unapproved_topic_is_not_active() {
    let harness = TestHarness::new();
    harness
        .sync
        .upsert_post(&post(50, 9, 3, "pending", 2000))
        .await
        .unwrap();

    let post_entry = harness.store.get(EntityType::Post, 50).await.unwrap();
    let topic_entry = harness.store.get(EntityType::Topic, 9).await.unwrap();
    assert_eq!(post_entry.status, EntityStatus::NotActive);
    assert_eq!(topic_entry.status, EntityStatus::NotActive);
}

#[tokio::test]
async fn test_post_in_private_group_is_not_public() {
    let harness = TestHarness::new();
    harness
        .sync
        .upsert_post(&post(51, 10, 3, "secret", 2000))
        .await
        .unwrap();

    let post_entry = harness.store.get(EntityType::Post, 51).await.unwrap();
    assert!(post_entry.tags.contains("forum_post_group_id_6"));
    assert!(!post_entry.tags.contains("forum_post_public"));
    let topic_entry = harness.store.get(EntityType::Topic, 10).await.unwrap();
    assert!(!topic_entry.tags.contains("forum_topic_public"));
}

#[tokio::test]
async fn test_post_in_hidden_section_is_not_public() {
    let harness = TestHarness::new();
    harness
        .sync
        .upsert_post(&post(52, 11, 3, "hidden", 2000))
        .await
        .unwrap();

    let post_entry = harness.store.get(EntityType::Post, 52).await.unwrap();
    assert!(post_entry.tags.contains("forum_post_section_id_2"));
    assert!(!post_entry.tags.contains("forum_post_public"));
}

#[tokio::test]
async fn test_later_post_overwrites_topic_entry() {
    let harness = TestHarness::new();
    harness
        .sync
        .upsert_post(&post(42, 7, 3, "first post", 1000))
        .await
        .unwrap();
    harness
        .sync
        .upsert_post(&post(43, 7, 4, "second post", 1100))
        .await
        .unwrap();

    let topic_entry = harness.store.get(EntityType::Topic, 7).await.unwrap();
    assert_eq!(topic_entry.body, "second post");
    assert!(topic_entry.tags.contains("forum_post_id_43"));
    assert!(!topic_entry.tags.contains("forum_post_id_42"));
    assert_eq!(harness.store.len().await, 3);
}

#[tokio::test]
async fn test_delete_post_removes_its_entries() {
    let harness = TestHarness::new();
    harness.sync.upsert_post(&reference_post()).await.unwrap();

    harness.sync.delete_post(PostId::new(42)).await.unwrap();
    assert!(harness.tagged("forum_post_id_42").await.is_empty());
    assert!(harness.store.is_empty().await);
}

#[tokio::test]
async fn test_delete_post_is_idempotent() {
    let harness = TestHarness::new();
    harness.sync.upsert_post(&reference_post()).await.unwrap();
    harness
        .sync
        .upsert_post(&post(43, 9, 3, "other", 1100))
        .await
        .unwrap();

    harness.sync.delete_post(PostId::new(42)).await.unwrap();
    let after_once = harness.store.entities().await;

    harness.sync.delete_post(PostId::new(42)).await.unwrap();
    assert_eq!(harness.store.entities().await, after_once);
    assert_eq!(after_once.len(), 2);
}

#[tokio::test]
async fn test_delete_unknown_post_is_noop() {
    let harness = TestHarness::new();
    harness.sync.delete_post(PostId::new(999)).await.unwrap();
    assert!(harness.store.is_empty().await);
}
