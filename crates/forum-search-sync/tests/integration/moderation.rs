//! Integration tests for moderation status propagation.

use forum_search_core::TopicId;
use forum_search_index::{EntityStatus, EntityType};
use forum_search_sync::ModerationStatus;

use crate::common::{TestHarness, post, topic};

async fn topic_with_posts(harness: &TestHarness) {
    harness
        .sync
        .add_topic(&topic(7, 5, 3, "Welcome"))
        .await
        .unwrap();
    for id in 42..45 {
        harness
            .sync
            .upsert_post(&post(id, 7, 3, "reply", 1000))
            .await
            .unwrap();
    }
    harness
        .sync
        .upsert_post(&post(60, 11, 3, "elsewhere", 1000))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_deactivate_topic_reaches_every_post() {
    let harness = TestHarness::new();
    topic_with_posts(&harness).await;
    let count = harness.store.len().await;

    harness
        .sync
        .set_topic_status(TopicId::new(7), false)
        .await
        .unwrap();

    assert_eq!(harness.store.len().await, count);
    for entity in harness.tagged("forum_post_topic_id_7").await {
        assert_eq!(entity.status, EntityStatus::NotActive, "{}", entity.key());
    }
    let other = harness.store.get(EntityType::Post, 60).await.unwrap();
    assert_eq!(other.status, EntityStatus::Active);
}

#[tokio::test]
async fn test_reactivate_topic_reaches_every_post() {
    let harness = TestHarness::new();
    topic_with_posts(&harness).await;

    harness
        .sync
        .set_topic_status(TopicId::new(7), false)
        .await
        .unwrap();
    harness
        .sync
        .set_topic_status(TopicId::new(7), true)
        .await
        .unwrap();

    assert!(
        harness
            .store
            .entities()
            .await
            .iter()
            .all(|e| e.status == EntityStatus::Active)
    );
}

#[tokio::test]
async fn test_topic_identity_entry_is_deactivated() {
    let harness = TestHarness::new();
    harness
        .sync
        .add_topic(&topic(7, 5, 3, "Welcome"))
        .await
        .unwrap();

    harness
        .sync
        .set_topic_status(TopicId::new(7), false)
        .await
        .unwrap();
    let entry = harness.store.get(EntityType::Topic, 7).await.unwrap();
    assert_eq!(entry.status, EntityStatus::NotActive);
}

#[tokio::test]
async fn test_approving_in_lookup_then_reindexing_activates_post() {
    let harness = TestHarness::new();
    let pending = post(50, 9, 3, "pending", 1000);
    harness.sync.upsert_post(&pending).await.unwrap();
    assert_eq!(
        harness.store.get(EntityType::Post, 50).await.unwrap().status,
        EntityStatus::NotActive
    );

    harness
        .lookup
        .set_topic_status(TopicId::new(9), ModerationStatus::Approved)
        .await;
    harness.sync.upsert_post(&pending).await.unwrap();
    assert_eq!(
        harness.store.get(EntityType::Post, 50).await.unwrap().status,
        EntityStatus::Active
    );
}

#[tokio::test]
async fn test_status_of_unknown_topic_is_noop() {
    let harness = TestHarness::new();
    topic_with_posts(&harness).await;
    let before = harness.store.entities().await;

    harness
        .sync
        .set_topic_status(TopicId::new(404), false)
        .await
        .unwrap();
    assert_eq!(harness.store.entities().await, before);
}
