//! Integration tests for scoped search over synced content.

use forum_search_core::{GroupId, SectionId, TopicId, UserId};
use forum_search_index::EntityType;
use forum_search_sync::SearchScope;

use crate::common::{TestHarness, post, topic};

async fn populated() -> TestHarness {
    let harness = TestHarness::new();
    let sync = &harness.sync;
    sync.add_topic(&topic(7, 5, 3, "Rust release notes"))
        .await
        .unwrap();
    sync.upsert_post(&post(42, 7, 3, "rust is fast", 1000))
        .await
        .unwrap();
    sync.upsert_post(&post(43, 7, 4, "rust is safe", 1200))
        .await
        .unwrap();
    sync.upsert_post(&post(44, 10, 3, "rust in private", 1100))
        .await
        .unwrap();
    sync.upsert_post(&post(45, 11, 3, "rust in hidden", 1300))
        .await
        .unwrap();
    sync.upsert_post(&post(46, 9, 3, "rust awaiting approval", 1400))
        .await
        .unwrap();
    harness
}

async fn post_ids(harness: &TestHarness, text: &str, scope: SearchScope) -> Vec<u64> {
    harness
        .sync
        .search(EntityType::Post, text, scope, None)
        .await
        .unwrap()
        .iter()
        .map(|e| e.entity_id)
        .collect()
}

#[tokio::test]
async fn test_public_scope_excludes_private_hidden_and_pending() {
    let harness = populated().await;
    assert_eq!(post_ids(&harness, "rust", SearchScope::Public).await, vec![43, 42]);
}

#[tokio::test]
async fn test_global_scope_includes_all_active() {
    let harness = populated().await;
    assert_eq!(
        post_ids(&harness, "rust", SearchScope::Global).await,
        vec![45, 43, 44, 42]
    );
}

#[tokio::test]
async fn test_user_and_group_scopes() {
    let harness = populated().await;
    let user = UserId::new(3);

    assert_eq!(
        post_ids(&harness, "", SearchScope::User(user)).await,
        vec![45, 44, 42]
    );
    assert_eq!(
        post_ids(&harness, "", SearchScope::Group(GroupId::new(6))).await,
        vec![44]
    );
    assert_eq!(
        post_ids(&harness, "", SearchScope::GroupUser(GroupId::new(5), user)).await,
        vec![42]
    );
    assert_eq!(
        post_ids(&harness, "", SearchScope::Section(SectionId::new(2))).await,
        vec![45]
    );
    assert_eq!(
        post_ids(&harness, "", SearchScope::SectionUser(SectionId::new(1), user)).await,
        vec![44, 42]
    );
}

#[tokio::test]
async fn test_topic_scope() {
    let harness = populated().await;
    assert_eq!(
        post_ids(&harness, "", SearchScope::Topic(TopicId::new(7))).await,
        vec![43, 42]
    );
}

#[tokio::test]
async fn test_text_filter_and_limit() {
    let harness = populated().await;
    assert_eq!(post_ids(&harness, "safe", SearchScope::Global).await, vec![43]);

    let limited = harness
        .sync
        .search(EntityType::Post, "rust", SearchScope::Global, Some(2))
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].entity_id, 45);
}

#[tokio::test]
async fn test_topic_search_finds_latest_post_text() {
    let harness = populated().await;
    let topics = harness
        .sync
        .search(EntityType::Topic, "safe", SearchScope::Public, None)
        .await
        .unwrap();
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].entity_id, 7);

    let by_title = harness
        .sync
        .search(EntityType::Topic, "release notes", SearchScope::Public, None)
        .await
        .unwrap();
    assert!(by_title.is_empty());
}
