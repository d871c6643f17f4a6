//! Tests for the exact index calls each operation issues.

use std::sync::Arc;

use forum_search_core::{PostId, TopicId};
use forum_search_index::{EntityStatus, EntityType};
use forum_search_sync::SearchScope;

use crate::common::{RecordingIndexStore, StoreCall, TestHarness, reference_post, tags, topic};

fn recording() -> (Arc<RecordingIndexStore>, forum_search_sync::ForumSearchSync) {
    let store = Arc::new(RecordingIndexStore::new());
    let sync = TestHarness::with_store(store.clone());
    (store, sync)
}

#[tokio::test]
async fn test_upsert_post_deletes_then_adds_post_then_topic() {
    let (store, sync) = recording();
    sync.upsert_post(&reference_post()).await.unwrap();

    let calls = store.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], StoreCall::Delete(tags(&["forum_post_id_42"])));
    match (&calls[1], &calls[2]) {
        (StoreCall::Add(post), StoreCall::Add(topic)) => {
            assert_eq!(post.entity_type, EntityType::Post);
            assert_eq!(post.entity_id, 42);
            assert_eq!(topic.entity_type, EntityType::Topic);
            assert_eq!(topic.entity_id, 7);
        }
        other => unreachable!("unexpected calls: {other:?}"),
    }
}

#[tokio::test]
async fn test_upsert_topic_deletes_identity_then_adds() {
    let (store, sync) = recording();
    sync.upsert_topic(&topic(7, 5, 3, "Welcome")).await.unwrap();

    let calls = store.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], StoreCall::Delete(tags(&["forum_topic_id_7"])));
    assert!(matches!(&calls[1], StoreCall::Add(e) if e.body == "Welcome"));
}

#[tokio::test]
async fn test_add_topic_issues_single_add() {
    let (store, sync) = recording();
    sync.add_topic(&topic(7, 5, 3, "Welcome")).await.unwrap();

    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(&calls[0], StoreCall::Add(e) if e.entity_type == EntityType::Topic));
}

#[tokio::test]
async fn test_delete_operations_use_one_bulk_call() {
    let (store, sync) = recording();
    sync.delete_post(PostId::new(42)).await.unwrap();
    sync.delete_topic(TopicId::new(7)).await.unwrap();
    sync.purge_all().await.unwrap();

    assert_eq!(
        store.calls(),
        vec![
            StoreCall::Delete(tags(&["forum_post_id_42"])),
            StoreCall::Delete(tags(&["forum_topic_id_7", "forum_post_topic_id_7"])),
            StoreCall::Delete(tags(&["forum_topic", "forum_post"])),
        ]
    );
}

#[tokio::test]
async fn test_status_operations_use_one_bulk_call() {
    let (store, sync) = recording();
    sync.set_topic_status(TopicId::new(7), false).await.unwrap();
    sync.set_topic_status(TopicId::new(7), true).await.unwrap();
    sync.deactivate_all().await.unwrap();
    sync.activate_all().await.unwrap();

    let family = tags(&["forum_topic_id_7", "forum_post_topic_id_7"]);
    let all = tags(&["forum_topic", "forum_post"]);
    assert_eq!(
        store.calls(),
        vec![
            StoreCall::SetStatus(family.clone(), EntityStatus::NotActive),
            StoreCall::SetStatus(family, EntityStatus::Active),
            StoreCall::SetStatus(all.clone(), EntityStatus::NotActive),
            StoreCall::SetStatus(all, EntityStatus::Active),
        ]
    );
}

#[tokio::test]
async fn test_missing_metadata_issues_no_calls() {
    let (store, sync) = recording();
    let mut orphan = reference_post();
    orphan.topic_id = TopicId::new(404);

    assert!(sync.upsert_post(&orphan).await.unwrap_err().is_not_found());
    assert!(sync.add_topic(&topic(12, 99, 3, "Lost")).await.is_err());
    assert!(
        sync.upsert_topic(&topic(12, 99, 3, "Lost"))
            .await
            .unwrap_err()
            .is_not_found()
    );
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_search_issues_scoped_query() {
    let (store, sync) = recording();
    sync.search(EntityType::Post, "hello", SearchScope::Public, Some(5))
        .await
        .unwrap();

    match store.calls().as_slice() {
        [StoreCall::Find(query)] => {
            assert_eq!(query.entity_type, EntityType::Post);
            assert_eq!(query.text, "hello");
            assert_eq!(query.tags, tags(&["forum_post_public"]));
            assert_eq!(query.limit, Some(5));
        }
        other => unreachable!("unexpected calls: {other:?}"),
    }
}

#[tokio::test]
async fn test_rebuild_purges_first() {
    let (store, sync) = recording();
    sync.rebuild(&[topic(7, 5, 3, "Welcome")], &[reference_post()])
        .await
        .unwrap();

    let calls = store.calls();
    assert_eq!(calls[0], StoreCall::Delete(tags(&["forum_topic", "forum_post"])));
    assert!(matches!(&calls[1], StoreCall::Add(e) if e.body == "Welcome"));
    assert_eq!(calls.len(), 5);
}
