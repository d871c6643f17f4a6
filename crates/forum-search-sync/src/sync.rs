//! Index maintenance for forum content.
//!
//! [`ForumSearchSync`] turns forum content events into index writes. Each
//! operation resolves whatever metadata it needs first, then issues its
//! index writes one after another, awaiting each before the next. Updates
//! are always a delete by identity tag followed by a fresh insert; entities
//! are never patched in place.
//!
//! # Entries per content item
//!
//! | Content | Entry type | Entry id | Body |
//! |---------|------------|----------|------|
//! | topic | `forum_topic` | topic id | title |
//! | post | `forum_post` | post id | post text |
//! | post | `forum_topic` | topic id | post text |
//!
//! The second post entry shares its identity with the topic's own entry, so
//! the last write wins and a topic stays discoverable through the text of
//! its most recently written post.

use std::sync::Arc;

use forum_search_core::{Error, GroupId, PostId, Result, SectionId, TopicId};
use forum_search_index::{
    EntityQuery, EntityStatus, EntityType, IndexStore, SearchableEntity, TagSet,
};

use crate::lookup::ForumMetadataLookup;
use crate::records::{ForumPost, ForumTopic, GroupInfo, SectionInfo, TopicInfo};
use crate::scope::SearchScope;
use crate::tags::{self, ForumTag, TagContext};

/// Keeps an [`IndexStore`] consistent with forum topics and posts.
#[derive(Clone)]
pub struct ForumSearchSync {
    pub(crate) lookup: Arc<dyn ForumMetadataLookup>,
    pub(crate) store: Arc<dyn IndexStore>,
}

impl ForumSearchSync {
    /// Create a sync service over a metadata lookup and an index store.
    pub fn new(lookup: Arc<dyn ForumMetadataLookup>, store: Arc<dyn IndexStore>) -> Self {
        Self { lookup, store }
    }

    // ------------------------------------------------------------------------
    // Posts
    // ------------------------------------------------------------------------

    /// Index a created or edited post.
    ///
    /// Writes the post's own entry and its contribution to the topic entry,
    /// both active only while the topic is approved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] before touching the index if the topic,
    /// its group, or the group's section is missing. Index failures are
    /// propagated as they occur; earlier writes are not rolled back.
    pub async fn upsert_post(&self, post: &ForumPost) -> Result<()> {
        let topic = self.resolve_topic(post.topic_id).await?;
        let group = self.resolve_group(topic.group_id).await?;
        let section = self.resolve_section(group.section_id).await?;

        self.store
            .delete_entities_by_tags(&tag_set_of(ForumTag::PostIdentity(post.id)))
            .await?;

        let context = TagContext::new(post.user_id, &group, &section);
        let status = EntityStatus::from_active(topic.status.is_approved());

        log::debug!(
            "Indexing post {} in topic {} ({}, topic {})",
            post.id,
            topic.id,
            status,
            topic.status
        );

        let post_entry = SearchableEntity::builder(EntityType::Post, post.id.get())
            .body(post.text.clone())
            .timestamp(post.create_stamp)
            .tags(tags::post_tags(post, &topic, &context))
            .status(status)
            .build();
        self.store.add_entity(post_entry).await?;

        let topic_entry = SearchableEntity::builder(EntityType::Topic, topic.id.get())
            .body(post.text.clone())
            .timestamp(post.create_stamp)
            .tags(tags::post_topic_tags(post, &topic, &context))
            .status(status)
            .build();
        self.store.add_entity(topic_entry).await?;

        Ok(())
    }

    /// Remove every entry written for a post. Missing posts are a no-op.
    pub async fn delete_post(&self, post_id: PostId) -> Result<()> {
        let removed = self
            .store
            .delete_entities_by_tags(&tag_set_of(ForumTag::PostIdentity(post_id)))
            .await?;
        log::debug!("Deleted post {post_id} ({removed} entries)");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Topics
    // ------------------------------------------------------------------------

    /// Index a newly created topic under its title.
    ///
    /// The entry is always written active and timestamped with the current
    /// time. Use [`upsert_topic`](Self::upsert_topic) for edits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the topic's group or section is missing.
    pub async fn add_topic(&self, topic: &ForumTopic) -> Result<()> {
        let context = self.resolve_topic_context(topic).await?;
        self.add_topic_resolved(topic, &context).await
    }

    /// Re-index an edited topic: delete its own entry, then add it again.
    ///
    /// Post entries under the topic are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] before touching the index if the topic's
    /// group or section is missing.
    pub async fn upsert_topic(&self, topic: &ForumTopic) -> Result<()> {
        let context = self.resolve_topic_context(topic).await?;
        self.store
            .delete_entities_by_tags(&tag_set_of(ForumTag::TopicIdentity(topic.id)))
            .await?;
        self.add_topic_resolved(topic, &context).await
    }

    async fn add_topic_resolved(&self, topic: &ForumTopic, context: &TagContext) -> Result<()> {
        log::debug!(
            "Indexing topic {} in group {} (public: {})",
            topic.id,
            context.group_id,
            context.public
        );

        let entry = SearchableEntity::builder(EntityType::Topic, topic.id.get())
            .body(topic.title.clone())
            .timestamp(chrono::Utc::now().timestamp())
            .tags(tags::topic_tags(topic, context))
            .status(EntityStatus::Active)
            .build();
        self.store.add_entity(entry).await
    }

    /// Remove a topic's own entry and every post entry filed under it.
    pub async fn delete_topic(&self, topic_id: TopicId) -> Result<()> {
        let removed = self
            .store
            .delete_entities_by_tags(&tags::topic_family_tags(topic_id))
            .await?;
        log::debug!("Deleted topic {topic_id} with its posts ({removed} entries)");
        Ok(())
    }

    /// Activate or deactivate a topic and every post entry filed under it.
    ///
    /// This is the moderation hook; nothing is deleted.
    pub async fn set_topic_status(&self, topic_id: TopicId, active: bool) -> Result<()> {
        let status = EntityStatus::from_active(active);
        let updated = self
            .store
            .set_entities_status_by_tags(&tags::topic_family_tags(topic_id), status)
            .await?;
        log::debug!("Set topic {topic_id} {status} ({updated} entries)");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Bulk lifecycle
    // ------------------------------------------------------------------------

    /// Activate every forum entry in the index.
    pub async fn activate_all(&self) -> Result<()> {
        let updated = self
            .store
            .activate_entities_by_tags(&tags::all_forum_tags())
            .await?;
        log::info!("Activated all forum entries ({updated})");
        Ok(())
    }

    /// Deactivate every forum entry in the index.
    pub async fn deactivate_all(&self) -> Result<()> {
        let updated = self
            .store
            .deactivate_entities_by_tags(&tags::all_forum_tags())
            .await?;
        log::info!("Deactivated all forum entries ({updated})");
        Ok(())
    }

    /// Delete every forum entry in the index. Other entity families sharing
    /// the index are untouched.
    pub async fn purge_all(&self) -> Result<()> {
        let removed = self
            .store
            .delete_entities_by_tags(&tags::all_forum_tags())
            .await?;
        log::info!("Purged all forum entries ({removed})");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// Search active entries of `kind` inside `scope`, newest first.
    ///
    /// `limit` of `None` uses the store's default limit.
    pub async fn search(
        &self,
        kind: EntityType,
        text: &str,
        scope: SearchScope,
        limit: Option<usize>,
    ) -> Result<Vec<SearchableEntity>> {
        let mut query = EntityQuery::new(kind, text).with_tag(scope.tag(kind));
        query.limit = limit;
        let found = self.store.find_entities(&query).await?;
        log::debug!(
            "Search {kind} '{text}' in {:?} -> {} results",
            scope,
            found.len()
        );
        Ok(found)
    }

    // ------------------------------------------------------------------------
    // Metadata resolution
    // ------------------------------------------------------------------------

    pub(crate) async fn resolve_topic(&self, id: TopicId) -> Result<TopicInfo> {
        self.lookup
            .topic_info(id)
            .await?
            .ok_or_else(|| Error::not_found("topic", id))
    }

    async fn resolve_topic_context(&self, topic: &ForumTopic) -> Result<TagContext> {
        let group = self.resolve_group(topic.group_id).await?;
        let section = self.resolve_section(group.section_id).await?;
        Ok(TagContext::new(topic.user_id, &group, &section))
    }

    async fn resolve_group(&self, id: GroupId) -> Result<GroupInfo> {
        self.lookup
            .group_info(id)
            .await?
            .ok_or_else(|| Error::not_found("group", id))
    }

    async fn resolve_section(&self, id: SectionId) -> Result<SectionInfo> {
        self.lookup
            .section_info(id)
            .await?
            .ok_or_else(|| Error::not_found("section", id))
    }
}

impl std::fmt::Debug for ForumSearchSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForumSearchSync")
            .field("store", &self.store.name())
            .finish()
    }
}

fn tag_set_of(tag: ForumTag) -> TagSet {
    tags::tag_set([tag])
}

// ============================================================================
// Tests
// ============================================================================
