//! Forum metadata lookup.
//!
//! The sync layer never owns forum records; it resolves a topic's group and
//! a group's section through a [`ForumMetadataLookup`] before writing to the
//! index. A lookup returns `Ok(None)` when a record does not exist and keeps
//! `Err` for lookup infrastructure failures.

use std::collections::HashMap;

use async_trait::async_trait;
use forum_search_core::{GroupId, Result, SectionId, TopicId};
use tokio::sync::RwLock;

use crate::records::{GroupInfo, ModerationStatus, SectionInfo, TopicInfo};

/// Read-only access to forum topic, group and section metadata.
#[async_trait]
pub trait ForumMetadataLookup: Send + Sync {
    /// Resolve a topic.
    async fn topic_info(&self, id: TopicId) -> Result<Option<TopicInfo>>;

    /// Resolve a group.
    async fn group_info(&self, id: GroupId) -> Result<Option<GroupInfo>>;

    /// Resolve a section.
    async fn section_info(&self, id: SectionId) -> Result<Option<SectionInfo>>;
}

/// In-memory metadata lookup.
///
/// Useful for tests and for rebuilding an index from an export of the forum
/// tables.
#[derive(Debug, Default)]
pub struct MemoryForumLookup {
    topics: RwLock<HashMap<TopicId, TopicInfo>>,
    groups: RwLock<HashMap<GroupId, GroupInfo>>,
    sections: RwLock<HashMap<SectionId, SectionInfo>>,
}

impl MemoryForumLookup {
    /// Create an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style section registration.
    pub fn with_section(mut self, section: SectionInfo) -> Self {
        self.sections.get_mut().insert(section.id, section);
        self
    }

    /// Builder-style group registration.
    pub fn with_group(mut self, group: GroupInfo) -> Self {
        self.groups.get_mut().insert(group.id, group);
        self
    }

    /// Builder-style topic registration.
    pub fn with_topic(mut self, topic: TopicInfo) -> Self {
        self.topics.get_mut().insert(topic.id, topic);
        self
    }

    /// Register or replace a section.
    pub async fn insert_section(&self, section: SectionInfo) {
        self.sections.write().await.insert(section.id, section);
    }

    /// Register or replace a group.
    pub async fn insert_group(&self, group: GroupInfo) {
        self.groups.write().await.insert(group.id, group);
    }

    /// Register or replace a topic.
    pub async fn insert_topic(&self, topic: TopicInfo) {
        self.topics.write().await.insert(topic.id, topic);
    }

    /// Forget a topic.
    pub async fn remove_topic(&self, id: TopicId) -> Option<TopicInfo> {
        self.topics.write().await.remove(&id)
    }

    /// Change a topic's moderation state. Returns `false` if the topic is unknown.
    pub async fn set_topic_status(&self, id: TopicId, status: ModerationStatus) -> bool {
        match self.topics.write().await.get_mut(&id) {
            Some(topic) => {
                topic.status = status;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl ForumMetadataLookup for MemoryForumLookup {
    async fn topic_info(&self, id: TopicId) -> Result<Option<TopicInfo>> {
        Ok(self.topics.read().await.get(&id).cloned())
    }

    async fn group_info(&self, id: GroupId) -> Result<Option<GroupInfo>> {
        Ok(self.groups.read().await.get(&id).cloned())
    }

    async fn section_info(&self, id: SectionId) -> Result<Option<SectionInfo>> {
        Ok(self.sections.read().await.get(&id).cloned())
    }
}

// ============================================================================
// Tests
// ============================================================================
