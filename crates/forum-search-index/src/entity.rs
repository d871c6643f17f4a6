//! Searchable entity representation.
//!
//! This module defines `SearchableEntity`, one record in the search index,
//! identified by `(EntityType, entity_id)`. Stores keep at most one record per
//! identity: writing an entity with an existing identity replaces it.
//!
//! # Creating Entities
//!
//! ```rust
//! use forum_search_index::{EntityStatus, EntityType, SearchableEntity, TagSet};
//!
//! let entity = SearchableEntity::builder(EntityType::Post, 42)
//!     .body("hello")
//!     .timestamp(1000)
//!     .tags(TagSet::from_iter(["forum_post"]))
//!     .build();
//!
//! assert_eq!(entity.status, EntityStatus::Active);
//! assert_eq!(entity.key(), "forum_post:42");
//! ```

use std::fmt;
use std::str::FromStr;

use forum_search_core::Error;
use serde::{Deserialize, Serialize};

use crate::tags::TagSet;

/// Kind of forum content an index entity represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// A forum topic (or a post's contribution to its topic).
    #[serde(rename = "forum_topic")]
    Topic,
    /// A single forum post.
    #[serde(rename = "forum_post")]
    Post,
}

impl EntityType {
    /// Stable string name, also the global-scope tag for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Topic => "forum_topic",
            Self::Post => "forum_post",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forum_topic" => Ok(Self::Topic),
            "forum_post" => Ok(Self::Post),
            other => Err(Error::index_unavailable(format!(
                "unknown entity type in index: {other}"
            ))),
        }
    }
}

/// Visibility of an entity to search queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    /// Returned by searches.
    #[default]
    Active,
    /// Kept in the index but hidden from searches.
    NotActive,
}

impl EntityStatus {
    /// Map a boolean "is active" flag to a status.
    pub fn from_active(active: bool) -> Self {
        if active { Self::Active } else { Self::NotActive }
    }

    /// Stable string name used by persistent stores.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::NotActive => "not_active",
        }
    }

    /// True for [`EntityStatus::Active`].
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "not_active" => Ok(Self::NotActive),
            other => Err(Error::index_unavailable(format!(
                "unknown entity status in index: {other}"
            ))),
        }
    }
}

/// One record in the search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchableEntity {
    // Identity
    /// Kind of content.
    pub entity_type: EntityType,
    /// Identifier, unique within `entity_type`.
    pub entity_id: u64,

    // Indexed content
    /// Text matched by full-text queries.
    pub body: String,
    /// Creation/sort time, seconds since the Unix epoch.
    pub timestamp: i64,

    // Addressing
    /// Scope and identity tags (not full-text searched).
    pub tags: TagSet,
    /// Visibility to search queries.
    pub status: EntityStatus,
}

impl SearchableEntity {
    /// Create a new entity builder for the given identity.
    pub fn builder(entity_type: EntityType, entity_id: u64) -> SearchableEntityBuilder {
        SearchableEntityBuilder::new(entity_type, entity_id)
    }

    /// Unique key of this entity's identity, e.g. `forum_post:42`.
    pub fn key(&self) -> String {
        entity_key(self.entity_type, self.entity_id)
    }

    /// Check if the body matches a query (case-insensitive substring match).
    ///
    /// An empty query or `*` matches everything.
    pub fn matches_text(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() || query == "*" {
            return true;
        }
        self.body.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Key for an entity identity, shared by all stores.
pub fn entity_key(entity_type: EntityType, entity_id: u64) -> String {
    format!("{entity_type}:{entity_id}")
}

/// Builder for SearchableEntity.
#[derive(Debug)]
pub struct SearchableEntityBuilder {
    entity: SearchableEntity,
}

impl SearchableEntityBuilder {
    fn new(entity_type: EntityType, entity_id: u64) -> Self {
        Self {
            entity: SearchableEntity {
                entity_type,
                entity_id,
                body: String::new(),
                timestamp: 0,
                tags: TagSet::new(),
                status: EntityStatus::Active,
            },
        }
    }

    /// Set the indexed body text.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.entity.body = body.into();
        self
    }

    /// Set the timestamp.
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.entity.timestamp = timestamp;
        self
    }

    /// Set the tags.
    pub fn tags(mut self, tags: TagSet) -> Self {
        self.entity.tags = tags;
        self
    }

    /// Set the status (defaults to active).
    pub fn status(mut self, status: EntityStatus) -> Self {
        self.entity.status = status;
        self
    }

    /// Build the entity.
    pub fn build(self) -> SearchableEntity {
        self.entity
    }
}

// ============================================================================
// Tests
// ============================================================================
