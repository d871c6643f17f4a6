//! Index store trait and factory.
//!
//! This module defines the `IndexStore` trait that every index backend must
//! satisfy, plus the `EntityQuery` read request.
//!
//! # Backends
//!
//! - `MemoryIndexStore`: In-process store, always available
//! - `TantivyIndexStore`: Persistent store on Tantivy (requires `index-tantivy` feature)
//!
//! # Ordering
//!
//! Callers rely on writes being applied in the order they were issued: a
//! delete followed by an add of an entity with the same identity tag must
//! leave the added entity in place. Each method completes its write before
//! returning, which gives that guarantee for sequential callers.

use std::sync::Arc;

use async_trait::async_trait;
use forum_search_core::Result;
use serde::{Deserialize, Serialize};

use crate::entity::{EntityStatus, EntityType, SearchableEntity};
use crate::memory::MemoryIndexStore;
use crate::tags::TagSet;
use crate::types::IndexConfig;

/// A scoped read against the index.
///
/// Only [`EntityStatus::Active`] entities are returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityQuery {
    /// Kind of entity to return.
    pub entity_type: EntityType,

    /// Text to match against entity bodies. Empty or `*` matches everything.
    pub text: String,

    /// Scope tags; an entity must carry all of them.
    #[serde(default)]
    pub tags: TagSet,

    /// Maximum results to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl EntityQuery {
    /// Create a query for `entity_type` matching `text`.
    pub fn new(entity_type: EntityType, text: impl Into<String>) -> Self {
        Self {
            entity_type,
            text: text.into(),
            tags: TagSet::new(),
            limit: None,
        }
    }

    /// Require a scope tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Limit the number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check whether an entity satisfies this query.
    pub fn matches(&self, entity: &SearchableEntity) -> bool {
        entity.entity_type == self.entity_type
            && entity.status.is_active()
            && self.tags.is_subset_of(&entity.tags)
            && entity.matches_text(&self.text)
    }
}

/// Abstract tag-addressable index store.
///
/// Every write is an independent, idempotent request:
/// - `add_entity` replaces any entity with the same identity
/// - tag-based deletes and status changes affect entities carrying ANY of
///   the given tags, and are no-ops when nothing matches
///
/// Methods that affect many entities return how many were touched, for
/// diagnostics only.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Insert an entity, replacing any existing entity with the same identity.
    async fn add_entity(&self, entity: SearchableEntity) -> Result<()>;

    /// Delete every entity carrying any of `tags`.
    async fn delete_entities_by_tags(&self, tags: &TagSet) -> Result<usize>;

    /// Set the status of every entity carrying any of `tags`.
    async fn set_entities_status_by_tags(&self, tags: &TagSet, status: EntityStatus)
    -> Result<usize>;

    /// Mark every entity carrying any of `tags` as active.
    async fn activate_entities_by_tags(&self, tags: &TagSet) -> Result<usize> {
        self.set_entities_status_by_tags(tags, EntityStatus::Active)
            .await
    }

    /// Mark every entity carrying any of `tags` as not active.
    async fn deactivate_entities_by_tags(&self, tags: &TagSet) -> Result<usize> {
        self.set_entities_status_by_tags(tags, EntityStatus::NotActive)
            .await
    }

    /// Return active entities matching `query`, newest first.
    async fn find_entities(&self, query: &EntityQuery) -> Result<Vec<SearchableEntity>>;

    /// Get the store name for diagnostics.
    fn name(&self) -> &str;
}

/// Create an index store based on configuration.
///
/// Selection logic:
/// 1. `backend = "tantivy"` with the `index-tantivy` feature → `TantivyIndexStore`
///    (on disk when `index_path` is set, in RAM otherwise)
/// 2. Otherwise → `MemoryIndexStore`
///
/// # Errors
///
/// Returns an error if the Tantivy index cannot be opened or created.
pub fn create_index_store(config: &IndexConfig) -> Result<Arc<dyn IndexStore>> {
    match config.backend.as_str() {
        #[cfg(feature = "index-tantivy")]
        "tantivy" => {
            let store = match config.index_path {
                Some(ref index_path) => crate::tantivy_store::TantivyIndexStore::open(
                    std::path::Path::new(index_path),
                    config,
                )?,
                None => crate::tantivy_store::TantivyIndexStore::in_memory(config)?,
            };
            Ok(Arc::new(store))
        }
        "memory" => Ok(Arc::new(MemoryIndexStore::from_config(config))),
        other => {
            log::warn!("Index backend '{other}' is not available, falling back to memory store");
            Ok(Arc::new(MemoryIndexStore::from_config(config)))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
