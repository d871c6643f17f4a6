//! In-process index store.
//!
//! `MemoryIndexStore` keeps entities in a map keyed by identity. It is the
//! default backend and the reference behaviour other stores are tested
//! against.
//!
//! # Limitations
//!
//! - O(n) tag operations and reads
//! - Substring matching only, no stemming or ranking
//! - Nothing survives the process

use std::collections::BTreeMap;

use async_trait::async_trait;
use forum_search_core::Result;
use tokio::sync::RwLock;

use crate::entity::{EntityStatus, EntityType, SearchableEntity};
use crate::store::{EntityQuery, IndexStore};
use crate::tags::TagSet;
use crate::types::IndexConfig;

/// In-memory index store.
pub struct MemoryIndexStore {
    entities: RwLock<BTreeMap<(EntityType, u64), SearchableEntity>>,
    default_limit: usize,
}

impl MemoryIndexStore {
    /// Create an empty store with default settings.
    pub fn new() -> Self {
        Self::from_config(&IndexConfig::default())
    }

    /// Create an empty store using `config.default_limit` for unbounded reads.
    pub fn from_config(config: &IndexConfig) -> Self {
        Self {
            entities: RwLock::new(BTreeMap::new()),
            default_limit: config.default_limit,
        }
    }

    /// Snapshot of every stored entity, ordered by identity.
    pub async fn entities(&self) -> Vec<SearchableEntity> {
        self.entities.read().await.values().cloned().collect()
    }

    /// Look up one entity by identity.
    pub async fn get(&self, entity_type: EntityType, entity_id: u64) -> Option<SearchableEntity> {
        self.entities
            .read()
            .await
            .get(&(entity_type, entity_id))
            .cloned()
    }

    /// Entities carrying `tag`, ordered by identity.
    pub async fn entities_with_tag(&self, tag: &str) -> Vec<SearchableEntity> {
        self.entities
            .read()
            .await
            .values()
            .filter(|e| e.tags.contains(tag))
            .cloned()
            .collect()
    }

    /// Number of stored entities.
    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    /// True if the store holds no entities.
    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }
}

impl Default for MemoryIndexStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IndexStore for MemoryIndexStore {
    async fn add_entity(&self, entity: SearchableEntity) -> Result<()> {
        log::debug!(
            "MemoryIndexStore: add {} ({} tags, {})",
            entity.key(),
            entity.tags.len(),
            entity.status
        );
        self.entities
            .write()
            .await
            .insert((entity.entity_type, entity.entity_id), entity);
        Ok(())
    }

    async fn delete_entities_by_tags(&self, tags: &TagSet) -> Result<usize> {
        let mut entities = self.entities.write().await;
        let before = entities.len();
        entities.retain(|_, e| !e.tags.intersects(tags));
        let removed = before - entities.len();
        log::debug!("MemoryIndexStore: deleted {removed} entities by {tags}");
        Ok(removed)
    }

    async fn set_entities_status_by_tags(
        &self,
        tags: &TagSet,
        status: EntityStatus,
    ) -> Result<usize> {
        let mut entities = self.entities.write().await;
        let mut updated = 0;
        for entity in entities.values_mut().filter(|e| e.tags.intersects(tags)) {
            entity.status = status;
            updated += 1;
        }
        log::debug!("MemoryIndexStore: set {updated} entities {status} by {tags}");
        Ok(updated)
    }

    async fn find_entities(&self, query: &EntityQuery) -> Result<Vec<SearchableEntity>> {
        let limit = query.limit.unwrap_or(self.default_limit);
        let mut found: Vec<SearchableEntity> = self
            .entities
            .read()
            .await
            .values()
            .filter(|e| query.matches(e))
            .cloned()
            .collect();

        found.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then(a.entity_id.cmp(&b.entity_id))
        });
        found.truncate(limit);

        log::debug!(
            "MemoryIndexStore: query='{}' type={} tags={} -> {} results",
            query.text,
            query.entity_type,
            query.tags,
            found.len()
        );
        Ok(found)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

impl std::fmt::Debug for MemoryIndexStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryIndexStore")
            .field("default_limit", &self.default_limit)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
