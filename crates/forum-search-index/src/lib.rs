//! Tag-addressable search index for forum content.
//!
//! This crate models the external text-search index that forum content is
//! synchronised into. Entities are addressed by `(entity type, entity id)`
//! and carry a set of opaque tags; every lifecycle operation (delete,
//! activate, deactivate) is expressed as "apply to every entity carrying any
//! of these tags".
//!
//! # Features
//!
//! - `index-tantivy`: Enable the Tantivy-backed store
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   forum-search-index                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  IndexStore trait                                           │
//! │  ├── MemoryIndexStore (in-process reference store)          │
//! │  └── TantivyIndexStore (persistent, Tantivy)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SearchableEntity / EntityType / EntityStatus               │
//! │  TagSet (tag value type, OR-semantics for bulk operations)  │
//! │  EntityQuery (scoped, AND-semantics reads)                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  IndexConfig + create_index_store                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Tag semantics
//!
//! | Operation | Tags match when |
//! |-----------|-----------------|
//! | `delete_entities_by_tags` | entity carries ANY requested tag |
//! | `set_entities_status_by_tags` | entity carries ANY requested tag |
//! | `find_entities` | entity carries ALL requested tags |
//!
//! # Example
//!
//! ```rust,ignore
//! use forum_search_index::{create_index_store, EntityType, IndexConfig, SearchableEntity, TagSet};
//!
//! let store = create_index_store(&IndexConfig::default())?;
//!
//! let entity = SearchableEntity::builder(EntityType::Post, 42)
//!     .body("hello")
//!     .timestamp(1000)
//!     .tags(TagSet::from_iter(["forum_post", "forum_post_id_42"]))
//!     .build();
//! store.add_entity(entity).await?;
//!
//! store.delete_entities_by_tags(&TagSet::from_iter(["forum_post_id_42"])).await?;
//! ```

// Core modules (always available)
pub mod entity;
pub mod memory;
pub mod store;
pub mod tags;
pub mod types;

// Feature-gated Tantivy modules
#[cfg(feature = "index-tantivy")]
pub mod schema;

#[cfg(feature = "index-tantivy")]
pub mod tantivy_store;

// Re-exports
pub use entity::{EntityStatus, EntityType, SearchableEntity, SearchableEntityBuilder};
pub use memory::MemoryIndexStore;
pub use store::{create_index_store, EntityQuery, IndexStore};
pub use tags::TagSet;
pub use types::IndexConfig;

#[cfg(feature = "index-tantivy")]
pub use schema::{IndexMetadata, IndexSchema};

#[cfg(feature = "index-tantivy")]
pub use tantivy_store::TantivyIndexStore;
