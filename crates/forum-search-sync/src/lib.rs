//! Forum search index synchronisation.
//!
//! This crate keeps a tag-addressable search index consistent with forum
//! topics and posts. Content handlers call [`ForumSearchSync`] when a post
//! or topic is created, edited, deleted or moderated; the service resolves
//! the content's group and section through a [`ForumMetadataLookup`],
//! derives the tags that scope the content, and issues delete, insert and
//! status requests against an [`IndexStore`](forum_search_index::IndexStore).
//!
//! # Modules
//!
//! - [`records`]: Forum content and metadata records
//! - [`tags`]: Tag vocabulary shared by writes and scoped reads
//! - [`scope`]: Search scopes
//! - [`lookup`]: Metadata lookup trait and in-memory implementation
//! - [`sync`]: The sync service
//! - [`rebuild`]: Full re-index
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use forum_search_index::{create_index_store, EntityType, IndexConfig};
//! use forum_search_sync::{ForumSearchSync, MemoryForumLookup, SearchScope};
//!
//! let store = create_index_store(&IndexConfig::default())?;
//! let sync = ForumSearchSync::new(Arc::new(MemoryForumLookup::new()), store);
//!
//! sync.upsert_post(&post).await?;
//! let hits = sync
//!     .search(EntityType::Post, "hello", SearchScope::Public, Some(10))
//!     .await?;
//! ```

pub mod lookup;
pub mod rebuild;
pub mod records;
pub mod scope;
pub mod sync;
pub mod tags;

pub use lookup::{ForumMetadataLookup, MemoryForumLookup};
pub use rebuild::RebuildStats;
pub use records::{ForumPost, ForumTopic, GroupInfo, ModerationStatus, SectionInfo, TopicInfo};
pub use scope::SearchScope;
pub use sync::ForumSearchSync;
pub use tags::{ForumTag, TagContext};

// Re-export the types callers need alongside the service.
pub use forum_search_core::{Error, GroupId, PostId, Result, SectionId, TopicId, UserId};
pub use forum_search_index::{EntityStatus, EntityType, SearchableEntity, TagSet};
