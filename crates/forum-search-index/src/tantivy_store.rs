//! Tantivy-backed index store.
//!
//! Provides `TantivyIndexStore`, a persistent `IndexStore`. This module is
//! only available with the `index-tantivy` feature.
//!
//! Tantivy documents are immutable, so identity replacement and status
//! changes are a `delete_term` on the entity key followed by a re-add, both
//! inside one commit. Every trait call commits and reloads the reader before
//! returning, so a later call always observes an earlier one.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use forum_search_core::{Error, Result};
use tantivy::collector::DocSetCollector;
use tantivy::query::{AllQuery, BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};

use crate::entity::{EntityStatus, SearchableEntity, entity_key};
use crate::schema::{IndexMetadata, IndexSchema};
use crate::store::{EntityQuery, IndexStore};
use crate::tags::TagSet;
use crate::types::IndexConfig;

/// Tantivy-based index store.
pub struct TantivyIndexStore {
    index: Index,
    schema: IndexSchema,
    writer: Mutex<IndexWriter>,
    reader: IndexReader,
    default_limit: usize,
}

impl TantivyIndexStore {
    /// Create or open a Tantivy index in `index_path`.
    ///
    /// If the directory holds no index yet, a new one is created. An existing
    /// index built with another schema version is refused with
    /// [`Error::Config`].
    pub fn open(index_path: &Path, config: &IndexConfig) -> Result<Self> {
        if !index_path.exists() {
            std::fs::create_dir_all(index_path).map_err(|e| Error::io_with_path(e, index_path))?;
        }

        let schema = IndexSchema::build();
        let index = if Self::index_exists(index_path) {
            IndexMetadata::check(index_path)?;
            Index::open_in_dir(index_path)
                .map_err(|e| Error::index_unavailable_with_source("Failed to open index", e))?
        } else {
            let index = Index::create_in_dir(index_path, schema.schema().clone())
                .map_err(|e| Error::index_unavailable_with_source("Failed to create index", e))?;
            IndexMetadata::default().save(index_path)?;
            index
        };

        log::info!("Opened Tantivy index at {}", index_path.display());
        Self::from_index(index, schema, config)
    }

    /// Create an index held entirely in RAM.
    pub fn in_memory(config: &IndexConfig) -> Result<Self> {
        let schema = IndexSchema::build();
        let index = Index::create_in_ram(schema.schema().clone());
        Self::from_index(index, schema, config)
    }

    /// Check if an index exists at the given path.
    pub fn index_exists(index_path: &Path) -> bool {
        index_path.join("meta.json").exists()
    }

    fn from_index(index: Index, schema: IndexSchema, config: &IndexConfig) -> Result<Self> {
        IndexSchema::register_tokenizers(&index);

        let writer: IndexWriter = index
            .writer(config.writer_buffer_bytes)
            .map_err(|e| Error::index_unavailable_with_source("Failed to create index writer", e))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| Error::index_unavailable_with_source("Failed to create index reader", e))?;

        Ok(Self {
            index,
            schema,
            writer: Mutex::new(writer),
            reader,
            default_limit: config.default_limit,
        })
    }

    fn lock_writer(&self) -> Result<MutexGuard<'_, IndexWriter>> {
        self.writer
            .lock()
            .map_err(|_| Error::index_unavailable("Index writer lock poisoned"))
    }

    fn commit(&self, writer: &mut IndexWriter) -> Result<()> {
        writer
            .commit()
            .map_err(|e| Error::index_unavailable_with_source("Failed to commit index", e))?;
        self.reader
            .reload()
            .map_err(|e| Error::index_unavailable_with_source("Failed to reload index reader", e))
    }

    fn term_query(field: Field, value: &str) -> Box<dyn Query> {
        Box::new(TermQuery::new(
            Term::from_field_text(field, value),
            IndexRecordOption::Basic,
        ))
    }

    /// Query matching entities carrying any of `tags`.
    fn any_tag_query(&self, tags: &TagSet) -> Box<dyn Query> {
        let clauses = tags
            .iter()
            .map(|tag| Self::term_query(self.schema.tags, tag))
            .collect();
        Box::new(BooleanQuery::union(clauses))
    }

    fn text_query(&self, text: &str) -> Box<dyn Query> {
        let text = text.trim();
        if text.is_empty() || text == "*" {
            return Box::new(AllQuery);
        }
        let parser = QueryParser::for_index(&self.index, vec![self.schema.body]);
        let (query, errors) = parser.parse_query_lenient(text);
        if !errors.is_empty() {
            log::debug!("TantivyIndexStore: lenient parse of '{text}' dropped {errors:?}");
        }
        query
    }

    fn collect(&self, query: &dyn Query) -> Result<Vec<SearchableEntity>> {
        let searcher = self.reader.searcher();
        let addresses = searcher
            .search(query, &DocSetCollector)
            .map_err(|e| Error::index_unavailable_with_source("Index search failed", e))?;

        addresses
            .into_iter()
            .map(|address| {
                let doc: TantivyDocument = searcher
                    .doc(address)
                    .map_err(|e| Error::index_unavailable_with_source("Failed to load document", e))?;
                self.entity_from_document(&doc)
            })
            .collect()
    }

    fn to_document(&self, entity: &SearchableEntity) -> TantivyDocument {
        let s = &self.schema;
        let mut doc = TantivyDocument::new();

        // Identity fields
        doc.add_text(s.key, entity.key());
        doc.add_text(s.entity_type, entity.entity_type.as_str());
        doc.add_u64(s.entity_id, entity.entity_id);

        // Full-text fields
        doc.add_text(s.body, &entity.body);

        // Addressing fields
        for tag in entity.tags.iter() {
            doc.add_text(s.tags, tag);
        }
        doc.add_text(s.status, entity.status.as_str());

        // Metadata fields
        doc.add_i64(s.timestamp, entity.timestamp);

        doc
    }

    fn entity_from_document(&self, doc: &TantivyDocument) -> Result<SearchableEntity> {
        let s = &self.schema;
        let text = |field: Field, name: &str| -> Result<String> {
            doc.get_first(field)
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .ok_or_else(|| Error::index_unavailable(format!("Stored document lacks {name}")))
        };

        let entity_id = doc
            .get_first(s.entity_id)
            .and_then(|v| v.as_u64())
            .ok_or_else(|| Error::index_unavailable("Stored document lacks entity_id"))?;
        let timestamp = doc
            .get_first(s.timestamp)
            .and_then(|v| v.as_i64())
            .unwrap_or_default();

        Ok(SearchableEntity {
            entity_type: text(s.entity_type, "entity_type")?.parse()?,
            entity_id,
            body: doc
                .get_first(s.body)
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_default(),
            timestamp,
            tags: doc
                .get_all(s.tags)
                .filter_map(|v| v.as_str())
                .collect(),
            status: text(s.status, "status")?.parse()?,
        })
    }

    fn add_entity_blocking(&self, entity: &SearchableEntity) -> Result<()> {
        let mut writer = self.lock_writer()?;
        writer.delete_term(Term::from_field_text(self.schema.key, &entity.key()));
        writer
            .add_document(self.to_document(entity))
            .map_err(|e| Error::index_unavailable_with_source("Failed to add document", e))?;
        self.commit(&mut writer)
    }

    fn delete_by_tags_blocking(&self, tags: &TagSet) -> Result<usize> {
        if tags.is_empty() {
            return Ok(0);
        }
        let mut writer = self.lock_writer()?;
        let matched = self.collect(self.any_tag_query(tags).as_ref())?.len();
        for tag in tags.iter() {
            writer.delete_term(Term::from_field_text(self.schema.tags, tag));
        }
        self.commit(&mut writer)?;
        Ok(matched)
    }

    fn set_status_blocking(&self, tags: &TagSet, status: EntityStatus) -> Result<usize> {
        if tags.is_empty() {
            return Ok(0);
        }
        let mut writer = self.lock_writer()?;
        let matched = self.collect(self.any_tag_query(tags).as_ref())?;
        for mut entity in matched.iter().cloned() {
            entity.status = status;
            writer.delete_term(Term::from_field_text(self.schema.key, &entity.key()));
            writer
                .add_document(self.to_document(&entity))
                .map_err(|e| Error::index_unavailable_with_source("Failed to add document", e))?;
        }
        self.commit(&mut writer)?;
        Ok(matched.len())
    }

    fn find_blocking(&self, query: &EntityQuery) -> Result<Vec<SearchableEntity>> {
        let s = &self.schema;
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = vec![
            (
                Occur::Must,
                Self::term_query(s.entity_type, query.entity_type.as_str()),
            ),
            (
                Occur::Must,
                Self::term_query(s.status, EntityStatus::Active.as_str()),
            ),
            (Occur::Must, self.text_query(&query.text)),
        ];
        for tag in query.tags.iter() {
            clauses.push((Occur::Must, Self::term_query(s.tags, tag)));
        }

        let mut found = self.collect(&BooleanQuery::new(clauses))?;
        found.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then(a.entity_id.cmp(&b.entity_id))
        });
        found.truncate(query.limit.unwrap_or(self.default_limit));
        Ok(found)
    }

    /// Look up one entity by identity, regardless of status.
    pub fn get(
        &self,
        entity_type: crate::entity::EntityType,
        entity_id: u64,
    ) -> Result<Option<SearchableEntity>> {
        let key = entity_key(entity_type, entity_id);
        let found = self.collect(Self::term_query(self.schema.key, &key).as_ref())?;
        Ok(found.into_iter().next())
    }

    /// Entities carrying `tag`, regardless of status.
    pub fn entities_with_tag(&self, tag: &str) -> Result<Vec<SearchableEntity>> {
        self.collect(Self::term_query(self.schema.tags, tag).as_ref())
    }
}

#[async_trait]
impl IndexStore for TantivyIndexStore {
    async fn add_entity(&self, entity: SearchableEntity) -> Result<()> {
        log::debug!(
            "TantivyIndexStore: add {} ({} tags, {})",
            entity.key(),
            entity.tags.len(),
            entity.status
        );
        self.add_entity_blocking(&entity)
    }

    async fn delete_entities_by_tags(&self, tags: &TagSet) -> Result<usize> {
        let removed = self.delete_by_tags_blocking(tags)?;
        log::debug!("TantivyIndexStore: deleted {removed} entities by {tags}");
        Ok(removed)
    }

    async fn set_entities_status_by_tags(
        &self,
        tags: &TagSet,
        status: EntityStatus,
    ) -> Result<usize> {
        let updated = self.set_status_blocking(tags, status)?;
        log::debug!("TantivyIndexStore: set {updated} entities {status} by {tags}");
        Ok(updated)
    }

    async fn find_entities(&self, query: &EntityQuery) -> Result<Vec<SearchableEntity>> {
        self.find_blocking(query)
    }

    fn name(&self) -> &str {
        "tantivy"
    }
}

impl std::fmt::Debug for TantivyIndexStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TantivyIndexStore")
            .field("index", &"<tantivy::Index>")
            .field("default_limit", &self.default_limit)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
