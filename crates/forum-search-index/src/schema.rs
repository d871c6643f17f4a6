//! Tantivy schema for the forum entity index.
//!
//! # Schema Fields
//!
//! ## Identity Fields
//! - `key`: `<entity_type>:<entity_id>`, unique per entity (STRING | STORED)
//! - `entity_type`: `forum_topic` or `forum_post` (STRING | STORED)
//! - `entity_id`: numeric id (STORED)
//!
//! ## Full-Text Fields
//! - `body`: indexed text (TEXT | STORED), `en_stem` tokenizer
//!
//! ## Addressing Fields
//! - `tags`: one raw term per tag (STRING | STORED)
//! - `status`: `active` or `not_active` (STRING | STORED)
//!
//! ## Metadata Fields
//! - `timestamp`: sort time (STORED)
//!
//! # Tokenizer
//!
//! `body` uses an English stemming tokenizer (`en_stem`):
//! SimpleTokenizer → LowerCaser → Stemmer(English)
//!
//! # Versioning
//!
//! On-disk indexes carry an [`IndexMetadata`] file recording the schema
//! version they were built with. An index written with another version is
//! refused on open and must be rebuilt.

use std::path::Path;

use forum_search_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tantivy::Index;
use tantivy::schema::{
    Field, IndexRecordOption, STORED, STRING, Schema, SchemaBuilder, TextFieldIndexing,
    TextOptions,
};
use tantivy::tokenizer::{Language, LowerCaser, SimpleTokenizer, Stemmer, TextAnalyzer};

/// Schema version stored alongside on-disk indexes.
///
/// Increment this when schema fields change; existing indexes are then
/// refused by [`IndexMetadata::check`] until rebuilt.
pub const SCHEMA_VERSION: u32 = 1;

/// Name of the metadata file inside an index directory.
pub const METADATA_FILE: &str = "forum_index_meta.json";

/// Name of the stemming tokenizer registered on every index.
pub const BODY_TOKENIZER: &str = "en_stem";

/// Index schema holding field references and the Tantivy schema.
#[derive(Clone)]
pub struct IndexSchema {
    schema: Schema,

    // Identity fields
    /// Unique `<entity_type>:<entity_id>` key.
    pub key: Field,
    /// Entity type name.
    pub entity_type: Field,
    /// Numeric entity id.
    pub entity_id: Field,

    // Full-text fields
    /// Indexed body text.
    pub body: Field,

    // Addressing fields
    /// Tags, one raw term each.
    pub tags: Field,
    /// Entity status name.
    pub status: Field,

    // Metadata fields
    /// Creation/sort time.
    pub timestamp: Field,
}

impl IndexSchema {
    /// Build the entity index schema.
    pub fn build() -> Self {
        let mut builder = SchemaBuilder::new();

        let body_options = TextOptions::default()
            .set_indexing_options(
                TextFieldIndexing::default()
                    .set_tokenizer(BODY_TOKENIZER)
                    .set_index_option(IndexRecordOption::WithFreqsAndPositions),
            )
            .set_stored();

        // Identity fields
        let key = builder.add_text_field("key", STRING | STORED);
        let entity_type = builder.add_text_field("entity_type", STRING | STORED);
        let entity_id = builder.add_u64_field("entity_id", STORED);

        // Full-text fields
        let body = builder.add_text_field("body", body_options);

        // Addressing fields
        let tags = builder.add_text_field("tags", STRING | STORED);
        let status = builder.add_text_field("status", STRING | STORED);

        // Metadata fields
        let timestamp = builder.add_i64_field("timestamp", STORED);

        let schema = builder.build();

        Self {
            schema,
            key,
            entity_type,
            entity_id,
            body,
            tags,
            status,
            timestamp,
        }
    }

    /// Get the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Register custom tokenizers with a Tantivy index.
    ///
    /// Must be called after creating/opening an index.
    pub fn register_tokenizers(index: &Index) {
        let en_stem = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .filter(Stemmer::new(Language::English))
            .build();

        index.tokenizers().register(BODY_TOKENIZER, en_stem);
    }
}

impl std::fmt::Debug for IndexSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexSchema")
            .field("version", &SCHEMA_VERSION)
            .finish()
    }
}

/// Metadata persisted next to an on-disk index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// Schema version the index was built with.
    pub schema_version: u32,
}

impl Default for IndexMetadata {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
        }
    }
}

impl IndexMetadata {
    /// Load metadata from an index directory.
    ///
    /// Returns `Ok(None)` if the metadata file doesn't exist.
    pub fn load(index_path: &Path) -> Result<Option<Self>> {
        let metadata_path = index_path.join(METADATA_FILE);
        if !metadata_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&metadata_path)
            .map_err(|e| Error::io_with_path(e, &metadata_path))?;
        let metadata = serde_json::from_str(&content)
            .map_err(|e| Error::config(format!("Invalid index metadata JSON: {e}")))?;
        Ok(Some(metadata))
    }

    /// Save metadata into an index directory.
    pub fn save(&self, index_path: &Path) -> Result<()> {
        let metadata_path = index_path.join(METADATA_FILE);
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize index metadata: {e}")))?;
        std::fs::write(&metadata_path, content).map_err(|e| Error::io_with_path(e, &metadata_path))
    }

    /// Refuse an index built with a different schema version.
    ///
    /// A missing metadata file counts as a mismatch.
    pub fn check(index_path: &Path) -> Result<()> {
        let stored = Self::load(index_path)?.map(|m| m.schema_version);
        if stored == Some(SCHEMA_VERSION) {
            return Ok(());
        }
        log::warn!(
            "Schema version mismatch at {}: stored={:?}, current={}",
            index_path.display(),
            stored,
            SCHEMA_VERSION
        );
        Err(Error::config(format!(
            "Index at {} was built with schema version {}, expected {SCHEMA_VERSION}; rebuild it",
            index_path.display(),
            stored.map_or_else(|| "unknown".to_string(), |v| v.to_string()),
        )))
    }
}

// ============================================================================
// Tests
// ============================================================================
