//! Configuration types for index stores.
//!
//! These types are always available regardless of feature flags.

use std::path::Path;

use forum_search_core::Result;
use serde::{Deserialize, Serialize};

/// Index store configuration.
///
/// Typically read from the `[index]` table of the host's TOML config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Backend type: "memory" or "tantivy".
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Directory holding the Tantivy index. `None` keeps the index in RAM.
    pub index_path: Option<String>,

    /// Tantivy writer memory budget in bytes.
    #[serde(default = "default_writer_buffer_bytes")]
    pub writer_buffer_bytes: usize,

    /// Result limit for reads that do not specify one.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

fn default_backend() -> String {
    "memory".to_string()
}

fn default_writer_buffer_bytes() -> usize {
    50_000_000
}

fn default_limit() -> usize {
    20
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            index_path: None,
            writer_buffer_bytes: default_writer_buffer_bytes(),
            default_limit: default_limit(),
        }
    }
}

impl IndexConfig {
    /// Load configuration from a TOML file, using defaults if it is absent.
    pub fn load(path: &Path) -> Result<Self> {
        forum_search_core::config::load_toml_or_default(path)
    }
}

// ============================================================================
// Tests
// ============================================================================
