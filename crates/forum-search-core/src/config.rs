//! TOML configuration loading.
//!
//! Configuration structs live next to the code they configure and derive
//! `Deserialize` with `#[serde(default = ...)]` on every optional field. This
//! module only turns a file or string into one of those structs.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Parse a configuration value from TOML text.
pub fn from_toml_str<T: DeserializeOwned>(content: &str) -> Result<T> {
    Ok(toml::from_str(content)?)
}

/// Load a configuration value from a TOML file.
///
/// Missing files are an error; use [`load_toml_or_default`] when the file is
/// optional.
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    log::debug!("Loaded config from {}", path.display());
    from_toml_str(&content)
}

/// Load a configuration value from a TOML file, falling back to `T::default()`
/// when the file does not exist.
pub fn load_toml_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(T::default());
    }
    load_toml(path)
}

// ============================================================================
// Tests
// ============================================================================
