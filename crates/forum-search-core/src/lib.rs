//! Forum Search Core — shared errors, identifiers, and config helpers.
//!
//! This crate provides the foundational types used across the forum search
//! crates. It has no internal dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`ids`]: Typed forum identifiers
//! - [`config`]: TOML configuration loading

#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod ids;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use ids::{GroupId, PostId, SectionId, TopicId, UserId};
