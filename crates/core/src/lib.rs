//! Larder Core - Shared types library.
//!
//! This crate provides common types used across all Larder components:
//! - `web` - The recipe search service (auth pages + JSON search API)
//! - `cli` - Command-line tools for migrations, users and recipe seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Validated account fields, type-safe IDs and search term sets

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
