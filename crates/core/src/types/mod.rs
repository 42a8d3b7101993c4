//! Core types for Larder.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod account;
pub mod id;
pub mod terms;

pub use account::{AccountFieldError, Email, Username};
pub use id::UserId;
pub use terms::SearchTerms;
