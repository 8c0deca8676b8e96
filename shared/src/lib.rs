//! Shared types for the seating inventory workspace
//!
//! Store-agnostic data models and the unified error-code system used by
//! `seating-server` and by any transport sitting in front of it.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
