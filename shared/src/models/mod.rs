//! Data models
//!
//! Store-agnostic documents shared between `seating-server` and any
//! transport in front of it. All ids are opaque strings; relationships are
//! plain id fields (`event_id`, `zone_id`), never object references.

pub mod placement;
pub mod seat;
pub mod venue;
pub mod view;
pub mod zone;

// Re-exports
pub use placement::*;
pub use seat::*;
pub use venue::*;
pub use view::*;
pub use zone::*;
