//! Unified error system for the seating inventory
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Venue errors
//! - 2xxx: Zone errors
//! - 3xxx: Placement (layout grid) errors
//! - 4xxx: Seat errors
//! - 9xxx: System errors (infrastructure failures, per operation)
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::SeatLabelExists, "Seat label 'A-1' already exists")
//!     .with_detail("label", "A-1");
//! assert_eq!(err.http_status().as_u16(), 409);
//! assert_eq!(err.code.code(), 4002);
//! ```

mod codes;
mod http;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::AppError;
