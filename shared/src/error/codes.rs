//! Unified error codes for the seating inventory
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Venue errors
//! - 2xxx: Zone errors
//! - 3xxx: Placement errors
//! - 4xxx: Seat errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Venue ====================
    /// Referenced venue does not exist
    VenueNotFound = 1001,

    // ==================== 2xxx: Zone ====================
    /// Zone not found for the event
    ZoneNotFound = 2001,
    /// Zone name already used in the event
    ZoneNameExists = 2002,
    /// Seated zone capacity differs from rows × columns
    ZoneCapacityMismatch = 2003,
    /// Seated zone has a non-positive row or column count
    ZoneGridInvalid = 2004,
    /// Operation requires a seated zone
    ZoneNotSeated = 2005,

    // ==================== 3xxx: Placement ====================
    /// Visual placement block not found for the zone
    PlacementNotFound = 3001,

    // ==================== 4xxx: Seat ====================
    /// Seat not found
    SeatNotFound = 4001,
    /// Seat label already used in the zone
    SeatLabelExists = 4002,
    /// Seat label missing or blank
    SeatLabelRequired = 4003,
    /// Seat or zone does not belong to the given event
    SeatZoneMismatch = 4004,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Zone creation failed on infrastructure
    ZoneCreateFailed = 9101,
    /// Zone update failed on infrastructure
    ZoneUpdateFailed = 9102,
    /// Zone deletion failed on infrastructure
    ZoneDeleteFailed = 9103,
    /// Zone query failed on infrastructure
    ZoneQueryFailed = 9104,
    /// Seat regeneration failed on infrastructure
    SeatRegenerateFailed = 9105,
    /// Seat creation failed on infrastructure
    SeatCreateFailed = 9201,
    /// Seat update failed on infrastructure
    SeatUpdateFailed = 9202,
    /// Seat deletion failed on infrastructure
    SeatDeleteFailed = 9203,
    /// Seat query failed on infrastructure
    SeatQueryFailed = 9204,
    /// Placement update failed on infrastructure
    PlacementUpdateFailed = 9301,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Whether this code reports an unexpected infrastructure failure
    /// rather than an expected business rejection.
    #[inline]
    pub const fn is_system(&self) -> bool {
        self.code() >= 9000
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Venue
            ErrorCode::VenueNotFound => "Venue not found",

            // Zone
            ErrorCode::ZoneNotFound => "Zone not found",
            ErrorCode::ZoneNameExists => "Zone name already exists for this event",
            ErrorCode::ZoneCapacityMismatch => "Seated zone capacity must equal rows x columns",
            ErrorCode::ZoneGridInvalid => "Seated zone requires positive rows and columns",
            ErrorCode::ZoneNotSeated => "Zone is not a seated zone",

            // Placement
            ErrorCode::PlacementNotFound => "Zone placement not found",

            // Seat
            ErrorCode::SeatNotFound => "Seat not found",
            ErrorCode::SeatLabelExists => "Seat label already exists in this zone",
            ErrorCode::SeatLabelRequired => "Seat label is required",
            ErrorCode::SeatZoneMismatch => "Zone not found or does not belong to the event",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ZoneCreateFailed => "Zone creation failed",
            ErrorCode::ZoneUpdateFailed => "Zone update failed",
            ErrorCode::ZoneDeleteFailed => "Zone deletion failed",
            ErrorCode::ZoneQueryFailed => "Zone query failed",
            ErrorCode::SeatRegenerateFailed => "Seat regeneration failed",
            ErrorCode::SeatCreateFailed => "Seat creation failed",
            ErrorCode::SeatUpdateFailed => "Seat update failed",
            ErrorCode::SeatDeleteFailed => "Seat deletion failed",
            ErrorCode::SeatQueryFailed => "Seat query failed",
            ErrorCode::PlacementUpdateFailed => "Zone placement update failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Venue
            1001 => Ok(ErrorCode::VenueNotFound),

            // Zone
            2001 => Ok(ErrorCode::ZoneNotFound),
            2002 => Ok(ErrorCode::ZoneNameExists),
            2003 => Ok(ErrorCode::ZoneCapacityMismatch),
            2004 => Ok(ErrorCode::ZoneGridInvalid),
            2005 => Ok(ErrorCode::ZoneNotSeated),

            // Placement
            3001 => Ok(ErrorCode::PlacementNotFound),

            // Seat
            4001 => Ok(ErrorCode::SeatNotFound),
            4002 => Ok(ErrorCode::SeatLabelExists),
            4003 => Ok(ErrorCode::SeatLabelRequired),
            4004 => Ok(ErrorCode::SeatZoneMismatch),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9101 => Ok(ErrorCode::ZoneCreateFailed),
            9102 => Ok(ErrorCode::ZoneUpdateFailed),
            9103 => Ok(ErrorCode::ZoneDeleteFailed),
            9104 => Ok(ErrorCode::ZoneQueryFailed),
            9105 => Ok(ErrorCode::SeatRegenerateFailed),
            9201 => Ok(ErrorCode::SeatCreateFailed),
            9202 => Ok(ErrorCode::SeatUpdateFailed),
            9203 => Ok(ErrorCode::SeatDeleteFailed),
            9204 => Ok(ErrorCode::SeatQueryFailed),
            9301 => Ok(ErrorCode::PlacementUpdateFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
