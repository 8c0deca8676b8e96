//! HTTP status mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the HTTP status code a transport should answer with
    ///
    /// Business rejections map to 4xx (422 for rule violations), unexpected
    /// infrastructure failures map to 500.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::SeatLabelRequired => StatusCode::BAD_REQUEST,

            // 404 Not Found
            Self::NotFound | Self::ZoneNotFound | Self::PlacementNotFound | Self::SeatNotFound => {
                StatusCode::NOT_FOUND
            }

            // 409 Conflict
            Self::AlreadyExists | Self::ZoneNameExists | Self::SeatLabelExists => {
                StatusCode::CONFLICT
            }

            // 422 Unprocessable Entity
            Self::VenueNotFound
            | Self::ZoneCapacityMismatch
            | Self::ZoneGridInvalid
            | Self::ZoneNotSeated
            | Self::SeatZoneMismatch => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::DatabaseError
            | Self::ZoneCreateFailed
            | Self::ZoneUpdateFailed
            | Self::ZoneDeleteFailed
            | Self::ZoneQueryFailed
            | Self::SeatRegenerateFailed
            | Self::SeatCreateFailed
            | Self::SeatUpdateFailed
            | Self::SeatDeleteFailed
            | Self::SeatQueryFailed
            | Self::PlacementUpdateFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_rejections_are_client_errors() {
        assert_eq!(
            ErrorCode::ZoneCapacityMismatch.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ErrorCode::ZoneNameExists.http_status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::ZoneNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::SeatLabelRequired.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_infrastructure_failures_are_server_errors() {
        for code in [
            ErrorCode::ZoneCreateFailed,
            ErrorCode::ZoneDeleteFailed,
            ErrorCode::SeatUpdateFailed,
            ErrorCode::PlacementUpdateFailed,
        ] {
            assert_eq!(code.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert!(code.is_system());
        }
    }
}
