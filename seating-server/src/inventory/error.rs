//! Inventory error taxonomy
//!
//! Expected business outcomes (`ArgumentInvalid`, `DomainValidation`,
//! `NotFound`) propagate unchanged. Anything else coming out of a store is
//! wrapped in `Infrastructure` tagged with the operation that was running.

use std::fmt;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::repository::{RepoError, RepoResult};

/// Operation an infrastructure failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ZoneCreate,
    ZoneUpdate,
    ZoneDelete,
    ZoneQuery,
    SeatRegenerate,
    SeatCreate,
    SeatUpdate,
    SeatDelete,
    SeatQuery,
    PlacementUpdate,
}

impl Operation {
    pub fn failure_code(&self) -> ErrorCode {
        match self {
            Self::ZoneCreate => ErrorCode::ZoneCreateFailed,
            Self::ZoneUpdate => ErrorCode::ZoneUpdateFailed,
            Self::ZoneDelete => ErrorCode::ZoneDeleteFailed,
            Self::ZoneQuery => ErrorCode::ZoneQueryFailed,
            Self::SeatRegenerate => ErrorCode::SeatRegenerateFailed,
            Self::SeatCreate => ErrorCode::SeatCreateFailed,
            Self::SeatUpdate => ErrorCode::SeatUpdateFailed,
            Self::SeatDelete => ErrorCode::SeatDeleteFailed,
            Self::SeatQuery => ErrorCode::SeatQueryFailed,
            Self::PlacementUpdate => ErrorCode::PlacementUpdateFailed,
        }
    }

    /// Code used when a unique index rejects a write of this operation
    fn duplicate_code(&self) -> ErrorCode {
        match self {
            Self::ZoneCreate | Self::ZoneUpdate => ErrorCode::ZoneNameExists,
            Self::SeatCreate | Self::SeatUpdate | Self::SeatRegenerate => {
                ErrorCode::SeatLabelExists
            }
            _ => ErrorCode::AlreadyExists,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ZoneCreate => "zone creation",
            Self::ZoneUpdate => "zone update",
            Self::ZoneDelete => "zone deletion",
            Self::ZoneQuery => "zone query",
            Self::SeatRegenerate => "seat regeneration",
            Self::SeatCreate => "seat creation",
            Self::SeatUpdate => "seat update",
            Self::SeatDelete => "seat deletion",
            Self::SeatQuery => "seat query",
            Self::PlacementUpdate => "placement update",
        })
    }
}

#[derive(Debug, Error)]
pub enum InventoryError {
    /// Caller input fails a structural precondition
    #[error("Invalid argument: {message}")]
    ArgumentInvalid { code: ErrorCode, message: String },

    /// A business rule is violated
    #[error("Validation failed: {message}")]
    DomainValidation { code: ErrorCode, message: String },

    /// A required entity does not exist
    #[error("Not found: {message}")]
    NotFound { code: ErrorCode, message: String },

    /// The store raised an unexpected error
    #[error("{operation} failed: {source}")]
    Infrastructure {
        operation: Operation,
        #[source]
        source: RepoError,
    },
}

pub type InventoryResult<T> = Result<T, InventoryError>;

impl InventoryError {
    pub fn argument(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::ArgumentInvalid {
            code,
            message: message.into(),
        }
    }

    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::DomainValidation {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
        }
    }

    /// Classify a store error raised while running `operation`
    pub fn from_repo(operation: Operation, err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(message) => Self::validation(operation.duplicate_code(), message),
            other => Self::Infrastructure {
                operation,
                source: other,
            },
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ArgumentInvalid { code, .. }
            | Self::DomainValidation { code, .. }
            | Self::NotFound { code, .. } => *code,
            Self::Infrastructure { operation, .. } => operation.failure_code(),
        }
    }

    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Infrastructure { .. })
    }

    /// Emit the error-level record for store failures; business outcomes stay quiet
    pub(crate) fn log_failure(&self, event_id: &str, entity_id: &str) {
        if let Self::Infrastructure { operation, source } = self {
            tracing::error!(
                event_id = %event_id,
                entity_id = %entity_id,
                operation = %operation,
                error = %source,
                "Inventory store failure"
            );
        }
    }
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        let code = err.code();
        match err {
            InventoryError::ArgumentInvalid { message, .. }
            | InventoryError::DomainValidation { message, .. }
            | InventoryError::NotFound { message, .. } => AppError::with_message(code, message),
            // The store message stays in the logs, not in the response
            InventoryError::Infrastructure { operation, .. } => {
                AppError::new(code).with_detail("operation", operation.to_string())
            }
        }
    }
}

/// Attach the running operation to a store result
pub(crate) trait RepoResultExt<T> {
    fn during(self, operation: Operation) -> InventoryResult<T>;
}

impl<T> RepoResultExt<T> for RepoResult<T> {
    fn during(self, operation: Operation) -> InventoryResult<T> {
        self.map_err(|e| InventoryError::from_repo(operation, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_becomes_domain_validation() {
        let err = InventoryError::from_repo(
            Operation::SeatCreate,
            RepoError::Duplicate("index already contains".into()),
        );
        assert!(matches!(
            err,
            InventoryError::DomainValidation {
                code: ErrorCode::SeatLabelExists,
                ..
            }
        ));
    }

    #[test]
    fn test_database_error_is_wrapped_with_operation() {
        let err = InventoryError::from_repo(
            Operation::ZoneDelete,
            RepoError::Database("disk full".into()),
        );
        assert!(err.is_infrastructure());
        assert_eq!(err.code(), ErrorCode::ZoneDeleteFailed);
        assert_eq!(err.to_string(), "zone deletion failed: Database error: disk full");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_app_error_hides_store_message() {
        let err = InventoryError::from_repo(
            Operation::SeatUpdate,
            RepoError::Database("connection reset".into()),
        );
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::SeatUpdateFailed);
        assert_eq!(app.message, "Seat update failed");
        assert_eq!(app.http_status().as_u16(), 500);
    }

    #[test]
    fn test_app_error_keeps_business_message() {
        let err = InventoryError::validation(ErrorCode::ZoneCapacityMismatch, "capacity 5 != 2 x 3");
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::ZoneCapacityMismatch);
        assert_eq!(app.message, "capacity 5 != 2 x 3");
        assert_eq!(app.http_status().as_u16(), 422);
    }
}
