use crate::data::repos::errors::StockError;
use crate::reports::ReportError;
use crate::security::errors::AuthError;
use diesel::result::{self, DatabaseErrorKind};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Input that passed its field rules but cannot be processed.
    #[error("Validation fails")]
    Validation,
    /// Carries the resource name, e.g. `"Product"`.
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Password does not match")]
    PasswordMismatch,
    #[error("Coupon is not valid")]
    InvalidCoupon,
    #[error("Price not found for product {product_id} size {size_id}")]
    PriceNotFound { product_id: i32, size_id: i32 },
    #[error("Insufficient stock for product {product_id} size {size_id}")]
    InsufficientStock { product_id: i32, size_id: i32 },
    #[error("Invalid status transition")]
    InvalidStatusTransition,
    #[error("Stock operation belongs to sale {0}")]
    OperationOwnedBySale(i32),
    #[error("Referenced record does not exist")]
    InvalidReference,
    #[error("Record already exists")]
    Duplicate,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Report(ReportError),
    #[error("Database error: {0}")]
    Database(result::Error),
}

impl From<result::Error> for ServiceError {
    fn from(error: result::Error) -> Self {
        match error {
            result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                ServiceError::InvalidReference
            }
            result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                ServiceError::Duplicate
            }
            other => ServiceError::Database(other),
        }
    }
}

impl From<StockError> for ServiceError {
    fn from(error: StockError) -> Self {
        match error {
            StockError::Insufficient {
                product_id,
                size_id,
            } => ServiceError::InsufficientStock {
                product_id,
                size_id,
            },
            StockError::CouponExhausted(_) => ServiceError::InvalidCoupon,
            StockError::OwnedBySale(sale_id) => ServiceError::OperationOwnedBySale(sale_id),
            StockError::InvalidTransition => ServiceError::InvalidStatusTransition,
            StockError::Database(e) => ServiceError::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violations_are_classified() {
        let fk = result::Error::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("fk".to_string()),
        );
        let unique = result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("dup".to_string()),
        );

        assert!(matches!(ServiceError::from(fk), ServiceError::InvalidReference));
        assert!(matches!(ServiceError::from(unique), ServiceError::Duplicate));
        assert!(matches!(
            ServiceError::from(result::Error::NotFound),
            ServiceError::Database(_)
        ));
    }

    #[test]
    fn exhausted_coupon_reads_as_invalid() {
        let error = ServiceError::from(StockError::CouponExhausted(3));
        assert!(matches!(error, ServiceError::InvalidCoupon));
    }

    #[test]
    fn locked_row_checks_keep_their_meaning() {
        assert!(matches!(
            ServiceError::from(StockError::OwnedBySale(9)),
            ServiceError::OperationOwnedBySale(9)
        ));
        assert!(matches!(
            ServiceError::from(StockError::InvalidTransition),
            ServiceError::InvalidStatusTransition
        ));
    }
}
