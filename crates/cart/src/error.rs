//! Cart operation errors.
//!
//! Every failed operation yields a `CartError` naming the operation and the
//! cause. Validation rejections and transport failures both leave the cart
//! unchanged; [`CartError::notice`] turns either into the message a front
//! end shows the shopper.

use std::fmt;

use thiserror::Error;

use crate::catalog::ApiError;
use crate::notice::Notice;
use crate::storage::StorageError;
use crate::transition::Rejection;

/// The cart operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add product",
            Self::Remove => "remove product",
            Self::UpdateAmount => "update product amount",
        })
    }
}

/// Error returned by a cart operation.
#[derive(Debug, Error)]
pub enum CartError {
    /// The change was refused; the cart is unchanged.
    #[error("Cannot {operation}: {reason}")]
    Rejected {
        operation: Operation,
        reason: Rejection,
    },

    /// The catalog or stock API failed.
    #[error("Cannot {operation}: {source}")]
    Api {
        operation: Operation,
        source: ApiError,
    },

    /// The new cart could not be persisted; the cart is unchanged.
    #[error("Cannot {operation}: {source}")]
    Storage {
        operation: Operation,
        source: StorageError,
    },
}

impl CartError {
    /// The operation that failed.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Rejected { operation, .. }
            | Self::Api { operation, .. }
            | Self::Storage { operation, .. } => *operation,
        }
    }

    /// The rejection reason, if this was a validation rejection.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Whether this was a validation rejection rather than an I/O failure.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// The user-facing notice for this error.
    #[must_use]
    pub fn notice(&self) -> Notice {
        Notice::for_error(self)
    }
}

/// Result type alias for cart operations.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use rocketshoes_core::ProductId;

    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::Rejected {
            operation: Operation::Remove,
            reason: Rejection::NotInCart(ProductId::new(3)),
        };
        assert_eq!(
            err.to_string(),
            "Cannot remove product: Product not in cart: 3"
        );
        assert!(err.is_rejection());
        assert_eq!(err.operation(), Operation::Remove);
    }

    #[test]
    fn test_api_failure_is_not_rejection() {
        let err = CartError::Api {
            operation: Operation::Add,
            source: ApiError::NotFound("http://localhost:3333/stock/99".to_string()),
        };
        assert!(!err.is_rejection());
        assert!(err.rejection().is_none());
    }
}
