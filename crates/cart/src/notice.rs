//! User-facing notices for failed cart operations.
//!
//! The store never shows anything itself. Front ends call
//! [`CartError::notice`](crate::CartError::notice) and decide how to surface
//! the result (toast, log line, status bar).

use std::fmt;

use crate::error::{CartError, Operation};
use crate::transition::Rejection;

/// Shown when the requested quantity is not available or not valid, and when
/// changing an amount fails after the cart check.
pub const OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";
/// Shown when adding a product fails.
pub const ADD_FAILED: &str = "Erro na adição do produto";
/// Shown when removing a product fails or it is not in the cart.
pub const REMOVE_FAILED: &str = "Erro na remoção do produto";
/// Shown when the product to change is not in the cart.
pub const UPDATE_FAILED: &str = "Erro na alteração de quantidade do produto";

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// The request was understood but refused.
    Warning,
    /// The operation failed.
    Error,
}

/// A fire-and-forget message for the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
}

impl Notice {
    const fn warning(message: &'static str) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message,
        }
    }

    const fn error(message: &'static str) -> Self {
        Self {
            kind: NoticeKind::Error,
            message,
        }
    }

    /// Map a cart error to its notice.
    #[must_use]
    pub const fn for_error(err: &CartError) -> Self {
        match err {
            CartError::Rejected { reason, operation } => match reason {
                Rejection::OutOfStock { .. } | Rejection::NonPositiveAmount(_) => {
                    Self::warning(OUT_OF_STOCK)
                }
                Rejection::NotInCart(_) | Rejection::MissingProduct(_) | Rejection::Invalid(_) => {
                    Self::failure(*operation)
                }
            },
            CartError::Api {
                operation: Operation::UpdateAmount,
                ..
            }
            | CartError::Storage {
                operation: Operation::UpdateAmount,
                ..
            } => Self::error(OUT_OF_STOCK),
            CartError::Api { operation, .. } | CartError::Storage { operation, .. } => {
                Self::failure(*operation)
            }
        }
    }

    const fn failure(operation: Operation) -> Self {
        match operation {
            Operation::Add => Self::error(ADD_FAILED),
            Operation::Remove => Self::error(REMOVE_FAILED),
            Operation::UpdateAmount => Self::error(UPDATE_FAILED),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

#[cfg(test)]
mod tests {
    use rocketshoes_core::ProductId;

    use super::*;
    use crate::catalog::ApiError;
    use crate::storage::StorageError;

    fn rejected(operation: Operation, reason: Rejection) -> CartError {
        CartError::Rejected { operation, reason }
    }

    #[test]
    fn test_out_of_stock_is_warning() {
        let reason = Rejection::OutOfStock {
            product_id: ProductId::new(1),
            requested: 3,
            available: 2,
        };
        for operation in [Operation::Add, Operation::UpdateAmount] {
            let notice = rejected(operation, reason.clone()).notice();
            assert_eq!(notice.kind, NoticeKind::Warning);
            assert_eq!(notice.message, OUT_OF_STOCK);
        }
    }

    #[test]
    fn test_non_positive_amount_is_warning() {
        let notice = rejected(Operation::UpdateAmount, Rejection::NonPositiveAmount(0)).notice();
        assert_eq!(notice, Notice::warning(OUT_OF_STOCK));
    }

    #[test]
    fn test_not_found_messages() {
        let missing = Rejection::NotInCart(ProductId::new(5));

        let notice = rejected(Operation::Remove, missing.clone()).notice();
        assert_eq!(notice, Notice::error(REMOVE_FAILED));

        let notice = rejected(Operation::UpdateAmount, missing).notice();
        assert_eq!(notice, Notice::error(UPDATE_FAILED));
    }

    #[test]
    fn test_transport_failures() {
        let err = CartError::Api {
            operation: Operation::Add,
            source: ApiError::NotFound("http://localhost:3333/products/99".to_string()),
        };
        assert_eq!(err.notice(), Notice::error(ADD_FAILED));
        assert_eq!(err.notice().to_string(), "Erro na adição do produto");

        let err = CartError::Api {
            operation: Operation::Remove,
            source: ApiError::InvalidBaseUrl("mailto:x".to_string()),
        };
        assert_eq!(err.notice(), Notice::error(REMOVE_FAILED));
    }

    #[test]
    fn test_update_transport_failure_reads_as_out_of_stock() {
        let err = CartError::Api {
            operation: Operation::UpdateAmount,
            source: ApiError::Status {
                status: 500,
                url: "http://localhost:3333/stock/1".to_string(),
            },
        };
        assert_eq!(err.notice(), Notice::error(OUT_OF_STOCK));

        let err = CartError::Storage {
            operation: Operation::UpdateAmount,
            source: StorageError::Poisoned,
        };
        assert_eq!(err.notice().kind, NoticeKind::Error);
        assert_eq!(err.notice().message, OUT_OF_STOCK);
    }
}
