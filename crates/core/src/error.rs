//! Error types for the relharmony domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Parsing problems inside
//! the engine are not errors: a missing section is the not-found sentinel and
//! a short table is a partial table. Only caller-side contract violations
//! surface here.

use crate::product::Product;
use thiserror::Error;

/// The top-level error type for relharmony operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Caller contract ---
    #[error("Precondition violated: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("Multi-version analysis is not supported for product {0}")]
    UnsupportedProduct(Product),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Values that were rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("not a well-formed version tag: {0:?}")]
    MalformedVersionTag(String),

    #[error("unknown product {0:?}, expected WST or TM")]
    UnknownProduct(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_error_displays_value() {
        let err = Error::from(PreconditionError::MalformedVersionTag("4.1.0".into()));
        assert!(err.to_string().contains("4.1.0"));
        assert!(err.to_string().starts_with("Precondition violated"));
    }

    #[test]
    fn unsupported_product_names_product() {
        let err = Error::UnsupportedProduct(Product::Tm);
        assert!(err.to_string().contains("TM"));
    }
}
