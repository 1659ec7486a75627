//! Error types for the objport gateway.

use objport_codec::CodecError;
use objport_registry::Token;
use thiserror::Error;

/// Gateway-level error type.
///
/// Codec and registry failures pass through untouched so the HTTP layer
/// can map them to status codes; `TypeMismatch` is the one error the
/// facade adds itself, for consumers validating a resolved reference.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Codec failure (unknown reference, ambiguous serializer, bad JSON).
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A value did not have the type the consumer expected. Registry state
    /// is untouched; the reference stays valid for callers that know what
    /// it really is.
    #[error("expected '{expected}', found '{actual}'{}", reference_suffix(.token))]
    TypeMismatch {
        /// Token of the offending object, when it is registered.
        token: Option<Token>,
        /// Type the consumer asked for.
        expected: String,
        /// What the value actually is.
        actual: String,
    },
}

fn reference_suffix(token: &Option<Token>) -> String {
    match token {
        Some(token) => format!(" (reference {token})"),
        None => String::new(),
    }
}
