//! Error types for the reference-aware codec.

use objport_registry::Token;
use thiserror::Error;

/// Codec-level failures.
///
/// `AmbiguousSerializer` is a startup-time configuration error: it is
/// data-independent and surfaces when the dispatch table is built, never
/// per request. The rest occur while encoding or decoding a payload and
/// propagate to the request boundary untouched - nothing here is swallowed
/// or silently defaulted.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A token-shaped string failed to resolve during decode.
    #[error("unknown object reference: {token}")]
    UnknownReference {
        /// The reference the client quoted.
        token: Token,
    },

    /// Two serializer plugins claim the same capability.
    #[error("serializers '{first}' and '{second}' both claim capability '{capability}'")]
    AmbiguousSerializer {
        /// The contested capability tag.
        capability: String,
        /// Name of the earlier registration.
        first: String,
        /// Name of the later registration.
        second: String,
    },

    /// A plugin failed while rendering a value it claimed.
    #[error("serializer '{name}' failed: {message}")]
    Serializer {
        /// Plugin name.
        name: String,
        /// What went wrong.
        message: String,
    },

    /// Malformed JSON from the underlying parser/printer.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
