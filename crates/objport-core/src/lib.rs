//! # objport Core
//!
//! Unified facade over the object reference registry and the
//! reference-aware JSON codec. The surrounding REST layer talks to a
//! [`Gateway`]; everything below it is wiring.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      OBJPORT CORE                        │
//! ├──────────────────────────────────────────────────────────┤
//! │                                                          │
//! │                  ┌────────────────┐                      │
//! │                  │    Gateway     │  ← request layer     │
//! │                  └───────┬────────┘     talks here       │
//! │                          │                               │
//! │            ┌─────────────┴─────────────┐                 │
//! │            ▼                           ▼                 │
//! │     ┌─────────────┐            ┌─────────────┐           │
//! │     │  JsonCodec  │──register─▶│   Object    │           │
//! │     │  + dispatch │◀─resolve───│  Registry   │           │
//! │     └─────────────┘            └─────────────┘           │
//! │                                                          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let gateway = Gateway::new(GatewayConfig::default(), plugins)?;
//!
//! // Inbound: tokens anywhere in the tree resolve to live objects.
//! let inputs = gateway.decode_request(body)?;
//!
//! // Outbound: unserializable values leave as tokens.
//! let body = gateway.encode_response(&outputs)?;
//!
//! // Management: list / inspect / delete.
//! for token in gateway.tokens() {
//!     println!("{:?}", gateway.object_info(&token));
//! }
//! ```

mod config;
mod error;
mod gateway;

pub use config::{CodecConfig, DispatchConfig, GatewayConfig};
pub use error::GatewayError;
pub use gateway::Gateway;

// Re-export component types for convenience
pub use objport_codec::{
    Claim, CodecError, DispatchTable, JsonCodec, ObjectSerializer, RuntimeValue,
};
pub use objport_registry::{
    Capability, ObjectInfo, ObjectRegistry, RuntimeObject, Token, WireShape,
};

/// Core result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
