//! # objport Codec - reference-substituting JSON
//!
//! The piece that sits between arbitrary in-process values and the wire.
//! For every value in an outbound tree it answers one question - inline it
//! structurally, or hand the client an opaque token? - and on the way back
//! in it makes every token resolve to the exact instance that produced it.
//!
//! ## Decision order
//!
//! | Priority | Rule | Outcome |
//! |----------|------|---------|
//! | 1 | Matching plugin claim | Plugin renders the value |
//! | 2 | Bare-scalar shape | Inlined as number / two-field object |
//! | 3 | Declared field map (not denied) | Inlined as object |
//! | 4 | Opaque or denied | Registered; token emitted |
//!
//! Rule 4 is what makes the whole protocol work for unanticipated types:
//! nothing has to be JSON-aware to be transmitted safely.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let table = DispatchTable::builder()
//!     .serializer(interval_serializer())
//!     .build()?;                       // ambiguous claims fail here
//! let codec = JsonCodec::new(registry, Arc::new(table));
//!
//! let body = codec.encode_string(&outputs)?;   // tokens minted as needed
//! let inputs = codec.decode_str(&request)?;    // tokens resolved in place
//! ```

mod codec;
mod dispatch;
mod error;
mod plugin;
mod value;

#[cfg(test)]
pub(crate) mod testutil;

pub use codec::JsonCodec;
pub use dispatch::{Decision, DispatchTable, DispatchTableBuilder};
pub use error::{CodecError, Result};
pub use plugin::{Claim, ObjectSerializer};
pub use value::RuntimeValue;

// Consumers of the codec almost always need the object contract too.
pub use objport_registry::{Capability, RuntimeObject, Token, WireShape};
