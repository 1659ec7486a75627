//! The unified gateway facade.
//!
//! One shared component owning the registry, the dispatch table, and the
//! codec. It is constructed once at process start - before concurrent
//! traffic begins, so serializer conflicts surface as a startup failure -
//! and handed explicitly to whatever request layer sits above it.

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::Result;

use objport_codec::{DispatchTable, JsonCodec, ObjectSerializer, RuntimeValue};
use objport_registry::{ObjectInfo, ObjectRegistry, RuntimeObject, Token};

use std::sync::Arc;
use tracing::info;

/// Facade over the reference registry and the reference-aware codec.
///
/// The surrounding request layer consumes exactly three surfaces:
///
/// - **Inbound**: [`Gateway::decode_request`] turns a JSON body into a
///   value tree with every reference resolved in place.
/// - **Outbound**: [`Gateway::encode_response`] turns a value tree into a
///   JSON body, minting references as dispatch dictates.
/// - **Management**: list/inspect/delete pass-throughs for the registry.
pub struct Gateway {
    config: GatewayConfig,
    registry: Arc<ObjectRegistry>,
    codec: JsonCodec,
}

impl Gateway {
    /// Builds a gateway from configuration and the serializer plugins
    /// discovered at startup.
    ///
    /// # Errors
    ///
    /// [`objport_codec::CodecError::AmbiguousSerializer`] (wrapped) when
    /// two plugins claim the same capability. This is deliberately fatal:
    /// the conflict is data-independent and would otherwise make dispatch
    /// order undefined at request time.
    pub fn new(config: GatewayConfig, serializers: Vec<Arc<dyn ObjectSerializer>>) -> Result<Self> {
        let mut builder = DispatchTable::builder();
        for serializer in serializers {
            builder = builder.serializer(serializer);
        }
        for name in &config.dispatch.denied_capabilities {
            builder = builder.deny_named(name.clone());
        }
        let table = Arc::new(builder.build()?);

        let registry = Arc::new(ObjectRegistry::new());
        let codec = JsonCodec::new(Arc::clone(&registry), Arc::clone(&table))
            .with_creator_tag(config.codec.creator_tag.clone());

        info!(
            serializers = table.serializer_count(),
            denied = config.dispatch.denied_capabilities.len(),
            "gateway initialized"
        );

        Ok(Self {
            config,
            registry,
            codec,
        })
    }

    /// Decodes an inbound JSON body, resolving references in place.
    pub fn decode_request(&self, body: &str) -> Result<RuntimeValue> {
        Ok(self.codec.decode_str(body)?)
    }

    /// Encodes an outbound value tree as a JSON body.
    pub fn encode_response(&self, value: &RuntimeValue) -> Result<String> {
        Ok(self.codec.encode_string(value)?)
    }

    /// Registers an object directly, outside the encode path. Upload and
    /// module flows use this to attach their own provenance tag.
    pub fn register_object(&self, object: Arc<dyn RuntimeObject>, created_by: &str) -> Token {
        self.registry.register(object, created_by)
    }

    /// All live tokens.
    pub fn tokens(&self) -> Vec<Token> {
        self.registry.tokens()
    }

    /// Metadata for a token, if registered.
    pub fn object_info(&self, token: &Token) -> Option<ObjectInfo> {
        self.registry.info(token)
    }

    /// Removes an entry. `false` if the token was unknown.
    pub fn remove_object(&self, token: &Token) -> bool {
        self.registry.remove(token)
    }

    /// Validates that a value is an object of concrete type `T` and
    /// borrows it.
    ///
    /// This is the single post-resolution type check: resolution itself
    /// never coerces, so a consumer expecting an image and resolving a
    /// table lands here. The mismatch names both types - and the token,
    /// when the object is registered - and leaves registry state alone.
    pub fn expect_object<'a, T: RuntimeObject>(&self, value: &'a RuntimeValue) -> Result<&'a T> {
        let Some(object) = value.as_object() else {
            return Err(GatewayError::TypeMismatch {
                token: None,
                expected: std::any::type_name::<T>().to_string(),
                actual: value.kind().to_string(),
            });
        };

        match object.downcast_ref::<T>() {
            Some(concrete) => Ok(concrete),
            None => Err(GatewayError::TypeMismatch {
                token: self.registry.token_for(object),
                expected: std::any::type_name::<T>().to_string(),
                actual: object.type_name().to_string(),
            }),
        }
    }

    /// The shared registry, for collaborators that need direct access.
    pub fn registry(&self) -> &Arc<ObjectRegistry> {
        &self.registry
    }

    /// The active configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("objects", &self.registry.len())
            .finish()
    }
}
