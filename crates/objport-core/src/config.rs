//! Configuration types for the objport gateway.

use serde::{Deserialize, Serialize};

/// Configuration for the gateway facade.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Codec settings.
    pub codec: CodecConfig,

    /// Serializer dispatch settings.
    pub dispatch: DispatchConfig,
}

/// Codec configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Provenance tag recorded when the encoder registers a value on its
    /// own (as opposed to an explicit upload/module registration).
    pub creator_tag: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            creator_tag: "codec".to_string(),
        }
    }
}

/// Serializer dispatch configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Capability families that must never be structurally flattened.
    /// Values carrying one of these tags travel by reference even when
    /// they declare a field map.
    pub denied_capabilities: Vec<String>,
}
