//! Payload codecs backing the `format` field of a [`TransportEnvelope`].
//!
//! [`TransportEnvelope`]: crate::transport::envelope::TransportEnvelope

// Layer 2: Third-party crate imports
use serde::{de::DeserializeOwned, Serialize};

// Layer 3: Internal module imports
use super::error::TransportError;

/// Wire format used to encode a transport envelope's `data` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportFormat {
    /// `serde_json` encoding. Self-describing, human-readable.
    Json,
    /// `rmp-serde` (MessagePack) encoding. Compact binary representation.
    MsgPack,
}

impl TransportFormat {
    /// Encode `payload` into bytes using this format.
    pub fn encode<T: Serialize>(&self, payload: &T) -> Result<Vec<u8>, TransportError> {
        match self {
            TransportFormat::Json => Ok(serde_json::to_vec(payload)?),
            TransportFormat::MsgPack => Ok(rmp_serde::to_vec(payload)?),
        }
    }

    /// Decode bytes previously produced by [`TransportFormat::encode`].
    pub fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, TransportError> {
        match self {
            TransportFormat::Json => Ok(serde_json::from_slice(data)?),
            TransportFormat::MsgPack => Ok(rmp_serde::from_slice(data)?),
        }
    }
}
