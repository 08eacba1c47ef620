//! Wire-level envelope for cross-node and cross-thread message delivery.

// Layer 1: Standard library imports
use std::fmt::Debug;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; 
use serde::{de::DeserializeOwned, Deserialize, Serialize};

// Layer 3: Internal module imports
use super::codec::TransportFormat;
use super::error::TransportError;
use crate::util::ActorAddress;

/// A message carried across a node or thread boundary.
///
/// The `data` field holds the payload encoded per `format`; the envelope
/// itself is re-encoded to JSON for the wire (`TransportEnvelope` is always
/// `Serialize`/`Deserialize` via `serde_json`, regardless of what `format`
/// says about the payload inside it).
///
/// # Example
/// ```rust
/// use airssys_rt::transport::{TransportEnvelope, TransportFormat};
/// use airssys_rt::util::ActorAddress;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// struct Ping { n: u32 }
///
/// let source = ActorAddress::named("node-a.sender");
/// let target = ActorAddress::named("node-b.receiver");
///
/// let envelope = TransportEnvelope::encode(TransportFormat::Json, source, target, &Ping { n: 1 }).unwrap();
/// let decoded: Ping = envelope.decode().unwrap();
/// assert_eq!(decoded, Ping { n: 1 });
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportEnvelope {
    /// Codec used to encode `data`.
    pub format: TransportFormat,

    /// Encoded payload bytes.
    pub data: Vec<u8>,

    /// Originating address.
    pub source: ActorAddress,

    /// Destination address.
    pub target: ActorAddress,

    /// Envelope creation timestamp.
    pub timestamp: DateTime<Utc>,

    /// Whether `data` has been compressed beyond the codec's own encoding.
    /// Compression itself is out of scope; this only records the fact.
    pub compressed: bool,
}

impl TransportEnvelope {
    /// Encode `payload` with `format` into a new envelope.
    pub fn encode<T: Serialize>(
        format: TransportFormat,
        source: ActorAddress,
        target: ActorAddress,
        payload: &T,
    ) -> Result<Self, TransportError> {
        let data = format.encode(payload)?;
        Ok(Self {
            format,
            data,
            source,
            target,
            timestamp: Utc::now(),
            compressed: false,
        })
    }

    /// Builder method: mark the envelope as carrying compressed `data`.
    pub fn with_compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    /// Decode the payload back out of `data` using `format`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        self.format.decode(&self.data)
    }

    /// Re-encode the whole envelope (header plus opaque `data` bytes) to a
    /// JSON string suitable for the wire, independent of the payload's own
    /// `format`.
    pub fn to_wire_json(&self) -> Result<String, TransportError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse an envelope previously produced by [`TransportEnvelope::to_wire_json`].
    pub fn from_wire_json(wire: &str) -> Result<Self, TransportError> {
        Ok(serde_json::from_str(wire)?)
    }
}
