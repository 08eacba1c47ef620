//! Transport envelope and codec errors.

/// Error encoding, decoding, or otherwise handling a transport envelope.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// JSON encode/decode failure (the `json` format, and the wire
    /// re-encoding of the envelope itself).
    #[error("json codec error: {0}")]
    Json(#[from] serde_json::Error),

    /// MessagePack encode failure (the `msgpack` format).
    #[error("msgpack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    /// MessagePack decode failure (the `msgpack` format).
    #[error("msgpack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),
}
