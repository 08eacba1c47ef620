//! Transport envelope and codec for cross-node or cross-thread message
//! delivery (§4.11). This is a boundary concern only: what goes over the
//! wire between two runtime instances, not how the wire itself is carried.

pub mod codec;
pub mod envelope;
pub mod error;

pub use codec::TransportFormat;
pub use envelope::TransportEnvelope;
pub use error::TransportError;
