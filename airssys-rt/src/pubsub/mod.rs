//! Event broker: the system's addressable pub/sub actor (`system.event-broker`).

pub mod broker;
pub mod pattern;

pub use broker::{BrokerStats, EventBroker, EventBrokerError};
