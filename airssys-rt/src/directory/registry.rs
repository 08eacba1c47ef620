//! The directory [`Behavior`]: well-known name and ephemeral PID registries.

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::Utc; 
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::json;

// Layer 3: Internal module imports
use super::entry::DirectoryEntry;
use crate::behavior::{Behavior, BehaviorContext};
use crate::message::{DecodeError, DynamicMessage};
use crate::plan::{MessagePlan, SendInstruction, SendMode};
use crate::pubsub::pattern::pattern_matches;
use crate::util::ActorAddress;

/// Error decoding a directory message.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("unknown directory message type: {0}")]
    UnknownMessageType(String),

    #[error("invalid payload for {message_type}: {source}")]
    InvalidPayload {
        message_type: String,
        #[source]
        source: DecodeError,
    },

    /// An ephemeral PID name was re-registered with a different address
    /// than the one already holding it. Unlike well-known names, ephemeral
    /// registrations are never silently replaced — the caller must
    /// `UNREGISTER` first.
    #[error("ephemeral name {0} is already registered to a different address")]
    EphemeralAlreadyRegistered(String),
}

#[derive(Deserialize)]
struct RegisterRequest {
    name: String,
    address: ActorAddress,
    #[serde(default)]
    ephemeral: bool,
}

#[derive(Deserialize)]
struct UnregisterRequest {
    name: String,
    #[serde(default)]
    ephemeral: bool,
}

#[derive(Deserialize)]
struct LookupRequest {
    name: String,
    requestor: ActorAddress,
}

#[derive(Deserialize)]
struct ListRequest {
    pattern: String,
    requestor: ActorAddress,
    #[serde(default)]
    include_ephemeral: bool,
}

#[derive(Deserialize)]
struct HealthCheckRequest {
    requestor: ActorAddress,
}

#[derive(Debug, Serialize)]
struct LookupResult {
    name: String,
    address: Option<ActorAddress>,
}

/// Well-known name and ephemeral PID registries for the runtime.
///
/// Two independent tables, grounded on `broker/registry.rs`'s
/// `DashMap`-backed lock-free registry idiom. `LOOKUP` searches well-known
/// names before ephemeral PIDs (§4.6).
pub struct Directory {
    well_known: DashMap<String, DirectoryEntry>,
    ephemeral: DashMap<String, DirectoryEntry>,
}

impl Directory {
    pub fn new() -> Self {
        Self {
            well_known: DashMap::new(),
            ephemeral: DashMap::new(),
        }
    }

    fn table(&self, ephemeral: bool) -> &DashMap<String, DirectoryEntry> {
        if ephemeral {
            &self.ephemeral
        } else {
            &self.well_known
        }
    }

    /// Register or re-register `name`. Re-registering a well-known name
    /// with the same address only bumps `last_seen` (§I5); a different
    /// address replaces the entry. Ephemeral names never silently replace:
    /// a conflicting re-registration is rejected so a stale ask-reply
    /// target can't shadow a live one.
    fn register(
        &self,
        name: String,
        address: ActorAddress,
        ephemeral: bool,
    ) -> Result<(), DirectoryError> {
        let table = self.table(ephemeral);
        match table.get_mut(&name) {
            Some(mut existing) if existing.address == address => {
                existing.touch();
                Ok(())
            }
            Some(_) if ephemeral => Err(DirectoryError::EphemeralAlreadyRegistered(name)),
            _ => {
                table.insert(name.clone(), DirectoryEntry::new(name, address, ephemeral));
                Ok(())
            }
        }
    }

    fn unregister(&self, name: &str, ephemeral: bool) {
        self.table(ephemeral).remove(name);
    }

    fn lookup(&self, name: &str) -> Option<ActorAddress> {
        self.well_known
            .get(name)
            .map(|e| e.address.clone())
            .or_else(|| self.ephemeral.get(name).map(|e| e.address.clone()))
    }

    fn list(&self, pattern: &str, include_ephemeral: bool) -> Vec<DirectoryEntry> {
        let mut entries: Vec<DirectoryEntry> = self
            .well_known
            .iter()
            .map(|e| e.value().clone())
            .filter(|e| pattern_matches(pattern, &e.name))
            .collect();
        if include_ephemeral {
            entries.extend(
                self.ephemeral
                    .iter()
                    .map(|e| e.value().clone())
                    .filter(|e| pattern_matches(pattern, &e.name)),
            );
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    pub fn well_known_count(&self) -> usize {
        self.well_known.len()
    }

    pub fn ephemeral_count(&self) -> usize {
        self.ephemeral.len()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Behavior for Directory {
    type Error = DirectoryError;

    async fn handle(
        &mut self,
        message: DynamicMessage,
        ctx: &BehaviorContext,
    ) -> Result<MessagePlan, Self::Error> {
        let _ = ctx;
        match message.message_type.as_str() {
            "REGISTER" => {
                let req: RegisterRequest =
                    message
                        .decode_payload()
                        .map_err(|source| DirectoryError::InvalidPayload {
                            message_type: "REGISTER".to_string(),
                            source,
                        })?;
                self.register(req.name, req.address, req.ephemeral)?;
                Ok(MessagePlan::Nothing)
            }
            "UNREGISTER" => {
                let req: UnregisterRequest =
                    message
                        .decode_payload()
                        .map_err(|source| DirectoryError::InvalidPayload {
                            message_type: "UNREGISTER".to_string(),
                            source,
                        })?;
                self.unregister(&req.name, req.ephemeral);
                Ok(MessagePlan::Nothing)
            }
            "LOOKUP" => {
                let req: LookupRequest =
                    message
                        .decode_payload()
                        .map_err(|source| DirectoryError::InvalidPayload {
                            message_type: "LOOKUP".to_string(),
                            source,
                        })?;
                let address = self.lookup(&req.name);
                Ok(MessagePlan::Send(SendInstruction {
                    target: req.requestor,
                    message_type: "LOOKUP_RESULT".to_string(),
                    payload: serde_json::to_value(LookupResult {
                        name: req.name,
                        address,
                    })
                    .unwrap_or(serde_json::Value::Null),
                    mode: SendMode::Retry3,
                }))
            }
            "LIST" => {
                let req: ListRequest =
                    message
                        .decode_payload()
                        .map_err(|source| DirectoryError::InvalidPayload {
                            message_type: "LIST".to_string(),
                            source,
                        })?;
                let entries = self.list(&req.pattern, req.include_ephemeral);
                Ok(MessagePlan::Send(SendInstruction {
                    target: req.requestor,
                    message_type: "LIST_RESULT".to_string(),
                    payload: json!({ "entries": entries }),
                    mode: SendMode::Retry3,
                }))
            }
            "HEALTH_CHECK" => {
                let req: HealthCheckRequest =
                    message
                        .decode_payload()
                        .map_err(|source| DirectoryError::InvalidPayload {
                            message_type: "HEALTH_CHECK".to_string(),
                            source,
                        })?;
                Ok(MessagePlan::Send(SendInstruction {
                    target: req.requestor,
                    message_type: "HEALTH_STATUS".to_string(),
                    payload: json!({
                        "wellKnownCount": self.well_known_count(),
                        "ephemeralCount": self.ephemeral_count(),
                        "timestamp": Utc::now(),
                    }),
                    mode: SendMode::Retry3,
                }))
            }
            other => Err(DirectoryError::UnknownMessageType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> BehaviorContext {
        BehaviorContext::new(ActorAddress::named("system.discovery"))
    }

    #[tokio::test]
    async fn test_register_then_lookup() {
        let mut dir = Directory::new();
        let target = ActorAddress::named("worker-pool");
        let requestor = ActorAddress::named("caller");

        dir.handle(
            DynamicMessage::new(
                "REGISTER",
                json!({ "name": "worker-pool", "address": target }),
            ),
            &ctx(),
        )
        .await
        .unwrap();

        let plan = dir
            .handle(
                DynamicMessage::new(
                    "LOOKUP",
                    json!({ "name": "worker-pool", "requestor": requestor }),
                ),
                &ctx(),
            )
            .await
            .unwrap();

        match plan {
            MessagePlan::Send(instr) => {
                assert_eq!(instr.message_type, "LOOKUP_RESULT");
                let result: LookupResult = serde_json::from_value(instr.payload).unwrap();
                assert!(result.address.is_some());
            }
            other => panic!("expected Send, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reregistration_same_address_is_idempotent() {
        let mut dir = Directory::new();
        let target = ActorAddress::named("worker-pool");

        for _ in 0..3 {
            dir.handle(
                DynamicMessage::new(
                    "REGISTER",
                    json!({ "name": "worker-pool", "address": target.clone() }),
                ),
                &ctx(),
            )
            .await
            .unwrap();
        }

        assert_eq!(dir.well_known_count(), 1);
    }

    #[tokio::test]
    async fn test_lookup_missing_name_returns_none() {
        let mut dir = Directory::new();
        let requestor = ActorAddress::named("caller");

        let plan = dir
            .handle(
                DynamicMessage::new(
                    "LOOKUP",
                    json!({ "name": "nope", "requestor": requestor }),
                ),
                &ctx(),
            )
            .await
            .unwrap();

        match plan {
            MessagePlan::Send(instr) => {
                let result: LookupResult = serde_json::from_value(instr.payload).unwrap();
                assert!(result.address.is_none());
            }
            other => panic!("expected Send, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unregister_removes_entry() {
        let mut dir = Directory::new();
        let target = ActorAddress::named("worker-pool");

        dir.handle(
            DynamicMessage::new(
                "REGISTER",
                json!({ "name": "worker-pool", "address": target }),
            ),
            &ctx(),
        )
        .await
        .unwrap();
        dir.handle(
            DynamicMessage::new("UNREGISTER", json!({ "name": "worker-pool" })),
            &ctx(),
        )
        .await
        .unwrap();

        assert_eq!(dir.well_known_count(), 0);
    }

    #[tokio::test]
    async fn test_list_matches_pattern_sorted() {
        let mut dir = Directory::new();
        for name in ["orders.alpha", "orders.beta", "billing.main"] {
            dir.handle(
                DynamicMessage::new(
                    "REGISTER",
                    json!({ "name": name, "address": ActorAddress::named(name) }),
                ),
                &ctx(),
            )
            .await
            .unwrap();
        }

        let plan = dir
            .handle(
                DynamicMessage::new(
                    "LIST",
                    json!({ "pattern": "orders.*", "requestor": ActorAddress::named("caller") }),
                ),
                &ctx(),
            )
            .await
            .unwrap();

        match plan {
            MessagePlan::Send(instr) => {
                let entries: Vec<DirectoryEntry> =
                    serde_json::from_value(instr.payload["entries"].clone()).unwrap();
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].name, "orders.alpha");
                assert_eq!(entries[1].name, "orders.beta");
            }
            other => panic!("expected Send, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_health_check_reports_counts() {
        let mut dir = Directory::new();
        dir.handle(
            DynamicMessage::new(
                "REGISTER",
                json!({ "name": "worker-pool", "address": ActorAddress::named("worker-pool") }),
            ),
            &ctx(),
        )
        .await
        .unwrap();

        let plan = dir
            .handle(
                DynamicMessage::new(
                    "HEALTH_CHECK",
                    json!({ "requestor": ActorAddress::named("caller") }),
                ),
                &ctx(),
            )
            .await
            .unwrap();

        match plan {
            MessagePlan::Send(instr) => {
                assert_eq!(instr.message_type, "HEALTH_STATUS");
                assert_eq!(instr.payload["wellKnownCount"], 1);
            }
            other => panic!("expected Send, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ephemeral_reregistration_with_different_address_rejected() {
        let mut dir = Directory::new();
        // Distinct anonymous addresses registered under the same ephemeral
        // name: path equality would make two `ephemeral("ask-reply-1")`
        // calls compare equal, so use addresses that are genuinely different.
        let first = ActorAddress::anonymous();
        let second = ActorAddress::anonymous();

        dir.handle(
            DynamicMessage::new(
                "REGISTER",
                json!({ "name": "ask-reply-1", "address": first, "ephemeral": true }),
            ),
            &ctx(),
        )
        .await
        .unwrap();

        let result = dir
            .handle(
                DynamicMessage::new(
                    "REGISTER",
                    json!({ "name": "ask-reply-1", "address": second, "ephemeral": true }),
                ),
                &ctx(),
            )
            .await;

        assert!(matches!(
            result,
            Err(DirectoryError::EphemeralAlreadyRegistered(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_message_type_errors() {
        let mut dir = Directory::new();
        let result = dir.handle(DynamicMessage::new("NONSENSE", json!({})), &ctx()).await;
        assert!(matches!(result, Err(DirectoryError::UnknownMessageType(_))));
    }
}
