//! Domain records served by the MIG API
//!
//! Field names follow the API's PascalCase JSON. Missing fields decode to
//! their defaults so older servers that omit optional blocks still load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An investigative task dispatched to agents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ActionRecord {
    #[serde(rename = "ID")]
    pub id: u64,
    pub name: String,
    pub target: String,
    pub description: Description,
    pub threat: Threat,
    pub valid_from: DateTime<Utc>,
    pub expire_after: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_empty")]
    pub operations: Vec<Operation>,
    #[serde(deserialize_with = "null_as_empty")]
    pub investigators: Vec<Investigator>,
    pub status: String,
    pub start_time: DateTime<Utc>,
    pub finish_time: DateTime<Utc>,
    pub last_update_time: DateTime<Utc>,
    pub counters: Counters,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Description {
    pub author: String,
    pub email: String,
    #[serde(rename = "URL")]
    pub url: String,
    pub revision: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Threat {
    #[serde(rename = "Ref")]
    pub reference: String,
    pub level: String,
    pub family: String,
    #[serde(rename = "Type")]
    pub kind: String,
}

/// One module invocation inside an action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Operation {
    pub module: String,
    pub parameters: Value,
}

/// Signer of an action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Investigator {
    pub name: String,
    #[serde(rename = "PGPFingerprint")]
    pub pgp_fingerprint: String,
}

/// Result counters maintained by the scheduler.
///
/// Upstream keeps `sent >= returned >= done`; nothing here enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Counters {
    pub sent: u64,
    pub returned: u64,
    pub done: u64,
    pub cancelled: u64,
    pub failed: u64,
    #[serde(rename = "TimeOut")]
    pub timeout: u64,
}

/// A command is one action as run by one agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommandResult {
    #[serde(rename = "ID")]
    pub id: u64,
    pub agent: AgentRef,
    pub action: ActionRef,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AgentRef {
    #[serde(rename = "ID")]
    pub id: u64,
    pub name: String,
}

/// Link from a command back to its action; extra action fields are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ActionRef {
    #[serde(rename = "ID")]
    pub id: u64,
    pub name: String,
}

/// The API encodes an empty list as `null`.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
