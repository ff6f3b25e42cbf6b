//! Typed access to MIG API resources

use std::sync::Arc;
use tracing::debug;

use crate::envelope::Discriminator;
use crate::records::{ActionRecord, CommandResult};
use crate::transport::{HttpTransport, Transport};
use crate::{ApiConfig, Result};

/// Result-count ceiling sent with search queries
pub const SEARCH_LIMIT: u64 = 1_000_000;

/// MIG API client
#[derive(Clone)]
pub struct MigClient {
    transport: Arc<dyn Transport>,
}

impl MigClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        MigClient { transport }
    }

    /// Client over HTTP for the given configuration
    pub fn http(config: ApiConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    /// Fetch one action by its identifier.
    pub async fn fetch_action(&self, action_id: u64) -> Result<ActionRecord> {
        let envelope = self
            .transport
            .get_resource("action", &[("actionid", action_id.to_string())])
            .await?;
        let action: ActionRecord = envelope.decode(Discriminator::Action)?;
        debug!(action_id, name = %action.name, "fetched action");
        Ok(action)
    }

    /// Search the commands of an action, filtered on whether they found anything.
    pub async fn search_commands(
        &self,
        action_id: u64,
        want_found: bool,
    ) -> Result<Vec<CommandResult>> {
        let query = [
            ("type", "command".to_string()),
            ("limit", SEARCH_LIMIT.to_string()),
            ("actionid", action_id.to_string()),
            ("foundanything", want_found.to_string()),
        ];
        let envelope = self.transport.get_resource("search", &query).await?;
        let results: Vec<CommandResult> = envelope
            .decode::<Option<Vec<CommandResult>>>(Discriminator::SearchResults)?
            .unwrap_or_default();
        debug!(action_id, want_found, count = results.len(), "searched commands");
        Ok(results)
    }

    /// Fetch one command by its identifier.
    pub async fn fetch_command(&self, command_id: u64) -> Result<CommandResult> {
        let envelope = self
            .transport
            .get_resource("command", &[("commandid", command_id.to_string())])
            .await?;
        envelope.decode(Discriminator::Command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::MemoryTransport;
    use crate::{ClientError, Envelope};
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_action_sends_action_id() {
        let transport = Arc::new(MemoryTransport::new());
        transport.push("action", Envelope::single("action", json!({"ID": 42, "Name": "survey"})));
        let client = MigClient::new(transport.clone());

        let action = client.fetch_action(42).await.unwrap();
        assert_eq!(action.name, "survey");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].endpoint, "action");
        assert_eq!(requests[0].query, vec![("actionid".to_string(), "42".to_string())]);
    }

    #[tokio::test]
    async fn test_search_commands_query_shape() {
        let transport = Arc::new(MemoryTransport::new());
        transport.push("search", Envelope::single("search results", json!([])));
        let client = MigClient::new(transport.clone());

        let results = client.search_commands(42, false).await.unwrap();
        assert!(results.is_empty());

        let query = &transport.requests()[0].query;
        let keys: Vec<&str> = query.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["type", "limit", "actionid", "foundanything"]);
        assert_eq!(query[0].1, "command");
        assert_eq!(query[1].1, "1000000");
        assert_eq!(query[3].1, "false");
    }

    #[tokio::test]
    async fn test_search_with_null_results_is_empty() {
        let transport = Arc::new(MemoryTransport::new());
        transport.push("search", Envelope::single("search results", serde_json::Value::Null));
        let client = MigClient::new(transport);

        let results = client.search_commands(42, false).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_command_checks_tag() {
        let transport = Arc::new(MemoryTransport::new());
        transport.push("command", Envelope::single("action", json!({"ID": 9})));
        let client = MigClient::new(transport);

        let err = client.fetch_command(9).await.unwrap_err();
        assert!(matches!(err, ClientError::Protocol { expected: "command", .. }));
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let transport = Arc::new(MemoryTransport::new());
        transport.fail("action", "connection refused");
        let client = MigClient::new(transport);

        let err = client.fetch_action(1).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(ref m) if m.contains("connection refused")));
    }
}
