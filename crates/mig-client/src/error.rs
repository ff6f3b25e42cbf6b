//! Error types for mig-client

use thiserror::Error;

/// Errors that can occur while talking to the MIG API
#[derive(Error, Debug)]
pub enum ClientError {
    /// The envelope does not carry the expected kind of record
    #[error("API returned '{found}' where '{expected}' was expected")]
    Protocol {
        expected: &'static str,
        found: String,
    },

    /// The envelope is well formed but its payload does not fit the record
    #[error("failed to decode {record}: {source}")]
    Decode {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Request could not be completed by the transport
    #[error("transport error: {0}")]
    Transport(String),

    /// Client configuration is unusable
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_names_both_kinds() {
        let err = ClientError::Protocol {
            expected: "action",
            found: "search results".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'action'"));
        assert!(msg.contains("'search results'"));
    }

    #[test]
    fn test_decode_error_keeps_source() {
        let source = serde_json::from_str::<u64>("\"nope\"").unwrap_err();
        let err = ClientError::Decode {
            record: "action",
            source,
        };
        assert!(err.to_string().starts_with("failed to decode action"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
