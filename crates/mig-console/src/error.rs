//! Error taxonomy for console sessions.

use mig_client::ClientError;

/// Operations that can abort a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetAction,
    GetCommand,
    CommandReader,
    SearchFoundAnything,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::GetAction => "getAction",
            Operation::GetCommand => "getCommand",
            Operation::CommandReader => "commandReader",
            Operation::SearchFoundAnything => "searchFoundAnything",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("{op}() -> {source}")]
    Operation {
        op: Operation,
        #[source]
        source: BoxError,
    },

    #[error("wrong order format: {0}")]
    Usage(String),

    #[error("line editor error: {0}")]
    LineEditor(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConsoleError {
    /// The operation that failed, if this error came from one.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ConsoleError::Operation { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// The innermost API client error, looking through nested operations.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            ConsoleError::Operation { source, .. } => {
                if let Some(client) = source.downcast_ref::<ClientError>() {
                    Some(client)
                } else {
                    source
                        .downcast_ref::<ConsoleError>()
                        .and_then(ConsoleError::client_error)
                }
            }
            _ => None,
        }
    }
}

/// Attach the failing operation to an error.
pub trait OperationContext<T> {
    fn during(self, op: Operation) -> Result<T>;
}

impl<T, E> OperationContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn during(self, op: Operation) -> Result<T> {
        self.map_err(|e| ConsoleError::Operation {
            op,
            source: Box::new(e),
        })
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
