//! MIG Client: typed access to the MIG API
//!
//! The API wraps every resource in a Collection+JSON envelope. This crate
//! validates the envelope's declared record kind, then decodes the payload
//! into strongly typed records.
//!
//! ## Key Components
//!
//! - `Envelope` / `TaggedPayload`: two-phase validate-then-decode of responses
//! - `ActionRecord`, `CommandResult`: domain records
//! - `Transport`: the GET primitive, with `HttpTransport` over `reqwest`
//! - `MigClient`: `fetch_action`, `search_commands`, `fetch_command`

pub mod client;
pub mod config;
pub mod envelope;
mod error;
pub mod fakes;
pub mod records;
pub mod transport;

pub use client::{MigClient, SEARCH_LIMIT};
pub use config::ApiConfig;
pub use envelope::{
    decode_value, Collection, CollectionError, DataEntry, Discriminator, Envelope, Item,
    TaggedPayload,
};
pub use error::ClientError;
pub use records::{
    ActionRecord, ActionRef, AgentRef, CommandResult, Counters, Description, Investigator,
    Operation, Threat,
};
pub use transport::{HttpTransport, Transport};

/// Result type for mig-client operations
pub type Result<T> = std::result::Result<T, ClientError>;
