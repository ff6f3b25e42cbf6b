//! Collection envelope returned by the MIG API
//!
//! Every resource comes back wrapped in the same weakly-typed shape:
//! a collection of items, each carrying named data entries whose value
//! is arbitrary JSON. Decoding is done in two phases:
//!
//! 1. the first entry of the first item is lifted into a [`TaggedPayload`]
//!    and its tag is checked against the expected [`Discriminator`];
//! 2. only then is the payload decoded into the target record type.
//!
//! A server that answers with the wrong kind of record therefore fails at a
//! single checkpoint instead of leaking defaulted fields downstream.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;
use crate::Result;

/// Top-level response document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub collection: Collection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CollectionError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub data: Vec<DataEntry>,
}

/// A named, opaquely typed value inside an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEntry {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// Error block the API fills in on failed requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Known kinds of records an envelope can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discriminator {
    Action,
    SearchResults,
    Command,
}

impl Discriminator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discriminator::Action => "action",
            Discriminator::SearchResults => "search results",
            Discriminator::Command => "command",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "action" => Some(Discriminator::Action),
            "search results" => Some(Discriminator::SearchResults),
            "command" => Some(Discriminator::Command),
            _ => None,
        }
    }
}

impl std::fmt::Display for Discriminator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The record of interest, lifted out of the envelope with its declared tag
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedPayload {
    pub tag: String,
    pub payload: Value,
}

impl TaggedPayload {
    pub fn discriminator(&self) -> Option<Discriminator> {
        Discriminator::from_tag(&self.tag)
    }

    /// Check the tag and hand back the raw payload.
    pub fn expect(self, expected: Discriminator) -> Result<Value> {
        if self.discriminator() != Some(expected) {
            return Err(ClientError::Protocol {
                expected: expected.as_str(),
                found: self.tag,
            });
        }
        Ok(self.payload)
    }

    /// Check the tag, then decode the payload into `T`.
    pub fn decode<T: DeserializeOwned>(self, expected: Discriminator) -> Result<T> {
        let payload = self.expect(expected)?;
        decode_value(&payload, expected.as_str())
    }
}

impl Envelope {
    /// Build an envelope holding a single named entry.
    pub fn single(name: &str, value: Value) -> Self {
        Envelope {
            collection: Collection {
                version: "1.0".to_string(),
                href: String::new(),
                items: vec![Item {
                    href: String::new(),
                    data: vec![DataEntry {
                        name: name.to_string(),
                        value,
                    }],
                }],
                error: None,
            },
        }
    }

    /// First data entry of the first item, if any.
    pub fn first_entry(&self) -> Option<&DataEntry> {
        self.collection
            .items
            .first()
            .and_then(|item| item.data.first())
    }

    /// Lift the record of interest out of the envelope.
    pub fn into_tagged(self) -> Option<TaggedPayload> {
        let item = self.collection.items.into_iter().next()?;
        let entry = item.data.into_iter().next()?;
        Some(TaggedPayload {
            tag: entry.name,
            payload: entry.value,
        })
    }

    /// Validate the discriminator and decode the payload into `T`.
    pub fn decode<T: DeserializeOwned>(self, expected: Discriminator) -> Result<T> {
        match self.into_tagged() {
            Some(tagged) => tagged.decode(expected),
            None => Err(ClientError::Protocol {
                expected: expected.as_str(),
                found: "empty collection".to_string(),
            }),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.collection
            .error
            .as_ref()
            .map(|e| e.message.as_str())
            .filter(|m| !m.is_empty())
    }
}

/// Re-encode an opaque JSON value and decode it into the target shape.
///
/// The transport hands back loosely typed data; going through the canonical
/// byte form keeps decoding identical to what a fresh response body gives.
pub fn decode_value<T: DeserializeOwned>(value: &Value, record: &'static str) -> Result<T> {
    let bytes =
        serde_json::to_vec(value).map_err(|source| ClientError::Decode { record, source })?;
    serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { record, source })
}
