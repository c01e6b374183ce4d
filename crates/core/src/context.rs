//! Context payload types.
//!
//! The context sent with an ask has no fixed schema: it is whatever the
//! host page knows about the current learning unit at call time. It is
//! modeled as a string-keyed map of JSON values so it always serializes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A structured content descriptor for the sequence that contains the unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sequence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Blocks of the units in this sequence, passed through untouched.
    #[serde(default, alias = "blocks", skip_serializing_if = "Vec::is_empty")]
    pub unit_blocks: Vec<Value>,

    /// Any other fields the host supplied.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Sequence {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.display_name.is_none()
            && self.unit_blocks.is_empty()
            && self.extra.is_empty()
    }
}

/// Caller-supplied inputs for context assembly. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextInputs {
    #[serde(default)]
    pub sequence: Option<Sequence>,

    #[serde(default)]
    pub course_id: Option<String>,

    #[serde(default)]
    pub unit_id: Option<String>,

    /// Open-ended extra fields forwarded by the host.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The assembled context payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestContext(Map<String, Value>);

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RequestContext {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
