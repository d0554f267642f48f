//! Container wrapped around the encoded record text

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Serialized form handed to a backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEnvelope {
    /// Encoded record text; `None` reads as an empty snapshot
    #[serde(default)]
    pub data: Option<String>,
}

impl SnapshotEnvelope {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Encoded text, empty when the envelope carried no data
    pub fn text(&self) -> &str {
        self.data.as_deref().unwrap_or("")
    }
}
