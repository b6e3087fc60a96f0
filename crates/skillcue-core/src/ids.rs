//! Branded ID newtype for conversations.
//!
//! A conversation ID is generated once per conversation and stays stable for
//! as long as its state file exists. The format is
//! `conv-<epoch millis>-<8 hex chars>`, which sorts roughly by creation time
//! and stays readable in the persisted JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix shared by every generated conversation ID.
pub const CONVERSATION_ID_PREFIX: &str = "conv-";

/// Unique identifier for one conversation's activation state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Generate a fresh ID from the current time and 32 random bits.
    #[must_use]
    pub fn new() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: u32 = rand::random();
        Self(format!("{CONVERSATION_ID_PREFIX}{millis}-{suffix:08x}"))
    }

    /// Create from an existing string value.
    #[must_use]
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Return the inner string as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume self and return the inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for ConversationId {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ConversationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ConversationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ConversationId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<ConversationId> for String {
    fn from(id: ConversationId) -> Self {
        id.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_has_expected_shape() {
        let id = ConversationId::new();
        let rest = id.as_str().strip_prefix(CONVERSATION_ID_PREFIX).unwrap();
        let (millis, hex) = rest.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(hex.len(), 8);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ids_are_unique() {
        let a = ConversationId::new();
        let b = ConversationId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn from_str_ref() {
        let id = ConversationId::from("conv-1-abcdef01");
        assert_eq!(id.as_str(), "conv-1-abcdef01");
    }

    #[test]
    fn deref_and_display() {
        let id = ConversationId::from("conv-42-00000000");
        let s: &str = &id;
        assert_eq!(s, "conv-42-00000000");
        assert_eq!(format!("{id}"), "conv-42-00000000");
    }

    #[test]
    fn serde_is_transparent() {
        let id = ConversationId::from("conv-7-deadbeef");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"conv-7-deadbeef\"");
        let back: ConversationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
