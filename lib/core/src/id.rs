//! Identifier types.
//!
//! Widget instances are named by a ULID so they can be handed out to
//! clients. Messages only need an ordering within their own conversation,
//! so they carry a plain sequence number.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Unique identifier for one chat widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(Ulid);

impl WidgetId {
    const PREFIX: &'static str = "wgt";

    /// Creates a new ID with a randomly generated ULID.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", Self::PREFIX, self.0)
    }
}

impl FromStr for WidgetId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .strip_prefix(Self::PREFIX)
            .and_then(|rest| rest.strip_prefix('_'))
            .unwrap_or(s);

        Ulid::from_str(raw).map(Self).map_err(|e| ParseIdError {
            id_type: "WidgetId",
            reason: e.to_string(),
        })
    }
}

/// Sequence number of a message within its conversation.
///
/// The greeting is always [`MessageId::FIRST`]; every later message takes
/// the successor of the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    /// The id of the first message in every conversation.
    pub const FIRST: Self = Self(1);

    /// Returns the id that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_id_display_format() {
        let id = WidgetId::new();
        assert!(id.to_string().starts_with("wgt_"));
    }

    #[test]
    fn parse_with_prefix() {
        let id = WidgetId::new();
        let parsed: WidgetId = id.to_string().parse().expect("should parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_without_prefix() {
        let ulid = Ulid::new();
        let id: WidgetId = ulid.to_string().parse().expect("should parse");
        assert_eq!(id.to_string(), format!("wgt_{ulid}"));
    }

    #[test]
    fn parse_invalid_ulid() {
        let err = "wgt_not-a-ulid".parse::<WidgetId>().unwrap_err();
        assert_eq!(err.id_type, "WidgetId");
    }

    #[test]
    fn message_ids_increase() {
        let second = MessageId::FIRST.next();
        assert_eq!(MessageId::FIRST.get(), 1);
        assert_eq!(second.get(), 2);
        assert!(second > MessageId::FIRST);
    }

    #[test]
    fn message_id_serializes_as_number() {
        let json = serde_json::to_string(&MessageId::FIRST.next()).expect("serialize");
        assert_eq!(json, "2");
    }
}
