//! Core types for Penfeed

use serde::{Deserialize, Deserializer, Serialize};

/// Nanoseconds per millisecond, the store's native resolution over display resolution
pub const NANOS_PER_MILLI: i64 = 1_000_000;

/// A post as returned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub author: String,
    /// HTML produced by the rich-text editor, kept verbatim
    pub body: String,
    /// Nanoseconds since the Unix epoch
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: i64,
}

impl Post {
    /// Timestamp in milliseconds, truncated toward zero
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp / NANOS_PER_MILLI
    }
}

/// The fields the composer hands to the store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub body: String,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            body: body.into(),
        }
    }
}

/// Accepts the timestamp as a JSON number or a decimal string.
///
/// 64-bit nanosecond values overflow JavaScript numbers, so stores behind a
/// JS gateway usually send them as strings.
fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{}': {}", s, e))),
    }
}
