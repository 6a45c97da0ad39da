//! Joke model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category stamped on jokes the remote source did not categorize
pub const DEFAULT_JOKE_CATEGORY: &str = "Misc";

/// Identifier of a joke
///
/// Remote jokes keep the id the source gave them. Jokes that arrived without
/// one get a random UUID at normalization time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JokeId {
    Remote(i64),
    Local(Uuid),
    Text(String),
}

impl JokeId {
    /// Generate a fresh local id
    pub fn generate() -> Self {
        JokeId::Local(Uuid::new_v4())
    }

    /// Parse an id from a path segment (integer, then uuid, then free text)
    pub fn parse(s: &str) -> Self {
        if let Ok(n) = s.parse::<i64>() {
            return JokeId::Remote(n);
        }
        if let Ok(uuid) = Uuid::parse_str(s) {
            return JokeId::Local(uuid);
        }
        JokeId::Text(s.to_string())
    }
}

impl std::fmt::Display for JokeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JokeId::Remote(n) => write!(f, "{}", n),
            JokeId::Local(uuid) => write!(f, "{}", uuid),
            JokeId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Where a joke came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JokeOrigin {
    Api,
}

/// A joke in its canonical shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub id: JokeId,
    pub text: String,
    pub category: String,
    pub source: JokeOrigin,
}

impl Joke {
    /// Create a joke carrying a remote id
    #[cfg(test)]
    pub fn new(id: i64, text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: JokeId::Remote(id),
            text: text.into(),
            category: category.into(),
            source: JokeOrigin::Api,
        }
    }

    /// Single-line title for list rendering
    pub fn title(&self) -> String {
        self.text.replace('\n', " ")
    }
}

/// Body of a joke as JokeAPI returns it, discriminated by `type`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawJokeKind {
    Single {
        joke: String,
    },
    #[serde(rename = "twopart")]
    TwoPart {
        setup: String,
        delivery: String,
    },
    #[serde(other)]
    Unknown,
}

/// A joke response from the remote source
#[derive(Debug, Clone, Deserialize)]
pub struct RawJoke {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(flatten)]
    pub kind: RawJokeKind,
}
