//! Turns remote joke responses into canonical jokes

use serde_json::Value;

use crate::models::{Joke, JokeId, JokeOrigin, RawJoke, RawJokeKind, DEFAULT_JOKE_CATEGORY};

/// Normalize a remote response
///
/// Returns `None` for a missing response, an unknown or missing `type`, or a
/// recognized type whose text fields are missing or blank.
pub fn normalize(raw: Option<&Value>) -> Option<Joke> {
    let raw = raw.filter(|v| !v.is_null())?;
    let raw: RawJoke = serde_json::from_value(raw.clone()).ok()?;

    let text = match raw.kind {
        RawJokeKind::Single { joke } if joke.trim().is_empty() => return None,
        RawJokeKind::Single { joke } => joke,
        RawJokeKind::TwoPart { setup, delivery } => format!("{}\n\n{}", setup, delivery),
        RawJokeKind::Unknown => return None,
    };

    let category = raw
        .category
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_JOKE_CATEGORY.to_string());

    Some(Joke {
        id: remote_id(raw.id.as_ref()).unwrap_or_else(JokeId::generate),
        text,
        category,
        source: JokeOrigin::Api,
    })
}

/// Keep the remote id only when it is truthy
fn remote_id(id: Option<&Value>) -> Option<JokeId> {
    match id? {
        Value::Number(n) => match n.as_i64() {
            Some(0) | None => None,
            Some(n) => Some(JokeId::Remote(n)),
        },
        Value::String(s) if !s.is_empty() => Some(JokeId::Text(s.clone())),
        _ => None,
    }
}
