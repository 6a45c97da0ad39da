//! Data models for jokebox

mod background;
mod joke;

pub use background::{ImageRef, Slide};
pub use joke::{Joke, JokeId, JokeOrigin, RawJoke, RawJokeKind, DEFAULT_JOKE_CATEGORY};
