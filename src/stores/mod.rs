//! In-memory stores

mod joke_store;

pub use joke_store::JokeStore;
