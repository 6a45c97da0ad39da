//! Core widget logic

pub mod display;
pub mod fetcher;
pub mod keys;
pub mod manager;
pub mod normalizer;
pub mod rotator;

pub use manager::JokeManager;
pub use rotator::BackgroundRotator;
