//! Utility modules for jokebox

pub mod threading;
