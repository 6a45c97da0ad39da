//! Background slide model

use serde::{Deserialize, Serialize};

/// Opaque image reference (a URI)
pub type ImageRef = String;

/// One visual layer of the background
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub src: ImageRef,
    pub active: bool,
}

impl Slide {
    pub fn new(src: ImageRef) -> Self {
        Self { src, active: false }
    }
}
