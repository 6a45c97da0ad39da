//! What the widget is currently showing

use crate::models::Joke;

pub const LOADING_TEXT: &str = "Loading...";
pub const NOT_FOUND_TEXT: &str = "No joke found.";
pub const ERROR_TEXT: &str = "Error fetching joke.";

/// Category label used when nothing categorized is on screen
pub const ANY_CATEGORY: &str = "Any";

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied";

/// Display surface state
#[derive(Debug, Clone)]
pub struct Display {
    text: String,
    category: String,
    current: Option<Joke>,
    copy_label: &'static str,
    transitions: u64,
}

impl Display {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            category: ANY_CATEGORY.to_string(),
            current: None,
            copy_label: COPY_LABEL,
            transitions: 0,
        }
    }

    /// Show a joke and its category
    pub fn show_joke(&mut self, joke: &Joke) {
        self.text = joke.text.clone();
        self.category = if joke.category.is_empty() {
            ANY_CATEGORY.to_string()
        } else {
            joke.category.clone()
        };
        self.current = Some(joke.clone());
    }

    /// Replace the text without changing the joke on record
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Run the fade-in transition
    pub fn animate(&mut self) {
        self.transitions += 1;
    }

    pub fn set_copy_label(&mut self, label: &'static str) {
        self.copy_label = label;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn current(&self) -> Option<&Joke> {
        self.current.as_ref()
    }

    pub fn copy_label(&self) -> &'static str {
        self.copy_label
    }

    pub fn transitions(&self) -> u64 {
        self.transitions
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
