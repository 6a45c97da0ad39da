//! Keyboard shortcuts

use serde::Deserialize;

/// Key code that asks for a new joke
pub const NEW_JOKE_KEY: &str = "Space";

/// Which kind of control had focus when a key was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    #[default]
    Page,
    Input,
    Select,
    Button,
}

impl Focus {
    /// Whether the control consumes typed keys itself
    pub fn captures_keys(self) -> bool {
        matches!(self, Focus::Input | Focus::Select)
    }
}

/// Whether a key press should fetch a new joke
pub fn triggers_new_joke(code: &str, focus: Focus) -> bool {
    code == NEW_JOKE_KEY && !focus.captures_keys()
}
