//! Serializers for converting widget state to API responses
//!
//! Each view is a render-ready snapshot: labels are resolved here so a front
//! end only has to place them.

use serde::Serialize;

use crate::core::display::Display;
use crate::models::{Joke, JokeId};
use crate::stores::JokeStore;

pub const SAVE_LABEL: &str = "Save";
pub const SAVED_LABEL: &str = "Saved";

/// Label of a save/favorite control
pub fn save_label(saved: bool) -> &'static str {
    if saved {
        SAVED_LABEL
    } else {
        SAVE_LABEL
    }
}

/// The joke card
#[derive(Debug, Clone, Serialize)]
pub struct DisplayView {
    pub text: String,
    pub category: String,
    pub joke_id: Option<JokeId>,
    pub saved: bool,
    pub favorite_label: &'static str,
    pub copy_label: &'static str,
    /// Increments each time the card should replay its fade-in
    pub transition: u64,
    pub fetching: bool,
    pub saved_count: usize,
}

impl DisplayView {
    pub fn build(display: &Display, store: &JokeStore, fetching: bool) -> Self {
        let joke_id = display.current().map(|j| j.id.clone());
        let saved = joke_id
            .as_ref()
            .map(|id| store.is_favorite(id))
            .unwrap_or(false);

        Self {
            text: display.text().to_string(),
            category: display.category().to_string(),
            joke_id,
            saved,
            favorite_label: save_label(saved),
            copy_label: display.copy_label(),
            transition: display.transitions(),
            fetching,
            saved_count: store.favorites_count(),
        }
    }
}

/// One row of the sidebar
#[derive(Debug, Clone, Serialize)]
pub struct SidebarItem {
    pub id: JokeId,
    /// Joke text on a single line
    pub title: String,
    pub category: String,
    pub saved: bool,
    pub save_label: &'static str,
}

impl SidebarItem {
    fn new(joke: &Joke, saved: bool) -> Self {
        Self {
            id: joke.id.clone(),
            title: joke.title(),
            category: joke.category.clone(),
            saved,
            save_label: save_label(saved),
        }
    }
}

/// The searchable list of seen jokes
#[derive(Debug, Clone, Serialize)]
pub struct SidebarView {
    pub items: Vec<SidebarItem>,
    /// Matches before the list cap
    pub matches: usize,
    pub joke_count: usize,
    pub saved_count: usize,
    pub revision: u64,
}

impl SidebarView {
    pub fn build(store: &JokeStore, query: &str, limit: usize) -> Self {
        let filtered = store.filtered_view(query, limit);
        let items = filtered
            .items
            .iter()
            .map(|joke| SidebarItem::new(joke, store.is_favorite(&joke.id)))
            .collect();

        Self {
            items,
            matches: filtered.matches,
            joke_count: store.count(),
            saved_count: store.favorites_count(),
            revision: store.revision(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoritesView {
    pub favorites: Vec<Joke>,
    pub count: usize,
}

impl FavoritesView {
    pub fn build(store: &JokeStore) -> Self {
        Self {
            favorites: store.favorites().to_vec(),
            count: store.favorites_count(),
        }
    }
}
