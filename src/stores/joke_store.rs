//! Joke store - the seen-jokes list and the favorites list
//!
//! Both lists are unique by joke id. The seen list is ordered newest first;
//! favorites keep the order in which they were saved.

use crate::models::{Joke, JokeId};

/// Result of filtering the seen-jokes list
#[derive(Debug, Clone)]
pub struct FilteredJokes<'a> {
    /// Matching jokes in list order, capped
    pub items: Vec<&'a Joke>,
    /// Number of matches before the cap
    pub matches: usize,
}

/// In-memory store for jokes
#[derive(Debug, Default)]
pub struct JokeStore {
    jokes: Vec<Joke>,
    favorites: Vec<Joke>,
    /// Bumped on every mutation so views know to re-render
    revision: u64,
}

impl JokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a joke at the front of the list, replacing any entry with the same id
    pub fn push(&mut self, joke: Option<Joke>) {
        let Some(joke) = joke else {
            return;
        };

        self.jokes.retain(|j| j.id != joke.id);
        self.jokes.insert(0, joke);
        self.revision += 1;
    }

    /// Flip favorite membership of a joke, returning the new membership
    pub fn toggle_favorite(&mut self, joke: Option<&Joke>) -> Option<bool> {
        let joke = joke?;

        let saved = if self.is_favorite(&joke.id) {
            self.favorites.retain(|f| f.id != joke.id);
            false
        } else {
            self.favorites.push(joke.clone());
            true
        };

        self.revision += 1;
        Some(saved)
    }

    /// Case-insensitive substring search over joke text
    pub fn filtered_view(&self, query: &str, limit: usize) -> FilteredJokes<'_> {
        let query = query.trim().to_lowercase();

        let mut matches = 0;
        let mut items = Vec::new();
        for joke in &self.jokes {
            if joke.text.to_lowercase().contains(&query) {
                matches += 1;
                if items.len() < limit {
                    items.push(joke);
                }
            }
        }

        FilteredJokes { items, matches }
    }

    pub fn is_favorite(&self, id: &JokeId) -> bool {
        self.favorites.iter().any(|f| &f.id == id)
    }

    /// Look up a joke in the seen list, then in favorites
    ///
    /// Ids parsed from text may land in a different variant than the stored
    /// one (`"42"` parses as a number), so fall back to comparing the
    /// rendered forms.
    pub fn get(&self, id: &JokeId) -> Option<&Joke> {
        let mut all = self.jokes.iter().chain(self.favorites.iter());
        if let Some(joke) = all.clone().find(|j| &j.id == id) {
            return Some(joke);
        }

        let rendered = id.to_string();
        all.find(|j| j.id.to_string() == rendered)
    }

    #[cfg(test)]
    pub fn jokes(&self) -> &[Joke] {
        &self.jokes
    }

    pub fn favorites(&self) -> &[Joke] {
        &self.favorites
    }

    pub fn count(&self) -> usize {
        self.jokes.len()
    }

    pub fn favorites_count(&self) -> usize {
        self.favorites.len()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
