// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flashcard and flashcard set documents.
//!
//! Stored layout:
//! - `users/{uid}` holds a [`UserDoc`] with the set index
//! - `users/{uid}/flashcardSets/{name}` holds a [`FlashcardSet`]

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::ValidationError;

/// Longest accepted set name, in characters.
pub const MAX_SET_NAME_LEN: usize = 100;

/// A single front/back card. Identified only by its position in a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// One element of the `flashcardSets` index array on the user document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardSetEntry {
    pub name: String,
}

/// Root user document (`users/{uid}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    #[serde(default)]
    pub flashcard_sets: Vec<FlashcardSetEntry>,
}

impl UserDoc {
    /// Add a set to the index. Returns `false` if it was already listed.
    pub fn add_set(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.flashcard_sets.push(FlashcardSetEntry {
            name: name.to_string(),
        });
        true
    }

    /// Remove every index entry with this name. Returns `true` if any was removed.
    pub fn remove_set(&mut self, name: &str) -> bool {
        let before = self.flashcard_sets.len();
        self.flashcard_sets.retain(|entry| entry.name != name);
        self.flashcard_sets.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.flashcard_sets.iter().any(|entry| entry.name == name)
    }
}

/// Set document (`users/{uid}/flashcardSets/{name}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardSet {
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

/// Validate a set name for use as a document id.
///
/// Callers trim before validating; the name is stored exactly as validated.
pub fn validate_set_name(name: &str) -> Result<(), ValidationError> {
    let invalid = |code: &'static str, message: &'static str| {
        let mut err = ValidationError::new(code);
        err.message = Some(message.into());
        err
    };

    if name.trim().is_empty() {
        return Err(invalid(
            "blank",
            "Please enter a name for your flashcard set.",
        ));
    }
    if name.chars().count() > MAX_SET_NAME_LEN {
        return Err(invalid(
            "too_long",
            "Set name must be at most 100 characters.",
        ));
    }
    if name.contains('/')
        || name == "."
        || name == ".."
        || (name.len() >= 4 && name.starts_with("__") && name.ends_with("__"))
    {
        return Err(invalid(
            "reserved",
            "Set name cannot contain '/', be '.' or '..', or start and end with '__'.",
        ));
    }
    Ok(())
}
