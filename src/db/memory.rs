// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory document store mirroring the Firestore layout.
//!
//! Used for local development without GCP and as the mocked store in tests.
//! Each user's documents live under one map entry, so holding the entry's
//! write guard makes a multi-document write atomic for that user.

use crate::models::{FlashcardSet, UserDoc};
use dashmap::DashMap;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct UserRecord {
    /// `users/{uid}`; `None` until first written
    doc: Option<UserDoc>,
    /// `users/{uid}/flashcardSets/{name}`
    sets: HashMap<String, FlashcardSet>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<String, UserRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_user_doc(&self, user_id: &str) -> Option<UserDoc> {
        self.users.get(user_id).and_then(|r| r.doc.clone())
    }

    pub fn set_user_doc(&self, user_id: &str, doc: UserDoc) {
        self.users.entry(user_id.to_string()).or_default().doc = Some(doc);
    }

    pub fn get_flashcard_set(&self, user_id: &str, name: &str) -> Option<FlashcardSet> {
        self.users
            .get(user_id)
            .and_then(|r| r.sets.get(name).cloned())
    }

    /// Append the index entry and write the set document together.
    ///
    /// Returns `true` if a new index entry was added.
    pub fn save_flashcard_set(&self, user_id: &str, name: &str, set: FlashcardSet) -> bool {
        let mut record = self.users.entry(user_id.to_string()).or_default();
        let added = record.doc.get_or_insert_with(UserDoc::default).add_set(name);
        record.sets.insert(name.to_string(), set);
        added
    }

    /// Remove the set document and its index entry together.
    ///
    /// Returns `true` if the set was listed in the index.
    pub fn delete_flashcard_set(&self, user_id: &str, name: &str) -> bool {
        let Some(mut record) = self.users.get_mut(user_id) else {
            return false;
        };
        record.sets.remove(name);
        record
            .doc
            .as_mut()
            .map(|doc| doc.remove_set(name))
            .unwrap_or(false)
    }
}
