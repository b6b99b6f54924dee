//! Database layer (Firestore, with an in-memory stand-in).

pub mod firestore;
pub mod memory;

pub use firestore::{FirestoreDb, SaveOutcome};
pub use memory::MemoryStore;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Subcollection under `users/{uid}`, keyed by set name
    pub const FLASHCARD_SETS: &str = "flashcardSets";
}
