// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod flashcard;
pub mod plan;
pub mod study;

pub use flashcard::{Flashcard, FlashcardSet, FlashcardSetEntry, UserDoc};
pub use plan::Plan;
pub use study::{StudyAction, StudySession};
