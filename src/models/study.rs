// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Card-by-card study state.

use crate::models::Flashcard;
use serde::Deserialize;

/// Navigation requested by the study view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyAction {
    #[default]
    Current,
    Next,
    Prev,
    Flip,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StudyError {
    #[error("Flashcard set is empty.")]
    Empty,

    #[error("Card index {index} is out of range for a set of {total} cards")]
    OutOfRange { index: usize, total: usize },
}

/// Position within a non-empty set of cards.
///
/// Invariant: `index < cards.len()`. Navigation wraps in both directions and
/// always turns the card back to its front.
#[derive(Debug, Clone)]
pub struct StudySession {
    cards: Vec<Flashcard>,
    index: usize,
    show_answer: bool,
}

impl StudySession {
    pub fn new(cards: Vec<Flashcard>) -> Result<Self, StudyError> {
        Self::resume(cards, 0, false)
    }

    /// Rebuild a session at a position previously handed to the client.
    pub fn resume(
        cards: Vec<Flashcard>,
        index: usize,
        show_answer: bool,
    ) -> Result<Self, StudyError> {
        if cards.is_empty() {
            return Err(StudyError::Empty);
        }
        if index >= cards.len() {
            return Err(StudyError::OutOfRange {
                index,
                total: cards.len(),
            });
        }
        Ok(Self {
            cards,
            index,
            show_answer,
        })
    }

    pub fn apply(&mut self, action: StudyAction) {
        match action {
            StudyAction::Current => {}
            StudyAction::Next => self.next(),
            StudyAction::Prev => self.prev(),
            StudyAction::Flip => self.flip(),
        }
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.cards.len();
        self.show_answer = false;
    }

    pub fn prev(&mut self) {
        let total = self.cards.len();
        self.index = (self.index + total - 1) % total;
        self.show_answer = false;
    }

    pub fn flip(&mut self) {
        self.show_answer = !self.show_answer;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.cards.len()
    }

    pub fn show_answer(&self) -> bool {
        self.show_answer
    }

    pub fn current(&self) -> &Flashcard {
        &self.cards[self.index]
    }

    /// The side of the current card that is facing up.
    pub fn visible_text(&self) -> &str {
        let card = self.current();
        if self.show_answer {
            &card.back
        } else {
            &card.front
        }
    }

    pub fn progress_label(&self) -> String {
        format!("Card {} of {}", self.index + 1, self.cards.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(n: usize) -> Vec<Flashcard> {
        (0..n)
            .map(|i| Flashcard {
                front: format!("Q{}", i),
                back: format!("A{}", i),
            })
            .collect()
    }

    #[test]
    fn test_next_wraps_to_first_card() {
        let mut session = StudySession::new(cards(3)).unwrap();
        let seen: Vec<usize> = (0..4)
            .map(|_| {
                session.next();
                session.index()
            })
            .collect();
        assert_eq!(seen, vec![1, 2, 0, 1]);
    }

    #[test]
    fn test_prev_wraps_to_last_card() {
        let mut session = StudySession::new(cards(3)).unwrap();
        session.prev();
        assert_eq!(session.index(), 2);
        assert_eq!(session.visible_text(), "Q2");
        session.prev();
        session.prev();
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_single_card_wraps_onto_itself() {
        let mut session = StudySession::new(cards(1)).unwrap();
        session.next();
        assert_eq!(session.index(), 0);
        session.prev();
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_flip_shows_back_and_navigation_resets_it() {
        let mut session = StudySession::new(cards(2)).unwrap();
        session.flip();
        assert!(session.show_answer());
        assert_eq!(session.visible_text(), "A0");

        session.next();
        assert!(!session.show_answer());
        assert_eq!(session.visible_text(), "Q1");

        session.flip();
        session.prev();
        assert!(!session.show_answer());
    }

    #[test]
    fn test_progress_label_is_one_based() {
        let mut session = StudySession::new(cards(5)).unwrap();
        assert_eq!(session.progress_label(), "Card 1 of 5");
        session.prev();
        assert_eq!(session.progress_label(), "Card 5 of 5");
    }

    #[test]
    fn test_empty_set_rejected() {
        assert_eq!(StudySession::new(vec![]).unwrap_err(), StudyError::Empty);
    }

    #[test]
    fn test_resume_rejects_out_of_range_index() {
        let err = StudySession::resume(cards(2), 2, false).unwrap_err();
        assert_eq!(err, StudyError::OutOfRange { index: 2, total: 2 });
    }
}
