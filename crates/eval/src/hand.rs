// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A five cards poker hand.
use std::{cmp::Ordering, fmt};
use thiserror::Error;

use showdown_cards::{Card, Rank, Suit};

use crate::{HandRank, HandValue};

/// Error returned for hands that don't have exactly five cards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandError {
    /// The hand has the wrong number of cards.
    #[error("Invalid hand size {0}, a hand must have {size} cards", size = Hand::SIZE)]
    InvalidHandSize(usize),
}

/// A poker hand with its cached value.
///
/// Hands are ordered and compared by their [HandValue] only, two hands with
/// different cards are equal if they tie.
#[derive(Debug, Clone)]
pub struct Hand {
    cards: Vec<Card>,
    value: HandValue,
}

impl Hand {
    /// The number of cards in a hand.
    pub const SIZE: usize = 5;

    /// Creates a hand and evaluates it.
    pub fn new(cards: Vec<Card>) -> Result<Self, HandError> {
        let value = eval(&cards)?;
        Ok(Self { cards, value })
    }

    /// The hand cards in the order they were added.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Checks if the hand holds a card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// The hand value as of the last evaluation.
    pub fn value(&self) -> HandValue {
        self.value
    }

    /// The hand category as of the last evaluation.
    pub fn rank(&self) -> HandRank {
        self.value.rank()
    }

    /// Adds a card, call [Hand::refresh] before reading the hand value.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes the first card with the given rank and suit, returns false if
    /// there is no such card. Call [Hand::refresh] before reading the hand value.
    pub fn remove_card(&mut self, rank: Rank, suit: Suit) -> bool {
        let card = Card::new(rank, suit);
        if let Some(pos) = self.cards.iter().position(|c| c == &card) {
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    /// Evaluates the hand after cards have been added or removed.
    ///
    /// Returns an error and keeps the previous value if the hand doesn't
    /// have five cards.
    pub fn refresh(&mut self) -> Result<(), HandError> {
        self.value = eval(&self.cards)?;
        Ok(())
    }

    /// Returns the cards arranged for showing the hand.
    ///
    /// Straights are shown from the lowest card up, other hands show the
    /// biggest group of cards first and higher ranks before lower ranks.
    pub fn sorted_cards(&self) -> Vec<Card> {
        let mut cards = self.cards.clone();

        match self.value.rank() {
            HandRank::RoyalFlush | HandRank::StraightFlush | HandRank::Straight => {
                cards.sort_by_key(|c| c.rank());
            }
            _ => {
                let count = |rank: Rank| self.cards.iter().filter(|c| c.rank() == rank).count();
                cards.sort_by(|a, b| {
                    count(b.rank())
                        .cmp(&count(a.rank()))
                        .then_with(|| b.rank().cmp(&a.rank()))
                });
            }
        }

        cards
    }
}

fn eval(cards: &[Card]) -> Result<HandValue, HandError> {
    let cards: &[Card; Hand::SIZE] = cards
        .try_into()
        .map_err(|_| HandError::InvalidHandSize(cards.len()))?;
    Ok(HandValue::eval(cards))
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Hand {}

impl Ord for Hand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Hand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.rank())?;
        for card in self.sorted_cards() {
            write!(f, " {card}")?;
        }

        Ok(())
    }
}
