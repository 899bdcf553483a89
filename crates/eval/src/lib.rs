// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker hand evaluator.
//!
//! Classifies five cards hands into one of ten categories, from high card up
//! to royal flush, each category carrying the ranks used to break ties with
//! another hand of the same category.
//!
//! To use the evaluator create a [Hand] and compare it with other hands, or
//! use [HandValue] to evaluate five cards directly:
//!
//! ```
//! # use showdown_eval::*;
//! let cards = |tokens: [&str; 5]| tokens.map(|t| t.parse::<Card>().unwrap());
//!
//! let royal = Hand::new(cards(["A♠", "K♠", "Q♠", "J♠", "10♠"]).to_vec()).unwrap();
//! let quads = Hand::new(cards(["A♠", "A♥", "A♦", "A♣", "K♠"]).to_vec()).unwrap();
//! assert_eq!(royal.rank(), HandRank::RoyalFlush);
//! assert!(royal > quads);
//!
//! let v = HandValue::eval(&cards(["9♥", "8♥", "7♥", "6♥", "5♥"]));
//! assert_eq!(v, HandValue::StraightFlush { high: Rank::Nine });
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod hand;
pub use hand::{Hand, HandError};

pub mod value;
pub use value::{HandRank, HandValue};

// Reexport cards types.
pub use showdown_cards::{Card, Deck, DeckError, ParseCardError, Rank, Suit};
