// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker cards types.
//!
//! This crate defines types to create cards:
//!
//! ```
//! # use showdown_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let td: Card = "10♦".parse().unwrap();
//! assert_eq!(td, Card::new(Rank::Ten, Suit::Diamonds));
//! assert!(ah.rank() > td.rank());
//! ```
//!
//! and a [Deck] type that deals random cards without replacement until it is
//! reset:
//!
//! ```
//! # use showdown_cards::Deck;
//! # use rand::{SeedableRng, rngs::StdRng};
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut deck = Deck::default();
//! let hand = deck.deal_random(&mut rng, 5).unwrap();
//! assert_eq!(hand.len(), 5);
//! assert_eq!(deck.remaining(), Deck::SIZE - 5);
//!
//! deck.reset();
//! assert_eq!(deck.remaining(), Deck::SIZE);
//! ```
//!
//! Use [Deck::for_each] to visit all k-cards hands of the undealt cards:
//!
//! ```no_run
//! # use showdown_cards::Deck;
//! let mut counter = 0;
//! Deck::default().for_each(5, |hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 2_598_960);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, DeckError, ParseCardError, Rank, Suit};
