// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use ahash::AHashSet;
use rand::{Rng, seq::index};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A Poker card.
///
/// A card packs its rank and suit in a single byte:
///
/// ```text
///   +--------+
///   |rrrrrrss|
///   +--------+
///   r = rank of card (deuce=2,trey=3,four=4,...,ace=14)
///   s = suit of card (clubs=0,diamonds=1,hearts=2,spades=3)
/// ```
///
/// Two cards are equal when they have the same rank and suit.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card(u8);

/// A Poker card.
impl Card {
    /// Create a card given a suit and rank.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Self(((rank as u8) << 2) | suit as u8)
    }

    /// This card unique id.
    pub fn id(&self) -> u8 {
        self.0
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        match self.suit_bits() {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            3 => Suit::Spades,
            _ => panic!("Invalid suit value 0x{:x}", self.0),
        }
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        match self.rank_bits() {
            2 => Rank::Deuce,
            3 => Rank::Trey,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            14 => Rank::Ace,
            _ => panic!("Invalid rank 0x{:x}", self.0),
        }
    }

    /// Returns the rank bits.
    #[inline]
    pub fn rank_bits(&self) -> u8 {
        self.0 >> 2
    }

    /// Returns the suit bits.
    #[inline]
    pub fn suit_bits(&self) -> u8 {
        self.0 & 0x3
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

/// Parses a card token, the last character is the suit symbol and the
/// preceding characters are the rank label, e.g. `"10♥"` or `"AS"`.
impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let symbol = chars.next_back().ok_or(ParseCardError::Empty)?;
        let rank = Rank::from_label(chars.as_str())?;
        let suit = Suit::from_symbol(symbol)?;
        Ok(Card::new(rank, suit))
    }
}

/// Error returned when a card token cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    /// The token has no characters.
    #[error("Empty card token")]
    Empty,
    /// The rank label is not one of 2..10, J, Q, K, A.
    #[error("Invalid rank label '{0}'")]
    InvalidRank(String),
    /// The suit symbol is not one of ♣ ♦ ♥ ♠.
    #[error("Invalid suit symbol '{0}'")]
    InvalidSuit(char),
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 2,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// The rank ordinal, 2 for a deuce up to 14 for an ace.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Parses a rank label, `T` is accepted as an alias for `10`.
    pub fn from_label(label: &str) -> Result<Rank, ParseCardError> {
        let rank = match label.to_ascii_uppercase().as_str() {
            "2" => Rank::Deuce,
            "3" => Rank::Trey,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(ParseCardError::InvalidRank(label.to_string())),
        };

        Ok(rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => "2",
            Rank::Trey => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Diamonds suit.
    Diamonds = 1,
    /// Hearts suit.
    Hearts = 2,
    /// Spades suit.
    Spades = 3,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        };

        write!(f, "{suit}")
    }
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }

    /// Parses a suit symbol, the letters C, D, H, S are accepted too.
    pub fn from_symbol(symbol: char) -> Result<Suit, ParseCardError> {
        match symbol.to_ascii_uppercase() {
            '♣' | 'C' => Ok(Suit::Clubs),
            '♦' | 'D' => Ok(Suit::Diamonds),
            '♥' | 'H' => Ok(Suit::Hearts),
            '♠' | 'S' => Ok(Suit::Spades),
            _ => Err(ParseCardError::InvalidSuit(symbol)),
        }
    }
}

/// Error returned when the deck cannot satisfy a deal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    /// More cards were requested than are left in the deck.
    #[error("Insufficient cards: requested {requested} with {remaining} left in the deck")]
    InsufficientCards {
        /// Number of cards requested.
        requested: usize,
        /// Number of undealt cards.
        remaining: usize,
    },
}

/// A cards Deck.
///
/// The deck always holds the same 52 cards, dealing marks cards as dealt so
/// that they are never dealt again until the deck is reset.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    dealt: AHashSet<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Deals `n` cards chosen uniformly at random from the undealt cards.
    ///
    /// Returns an error and leaves the deck untouched if there are fewer than
    /// `n` undealt cards.
    pub fn deal_random<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        n: usize,
    ) -> Result<Vec<Card>, DeckError> {
        let available = self.undealt();
        if n > available.len() {
            return Err(DeckError::InsufficientCards {
                requested: n,
                remaining: available.len(),
            });
        }

        let cards = index::sample(rng, available.len(), n)
            .into_iter()
            .map(|idx| available[idx])
            .collect::<Vec<_>>();
        self.dealt.extend(cards.iter().copied());

        Ok(cards)
    }

    /// Deals a single random card.
    pub fn deal_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Card, DeckError> {
        let mut cards = self.deal_random(rng, 1)?;
        cards.pop().ok_or(DeckError::InsufficientCards {
            requested: 1,
            remaining: 0,
        })
    }

    /// Deals a specific card, returns false if the card was already dealt.
    pub fn take(&mut self, card: Card) -> bool {
        self.dealt.insert(card)
    }

    /// Makes all cards available again.
    pub fn reset(&mut self) {
        self.dealt.clear();
    }

    /// Checks if all cards have been dealt.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Number of undealt cards.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.dealt.len()
    }

    /// Checks if a card has been dealt.
    pub fn is_dealt(&self, card: Card) -> bool {
        self.dealt.contains(&card)
    }

    /// Returns the undealt cards in deck order.
    pub fn undealt(&self) -> Vec<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|c| !self.dealt.contains(c))
            .collect()
    }

    /// Calls the `f` closure for each k-cards hand of the undealt cards.
    ///
    /// Panics if k is not 2 <= k <= 5.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((2..=5).contains(&k), "2 <= k <= 5");

        let cards = self.undealt();
        let n = cards.len();
        if k > n {
            return;
        }

        let mut idx = (0..k).collect::<Vec<_>>();
        let mut hand = Vec::with_capacity(k);

        loop {
            hand.clear();
            hand.extend(idx.iter().map(|&i| cards[i]));
            f(&hand);

            // Move to the next combination in lexicographic order.
            let Some(pos) = (0..k).rev().find(|&i| idx[i] != i + n - k) else {
                return;
            };

            idx[pos] += 1;
            for i in (pos + 1)..k {
                idx[i] = idx[i - 1] + 1;
            }
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self {
            cards,
            dealt: AHashSet::with_capacity(Self::SIZE),
        }
    }
}
