// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Five cards hand classification.
//!
//! [HandValue::eval] assigns a five cards hand to exactly one [HandRank] and
//! keeps the ranks needed to break a tie with a hand of the same category.
//! Hand values are totally ordered: by category first and then by the
//! tie-break ranks in the order they are stored in each variant.
//!
//! The ace is always high, so `A-2-3-4-5` is not a straight.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use showdown_cards::{Card, Rank};

/// A hand category, from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// No other category matches.
    HighCard = 0,
    /// Two cards of the same rank.
    OnePair,
    /// Two different pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five consecutive ranks with mixed suits.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// Five consecutive ranks of the same suit.
    StraightFlush,
    /// Ten to ace of the same suit.
    RoyalFlush,
}

impl HandRank {
    /// Returns all categories from the weakest to the strongest.
    pub fn ranks() -> impl DoubleEndedIterator<Item = HandRank> {
        use HandRank::*;
        [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
            RoyalFlush,
        ]
        .into_iter()
    }

    /// The category label.
    pub fn label(&self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A hand category with its tie-break ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandValue {
    /// All five ranks in descending order.
    HighCard([Rank; 5]),
    /// The pair rank and the three kickers in descending order.
    OnePair {
        /// The pair rank.
        pair: Rank,
        /// The remaining ranks.
        kickers: [Rank; 3],
    },
    /// The higher pair, the lower pair, and the kicker.
    TwoPair {
        /// The higher pair rank.
        high: Rank,
        /// The lower pair rank.
        low: Rank,
        /// The remaining rank.
        kicker: Rank,
    },
    /// The trips rank and the two kickers in descending order.
    ThreeOfAKind {
        /// The trips rank.
        trips: Rank,
        /// The remaining ranks.
        kickers: [Rank; 2],
    },
    /// The highest rank of the straight.
    Straight {
        /// The straight high card.
        high: Rank,
    },
    /// All five ranks in descending order.
    Flush([Rank; 5]),
    /// The trips rank and the pair rank.
    FullHouse {
        /// The trips rank.
        trips: Rank,
        /// The pair rank.
        pair: Rank,
    },
    /// The quads rank.
    FourOfAKind {
        /// The quads rank.
        quads: Rank,
    },
    /// The highest rank of the straight flush.
    StraightFlush {
        /// The straight high card.
        high: Rank,
    },
    /// All royal flushes are equal.
    RoyalFlush,
}

impl HandValue {
    /// Evaluates a five cards hand.
    pub fn eval(cards: &[Card; 5]) -> HandValue {
        let mut ranks = cards.map(|c| c.rank());
        ranks.sort_unstable_by(|a, b| b.cmp(a));

        let suit = cards[0].suit();
        let is_flush = cards.iter().all(|c| c.suit() == suit);
        let is_straight = ranks
            .windows(2)
            .all(|w| w[0].value() == w[1].value() + 1);

        if is_flush && is_straight {
            return if ranks[0] == Rank::Ace {
                HandValue::RoyalFlush
            } else {
                HandValue::StraightFlush { high: ranks[0] }
            };
        }

        match rank_groups(&ranks).as_slice() {
            &[(4, quads), _] => HandValue::FourOfAKind { quads },
            &[(3, trips), (2, pair)] => HandValue::FullHouse { trips, pair },
            _ if is_flush => HandValue::Flush(ranks),
            _ if is_straight => HandValue::Straight { high: ranks[0] },
            &[(3, trips), (1, k1), (1, k2)] => HandValue::ThreeOfAKind {
                trips,
                kickers: [k1, k2],
            },
            &[(2, high), (2, low), (1, kicker)] => HandValue::TwoPair { high, low, kicker },
            &[(2, pair), (1, k1), (1, k2), (1, k3)] => HandValue::OnePair {
                pair,
                kickers: [k1, k2, k3],
            },
            _ => HandValue::HighCard(ranks),
        }
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        match self {
            HandValue::HighCard(_) => HandRank::HighCard,
            HandValue::OnePair { .. } => HandRank::OnePair,
            HandValue::TwoPair { .. } => HandRank::TwoPair,
            HandValue::ThreeOfAKind { .. } => HandRank::ThreeOfAKind,
            HandValue::Straight { .. } => HandRank::Straight,
            HandValue::Flush(_) => HandRank::Flush,
            HandValue::FullHouse { .. } => HandRank::FullHouse,
            HandValue::FourOfAKind { .. } => HandRank::FourOfAKind,
            HandValue::StraightFlush { .. } => HandRank::StraightFlush,
            HandValue::RoyalFlush => HandRank::RoyalFlush,
        }
    }

    /// The tie-break ranks in comparison order.
    pub fn tie_break(&self) -> Vec<Rank> {
        match *self {
            HandValue::HighCard(ranks) | HandValue::Flush(ranks) => ranks.to_vec(),
            HandValue::OnePair { pair, kickers } => {
                let mut ranks = vec![pair];
                ranks.extend(kickers);
                ranks
            }
            HandValue::TwoPair { high, low, kicker } => vec![high, low, kicker],
            HandValue::ThreeOfAKind { trips, kickers } => {
                let mut ranks = vec![trips];
                ranks.extend(kickers);
                ranks
            }
            HandValue::Straight { high } | HandValue::StraightFlush { high } => vec![high],
            HandValue::FullHouse { trips, pair } => vec![trips, pair],
            HandValue::FourOfAKind { quads } => vec![quads],
            HandValue::RoyalFlush => Vec::new(),
        }
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use HandValue::*;

        self.rank().cmp(&other.rank()).then_with(|| match (self, other) {
            (RoyalFlush, RoyalFlush) => Ordering::Equal,
            (StraightFlush { high: h1 }, StraightFlush { high: h2 }) => h1.cmp(h2),
            (FourOfAKind { quads: q1 }, FourOfAKind { quads: q2 }) => q1.cmp(q2),
            (FullHouse { trips: t1, pair: p1 }, FullHouse { trips: t2, pair: p2 }) => {
                (t1, p1).cmp(&(t2, p2))
            }
            (Flush(r1), Flush(r2)) => r1.cmp(r2),
            (Straight { high: h1 }, Straight { high: h2 }) => h1.cmp(h2),
            (
                ThreeOfAKind {
                    trips: t1,
                    kickers: k1,
                },
                ThreeOfAKind {
                    trips: t2,
                    kickers: k2,
                },
            ) => (t1, k1).cmp(&(t2, k2)),
            (
                TwoPair {
                    high: h1,
                    low: l1,
                    kicker: k1,
                },
                TwoPair {
                    high: h2,
                    low: l2,
                    kicker: k2,
                },
            ) => (h1, l1, k1).cmp(&(h2, l2, k2)),
            (
                OnePair {
                    pair: p1,
                    kickers: k1,
                },
                OnePair {
                    pair: p2,
                    kickers: k2,
                },
            ) => (p1, k1).cmp(&(p2, k2)),
            (HighCard(r1), HighCard(r2)) => r1.cmp(r2),
            _ => unreachable!("Hand values {self:?} and {other:?} have the same rank"),
        })
    }
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank())
    }
}

/// Groups ranks sorted in descending order into (count, rank) pairs, sorted
/// by count and then by rank, both descending.
fn rank_groups(ranks: &[Rank; 5]) -> Vec<(u8, Rank)> {
    let mut groups: Vec<(u8, Rank)> = Vec::with_capacity(5);
    for &rank in ranks {
        match groups.last_mut() {
            Some((count, r)) if *r == rank => *count += 1,
            _ => groups.push((1, rank)),
        }
    }

    // Stable sort keeps higher ranks first for groups of the same size.
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
}
