// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Session configuration.
use showdown_eval::Hand;

/// How an exchange handles card tokens that are malformed or name a card the
/// player doesn't hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExchangePolicy {
    /// Skip bad tokens and exchange the others.
    #[default]
    SkipUnmatched,
    /// Reject the whole exchange if any token is bad.
    Strict,
}

/// Session config.
#[derive(Debug, Clone)]
pub struct Config {
    /// Handling of bad exchange tokens.
    pub exchange_policy: ExchangePolicy,
    /// The maximum number of cards a player can exchange.
    pub max_exchange: usize,
    /// Seed for dealing cards, if `None` the seed comes from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exchange_policy: ExchangePolicy::default(),
            max_exchange: Hand::SIZE,
            seed: None,
        }
    }
}
