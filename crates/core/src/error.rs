// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game session errors.
use thiserror::Error;

use showdown_eval::{Card, DeckError, HandError, ParseCardError};

/// An error returned by a session operation.
///
/// An operation that fails leaves the session unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The player name is empty.
    #[error("Player name cannot be empty")]
    EmptyName,
    /// A player with the same name has already joined.
    #[error("Player '{0}' already exists")]
    DuplicatePlayer(String),
    /// There is no player with this name.
    #[error("Player '{0}' doesn't exist")]
    UnknownPlayer(String),
    /// Invalid state label or operation not allowed in the current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// The deck doesn't have enough cards.
    #[error(transparent)]
    InsufficientCards(#[from] DeckError),
    /// A hand doesn't have five cards.
    #[error(transparent)]
    InvalidHandSize(#[from] HandError),
    /// An exchange token is not a card.
    #[error("Invalid card '{token}': {source}")]
    InvalidCard {
        /// The exchange token.
        token: String,
        /// The parse error.
        source: ParseCardError,
    },
    /// An exchange token names a card the player doesn't hold.
    #[error("Player '{player}' doesn't hold {card}")]
    CardNotInHand {
        /// The player name.
        player: String,
        /// The missing card.
        card: Card,
    },
    /// The exchange asks for too many cards.
    #[error("Cannot exchange {requested} cards, the limit is {max}")]
    TooManyCards {
        /// Number of cards to exchange.
        requested: usize,
        /// The exchange limit.
        max: usize,
    },
    /// The player has already exchanged cards in this hand.
    #[error("Player '{0}' has already exchanged cards")]
    AlreadyExchanged(String),
}
