// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Command and event interface to a game session.
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;

use showdown_eval::{Card, Hand, HandRank};

use crate::{
    config::Config,
    error::GameError,
    session::{GameState, Session, Standing},
};

/// A command from a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Add a player with the given name.
    AddPlayer(String),
    /// Remove a player.
    RemovePlayer(String),
    /// Select a draw game if true or a stud game otherwise.
    SetVariant(bool),
    /// Deal five cards to each player.
    Deal,
    /// Exchange the cards named by the tokens.
    Exchange {
        /// The player name.
        player: String,
        /// The cards to give back.
        tokens: Vec<String>,
    },
    /// Show the hands and declare the winners.
    RevealWinners,
    /// Start a new game with the same players.
    Restart,
}

/// An event for a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A player has joined.
    PlayerAdded(String),
    /// A player has left.
    PlayerRemoved(String),
    /// The game variant has changed.
    VariantChanged {
        /// True for a draw game.
        draw: bool,
    },
    /// The session entered a new state.
    StateChanged(GameState),
    /// A player hand after the deal.
    HandRevealed {
        /// The player name.
        player: String,
        /// The hand category.
        rank: HandRank,
        /// The hand cards sorted for display.
        cards: Vec<Card>,
    },
    /// A player has exchanged cards.
    CardsExchanged {
        /// The player name.
        player: String,
        /// The hand category after the exchange.
        rank: HandRank,
        /// The hand cards sorted for display.
        cards: Vec<Card>,
        /// Tokens that were skipped.
        skipped: Vec<String>,
    },
    /// The game winners, more than one if they tie.
    WinnersDeclared {
        /// The players with the best hand.
        winners: Vec<Standing>,
        /// The other players from the best to the worst hand.
        losers: Vec<Standing>,
    },
    /// A command failed.
    Error(String),
}

/// A game session that runs commands and sends events.
#[derive(Debug)]
pub struct Table {
    session: Session,
    events_tx: Sender<Event>,
}

impl Table {
    /// Creates a new table that sends events to `events_tx`.
    pub fn new(config: Config, events_tx: Sender<Event>) -> Self {
        Self {
            session: Session::new(config),
            events_tx,
        }
    }

    /// The table session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs a command and sends its events followed by the state changes.
    ///
    /// A failed command sends a single [Event::Error].
    pub fn handle(&mut self, cmd: Command) {
        match self.execute(cmd) {
            Ok(events) => {
                for event in events {
                    self.send(event);
                }

                for state in self.session.take_transitions() {
                    self.send(Event::StateChanged(state));
                }
            }
            Err(e) => {
                // Failed commands don't change state.
                self.session.take_transitions();
                self.send(Event::Error(e.to_string()));
            }
        }
    }

    fn execute(&mut self, cmd: Command) -> Result<Vec<Event>, GameError> {
        let events = match cmd {
            Command::AddPlayer(name) => {
                let name = self.session.add_player(&name)?;
                vec![Event::PlayerAdded(name)]
            }
            Command::RemovePlayer(name) => {
                let name = self.session.remove_player(&name)?;
                vec![Event::PlayerRemoved(name)]
            }
            Command::SetVariant(draw) => {
                self.session.set_variant(draw);
                vec![Event::VariantChanged { draw }]
            }
            Command::Deal => {
                self.session.deal_cards(Hand::SIZE)?;
                self.session
                    .hands()
                    .map(|(name, hand)| Event::HandRevealed {
                        player: name.to_string(),
                        rank: hand.rank(),
                        cards: hand.sorted_cards(),
                    })
                    .collect()
            }
            Command::Exchange { player, tokens } => {
                let outcome = self.session.exchange_cards(&player, tokens.as_slice())?;
                vec![Event::CardsExchanged {
                    player,
                    rank: outcome.value.rank(),
                    cards: outcome.cards,
                    skipped: outcome.skipped,
                }]
            }
            Command::RevealWinners => {
                let showdown = self.session.reveal_winners()?;
                vec![Event::WinnersDeclared {
                    winners: showdown.winners,
                    losers: showdown.losers,
                }]
            }
            Command::Restart => {
                self.session.restart();
                vec![Event::VariantChanged { draw: false }]
            }
        };

        Ok(events)
    }

    fn send(&self, event: Event) {
        // The receiver may have gone away.
        let _ = self.events_tx.send(event);
    }
}
