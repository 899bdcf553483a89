// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker game session.
//!
//! A [Session] registers players, deals five cards hands, runs the draw
//! exchange, and finds the winners. A [Table] wraps a session behind a
//! command and event interface for a presentation layer:
//!
//! ```
//! # use showdown_core::*;
//! # use std::sync::mpsc;
//! let (tx, rx) = mpsc::channel();
//! let mut table = Table::new(Config::default(), tx);
//!
//! table.handle(Command::AddPlayer("alice".into()));
//! table.handle(Command::AddPlayer("bob".into()));
//! table.handle(Command::Deal);
//! table.handle(Command::RevealWinners);
//!
//! let declared = rx
//!     .try_iter()
//!     .any(|e| matches!(e, Event::WinnersDeclared { .. }));
//! assert!(declared);
//! assert_eq!(table.session().state(), GameState::Finished);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod config;
pub use config::{Config, ExchangePolicy};

pub mod error;
pub use error::GameError;

pub mod player;

pub mod session;
pub use session::{ExchangeOutcome, GameState, Session, Showdown, Standing};

pub mod table;
pub use table::{Command, Event, Table};

// Reexport evaluator types.
pub use showdown_eval::{Card, Deck, Hand, HandRank, HandValue, Rank, Suit};
