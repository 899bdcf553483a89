// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Session player types.
use showdown_eval::Hand;

/// A session player state.
#[derive(Debug)]
pub struct Player {
    /// This player name, unique within a session.
    pub name: String,
    /// This player hand, `None` until cards are dealt.
    pub hand: Option<Hand>,
    /// The player has exchanged cards in this hand.
    pub has_exchanged: bool,
}

impl Player {
    /// Creates a new player.
    pub fn new(name: String) -> Self {
        Self {
            name,
            hand: None,
            has_exchanged: false,
        }
    }

    /// Reset state for a new hand.
    fn clear_hand(&mut self) {
        self.hand = None;
        self.has_exchanged = false;
    }
}

/// The session players in the order they joined, keyed by name.
#[derive(Debug, Default)]
pub struct PlayersState {
    players: Vec<Player>,
}

impl PlayersState {
    /// Adds a player.
    pub fn join(&mut self, player: Player) {
        self.players.push(player);
    }

    /// Removes a player.
    pub fn leave(&mut self, name: &str) -> Option<Player> {
        self.players
            .iter()
            .position(|p| p.name == name)
            .map(|pos| self.players.remove(pos))
    }

    /// Checks if a player has joined.
    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    /// Returns a player.
    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Returns a mutable player.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    /// Returns total number of players.
    pub fn count(&self) -> usize {
        self.players.len()
    }

    /// Checks if every player holding a hand has exchanged cards.
    pub fn all_exchanged(&self) -> bool {
        self.players
            .iter()
            .filter(|p| p.hand.is_some())
            .all(|p| p.has_exchanged)
    }

    /// Returns an iterator to all players.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Returns a mutable iterator to all players.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// Clears all players hands.
    pub fn clear_hands(&mut self) {
        self.players.iter_mut().for_each(Player::clear_hand);
    }
}
