// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game session state.
use ahash::AHashSet;
use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use showdown_eval::{Card, Deck, DeckError, Hand, HandError, HandRank, HandValue};

use crate::{
    config::{Config, ExchangePolicy},
    error::GameError,
    player::{Player, PlayersState},
};

/// The session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Waiting for at least two players.
    Setup,
    /// Enough players joined, cards can be dealt.
    Ready,
    /// Cards have been dealt, draw players can exchange cards.
    Playing,
    /// Stud hands are shown.
    Reveal,
    /// Hands are shown after the draw.
    DrawReveal,
    /// The winners have been declared.
    Finished,
}

impl GameState {
    /// The state label.
    pub fn label(&self) -> &'static str {
        match self {
            GameState::Setup => "setup",
            GameState::Ready => "ready",
            GameState::Playing => "playing",
            GameState::Reveal => "reveal",
            GameState::DrawReveal => "drawreveal",
            GameState::Finished => "finished",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for GameState {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "setup" => Ok(GameState::Setup),
            "ready" => Ok(GameState::Ready),
            "playing" => Ok(GameState::Playing),
            "reveal" => Ok(GameState::Reveal),
            "drawreveal" | "draw-reveal" => Ok(GameState::DrawReveal),
            "finished" => Ok(GameState::Finished),
            _ => Err(GameError::InvalidState(format!("Unknown state '{s}'"))),
        }
    }
}

/// A player hand at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// The player name.
    pub name: String,
    /// The player hand value.
    pub value: HandValue,
    /// The player cards sorted for display.
    pub cards: Vec<Card>,
}

impl Standing {
    fn new(name: &str, hand: &Hand) -> Self {
        Self {
            name: name.to_string(),
            value: hand.value(),
            cards: hand.sorted_cards(),
        }
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.value.rank()
    }
}

/// The showdown result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Showdown {
    /// The players with the best hand, more than one if they tie.
    pub winners: Vec<Standing>,
    /// All other players from the best to the worst hand.
    pub losers: Vec<Standing>,
}

/// The result of a cards exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeOutcome {
    /// The player hand value after the exchange.
    pub value: HandValue,
    /// The player cards after the exchange sorted for display.
    pub cards: Vec<Card>,
    /// The cards the player gave back.
    pub discarded: Vec<Card>,
    /// The cards dealt as replacements.
    pub drawn: Vec<Card>,
    /// Tokens that were skipped.
    pub skipped: Vec<String>,
}

/// A five cards poker session.
///
/// The session owns the deck and the players hands, every operation runs to
/// completion and leaves the session unchanged when it fails.
#[derive(Debug)]
pub struct Session {
    config: Config,
    state: GameState,
    is_draw: bool,
    players: PlayersState,
    deck: Deck,
    rng: StdRng,
    transitions: Vec<GameState>,
}

impl Session {
    /// The minimum number of players to deal cards.
    pub const MIN_PLAYERS: usize = 2;

    /// Creates a new session.
    pub fn new(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self::with_rng(config, rng)
    }

    /// Create a new session with user initialized randomness.
    fn with_rng(config: Config, rng: StdRng) -> Self {
        Self {
            config,
            state: GameState::Setup,
            is_draw: false,
            players: PlayersState::default(),
            deck: Deck::default(),
            rng,
            transitions: Vec::default(),
        }
    }

    /// The session state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Sets the state from a label.
    pub fn set_state_label(&mut self, label: &str) -> Result<(), GameError> {
        let state = label.parse()?;
        self.enter(state);
        Ok(())
    }

    /// Returns and clears the states entered since the last call.
    pub fn take_transitions(&mut self) -> Vec<GameState> {
        std::mem::take(&mut self.transitions)
    }

    /// Checks if this is a draw game.
    pub fn is_draw(&self) -> bool {
        self.is_draw
    }

    /// Selects a draw game if `draw` is true or a stud game otherwise.
    pub fn set_variant(&mut self, draw: bool) {
        self.is_draw = draw;
        info!("Variant set to {}", if draw { "draw" } else { "stud" });
    }

    /// The players names in the order they joined.
    pub fn player_names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    /// The hand of a player, `None` if no cards have been dealt.
    pub fn hand(&self, name: &str) -> Result<Option<&Hand>, GameError> {
        let name = name.trim();
        self.players
            .get(name)
            .map(|p| p.hand.as_ref())
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))
    }

    /// The players that hold a hand.
    pub fn hands(&self) -> impl Iterator<Item = (&str, &Hand)> {
        self.players
            .iter()
            .filter_map(|p| p.hand.as_ref().map(|h| (p.name.as_str(), h)))
    }

    /// Number of cards left in the deck.
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Adds a player and returns the registered name.
    ///
    /// Players can only join before cards are dealt.
    pub fn add_player(&mut self, name: &str) -> Result<String, GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }

        if !matches!(self.state, GameState::Setup | GameState::Ready) {
            return Err(GameError::InvalidState(format!(
                "Players cannot join in state {}",
                self.state
            )));
        }

        if self.players.contains(name) {
            return Err(GameError::DuplicatePlayer(name.to_string()));
        }

        self.players.join(Player::new(name.to_string()));
        info!("Player {name} joined");

        if self.state == GameState::Setup && self.players.count() >= Self::MIN_PLAYERS {
            self.enter(GameState::Ready);
        }

        Ok(name.to_string())
    }

    /// Removes a player.
    ///
    /// If fewer than two players are left the hand is abandoned and the
    /// session goes back to setup. Returns the removed player name.
    pub fn remove_player(&mut self, name: &str) -> Result<String, GameError> {
        let name = name.trim();
        self.players
            .leave(name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))?;
        info!("Player {name} left");

        if self.players.count() < Self::MIN_PLAYERS {
            if self.state != GameState::Setup {
                self.players.clear_hands();
                self.deck.reset();
                self.enter(GameState::Setup);
            }
        } else if self.state == GameState::Playing && self.is_draw && self.players.all_exchanged()
        {
            self.enter(GameState::DrawReveal);
        }

        Ok(name.to_string())
    }

    /// Deals `hand_size` cards to each player from a full deck.
    ///
    /// In a stud game the hands are revealed right away, in a draw game the
    /// session waits for exchanges.
    pub fn deal_cards(&mut self, hand_size: usize) -> Result<(), GameError> {
        if self.state != GameState::Ready {
            return Err(GameError::InvalidState(format!(
                "Cannot deal cards in state {}",
                self.state
            )));
        }

        if self.players.count() < Self::MIN_PLAYERS {
            return Err(GameError::InvalidState(format!(
                "Need at least {} players to deal cards",
                Self::MIN_PLAYERS
            )));
        }

        if hand_size != Hand::SIZE {
            return Err(HandError::InvalidHandSize(hand_size).into());
        }

        let requested = hand_size * self.players.count();
        if requested > Deck::SIZE {
            return Err(DeckError::InsufficientCards {
                requested,
                remaining: Deck::SIZE,
            }
            .into());
        }

        self.deck.reset();

        for player in self.players.iter_mut() {
            let cards = self.deck.deal_random(&mut self.rng, hand_size)?;
            let hand = Hand::new(cards)?;
            debug!("Player {} dealt {hand}", player.name);

            player.hand = Some(hand);
            player.has_exchanged = false;
        }

        info!(
            "Dealt {hand_size} cards to {} players, {} cards left",
            self.players.count(),
            self.deck.remaining()
        );

        self.enter(GameState::Playing);
        if !self.is_draw {
            self.enter(GameState::Reveal);
        }

        Ok(())
    }

    /// Exchanges the cards named by `tokens` with new cards from the deck.
    ///
    /// Each player can exchange once per hand, an exchange with no cards
    /// stands pat. Tokens are checked before any card is moved: with
    /// [ExchangePolicy::SkipUnmatched] bad tokens are skipped and returned
    /// in the outcome, with [ExchangePolicy::Strict] they fail the exchange.
    pub fn exchange_cards<S: AsRef<str>>(
        &mut self,
        name: &str,
        tokens: &[S],
    ) -> Result<ExchangeOutcome, GameError> {
        let name = name.trim();
        if self.state != GameState::Playing || !self.is_draw {
            return Err(GameError::InvalidState(format!(
                "Cannot exchange cards in state {} of a {} game",
                self.state,
                if self.is_draw { "draw" } else { "stud" }
            )));
        }

        let player = self
            .players
            .get(name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))?;

        if player.has_exchanged {
            return Err(GameError::AlreadyExchanged(name.to_string()));
        }

        let hand = player
            .hand
            .as_ref()
            .ok_or_else(|| GameError::InvalidState(format!("Player '{name}' has no cards")))?;

        let strict = self.config.exchange_policy == ExchangePolicy::Strict;
        let mut discarded = Vec::with_capacity(Hand::SIZE);
        let mut skipped = Vec::new();
        let mut seen = AHashSet::with_capacity(Hand::SIZE);

        for token in tokens.iter().map(AsRef::as_ref) {
            let card = match token.parse::<Card>() {
                Ok(card) => card,
                Err(source) if strict => {
                    return Err(GameError::InvalidCard {
                        token: token.to_string(),
                        source,
                    });
                }
                Err(e) => {
                    warn!("Player {name} exchange skips '{token}': {e}");
                    skipped.push(token.to_string());
                    continue;
                }
            };

            // A card can only be given back once.
            if !hand.contains(card) || !seen.insert(card) {
                if strict {
                    return Err(GameError::CardNotInHand {
                        player: name.to_string(),
                        card,
                    });
                }

                warn!("Player {name} exchange skips {card}: card not in hand");
                skipped.push(token.to_string());
                continue;
            }

            discarded.push(card);
        }

        if discarded.len() > self.config.max_exchange {
            return Err(GameError::TooManyCards {
                requested: discarded.len(),
                max: self.config.max_exchange,
            });
        }

        let drawn = self.deck.deal_random(&mut self.rng, discarded.len())?;

        let player = self
            .players
            .get_mut(name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))?;
        let hand = player
            .hand
            .as_mut()
            .ok_or_else(|| GameError::InvalidState(format!("Player '{name}' has no cards")))?;

        for (old, new) in discarded.iter().zip(&drawn) {
            hand.remove_card(old.rank(), old.suit());
            hand.add_card(*new);
            debug!("Player {name} exchanged {old} for {new}");
        }

        hand.refresh()?;
        player.has_exchanged = true;

        info!(
            "Player {name} exchanged {} cards, holds {hand}",
            discarded.len()
        );

        let outcome = ExchangeOutcome {
            value: hand.value(),
            cards: hand.sorted_cards(),
            discarded,
            drawn,
            skipped,
        };

        if self.players.all_exchanged() {
            self.enter(GameState::DrawReveal);
        }

        Ok(outcome)
    }

    /// Finds the players with the best hand, and ranks the others from the
    /// best to the worst hand. Players with equal hands keep the order they
    /// joined. Players without a hand are ignored.
    pub fn winners(&self) -> Showdown {
        let mut hands = self.hands().collect::<Vec<_>>();
        hands.sort_by(|(_, h1), (_, h2)| h2.cmp(h1));

        let Some(&(_, best)) = hands.first() else {
            return Showdown::default();
        };

        let (winners, losers): (Vec<_>, Vec<_>) = hands
            .iter()
            .map(|&(name, hand)| (hand == best, Standing::new(name, hand)))
            .partition(|(is_best, _)| *is_best);

        Showdown {
            winners: winners.into_iter().map(|(_, s)| s).collect(),
            losers: losers.into_iter().map(|(_, s)| s).collect(),
        }
    }

    /// Shows all hands, declares the winners, and ends the game.
    ///
    /// In a draw game players who didn't exchange stand pat.
    pub fn reveal_winners(&mut self) -> Result<Showdown, GameError> {
        match self.state {
            GameState::Reveal | GameState::DrawReveal => {}
            GameState::Playing if self.is_draw => self.enter(GameState::DrawReveal),
            state => {
                return Err(GameError::InvalidState(format!(
                    "Cannot reveal winners in state {state}"
                )));
            }
        }

        let showdown = self.winners();
        for winner in &showdown.winners {
            info!("Player {} wins with {}", winner.name, winner.rank());
        }

        self.enter(GameState::Finished);
        Ok(showdown)
    }

    /// Starts over with a new deck and a stud game keeping the players.
    pub fn restart(&mut self) {
        self.is_draw = false;
        self.deck = Deck::default();
        self.players.clear_hands();

        info!("Game restarted with {} players", self.players.count());

        self.enter(GameState::Setup);
        if self.players.count() >= Self::MIN_PLAYERS {
            self.enter(GameState::Ready);
        }
    }

    fn enter(&mut self, state: GameState) {
        if self.state != state {
            info!("Game state {} -> {}", self.state, state);
            self.state = state;
            self.transitions.push(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showdown_eval::{Rank, Suit};

    fn session(config: Config) -> Session {
        Session::with_rng(config, StdRng::seed_from_u64(101))
    }

    fn with_players(names: &[&str]) -> Session {
        let mut s = session(Config::default());
        for name in names {
            s.add_player(name).unwrap();
        }
        s
    }

    fn cards(tokens: &str) -> Vec<Card> {
        tokens
            .split_whitespace()
            .map(|t| t.parse::<Card>().unwrap())
            .collect()
    }

    /// Replaces all hands with known cards, the deck holds the other cards.
    fn set_hands(s: &mut Session, hands: &[(&str, &str)]) {
        s.deck.reset();
        s.players.clear_hands();
        for (name, tokens) in hands {
            let cards = cards(tokens);
            for card in &cards {
                assert!(s.deck.take(*card), "{card} dealt twice");
            }
            s.players.get_mut(name).unwrap().hand = Some(Hand::new(cards).unwrap());
        }
    }

    fn names(standings: &[Standing]) -> Vec<&str> {
        standings.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn add_and_remove_players() {
        let mut s = session(Config::default());
        assert_eq!(s.state(), GameState::Setup);

        assert_eq!(s.add_player(" alice ").unwrap(), "alice");
        assert_eq!(s.state(), GameState::Setup);

        s.add_player("bob").unwrap();
        assert_eq!(s.state(), GameState::Ready);
        assert_eq!(s.player_names(), ["alice", "bob"]);

        s.add_player("carol").unwrap();
        s.remove_player("alice").unwrap();
        assert_eq!(s.state(), GameState::Ready);

        s.remove_player("bob").unwrap();
        assert_eq!(s.state(), GameState::Setup);
        assert_eq!(s.player_names(), ["carol"]);

        assert_eq!(
            s.remove_player("dave"),
            Err(GameError::UnknownPlayer("dave".to_string()))
        );
        assert_eq!(
            s.take_transitions(),
            [GameState::Ready, GameState::Setup]
        );
        assert!(s.take_transitions().is_empty());
    }

    #[test]
    fn bad_names_leave_players_unchanged() {
        let mut s = with_players(&["alice"]);

        assert_eq!(s.add_player("   "), Err(GameError::EmptyName));
        assert_eq!(
            s.add_player("alice"),
            Err(GameError::DuplicatePlayer("alice".to_string()))
        );
        assert_eq!(s.player_names(), ["alice"]);
        assert_eq!(s.state(), GameState::Setup);
    }

    #[test]
    fn names_are_trimmed() {
        let mut s = with_players(&[" alice ", "bob", "carol"]);
        assert!(s.hand("  alice").unwrap().is_none());

        s.set_variant(true);
        s.deal_cards(Hand::SIZE).unwrap();
        s.exchange_cards::<&str>("alice ", &[]).unwrap();
        assert!(s.players.get("alice").unwrap().has_exchanged);

        assert_eq!(s.remove_player(" alice ").unwrap(), "alice");
        assert_eq!(s.player_names(), ["bob", "carol"]);
    }

    #[test]
    fn deal_stud() {
        let mut s = with_players(&["alice", "bob", "carol"]);
        s.take_transitions();

        s.deal_cards(Hand::SIZE).unwrap();
        assert_eq!(s.state(), GameState::Reveal);
        assert_eq!(s.take_transitions(), [GameState::Playing, GameState::Reveal]);
        assert_eq!(s.deck_remaining(), Deck::SIZE - 15);

        let mut seen = AHashSet::new();
        for (_, hand) in s.hands() {
            assert_eq!(hand.cards().len(), Hand::SIZE);
            assert!(hand.cards().iter().all(|c| seen.insert(*c)));
        }
        assert_eq!(seen.len(), 15);

        // Players cannot join after the deal.
        assert!(matches!(
            s.add_player("dave"),
            Err(GameError::InvalidState(_))
        ));
        assert!(matches!(
            s.deal_cards(Hand::SIZE),
            Err(GameError::InvalidState(_))
        ));
    }

    #[test]
    fn deal_draw() {
        let mut s = with_players(&["alice", "bob"]);
        s.set_variant(true);
        s.deal_cards(Hand::SIZE).unwrap();
        assert_eq!(s.state(), GameState::Playing);
        assert!(s.hand("alice").unwrap().is_some());
    }

    #[test]
    fn deal_checks() {
        let mut s = with_players(&["alice"]);
        assert!(matches!(
            s.deal_cards(Hand::SIZE),
            Err(GameError::InvalidState(_))
        ));

        s.add_player("bob").unwrap();
        assert_eq!(
            s.deal_cards(4),
            Err(GameError::InvalidHandSize(HandError::InvalidHandSize(4)))
        );

        for idx in 0..9 {
            s.add_player(&format!("player{idx}")).unwrap();
        }

        // 11 players need 55 cards.
        assert_eq!(
            s.deal_cards(Hand::SIZE),
            Err(GameError::InsufficientCards(DeckError::InsufficientCards {
                requested: 55,
                remaining: Deck::SIZE
            }))
        );
        assert_eq!(s.state(), GameState::Ready);
        assert!(s.hands().next().is_none());
    }

    #[test]
    fn exchange_cards() {
        let mut s = with_players(&["alice", "bob"]);
        s.set_variant(true);
        s.deal_cards(Hand::SIZE).unwrap();
        set_hands(
            &mut s,
            &[("alice", "A♠ K♠ Q♠ J♠ 10♠"), ("bob", "2♣ 2♦ 7♥ 9♣ J♦")],
        );
        let remaining = s.deck_remaining();

        let outcome = s.exchange_cards("alice", &["A♠"]).unwrap();
        assert_eq!(outcome.discarded, cards("A♠"));
        assert_eq!(outcome.drawn.len(), 1);
        assert!(outcome.skipped.is_empty());
        assert_eq!(s.deck_remaining(), remaining - 1);

        let hand = s.hand("alice").unwrap().unwrap();
        assert_eq!(hand.cards().len(), Hand::SIZE);
        assert!(!hand.contains(cards("A♠")[0]));
        assert!(hand.contains(outcome.drawn[0]));
        assert_eq!(hand.value(), outcome.value);
        assert_ne!(hand.rank(), HandRank::RoyalFlush);
        assert_eq!(s.state(), GameState::Playing);

        assert_eq!(
            s.exchange_cards("alice", &["K♠"]),
            Err(GameError::AlreadyExchanged("alice".to_string()))
        );

        // Standing pat ends the draw.
        let outcome = s.exchange_cards::<&str>("bob", &[]).unwrap();
        assert!(outcome.drawn.is_empty());
        assert_eq!(s.state(), GameState::DrawReveal);
        assert_eq!(
            s.take_transitions().last(),
            Some(&GameState::DrawReveal)
        );
    }

    #[test]
    fn exchange_skips_bad_tokens() {
        let mut s = with_players(&["alice", "bob"]);
        s.set_variant(true);
        s.deal_cards(Hand::SIZE).unwrap();
        set_hands(
            &mut s,
            &[("alice", "A♠ K♠ Q♠ J♠ 10♠"), ("bob", "2♣ 2♦ 7♥ 9♣ J♦")],
        );

        let outcome = s
            .exchange_cards("alice", &["ZZ", "K♠", "2♥", "K♠"])
            .unwrap();
        assert_eq!(outcome.discarded, cards("K♠"));
        assert_eq!(outcome.skipped, ["ZZ", "2♥", "K♠"]);
        assert!(!s.hand("alice").unwrap().unwrap().contains(cards("K♠")[0]));
    }

    #[test]
    fn strict_exchange() {
        let config = Config {
            exchange_policy: ExchangePolicy::Strict,
            max_exchange: 3,
            ..Config::default()
        };

        let mut s = session(config);
        s.add_player("alice").unwrap();
        s.add_player("bob").unwrap();
        s.set_variant(true);
        s.deal_cards(Hand::SIZE).unwrap();
        set_hands(
            &mut s,
            &[("alice", "A♠ K♠ Q♠ J♠ 10♠"), ("bob", "2♣ 2♦ 7♥ 9♣ J♦")],
        );
        let remaining = s.deck_remaining();

        assert!(matches!(
            s.exchange_cards("alice", &["K♠", "ZZ"]),
            Err(GameError::InvalidCard { token, .. }) if token == "ZZ"
        ));
        assert_eq!(
            s.exchange_cards("alice", &["K♠", "2♥"]),
            Err(GameError::CardNotInHand {
                player: "alice".to_string(),
                card: Card::new(Rank::Deuce, Suit::Hearts),
            })
        );
        assert_eq!(
            s.exchange_cards("alice", &["A♠", "K♠", "Q♠", "J♠"]),
            Err(GameError::TooManyCards {
                requested: 4,
                max: 3
            })
        );

        // Failed exchanges leave the session unchanged.
        let hand = s.hand("alice").unwrap().unwrap();
        assert_eq!(hand.rank(), HandRank::RoyalFlush);
        assert_eq!(s.deck_remaining(), remaining);

        assert_eq!(
            s.exchange_cards("carol", &["K♠"]),
            Err(GameError::UnknownPlayer("carol".to_string()))
        );
        s.exchange_cards("alice", &["A♠", "K♠", "Q♠"]).unwrap();
    }

    #[test]
    fn exchange_needs_draw() {
        let mut s = with_players(&["alice", "bob"]);
        assert!(matches!(
            s.exchange_cards("alice", &["A♠"]),
            Err(GameError::InvalidState(_))
        ));

        s.deal_cards(Hand::SIZE).unwrap();
        assert!(matches!(
            s.exchange_cards("alice", &["A♠"]),
            Err(GameError::InvalidState(_))
        ));
    }

    #[test]
    fn exchange_with_empty_deck() {
        let names = (0..10).map(|idx| format!("player{idx}")).collect::<Vec<_>>();
        let mut s = session(Config::default());
        for name in &names {
            s.add_player(name).unwrap();
        }

        s.set_variant(true);
        s.deal_cards(Hand::SIZE).unwrap();
        assert_eq!(s.deck_remaining(), 2);

        let before = s.hand("player0").unwrap().unwrap().cards().to_vec();
        let tokens = before[..3].iter().map(|c| c.to_string()).collect::<Vec<_>>();

        assert_eq!(
            s.exchange_cards("player0", tokens.as_slice()),
            Err(GameError::InsufficientCards(DeckError::InsufficientCards {
                requested: 3,
                remaining: 2
            }))
        );

        // A failed exchange leaves the hand and the deck unchanged.
        assert_eq!(s.hand("player0").unwrap().unwrap().cards(), before);
        assert_eq!(s.deck_remaining(), 2);
        assert!(!s.players.get("player0").unwrap().has_exchanged);
        assert_eq!(s.state(), GameState::Playing);

        let outcome = s.exchange_cards("player0", &tokens[..2]).unwrap();
        assert_eq!(outcome.drawn.len(), 2);
        assert_eq!(s.deck_remaining(), 0);
    }

    #[test]
    fn deal_needs_two_players() {
        let mut s = session(Config::default());
        s.set_state_label("ready").unwrap();
        assert!(matches!(
            s.deal_cards(Hand::SIZE),
            Err(GameError::InvalidState(_))
        ));

        s.add_player("alice").unwrap();
        s.take_transitions();
        assert!(matches!(
            s.deal_cards(Hand::SIZE),
            Err(GameError::InvalidState(_))
        ));

        assert_eq!(s.state(), GameState::Ready);
        assert!(s.take_transitions().is_empty());
        assert!(s.hand("alice").unwrap().is_none());
        assert_eq!(s.deck_remaining(), Deck::SIZE);
    }

    #[test]
    fn winners() {
        let mut s = with_players(&["alice", "bob", "carol"]);
        assert_eq!(s.winners(), Showdown::default());

        s.deal_cards(Hand::SIZE).unwrap();
        set_hands(
            &mut s,
            &[
                ("alice", "K♥ J♥ 8♥ 5♥ 2♥"),
                ("bob", "9♠ 9♥ 9♦ 9♣ 3♠"),
                ("carol", "Q♠ Q♦ Q♣ 4♦ 4♣"),
            ],
        );

        let showdown = s.reveal_winners().unwrap();
        assert_eq!(names(&showdown.winners), ["bob"]);
        assert_eq!(showdown.winners[0].rank(), HandRank::FourOfAKind);
        assert_eq!(names(&showdown.losers), ["carol", "alice"]);
        assert_eq!(showdown.losers[0].rank(), HandRank::FullHouse);
        assert_eq!(showdown.losers[1].rank(), HandRank::Flush);
        assert_eq!(s.state(), GameState::Finished);

        assert!(matches!(
            s.reveal_winners(),
            Err(GameError::InvalidState(_))
        ));

        // The showdown can be queried after the game ends.
        assert_eq!(s.winners(), showdown);
    }

    #[test]
    fn tied_winners() {
        let mut s = with_players(&["alice", "bob", "carol", "dave"]);
        s.deal_cards(Hand::SIZE).unwrap();
        set_hands(
            &mut s,
            &[
                ("alice", "5♠ 5♥ 3♦ 3♣ 2♠"),
                ("bob", "A♠ A♥ K♦ Q♣ J♠"),
                ("carol", "6♠ 6♥ 4♦ 4♣ 2♥"),
                ("dave", "A♦ A♣ K♠ Q♥ J♦"),
            ],
        );

        let showdown = s.winners();
        assert_eq!(names(&showdown.winners), ["bob", "dave"]);
        assert_eq!(names(&showdown.losers), ["carol", "alice"]);
    }

    #[test]
    fn reveal_draw_without_exchanges() {
        let mut s = with_players(&["alice", "bob"]);
        s.set_variant(true);

        assert!(matches!(
            s.reveal_winners(),
            Err(GameError::InvalidState(_))
        ));

        s.deal_cards(Hand::SIZE).unwrap();
        s.take_transitions();

        let showdown = s.reveal_winners().unwrap();
        assert_eq!(showdown.winners.len() + showdown.losers.len(), 2);
        assert_eq!(
            s.take_transitions(),
            [GameState::DrawReveal, GameState::Finished]
        );
    }

    #[test]
    fn leaving_during_game() {
        let mut s = with_players(&["alice", "bob", "carol"]);
        s.set_variant(true);
        s.deal_cards(Hand::SIZE).unwrap();

        s.exchange_cards::<&str>("alice", &[]).unwrap();
        s.exchange_cards::<&str>("bob", &[]).unwrap();
        assert_eq!(s.state(), GameState::Playing);

        // Everyone left has exchanged.
        s.remove_player("carol").unwrap();
        assert_eq!(s.state(), GameState::DrawReveal);

        s.remove_player("bob").unwrap();
        assert_eq!(s.state(), GameState::Setup);
        assert!(s.hand("alice").unwrap().is_none());
        assert_eq!(s.deck_remaining(), Deck::SIZE);
    }

    #[test]
    fn restart() {
        let mut s = with_players(&["alice", "bob"]);
        s.set_variant(true);
        s.deal_cards(Hand::SIZE).unwrap();
        s.reveal_winners().unwrap();
        s.take_transitions();

        s.restart();
        assert_eq!(s.state(), GameState::Ready);
        assert_eq!(s.take_transitions(), [GameState::Setup, GameState::Ready]);
        assert_eq!(s.player_names(), ["alice", "bob"]);
        assert!(!s.is_draw());
        assert!(s.hands().next().is_none());
        assert_eq!(s.deck_remaining(), Deck::SIZE);

        let mut s = with_players(&["alice"]);
        s.restart();
        assert_eq!(s.state(), GameState::Setup);
        assert!(s.take_transitions().is_empty());
    }

    #[test]
    fn state_labels() {
        for state in [
            GameState::Setup,
            GameState::Ready,
            GameState::Playing,
            GameState::Reveal,
            GameState::DrawReveal,
            GameState::Finished,
        ] {
            assert_eq!(state.label().parse::<GameState>().unwrap(), state);
        }

        assert_eq!(
            "draw-reveal".parse::<GameState>().unwrap(),
            GameState::DrawReveal
        );

        let mut s = session(Config::default());
        assert!(matches!(
            s.set_state_label("showdown"),
            Err(GameError::InvalidState(_))
        ));
        assert_eq!(s.state(), GameState::Setup);

        s.set_state_label("finished").unwrap();
        assert_eq!(s.state(), GameState::Finished);
    }

    #[test]
    fn seeded_sessions_repeat() {
        let deal = || {
            let config = Config {
                seed: Some(11),
                ..Config::default()
            };
            let mut s = Session::new(config);
            s.add_player("alice").unwrap();
            s.add_player("bob").unwrap();
            s.deal_cards(Hand::SIZE).unwrap();
            s.hand("alice").unwrap().unwrap().cards().to_vec()
        };

        assert_eq!(deal(), deal());
    }
}
