//! The playable Schnapsen match: board plus action history.
//!
//! [`Schnapsen`] is what a host drives. It owns a [`Board`], records every
//! applied action, and implements [`Game`] so agents and MCTS can run it.
//! Hidden information is handled by [`Schnapsen::view_for`], which hands a
//! player a world where everything they cannot see has been resampled.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::action::{Action, ActionRecord};
use crate::board::Board;
use crate::config::MatchConfig;
use crate::core::PlayerId;
use crate::error::{ConfigError, RuleError};
use crate::game::{Game, GameResult};

/// A running Schnapsen match.
///
/// ## Example
///
/// ```
/// use schnapsen::game::Game;
/// use schnapsen::schnapsen::Schnapsen;
///
/// let mut game = Schnapsen::from_seed(42);
/// while !game.is_over() {
///     let action = game.fallback_action().unwrap();
///     game.apply(action).unwrap();
/// }
/// assert!(game.result().is_some());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Schnapsen {
    board: Board,
    history: Vector<ActionRecord>,
}

impl Schnapsen {
    /// Start a match from a configuration. Draws a process-random seed
    /// when the configuration leaves it unset.
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        Self::from_board(Board::new(config.resolve_seed(), config.bummerl_target))
    }

    /// Start a match from a seed with the default single-bummerl target.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(&MatchConfig::default().with_seed(seed))
    }

    /// Wrap an existing board, e.g. one built from an explicit deal.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            history: Vector::new(),
        }
    }

    /// The underlying board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Every action applied so far, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// A copy of the match as `viewer` knows it: their own hand, the
    /// public state, and all revealed cards are kept; the opponent's
    /// concealed cards and the facedown talon are resampled. The copy is
    /// a complete, playable world, so search can roll it forward.
    #[must_use]
    pub fn view_for(&mut self, viewer: PlayerId) -> Self {
        let mut view = self.fork();
        view.determinize(viewer);
        view
    }

    /// Serialize the full match state, history and RNG position included.
    pub fn snapshot(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Restore a match from [`Schnapsen::snapshot`] bytes.
    pub fn restore(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

impl Game for Schnapsen {
    type Action = Action;

    fn current_player(&self) -> PlayerId {
        self.board.turn()
    }

    fn possible_actions(&self) -> Vec<Action> {
        self.board.possible_actions()
    }

    fn apply(&mut self, action: Action) -> Result<(), RuleError> {
        let player = self.board.turn();
        // a round-ending move deals the next round, so record first
        let round = self.board.round();

        match action {
            Action::Play(card) => self.board.play_card(player, card)?,
            Action::Marriage(suit) => self.board.declare_marriage(player, suit)?,
            Action::ExchangeTrump => self.board.exchange_trump(player)?,
            Action::CloseTalon => self.board.close_talon(player)?,
        }

        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(player, action, round, sequence));
        Ok(())
    }

    fn result(&self) -> Option<GameResult> {
        self.board
            .match_loser()
            .map(|loser| GameResult::Winner(loser.opponent()))
    }

    fn utility(&self, player: PlayerId) -> f64 {
        self.board.utility(player)
    }

    fn fork(&mut self) -> Self {
        Self {
            board: self.board.fork(),
            history: self.history.clone(),
        }
    }

    fn determinize(&mut self, viewer: PlayerId) {
        self.board.determinize(viewer);
    }
}

impl FromStr for Schnapsen {
    type Err = ConfigError;

    /// Parse an initialization string (`""`, `"<target>"`, or
    /// `"<target>;<seed>"`) and start the match it describes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(&s.parse::<MatchConfig>()?))
    }
}

impl std::fmt::Display for Schnapsen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.board.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    /// Opener holds the trump marriage plus high trumps; the response
    /// hand is weak. Trump is diamonds (upcard JD at talon bottom).
    fn rigged() -> Schnapsen {
        Schnapsen::from_board(Board::from_deal(
            9,
            1,
            PlayerId::new(0),
            &[
                card(Suit::Diamonds, Rank::Queen),
                card(Suit::Diamonds, Rank::King),
                card(Suit::Diamonds, Rank::Ace),
                card(Suit::Diamonds, Rank::Ten),
                card(Suit::Spades, Rank::Ace),
            ],
            &[
                card(Suit::Hearts, Rank::Jack),
                card(Suit::Hearts, Rank::Queen),
                card(Suit::Clubs, Rank::Jack),
                card(Suit::Clubs, Rank::Queen),
                card(Suit::Spades, Rank::Jack),
            ],
            vec![
                card(Suit::Diamonds, Rank::Jack),
                card(Suit::Hearts, Rank::King),
                card(Suit::Hearts, Rank::Ten),
                card(Suit::Hearts, Rank::Ace),
                card(Suit::Clubs, Rank::King),
                card(Suit::Clubs, Rank::Ten),
                card(Suit::Clubs, Rank::Ace),
                card(Suit::Spades, Rank::Queen),
                card(Suit::Spades, Rank::King),
                card(Suit::Spades, Rank::Ten),
            ],
        ))
    }

    #[test]
    fn test_new_deals_first_round() {
        let game = Schnapsen::from_seed(42);

        assert_eq!(game.board().hand(PlayerId::new(0)).len(), 5);
        assert_eq!(game.board().hand(PlayerId::new(1)).len(), 5);
        assert_eq!(game.board().talon_len(), 10);
        assert!(!game.is_over());
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = Schnapsen::from_seed(7);
        let b = Schnapsen::from_seed(7);

        assert_eq!(a.board().hand(PlayerId::new(0)), b.board().hand(PlayerId::new(0)));
        assert_eq!(a.board().hand(PlayerId::new(1)), b.board().hand(PlayerId::new(1)));
        assert_eq!(a.board().trump(), b.board().trump());
    }

    #[test]
    fn test_from_init_string() {
        let game: Schnapsen = "3;99".parse().unwrap();
        assert_eq!(game.board().bummerl_target(), 3);

        let other: Schnapsen = "3;99".parse().unwrap();
        assert_eq!(
            game.board().hand(PlayerId::new(0)),
            other.board().hand(PlayerId::new(0))
        );
    }

    #[test]
    fn test_from_init_string_rejects_garbage() {
        assert!("0".parse::<Schnapsen>().is_err());
        assert!("1;x".parse::<Schnapsen>().is_err());
        assert!("1;2;3".parse::<Schnapsen>().is_err());
    }

    #[test]
    fn test_apply_records_history() {
        let mut game = rigged();
        let p0 = PlayerId::new(0);

        game.apply(Action::Marriage(Suit::Diamonds)).unwrap();
        game.apply(Action::Play(card(Suit::Diamonds, Rank::Queen)))
            .unwrap();

        let records: Vec<_> = game.history().iter().copied().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].player, p0);
        assert_eq!(records[0].action, Action::Marriage(Suit::Diamonds));
        assert_eq!(records[0].round, 0);
        assert_eq!(records[0].sequence, 0);
        assert_eq!(records[1].action, Action::Play(card(Suit::Diamonds, Rank::Queen)));
        assert_eq!(records[1].sequence, 1);
    }

    #[test]
    fn test_apply_rejects_illegal_and_records_nothing() {
        let mut game = rigged();

        let err = game
            .apply(Action::Play(card(Suit::Hearts, Rank::Jack)))
            .unwrap_err();
        assert!(matches!(err, RuleError::CardNotHeld { .. }));
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_tail_of_enumerated_actions_applies() {
        let mut game = Schnapsen::from_seed(3);

        for _ in 0..40 {
            if game.is_over() {
                break;
            }
            let actions = game.possible_actions();
            assert!(!actions.is_empty());
            let action = actions[actions.len() - 1];
            game.apply(action).unwrap();
        }
    }

    #[test]
    fn test_fallback_plays_to_completion() {
        let mut game = Schnapsen::from_seed(42);

        let mut steps = 0;
        while let Some(action) = game.fallback_action() {
            game.apply(action).unwrap();
            steps += 1;
            assert!(steps < 10_000, "match should terminate");
        }

        assert!(game.is_over());
        let result = game.result().unwrap();
        let loser = game.board().match_loser().unwrap();
        assert!(result.is_winner(loser.opponent()));
        assert!(!result.is_winner(loser));
        assert!(game.possible_actions().is_empty());
    }

    #[test]
    fn test_result_none_while_running() {
        let game = Schnapsen::from_seed(1);
        assert_eq!(game.result(), None);
        assert!(!game.is_over());
    }

    #[test]
    fn test_view_preserves_viewer_hand_and_public_state() {
        let mut game = Schnapsen::from_seed(11);
        let p0 = PlayerId::new(0);

        let view = game.view_for(p0);

        assert_eq!(view.board().hand(p0), game.board().hand(p0));
        assert_eq!(view.board().trump(), game.board().trump());
        assert_eq!(view.board().trump_upcard(), game.board().trump_upcard());
        assert_eq!(view.board().talon_len(), game.board().talon_len());
        assert_eq!(view.board().turn(), game.board().turn());
        assert_eq!(view.history().len(), game.history().len());
    }

    #[test]
    fn test_view_is_playable() {
        let mut game = Schnapsen::from_seed(13);
        let mut view = game.view_for(game.current_player());

        while let Some(action) = view.fallback_action() {
            view.apply(action).unwrap();
        }
        assert!(view.is_over());
    }

    #[test]
    fn test_fork_then_same_actions_diverge_only_by_rng() {
        let mut game = Schnapsen::from_seed(5);
        let mut forked = game.fork();

        // identical present: same hands, same legal actions
        assert_eq!(game.possible_actions(), forked.possible_actions());

        let action = game.fallback_action().unwrap();
        game.apply(action).unwrap();
        forked.apply(action).unwrap();

        assert_eq!(
            game.board().hand(PlayerId::new(0)),
            forked.board().hand(PlayerId::new(0))
        );
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut game = Schnapsen::from_seed(21);
        for _ in 0..7 {
            let action = game.fallback_action().unwrap();
            game.apply(action).unwrap();
        }

        let bytes = game.snapshot().unwrap();
        let mut restored = Schnapsen::restore(&bytes).unwrap();

        assert_eq!(restored.history().len(), game.history().len());
        assert_eq!(restored.current_player(), game.current_player());
        assert_eq!(
            restored.board().hand(PlayerId::new(0)),
            game.board().hand(PlayerId::new(0))
        );

        // identical futures: the RNG position came along
        while !game.is_over() {
            let a = game.fallback_action().unwrap();
            let b = restored.fallback_action().unwrap();
            assert_eq!(a, b);
            game.apply(a).unwrap();
            restored.apply(b).unwrap();
        }
        assert_eq!(game.result(), restored.result());
    }

    #[test]
    fn test_serde_json_round_trip() {
        let game = Schnapsen::from_seed(33);
        let json = serde_json::to_string(&game).unwrap();
        let restored: Schnapsen = serde_json::from_str(&json).unwrap();

        assert_eq!(
            restored.board().hand(PlayerId::new(1)),
            game.board().hand(PlayerId::new(1))
        );
        assert_eq!(restored.board().trump(), game.board().trump());
    }

    #[test]
    fn test_display_renders_board() {
        let game = rigged();
        let text = game.to_string();
        assert!(text.contains("Player 0"));
        assert!(text.contains("upcard JD"));
    }
}
