//! Player actions and the recorded action history.
//!
//! Schnapsen has four action kinds: playing a card, declaring a marriage,
//! exchanging the trump jack for the upcard, and closing the talon. An
//! `Action` names the move only; whose turn it is and whether the move is
//! legal are judged by the board.
//!
//! Actions have no inherent total order because card ordering depends on
//! which suit is trump. [`Action::sort_key`] produces a trump-aware key so
//! action lists can be presented in a stable, readable order.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::cards::{Card, Rank, Suit};
use crate::core::PlayerId;

/// A single move available to the player whose turn it is.
///
/// ## Example
///
/// ```
/// use schnapsen::action::Action;
/// use schnapsen::cards::{Card, Rank, Suit};
///
/// let lead = Action::Play(Card::new(Suit::Hearts, Rank::Ace));
/// assert_eq!(lead.to_string(), "play AH");
///
/// let declare = Action::Marriage(Suit::Spades);
/// assert_eq!(declare.to_string(), "declare QS+KS");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from hand, either leading a trick or answering the lead.
    Play(Card),

    /// Declare the queen+king marriage of a suit before leading.
    Marriage(Suit),

    /// Swap the trump jack in hand for the face-up trump card under the talon.
    ExchangeTrump,

    /// Close the talon, ending draws and forcing strict trick rules.
    CloseTalon,
}

impl Action {
    /// Sort key for presenting actions: plays before marriages before the
    /// trump exchange before closing the talon. Within plays, trump cards
    /// come first, then suit order, then descending point value. Marriages
    /// order the same way minus the rank step.
    #[must_use]
    pub fn sort_key(self, trump: Suit) -> (u8, u8, usize, Reverse<u32>) {
        match self {
            Action::Play(card) => (
                0,
                u8::from(card.suit != trump),
                card.suit.index(),
                Reverse(card.points()),
            ),
            Action::Marriage(suit) => (1, u8::from(suit != trump), suit.index(), Reverse(0)),
            Action::ExchangeTrump => (2, 0, 0, Reverse(0)),
            Action::CloseTalon => (3, 0, 0, Reverse(0)),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Play(card) => write!(f, "play {card}"),
            Action::Marriage(suit) => {
                let queen = Card::new(*suit, Rank::Queen);
                let king = Card::new(*suit, Rank::King);
                write!(f, "declare {queen}+{king}")
            }
            Action::ExchangeTrump => write!(f, "exchange trump jack"),
            Action::CloseTalon => write!(f, "close talon"),
        }
    }
}

/// A move with metadata for history tracking.
///
/// Used for:
/// - Opponent-consistency checks in search
/// - Replay and debugging
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Round number within the bummerl when the action was taken.
    pub round: u32,

    /// Position in the match's action sequence.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub const fn new(player: PlayerId, action: Action, round: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            round,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Action::Play(card(Suit::Diamonds, Rank::Ten)).to_string(),
            "play 10D"
        );
        assert_eq!(
            Action::Marriage(Suit::Hearts).to_string(),
            "declare QH+KH"
        );
        assert_eq!(Action::ExchangeTrump.to_string(), "exchange trump jack");
        assert_eq!(Action::CloseTalon.to_string(), "close talon");
    }

    #[test]
    fn test_sort_kind_order() {
        let trump = Suit::Clubs;
        let mut actions = vec![
            Action::CloseTalon,
            Action::Marriage(Suit::Spades),
            Action::ExchangeTrump,
            Action::Play(card(Suit::Spades, Rank::Jack)),
        ];
        actions.sort_by_key(|a| a.sort_key(trump));

        assert!(matches!(actions[0], Action::Play(_)));
        assert!(matches!(actions[1], Action::Marriage(_)));
        assert_eq!(actions[2], Action::ExchangeTrump);
        assert_eq!(actions[3], Action::CloseTalon);
    }

    #[test]
    fn test_sort_plays_trump_first_then_descending() {
        let trump = Suit::Hearts;
        let mut actions = vec![
            Action::Play(card(Suit::Spades, Rank::Ace)),
            Action::Play(card(Suit::Hearts, Rank::Jack)),
            Action::Play(card(Suit::Spades, Rank::Jack)),
            Action::Play(card(Suit::Hearts, Rank::Ten)),
        ];
        actions.sort_by_key(|a| a.sort_key(trump));

        assert_eq!(
            actions,
            vec![
                Action::Play(card(Suit::Hearts, Rank::Ten)),
                Action::Play(card(Suit::Hearts, Rank::Jack)),
                Action::Play(card(Suit::Spades, Rank::Ace)),
                Action::Play(card(Suit::Spades, Rank::Jack)),
            ]
        );
    }

    #[test]
    fn test_sort_plays_group_by_suit() {
        let trump = Suit::Clubs;
        let mut actions = vec![
            Action::Play(card(Suit::Diamonds, Rank::King)),
            Action::Play(card(Suit::Spades, Rank::Queen)),
            Action::Play(card(Suit::Diamonds, Rank::Ace)),
            Action::Play(card(Suit::Spades, Rank::Ten)),
        ];
        actions.sort_by_key(|a| a.sort_key(trump));

        assert_eq!(
            actions,
            vec![
                Action::Play(card(Suit::Spades, Rank::Ten)),
                Action::Play(card(Suit::Spades, Rank::Queen)),
                Action::Play(card(Suit::Diamonds, Rank::Ace)),
                Action::Play(card(Suit::Diamonds, Rank::King)),
            ]
        );
    }

    #[test]
    fn test_sort_marriages_trump_first() {
        let trump = Suit::Diamonds;
        let mut actions = vec![
            Action::Marriage(Suit::Spades),
            Action::Marriage(Suit::Diamonds),
            Action::Marriage(Suit::Hearts),
        ];
        actions.sort_by_key(|a| a.sort_key(trump));

        assert_eq!(
            actions,
            vec![
                Action::Marriage(Suit::Diamonds),
                Action::Marriage(Suit::Spades),
                Action::Marriage(Suit::Hearts),
            ]
        );
    }

    #[test]
    fn test_action_record() {
        let action = Action::Play(card(Suit::Clubs, Rank::Ace));
        let record = ActionRecord::new(PlayerId::new(1), action, 3, 7);

        assert_eq!(record.player, PlayerId::new(1));
        assert_eq!(record.action, action);
        assert_eq!(record.round, 3);
        assert_eq!(record.sequence, 7);
    }

    #[test]
    fn test_action_serialization() {
        let actions = [
            Action::Play(card(Suit::Hearts, Rank::Queen)),
            Action::Marriage(Suit::Clubs),
            Action::ExchangeTrump,
            Action::CloseTalon,
        ];
        for action in actions {
            let json = serde_json::to_string(&action).unwrap();
            let deserialized: Action = serde_json::from_str(&json).unwrap();
            assert_eq!(action, deserialized);
        }
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(
            PlayerId::new(0),
            Action::Marriage(Suit::Hearts),
            2,
            5,
        );
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
