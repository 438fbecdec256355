//! Error types for rule enforcement and configuration parsing.
//!
//! Every rejected action reports the specific rule it broke, so callers can
//! distinguish a bug in their own move generation from an opponent playing
//! out of turn.

use crate::cards::{Card, Suit};
use crate::core::PlayerId;

/// Why an action was rejected by the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("not {player}'s turn")]
    NotYourTurn { player: PlayerId },

    #[error("{player} does not hold {card}")]
    CardNotHeld { player: PlayerId, card: Card },

    #[error("{player} is not leading this trick")]
    NotLeading { player: PlayerId },

    #[error("must lead the {suit} queen or king after declaring the marriage")]
    MustLeadMarriagePartner { suit: Suit },

    #[error("must follow suit with a {suit} card")]
    MustFollowSuit { suit: Suit },

    #[error("must beat the led {card} while following suit")]
    MustBeatLead { card: Card },

    #[error("void in {led}, must play a trump")]
    MustTrump { led: Suit },

    #[error("{player} does not hold both the {suit} queen and king")]
    NoMarriageInHand { player: PlayerId, suit: Suit },

    #[error("{player} does not hold the trump jack")]
    TrumpJackNotHeld { player: PlayerId },

    #[error("the talon is closed or exhausted")]
    TalonUnavailable,

    #[error("the match is already decided")]
    MatchOver,
}

/// Why a match configuration string failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bummerl target '{0}': expected a positive integer")]
    InvalidTarget(String),

    #[error("invalid seed '{0}': expected an unsigned integer")]
    InvalidSeed(String),

    #[error("too many fields in '{0}': expected '<target>' or '<target>;<seed>'")]
    TooManyFields(String),
}
