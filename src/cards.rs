//! The 20-card Schnapsen deck.
//!
//! Schnapsen is played with a short pack: four suits of Jack, Queen, King,
//! Ten and Ace. Card point values follow the classic scoring (2/3/4/10/11).
//! Queens and kings of the same suit form marriage pairs.
//!
//! Cards are plain values. Trump status is a property of the board, not of
//! the card, so the same `Card` can be compared and stored across rounds.

use serde::{Deserialize, Serialize};

/// Card suit. Declaration order is the presentation order used when
/// listing actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// All suits, in presentation order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Index in presentation order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// One-letter suit code used in card short names.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Spades => "Spades",
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
        };
        write!(f, "{name}")
    }
}

/// Card rank. Declaration order matches point order, so the derived `Ord`
/// ranks cards within a suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Jack,
    Queen,
    King,
    Ten,
    Ace,
}

impl Rank {
    /// All ranks, lowest first.
    pub const ALL: [Rank; 5] = [Rank::Jack, Rank::Queen, Rank::King, Rank::Ten, Rank::Ace];

    /// Trick point value of this rank.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Rank::Jack => 2,
            Rank::Queen => 3,
            Rank::King => 4,
            Rank::Ten => 10,
            Rank::Ace => 11,
        }
    }

    /// Short rank code used in card short names.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ten => "10",
            Rank::Ace => "A",
        }
    }
}

/// A playing card.
///
/// ## Example
///
/// ```
/// use schnapsen::cards::{Card, Rank, Suit};
///
/// let queen = Card::new(Suit::Spades, Rank::Queen);
/// assert_eq!(queen.points(), 3);
/// assert_eq!(queen.to_string(), "QS");
/// assert_eq!(queen.marriage_partner(), Some(Card::new(Suit::Spades, Rank::King)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Trick point value.
    #[must_use]
    pub const fn points(self) -> u32 {
        self.rank.points()
    }

    /// The card this one forms a marriage with: the queen and king of the
    /// same suit are partners. Other ranks have none.
    #[must_use]
    pub const fn marriage_partner(self) -> Option<Card> {
        match self.rank {
            Rank::Queen => Some(Card::new(self.suit, Rank::King)),
            Rank::King => Some(Card::new(self.suit, Rank::Queen)),
            _ => None,
        }
    }

    /// Whether this card can participate in a marriage.
    #[must_use]
    pub const fn is_marriage_card(self) -> bool {
        matches!(self.rank, Rank::Queen | Rank::King)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.code(), self.suit.letter())
    }
}

/// The full deck in fixed order: each suit's Jack, Queen, King, Ten, Ace.
///
/// Shuffling happens at deal time; the constant order makes deck setup
/// auditable and deterministic before the first shuffle.
#[must_use]
pub fn deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(20);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card::new(suit, rank));
        }
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_deck_composition() {
        let cards = deck();
        assert_eq!(cards.len(), 20);

        let unique: HashSet<_> = cards.iter().copied().collect();
        assert_eq!(unique.len(), 20, "deck must not contain duplicates");

        for suit in Suit::ALL {
            let in_suit = cards.iter().filter(|c| c.suit == suit).count();
            assert_eq!(in_suit, 5);
        }

        let total: u32 = cards.iter().map(|c| c.points()).sum();
        assert_eq!(total, 120, "trick points in the full deck");
    }

    #[test]
    fn test_rank_points() {
        assert_eq!(Rank::Jack.points(), 2);
        assert_eq!(Rank::Queen.points(), 3);
        assert_eq!(Rank::King.points(), 4);
        assert_eq!(Rank::Ten.points(), 10);
        assert_eq!(Rank::Ace.points(), 11);
    }

    #[test]
    fn test_rank_order_matches_points() {
        let mut ranks = Rank::ALL;
        ranks.sort();
        for pair in ranks.windows(2) {
            assert!(pair[0].points() < pair[1].points());
        }
    }

    #[test]
    fn test_card_codes() {
        assert_eq!(Card::new(Suit::Spades, Rank::Jack).to_string(), "JS");
        assert_eq!(Card::new(Suit::Hearts, Rank::Queen).to_string(), "QH");
        assert_eq!(Card::new(Suit::Diamonds, Rank::Ten).to_string(), "10D");
        assert_eq!(Card::new(Suit::Clubs, Rank::Ace).to_string(), "AC");
    }

    #[test]
    fn test_marriage_partner() {
        let queen = Card::new(Suit::Hearts, Rank::Queen);
        let king = Card::new(Suit::Hearts, Rank::King);

        assert_eq!(queen.marriage_partner(), Some(king));
        assert_eq!(king.marriage_partner(), Some(queen));
        assert!(queen.is_marriage_card());

        for rank in [Rank::Jack, Rank::Ten, Rank::Ace] {
            let card = Card::new(Suit::Hearts, rank);
            assert_eq!(card.marriage_partner(), None);
            assert!(!card.is_marriage_card());
        }
    }

    #[test]
    fn test_marriage_partner_stays_in_suit() {
        for suit in Suit::ALL {
            let queen = Card::new(suit, Rank::Queen);
            let partner = queen.marriage_partner().unwrap();
            assert_eq!(partner.suit, suit);
            assert_eq!(partner.rank, Rank::King);
        }
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new(Suit::Diamonds, Rank::King);
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
