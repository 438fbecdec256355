//! The Schnapsen board: full rules state for a two-player match.
//!
//! A match is a series of bummerls; a bummerl is a series of rounds. Each
//! round deals five cards per player from a shuffled 20-card deck, turns up
//! a trump card under the ten-card talon, and plays tricks until a player
//! claims 66 points or the hands run out. Round results move a countdown
//! that starts at 7; reaching 0 wins the bummerl and puts one or two marks
//! on the loser. A player collecting the configured number of marks loses
//! the match.
//!
//! The board enforces the rules: loose play while the talon is open, strict
//! follow/beat/trump obligations once it is closed or empty, marriage
//! declarations with their lead obligation, the trump jack exchange, and
//! closing the talon. Illegal moves are rejected with a [`RuleError`]
//! naming the violated rule; the board never mutates on rejection.
//!
//! Rounds chain automatically: when a trick or declaration ends a round,
//! the board scores it, flips the opener, and deals the next round in the
//! same call. The state only freezes once the match is decided.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::action::Action;
use crate::cards::{self, Card, Rank, Suit};
use crate::core::{GameRng, PlayerId, PlayerPair};
use crate::error::RuleError;

/// Round points that end a round in the claimer's favor.
pub const WINNING_SCORE: u32 = 66;

/// Countdown each player starts a bummerl with.
pub const BUMMERL_COUNTDOWN: i32 = 7;

/// Points for declaring the trump marriage.
pub const TRUMP_MARRIAGE_VALUE: u32 = 40;

/// Points for declaring a plain marriage.
pub const PLAIN_MARRIAGE_VALUE: u32 = 20;

/// A player's hand. Never exceeds five cards.
pub type Hand = SmallVec<[Card; 5]>;

/// A completed trick in a winner's pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    /// The card that was led.
    pub lead: Card,

    /// The card played in answer.
    pub response: Card,
}

impl Trick {
    /// Combined point value of both cards.
    #[must_use]
    pub const fn points(self) -> u32 {
        self.lead.points() + self.response.points()
    }
}

impl std::fmt::Display for Trick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.lead, self.response)
    }
}

/// Full rules state for a Schnapsen match.
///
/// The board holds perfect information. Players and search code that must
/// not see hidden cards work on a copy passed through [`Board::determinize`],
/// which resamples everything the viewing player cannot know.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    rng: GameRng,

    /// Draw pile. The top is the end of the vector; the face-up trump
    /// upcard sits at index 0 and is drawn last.
    talon: Vec<Card>,
    hands: PlayerPair<Hand>,
    tricks: PlayerPair<Vec<Trick>>,

    scores: PlayerPair<u32>,

    /// Bummerl countdown, 7 to 0. Can end below zero when a multi-point
    /// round overshoots.
    countdown: PlayerPair<i32>,

    /// Marks against each player. Marks go to the loser of a bummerl;
    /// reaching `bummerl_target` loses the match.
    marks: PlayerPair<u32>,
    bummerl_target: u32,

    /// Marriage points declared before the declarer won a trick. Released
    /// into the score with their first trick win.
    pending_marriage: PlayerPair<u32>,

    /// Suit whose queen or king must be led after a declaration.
    marriage_obligation: Option<Suit>,

    talon_closed: bool,
    talon_closer: Option<PlayerId>,
    defender_score_at_close: u32,

    trump: Suit,
    lead: Option<Card>,

    opener: PlayerId,
    turn: PlayerId,
    round: u32,

    /// Cards in each hand that both players have seen: declared marriage
    /// partners, the upcard taken in an exchange or final draw.
    revealed: PlayerPair<OrdSet<Card>>,
}

impl Board {
    /// Create a board for a fresh match and deal the first round.
    ///
    /// `bummerl_target` is the number of marks that loses the match.
    #[must_use]
    pub fn new(seed: u64, bummerl_target: u32) -> Self {
        let mut board = Self {
            rng: GameRng::new(seed),
            talon: Vec::new(),
            hands: PlayerPair::with_default(),
            tricks: PlayerPair::with_default(),
            scores: PlayerPair::with_value(0),
            countdown: PlayerPair::with_value(BUMMERL_COUNTDOWN),
            marks: PlayerPair::with_value(0),
            bummerl_target,
            pending_marriage: PlayerPair::with_value(0),
            marriage_obligation: None,
            talon_closed: false,
            talon_closer: None,
            defender_score_at_close: 0,
            trump: Suit::Spades,
            lead: None,
            opener: PlayerId::new(0),
            turn: PlayerId::new(0),
            round: 0,
            revealed: PlayerPair::with_default(),
        };
        board.deal();
        board
    }

    /// Build a board from an explicit first-round deal instead of a
    /// shuffle, for analysis positions and tests. Trump is the suit of
    /// `talon[0]`, the upcard.
    ///
    /// # Panics
    ///
    /// Panics unless both hands have five cards, the talon has ten, and
    /// the twenty cards are distinct.
    #[must_use]
    pub fn from_deal(
        seed: u64,
        bummerl_target: u32,
        opener: PlayerId,
        first_hand: &[Card],
        second_hand: &[Card],
        talon: Vec<Card>,
    ) -> Self {
        assert_eq!(first_hand.len(), 5, "each hand is dealt five cards");
        assert_eq!(second_hand.len(), 5, "each hand is dealt five cards");
        assert_eq!(talon.len(), 10, "the talon starts with ten cards");

        let mut seen = std::collections::HashSet::new();
        for card in first_hand.iter().chain(second_hand.iter()).chain(talon.iter()) {
            assert!(seen.insert(*card), "duplicate card {card} in deal");
        }

        let mut hands = PlayerPair::<Hand>::with_default();
        hands[PlayerId::new(0)].extend(first_hand.iter().copied());
        hands[PlayerId::new(1)].extend(second_hand.iter().copied());

        Self {
            rng: GameRng::new(seed),
            trump: talon[0].suit,
            talon,
            hands,
            tricks: PlayerPair::with_default(),
            scores: PlayerPair::with_value(0),
            countdown: PlayerPair::with_value(BUMMERL_COUNTDOWN),
            marks: PlayerPair::with_value(0),
            bummerl_target,
            pending_marriage: PlayerPair::with_value(0),
            marriage_obligation: None,
            talon_closed: false,
            talon_closer: None,
            defender_score_at_close: 0,
            lead: None,
            opener,
            turn: opener,
            round: 0,
            revealed: PlayerPair::with_default(),
        }
    }

    /// Clone this board with an independent random stream, so the copy's
    /// future shuffles and samples diverge from the original's.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        let mut forked = self.clone();
        forked.rng = self.rng.fork();
        forked
    }

    /// The player to move.
    #[must_use]
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    /// The player who opened the current round.
    #[must_use]
    pub fn opener(&self) -> PlayerId {
        self.opener
    }

    /// The trump suit of the current round.
    #[must_use]
    pub fn trump(&self) -> Suit {
        self.trump
    }

    /// The face-up card under the talon, while any talon cards remain.
    #[must_use]
    pub fn trump_upcard(&self) -> Option<Card> {
        self.talon.first().copied()
    }

    /// The card currently led, if a trick is half played.
    #[must_use]
    pub fn lead(&self) -> Option<Card> {
        self.lead
    }

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        &self.hands[player]
    }

    /// Tricks a player has won this round.
    #[must_use]
    pub fn tricks(&self, player: PlayerId) -> &[Trick] {
        &self.tricks[player]
    }

    /// A player's round score, marriages included once banked.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player]
    }

    /// Marriage points a player has declared but not yet banked.
    #[must_use]
    pub fn pending_marriage_points(&self, player: PlayerId) -> u32 {
        self.pending_marriage[player]
    }

    /// The suit whose queen or king must be led next, if a marriage was
    /// just declared.
    #[must_use]
    pub fn marriage_obligation(&self) -> Option<Suit> {
        self.marriage_obligation
    }

    /// A player's bummerl countdown.
    #[must_use]
    pub fn countdown(&self, player: PlayerId) -> i32 {
        self.countdown[player]
    }

    /// Marks against a player.
    #[must_use]
    pub fn marks(&self, player: PlayerId) -> u32 {
        self.marks[player]
    }

    /// Marks that lose the match.
    #[must_use]
    pub fn bummerl_target(&self) -> u32 {
        self.bummerl_target
    }

    /// Cards left in the talon, upcard included.
    #[must_use]
    pub fn talon_len(&self) -> usize {
        self.talon.len()
    }

    /// Whether the talon has been closed this round.
    #[must_use]
    pub fn is_talon_closed(&self) -> bool {
        self.talon_closed
    }

    /// Who closed the talon this round, if anyone.
    #[must_use]
    pub fn talon_closer(&self) -> Option<PlayerId> {
        self.talon_closer
    }

    /// Rounds completed before the current one.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Cards in a player's hand that the opponent has seen.
    #[must_use]
    pub fn revealed(&self, player: PlayerId) -> &OrdSet<Card> {
        &self.revealed[player]
    }

    /// Whether the current round has been decided. Transient: a finished
    /// round resets immediately unless the match ended with it.
    #[must_use]
    pub fn is_round_over(&self) -> bool {
        self.scores.iter().any(|(_, s)| *s >= WINNING_SCORE)
            || self.hands.iter().all(|(_, h)| h.is_empty())
    }

    /// Whether the match is decided.
    #[must_use]
    pub fn is_match_over(&self) -> bool {
        self.marks.iter().any(|(_, m)| *m >= self.bummerl_target)
    }

    /// The player who lost the match by collecting too many marks.
    #[must_use]
    pub fn match_loser(&self) -> Option<PlayerId> {
        PlayerId::BOTH
            .into_iter()
            .find(|p| self.marks[*p] >= self.bummerl_target)
    }

    /// Standing of a player across all three scales of the game. Marks
    /// against the opponent weigh 10 each, progress on the own countdown
    /// counts as `9 - countdown`, and the running round score adds a
    /// fraction below 1 (scored against 106, the highest reachable round
    /// score plus one).
    #[must_use]
    pub fn utility(&self, player: PlayerId) -> f64 {
        let opponent = player.opponent();
        f64::from(self.marks[opponent]) * 10.0
            + f64::from(9 - self.countdown[player])
            + f64::from(self.scores[player]) / 106.0
    }

    /// Every legal action for the player to move, in presentation order.
    /// Empty once the match is decided.
    #[must_use]
    pub fn possible_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.is_match_over() {
            return actions;
        }

        let hand = &self.hands[self.turn];
        match self.lead {
            None => {
                if let Some(suit) = self.marriage_obligation {
                    // only the declared partners may be led
                    for rank in [Rank::Queen, Rank::King] {
                        let card = Card::new(suit, rank);
                        if hand.contains(&card) {
                            actions.push(Action::Play(card));
                        }
                    }
                } else {
                    let talon_open = !self.talon_closed && !self.talon.is_empty();
                    for card in hand {
                        if talon_open && *card == Card::new(self.trump, Rank::Jack) {
                            actions.push(Action::ExchangeTrump);
                        }
                        if card.rank == Rank::Queen
                            && hand.contains(&Card::new(card.suit, Rank::King))
                        {
                            actions.push(Action::Marriage(card.suit));
                        }
                        actions.push(Action::Play(*card));
                    }
                    if talon_open {
                        actions.push(Action::CloseTalon);
                    }
                }
            }
            Some(lead_card) => {
                if self.strict_rules() {
                    actions.extend(
                        self.strict_responses(lead_card).into_iter().map(Action::Play),
                    );
                } else {
                    actions.extend(hand.iter().copied().map(Action::Play));
                }
            }
        }

        let trump = self.trump;
        actions.sort_by_key(|a| a.sort_key(trump));
        actions
    }

    /// Play `card` from `player`'s hand, as a lead or as the answer to
    /// one. Answers resolve the trick: the winner banks the points, both
    /// players draw while the talon is open, and the winner leads next.
    /// A trick that decides the round scores it and deals the next.
    pub fn play_card(&mut self, player: PlayerId, card: Card) -> Result<(), RuleError> {
        self.check_turn(player)?;
        if !self.hands[player].contains(&card) {
            return Err(RuleError::CardNotHeld { player, card });
        }

        match self.lead {
            None => {
                if let Some(suit) = self.marriage_obligation {
                    if card.suit != suit || !card.is_marriage_card() {
                        return Err(RuleError::MustLeadMarriagePartner { suit });
                    }
                    self.marriage_obligation = None;
                }
                self.take_card(player, card);
                self.lead = Some(card);
                self.turn = player.opponent();
            }
            Some(lead_card) => {
                if self.strict_rules() {
                    self.check_strict_response(player, lead_card, card)?;
                }

                let winner = self.response_winner(lead_card, card, player);
                self.take_card(player, card);
                self.lead = None;

                self.tricks[winner].push(Trick {
                    lead: lead_card,
                    response: card,
                });
                self.scores[winner] += lead_card.points() + card.points();
                self.scores[winner] += std::mem::take(&mut self.pending_marriage[winner]);

                if !self.talon_closed && !self.talon.is_empty() {
                    self.draw_for(winner);
                    self.draw_for(winner.opponent());
                }
                self.turn = winner;

                if self.is_round_over() {
                    self.score_round();
                }
            }
        }
        Ok(())
    }

    /// Declare the queen+king marriage of `suit`. Only the leader may
    /// declare, and must then lead one of the two partners. The points
    /// (40 for trump, 20 otherwise) bank immediately if the declarer has
    /// already won a trick; otherwise they wait for the first trick win.
    pub fn declare_marriage(&mut self, player: PlayerId, suit: Suit) -> Result<(), RuleError> {
        self.check_turn(player)?;
        if self.lead.is_some() {
            return Err(RuleError::NotLeading { player });
        }
        if let Some(pending) = self.marriage_obligation {
            return Err(RuleError::MustLeadMarriagePartner { suit: pending });
        }

        let queen = Card::new(suit, Rank::Queen);
        let king = Card::new(suit, Rank::King);
        if !self.hands[player].contains(&queen) || !self.hands[player].contains(&king) {
            return Err(RuleError::NoMarriageInHand { player, suit });
        }

        let value = if suit == self.trump {
            TRUMP_MARRIAGE_VALUE
        } else {
            PLAIN_MARRIAGE_VALUE
        };

        self.marriage_obligation = Some(suit);
        self.revealed[player].insert(queen);
        self.revealed[player].insert(king);

        if self.scores[player] > 0 {
            self.scores[player] += value;
            // a declaration can push the declarer past 66 on its own
            if self.is_round_over() {
                self.score_round();
            }
        } else {
            self.pending_marriage[player] += value;
        }
        Ok(())
    }

    /// Swap the trump jack in `player`'s hand for the face-up upcard.
    /// Allowed only for the leader while the talon is open and stocked.
    pub fn exchange_trump(&mut self, player: PlayerId) -> Result<(), RuleError> {
        self.check_turn(player)?;
        if self.lead.is_some() {
            return Err(RuleError::NotLeading { player });
        }
        if let Some(suit) = self.marriage_obligation {
            return Err(RuleError::MustLeadMarriagePartner { suit });
        }
        if self.talon_closed || self.talon.is_empty() {
            return Err(RuleError::TalonUnavailable);
        }

        let jack = Card::new(self.trump, Rank::Jack);
        let pos = self.hands[player]
            .iter()
            .position(|c| *c == jack)
            .ok_or(RuleError::TrumpJackNotHeld { player })?;

        let upcard = self.talon[0];
        self.talon[0] = jack;
        self.hands[player][pos] = upcard;

        self.revealed[player].remove(&jack);
        self.revealed[player].insert(upcard);
        Ok(())
    }

    /// Close the talon: no more draws, strict trick rules from now on.
    /// The defender's score at this moment decides how a failed closing
    /// is punished.
    pub fn close_talon(&mut self, player: PlayerId) -> Result<(), RuleError> {
        self.check_turn(player)?;
        if self.lead.is_some() {
            return Err(RuleError::NotLeading { player });
        }
        if let Some(suit) = self.marriage_obligation {
            return Err(RuleError::MustLeadMarriagePartner { suit });
        }
        if self.talon_closed || self.talon.is_empty() {
            return Err(RuleError::TalonUnavailable);
        }

        self.talon_closed = true;
        self.talon_closer = Some(player);
        self.defender_score_at_close = self.scores[player.opponent()];
        Ok(())
    }

    /// Resample everything `viewer` cannot see: the opponent's unrevealed
    /// cards and the hidden talon order are pooled and redealt. The upcard
    /// and all revealed cards stay put, so the result is a full-information
    /// state consistent with the viewer's knowledge.
    pub fn determinize(&mut self, viewer: PlayerId) {
        let opponent = viewer.opponent();

        let mut kept = Hand::new();
        let mut pool: Vec<Card> = Vec::new();
        for card in &self.hands[opponent] {
            if self.revealed[opponent].contains(card) {
                kept.push(*card);
            } else {
                pool.push(*card);
            }
        }
        let draw_count = pool.len();
        pool.extend(self.talon.iter().skip(1).copied());

        self.rng.shuffle(&mut pool);

        let mut hand = kept;
        hand.extend(pool.drain(..draw_count));
        self.hands[opponent] = hand;

        if !self.talon.is_empty() {
            let mut talon = Vec::with_capacity(pool.len() + 1);
            talon.push(self.talon[0]);
            talon.append(&mut pool);
            self.talon = talon;
        }
    }

    fn check_turn(&self, player: PlayerId) -> Result<(), RuleError> {
        if self.is_match_over() {
            return Err(RuleError::MatchOver);
        }
        if player != self.turn {
            return Err(RuleError::NotYourTurn { player });
        }
        Ok(())
    }

    fn strict_rules(&self) -> bool {
        self.talon_closed || self.talon.is_empty()
    }

    /// Legal answers under strict rules, in obligation order: cards that
    /// beat the lead in its suit, else any card of the led suit, else any
    /// trump, else the whole hand.
    fn strict_responses(&self, lead_card: Card) -> Vec<Card> {
        let hand = &self.hands[self.turn];
        let led = lead_card.suit;

        let beating: Vec<Card> = hand
            .iter()
            .filter(|c| c.suit == led && c.rank > lead_card.rank)
            .copied()
            .collect();
        if !beating.is_empty() {
            return beating;
        }

        let following: Vec<Card> = hand.iter().filter(|c| c.suit == led).copied().collect();
        if !following.is_empty() {
            return following;
        }

        let trumps: Vec<Card> = hand.iter().filter(|c| c.suit == self.trump).copied().collect();
        if !trumps.is_empty() {
            return trumps;
        }

        hand.iter().copied().collect()
    }

    fn check_strict_response(
        &self,
        player: PlayerId,
        lead_card: Card,
        card: Card,
    ) -> Result<(), RuleError> {
        let hand = &self.hands[player];
        let led = lead_card.suit;

        if card.suit == led {
            if card.rank < lead_card.rank
                && hand.iter().any(|c| c.suit == led && c.rank > lead_card.rank)
            {
                return Err(RuleError::MustBeatLead { card: lead_card });
            }
        } else {
            if hand.iter().any(|c| c.suit == led) {
                return Err(RuleError::MustFollowSuit { suit: led });
            }
            if card.suit != self.trump && hand.iter().any(|c| c.suit == self.trump) {
                return Err(RuleError::MustTrump { led });
            }
        }
        Ok(())
    }

    fn response_winner(&self, lead_card: Card, response: Card, responder: PlayerId) -> PlayerId {
        if response.suit == lead_card.suit {
            if response.rank > lead_card.rank {
                responder
            } else {
                responder.opponent()
            }
        } else if response.suit == self.trump {
            responder
        } else {
            responder.opponent()
        }
    }

    fn take_card(&mut self, player: PlayerId, card: Card) {
        if let Some(pos) = self.hands[player].iter().position(|c| *c == card) {
            self.hands[player].remove(pos);
        }
        self.revealed[player].remove(&card);
    }

    fn draw_for(&mut self, player: PlayerId) {
        // the last draw is the face-up upcard, so both players know it
        let is_upcard = self.talon.len() == 1;
        if let Some(card) = self.talon.pop() {
            if is_upcard {
                self.revealed[player].insert(card);
            }
            self.hands[player].push(card);
        }
    }

    /// Score a finished round, settle the bummerl if the countdown ran
    /// out, and deal the next round unless the match ended.
    fn score_round(&mut self) {
        if !self.is_round_over() || self.is_match_over() {
            return;
        }

        if let (true, Some(closer)) = (self.talon_closed, self.talon_closer) {
            if self.scores[closer] >= WINNING_SCORE {
                self.countdown[closer] -= game_points(self.defender_score_at_close);
            } else {
                // failed closing: the defender collects, two points minimum
                let defender = closer.opponent();
                let points = if self.defender_score_at_close == 0 { 3 } else { 2 };
                self.countdown[defender] -= points;
            }
        } else {
            let claimer = PlayerId::BOTH
                .into_iter()
                .find(|p| self.scores[*p] >= WINNING_SCORE);
            match claimer {
                Some(winner) => {
                    self.countdown[winner] -= game_points(self.scores[winner.opponent()]);
                }
                None => {
                    // hands ran out with the talon open: last trick decides
                    self.countdown[self.turn] -= 1;
                }
            }
        }

        if let Some(bummerl_winner) = PlayerId::BOTH
            .into_iter()
            .find(|p| self.countdown[*p] <= 0)
        {
            let loser = bummerl_winner.opponent();
            // losing without a single round won is a schneider, two marks
            let marks = if self.countdown[loser] == BUMMERL_COUNTDOWN { 2 } else { 1 };
            self.marks[loser] += marks;
            self.countdown = PlayerPair::with_value(BUMMERL_COUNTDOWN);
        }

        if !self.is_match_over() {
            self.opener = self.opener.opponent();
            self.reset_round();
        }
    }

    fn reset_round(&mut self) {
        self.scores = PlayerPair::with_value(0);
        self.hands = PlayerPair::with_default();
        self.tricks = PlayerPair::with_default();
        self.pending_marriage = PlayerPair::with_value(0);
        self.marriage_obligation = None;
        self.talon_closed = false;
        self.talon_closer = None;
        self.defender_score_at_close = 0;
        self.lead = None;
        self.revealed = PlayerPair::with_default();
        self.turn = self.opener;
        self.round += 1;
        self.deal();
    }

    /// Shuffle a fresh deck, deal five cards each alternating from the
    /// opener, then turn the next card up as trump under the talon.
    fn deal(&mut self) {
        let mut deck = cards::deck();
        self.rng.shuffle(&mut deck);

        for (i, card) in deck.drain(..10).enumerate() {
            let player = if i % 2 == 0 {
                self.opener
            } else {
                self.opener.opponent()
            };
            self.hands[player].push(card);
        }

        let upcard = deck.remove(0);
        self.trump = upcard.suit;
        // draws pop from the back; the upcard goes to the bottom
        deck.reverse();
        deck.insert(0, upcard);
        self.talon = deck;
    }
}

/// Game points for winning a round, by the loser's score: 3 against a
/// trickless opponent, 2 under 33, otherwise 1.
const fn game_points(opponent_score: u32) -> i32 {
    if opponent_score == 0 {
        3
    } else if opponent_score < 33 {
        2
    } else {
        1
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let list = |cards: &[Card]| {
            cards
                .iter()
                .map(Card::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };

        writeln!(f, "--------------------")?;
        writeln!(f, "      SCHNAPSEN")?;
        writeln!(f, "--------------------")?;
        for player in PlayerId::BOTH {
            let tricks = self.tricks[player]
                .iter()
                .map(Trick::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(
                f,
                "{player}: hand [{}] score {} tricks [{tricks}]",
                list(&self.hands[player]),
                self.scores[player],
            )?;
        }

        match (self.talon_closed, self.talon_closer, self.trump_upcard()) {
            (true, Some(closer), _) => {
                writeln!(f, "Talon closed by {closer}, trump {}", self.trump)?;
            }
            (_, _, Some(upcard)) => {
                writeln!(f, "Talon: {} cards, upcard {upcard}", self.talon.len())?;
            }
            _ => {
                writeln!(f, "Talon empty, trump {}", self.trump)?;
            }
        }
        if let Some(card) = self.lead {
            writeln!(f, "Lead: {card}")?;
        }

        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        writeln!(
            f,
            "Countdown: {p0}: {}, {p1}: {}",
            self.countdown[p0], self.countdown[p1],
        )?;
        write!(
            f,
            "Marks (to {}): {p0}: ({}) {}, {p1}: ({}) {}",
            self.bummerl_target,
            self.marks[p0],
            "°".repeat(self.marks[p0] as usize),
            self.marks[p1],
            "°".repeat(self.marks[p1] as usize),
        )
    }
}
