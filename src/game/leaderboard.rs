use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::models::{Point, RoundId};
use super::scoring::{pixel_distance, score};
use super::session::GameSession;

/// A player's cumulative score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTotal {
    pub player: String,
    pub total: u64,
}

/// Outcome of one player in one answered round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RoundResult {
    Scored { score: u32, distance: u64 },
    NoGuess,
}

impl RoundResult {
    pub fn points(&self) -> u32 {
        match self {
            RoundResult::Scored { score, .. } => *score,
            RoundResult::NoGuess => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRoundResult {
    pub player: String,
    #[serde(flatten)]
    pub result: RoundResult,
}

/// Scores of every current player for one answered round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundBreakdown {
    pub round_id: RoundId,
    pub number: usize, // 1-based position among all rounds
    pub map: String,
    pub answer: Point,
    pub guesses: BTreeMap<String, Point>,
    pub results: Vec<PlayerRoundResult>, // Registration order
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaderboard {
    pub totals: Vec<PlayerTotal>,
    pub rounds: Vec<RoundBreakdown>,
}

impl Leaderboard {
    /// Recomputes standings from scratch.
    ///
    /// Unanswered rounds are skipped. Every registered player starts at
    /// zero, and a missing guess is reported as [`RoundResult::NoGuess`].
    /// Totals are ordered highest first; ties keep registration order.
    pub fn build(session: &GameSession) -> Self {
        let players = session.players();
        let mut totals: Vec<PlayerTotal> = players
            .iter()
            .map(|player| PlayerTotal {
                player: player.clone(),
                total: 0,
            })
            .collect();
        let mut rounds = Vec::new();

        for (index, round) in session.rounds().iter().enumerate() {
            let Some(answer) = round.answer() else {
                continue;
            };

            let mut results = Vec::with_capacity(players.len());
            for (slot, player) in players.iter().enumerate() {
                let result = match round.guess_of(player) {
                    Some(guess) => {
                        let distance = pixel_distance(guess, answer);
                        RoundResult::Scored {
                            score: score(distance, round.width(), round.height()),
                            distance: distance.round_ties_even() as u64,
                        }
                    }
                    None => RoundResult::NoGuess,
                };
                totals[slot].total += u64::from(result.points());
                results.push(PlayerRoundResult {
                    player: player.clone(),
                    result,
                });
            }

            rounds.push(RoundBreakdown {
                round_id: round.id().clone(),
                number: index + 1,
                map: round.map().to_string(),
                answer,
                guesses: round.guesses().clone(),
                results,
            });
        }

        totals.sort_by(|a, b| b.total.cmp(&a.total));

        Self { totals, rounds }
    }

    pub fn total_of(&self, player: &str) -> Option<u64> {
        self.totals
            .iter()
            .find(|t| t.player == player)
            .map(|t| t.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::scoring::MIN_SCORE;

    fn session_with_players(names: &[&str]) -> GameSession {
        let mut session = GameSession::new();
        for name in names {
            session.add_player(name).unwrap();
        }
        session
    }

    #[test]
    fn empty_session_has_empty_leaderboard() {
        let board = Leaderboard::build(&GameSession::new());
        assert!(board.totals.is_empty());
        assert!(board.rounds.is_empty());
    }

    #[test]
    fn scores_exact_far_and_missing_guesses() {
        let mut session = session_with_players(&["Alice", "Bob", "Carol"]);
        let round = session.add_round("map.png", 1000, 500).unwrap();
        session
            .set_answer(round.as_str(), Point::new(500, 250))
            .unwrap();
        session
            .record_guess(round.as_str(), "Alice", Point::new(500, 250))
            .unwrap();
        session
            .record_guess(round.as_str(), "Bob", Point::new(1000, 500))
            .unwrap();

        let board = Leaderboard::build(&session);
        assert_eq!(board.rounds.len(), 1);
        let results = &board.rounds[0].results;
        assert_eq!(
            results[0].result,
            RoundResult::Scored {
                score: 1000,
                distance: 0
            }
        );
        assert_eq!(
            results[1].result,
            RoundResult::Scored {
                score: 368,
                distance: 559
            }
        );
        assert_eq!(results[2].result, RoundResult::NoGuess);

        assert_eq!(board.total_of("Alice"), Some(1000));
        assert_eq!(board.total_of("Bob"), Some(368));
        assert_eq!(board.total_of("Carol"), Some(0));
    }

    #[test]
    fn unanswered_rounds_are_skipped() {
        let mut session = session_with_players(&["Alice"]);
        let answered = session.add_round("a.png", 100, 100).unwrap();
        session.add_round("b.png", 100, 100).unwrap();
        session.set_answer(answered.as_str(), Point::new(0, 0)).unwrap();
        session
            .record_guess(answered.as_str(), "Alice", Point::new(0, 0))
            .unwrap();

        let board = Leaderboard::build(&session);
        assert_eq!(board.rounds.len(), 1);
        assert_eq!(board.rounds[0].number, 1);
        assert_eq!(board.total_of("Alice"), Some(1000));
    }

    #[test]
    fn totals_sort_descending_with_stable_ties() {
        let mut session = session_with_players(&["Dan", "Eve", "Fay", "Gus"]);
        let round = session.add_round("a.png", 100, 100).unwrap();
        session.set_answer(round.as_str(), Point::new(0, 0)).unwrap();
        session
            .record_guess(round.as_str(), "Fay", Point::new(0, 0))
            .unwrap();
        session
            .record_guess(round.as_str(), "Gus", Point::new(0, 0))
            .unwrap();

        let order: Vec<_> = Leaderboard::build(&session)
            .totals
            .into_iter()
            .map(|t| t.player)
            .collect();
        assert_eq!(order, ["Fay", "Gus", "Dan", "Eve"]);
    }

    #[test]
    fn late_joiners_have_no_guess_for_earlier_rounds() {
        let mut session = session_with_players(&["Alice"]);
        let first = session.add_round("a.png", 100, 100).unwrap();
        session.set_answer(first.as_str(), Point::new(0, 0)).unwrap();
        session
            .record_guess(first.as_str(), "Alice", Point::new(10, 0))
            .unwrap();

        session.add_player("Zoe").unwrap();
        let board = Leaderboard::build(&session);
        assert_eq!(board.total_of("Zoe"), Some(0));
        assert_eq!(board.rounds[0].results[1].result, RoundResult::NoGuess);
    }

    #[test]
    fn removed_players_disappear() {
        let mut session = session_with_players(&["Alice", "Bob"]);
        let round = session.add_round("a.png", 100, 100).unwrap();
        session.set_answer(round.as_str(), Point::new(0, 0)).unwrap();
        session
            .record_guess(round.as_str(), "Bob", Point::new(0, 0))
            .unwrap();
        session.remove_player("Bob");

        let board = Leaderboard::build(&session);
        assert_eq!(board.total_of("Bob"), None);
        assert!(board.rounds[0].guesses.is_empty());
        assert_eq!(board.rounds[0].results.len(), 1);
    }

    #[test]
    fn totals_accumulate_across_rounds() {
        let mut session = session_with_players(&["Alice"]);
        for _ in 0..3 {
            let round = session.add_round("a.png", 100, 100).unwrap();
            session.set_answer(round.as_str(), Point::new(5, 5)).unwrap();
            session
                .record_guess(round.as_str(), "Alice", Point::new(5, 5))
                .unwrap();
        }
        assert_eq!(Leaderboard::build(&session).total_of("Alice"), Some(3000));
    }

    #[test]
    fn extreme_guess_scores_the_floor() {
        let mut session = session_with_players(&["Alice"]);
        let round = session.add_round("a.png", 100, 100).unwrap();
        session.set_answer(round.as_str(), Point::new(-1, 0)).unwrap();
        session
            .record_guess(round.as_str(), "Alice", Point::new(i64::MAX, 0))
            .unwrap();

        let board = Leaderboard::build(&session);
        let RoundResult::Scored { score, distance } = board.rounds[0].results[0].result else {
            panic!("expected a scored result");
        };
        assert_eq!(score, MIN_SCORE);
        assert!(distance > i64::MAX as u64);
        assert_eq!(board.total_of("Alice"), Some(u64::from(MIN_SCORE)));
    }

    #[test]
    fn no_guess_serializes_distinctly_from_zero() {
        let cell = PlayerRoundResult {
            player: "Carol".to_string(),
            result: RoundResult::NoGuess,
        };
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json, serde_json::json!({"player": "Carol", "status": "no_guess"}));

        let scored = PlayerRoundResult {
            player: "Bob".to_string(),
            result: RoundResult::Scored {
                score: 368,
                distance: 559,
            },
        };
        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["status"], "scored");
        assert_eq!(json["score"], 368);
    }
}
