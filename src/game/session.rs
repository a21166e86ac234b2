use std::collections::BTreeMap;

use super::errors::GameError;
use super::models::{fold_name, names_match, Point, RoundId, RoundRecord};
use super::types::{GameOverview, RoundState, RoundSummary, RoundView};

/// The state of one game: registered players, the ordered rounds and the
/// cursor telling displays which round to show by default.
///
/// Every mutator validates before it writes, so an `Err` leaves the
/// session untouched.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    players: Vec<String>, // Registration order
    rounds: Vec<RoundRecord>,
    current_round_index: usize,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    pub fn current_round_index(&self) -> usize {
        self.current_round_index
    }

    /// Resolves a name to its registered spelling using fold comparison
    pub fn find_player(&self, name: &str) -> Option<&str> {
        let key = fold_name(name);
        self.players
            .iter()
            .find(|p| fold_name(p) == key)
            .map(String::as_str)
    }

    /// Registers a player under the trimmed name, keeping its casing
    pub fn add_player(&mut self, name: &str) -> Result<&[String], GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }
        if let Some(existing) = self.find_player(name) {
            return Err(GameError::DuplicatePlayer(existing.to_string()));
        }

        self.players.push(name.to_string());
        Ok(&self.players)
    }

    /// Unregisters the player matching `name` and purges their guesses from
    /// every round. Unknown names are ignored.
    pub fn remove_player(&mut self, name: &str) -> &[String] {
        if let Some(position) = self.players.iter().position(|p| names_match(p, name)) {
            let removed = self.players.remove(position);
            for round in &mut self.rounds {
                round.purge_guesses(&removed);
            }
        }
        &self.players
    }

    /// Appends a new round and makes it the current one
    pub fn add_round(
        &mut self,
        map: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Result<RoundId, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions { width, height });
        }

        let round = RoundRecord::new(map.into(), width, height);
        let id = round.id().clone();
        self.rounds.push(round);
        self.current_round_index = self.rounds.len() - 1;
        Ok(id)
    }

    /// Sets or overwrites a round's answer. Points outside the map are allowed.
    pub fn set_answer(&mut self, round_id: &str, point: Point) -> Result<Point, GameError> {
        let round = self.round_mut(round_id)?;
        round.set_answer(point);
        Ok(point)
    }

    /// Records (or replaces) a player's guess for an answered round
    pub fn record_guess(
        &mut self,
        round_id: &str,
        player: &str,
        point: Point,
    ) -> Result<&BTreeMap<String, Point>, GameError> {
        let index = self.position_of(round_id)?;
        let player = self
            .find_player(player)
            .ok_or_else(|| GameError::UnknownPlayer(player.trim().to_string()))?
            .to_string();

        let round = &mut self.rounds[index];
        if !round.has_answer() {
            return Err(GameError::AnswerNotSet(round_id.to_string()));
        }

        round.put_guess(player, point);
        Ok(round.guesses())
    }

    /// Moves the cursor; unlike [`GameSession::current_round`] this rejects bad input
    pub fn goto_round(&mut self, index: i64) -> Result<(), GameError> {
        let out_of_range = || GameError::RoundIndexOutOfRange {
            index,
            round_count: self.rounds.len(),
        };
        let index = usize::try_from(index).map_err(|_| out_of_range())?;
        if index >= self.rounds.len() {
            return Err(out_of_range());
        }

        self.current_round_index = index;
        Ok(())
    }

    /// Clears players, rounds and the cursor
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The round at the clamped cursor, or `None` when there are no rounds
    pub fn current_round(&self) -> Option<&RoundRecord> {
        let last = self.rounds.len().checked_sub(1)?;
        self.rounds.get(self.current_round_index.min(last))
    }

    pub fn round(&self, round_id: &str) -> Result<&RoundRecord, GameError> {
        self.rounds
            .iter()
            .find(|r| r.id().as_str() == round_id)
            .ok_or_else(|| GameError::RoundNotFound(round_id.to_string()))
    }

    pub fn round_state(&self, round_id: &str) -> Result<RoundState, GameError> {
        let round = self.round(round_id)?;
        Ok(RoundState {
            players: self.players.clone(),
            guesses: round.guesses().clone(),
        })
    }

    /// Position, neighbours and map details of a round
    pub fn round_view(&self, round_id: &str) -> Result<RoundView, GameError> {
        let index = self.position_of(round_id)?;
        let round = &self.rounds[index];
        let neighbour = |i: Option<usize>| {
            i.and_then(|i| self.rounds.get(i))
                .map(|r| r.id().clone())
        };

        Ok(RoundView {
            round_id: round.id().clone(),
            number: index + 1,
            total_rounds: self.rounds.len(),
            map: round.map().to_string(),
            width: round.width(),
            height: round.height(),
            prev_round_id: neighbour(index.checked_sub(1)),
            next_round_id: neighbour(Some(index + 1)),
            answer_set: round.has_answer(),
        })
    }

    pub fn overview(&self) -> GameOverview {
        let rounds = self
            .rounds
            .iter()
            .enumerate()
            .map(|(i, r)| RoundSummary {
                round_id: r.id().clone(),
                number: i + 1,
                map: r.map().to_string(),
                width: r.width(),
                height: r.height(),
                answer_set: r.has_answer(),
                guess_count: r.guesses().len(),
            })
            .collect();

        GameOverview {
            players: self.players.clone(),
            rounds,
            current_round_index: self.current_round_index,
            current_round_id: self.current_round().map(|r| r.id().clone()),
        }
    }

    fn position_of(&self, round_id: &str) -> Result<usize, GameError> {
        self.rounds
            .iter()
            .position(|r| r.id().as_str() == round_id)
            .ok_or_else(|| GameError::RoundNotFound(round_id.to_string()))
    }

    fn round_mut(&mut self, round_id: &str) -> Result<&mut RoundRecord, GameError> {
        let index = self.position_of(round_id)?;
        Ok(&mut self.rounds[index])
    }
}
