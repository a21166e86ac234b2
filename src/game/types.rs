use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::errors::GameError;
use super::leaderboard::Leaderboard;
use super::models::{Point, RoundId};

/// Request payload for registering a player
#[derive(Debug, Deserialize)]
pub struct AddPlayerRequest {
    pub name: String,
}

/// Request payload for removing a player
#[derive(Debug, Deserialize)]
pub struct RemovePlayerRequest {
    pub name: String,
}

/// Request payload for setting a round's answer.
/// Coordinates arrive loosely typed and are validated by [`parse_coordinate`].
#[derive(Debug, Deserialize)]
pub struct SetAnswerRequest {
    #[serde(default)]
    pub x: Value,
    #[serde(default)]
    pub y: Value,
}

/// Request payload for submitting a guess
#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    pub round_id: String,
    pub player: String,
    #[serde(default)]
    pub x: Value,
    #[serde(default)]
    pub y: Value,
}

/// Request payload for moving the current round cursor
#[derive(Debug, Deserialize)]
pub struct GotoRoundRequest {
    #[serde(default)]
    pub round_index: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddPlayerResponse {
    pub players: Vec<String>,
    pub added: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayersResponse {
    pub players: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddRoundResponse {
    pub round_id: RoundId,
    pub map: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetAnswerResponse {
    pub round_id: RoundId,
    pub answer: Point,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GuessesResponse {
    pub guesses: BTreeMap<String, Point>,
}

/// Players plus the guesses recorded for one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub players: Vec<String>,
    pub guesses: BTreeMap<String, Point>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GotoRoundResponse {
    pub current_round_index: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub reset: bool,
}

/// What a player's screen needs to show one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundView {
    pub round_id: RoundId,
    pub number: usize, // 1-based
    pub total_rounds: usize,
    pub map: String,
    pub width: u32,
    pub height: u32,
    pub prev_round_id: Option<RoundId>,
    pub next_round_id: Option<RoundId>,
    pub answer_set: bool,
}

/// Host-facing summary of a round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_id: RoundId,
    pub number: usize,
    pub map: String,
    pub width: u32,
    pub height: u32,
    pub answer_set: bool,
    pub guess_count: usize,
}

/// Host-facing snapshot of the whole game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOverview {
    pub players: Vec<String>,
    pub rounds: Vec<RoundSummary>,
    pub current_round_index: usize,
    pub current_round_id: Option<RoundId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    #[serde(flatten)]
    pub leaderboard: Leaderboard,
    pub players: Vec<String>,
    pub back_round_id: Option<RoundId>,
}

/// Validates a loosely typed coordinate from a request body.
///
/// Accepts JSON integers, floats with no fractional part and strings that
/// hold an integer. Everything else is `InvalidCoordinates`.
pub fn parse_coordinate(field: &str, value: &Value) -> Result<i64, GameError> {
    let invalid = || GameError::InvalidCoordinates(format!("{field} must be an integer"));

    match value {
        Value::Null => Err(GameError::InvalidCoordinates(format!("missing {field}"))),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            match number.as_f64() {
                Some(float) if float.fract() == 0.0 && float.abs() < i64::MAX as f64 => {
                    Ok(float as i64)
                }
                _ => Err(invalid()),
            }
        }
        Value::String(text) => text.trim().parse::<i64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// Parses an `(x, y)` pair into a [`Point`]
pub fn parse_point(x: &Value, y: &Value) -> Result<Point, GameError> {
    Ok(Point::new(parse_coordinate("x", x)?, parse_coordinate("y", y)?))
}
