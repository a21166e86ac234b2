use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// A location in image pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Opaque round token. Generated once per round and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(String);

impl RoundId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoundId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Folds a display name into its identity key (trimmed, full Unicode case folding)
pub fn fold_name(name: &str) -> String {
    caseless::default_case_fold_str(name.trim())
}

/// Whether two display names refer to the same player
pub fn names_match(a: &str, b: &str) -> bool {
    fold_name(a) == fold_name(b)
}

/// One round: a map, its hidden answer, and the guesses made against it
#[derive(Debug, Clone, Serialize)]
pub struct RoundRecord {
    id: RoundId,
    map: String, // Stored filename owned by the map storage
    width: u32,
    height: u32,
    answer: Option<Point>,
    guesses: BTreeMap<String, Point>, // Registered player name -> guess
}

impl RoundRecord {
    /// Creates an unanswered round with a fresh token
    pub fn new(map: String, width: u32, height: u32) -> Self {
        Self {
            id: RoundId::generate(),
            map,
            width,
            height,
            answer: None,
            guesses: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &RoundId {
        &self.id
    }

    pub fn map(&self) -> &str {
        &self.map
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn answer(&self) -> Option<Point> {
        self.answer
    }

    pub fn has_answer(&self) -> bool {
        self.answer.is_some()
    }

    pub fn guesses(&self) -> &BTreeMap<String, Point> {
        &self.guesses
    }

    pub fn guess_of(&self, player: &str) -> Option<Point> {
        self.guesses.get(player).copied()
    }

    pub(crate) fn set_answer(&mut self, point: Point) {
        self.answer = Some(point);
    }

    pub(crate) fn put_guess(&mut self, player: String, point: Point) {
        self.guesses.insert(player, point);
    }

    /// Drops every guess whose key fold-equals `player`
    pub(crate) fn purge_guesses(&mut self, player: &str) {
        self.guesses.retain(|name, _| !names_match(name, player));
    }
}
