use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::{
    errors::GameError,
    leaderboard::Leaderboard,
    models::{Point, RoundId},
    session::GameSession,
    types::{GameOverview, RoundState, RoundView},
};

/// Owner of the single game session.
///
/// Mutations hold the write lock for their whole duration, so readers
/// (including leaderboard builds) never observe a half-applied change.
/// Cloning shares the same session.
#[derive(Clone, Default)]
pub struct GameService {
    session: Arc<RwLock<GameSession>>,
}

impl GameService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing session, mostly useful for seeding tests
    pub fn with_session(session: GameSession) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
        }
    }

    #[instrument(skip(self))]
    pub async fn add_player(&self, name: &str) -> Result<Vec<String>, GameError> {
        let mut session = self.session.write().await;
        match session.add_player(name) {
            Ok(players) => {
                info!(player_count = players.len(), "Player added");
                Ok(players.to_vec())
            }
            Err(error) => {
                warn!(%error, "Player rejected");
                Err(error)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_player(&self, name: &str) -> Vec<String> {
        let mut session = self.session.write().await;
        let before = session.players().len();
        let players = session.remove_player(name).to_vec();

        if players.len() < before {
            info!(player_count = players.len(), "Player removed");
        } else {
            debug!("No matching player to remove");
        }
        players
    }

    #[instrument(skip(self))]
    pub async fn add_round(&self, map: &str, width: u32, height: u32) -> Result<RoundId, GameError> {
        let mut session = self.session.write().await;
        let round_id = session.add_round(map, width, height)?;

        info!(
            round_id = %round_id,
            round_count = session.rounds().len(),
            "Round added"
        );
        Ok(round_id)
    }

    #[instrument(skip(self))]
    pub async fn set_answer(&self, round_id: &str, point: Point) -> Result<Point, GameError> {
        let mut session = self.session.write().await;
        let answer = session.set_answer(round_id, point)?;

        info!(x = answer.x, y = answer.y, "Answer set");
        Ok(answer)
    }

    #[instrument(skip(self))]
    pub async fn record_guess(
        &self,
        round_id: &str,
        player: &str,
        point: Point,
    ) -> Result<BTreeMap<String, Point>, GameError> {
        let mut session = self.session.write().await;
        match session.record_guess(round_id, player, point) {
            Ok(guesses) => {
                debug!(guess_count = guesses.len(), "Guess recorded");
                Ok(guesses.clone())
            }
            Err(error) => {
                warn!(%error, "Guess rejected");
                Err(error)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn goto_round(&self, index: i64) -> Result<usize, GameError> {
        let mut session = self.session.write().await;
        session.goto_round(index)?;

        info!(current_round_index = index, "Current round changed");
        Ok(session.current_round_index())
    }

    #[instrument(skip(self))]
    pub async fn reset(&self) {
        let mut session = self.session.write().await;
        session.reset();
        info!("Game reset");
    }

    pub async fn round_state(&self, round_id: &str) -> Result<RoundState, GameError> {
        self.session.read().await.round_state(round_id)
    }

    pub async fn round_view(&self, round_id: &str) -> Result<RoundView, GameError> {
        self.session.read().await.round_view(round_id)
    }

    pub async fn overview(&self) -> GameOverview {
        self.session.read().await.overview()
    }

    pub async fn players(&self) -> Vec<String> {
        self.session.read().await.players().to_vec()
    }

    /// Builds the leaderboard together with the player list and current
    /// round id from one consistent snapshot
    #[instrument(skip(self))]
    pub async fn leaderboard(&self) -> (Leaderboard, Vec<String>, Option<RoundId>) {
        let session = self.session.read().await;
        let leaderboard = Leaderboard::build(&session);
        debug!(
            scored_rounds = leaderboard.rounds.len(),
            "Leaderboard computed"
        );

        (
            leaderboard,
            session.players().to_vec(),
            session.current_round().map(|r| r.id().clone()),
        )
    }
}
