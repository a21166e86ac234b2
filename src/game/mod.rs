// Public API
pub use errors::GameError;
pub use handlers::{
    add_player, add_round, game_overview, goto_round, leaderboard, record_guess, remove_player,
    reset_game, round_state, round_view, set_answer,
};
pub use leaderboard::{Leaderboard, PlayerRoundResult, PlayerTotal, RoundBreakdown, RoundResult};
pub use models::{fold_name, names_match, Point, RoundId, RoundRecord};
pub use service::GameService;
pub use session::GameSession;

// Internal modules
mod errors;
mod handlers;
pub mod leaderboard;
pub mod models;
pub mod scoring;
mod service;
mod session;
pub mod types;
