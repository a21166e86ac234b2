use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::AppConfig;
use crate::game;
use crate::shared::AppState;

/// Builds the full application router
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    let api = Router::new()
        .route("/game", get(game::game_overview))
        .route("/players", post(game::add_player))
        .route("/players/remove", post(game::remove_player))
        .route("/rounds", post(game::add_round))
        .route("/rounds/:round_id", get(game::round_view))
        .route("/rounds/:round_id/state", get(game::round_state))
        .route("/rounds/:round_id/answer", post(game::set_answer))
        .route("/goto_round", post(game::goto_round))
        .route("/guess", post(game::record_guess))
        .route("/reset", post(game::reset_game))
        .route("/leaderboard", get(game::leaderboard));

    Router::new()
        .route("/", get(|| async { "pinpoint is running" }))
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(&config.upload_dir))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
