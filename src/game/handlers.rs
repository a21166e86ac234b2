use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use tracing::{info, instrument};

use super::types::{
    parse_coordinate, parse_point, AddPlayerRequest, AddPlayerResponse, AddRoundResponse,
    GameOverview, GotoRoundRequest, GotoRoundResponse, GuessRequest, GuessesResponse,
    LeaderboardResponse, PlayersResponse, RemovePlayerRequest, ResetResponse, RoundState,
    RoundView, SetAnswerRequest, SetAnswerResponse,
};
use crate::maps::MapStorageError;
use crate::shared::{AppError, AppState};

/// Multipart field carrying the uploaded map
pub const MAP_FIELD: &str = "map_image";

/// HTTP handler for the host overview
///
/// GET /api/game
#[instrument(name = "game_overview", skip(state))]
pub async fn game_overview(State(state): State<AppState>) -> Json<GameOverview> {
    Json(state.game.overview().await)
}

/// HTTP handler for registering a player
///
/// POST /api/players
#[instrument(name = "add_player", skip(state))]
pub async fn add_player(
    State(state): State<AppState>,
    Json(request): Json<AddPlayerRequest>,
) -> Result<Json<AddPlayerResponse>, AppError> {
    let players = state.game.add_player(&request.name).await?;

    Ok(Json(AddPlayerResponse {
        players,
        added: request.name.trim().to_string(),
    }))
}

/// HTTP handler for removing a player and their guesses
///
/// POST /api/players/remove
#[instrument(name = "remove_player", skip(state))]
pub async fn remove_player(
    State(state): State<AppState>,
    Json(request): Json<RemovePlayerRequest>,
) -> Json<PlayersResponse> {
    let players = state.game.remove_player(&request.name).await;
    Json(PlayersResponse { players })
}

/// HTTP handler for uploading a map and opening a new round
///
/// POST /api/rounds (multipart, field `map_image`)
#[instrument(name = "add_round", skip(state, multipart))]
pub async fn add_round(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AddRoundResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(MAP_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) = upload.ok_or(MapStorageError::MissingFile)?;
    let stored = state.map_storage.store(&filename, &bytes).await?;
    let round_id = state
        .game
        .add_round(&stored.filename, stored.width, stored.height)
        .await?;

    info!(round_id = %round_id, map = %stored.filename, "Round created from upload");

    Ok(Json(AddRoundResponse {
        round_id,
        map: stored.filename,
        width: stored.width,
        height: stored.height,
    }))
}

/// HTTP handler for the player-facing view of a round
///
/// GET /api/rounds/:round_id
#[instrument(name = "round_view", skip(state))]
pub async fn round_view(
    State(state): State<AppState>,
    Path(round_id): Path<String>,
) -> Result<Json<RoundView>, AppError> {
    Ok(Json(state.game.round_view(&round_id).await?))
}

/// HTTP handler for players and guesses of a round
///
/// GET /api/rounds/:round_id/state
#[instrument(name = "round_state", skip(state))]
pub async fn round_state(
    State(state): State<AppState>,
    Path(round_id): Path<String>,
) -> Result<Json<RoundState>, AppError> {
    Ok(Json(state.game.round_state(&round_id).await?))
}

/// HTTP handler for setting a round's answer
///
/// POST /api/rounds/:round_id/answer
#[instrument(name = "set_answer", skip(state))]
pub async fn set_answer(
    State(state): State<AppState>,
    Path(round_id): Path<String>,
    Json(request): Json<SetAnswerRequest>,
) -> Result<Json<SetAnswerResponse>, AppError> {
    let point = parse_point(&request.x, &request.y)?;
    let answer = state.game.set_answer(&round_id, point).await?;

    Ok(Json(SetAnswerResponse {
        round_id: round_id.as_str().into(),
        answer,
    }))
}

/// HTTP handler for submitting a guess
///
/// POST /api/guess
#[instrument(name = "record_guess", skip(state))]
pub async fn record_guess(
    State(state): State<AppState>,
    Json(request): Json<GuessRequest>,
) -> Result<Json<GuessesResponse>, AppError> {
    let point = parse_point(&request.x, &request.y)?;
    let guesses = state
        .game
        .record_guess(&request.round_id, &request.player, point)
        .await?;

    Ok(Json(GuessesResponse { guesses }))
}

/// HTTP handler for moving the current round cursor
///
/// POST /api/goto_round
#[instrument(name = "goto_round", skip(state))]
pub async fn goto_round(
    State(state): State<AppState>,
    Json(request): Json<GotoRoundRequest>,
) -> Result<Json<GotoRoundResponse>, AppError> {
    let index = parse_coordinate("round_index", &request.round_index)?;
    let current_round_index = state.game.goto_round(index).await?;

    Ok(Json(GotoRoundResponse {
        current_round_index,
    }))
}

/// HTTP handler for starting over
///
/// POST /api/reset
#[instrument(name = "reset_game", skip(state))]
pub async fn reset_game(State(state): State<AppState>) -> Json<ResetResponse> {
    state.game.reset().await;
    Json(ResetResponse { reset: true })
}

/// HTTP handler for standings
///
/// GET /api/leaderboard
#[instrument(name = "leaderboard", skip(state))]
pub async fn leaderboard(State(state): State<AppState>) -> Json<LeaderboardResponse> {
    let (leaderboard, players, back_round_id) = state.game.leaderboard().await;

    Json(LeaderboardResponse {
        leaderboard,
        players,
        back_round_id,
    })
}
