// Library crate for the pinpoint game server
// This file exposes the public API for integration tests

pub mod config;
pub mod game;
pub mod maps;
pub mod routes;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use game::{GameError, GameService, GameSession, Leaderboard, Point, RoundId};
pub use maps::{DiskMapStorage, InMemoryMapStorage, MapStorage};
pub use routes::build_router;
pub use shared::{AppError, AppState};
