use axum::Router;
use image::{DynamicImage, ImageOutputFormat, RgbImage};
use std::io::Cursor;
use std::sync::Arc;

use pinpoint::{build_router, AppConfig, AppState, GameService, InMemoryMapStorage};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

#[allow(dead_code)] // Not every test reads every field
pub struct TestSetup {
    pub app: Router,
    pub game: GameService,
    pub map_storage: Arc<InMemoryMapStorage>,
    pub players: Vec<String>,
}

pub struct TestSetupBuilder {
    players: Vec<String>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { players: vec![] }
    }

    pub fn with_players(mut self, players: Vec<&str>) -> Self {
        self.players = players.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_three_players(self) -> Self {
        self.with_players(vec!["Alice", "Bob", "Carol"])
    }

    pub async fn build(self) -> TestSetup {
        let game = GameService::new();
        let map_storage = Arc::new(InMemoryMapStorage::new());
        let state = AppState::new(game.clone(), map_storage.clone());
        let config = AppConfig {
            upload_dir: std::env::temp_dir(),
            ..AppConfig::default()
        };

        for player in &self.players {
            game.add_player(player).await.unwrap();
        }

        TestSetup {
            app: build_router(state, &config),
            game,
            map_storage,
            players: self.players,
        }
    }
}

/// Encodes a blank PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut bytes, ImageOutputFormat::Png)
        .unwrap();
    bytes.into_inner()
}
