use pinpoint::{build_router, AppConfig, AppState, DiskMapStorage, GameService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinpoint=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    info!(?config, "Starting pinpoint game server");

    // One game per process, owned here and handed to every handler
    let map_storage = DiskMapStorage::create(&config.upload_dir).unwrap();
    let app_state = AppState::new(GameService::new(), Arc::new(map_storage));

    let app = build_router(app_state, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .unwrap();
    info!("Server running on http://{}", config.bind_addr());
    axum::serve(listener, app).await.unwrap();
}
