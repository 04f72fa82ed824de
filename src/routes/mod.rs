use axum::{routing::get, Router};
use sqlx::sqlite::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod health;
pub mod players;

/// Builds the full HTTP surface on top of a ready pool.
pub fn app(pool: SqlitePool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Player API - v1.0" }))
        .route("/health", get(health::health_check))

        // Player endpoints
        .route(
            "/players",
            get(players::get_players).post(players::create_player),
        )
        .route(
            "/players/{id}",
            get(players::get_player_by_id)
                .put(players::update_player)
                .delete(players::delete_player),
        )

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(pool)
}
