use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use sqlx::sqlite::SqlitePool;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: &'static str,
    timestamp: i64,
}

// GET /health - Liveness plus a round trip to the database
pub async fn health_check(
    State(pool): State<SqlitePool>,
) -> (StatusCode, Json<HealthResponse>) {
    let reachable = match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => true,
        Err(err) => {
            tracing::error!("health check failed: {}", err);
            false
        }
    };

    let (status, status_text, database) = if reachable {
        (StatusCode::OK, "ok", "up")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable", "down")
    };

    let response = HealthResponse {
        status: status_text,
        database,
        timestamp: chrono::Utc::now().timestamp(),
    };

    (status, Json(response))
}
