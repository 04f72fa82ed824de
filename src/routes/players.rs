use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use sqlx::sqlite::SqlitePool;
use crate::db;
use crate::error::ApiError;
use crate::models::{Player, PlayerPayload};
use crate::validation::validate_player;

// GET /players - List all players with their skills
pub async fn get_players(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = db::get_all_players(&pool).await?;

    Ok(Json(players))
}

// GET /players/{id} - Get player by ID
pub async fn get_player_by_id(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<i64>,
) -> Result<Json<Player>, ApiError> {
    let player = db::get_player_by_id(&pool, player_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(player))
}

// POST /players - Create a player, answering with its location
pub async fn create_player(
    State(pool): State<SqlitePool>,
    payload: Result<Json<PlayerPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let new_player = validate_player(&payload)?;

    let player = db::create_player(&pool, &new_player).await?;
    tracing::info!("created player {}", player.id);

    let location = format!("/players/{}", player.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(player)))
}

// PUT /players/{id} - Replace name and position, reconcile skills
pub async fn update_player(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<i64>,
    payload: Result<Json<PlayerPayload>, JsonRejection>,
) -> Result<Json<Player>, ApiError> {
    let Json(payload) = payload?;
    let update = validate_player(&payload)?;

    let player = match db::update_player(&pool, player_id, &update).await? {
        Some(player) => player,
        None => {
            tracing::debug!("update of missing player {}", player_id);
            return Err(ApiError::NotFound);
        }
    };
    tracing::info!("updated player {}", player_id);

    Ok(Json(player))
}

// DELETE /players/{id} - Remove a player and its skills
pub async fn delete_player(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !db::delete_player(&pool, player_id).await? {
        tracing::debug!("delete of missing player {}", player_id);
        return Err(ApiError::NotFound);
    }
    tracing::info!("deleted player {}", player_id);

    Ok(StatusCode::OK)
}
