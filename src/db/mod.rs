use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};
use crate::models::*;

const SCHEMA: &str = include_str!("schema.sql");

/// Opens the pool. Foreign keys are switched on for every connection so
/// deleting a player removes its skills.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);

    // An in-memory database lives only as long as one of its connections.
    if database_url.contains(":memory:") {
        pool_options = pool_options
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
    }

    pool_options.connect_with(options).await
}

/// Creates the tables if they do not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

// Player queries
pub async fn get_all_players(pool: &SqlitePool) -> Result<Vec<Player>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let mut players = sqlx::query_as::<_, Player>(
        r#"SELECT id, name, position FROM players ORDER BY id"#
    )
    .fetch_all(&mut *tx)
    .await?;

    let skills = sqlx::query_as::<_, PlayerSkill>(
        r#"SELECT id, player_id, skill, value FROM player_skills ORDER BY player_id, id"#
    )
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    let mut by_player: HashMap<i64, Vec<PlayerSkill>> = HashMap::new();
    for skill in skills {
        by_player.entry(skill.player_id).or_default().push(skill);
    }
    for player in &mut players {
        player.player_skills = by_player.remove(&player.id).unwrap_or_default();
    }

    Ok(players)
}

pub async fn get_player_by_id(pool: &SqlitePool, player_id: i64) -> Result<Option<Player>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let player = fetch_player(&mut tx, player_id).await?;
    tx.commit().await?;

    Ok(player)
}

/// Inserts the player and its skills as one unit of work.
pub async fn create_player(pool: &SqlitePool, new_player: &NewPlayer) -> Result<Player, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let player_id = sqlx::query(
        r#"INSERT INTO players (name, position) VALUES (?, ?)"#
    )
    .bind(&new_player.name)
    .bind(new_player.position)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for skill in &new_player.skills {
        insert_skill(&mut tx, player_id, skill).await?;
    }

    let player = fetch_player(&mut tx, player_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    tx.commit().await?;

    Ok(player)
}

/// Overwrites name and position and reconciles the skill set by skill name.
/// Returns `None` without writing anything when the player does not exist.
pub async fn update_player(
    pool: &SqlitePool,
    player_id: i64,
    update: &NewPlayer,
) -> Result<Option<Player>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let Some(existing) = fetch_player(&mut tx, player_id).await? else {
        return Ok(None);
    };

    sqlx::query(
        r#"UPDATE players SET name = ?, position = ? WHERE id = ?"#
    )
    .bind(&update.name)
    .bind(update.position)
    .bind(player_id)
    .execute(&mut *tx)
    .await?;

    let changes = reconcile_skills(&existing.player_skills, &update.skills);

    // Deletes go first so an insert never collides on (player_id, skill).
    for skill_id in &changes.delete {
        sqlx::query(r#"DELETE FROM player_skills WHERE id = ?"#)
            .bind(skill_id)
            .execute(&mut *tx)
            .await?;
    }

    for (skill_id, value) in &changes.update {
        sqlx::query(r#"UPDATE player_skills SET value = ? WHERE id = ?"#)
            .bind(value)
            .bind(skill_id)
            .execute(&mut *tx)
            .await?;
    }

    for skill in &changes.insert {
        insert_skill(&mut tx, player_id, skill).await?;
    }

    let player = fetch_player(&mut tx, player_id).await?;
    tx.commit().await?;

    Ok(player)
}

/// Returns false when there was no such player. Skills go with it through
/// the foreign key cascade.
pub async fn delete_player(pool: &SqlitePool, player_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM players WHERE id = ?"#)
        .bind(player_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Storage work needed to turn one skill set into another.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SkillChanges {
    /// Row ids of skills missing from the new set.
    pub delete: Vec<i64>,
    /// Row id and new value of skills present in both sets.
    pub update: Vec<(i64, i64)>,
    /// Skills with no existing row.
    pub insert: Vec<NewPlayerSkill>,
}

/// Matches skills by name: unmatched existing rows are deleted, matched ones
/// take the new value, unmatched new skills are inserted.
pub fn reconcile_skills(existing: &[PlayerSkill], desired: &[NewPlayerSkill]) -> SkillChanges {
    let mut changes = SkillChanges::default();

    for current in existing {
        if !desired.iter().any(|s| s.skill == current.skill) {
            changes.delete.push(current.id);
        }
    }

    for wanted in desired {
        match existing.iter().find(|s| s.skill == wanted.skill) {
            Some(current) => changes.update.push((current.id, wanted.value)),
            None => changes.insert.push(*wanted),
        }
    }

    changes
}

async fn fetch_player(conn: &mut SqliteConnection, player_id: i64) -> Result<Option<Player>, sqlx::Error> {
    let player = sqlx::query_as::<_, Player>(
        r#"SELECT id, name, position FROM players WHERE id = ?"#
    )
    .bind(player_id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(mut player) = player else {
        return Ok(None);
    };

    player.player_skills = sqlx::query_as::<_, PlayerSkill>(
        r#"SELECT id, player_id, skill, value FROM player_skills WHERE player_id = ? ORDER BY id"#
    )
    .bind(player_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(player))
}

async fn insert_skill(
    conn: &mut SqliteConnection,
    player_id: i64,
    skill: &NewPlayerSkill,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO player_skills (player_id, skill, value) VALUES (?, ?, ?)"#
    )
    .bind(player_id)
    .bind(skill.skill)
    .bind(skill.value)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
