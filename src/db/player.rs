use sqlx::sqlite::SqliteExecutor;

use crate::logic::{error::Result, player::{Player, PlayerStats, TopScorer}};

impl Player {
    pub async fn fetch_optional(db: impl SqliteExecutor<'_>, player_id: &str) -> Result<Option<Self>> {
        let player = sqlx::query_as(
            "SELECT player_id, player_name, team_id FROM players
            WHERE player_id = $1"
        ).bind(player_id)
        .fetch_optional(db).await?;

        Ok(player)
    }

    pub async fn fetch_team(db: impl SqliteExecutor<'_>, team_id: &str) -> Result<Vec<Self>> {
        let players = sqlx::query_as(
            "SELECT player_id, player_name, team_id FROM players
            WHERE team_id = $1
            ORDER BY player_name ASC"
        ).bind(team_id)
        .fetch_all(db).await?;

        Ok(players)
    }

    // Insert the player or move the existing row to the new team.
    pub async fn upsert(&self, db: impl SqliteExecutor<'_>) -> Result<()> {
        sqlx::query(
            "INSERT INTO players (player_id, player_name, team_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (player_id) DO UPDATE SET
            player_name = excluded.player_name,
            team_id = excluded.team_id"
        ).bind(&self.player_id)
        .bind(&self.player_name)
        .bind(&self.team_id)
        .execute(db).await?;

        Ok(())
    }

    // Unlink the player if it belongs to the team. None if it did not.
    pub async fn release(db: impl SqliteExecutor<'_>, player_id: &str, team_id: &str) -> Result<Option<Self>> {
        let player = sqlx::query_as(
            "UPDATE players SET team_id = NULL
            WHERE player_id = $1 AND team_id = $2
            RETURNING player_id, player_name, team_id"
        ).bind(player_id)
        .bind(team_id)
        .fetch_optional(db).await?;

        Ok(player)
    }
}

impl PlayerStats {
    pub async fn fetch_optional(db: impl SqliteExecutor<'_>, player_id: &str) -> Result<Option<Self>> {
        let stats = sqlx::query_as(
            "SELECT player_id, games_played, goals, assists, clean_sheets
            FROM player_stats
            WHERE player_id = $1"
        ).bind(player_id)
        .fetch_optional(db).await?;

        Ok(stats)
    }
}

impl TopScorer {
    pub async fn fetch_division(db: impl SqliteExecutor<'_>, division: &str, limit: u32) -> Result<Vec<Self>> {
        let scorers = sqlx::query_as(
            "SELECT players.player_id, players.player_name,
            teams.team_id, teams.team_name,
            player_stats.goals, player_stats.assists
            FROM player_stats
            INNER JOIN players ON players.player_id = player_stats.player_id
            INNER JOIN teams ON teams.team_id = players.team_id
            WHERE teams.division = $1
            ORDER BY player_stats.goals DESC, player_stats.assists DESC, players.player_name ASC
            LIMIT $2"
        ).bind(division)
        .bind(limit)
        .fetch_all(db).await?;

        Ok(scorers)
    }
}
