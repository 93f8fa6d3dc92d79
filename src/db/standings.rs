use sqlx::sqlite::SqliteExecutor;

use crate::logic::{error::Result, standings::StandingsRow};

impl StandingsRow {
    // Every team of the division with its stats, zeroes if it has not played.
    pub async fn fetch_division(db: impl SqliteExecutor<'_>, division: &str) -> Result<Vec<Self>> {
        let rows = sqlx::query_as(
            "SELECT teams.team_id, teams.team_name, teams.division,
            COALESCE(team_stats.games_played, 0) AS games_played,
            COALESCE(team_stats.wins, 0) AS wins,
            COALESCE(team_stats.draws, 0) AS draws,
            COALESCE(team_stats.losses, 0) AS losses,
            COALESCE(team_stats.goals_for, 0) AS goals_for,
            COALESCE(team_stats.goals_against, 0) AS goals_against,
            COALESCE(team_stats.points, 0) AS points
            FROM teams
            LEFT JOIN team_stats ON team_stats.team_id = teams.team_id
            WHERE teams.division = $1
            ORDER BY teams.rowid ASC"
        ).bind(division)
        .fetch_all(db).await?;

        Ok(rows)
    }
}
