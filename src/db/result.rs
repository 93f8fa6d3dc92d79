use sqlx::{SqliteConnection, sqlite::SqliteExecutor};

use crate::{db::unique_violation, logic::{error::{LeagueError, Result}, result::{MatchResult, StatDelta, TeamStats}, types::FixtureId}};

impl MatchResult {
    pub async fn fetch_optional(db: impl SqliteExecutor<'_>, fixture_id: FixtureId) -> Result<Option<Self>> {
        let result = sqlx::query_as(
            "SELECT fixture_id, home_score, away_score, home_points, away_points, submitted_at, corrected_at
            FROM results
            WHERE fixture_id = $1"
        ).bind(fixture_id)
        .fetch_optional(db).await?;

        Ok(result)
    }

    // Save the first result of a fixture.
    pub async fn insert(&self, conn: &mut SqliteConnection) -> Result<()> {
        let outcome = sqlx::query(
            "INSERT INTO results
            (fixture_id, home_score, away_score, home_points, away_points, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6)"
        ).bind(self.fixture_id)
        .bind(self.home_score)
        .bind(self.away_score)
        .bind(self.home_points)
        .bind(self.away_points)
        .bind(self.submitted_at)
        .execute(conn).await;

        match outcome {
            Ok(_) => Ok(()),
            Err(e) if unique_violation(&e).is_some() => Err(LeagueError::AlreadySubmitted(self.fixture_id)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn overwrite(&self, conn: &mut SqliteConnection) -> Result<()> {
        sqlx::query(
            "UPDATE results SET
            home_score = $1, away_score = $2,
            home_points = $3, away_points = $4,
            corrected_at = $5
            WHERE fixture_id = $6"
        ).bind(self.home_score)
        .bind(self.away_score)
        .bind(self.home_points)
        .bind(self.away_points)
        .bind(self.corrected_at)
        .bind(self.fixture_id)
        .execute(conn).await?;

        Ok(())
    }
}

impl TeamStats {
    pub async fn fetch_optional(db: impl SqliteExecutor<'_>, team_id: &str) -> Result<Option<Self>> {
        let stats = sqlx::query_as(
            "SELECT team_id, games_played, wins, draws, losses, goals_for, goals_against, points FROM team_stats
            WHERE team_id = $1"
        ).bind(team_id)
        .fetch_optional(db).await?;

        Ok(stats)
    }

    // Add a delta to the team's stats, creating the row on the first result.
    pub async fn apply(conn: &mut SqliteConnection, team_id: &str, delta: &StatDelta) -> Result<()> {
        sqlx::query(
            "INSERT INTO team_stats
            (team_id, games_played, wins, draws, losses, goals_for, goals_against, points)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (team_id) DO UPDATE SET
            games_played = games_played + excluded.games_played,
            wins = wins + excluded.wins, draws = draws + excluded.draws, losses = losses + excluded.losses,
            goals_for = goals_for + excluded.goals_for, goals_against = goals_against + excluded.goals_against,
            points = points + excluded.points"
        ).bind(team_id)
        .bind(delta.games_played)
        .bind(delta.wins)
        .bind(delta.draws)
        .bind(delta.losses)
        .bind(delta.goals_for)
        .bind(delta.goals_against)
        .bind(delta.points)
        .execute(conn).await?;

        Ok(())
    }

    // Take a previously applied delta back.
    pub async fn revert(conn: &mut SqliteConnection, team_id: &str, delta: &StatDelta) -> Result<()> {
        sqlx::query(
            "UPDATE team_stats SET
            games_played = games_played - $1,
            wins = wins - $2, draws = draws - $3, losses = losses - $4,
            goals_for = goals_for - $5, goals_against = goals_against - $6,
            points = points - $7
            WHERE team_id = $8"
        ).bind(delta.games_played)
        .bind(delta.wins)
        .bind(delta.draws)
        .bind(delta.losses)
        .bind(delta.goals_for)
        .bind(delta.goals_against)
        .bind(delta.points)
        .bind(team_id)
        .execute(conn).await?;

        Ok(())
    }
}
