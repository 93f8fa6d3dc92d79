use sqlx::{SqliteConnection, sqlite::SqliteExecutor};

use crate::logic::{error::Result, fixture::{Fixture, NewFixture}, types::{FixtureId, GameWeek}};

impl Fixture {
    pub const SELECT_QUERY: &str = "
    SELECT fixture_id, division, game_week, home_team_id, away_team_id, created_at, deadline, state
    FROM fixtures";

    // The highest game week created for the division, 0 if none.
    pub async fn last_game_week(db: impl SqliteExecutor<'_>, division: &str) -> Result<GameWeek> {
        let week: Option<GameWeek> = sqlx::query_scalar(
            "SELECT MAX(game_week) FROM fixtures
            WHERE division = $1"
        ).bind(division)
        .fetch_one(db).await?;

        Ok(week.unwrap_or(0))
    }

    // Find the fixture with exactly this home and away team.
    pub async fn find(db: impl SqliteExecutor<'_>, division: &str, game_week: GameWeek, home_team_id: &str, away_team_id: &str) -> Result<Option<Self>> {
        let query = Self::SELECT_QUERY;
        let fixture = sqlx::query_as(format!("
            {query}
            WHERE division = $1 AND game_week = $2 AND home_team_id = $3 AND away_team_id = $4"
        ).as_str())
        .bind(division)
        .bind(game_week)
        .bind(home_team_id)
        .bind(away_team_id)
        .fetch_optional(db).await?;

        Ok(fixture)
    }

    pub async fn fetch_week(db: impl SqliteExecutor<'_>, division: &str, game_week: GameWeek) -> Result<Vec<Self>> {
        let query = Self::SELECT_QUERY;
        let fixtures = sqlx::query_as(format!("
            {query}
            WHERE division = $1 AND game_week = $2
            ORDER BY fixture_id ASC"
        ).as_str())
        .bind(division)
        .bind(game_week)
        .fetch_all(db).await?;

        Ok(fixtures)
    }

    pub async fn fetch_pending(db: impl SqliteExecutor<'_>, division: &str) -> Result<Vec<Self>> {
        let query = Self::SELECT_QUERY;
        let fixtures = sqlx::query_as(format!("
            {query}
            WHERE division = $1 AND state = 'pending'
            ORDER BY game_week ASC, fixture_id ASC"
        ).as_str())
        .bind(division)
        .fetch_all(db).await?;

        Ok(fixtures)
    }

    // Flip a pending fixture to completed. Return None if no pending fixture matched.
    // Checking and setting the state is one statement.
    pub async fn mark_completed(conn: &mut SqliteConnection, division: &str, game_week: GameWeek, home_team_id: &str, away_team_id: &str) -> Result<Option<FixtureId>> {
        let id = sqlx::query_scalar(
            "UPDATE fixtures SET state = 'completed'
            WHERE division = $1 AND game_week = $2 AND home_team_id = $3 AND away_team_id = $4
            AND state = 'pending'
            RETURNING fixture_id"
        ).bind(division)
        .bind(game_week)
        .bind(home_team_id)
        .bind(away_team_id)
        .fetch_optional(conn).await?;

        Ok(id)
    }
}

impl NewFixture<'_> {
    // Store the fixture unless the same pairing already exists for the week.
    // Return how many rows were inserted.
    pub async fn insert_or_ignore(&self, conn: &mut SqliteConnection) -> Result<u64> {
        let done = sqlx::query(
            "INSERT OR IGNORE INTO fixtures
            (division, game_week, home_team_id, away_team_id, created_at, deadline, state)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')"
        ).bind(self.division)
        .bind(self.game_week)
        .bind(self.home_team_id)
        .bind(self.away_team_id)
        .bind(self.created_at)
        .bind(self.deadline)
        .execute(conn).await?;

        Ok(done.rows_affected())
    }
}
