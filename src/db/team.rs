use sqlx::{Sqlite, SqliteConnection, Transaction, sqlite::SqliteExecutor};

use crate::{db::unique_violation, logic::{error::{LeagueError, Result}, team::{DivisionSelector, RemovalReport, Team, TeamSelector}}};

impl Team {
    pub async fn fetch_optional(db: impl SqliteExecutor<'_>, team_id: &str) -> Result<Option<Self>> {
        let team = sqlx::query_as(
            "SELECT team_id, team_name, division FROM teams
            WHERE team_id = $1"
        ).bind(team_id)
        .fetch_optional(db).await?;

        Ok(team)
    }

    // Fetch ALL teams from the database.
    pub async fn fetch_all(db: impl SqliteExecutor<'_>) -> Result<Vec<Self>> {
        let teams = sqlx::query_as(
            "SELECT team_id, team_name, division FROM teams
            ORDER BY rowid ASC"
        ).fetch_all(db).await?;

        Ok(teams)
    }

    // Teams of a division in registration order.
    pub async fn fetch_division(db: impl SqliteExecutor<'_>, division: &str) -> Result<Vec<Self>> {
        let teams = sqlx::query_as(
            "SELECT team_id, team_name, division FROM teams
            WHERE division = $1
            ORDER BY rowid ASC"
        ).bind(division)
        .fetch_all(db).await?;

        Ok(teams)
    }

    // Teams among the given role IDs.
    pub async fn fetch_with_ids(db: impl SqliteExecutor<'_>, ids: &[&str]) -> Result<Vec<Self>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders: Vec<String> = (1..=ids.len()).map(|i| format!("${i}")).collect();
        let query = format!(
            "SELECT team_id, team_name, division FROM teams
            WHERE team_id IN ({})
            ORDER BY rowid ASC",
        placeholders.join(", "));

        let mut statement = sqlx::query_as(&query);
        for id in ids {
            statement = statement.bind(*id);
        }

        Ok(statement.fetch_all(db).await?)
    }

    // Whether the name is in use in the division, optionally ignoring one team.
    pub async fn name_taken(db: impl SqliteExecutor<'_>, name: &str, division: &str, except: Option<&str>) -> Result<bool> {
        let taken = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM teams
                WHERE team_name = $1 AND division = $2 AND team_id IS NOT $3
            )"
        ).bind(name)
        .bind(division)
        .bind(except)
        .fetch_one(db).await?;

        Ok(taken)
    }

    // Insert the team unless its division is already full.
    // The capacity check and the insert are a single statement.
    pub async fn insert_within_capacity(&self, conn: &mut SqliteConnection, capacity: u32) -> Result<bool> {
        let outcome = sqlx::query(
            "INSERT INTO teams (team_id, team_name, division)
            SELECT $1, $2, $3
            WHERE (SELECT COUNT(*) FROM teams WHERE division = $3) < $4"
        ).bind(&self.team_id)
        .bind(&self.team_name)
        .bind(&self.division)
        .bind(capacity)
        .execute(conn).await;

        match outcome {
            Ok(done) => Ok(done.rows_affected() == 1),
            Err(e) => Err(self.classify_conflict(e)),
        }
    }

    // Turn a UNIQUE violation into the matching league error.
    fn classify_conflict(&self, err: sqlx::Error) -> LeagueError {
        match unique_violation(&err) {
            Some(message) if message.contains("teams.team_name") => LeagueError::DuplicateName {
                name: self.team_name.clone(),
                division: self.division.clone(),
            },
            Some(_) => LeagueError::DuplicateIdentifier {
                team_id: self.team_id.clone(),
                division: self.division.clone(),
            },
            None => err.into(),
        }
    }

    pub async fn rename(db: impl SqliteExecutor<'_>, team_id: &str, name: &str) -> Result<()> {
        sqlx::query(
            "UPDATE teams SET team_name = $1
            WHERE team_id = $2"
        ).bind(name)
        .bind(team_id)
        .execute(db).await?;

        Ok(())
    }

    // Delete the selected teams. Their fixtures, results and stats go with them.
    pub async fn delete_selected(tx: &mut Transaction<'_, Sqlite>, target: &TeamSelector, scope: &DivisionSelector) -> Result<RemovalReport> {
        let (filter, binds): (&str, Vec<&str>) = match (target, scope) {
            (TeamSelector::One(team_id), DivisionSelector::One(division)) => ("WHERE team_id = $1 AND division = $2", vec![team_id.as_str(), division.as_str()]),
            (TeamSelector::One(team_id), DivisionSelector::All) => ("WHERE team_id = $1", vec![team_id.as_str()]),
            (TeamSelector::All, DivisionSelector::One(division)) => ("WHERE division = $1", vec![division.as_str()]),
            (TeamSelector::All, DivisionSelector::All) => ("", Vec::new()),
        };

        let select = format!("SELECT team_id, team_name, division FROM teams {filter} ORDER BY rowid ASC");
        let mut statement = sqlx::query_as(&select);
        for value in binds.iter() {
            statement = statement.bind(*value);
        }
        let teams: Vec<Team> = statement.fetch_all(&mut **tx).await?;

        if teams.is_empty() {
            return Ok(RemovalReport::default());
        }

        let fixtures_before = count_fixtures(&mut **tx).await?;

        let delete = format!("DELETE FROM teams {filter}");
        let mut statement = sqlx::query(&delete);
        for value in binds.iter() {
            statement = statement.bind(*value);
        }
        statement.execute(&mut **tx).await?;

        let fixtures_after = count_fixtures(&mut **tx).await?;

        Ok(RemovalReport {
            teams,
            fixtures_removed: fixtures_before.saturating_sub(fixtures_after),
        })
    }
}

async fn count_fixtures(db: impl SqliteExecutor<'_>) -> Result<u64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fixtures")
        .fetch_one(db).await?;

    Ok(count.max(0) as u64)
}
