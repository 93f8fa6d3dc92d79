// Fixtures and the scheduler that creates them one game week at a time.
pub mod round_robin;

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use sqlx::FromRow;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{db, logic::{audit::{AuditEvent, AuditSink}, auth::Caller, config::LeagueConfig, error::{LeagueError, Result}, team::Team, types::{Db, DivisionId, FixtureId, GameWeek, TeamId}}};

// A fixture is pending until its result is submitted, and then never again.
#[derive(Debug, Serialize)]
#[derive(PartialEq, Eq)]
#[derive(Default, Clone, Copy)]
#[derive(sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FixtureState {
    #[default]
    Pending,
    Completed,
}

impl FixtureState {
    // The only legal transition.
    pub fn complete(self, fixture_id: FixtureId) -> Result<Self> {
        match self {
            Self::Pending => Ok(Self::Completed),
            Self::Completed => Err(LeagueError::AlreadySubmitted(fixture_id)),
        }
    }
}

#[derive(Debug, Serialize)]
#[derive(PartialEq)]
#[derive(Clone)]
#[derive(FromRow)]
pub struct Fixture {
    pub fixture_id: FixtureId,
    pub division: DivisionId,
    pub game_week: GameWeek,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub created_at: OffsetDateTime,
    pub deadline: OffsetDateTime,
    pub state: FixtureState,
}

impl Fixture {
    pub fn is_completed(&self) -> bool {
        self.state == FixtureState::Completed
    }

    // Deadlines are for display only, results are accepted after them too.
    pub fn is_overdue(&self, now: OffsetDateTime) -> bool {
        !self.is_completed() && now > self.deadline
    }

    pub fn package(&self) -> serde_json::Value {
        json!({
            "id": self.fixture_id,
            "division": self.division,
            "game_week": self.game_week,
            "home": self.home_team_id,
            "away": self.away_team_id,
            "deadline": self.deadline.format(&Rfc3339).ok(),
            "state": self.state,
        })
    }
}

// The pairings of a week that have not been stored yet.
#[derive(Debug, Clone)]
pub struct NewFixture<'a> {
    pub division: &'a str,
    pub game_week: GameWeek,
    pub home_team_id: &'a str,
    pub away_team_id: &'a str,
    pub created_at: OffsetDateTime,
    pub deadline: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundSummary {
    pub division: DivisionId,
    pub game_week: GameWeek,
    pub pairings: Vec<(TeamId, TeamId)>,
    pub fixtures_created: u64,
    pub deadline: OffsetDateTime,
}

// Owns fixture creation.
#[derive(Clone)]
pub struct FixtureScheduler {
    db: Db,
    config: Arc<LeagueConfig>,
    audit: Arc<dyn AuditSink>,
}

impl FixtureScheduler {
    pub fn build(db: Db, config: Arc<LeagueConfig>, audit: Arc<dyn AuditSink>) -> Self {
        Self { db, config, audit }
    }

    // Create the fixtures of the division's next game week.
    pub async fn generate_next_round(&self, caller: &Caller, division: &str) -> Result<RoundSummary> {
        self.config.require_division(caller, division)?;

        let mut tx = db::begin_write(&self.db).await?;

        let team_ids: Vec<TeamId> = Team::fetch_division(&mut *tx, division).await?
            .into_iter()
            .map(|t| t.team_id)
            .collect();

        if team_ids.len() < 2 {
            return Err(LeagueError::InsufficientTeams { division: division.to_string(), count: team_ids.len() });
        }

        // Past the last round of the cycle there is nothing left to pair.
        let game_week = Fixture::last_game_week(&mut *tx, division).await? + 1;
        if game_week as usize > round_robin::rounds_in_cycle(team_ids.len()) {
            return Err(LeagueError::EmptyRound { division: division.to_string(), game_week });
        }

        let pairings = round_robin::round_pairings(&team_ids, game_week as usize);
        if pairings.is_empty() {
            return Err(LeagueError::EmptyRound { division: division.to_string(), game_week });
        }

        let created_at = OffsetDateTime::now_utc();
        let deadline = created_at + self.config.deadline_length();

        let mut fixtures_created = 0;
        for (home, away) in pairings.iter() {
            let fixture = NewFixture {
                division,
                game_week,
                home_team_id: home,
                away_team_id: away,
                created_at,
                deadline,
            };
            fixtures_created += fixture.insert_or_ignore(&mut *tx).await?;
        }

        tx.commit().await?;

        log::info!("{} created {fixtures_created} fixture(s) for {division} game week {game_week}", caller.user_id);
        self.audit.record(&AuditEvent::RoundCreated {
            by: caller.user_id.clone(),
            division: division.to_string(),
            game_week,
            fixtures: fixtures_created,
        });

        Ok(RoundSummary {
            division: division.to_string(),
            game_week,
            pairings,
            fixtures_created,
            deadline,
        })
    }

    pub async fn fixtures_for_week(&self, division: &str, game_week: GameWeek) -> Result<Vec<Fixture>> {
        self.config.division(division)?;
        Fixture::fetch_week(&self.db, division, game_week).await
    }

    pub async fn pending_fixtures(&self, division: &str) -> Result<Vec<Fixture>> {
        self.config.division(division)?;
        Fixture::fetch_pending(&self.db, division).await
    }
}
