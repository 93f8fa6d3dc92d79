// Match results and the team stats they feed.
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::{db, logic::{audit::{AuditEvent, AuditSink}, auth::Caller, config::{LeagueConfig, PointsTable}, error::{LeagueError, Result}, fixture::Fixture, types::{Db, FixtureId, GameWeek, Points, Score, StatValue, TeamId}}};

#[derive(Debug, Serialize)]
#[derive(PartialEq, Eq)]
#[derive(Clone, Copy)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl Outcome {
    pub fn from_scores(home_score: Score, away_score: Score) -> Self {
        if home_score > away_score {
            Self::HomeWin
        }
        else if away_score > home_score {
            Self::AwayWin
        }
        else {
            Self::Draw
        }
    }
}

#[derive(Debug, Serialize)]
#[derive(PartialEq)]
#[derive(Clone)]
#[derive(FromRow)]
pub struct MatchResult {
    pub fixture_id: FixtureId,
    pub home_score: Score,
    pub away_score: Score,
    pub home_points: Points,
    pub away_points: Points,
    pub submitted_at: OffsetDateTime,
    pub corrected_at: Option<OffsetDateTime>,
}

impl MatchResult {
    pub fn outcome(&self) -> Outcome {
        Outcome::from_scores(self.home_score, self.away_score)
    }
}

// Accumulated stats of one team.
#[derive(Debug, Serialize)]
#[derive(PartialEq, Eq)]
#[derive(Default, Clone)]
#[derive(FromRow)]
pub struct TeamStats {
    pub team_id: TeamId,
    pub games_played: StatValue,
    pub wins: StatValue,
    pub draws: StatValue,
    pub losses: StatValue,
    pub goals_for: StatValue,
    pub goals_against: StatValue,
    pub points: Points,
}

// What one result adds to one team's stats.
#[derive(Debug, Serialize)]
#[derive(PartialEq, Eq)]
#[derive(Default, Clone, Copy)]
pub struct StatDelta {
    pub games_played: StatValue,
    pub wins: StatValue,
    pub draws: StatValue,
    pub losses: StatValue,
    pub goals_for: StatValue,
    pub goals_against: StatValue,
    pub points: Points,
}

impl StatDelta {
    // Get the home and away deltas of a result.
    pub fn from_scores(home_score: Score, away_score: Score, points: &PointsTable) -> (StatDelta, StatDelta) {
        let mut home = StatDelta {
            games_played: 1,
            goals_for: home_score.into(),
            goals_against: away_score.into(),
            ..Default::default()
        };
        let mut away = StatDelta {
            games_played: 1,
            goals_for: away_score.into(),
            goals_against: home_score.into(),
            ..Default::default()
        };

        match Outcome::from_scores(home_score, away_score) {
            Outcome::HomeWin => {
                home.wins = 1;
                home.points = points.win;
                away.losses = 1;
                away.points = points.loss;
            },
            Outcome::AwayWin => {
                away.wins = 1;
                away.points = points.win;
                home.losses = 1;
                home.points = points.loss;
            },
            Outcome::Draw => {
                home.draws = 1;
                away.draws = 1;
                home.points = points.draw;
                away.points = points.draw;
            },
        }

        return (home, away);
    }

    // The deltas a stored result applied, with the points it was awarded then.
    pub fn applied_by(result: &MatchResult) -> (StatDelta, StatDelta) {
        let (mut home, mut away) = Self::from_scores(result.home_score, result.away_score, &PointsTable::default());
        home.points = result.home_points;
        away.points = result.away_points;
        return (home, away);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultReceipt {
    pub fixture_id: FixtureId,
    pub outcome: Outcome,
    pub home: StatDelta,
    pub away: StatDelta,
}

impl ResultReceipt {
    pub fn package(&self) -> serde_json::Value {
        json!({
            "fixture_id": self.fixture_id,
            "outcome": self.outcome,
            "home_points": self.home.points,
            "away_points": self.away.points,
        })
    }
}

// Owns results and team stats.
#[derive(Clone)]
pub struct ResultLedger {
    db: Db,
    config: Arc<LeagueConfig>,
    audit: Arc<dyn AuditSink>,
}

impl ResultLedger {
    pub fn build(db: Db, config: Arc<LeagueConfig>, audit: Arc<dyn AuditSink>) -> Self {
        Self { db, config, audit }
    }

    fn check_request(&self, caller: &Caller, division: &str, game_week: GameWeek, home_team_id: &str, away_team_id: &str) -> Result<()> {
        self.config.require_division(caller, division)?;
        if game_week == 0 {
            return Err(LeagueError::InvalidGameWeek(game_week));
        }
        if home_team_id == away_team_id {
            return Err(LeagueError::SameTeam(home_team_id.to_string()));
        }

        Ok(())
    }

    // Record the result of a pending fixture and update both teams' stats.
    pub async fn submit_result(
        &self, caller: &Caller, division: &str, game_week: GameWeek,
        home_team_id: &str, away_team_id: &str,
        home_score: Score, away_score: Score
    ) -> Result<ResultReceipt> {
        self.check_request(caller, division, game_week, home_team_id, away_team_id)?;

        let mut tx = db::begin_write(&self.db).await?;

        let fixture = Fixture::find(&mut *tx, division, game_week, home_team_id, away_team_id).await?
            .ok_or_else(|| LeagueError::not_found(format!("fixture {home_team_id} v {away_team_id} in {division} game week {game_week}")))?;
        fixture.state.complete(fixture.fixture_id)?;

        // Another submission may have completed it since the read.
        if Fixture::mark_completed(&mut *tx, division, game_week, home_team_id, away_team_id).await?.is_none() {
            return Err(LeagueError::AlreadySubmitted(fixture.fixture_id));
        }

        let (home, away) = StatDelta::from_scores(home_score, away_score, &self.config.points);
        let result = MatchResult {
            fixture_id: fixture.fixture_id,
            home_score,
            away_score,
            home_points: home.points,
            away_points: away.points,
            submitted_at: OffsetDateTime::now_utc(),
            corrected_at: None,
        };
        result.insert(&mut *tx).await?;

        TeamStats::apply(&mut *tx, home_team_id, &home).await?;
        TeamStats::apply(&mut *tx, away_team_id, &away).await?;

        tx.commit().await?;

        log::info!(
            "{} submitted {division} game week {game_week}: {home_team_id} {home_score} - {away_score} {away_team_id}",
            caller.user_id
        );
        self.audit.record(&AuditEvent::ResultSubmitted {
            by: caller.user_id.clone(),
            division: division.to_string(),
            game_week,
            home: home_team_id.to_string(),
            away: away_team_id.to_string(),
            home_score,
            away_score,
        });

        Ok(ResultReceipt {
            fixture_id: fixture.fixture_id,
            outcome: Outcome::from_scores(home_score, away_score),
            home,
            away,
        })
    }

    // Replace the result of a completed fixture. The stats of the old result are
    // taken back before the new ones are added.
    pub async fn correct_result(
        &self, caller: &Caller, division: &str, game_week: GameWeek,
        home_team_id: &str, away_team_id: &str,
        home_score: Score, away_score: Score
    ) -> Result<ResultReceipt> {
        self.check_request(caller, division, game_week, home_team_id, away_team_id)?;

        let mut tx = db::begin_write(&self.db).await?;

        let fixture = Fixture::find(&mut *tx, division, game_week, home_team_id, away_team_id).await?
            .ok_or_else(|| LeagueError::not_found(format!("fixture {home_team_id} v {away_team_id} in {division} game week {game_week}")))?;
        if !fixture.is_completed() {
            return Err(LeagueError::NotSubmitted(fixture.fixture_id));
        }

        let previous = MatchResult::fetch_optional(&mut *tx, fixture.fixture_id).await?
            .ok_or(LeagueError::NotSubmitted(fixture.fixture_id))?;

        let (old_home, old_away) = StatDelta::applied_by(&previous);
        TeamStats::revert(&mut *tx, home_team_id, &old_home).await?;
        TeamStats::revert(&mut *tx, away_team_id, &old_away).await?;

        let (home, away) = StatDelta::from_scores(home_score, away_score, &self.config.points);
        TeamStats::apply(&mut *tx, home_team_id, &home).await?;
        TeamStats::apply(&mut *tx, away_team_id, &away).await?;

        let corrected = MatchResult {
            home_score,
            away_score,
            home_points: home.points,
            away_points: away.points,
            corrected_at: Some(OffsetDateTime::now_utc()),
            ..previous.clone()
        };
        corrected.overwrite(&mut *tx).await?;

        tx.commit().await?;

        log::info!(
            "{} corrected {division} game week {game_week}: {home_team_id} {}-{} -> {home_score}-{away_score} {away_team_id}",
            caller.user_id, previous.home_score, previous.away_score
        );
        self.audit.record(&AuditEvent::ResultCorrected {
            by: caller.user_id.clone(),
            division: division.to_string(),
            game_week,
            home: home_team_id.to_string(),
            away: away_team_id.to_string(),
            home_score,
            away_score,
        });

        Ok(ResultReceipt {
            fixture_id: fixture.fixture_id,
            outcome: Outcome::from_scores(home_score, away_score),
            home,
            away,
        })
    }

    pub async fn result(&self, fixture_id: FixtureId) -> Result<MatchResult> {
        MatchResult::fetch_optional(&self.db, fixture_id).await?
            .ok_or_else(|| LeagueError::not_found(format!("result of fixture {fixture_id}")))
    }

    // None until the team has a recorded result.
    pub async fn team_stats(&self, team_id: &str) -> Result<Option<TeamStats>> {
        TeamStats::fetch_optional(&self.db, team_id).await
    }
}
