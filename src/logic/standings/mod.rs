// Division tables built from team stats.
pub mod ranking;

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use sqlx::FromRow;

use crate::logic::{config::LeagueConfig, error::Result, player::{PlayerStats, TopScorer}, types::{Db, DivisionId, Points, StatValue, TeamId}};

#[derive(Debug, Serialize)]
#[derive(PartialEq, Eq)]
#[derive(Default, Clone)]
#[derive(FromRow)]
pub struct StandingsRow {
    #[sqlx(skip)]
    pub position: usize,
    pub team_id: TeamId,
    pub team_name: String,
    pub division: DivisionId,
    pub games_played: StatValue,
    pub wins: StatValue,
    pub draws: StatValue,
    pub losses: StatValue,
    pub goals_for: StatValue,
    pub goals_against: StatValue,
    pub points: Points,
}

impl StandingsRow {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    // Get relevant information for a table row.
    pub fn package(&self) -> serde_json::Value {
        json!({
            "position": self.position,
            "id": self.team_id,
            "name": self.team_name,
            "games": self.games_played,
            "wins": self.wins,
            "draws": self.draws,
            "losses": self.losses,
            "goals_for": self.goals_for,
            "goals_against": self.goals_against,
            "goal_difference": self.goal_difference(),
            "points": self.points,
        })
    }
}

// Read-only views over teams, team stats and player stats.
#[derive(Clone)]
pub struct StandingsAggregator {
    db: Db,
    config: Arc<LeagueConfig>,
}

impl StandingsAggregator {
    pub fn build(db: Db, config: Arc<LeagueConfig>) -> Self {
        Self { db, config }
    }

    // The division's table in ranking order. Empty if the division has no teams.
    pub async fn table(&self, division: &str) -> Result<Vec<StandingsRow>> {
        self.config.division(division)?;

        let mut rows = StandingsRow::fetch_division(&self.db, division).await?;
        ranking::rank(&mut rows);

        log::debug!("table of {division} has {} team(s)", rows.len());
        return Ok(rows);
    }

    pub async fn top_scorers(&self, division: &str, limit: u32) -> Result<Vec<TopScorer>> {
        self.config.division(division)?;
        TopScorer::fetch_division(&self.db, division, limit).await
    }

    pub async fn player_stats(&self, player_id: &str) -> Result<Option<PlayerStats>> {
        PlayerStats::fetch_optional(&self.db, player_id).await
    }
}
