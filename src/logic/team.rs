// Team registration and the league directory.
use std::{collections::HashMap, sync::Arc};

use serde::Serialize;
use serde_json::json;
use sqlx::FromRow;

use crate::{db, logic::{audit::{AuditEvent, AuditSink}, auth::Caller, config::LeagueConfig, error::{LeagueError, Result}, types::{Db, DivisionId, TeamId}}};

#[derive(Debug, Serialize)]
#[derive(PartialEq, Eq)]
#[derive(Default, Clone)]
#[derive(FromRow)]
pub struct Team {
    pub team_id: TeamId,
    pub team_name: String,
    pub division: DivisionId,
}

impl Team {
    pub fn build(team_id: &str, team_name: &str, division: &str) -> Self {
        Self {
            team_id: team_id.to_string(),
            team_name: team_name.to_string(),
            division: division.to_string(),
        }
    }

    // Get relevant info of the team for the chat layer.
    pub fn package(&self, config: &LeagueConfig) -> serde_json::Value {
        json!({
            "id": self.team_id,
            "name": self.team_name,
            "division": self.division,
            "division_name": config.division(&self.division).map(|d| d.name.as_str()).unwrap_or(self.division.as_str()),
        })
    }
}

// Which teams a removal targets.
#[derive(Debug, Clone)]
pub enum TeamSelector {
    One(TeamId),
    All,
}

// Which divisions a removal looks in.
#[derive(Debug, Clone)]
pub enum DivisionSelector {
    One(DivisionId),
    All,
}

impl DivisionSelector {
    fn describe(&self) -> String {
        match self {
            Self::One(division) => division.clone(),
            Self::All => "all divisions".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RemovalReport {
    pub teams: Vec<Team>,
    pub fixtures_removed: u64,
}

// Current display names of team roles as the chat platform knows them.
pub trait NameSource {
    // None means the role no longer exists.
    fn current_name(&self, team_id: &str) -> Option<String>;
}

impl NameSource for HashMap<TeamId, String> {
    fn current_name(&self, team_id: &str) -> Option<String> {
        self.get(team_id).cloned()
    }
}

// Owns the teams table.
#[derive(Clone)]
pub struct LeagueDirectory {
    db: Db,
    config: Arc<LeagueConfig>,
    audit: Arc<dyn AuditSink>,
}

impl LeagueDirectory {
    pub fn build(db: Db, config: Arc<LeagueConfig>, audit: Arc<dyn AuditSink>) -> Self {
        Self { db, config, audit }
    }

    // Register a team role into a division.
    pub async fn register_team(&self, caller: &Caller, team_id: &str, team_name: &str, division: &str) -> Result<Team> {
        let capacity = self.config.require_division(caller, division)?.capacity;
        let team = Team::build(team_id, team_name, division);

        let mut tx = db::begin_write(&self.db).await?;

        if let Some(existing) = Team::fetch_optional(&mut *tx, team_id).await? {
            return Err(LeagueError::DuplicateIdentifier { team_id: team.team_id, division: existing.division });
        }
        if Team::name_taken(&mut *tx, team_name, division, None).await? {
            return Err(LeagueError::DuplicateName { name: team.team_name, division: team.division });
        }
        if !team.insert_within_capacity(&mut *tx, capacity).await? {
            return Err(LeagueError::CapacityExceeded { division: team.division, capacity });
        }

        tx.commit().await?;

        log::info!("{} registered team {} ({}) in {division}", caller.user_id, team.team_name, team.team_id);
        self.audit.record(&AuditEvent::TeamRegistered {
            by: caller.user_id.clone(),
            team_id: team.team_id.clone(),
            name: team.team_name.clone(),
            division: team.division.clone(),
        });

        return Ok(team);
    }

    // Remove one team or every team, from one division or from all of them.
    pub async fn remove_teams(&self, caller: &Caller, target: &TeamSelector, scope: &DivisionSelector) -> Result<RemovalReport> {
        match (target, scope) {
            (_, DivisionSelector::One(division)) => {
                self.config.require_division(caller, division)?;
            },
            (TeamSelector::One(team_id), DivisionSelector::All) => {
                let allowed = self.config.require_any_division(caller)?;
                let team = Team::fetch_optional(&self.db, team_id).await?
                    .ok_or_else(|| LeagueError::not_found(format!("team {team_id}")))?;

                if !allowed.contains(&team.division) {
                    log::warn!("{} cannot remove {team_id} from {}", caller.user_id, team.division);
                    return Err(LeagueError::unauthorized(team.division));
                }
            },
            (TeamSelector::All, DivisionSelector::All) => {
                self.config.require_all_divisions(caller)?;
            },
        }

        let mut tx = db::begin_write(&self.db).await?;
        let report = Team::delete_selected(&mut tx, target, scope).await?;
        if report.teams.is_empty() {
            return Err(LeagueError::not_found(match target {
                TeamSelector::One(team_id) => format!("team {team_id} in {}", scope.describe()),
                TeamSelector::All => format!("teams in {}", scope.describe()),
            }));
        }
        tx.commit().await?;

        log::info!(
            "{} removed {} team(s) and {} fixture(s) from {}",
            caller.user_id, report.teams.len(), report.fixtures_removed, scope.describe()
        );
        self.audit.record(&AuditEvent::TeamsRemoved {
            by: caller.user_id.clone(),
            scope: scope.describe(),
            teams: report.teams.len(),
            fixtures: report.fixtures_removed,
        });

        return Ok(report);
    }

    // Bring stored team names in line with the current role names.
    // Return how many teams were renamed.
    pub async fn sync_names(&self, source: &dyn NameSource) -> Result<usize> {
        let mut tx = db::begin_write(&self.db).await?;
        let teams = Team::fetch_all(&mut *tx).await?;

        let mut updated = 0;
        for team in teams {
            let Some(name) = source.current_name(&team.team_id) else { continue };
            if name == team.team_name {
                continue;
            }

            if Team::name_taken(&mut *tx, &name, &team.division, Some(&team.team_id)).await? {
                log::warn!("cannot rename {} to {name}: the name is taken in {}", team.team_id, team.division);
                continue;
            }

            Team::rename(&mut *tx, &team.team_id, &name).await?;
            log::debug!("renamed {} from {} to {name}", team.team_id, team.team_name);
            updated += 1;
        }

        tx.commit().await?;

        if updated > 0 {
            log::info!("synced {updated} team name(s)");
            self.audit.record(&AuditEvent::NamesSynced { updated });
        }
        return Ok(updated);
    }

    // Teams of a division in the order they were registered.
    pub async fn list_teams(&self, division: &str) -> Result<Vec<Team>> {
        self.config.division(division)?;
        Team::fetch_division(&self.db, division).await
    }

    pub async fn team(&self, team_id: &str) -> Result<Team> {
        Team::fetch_optional(&self.db, team_id).await?
            .ok_or_else(|| LeagueError::not_found(format!("team {team_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_names_the_division() {
        let config = LeagueConfig::default();

        let team = Team::build("r1", "Lions︱1", "na_div_2");
        assert_eq!(team.package(&config)["division_name"], "NA Div 2");

        // A division dropped from the config still shows its id.
        let orphan = Team::build("r2", "Tigers", "old_div");
        assert_eq!(orphan.package(&config)["division_name"], "old_div");
    }

    #[test]
    fn removal_scope_description() {
        assert_eq!(DivisionSelector::One("eu_div_1".to_string()).describe(), "eu_div_1");
        assert_eq!(DivisionSelector::All.describe(), "all divisions");
    }

    #[test]
    fn name_source_from_map() {
        let names = HashMap::from([("r1".to_string(), "Lions".to_string())]);
        assert_eq!(names.current_name("r1").as_deref(), Some("Lions"));
        assert_eq!(names.current_name("r2"), None);
    }
}
