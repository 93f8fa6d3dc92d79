// Players, their team links and their stats.
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use sqlx::FromRow;

use crate::logic::{audit::{AuditEvent, AuditSink}, auth::Caller, config::LeagueConfig, error::{LeagueError, Result}, team::Team, types::{Db, PlayerId, StatValue, TeamId}};

#[derive(Debug, Serialize)]
#[derive(PartialEq, Eq)]
#[derive(Default, Clone)]
#[derive(FromRow)]
pub struct Player {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_id: Option<TeamId>,
}

impl Player {
    pub fn build(player_id: &str, player_name: &str, team_id: Option<&str>) -> Self {
        Self {
            player_id: player_id.to_string(),
            player_name: player_name.to_string(),
            team_id: team_id.map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
#[derive(PartialEq, Eq)]
#[derive(Default, Clone)]
#[derive(FromRow)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub games_played: StatValue,
    pub goals: StatValue,
    pub assists: StatValue,
    pub clean_sheets: StatValue,
}

impl PlayerStats {
    pub fn package(&self) -> serde_json::Value {
        json!({
            "id": self.player_id,
            "games": self.games_played,
            "goals": self.goals,
            "assists": self.assists,
            "clean_sheets": self.clean_sheets,
        })
    }
}

// One line of a division's top scorer list.
#[derive(Debug, Serialize)]
#[derive(PartialEq, Eq)]
#[derive(Clone)]
#[derive(FromRow)]
pub struct TopScorer {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_id: TeamId,
    pub team_name: String,
    pub goals: StatValue,
    pub assists: StatValue,
}

// Signs and releases players on behalf of team managers.
#[derive(Clone)]
pub struct Roster {
    db: Db,
    config: Arc<LeagueConfig>,
    audit: Arc<dyn AuditSink>,
}

impl Roster {
    pub fn build(db: Db, config: Arc<LeagueConfig>, audit: Arc<dyn AuditSink>) -> Self {
        Self { db, config, audit }
    }

    // The one registered team the caller manages.
    pub async fn managed_team(&self, caller: &Caller) -> Result<Team> {
        self.config.require_manager(caller)?;

        let roles: Vec<&str> = caller.roles.iter().map(String::as_str).collect();
        let mut teams = Team::fetch_with_ids(&self.db, &roles).await?;

        match teams.len() {
            0 => Err(LeagueError::NoTeamRole),
            1 => Ok(teams.remove(0)),
            n => Err(LeagueError::MultipleTeamRoles(n)),
        }
    }

    // Link the player to the caller's team. Runs after the player accepted.
    pub async fn sign_player(&self, caller: &Caller, player_id: &str, player_name: &str) -> Result<Player> {
        let team = self.managed_team(caller).await?;

        let player = Player::build(player_id, player_name, Some(&team.team_id));
        player.upsert(&self.db).await?;

        log::info!("{} signed {player_id} to {}", caller.user_id, team.team_id);
        self.audit.record(&AuditEvent::PlayerSigned {
            by: caller.user_id.clone(),
            player_id: player.player_id.clone(),
            team_id: team.team_id,
        });

        return Ok(player);
    }

    // Clear the player's link to the caller's team.
    pub async fn release_player(&self, caller: &Caller, player_id: &str) -> Result<Player> {
        let team = self.managed_team(caller).await?;

        let released = Player::release(&self.db, player_id, &team.team_id).await?;
        let Some(player) = released else {
            return Err(LeagueError::PlayerNotOnTeam {
                player_id: player_id.to_string(),
                team_id: team.team_id,
            });
        };

        log::info!("{} released {player_id} from {}", caller.user_id, team.team_id);
        self.audit.record(&AuditEvent::PlayerReleased {
            by: caller.user_id.clone(),
            player_id: player.player_id.clone(),
            team_id: team.team_id,
        });

        return Ok(player);
    }

    pub async fn player(&self, player_id: &str) -> Result<Player> {
        Player::fetch_optional(&self.db, player_id).await?
            .ok_or_else(|| LeagueError::not_found(format!("player {player_id}")))
    }

    pub async fn players_of(&self, team_id: &str) -> Result<Vec<Player>> {
        Player::fetch_team(&self.db, team_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_package() {
        let stats = PlayerStats {
            player_id: "p1".to_string(),
            games_played: 4,
            goals: 3,
            assists: 1,
            clean_sheets: 0,
        };

        let package = stats.package();
        assert_eq!(package["goals"], 3);
        assert_eq!(package["id"], "p1");
    }
}
