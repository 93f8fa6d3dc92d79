// League configuration: the closed set of divisions and who oversees them.
use std::collections::HashSet;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::logic::{error::{LeagueError, Result}, types::{DivisionId, Points, RoleId}};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://league.db";
pub const DEFAULT_DEADLINE_DAYS: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsTable {
    pub win: Points,
    pub draw: Points,
    pub loss: Points,
}

impl Default for PointsTable {
    fn default() -> Self {
        Self { win: 3, draw: 1, loss: 0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(PartialEq)]
pub struct DivisionConfig {
    pub id: DivisionId,
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub overseer_roles: Vec<RoleId>,
}

impl DivisionConfig {
    pub fn build(id: &str, name: &str, capacity: u32, overseer_roles: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            capacity,
            overseer_roles: overseer_roles.iter().map(|r| r.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_deadline_days")]
    pub fixture_deadline_days: u32,
    #[serde(default)]
    pub points: PointsTable,
    #[serde(default)]
    pub divisions: Vec<DivisionConfig>,
    #[serde(default)]
    pub manager_roles: Vec<RoleId>,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_deadline_days() -> u32 {
    DEFAULT_DEADLINE_DAYS
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            fixture_deadline_days: DEFAULT_DEADLINE_DAYS,
            points: PointsTable::default(),
            divisions: default_divisions(),
            manager_roles: vec![
                "1345367713161412721".to_string(),  // EU manager
                "1345369526060978278".to_string(),  // EU co-manager
                "1345541692928823471".to_string(),  // NA manager
                "1345541579636604958".to_string(),  // NA co-manager
            ],
        }
    }
}

// The divisions the league runs with unless configured otherwise.
pub fn default_divisions() -> Vec<DivisionConfig> {
    vec![
        DivisionConfig::build("eu_div_1", "EU Div 1", 12, &["1345337089209798766"]),
        DivisionConfig::build("eu_div_2", "EU Div 2", 14, &["1345337449924132956"]),
        DivisionConfig::build("eu_div_3", "EU Div 3", 14, &["1381269407229018114"]),
        DivisionConfig::build("na_div_1", "NA Div 1", 12, &["1345498738503843931"]),
        DivisionConfig::build("na_div_2", "NA Div 2", 14, &["1345498853717315624"]),
        DivisionConfig::build("na_div_3", "NA Div 3", 14, &["1381269500745486336"]),
    ]
}

// Loading.
impl LeagueConfig {
    // Read `league.toml` (optional) and LEAGUE__* environment variables.
    pub fn load() -> std::result::Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("league").required(false))
            .add_source(Environment::with_prefix("LEAGUE").separator("__"))
            .build()?;

        Self::finish(settings.try_deserialize()?)
    }

    pub fn from_toml_str(toml: &str) -> std::result::Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        Self::finish(settings.try_deserialize()?)
    }

    fn finish(mut config: Self) -> std::result::Result<Self, ConfigError> {
        if config.divisions.is_empty() {
            config.divisions = default_divisions();
        }
        config.validate()?;
        return Ok(config);
    }

    // Make sure the division table is usable.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.fixture_deadline_days == 0 {
            return Err(ConfigError::Message("fixture_deadline_days must be positive".to_string()));
        }

        let mut ids = HashSet::new();
        let mut roles = HashSet::new();
        for division in self.divisions.iter() {
            if division.id.is_empty() {
                return Err(ConfigError::Message("division id cannot be empty".to_string()));
            }
            if !ids.insert(division.id.as_str()) {
                return Err(ConfigError::Message(format!("division {} is configured twice", division.id)));
            }
            if division.capacity == 0 {
                return Err(ConfigError::Message(format!("division {} has zero capacity", division.id)));
            }

            // Overseer role sets are disjoint.
            for role in division.overseer_roles.iter() {
                if !roles.insert(role.as_str()) {
                    return Err(ConfigError::Message(format!("role {role} oversees more than one division")));
                }
            }
        }

        Ok(())
    }
}

// Lookups.
impl LeagueConfig {
    pub fn division(&self, id: &str) -> Result<&DivisionConfig> {
        self.divisions.iter()
            .find(|d| d.id == id)
            .ok_or_else(|| LeagueError::UnknownDivision(id.to_string()))
    }

    pub fn division_ids(&self) -> impl Iterator<Item = &DivisionId> {
        self.divisions.iter().map(|d| &d.id)
    }

    pub fn deadline_length(&self) -> Duration {
        Duration::days(i64::from(self.fixture_deadline_days))
    }
}
