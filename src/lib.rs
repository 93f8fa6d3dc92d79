pub mod db;
pub mod logic;

use std::sync::Arc;

use crate::logic::{audit::LogAuditSink, config::LeagueConfig, error::Result, league::League};

pub use crate::logic::{
    auth::Caller,
    error::{ErrorKind, LeagueError},
};

// Load the configuration, open the database and build the league components.
pub async fn start() -> Result<League> {
    let config = LeagueConfig::load()?;
    let db = db::setup(&config.database_url).await?;

    for division in config.divisions.iter() {
        log::debug!("division {} ({}) holds up to {} teams", division.id, division.name, division.capacity);
    }

    return Ok(League::build(db, config, Arc::new(LogAuditSink)));
}
