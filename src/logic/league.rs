// Everything a command handler needs, built once at startup.
use std::sync::Arc;

use crate::logic::{audit::AuditSink, channel::ChannelRegistry, config::LeagueConfig, fixture::FixtureScheduler, player::Roster, result::ResultLedger, standings::StandingsAggregator, team::LeagueDirectory, types::Db};

#[derive(Clone)]
pub struct League {
    pub db: Db,
    pub config: Arc<LeagueConfig>,
    pub directory: LeagueDirectory,
    pub scheduler: FixtureScheduler,
    pub ledger: ResultLedger,
    pub standings: StandingsAggregator,
    pub roster: Roster,
    pub channels: ChannelRegistry,
}

impl League {
    // Build the thing.
    pub fn build(db: Db, config: LeagueConfig, audit: Arc<dyn AuditSink>) -> Self {
        let config = Arc::new(config);

        Self {
            directory: LeagueDirectory::build(db.clone(), config.clone(), audit.clone()),
            scheduler: FixtureScheduler::build(db.clone(), config.clone(), audit.clone()),
            ledger: ResultLedger::build(db.clone(), config.clone(), audit.clone()),
            standings: StandingsAggregator::build(db.clone(), config.clone()),
            roster: Roster::build(db.clone(), config.clone(), audit),
            channels: ChannelRegistry::build(db.clone()),
            db,
            config,
        }
    }
}
