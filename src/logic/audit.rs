// Audit trail of committed league mutations.
use std::sync::Mutex;

use crate::logic::types::{DivisionId, GameWeek, PlayerId, Score, TeamId, UserId};

#[derive(Debug, Clone)]
#[derive(PartialEq)]
pub enum AuditEvent {
    TeamRegistered { by: UserId, team_id: TeamId, name: String, division: DivisionId },
    TeamsRemoved { by: UserId, scope: String, teams: usize, fixtures: u64 },
    NamesSynced { updated: usize },
    RoundCreated { by: UserId, division: DivisionId, game_week: GameWeek, fixtures: u64 },
    ResultSubmitted { by: UserId, division: DivisionId, game_week: GameWeek, home: TeamId, away: TeamId, home_score: Score, away_score: Score },
    ResultCorrected { by: UserId, division: DivisionId, game_week: GameWeek, home: TeamId, away: TeamId, home_score: Score, away_score: Score },
    PlayerSigned { by: UserId, player_id: PlayerId, team_id: TeamId },
    PlayerReleased { by: UserId, player_id: PlayerId, team_id: TeamId },
}

// Where audit events go. The chat layer posts them to its log channel.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: &AuditEvent);
}

// Writes every event to the `audit` log target.
#[derive(Debug, Default)]
pub struct LogAuditSink;

impl AuditSink for LogAuditSink {
    fn record(&self, event: &AuditEvent) {
        log::info!(target: "audit", "{event:?}");
    }
}

// Keeps events in memory. Handy for tests and for batching.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditSink {
    pub fn events(&self) -> Vec<AuditEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: &AuditEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
