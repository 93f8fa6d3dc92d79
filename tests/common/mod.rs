#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use league_bot_lib::{
    Caller,
    db,
    logic::{audit::MemoryAuditSink, config::LeagueConfig, league::League, types::Db},
};
use time::OffsetDateTime;

pub const EU_1: &str = "eu_div_1";
pub const EU_2: &str = "eu_div_2";
pub const NA_1: &str = "na_div_1";

pub const EU_1_OVERSEER: &str = "1345337089209798766";
pub const EU_2_OVERSEER: &str = "1345337449924132956";
pub const NA_1_OVERSEER: &str = "1345498738503843931";
pub const MANAGER: &str = "1345367713161412721";

// A fresh league on its own in-memory database.
pub async fn league() -> (League, Arc<MemoryAuditSink>) {
    let db = db::setup_in_memory().await.unwrap();
    let audit = Arc::new(MemoryAuditSink::default());
    let league = League::build(db, LeagueConfig::default(), audit.clone());
    (league, audit)
}

// A league on its own database file with the production pool settings.
// The file goes away with the value.
pub struct FileLeague {
    pub league: League,
    path: PathBuf,
}

impl Drop for FileLeague {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", self.path.display()));
        }
    }
}

pub async fn file_league(name: &str) -> FileLeague {
    let path = std::env::temp_dir().join(format!(
        "league-{name}-{}-{}.db",
        std::process::id(),
        OffsetDateTime::now_utc().unix_timestamp_nanos()
    ));
    let db = db::setup(&format!("sqlite://{}", path.display())).await.unwrap();
    let league = League::build(db, LeagueConfig::default(), Arc::new(MemoryAuditSink::default()));
    FileLeague { league, path }
}

pub fn caller(roles: &[&str]) -> Caller {
    Caller::build("tester", roles.iter().copied())
}

// Holds the overseer role of every configured division.
pub fn admin() -> Caller {
    let roles: Vec<String> = LeagueConfig::default().divisions.into_iter()
        .flat_map(|d| d.overseer_roles)
        .collect();
    Caller::build("admin", roles)
}

// Register (id, name) pairs into the division in the given order.
pub async fn seed(league: &League, division: &str, teams: &[(&str, &str)]) {
    let admin = admin();
    for (team_id, name) in teams {
        league.directory.register_team(&admin, team_id, name, division).await.unwrap();
    }
}

pub async fn count(db: &Db, sql: &str) -> i64 {
    sqlx::query_scalar(sql).fetch_one(db).await.unwrap()
}
