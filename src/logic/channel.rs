// Channels the notification glue posts to.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::logic::{error::{LeagueError, Result}, types::{ChannelId, Db}};

#[derive(Debug, Serialize, Deserialize)]
#[derive(PartialEq, Eq, Hash)]
#[derive(Clone, Copy)]
#[derive(sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ChannelKind {
    Logs,
    Signings,
    Releases,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 3] = [Self::Logs, Self::Signings, Self::Releases];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Logs => "logs",
            Self::Signings => "signings",
            Self::Releases => "releases",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL.into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LeagueError::not_found(format!("channel kind {s}")))
    }
}

#[derive(Clone)]
pub struct ChannelRegistry {
    db: Db,
}

impl ChannelRegistry {
    pub fn build(db: Db) -> Self {
        Self { db }
    }

    pub async fn set_channel(&self, kind: ChannelKind, channel_id: &str) -> Result<()> {
        Self::upsert(&self.db, kind, channel_id).await?;
        log::info!("{kind} channel set to {channel_id}");
        Ok(())
    }

    pub async fn channel(&self, kind: ChannelKind) -> Result<Option<ChannelId>> {
        Self::fetch(&self.db, kind).await
    }
}
