// Custom types that are widely used are defined here.
use sqlx::SqlitePool;

pub type Db = SqlitePool;

// Identifiers handed over by the chat platform. A team is identified by its role.
pub type DivisionId = String;
pub type RoleId = String;
pub type TeamId = RoleId;
pub type UserId = String;
pub type PlayerId = UserId;
pub type ChannelId = String;

// Database ID types.
pub type FixtureId = i64;

pub type GameWeek = u32;
pub type Score = u16;

// Accumulated values in the stats tables.
pub type StatValue = u32;
pub type Points = u32;
