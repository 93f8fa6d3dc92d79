// Failures of the league operations.
use thiserror::Error;

use crate::logic::types::{DivisionId, FixtureId, GameWeek, PlayerId, TeamId};

pub type Result<T> = std::result::Result<T, LeagueError>;

// Coarse failure categories the presentation layer turns into messages.
#[derive(Debug, Clone, Copy)]
#[derive(PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    Validation,
    Conflict,
    NotFound,
    CapacityExceeded,
    StoreFailure,
}

#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("caller is not authorized for {scope}")]
    Unauthorized { scope: String },
    #[error("caller does not hold a manager role")]
    NotManager,
    #[error("unknown division: {0}")]
    UnknownDivision(DivisionId),
    #[error("a team cannot play against itself ({0})")]
    SameTeam(TeamId),
    #[error("game week must be at least 1, got {0}")]
    InvalidGameWeek(GameWeek),
    #[error("division {division} has {count} team(s), at least 2 are needed")]
    InsufficientTeams { division: DivisionId, count: usize },
    #[error("round {game_week} of {division} has no pairings")]
    EmptyRound { division: DivisionId, game_week: GameWeek },
    #[error("caller holds no registered team role")]
    NoTeamRole,
    #[error("caller holds {0} registered team roles, only one is allowed")]
    MultipleTeamRoles(usize),
    #[error("team {team_id} is already registered in {division}")]
    DuplicateIdentifier { team_id: TeamId, division: DivisionId },
    #[error("a team named {name} already exists in {division}")]
    DuplicateName { name: String, division: DivisionId },
    #[error("fixture {0} already has a result")]
    AlreadySubmitted(FixtureId),
    #[error("fixture {0} has no result to correct")]
    NotSubmitted(FixtureId),
    #[error("division {division} is full ({capacity} teams)")]
    CapacityExceeded { division: DivisionId, capacity: u32 },
    #[error("{0} not found")]
    NotFound(String),
    #[error("player {player_id} is not a member of {team_id}")]
    PlayerNotOnTeam { player_id: PlayerId, team_id: TeamId },
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl LeagueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } | Self::NotManager => ErrorKind::Unauthorized,

            Self::UnknownDivision(_) | Self::SameTeam(_) | Self::InvalidGameWeek(_)
            | Self::InsufficientTeams { .. } | Self::EmptyRound { .. }
            | Self::NoTeamRole | Self::MultipleTeamRoles(_)
            | Self::Config(_) => ErrorKind::Validation,

            Self::DuplicateIdentifier { .. } | Self::DuplicateName { .. }
            | Self::AlreadySubmitted(_) | Self::NotSubmitted(_) => ErrorKind::Conflict,

            Self::NotFound(_) | Self::PlayerNotOnTeam { .. } => ErrorKind::NotFound,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::Store(_) | Self::Migrate(_) => ErrorKind::StoreFailure,
        }
    }

    pub fn unauthorized(scope: impl Into<String>) -> Self {
        Self::Unauthorized { scope: scope.into() }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}
