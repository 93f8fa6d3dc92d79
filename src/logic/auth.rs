// Who is invoking an operation, and what they may touch.
use std::collections::{BTreeSet, HashSet};

use crate::logic::{config::{DivisionConfig, LeagueConfig}, error::{LeagueError, Result}, types::{DivisionId, RoleId, UserId}};

#[derive(Debug, Clone, Default)]
pub struct Caller {
    pub user_id: UserId,
    pub roles: HashSet<RoleId>,
}

impl Caller {
    pub fn build<I, R>(user_id: &str, roles: I) -> Self
    where I: IntoIterator<Item = R>, R: Into<RoleId> {
        Self {
            user_id: user_id.to_string(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

impl LeagueConfig {
    // Divisions for which the caller holds an overseer role.
    pub fn allowed_divisions(&self, caller: &Caller) -> BTreeSet<DivisionId> {
        self.divisions.iter()
            .filter(|d| d.overseer_roles.iter().any(|role| caller.has_role(role)))
            .map(|d| d.id.clone())
            .collect()
    }

    // The caller must oversee this particular division.
    pub fn require_division(&self, caller: &Caller, division: &str) -> Result<&DivisionConfig> {
        let config = self.division(division)?;
        if !self.allowed_divisions(caller).contains(division) {
            log::warn!("{} is not an overseer of {division}", caller.user_id);
            return Err(LeagueError::unauthorized(division));
        }

        Ok(config)
    }

    // The caller must oversee at least one division.
    pub fn require_any_division(&self, caller: &Caller) -> Result<BTreeSet<DivisionId>> {
        let allowed = self.allowed_divisions(caller);
        if allowed.is_empty() {
            log::warn!("{} holds no overseer role", caller.user_id);
            return Err(LeagueError::unauthorized("any division"));
        }

        Ok(allowed)
    }

    // The caller must oversee every configured division.
    pub fn require_all_divisions(&self, caller: &Caller) -> Result<()> {
        let allowed = self.require_any_division(caller)?;
        if self.division_ids().any(|id| !allowed.contains(id)) {
            log::warn!("{} does not oversee every division", caller.user_id);
            return Err(LeagueError::unauthorized("all divisions"));
        }

        Ok(())
    }

    pub fn require_manager(&self, caller: &Caller) -> Result<()> {
        if !self.manager_roles.iter().any(|role| caller.has_role(role)) {
            return Err(LeagueError::NotManager);
        }

        Ok(())
    }
}
