use crate::{BracketError, BracketResult, TeamId};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub code: String, // "unc"
    pub name: String, // "North Carolina"
    pub offense: Vec<f64>,
    pub defense: Vec<f64>,
}

/// Id → code/name lookup, plus the reverse code → id index.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    by_id: HashMap<TeamId, Team>,
    by_code: HashMap<String, TeamId>,
}

impl TeamDirectory {
    /// Rejects duplicate ids and duplicate codes.
    pub fn from_teams(teams: impl IntoIterator<Item = Team>) -> BracketResult<Self> {
        let mut directory = Self::default();
        for team in teams {
            if directory.by_id.contains_key(&team.id) {
                return Err(BracketError::DuplicateTeam(format!("id {}", team.id)));
            }
            if directory.by_code.contains_key(&team.code) {
                return Err(BracketError::DuplicateTeam(format!("code {:?}", team.code)));
            }
            directory.by_code.insert(team.code.clone(), team.id);
            directory.by_id.insert(team.id, team);
        }
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn get(&self, id: TeamId) -> BracketResult<&Team> {
        self.by_id.get(&id).ok_or(BracketError::UnknownTeam(id))
    }

    pub fn code(&self, id: TeamId) -> BracketResult<&str> {
        self.get(id).map(|t| t.code.as_str())
    }

    pub fn name(&self, id: TeamId) -> BracketResult<&str> {
        self.get(id).map(|t| t.name.as_str())
    }

    pub fn id_for_code(&self, code: &str) -> BracketResult<TeamId> {
        self.by_code
            .get(code)
            .copied()
            .ok_or_else(|| BracketError::UnknownCode(code.to_owned()))
    }

    pub fn by_code(&self, code: &str) -> BracketResult<&Team> {
        self.id_for_code(code).and_then(|id| self.get(id))
    }

    /// Resolves a starting-bracket token: display code first, then numeric id.
    pub fn resolve(&self, token: &str) -> BracketResult<TeamId> {
        if let Ok(id) = self.id_for_code(token) {
            return Ok(id);
        }
        match token.parse::<u32>() {
            Ok(n) if self.by_id.contains_key(&TeamId(n)) => Ok(TeamId(n)),
            Ok(n) => Err(BracketError::UnknownTeam(TeamId(n))),
            Err(_) => Err(BracketError::UnknownCode(token.to_owned())),
        }
    }
}
