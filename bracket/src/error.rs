use crate::TeamId;
use std::fmt;

pub type BracketResult<T> = Result<T, BracketError>;

/// Broad category of a failure. None of them are retryable: the input is a
/// fixed historical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Results contradict each other or the supplied seeding.
    DataIntegrity,
    /// Input is missing, empty or shaped wrong.
    MalformedInput,
    /// An id or code has no entry in the team directory.
    LookupMiss,
    Io,
}

#[derive(Debug)]
pub enum BracketError {
    /// A team placed in `round` has no game recorded there.
    MissingGame { team: TeamId, round: usize },
    /// A team was promoted out of a game it lost.
    TeamDidNotWin { team: TeamId, round: usize },
    /// A seeded team does not appear in any first-round game.
    SeedNotPlayed { team: TeamId },
    /// Adjacent seeding slots that never met in `round`.
    SeedingMismatch { round: usize, first: TeamId, second: TeamId },
    /// A slot still empty when the reverse pass needed it.
    UnresolvedSlot { round: usize, slot: usize },
    NoRounds,
    TooManyRounds { found: usize },
    NoSuchRound { round: usize, num_rounds: usize },
    EmptyRound { round: usize },
    GameCount { round: usize, expected: usize, found: usize },
    SlotCount { round: usize, expected: usize, found: usize },
    LevelScore { round: usize, home: TeamId, away: TeamId },
    SeedingLength { expected: usize, found: usize },
    DuplicateSeed { team: TeamId },
    DuplicateTeam(String),
    RatingLength { code: String, offense: usize, defense: usize },
    UnknownTeam(TeamId),
    UnknownCode(String),
    Io(std::io::Error, String),
    Parsing(serde_json::Error, String),
}

impl BracketError {
    pub fn kind(&self) -> ErrorKind {
        use BracketError::*;
        match self {
            MissingGame { .. }
            | TeamDidNotWin { .. }
            | SeedNotPlayed { .. }
            | SeedingMismatch { .. }
            | UnresolvedSlot { .. } => ErrorKind::DataIntegrity,
            NoRounds
            | TooManyRounds { .. }
            | NoSuchRound { .. }
            | EmptyRound { .. }
            | GameCount { .. }
            | SlotCount { .. }
            | LevelScore { .. }
            | SeedingLength { .. }
            | DuplicateSeed { .. }
            | DuplicateTeam(_)
            | RatingLength { .. }
            | Parsing(..) => ErrorKind::MalformedInput,
            UnknownTeam(_) | UnknownCode(_) => ErrorKind::LookupMiss,
            Io(..) => ErrorKind::Io,
        }
    }
}

impl fmt::Display for BracketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketError::MissingGame { team, round } => {
                write!(f, "team {team} has no game recorded in round {round}")
            }
            BracketError::TeamDidNotWin { team, round } => {
                write!(f, "team {team} advanced past round {round} but lost its game there")
            }
            BracketError::SeedNotPlayed { team } => {
                write!(f, "seeded team {team} does not appear in any first-round game")
            }
            BracketError::SeedingMismatch { round, first, second } => {
                write!(f, "seeding pairs {first} with {second}, but they did not meet in round {round}")
            }
            BracketError::UnresolvedSlot { round, slot } => {
                write!(f, "slot {slot} of round {round} was not resolved")
            }
            BracketError::NoRounds => write!(f, "no rounds supplied"),
            BracketError::TooManyRounds { found } => {
                write!(f, "{found} rounds supplied, at most {} supported", crate::MAX_ROUNDS)
            }
            BracketError::NoSuchRound { round, num_rounds } => {
                write!(f, "round {round} requested but only {num_rounds} rounds exist")
            }
            BracketError::EmptyRound { round } => write!(f, "round {round} has no games"),
            BracketError::GameCount { round, expected, found } => {
                write!(f, "round {round} should have {expected} games, found {found}")
            }
            BracketError::SlotCount { round, expected, found } => {
                write!(f, "round {round} should have {expected} slots, found {found}")
            }
            BracketError::LevelScore { round, home, away } => {
                write!(f, "game {home} vs {away} in round {round} has a level score")
            }
            BracketError::SeedingLength { expected, found } => {
                write!(f, "starting bracket should list {expected} teams, found {found}")
            }
            BracketError::DuplicateSeed { team } => {
                write!(f, "team {team} is listed twice in the starting bracket")
            }
            BracketError::DuplicateTeam(what) => write!(f, "duplicate team entry: {what}"),
            BracketError::RatingLength { code, offense, defense } => write!(
                f,
                "rating vectors for {code} do not line up (offense {offense}, defense {defense})"
            ),
            BracketError::UnknownTeam(id) => write!(f, "no team with id {id}"),
            BracketError::UnknownCode(code) => write!(f, "no team with code {code:?}"),
            BracketError::Io(e, path) => write!(f, "could not read {path}: {e}"),
            BracketError::Parsing(e, path) => write!(f, "invalid data in {path}: {e}"),
        }
    }
}

impl std::error::Error for BracketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BracketError::Io(e, _) => Some(e),
            BracketError::Parsing(e, _) => Some(e),
            _ => None,
        }
    }
}
