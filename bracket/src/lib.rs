pub mod error;
pub mod loader;
pub mod predict;
pub mod reconstruct;
pub mod teams;
pub mod wire;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use error::{BracketError, BracketResult, ErrorKind};
pub use reconstruct::{make_bracket_structure, make_seeded_bracket_structure, substitute_codes};
pub use teams::{Team, TeamDirectory};

/// Rounds in a 64-team single-elimination bracket.
pub const NUM_ROUNDS: usize = 6;

/// Upper bound on the number of rounds accepted from input files.
pub const MAX_ROUNDS: usize = 16;

/// Number of slots in `round` of a bracket with `num_rounds` rounds: `2^(R-r)`.
pub fn slots_in_round(num_rounds: usize, round: usize) -> usize {
    1 << (num_rounds - round)
}

/// Number of games played in `round`, half its slots.
pub fn games_in_round(num_rounds: usize, round: usize) -> usize {
    slots_in_round(num_rounds, round) / 2
}

// ---------------------------------------------------------------------------
// Domain types — independent of the on-disk formats in `wire`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One completed game. Home/away carry no bracket meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub date: NaiveDate,
    pub home: TeamId,
    pub away: TeamId,
    pub home_score: u16,
    pub away_score: u16,
}

impl Game {
    pub fn involves(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }

    /// The other participant, if `team` played in this game.
    pub fn opponent_of(&self, team: TeamId) -> Option<TeamId> {
        if self.home == team {
            Some(self.away)
        } else if self.away == team {
            Some(self.home)
        } else {
            None
        }
    }

    /// None for a level score.
    pub fn winner(&self) -> Option<TeamId> {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Some(self.home),
            std::cmp::Ordering::Less => Some(self.away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn loser(&self) -> Option<TeamId> {
        self.winner().and_then(|w| self.opponent_of(w))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Round {
    pub games: Vec<Game>,
}

impl Round {
    pub fn new(games: Vec<Game>) -> Self {
        Self { games }
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Linear scan for the game `team` played in this round.
    pub fn game_of(&self, team: TeamId) -> Option<&Game> {
        self.games.iter().find(|g| g.involves(team))
    }
}

/// Every round's results for one tournament, round 0 first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Season {
    pub year: Option<u16>,
    pub rounds: Vec<Round>,
}

impl Season {
    pub fn new(rounds: Vec<Round>) -> Self {
        Self { year: None, rounds }
    }

    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn round(&self, round: usize) -> BracketResult<&Round> {
        self.rounds.get(round).ok_or(BracketError::NoSuchRound {
            round,
            num_rounds: self.rounds.len(),
        })
    }

    /// The single championship game.
    pub fn championship(&self) -> BracketResult<&Game> {
        let last = self.num_rounds().checked_sub(1).ok_or(BracketError::NoRounds)?;
        let round = self.round(last)?;
        round.games.first().ok_or(BracketError::EmptyRound { round: last })
    }

    /// The game `team` played in `round`. Absence means the input is inconsistent.
    pub fn game_in_round(&self, team: TeamId, round: usize) -> BracketResult<&Game> {
        self.round(round)?
            .game_of(team)
            .ok_or(BracketError::MissingGame { team, round })
    }

    /// Who `team` played in `round`.
    pub fn opponent_in_round(&self, team: TeamId, round: usize) -> BracketResult<TeamId> {
        let game = self.game_in_round(team, round)?;
        game.opponent_of(team)
            .ok_or(BracketError::MissingGame { team, round })
    }

    /// Checks round count, and that no round is empty or short of the games
    /// its slots need, before any table is built. Extra games (play-ins) pass.
    pub fn validate(&self) -> BracketResult<()> {
        let num_rounds = self.num_rounds();
        if num_rounds == 0 {
            return Err(BracketError::NoRounds);
        }
        if num_rounds > MAX_ROUNDS {
            return Err(BracketError::TooManyRounds { found: num_rounds });
        }
        for (r, round) in self.rounds.iter().enumerate() {
            if round.is_empty() {
                return Err(BracketError::EmptyRound { round: r });
            }
            let expected = games_in_round(num_rounds, r);
            if round.len() < expected {
                return Err(BracketError::GameCount { round: r, expected, found: round.len() });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// BracketTable — round → slot → occupant
// ---------------------------------------------------------------------------

/// Reconstructed bracket. Slot `i` of round `r` is fed by slots `2i` and
/// `2i+1` of round `r-1`; round `r` always holds `2^(R-r)` slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable<T = TeamId> {
    rounds: Vec<Vec<T>>,
}

impl<T> BracketTable<T> {
    /// Builds a table, rejecting any round whose slot count breaks `2^(R-r)`.
    pub fn from_rounds(rounds: Vec<Vec<T>>) -> BracketResult<Self> {
        let num_rounds = rounds.len();
        if num_rounds == 0 {
            return Err(BracketError::NoRounds);
        }
        if num_rounds > MAX_ROUNDS {
            return Err(BracketError::TooManyRounds { found: num_rounds });
        }
        for (r, slots) in rounds.iter().enumerate() {
            let expected = slots_in_round(num_rounds, r);
            if slots.len() != expected {
                return Err(BracketError::SlotCount { round: r, expected, found: slots.len() });
            }
        }
        Ok(Self { rounds })
    }

    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Occupants of `round` in slot order, None past the last round.
    pub fn slots(&self, round: usize) -> Option<&[T]> {
        self.rounds.get(round).map(Vec::as_slice)
    }

    /// Round 0 occupants. Every table has at least one round.
    pub fn first_round(&self) -> &[T] {
        &self.rounds[0]
    }

    pub fn get(&self, round: usize, slot: usize) -> Option<&T> {
        self.rounds.get(round).and_then(|slots| slots.get(slot))
    }

    pub fn rounds(&self) -> impl Iterator<Item = &[T]> {
        self.rounds.iter().map(Vec::as_slice)
    }

    /// Converts every slot, keeping the shape. Stops at the first failure.
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<BracketTable<U>, E> {
        let rounds = self
            .rounds
            .into_iter()
            .map(|slots| slots.into_iter().map(&mut f).collect::<Result<Vec<_>, E>>())
            .collect::<Result<Vec<_>, E>>()?;
        Ok(BracketTable { rounds })
    }
}

impl<T: PartialEq> BracketTable<T> {
    /// Whether `team` occupies any slot of `round`.
    pub fn contains(&self, round: usize, team: &T) -> bool {
        self.rounds.get(round).is_some_and(|slots| slots.contains(team))
    }
}
