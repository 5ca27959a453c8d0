/// On-disk shapes for season results and team files.
/// These map to the domain types via the conversions in loader.rs.
use chrono::NaiveDate;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Season results
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Default)]
pub struct SeasonFile {
    #[serde(default)]
    pub year: Option<u16>,
    /// Outer index is the round, round 0 first.
    pub rounds: Vec<Vec<GameRecord>>,
}

/// `["2009-03-19", home_id, away_id, home_score, away_score]`
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GameRecord(pub NaiveDate, pub u32, pub u32, pub u16, pub u16);

// ---------------------------------------------------------------------------
// Team directory
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Default)]
pub struct TeamsFile {
    pub teams: Vec<TeamRecord>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TeamRecord {
    pub id: u32,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub offense: Vec<f64>,
    #[serde(default)]
    pub defense: Vec<f64>,
}
