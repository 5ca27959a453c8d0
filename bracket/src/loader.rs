use crate::wire::{GameRecord, SeasonFile, TeamRecord, TeamsFile};
use crate::{BracketError, BracketResult, Game, Round, Season, Team, TeamDirectory, TeamId};
use log::info;
use std::path::Path;

// ---------------------------------------------------------------------------
// Starting bracket (plain text, one team token per line)
// ---------------------------------------------------------------------------

/// Read the starting seeding tokens from a text file, in order.
pub fn load_starting_bracket(path: impl AsRef<Path>) -> BracketResult<Vec<String>> {
    let content = read(path.as_ref())?;
    let tokens = parse_starting_bracket(&content);
    info!("loaded {} starting entries from {}", tokens.len(), path.as_ref().display());
    Ok(tokens)
}

/// Trims each line and keeps only those containing a word character, so blank
/// lines and separator rows such as `----` are skipped.
pub fn parse_starting_bracket(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().any(is_word_char))
        .map(str::to_owned)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Turn seeding tokens into ids. Without a directory every token must be a
/// numeric id.
pub fn resolve_seeding(tokens: &[String], teams: Option<&TeamDirectory>) -> BracketResult<Vec<TeamId>> {
    tokens
        .iter()
        .map(|token| match teams {
            Some(directory) => directory.resolve(token),
            None => token
                .parse::<u32>()
                .map(TeamId)
                .map_err(|_| BracketError::UnknownCode(token.clone())),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Season results (JSON)
// ---------------------------------------------------------------------------

pub fn load_season(path: impl AsRef<Path>) -> BracketResult<Season> {
    let path = path.as_ref();
    let content = read(path)?;
    let season = parse_season(&content, &path.display().to_string())?;
    info!(
        "loaded {} rounds ({} games) from {}",
        season.num_rounds(),
        season.rounds.iter().map(Round::len).sum::<usize>(),
        path.display()
    );
    Ok(season)
}

/// `source` names the input in error messages.
pub fn parse_season(content: &str, source: &str) -> BracketResult<Season> {
    let raw: SeasonFile =
        serde_json::from_str(content).map_err(|e| BracketError::Parsing(e, source.to_owned()))?;
    Ok(map_season(raw))
}

fn map_season(raw: SeasonFile) -> Season {
    Season {
        year: raw.year,
        rounds: raw
            .rounds
            .into_iter()
            .map(|games| Round::new(games.into_iter().map(map_game).collect()))
            .collect(),
    }
}

fn map_game(GameRecord(date, home, away, home_score, away_score): GameRecord) -> Game {
    Game {
        date,
        home: TeamId(home),
        away: TeamId(away),
        home_score,
        away_score,
    }
}

// ---------------------------------------------------------------------------
// Team directory (JSON)
// ---------------------------------------------------------------------------

pub fn load_teams(path: impl AsRef<Path>) -> BracketResult<TeamDirectory> {
    let path = path.as_ref();
    let content = read(path)?;
    let teams = parse_teams(&content, &path.display().to_string())?;
    info!("loaded {} teams from {}", teams.len(), path.display());
    Ok(teams)
}

pub fn parse_teams(content: &str, source: &str) -> BracketResult<TeamDirectory> {
    let raw: TeamsFile =
        serde_json::from_str(content).map_err(|e| BracketError::Parsing(e, source.to_owned()))?;
    TeamDirectory::from_teams(raw.teams.into_iter().map(map_team))
}

fn map_team(t: TeamRecord) -> Team {
    Team {
        id: TeamId(t.id),
        code: t.code,
        name: t.name,
        offense: t.offense,
        defense: t.defense,
    }
}

fn read(path: &Path) -> BracketResult<String> {
    std::fs::read_to_string(path).map_err(|e| BracketError::Io(e, path.display().to_string()))
}
