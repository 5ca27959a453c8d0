use crate::components::bracket::BracketView;
use crate::state::app_settings::AppSettings;
use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use ncaa_bracket::predict::{Prediction, predict_score};
use ncaa_bracket::{BracketTable, TeamDirectory, TeamId, loader};

/// A reconstructed table, translated to display codes when a directory was available.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedTable {
    Ids(BracketTable<TeamId>),
    Codes(BracketTable<String>),
}

pub struct App {
    pub settings: AppSettings,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        Self { settings }
    }

    // -----------------------------------------------------------------------
    // Input loading
    // -----------------------------------------------------------------------

    fn load_teams(&self) -> Result<Option<TeamDirectory>> {
        let Some(path) = &self.settings.teams_path else {
            return Ok(None);
        };
        let teams = loader::load_teams(path)
            .with_context(|| format!("loading teams from {}", path.display()))?;
        Ok(Some(teams))
    }

    fn load_seeding(&self, teams: Option<&TeamDirectory>) -> Result<Option<Vec<TeamId>>> {
        let Some(path) = &self.settings.bracket_path else {
            return Ok(None);
        };
        let tokens = loader::load_starting_bracket(path)
            .with_context(|| format!("loading starting bracket from {}", path.display()))?;
        let seeding = loader::resolve_seeding(&tokens, teams).context("resolving starting bracket")?;
        Ok(Some(seeding))
    }

    // -----------------------------------------------------------------------
    // Pipeline: load → reconstruct → substitute codes
    // -----------------------------------------------------------------------

    pub fn reconstruct(&self) -> Result<LoadedTable> {
        let season_path = self
            .settings
            .season_path
            .as_ref()
            .ok_or_else(|| anyhow!("no season results file given"))?;
        let season = loader::load_season(season_path)
            .with_context(|| format!("loading season from {}", season_path.display()))?;
        let teams = self.load_teams()?;
        let seeding = self.load_seeding(teams.as_ref())?;

        let table = match &seeding {
            Some(seeding) => ncaa_bracket::make_seeded_bracket_structure(&season, seeding),
            None => ncaa_bracket::make_bracket_structure(&season),
        }
        .context("reconstructing bracket")?;
        info!("reconstructed {} rounds", table.num_rounds());

        match teams {
            Some(teams) if self.settings.use_codes => {
                debug!("substituting display codes");
                let codes = ncaa_bracket::substitute_codes(table, &teams)
                    .context("translating team ids to codes")?;
                Ok(LoadedTable::Codes(codes))
            }
            _ => Ok(LoadedTable::Ids(table)),
        }
    }

    pub fn render(&self) -> Result<String> {
        Ok(match self.reconstruct()? {
            LoadedTable::Ids(table) => BracketView::new(&table).render(),
            LoadedTable::Codes(table) => BracketView::new(&table).render(),
        })
    }

    pub fn table_json(&self) -> Result<String> {
        let json = match self.reconstruct()? {
            LoadedTable::Ids(table) => serde_json::to_string_pretty(&table)?,
            LoadedTable::Codes(table) => serde_json::to_string_pretty(&table)?,
        };
        Ok(json)
    }

    pub fn predict(&self, first: &str, second: &str) -> Result<Prediction> {
        let teams = self
            .load_teams()?
            .ok_or_else(|| anyhow!("score prediction needs a teams file"))?;
        let prediction = predict_score(&teams, first, second)
            .with_context(|| format!("predicting {first} vs {second}"))?;
        Ok(prediction)
    }
}
