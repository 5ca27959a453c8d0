use log::LevelFilter;
use std::path::PathBuf;

/// Overrides the default log level: `error`, `warn`, `info`, `debug` or `trace`.
pub const LOG_LEVEL_ENV: &str = "MMBRACKET_LOG";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub season_path: Option<PathBuf>,
    pub teams_path: Option<PathBuf>,
    pub bracket_path: Option<PathBuf>,
    /// Substitute display codes for ids when a teams file is present.
    pub use_codes: bool,
    pub log_level: LevelFilter,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            season_path: None,
            teams_path: None,
            bracket_path: None,
            use_codes: true,
            log_level: LevelFilter::Warn,
        }
    }
}

impl AppSettings {
    pub fn load(verbose: bool) -> Self {
        let env_level = std::env::var(LOG_LEVEL_ENV).ok();
        Self { log_level: resolve_log_level(env_level.as_deref(), verbose), ..Self::default() }
    }
}

/// `--verbose` wins over the environment; an unparseable value keeps the default.
fn resolve_log_level(env_level: Option<&str>, verbose: bool) -> LevelFilter {
    if verbose {
        return LevelFilter::Debug;
    }
    env_level
        .and_then(|level| level.trim().parse().ok())
        .unwrap_or(LevelFilter::Warn)
}
