mod app;
mod components;
mod state;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mmbracket", version, long_about = None)]
#[command(about = "Rebuild a tournament bracket from game results and draw it in ASCII")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct Inputs {
    /// Season results JSON: one array of games per round
    #[arg(long, env = "MMBRACKET_SEASON")]
    season: PathBuf,
    /// Teams JSON with ids, display codes, names and ratings
    #[arg(long, env = "MMBRACKET_TEAMS")]
    teams: Option<PathBuf>,
    /// Starting bracket text file, one team per line
    #[arg(long, env = "MMBRACKET_BRACKET")]
    bracket: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the bracket as an ASCII diagram
    Render {
        #[command(flatten)]
        inputs: Inputs,
        /// Keep numeric team ids instead of display codes
        #[arg(long)]
        ids: bool,
    },
    /// Print the reconstructed round/slot table as JSON
    Table {
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Predict the score of a game between two teams
    Predict {
        #[arg(long, env = "MMBRACKET_TEAMS")]
        teams: PathBuf,
        first: String,
        second: String,
    },
}

fn main() -> anyhow::Result<()> {
    better_panic::install();

    let cli = Cli::parse();
    let mut settings = AppSettings::load(cli.verbose);
    setup_logger(settings.log_level)?;

    match cli.command {
        Command::Render { inputs, ids } => {
            apply_inputs(&mut settings, inputs);
            settings.use_codes = !ids;
            let app = App::new(settings);
            print!("{}", app.render()?);
        }
        Command::Table { inputs } => {
            apply_inputs(&mut settings, inputs);
            let app = App::new(settings);
            println!("{}", app.table_json()?);
        }
        Command::Predict { teams, first, second } => {
            settings.teams_path = Some(teams);
            let app = App::new(settings);
            println!("{}", app.predict(&first, &second)?);
        }
    }

    Ok(())
}

fn apply_inputs(settings: &mut AppSettings, inputs: Inputs) {
    settings.season_path = Some(inputs.season);
    settings.teams_path = inputs.teams;
    settings.bracket_path = inputs.bracket;
}

/// Logs go to stderr so stdout carries only the diagram.
fn setup_logger(level: LevelFilter) -> anyhow::Result<()> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} - {m}\n")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;

    log4rs::init_config(config)?;
    Ok(())
}
