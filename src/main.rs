mod analysis;
mod catalog;
mod config;
mod corpus;
mod display;
mod draft_rules;
mod error;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;

use analysis::aggregator::{Aggregator, Snapshot};
use analysis::patterns;
use analysis::recommendation::{self, DraftActionInput};
use analysis::win_prob::WinProbabilityEstimator;
use catalog::{ChampionCatalog, Role};
use config::Config;
use corpus::MatchCorpus;
use display::output::{
    display_champion_detail, display_champion_list, display_error, display_info,
    display_matchup, display_patterns, display_recommendations, display_simulation,
    display_snapshot_summary, display_success, display_team_detail, display_team_list,
};
use error::AppError;

#[derive(Parser, Debug)]
#[command(name = "Draft Scout")]
#[command(about = "Draft pick/ban recommendations from a corpus of pro matches", long_about = None)]
struct Args {
    /// Directory containing the corpus and model artifacts (default: ./data)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Corpus file override (default: <data-dir>/draft_corpus.json)
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Win model artifact override
    #[arg(long)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate the corpus and print snapshot totals
    Aggregate,

    /// List champions from the aggregated snapshot
    Champions {
        /// Sort key: presence, win_rate, pick_rate, ban_rate, games_played, name
        #[arg(short, long, default_value = "presence")]
        sort_by: String,

        /// Filter by primary role (top, jungle, mid, bot, support)
        #[arg(short, long)]
        role: Option<String>,

        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Champion detail with synergies, matchups and team usage
    Champion { name: String },

    /// List teams from the aggregated snapshot
    Teams {
        /// Substring match on team name
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Team profile detail
    Team { team_id: String },

    /// Rank candidates for the next draft action
    Recommend {
        /// JSON file with the draft actions taken so far
        #[arg(long)]
        actions: Option<PathBuf>,

        #[arg(long)]
        blue_team: Option<String>,

        #[arg(long)]
        red_team: Option<String>,

        /// Explicit next position (1-20); defaults to one past the actions
        #[arg(long)]
        sequence: Option<u8>,
    },

    /// Analyze a hypothetical or finished draft for both sides
    Simulate {
        /// Comma-separated blue picks
        #[arg(long)]
        blue: String,

        /// Comma-separated red picks
        #[arg(long)]
        red: String,

        #[arg(long)]
        blue_team: Option<String>,

        #[arg(long)]
        red_team: Option<String>,
    },

    /// Draft tendency report for a team
    Patterns { team_id: String },

    /// Head-to-head scouting report for two teams
    Matchup { team1: String, team2: String },
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(model) = args.model {
        config.model_path = Some(model);
    }

    let catalog = ChampionCatalog::new();
    display_success(&format!(
        "Champion catalog loaded ({} champions)",
        catalog.len()
    ));

    let corpus_path = args.corpus.unwrap_or_else(|| config.corpus_path());
    display_info(&format!("Loading corpus from {}", corpus_path.display()));
    let corpus = MatchCorpus::load(&corpus_path, &catalog)
        .with_context(|| format!("could not load corpus {}", corpus_path.display()))?;
    display_success(&format!(
        "Loaded {} series ({} games)",
        corpus.series.len(),
        corpus.total_games()
    ));

    let snapshot = build_snapshot(&corpus);
    if snapshot.retained_games == 0 {
        return Err(AppError::InsufficientData(
            "corpus contains no complete games".to_string(),
        )
        .into());
    }
    display_success(&format!(
        "Aggregated {} games ({} rejected)",
        snapshot.retained_games, snapshot.rejected_games
    ));

    let estimator = build_estimator(&config);

    match args.command {
        Command::Aggregate => {
            display_snapshot_summary(&snapshot);
        }
        Command::Champions {
            sort_by,
            role,
            limit,
        } => {
            let role = match role {
                Some(raw) => Some(Role::parse(&raw).ok_or_else(|| {
                    AppError::ConfigError(format!("Unknown role: {}", raw))
                })?),
                None => None,
            };
            let champions =
                snapshot.champion_list(&sort_by, role.map(|r| r.as_str()), limit, &catalog);
            display_champion_list(&champions);
        }
        Command::Champion { name } => {
            let canonical = catalog.normalize(&name);
            let detail = snapshot.champion_detail(&canonical)?;
            display_champion_detail(&detail, &catalog);
        }
        Command::Teams { search, limit } => {
            let teams = snapshot.team_list(search.as_deref(), limit);
            display_team_list(&teams);
        }
        Command::Team { team_id } => {
            let profile = snapshot.team(&team_id)?;
            display_team_detail(profile, &snapshot);
        }
        Command::Recommend {
            actions,
            blue_team,
            red_team,
            sequence,
        } => {
            let current_actions = match actions {
                Some(path) => load_actions(&path)?,
                None => Vec::new(),
            };
            let result = recommendation::recommend(
                &snapshot,
                &catalog,
                &current_actions,
                blue_team.as_deref(),
                red_team.as_deref(),
                sequence,
            )?;
            display_recommendations(&result);
        }
        Command::Simulate {
            blue,
            red,
            blue_team,
            red_team,
        } => {
            let blue_picks = split_champions(&blue);
            let red_picks = split_champions(&red);
            let simulation = recommendation::simulate_draft(
                &snapshot,
                &catalog,
                &estimator,
                &blue_picks,
                &red_picks,
                blue_team.as_deref(),
                red_team.as_deref(),
            );
            display_simulation(&simulation);
        }
        Command::Patterns { team_id } => {
            let result = patterns::detect_patterns(&snapshot, &corpus, &catalog, &team_id)?;
            display_patterns(&result);
        }
        Command::Matchup { team1, team2 } => {
            let result = patterns::matchup(&snapshot, &team1, &team2)?;
            display_matchup(&result);
        }
    }

    Ok(())
}

fn build_snapshot(corpus: &MatchCorpus) -> Snapshot {
    let pb = ProgressBar::new(corpus.series.len() as u64);
    pb.set_message("Aggregating series");

    let mut aggregator = Aggregator::new();
    for series in &corpus.series {
        aggregator.fold_series(series);
        pb.inc(1);
    }
    pb.finish_and_clear();

    aggregator.finish()
}

fn build_estimator(config: &Config) -> WinProbabilityEstimator {
    let model_path = config.model_path.clone().or_else(|| {
        let default = config.default_model_path();
        default.exists().then_some(default)
    });

    let estimator = WinProbabilityEstimator::from_model_path(model_path.as_deref());
    if estimator.is_learned() {
        display_success("Win model loaded");
    } else if model_path.is_some() {
        display_info("Win model unusable, falling back to heuristic estimates");
    }
    estimator
}

fn load_actions(path: &PathBuf) -> Result<Vec<DraftActionInput>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("could not read actions file {}", path.display()))?;
    let actions: Vec<DraftActionInput> =
        serde_json::from_str(&content).context("could not parse actions file")?;
    Ok(actions)
}

fn split_champions(list: &str) -> Vec<String> {
    list.split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
