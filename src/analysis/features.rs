use crate::analysis::aggregator::{ChampionStats, Snapshot};
use crate::analysis::composition::{counter_score, synergy_score};
use crate::catalog::{ChampionCatalog, Tag};

pub const FEATURE_COUNT: usize = 40;

/// Fixed feature order consumed by the win classifier. Training and runtime
/// share this list; reordering it invalidates any saved model.
#[allow(dead_code)]
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "blue_avg_wr",
    "red_avg_wr",
    "blue_avg_pick_rate",
    "red_avg_pick_rate",
    "blue_avg_presence",
    "red_avg_presence",
    "blue_physical",
    "red_physical",
    "blue_magic",
    "red_magic",
    "blue_mixed",
    "red_mixed",
    "blue_avg_cc",
    "red_avg_cc",
    "blue_early",
    "red_early",
    "blue_mid",
    "red_mid",
    "blue_late",
    "red_late",
    "blue_engage",
    "red_engage",
    "blue_role_coverage",
    "red_role_coverage",
    "blue_dmg_balance",
    "red_dmg_balance",
    "blue_avg_synergy",
    "red_avg_synergy",
    "counter_blue_vs_red",
    "counter_red_vs_blue",
    "blue_team_wr",
    "red_team_wr",
    "blue_team_games_log",
    "red_team_games_log",
    "blue_team_affinity",
    "red_team_affinity",
    "blue_tanks",
    "red_tanks",
    "blue_assassins",
    "red_assassins",
];

fn avg_stat(
    picks: &[String],
    snapshot: &Snapshot,
    select: impl Fn(&ChampionStats) -> f64,
    default: f64,
) -> f64 {
    let values: Vec<f64> = picks
        .iter()
        .filter_map(|name| snapshot.champion_stats.get(name))
        .map(&select)
        .collect();
    if values.is_empty() {
        default
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Average of pick_freq * win_rate over the team's history with each pick.
fn team_affinity(picks: &[String], team_id: Option<&str>, snapshot: &Snapshot) -> f64 {
    let profile = match team_id.and_then(|id| snapshot.team_profiles.get(id)) {
        Some(profile) => profile,
        None => return 0.0,
    };
    let total_games = profile.total_games.max(1) as f64;

    let scores: Vec<f64> = picks
        .iter()
        .filter_map(|name| profile.champion_picks.get(name))
        .map(|record| {
            let freq = record.games as f64 / total_games;
            let wr = record.wins as f64 / record.games.max(1) as f64;
            freq * wr
        })
        .collect();
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Average counter win rate of `mine` against every opposing pick, 0-1.
fn cross_counter(mine: &[String], theirs: &[String], snapshot: &Snapshot) -> f64 {
    if mine.is_empty() || theirs.is_empty() {
        return 0.5;
    }
    let scores: Vec<f64> = mine
        .iter()
        .map(|champion| counter_score(champion, theirs, &snapshot.pairs))
        .collect();
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Build the 40-feature vector in FEATURE_NAMES order.
pub fn extract_features(
    blue_picks: &[String],
    red_picks: &[String],
    blue_team_id: Option<&str>,
    red_team_id: Option<&str>,
    snapshot: &Snapshot,
    catalog: &ChampionCatalog,
) -> [f64; FEATURE_COUNT] {
    let blue_dmg = catalog.damage_profile(blue_picks);
    let red_dmg = catalog.damage_profile(red_picks);
    let blue_scaling = catalog.scaling_profile(blue_picks);
    let red_scaling = catalog.scaling_profile(red_picks);

    let team_stat = |team_id: Option<&str>| {
        team_id
            .and_then(|id| snapshot.team_profiles.get(id))
            .map(|profile| {
                (
                    profile.win_rate / 100.0,
                    (1.0 + profile.total_games as f64).ln() / 6.0,
                )
            })
            .unwrap_or((0.5, 0.0))
    };
    let (blue_team_wr, blue_team_games_log) = team_stat(blue_team_id);
    let (red_team_wr, red_team_games_log) = team_stat(red_team_id);

    [
        avg_stat(blue_picks, snapshot, |c| c.win_rate, 50.0) / 100.0,
        avg_stat(red_picks, snapshot, |c| c.win_rate, 50.0) / 100.0,
        avg_stat(blue_picks, snapshot, |c| c.pick_rate, 10.0) / 100.0,
        avg_stat(red_picks, snapshot, |c| c.pick_rate, 10.0) / 100.0,
        avg_stat(blue_picks, snapshot, |c| c.presence, 20.0) / 100.0,
        avg_stat(red_picks, snapshot, |c| c.presence, 20.0) / 100.0,
        blue_dmg.physical as f64,
        red_dmg.physical as f64,
        blue_dmg.magic as f64,
        red_dmg.magic as f64,
        blue_dmg.mixed as f64,
        red_dmg.mixed as f64,
        catalog.cc_average(blue_picks),
        catalog.cc_average(red_picks),
        blue_scaling.early as f64,
        red_scaling.early as f64,
        blue_scaling.mid as f64,
        red_scaling.mid as f64,
        blue_scaling.late as f64,
        red_scaling.late as f64,
        catalog.engage_count(blue_picks) as f64,
        catalog.engage_count(red_picks) as f64,
        if catalog.role_coverage(blue_picks).complete() { 1.0 } else { 0.0 },
        if catalog.role_coverage(red_picks).complete() { 1.0 } else { 0.0 },
        blue_dmg.balance(),
        red_dmg.balance(),
        synergy_score(blue_picks, &snapshot.pairs),
        synergy_score(red_picks, &snapshot.pairs),
        cross_counter(blue_picks, red_picks, snapshot),
        cross_counter(red_picks, blue_picks, snapshot),
        blue_team_wr,
        red_team_wr,
        blue_team_games_log,
        red_team_games_log,
        team_affinity(blue_picks, blue_team_id, snapshot),
        team_affinity(red_picks, red_team_id, snapshot),
        catalog.tag_count(blue_picks, Tag::Tank) as f64,
        catalog.tag_count(red_picks, Tag::Tank) as f64,
        catalog.tag_count(blue_picks, Tag::Assassin) as f64,
        catalog.tag_count(red_picks, Tag::Assassin) as f64,
    ]
}
