use std::collections::{HashMap, HashSet};

use crate::analysis::aggregator::{Snapshot, TeamProfile};
use crate::analysis::{pct, round3};
use crate::catalog::ChampionCatalog;
use crate::corpus::MatchCorpus;
use crate::draft_rules::ActionType;
use crate::error::AppError;

/// Pick rate a champion needs to count as a comfort pick.
const COMFORT_PICK_RATE: f64 = 15.0;
const COMFORT_MIN_GAMES: u32 = 3;
/// Win rate a comfort pick needs to become a ban target.
const BAN_TARGET_WIN_RATE: f64 = 55.0;

/// Share of a player's games on one champion that flags a one-trick.
const ONE_TRICK_RATE: f64 = 50.0;
const ONE_TRICK_HIGH_RATE: f64 = 70.0;
const ONE_TRICK_MIN_GAMES: u32 = 3;

#[derive(Debug, Clone)]
pub struct RatedBan {
    pub champion: String,
    pub count: u32,
    pub rate: f64,
}

#[derive(Debug, Clone)]
pub struct CountedPick {
    pub champion: String,
    pub count: u32,
}

#[derive(Debug, Clone)]
pub struct BanPriorities {
    pub bans_by_team: Vec<RatedBan>,
    pub bans_against_team: Vec<RatedBan>,
    pub first_ban_blue: Vec<CountedPick>,
    pub first_ban_red: Vec<CountedPick>,
}

#[derive(Debug, Clone)]
pub struct FirstPickPreference {
    pub champion: String,
    pub count: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone)]
pub struct ComfortPick {
    pub champion: String,
    pub games: u32,
    pub wins: u32,
    pub pick_rate: f64,
    pub win_rate: f64,
    pub above_average: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    High,
    Medium,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OneTrickAlert {
    pub player_name: String,
    pub champion: String,
    pub games: u32,
    pub total_games: u32,
    pub concentration: f64,
    pub win_rate: f64,
    pub unique_champions: u32,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default)]
pub struct CompositionTendencies {
    pub tag_distribution: Vec<(String, f64)>,
    pub role_distribution: Vec<(String, f64)>,
}

#[derive(Debug, Clone)]
pub struct BanRecommendation {
    pub champion: String,
    pub reason: String,
    pub priority: Severity,
    pub impact_score: f64,
}

#[derive(Debug, Clone)]
pub struct TeamPatterns {
    pub team_id: String,
    pub team_name: String,
    pub total_games: u32,
    pub ban_priorities: BanPriorities,
    pub first_pick_preferences: Vec<FirstPickPreference>,
    pub blue_games: u32,
    pub comfort_picks: Vec<ComfortPick>,
    pub one_trick_alerts: Vec<OneTrickAlert>,
    pub composition_tendencies: CompositionTendencies,
    pub adaptation_notes: Vec<String>,
    pub ban_recommendations: Vec<BanRecommendation>,
}

/// Full draft-tendency report for one team.
pub fn detect_patterns(
    snapshot: &Snapshot,
    corpus: &MatchCorpus,
    catalog: &ChampionCatalog,
    team_id: &str,
) -> Result<TeamPatterns, AppError> {
    let profile = snapshot.team(team_id)?;

    Ok(TeamPatterns {
        team_id: team_id.to_string(),
        team_name: profile.team_name.clone(),
        total_games: profile.total_games,
        ban_priorities: analyze_ban_priorities(profile),
        first_pick_preferences: analyze_first_picks(profile),
        blue_games: profile.blue_games,
        comfort_picks: analyze_comfort_picks(profile),
        one_trick_alerts: detect_one_tricks(profile),
        composition_tendencies: analyze_comp_tendencies(profile, catalog),
        adaptation_notes: detect_adaptation(corpus, team_id),
        ban_recommendations: ban_recommendations(profile),
    })
}

fn analyze_ban_priorities(profile: &TeamProfile) -> BanPriorities {
    let rated = |table: &HashMap<String, u32>, limit: usize| -> Vec<RatedBan> {
        TeamProfile::top_counts(table, limit)
            .into_iter()
            .map(|(champion, count)| RatedBan {
                champion: champion.to_string(),
                count,
                rate: pct(count, profile.total_games),
            })
            .collect()
    };

    let counted = |table: &HashMap<String, u32>, limit: usize| -> Vec<CountedPick> {
        TeamProfile::top_counts(table, limit)
            .into_iter()
            .map(|(champion, count)| CountedPick {
                champion: champion.to_string(),
                count,
            })
            .collect()
    };

    BanPriorities {
        bans_by_team: rated(&profile.champion_bans_by, 10),
        bans_against_team: rated(&profile.champion_bans_against, 10),
        first_ban_blue: counted(&profile.first_ban_blue, 5),
        first_ban_red: counted(&profile.first_ban_red, 5),
    }
}

fn analyze_first_picks(profile: &TeamProfile) -> Vec<FirstPickPreference> {
    TeamProfile::top_counts(&profile.first_pick_blue, 5)
        .into_iter()
        .map(|(champion, count)| {
            let win_rate = profile
                .champion_picks
                .get(champion)
                .map(|record| record.win_rate())
                .unwrap_or(0.0);
            FirstPickPreference {
                champion: champion.to_string(),
                count,
                win_rate,
            }
        })
        .collect()
}

fn analyze_comfort_picks(profile: &TeamProfile) -> Vec<ComfortPick> {
    let mut comfort: Vec<ComfortPick> = profile
        .champion_picks
        .iter()
        .filter_map(|(champion, record)| {
            let pick_rate = pct(record.games, profile.total_games);
            if pick_rate < COMFORT_PICK_RATE || record.games < COMFORT_MIN_GAMES {
                return None;
            }
            let win_rate = record.win_rate();
            Some(ComfortPick {
                champion: champion.clone(),
                games: record.games,
                wins: record.wins,
                pick_rate,
                win_rate,
                above_average: win_rate > profile.win_rate,
            })
        })
        .collect();

    comfort.sort_by(|a, b| {
        b.pick_rate
            .partial_cmp(&a.pick_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.win_rate
                    .partial_cmp(&a.win_rate)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.champion.cmp(&b.champion))
    });
    comfort.truncate(10);
    comfort
}

fn detect_one_tricks(profile: &TeamProfile) -> Vec<OneTrickAlert> {
    let mut alerts = Vec::new();

    for (player_name, pool) in &profile.player_pools {
        let total_games: u32 = pool.values().map(|r| r.games).sum();
        if total_games < ONE_TRICK_MIN_GAMES {
            continue;
        }

        let top = pool
            .iter()
            .max_by(|a, b| a.1.games.cmp(&b.1.games).then_with(|| b.0.cmp(a.0)));
        if let Some((champion, record)) = top {
            let concentration = pct(record.games, total_games);
            if concentration >= ONE_TRICK_RATE {
                alerts.push(OneTrickAlert {
                    player_name: player_name.clone(),
                    champion: champion.clone(),
                    games: record.games,
                    total_games,
                    concentration,
                    win_rate: record.win_rate(),
                    unique_champions: pool.len() as u32,
                    severity: if concentration >= ONE_TRICK_HIGH_RATE {
                        Severity::High
                    } else {
                        Severity::Medium
                    },
                });
            }
        }
    }

    alerts.sort_by(|a, b| {
        b.concentration
            .partial_cmp(&a.concentration)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.player_name.cmp(&b.player_name))
    });
    alerts
}

/// Tag and role distribution across historical picks, weighted by games.
fn analyze_comp_tendencies(profile: &TeamProfile, catalog: &ChampionCatalog) -> CompositionTendencies {
    let mut tag_counts: HashMap<&'static str, u32> = HashMap::new();
    let mut role_counts: HashMap<&'static str, u32> = HashMap::new();

    for (champion, record) in &profile.champion_picks {
        if let Some(entry) = catalog.get(champion) {
            for tag in &entry.tags {
                *tag_counts.entry(tag.as_str()).or_insert(0) += record.games;
            }
            *role_counts
                .entry(entry.primary_role.as_str())
                .or_insert(0) += record.games;
        }
    }

    let total_picks: u32 = profile
        .champion_picks
        .values()
        .map(|r| r.games)
        .sum::<u32>()
        .max(1);

    let distribute = |counts: HashMap<&'static str, u32>| -> Vec<(String, f64)> {
        let mut dist: Vec<(String, f64)> = counts
            .into_iter()
            .map(|(key, count)| (key.to_string(), pct(count, total_picks)))
            .collect();
        dist.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        dist
    };

    CompositionTendencies {
        tag_distribution: distribute(tag_counts),
        role_distribution: distribute(role_counts),
    }
}

/// Diff bans/picks between games 1 and 2 of each multi-game series the team
/// played, up to 5 notes across the first 3 qualifying series.
fn detect_adaptation(corpus: &MatchCorpus, team_id: &str) -> Vec<String> {
    let mut notes = Vec::new();
    let mut qualifying = 0;

    for series in &corpus.series {
        if notes.len() >= 5 {
            break;
        }
        let featured = series.games.iter().any(|game| {
            game.draft_actions.iter().any(|a| a.team_id == team_id)
        });
        if !featured || series.games.len() < 2 {
            continue;
        }
        qualifying += 1;
        if qualifying > 3 {
            break;
        }

        let team_actions = |game_idx: usize, action: ActionType| -> HashSet<String> {
            series.games[game_idx]
                .draft_actions
                .iter()
                .filter(|a| a.team_id == team_id && a.action_type == action)
                .map(|a| a.champion_name.clone())
                .collect()
        };

        let g1_bans = team_actions(0, ActionType::Ban);
        let g2_bans = team_actions(1, ActionType::Ban);
        let g1_picks = team_actions(0, ActionType::Pick);
        let g2_picks = team_actions(1, ActionType::Pick);

        let mut added_bans: Vec<&String> = g2_bans.difference(&g1_bans).collect();
        added_bans.sort();
        if !added_bans.is_empty() {
            notes.push(format!(
                "Changed bans between G1-G2: added {}",
                added_bans
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        let mut repeated: Vec<&String> = g1_picks.intersection(&g2_picks).collect();
        repeated.sort();
        if !repeated.is_empty() {
            notes.push(format!(
                "Repeated picks G1-G2: {}",
                repeated
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
    }

    if notes.is_empty() {
        notes.push("Insufficient multi-game series data for adaptation analysis".to_string());
    }
    notes.truncate(5);
    notes
}

/// Ban recommendations against a team: proven comfort picks, high-severity
/// one-tricks, then first-pick priorities, deduplicated by champion and
/// ranked by impact.
pub fn ban_recommendations(profile: &TeamProfile) -> Vec<BanRecommendation> {
    let mut recommendations: Vec<BanRecommendation> = Vec::new();

    for (champion, record) in &profile.champion_picks {
        if record.games < COMFORT_MIN_GAMES {
            continue;
        }
        let win_rate = record.win_rate();
        let pick_rate = pct(record.games, profile.total_games);
        if win_rate >= BAN_TARGET_WIN_RATE && pick_rate >= COMFORT_PICK_RATE {
            recommendations.push(BanRecommendation {
                champion: champion.clone(),
                reason: format!(
                    "High win rate comfort pick ({:.0}% WR in {} games)",
                    win_rate, record.games
                ),
                priority: Severity::High,
                impact_score: round3((win_rate / 100.0) * (pick_rate / 100.0)),
            });
        }
    }

    for alert in detect_one_tricks(profile) {
        if alert.severity == Severity::High
            && !recommendations.iter().any(|r| r.champion == alert.champion)
        {
            recommendations.push(BanRecommendation {
                champion: alert.champion.clone(),
                reason: format!(
                    "One-trick for {} ({:.0}% pick rate)",
                    alert.player_name, alert.concentration
                ),
                priority: Severity::High,
                impact_score: round3(alert.concentration / 100.0),
            });
        }
    }

    for (champion, count) in TeamProfile::top_counts(&profile.first_pick_blue, 3) {
        if count >= 2 && !recommendations.iter().any(|r| r.champion == champion) {
            recommendations.push(BanRecommendation {
                champion: champion.to_string(),
                reason: format!("First pick priority ({} times on blue side)", count),
                priority: Severity::Medium,
                impact_score: round3(count as f64 / profile.blue_games.max(1) as f64),
            });
        }
    }

    recommendations.sort_by(|a, b| {
        b.impact_score
            .partial_cmp(&a.impact_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.champion.cmp(&b.champion))
    });
    recommendations.truncate(5);
    recommendations
}

#[derive(Debug, Clone)]
pub struct TeamSummary {
    pub team_id: String,
    pub team_name: String,
    pub total_games: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone)]
pub struct TeamMatchup {
    pub team1: TeamSummary,
    pub team2: TeamSummary,
    pub shared_priority_picks: Vec<String>,
    pub shared_priority_bans: Vec<String>,
    pub ban_recommendations_vs_team1: Vec<BanRecommendation>,
    pub ban_recommendations_vs_team2: Vec<BanRecommendation>,
}

/// Head-to-head scouting: where both teams' priorities collide, plus the
/// mutual ban plans.
pub fn matchup(snapshot: &Snapshot, team1_id: &str, team2_id: &str) -> Result<TeamMatchup, AppError> {
    let team1 = snapshot.team(team1_id)?;
    let team2 = snapshot.team(team2_id)?;

    let top_pick_set = |profile: &TeamProfile, limit: usize| -> HashSet<String> {
        profile
            .top_picks(limit)
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect()
    };
    let top_ban_set = |profile: &TeamProfile, limit: usize| -> HashSet<String> {
        TeamProfile::top_counts(&profile.champion_bans_by, limit)
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect()
    };

    let mut shared_picks: Vec<String> = top_pick_set(team1, 15)
        .intersection(&top_pick_set(team2, 15))
        .cloned()
        .collect();
    shared_picks.sort();

    let mut shared_bans: Vec<String> = top_ban_set(team1, 10)
        .intersection(&top_ban_set(team2, 10))
        .cloned()
        .collect();
    shared_bans.sort();

    let summary = |profile: &TeamProfile| TeamSummary {
        team_id: profile.team_id.clone(),
        team_name: profile.team_name.clone(),
        total_games: profile.total_games,
        win_rate: profile.win_rate,
    };

    Ok(TeamMatchup {
        team1: summary(team1),
        team2: summary(team2),
        shared_priority_picks: shared_picks,
        shared_priority_bans: shared_bans,
        ban_recommendations_vs_team1: ban_recommendations(team1),
        ban_recommendations_vs_team2: ban_recommendations(team2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregator::{PickRecord, Snapshot};
    use crate::analysis::round1;
    use crate::corpus::fixtures;

    fn profile_with_picks(picks: &[(&str, u32, u32)], total_games: u32, total_wins: u32) -> TeamProfile {
        TeamProfile {
            team_id: "t1".to_string(),
            team_name: "Team One".to_string(),
            total_games,
            total_wins,
            win_rate: round1(total_wins as f64 / total_games.max(1) as f64 * 100.0),
            champion_picks: picks
                .iter()
                .map(|(name, games, wins)| {
                    (
                        name.to_string(),
                        PickRecord {
                            games: *games,
                            wins: *wins,
                        },
                    )
                })
                .collect(),
            ..TeamProfile::default()
        }
    }

    #[test]
    fn azir_qualifies_as_comfort_pick() {
        // 10 of 40 games -> 25% pick rate, 60% WR on the champion.
        let mut profile = profile_with_picks(&[("Azir", 10, 6)], 40, 18);
        let comfort = analyze_comfort_picks(&profile);
        assert_eq!(comfort.len(), 1);
        let azir = &comfort[0];
        assert_eq!(azir.pick_rate, 25.0);
        assert_eq!(azir.win_rate, 60.0);
        // Team WR is 45: 60 > 45
        assert!(azir.above_average);

        // Same pick for a 70% win-rate team is below average
        profile.win_rate = 70.0;
        let comfort = analyze_comfort_picks(&profile);
        assert!(!comfort[0].above_average);
    }

    #[test]
    fn low_frequency_picks_are_not_comfort() {
        // 2 games misses the minimum; 5% pick rate misses the threshold.
        let profile = profile_with_picks(&[("Azir", 2, 2), ("Ahri", 2, 1)], 40, 20);
        assert!(analyze_comfort_picks(&profile).is_empty());
    }

    #[test]
    fn one_trick_severity_thresholds() {
        let mut profile = TeamProfile {
            total_games: 10,
            ..TeamProfile::default()
        };
        // 8 of 10 games on Azir: high severity
        let mut pool = HashMap::new();
        pool.insert("Azir".to_string(), PickRecord { games: 8, wins: 5 });
        pool.insert("Ahri".to_string(), PickRecord { games: 2, wins: 1 });
        profile.player_pools.insert("Faker".to_string(), pool);

        // 6 of 10: medium severity
        let mut pool = HashMap::new();
        pool.insert("Jinx".to_string(), PickRecord { games: 6, wins: 3 });
        pool.insert("Zeri".to_string(), PickRecord { games: 4, wins: 2 });
        profile.player_pools.insert("Gumayusi".to_string(), pool);

        // 2 total games: below minimum, ignored
        let mut pool = HashMap::new();
        pool.insert("Thresh".to_string(), PickRecord { games: 2, wins: 1 });
        profile.player_pools.insert("Keria".to_string(), pool);

        let alerts = detect_one_tricks(&profile);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].player_name, "Faker");
        assert_eq!(alerts[0].severity, Severity::High);
        assert_eq!(alerts[1].player_name, "Gumayusi");
        assert_eq!(alerts[1].severity, Severity::Medium);
    }

    #[test]
    fn ban_recommendations_deduplicate_and_rank_by_impact() {
        let mut profile = profile_with_picks(&[("Azir", 10, 7), ("Ahri", 8, 6)], 20, 12);
        // Azir is also a one-trick and a first-pick priority; it must appear
        // exactly once.
        let mut pool = HashMap::new();
        pool.insert("Azir".to_string(), PickRecord { games: 10, wins: 7 });
        pool.insert("Ahri".to_string(), PickRecord { games: 2, wins: 1 });
        profile.player_pools.insert("Mid".to_string(), pool);
        profile.first_pick_blue.insert("Azir".to_string(), 4);
        profile.blue_games = 10;

        let recs = ban_recommendations(&profile);
        let azir_count = recs.iter().filter(|r| r.champion == "Azir").count();
        assert_eq!(azir_count, 1);
        assert!(recs.len() <= 5);
        for pair in recs.windows(2) {
            assert!(pair[0].impact_score >= pair[1].impact_score);
        }
    }

    #[test]
    fn unknown_team_is_a_not_found_error() {
        let snapshot = Snapshot::default();
        let corpus = fixtures::corpus(vec![]);
        let catalog = ChampionCatalog::new();
        let result = detect_patterns(&snapshot, &corpus, &catalog, "nobody");
        assert!(matches!(result, Err(AppError::TeamNotFound(_))));
    }

    #[test]
    fn adaptation_notes_from_fixture_series() {
        use crate::analysis::aggregator::aggregate;
        // Identical games in one series: picks repeat, bans never change.
        let corpus = fixtures::corpus(vec![fixtures::series("s1", 3, 2)]);
        let snapshot = aggregate(&corpus);
        let catalog = ChampionCatalog::new();

        let patterns = detect_patterns(&snapshot, &corpus, &catalog, "t1").unwrap();
        assert!(patterns
            .adaptation_notes
            .iter()
            .any(|n| n.starts_with("Repeated picks")));
        assert!(!patterns
            .adaptation_notes
            .iter()
            .any(|n| n.starts_with("Changed bans")));
    }

    #[test]
    fn no_series_data_reports_insufficient() {
        let corpus = fixtures::corpus(vec![fixtures::series("s1", 1, 1)]);
        let notes = detect_adaptation(&corpus, "t1");
        assert_eq!(notes.len(), 1);
        assert!(notes[0].contains("Insufficient"));
    }

    #[test]
    fn matchup_reports_shared_priorities() {
        use crate::analysis::aggregator::aggregate;
        // Both teams play the same matchup every game, so each team's picks
        // differ but their ban targets overlap with nothing; shared pick
        // sets are disjoint in this fixture.
        let corpus = fixtures::corpus(vec![fixtures::series("s1", 3, 2)]);
        let snapshot = aggregate(&corpus);

        let result = matchup(&snapshot, "t1", "t2").unwrap();
        assert_eq!(result.team1.total_games, 3);
        assert!(result.shared_priority_picks.is_empty());
        assert!(matchup(&snapshot, "t1", "missing").is_err());
    }
}
