use std::collections::{HashMap, HashSet};

use crate::analysis::defaults::MIN_PAIR_GAMES;
use crate::analysis::{pct, round1};
use crate::catalog::ChampionCatalog;
use crate::corpus::{GameRecord, MatchCorpus, SeriesRecord, TeamGameRecord};
use crate::draft_rules::{
    ActionType, Side, FIRST_BAN_BLUE_POSITION, FIRST_BAN_RED_POSITION, FIRST_PICK_BLUE_POSITION,
};
use crate::error::AppError;

/// Aggregate record for one champion across the whole corpus. Counts are
/// authoritative; every rate is recomputed from them at finalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChampionStats {
    pub name: String,
    pub games_played: u32,
    pub wins: u32,
    pub picks: u32,
    pub bans: u32,
    pub blue_picks: u32,
    pub blue_wins: u32,
    pub red_picks: u32,
    pub red_wins: u32,
    pub win_rate: f64,
    pub pick_rate: f64,
    pub ban_rate: f64,
    pub presence: f64,
    pub blue_win_rate: f64,
    pub red_win_rate: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    pub avg_damage: f64,
    pub avg_gold: f64,
    pub avg_vision: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairRecord {
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

/// Synergy (symmetric, same-team) and counter (asymmetric, cross-team) pair
/// tables. Counter rows are always read from the perspective champion's side:
/// `counter(mine, opp)` is how `mine` fares against `opp`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChampionPairStats {
    pub synergies: HashMap<String, HashMap<String, PairRecord>>,
    pub counters: HashMap<String, HashMap<String, PairRecord>>,
}

impl ChampionPairStats {
    pub fn synergy(&self, a: &str, b: &str) -> Option<&PairRecord> {
        self.synergies.get(a).and_then(|partners| partners.get(b))
    }

    pub fn counter(&self, mine: &str, opponent: &str) -> Option<&PairRecord> {
        self.counters
            .get(mine)
            .and_then(|matchups| matchups.get(opponent))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PickRecord {
    pub games: u32,
    pub wins: u32,
}

impl PickRecord {
    pub fn win_rate(&self) -> f64 {
        pct(self.wins, self.games)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Loss,
}

impl GameOutcome {
    pub fn as_char(&self) -> char {
        match self {
            GameOutcome::Win => 'W',
            GameOutcome::Loss => 'L',
        }
    }
}

/// Trailing window size for a team's recent results.
pub const RECENT_RESULTS_WINDOW: usize = 20;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamProfile {
    pub team_id: String,
    pub team_name: String,
    pub total_games: u32,
    pub total_wins: u32,
    pub win_rate: f64,
    pub blue_games: u32,
    pub blue_wins: u32,
    pub blue_win_rate: f64,
    pub red_games: u32,
    pub red_wins: u32,
    pub red_win_rate: f64,
    pub series_count: u32,
    pub champion_picks: HashMap<String, PickRecord>,
    pub champion_bans_by: HashMap<String, u32>,
    pub champion_bans_against: HashMap<String, u32>,
    pub first_pick_blue: HashMap<String, u32>,
    pub first_ban_blue: HashMap<String, u32>,
    pub first_ban_red: HashMap<String, u32>,
    pub player_pools: HashMap<String, HashMap<String, PickRecord>>,
    pub recent_results: Vec<GameOutcome>,
}

impl TeamProfile {
    /// Picks sorted by games desc, name asc. Deterministic across runs.
    pub fn top_picks(&self, limit: usize) -> Vec<(&str, PickRecord)> {
        let mut picks: Vec<(&str, PickRecord)> = self
            .champion_picks
            .iter()
            .map(|(name, record)| (name.as_str(), *record))
            .collect();
        picks.sort_by(|a, b| b.1.games.cmp(&a.1.games).then_with(|| a.0.cmp(b.0)));
        picks.truncate(limit);
        picks
    }

    pub fn top_counts(table: &HashMap<String, u32>, limit: usize) -> Vec<(&str, u32)> {
        let mut counts: Vec<(&str, u32)> = table
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        counts.truncate(limit);
        counts
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerChampionRecord {
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerPool {
    #[allow(dead_code)]
    pub player_id: String,
    pub player_name: String,
    pub team_id: String,
    #[allow(dead_code)]
    pub team_name: String,
    pub total_games: u32,
    pub unique_champions: u32,
    pub champions: HashMap<String, PlayerChampionRecord>,
}

/// Immutable snapshot of one aggregation run. A new run replaces the whole
/// snapshot; no field of a live snapshot is ever mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub champion_stats: HashMap<String, ChampionStats>,
    pub pairs: ChampionPairStats,
    pub team_profiles: HashMap<String, TeamProfile>,
    pub player_pools: HashMap<String, PlayerPool>,
    pub total_series: u32,
    pub total_games: u32,
    pub retained_games: u32,
    pub rejected_games: u32,
}

impl Snapshot {
    pub fn champion(&self, name: &str) -> Result<&ChampionStats, AppError> {
        self.champion_stats
            .get(name)
            .ok_or_else(|| AppError::ChampionNotFound(name.to_string()))
    }

    pub fn team(&self, team_id: &str) -> Result<&TeamProfile, AppError> {
        self.team_profiles
            .get(team_id)
            .ok_or_else(|| AppError::TeamNotFound(team_id.to_string()))
    }

    /// Champions sorted by the requested stat, descending (name sorts
    /// ascending). Unknown sort keys fall back to presence.
    pub fn champion_list(&self, sort_by: &str, role: Option<&str>, limit: usize, catalog: &ChampionCatalog) -> Vec<&ChampionStats> {
        let mut champs: Vec<&ChampionStats> = self
            .champion_stats
            .values()
            .filter(|c| match role {
                Some(role) => catalog
                    .get(&c.name)
                    .map(|e| e.primary_role.as_str() == role)
                    .unwrap_or(false),
                None => true,
            })
            .collect();

        let key = |c: &ChampionStats| -> f64 {
            match sort_by {
                "win_rate" => c.win_rate,
                "pick_rate" => c.pick_rate,
                "ban_rate" => c.ban_rate,
                "games_played" => c.games_played as f64,
                _ => c.presence,
            }
        };

        if sort_by == "name" {
            champs.sort_by(|a, b| a.name.cmp(&b.name));
        } else {
            champs.sort_by(|a, b| {
                key(b)
                    .partial_cmp(&key(a))
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.name.cmp(&b.name))
            });
        }
        champs.truncate(limit);
        champs
    }

    pub fn champion_detail(&self, name: &str) -> Result<ChampionDetail, AppError> {
        let stats = self.champion(name)?;

        let top_pairs = |table: &HashMap<String, HashMap<String, PairRecord>>| {
            let mut pairs: Vec<PairView> = table
                .get(&stats.name)
                .map(|partners| {
                    partners
                        .iter()
                        .map(|(champion, record)| PairView {
                            champion: champion.clone(),
                            games: record.games,
                            wins: record.wins,
                            win_rate: record.win_rate,
                        })
                        .collect()
                })
                .unwrap_or_default();
            pairs.sort_by(|a, b| {
                b.games
                    .cmp(&a.games)
                    .then_with(|| {
                        b.win_rate
                            .partial_cmp(&a.win_rate)
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .then_with(|| a.champion.cmp(&b.champion))
            });
            pairs.truncate(10);
            pairs
        };

        let mut picked_by: Vec<TeamPickView> = self
            .team_profiles
            .values()
            .filter_map(|profile| {
                profile.champion_picks.get(&stats.name).map(|record| TeamPickView {
                    team_id: profile.team_id.clone(),
                    team_name: profile.team_name.clone(),
                    games: record.games,
                    wins: record.wins,
                    win_rate: record.win_rate(),
                })
            })
            .collect();
        picked_by.sort_by(|a, b| b.games.cmp(&a.games).then_with(|| a.team_id.cmp(&b.team_id)));
        picked_by.truncate(10);

        Ok(ChampionDetail {
            stats: stats.clone(),
            synergies: top_pairs(&self.pairs.synergies),
            counters: top_pairs(&self.pairs.counters),
            picked_by_teams: picked_by,
        })
    }

    /// Teams matching the search, sorted by games desc.
    pub fn team_list(&self, search: Option<&str>, limit: usize) -> Vec<&TeamProfile> {
        let mut teams: Vec<&TeamProfile> = self
            .team_profiles
            .values()
            .filter(|t| match search {
                Some(s) => t.team_name.to_lowercase().contains(&s.to_lowercase()),
                None => true,
            })
            .collect();
        teams.sort_by(|a, b| {
            b.total_games
                .cmp(&a.total_games)
                .then_with(|| a.team_id.cmp(&b.team_id))
        });
        teams.truncate(limit);
        teams
    }
}

#[derive(Debug, Clone)]
pub struct PairView {
    pub champion: String,
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone)]
pub struct TeamPickView {
    pub team_id: String,
    pub team_name: String,
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone)]
pub struct ChampionDetail {
    pub stats: ChampionStats,
    pub synergies: Vec<PairView>,
    pub counters: Vec<PairView>,
    pub picked_by_teams: Vec<TeamPickView>,
}

// Working accumulators. Raw counts only; rates appear at finalization.

#[derive(Debug, Default)]
struct ChampionAccumulator {
    games_played: u32,
    wins: u32,
    picks: u32,
    bans: u32,
    blue_picks: u32,
    blue_wins: u32,
    red_picks: u32,
    red_wins: u32,
    kills_sum: u32,
    deaths_sum: u32,
    assists_sum: u32,
    damage_sum: f64,
    gold_sum: f64,
    vision_sum: f64,
}

#[derive(Debug, Default)]
struct PairAccumulator {
    games: u32,
    wins: u32,
}

#[derive(Debug, Default)]
struct TeamAccumulator {
    team_name: String,
    total_games: u32,
    total_wins: u32,
    blue_games: u32,
    blue_wins: u32,
    red_games: u32,
    red_wins: u32,
    series_ids: HashSet<String>,
    champion_picks: HashMap<String, PickRecord>,
    champion_bans_by: HashMap<String, u32>,
    champion_bans_against: HashMap<String, u32>,
    first_pick_blue: HashMap<String, u32>,
    first_ban_blue: HashMap<String, u32>,
    first_ban_red: HashMap<String, u32>,
    player_pools: HashMap<String, HashMap<String, PickRecord>>,
    recent_results: Vec<GameOutcome>,
}

#[derive(Debug, Default)]
struct PlayerAccumulator {
    player_name: String,
    team_id: String,
    team_name: String,
    total_games: u32,
    champions: HashMap<String, PlayerChampionAccumulator>,
}

#[derive(Debug, Default)]
struct PlayerChampionAccumulator {
    games: u32,
    wins: u32,
    kills_sum: u32,
    deaths_sum: u32,
    assists_sum: u32,
}

/// Single-pass corpus aggregator. Fold every series, then `finish()` into an
/// immutable snapshot. Folding the same corpus twice from a fresh aggregator
/// yields an identical snapshot.
pub struct Aggregator {
    champions: HashMap<String, ChampionAccumulator>,
    synergy: HashMap<String, HashMap<String, PairAccumulator>>,
    counter: HashMap<String, HashMap<String, PairAccumulator>>,
    teams: HashMap<String, TeamAccumulator>,
    players: HashMap<String, PlayerAccumulator>,
    series_seen: u32,
    retained: u32,
    rejected: u32,
}

impl Aggregator {
    pub fn new() -> Self {
        Aggregator {
            champions: HashMap::new(),
            synergy: HashMap::new(),
            counter: HashMap::new(),
            teams: HashMap::new(),
            players: HashMap::new(),
            series_seen: 0,
            retained: 0,
            rejected: 0,
        }
    }

    pub fn fold_series(&mut self, series: &SeriesRecord) {
        self.series_seen += 1;
        for game in &series.games {
            self.fold_game(&series.series_id, game);
        }
    }

    /// Fold one game. Structurally incomplete games are rejected whole; a
    /// game never contributes partial counters.
    pub fn fold_game(&mut self, series_id: &str, game: &GameRecord) {
        let (Some(blue), Some(red)) = (game.blue_team.as_ref(), game.red_team.as_ref()) else {
            self.rejected += 1;
            return;
        };
        if !game.is_complete() {
            self.rejected += 1;
            return;
        }
        self.retained += 1;

        self.fold_draft_actions(game, blue, red);
        self.fold_player_rows(blue);
        self.fold_player_rows(red);
        self.fold_pairs(blue, red);
        self.fold_team(series_id, blue);
        self.fold_team(series_id, red);
        self.fold_player_pools(blue);
        self.fold_player_pools(red);
    }

    fn fold_draft_actions(&mut self, game: &GameRecord, blue: &TeamGameRecord, red: &TeamGameRecord) {
        for action in game.resolvable_actions() {
            let champ = self
                .champions
                .entry(action.champion_name.clone())
                .or_default();

            match action.action_type {
                ActionType::Ban => {
                    champ.bans += 1;

                    let banner = self.teams.entry(action.team_id.clone()).or_default();
                    *banner
                        .champion_bans_by
                        .entry(action.champion_name.clone())
                        .or_insert(0) += 1;
                    if action.sequence_number == FIRST_BAN_BLUE_POSITION
                        && action.team_side == Side::Blue
                    {
                        *banner
                            .first_ban_blue
                            .entry(action.champion_name.clone())
                            .or_insert(0) += 1;
                    } else if action.sequence_number == FIRST_BAN_RED_POSITION
                        && action.team_side == Side::Red
                    {
                        *banner
                            .first_ban_red
                            .entry(action.champion_name.clone())
                            .or_insert(0) += 1;
                    }

                    let opponent_id = if action.team_id == blue.team_id {
                        &red.team_id
                    } else {
                        &blue.team_id
                    };
                    let target = self.teams.entry(opponent_id.clone()).or_default();
                    *target
                        .champion_bans_against
                        .entry(action.champion_name.clone())
                        .or_insert(0) += 1;
                }
                ActionType::Pick => {
                    champ.picks += 1;
                    match action.team_side {
                        Side::Blue => champ.blue_picks += 1,
                        Side::Red => champ.red_picks += 1,
                    }

                    let team_won = if action.team_id == blue.team_id {
                        blue.won
                    } else {
                        red.won
                    };
                    let picker = self.teams.entry(action.team_id.clone()).or_default();
                    let record = picker
                        .champion_picks
                        .entry(action.champion_name.clone())
                        .or_default();
                    record.games += 1;
                    if team_won {
                        record.wins += 1;
                    }

                    if action.sequence_number == FIRST_PICK_BLUE_POSITION
                        && action.team_side == Side::Blue
                    {
                        *picker
                            .first_pick_blue
                            .entry(action.champion_name.clone())
                            .or_insert(0) += 1;
                    }
                }
            }
        }
    }

    fn fold_player_rows(&mut self, team: &TeamGameRecord) {
        for player in &team.players {
            let champ = self
                .champions
                .entry(player.champion_name.clone())
                .or_default();
            champ.games_played += 1;
            if team.won {
                champ.wins += 1;
                match team.side {
                    Side::Blue => champ.blue_wins += 1,
                    Side::Red => champ.red_wins += 1,
                }
            }
            champ.kills_sum += player.kills;
            champ.deaths_sum += player.deaths;
            champ.assists_sum += player.assists;
            champ.damage_sum += player.damage_dealt;
            champ.gold_sum += player.gold_earned;
            champ.vision_sum += player.vision_score;
        }
    }

    fn fold_pairs(&mut self, blue: &TeamGameRecord, red: &TeamGameRecord) {
        let blue_champs: Vec<&str> = blue.players.iter().map(|p| p.champion_name.as_str()).collect();
        let red_champs: Vec<&str> = red.players.iter().map(|p| p.champion_name.as_str()).collect();

        // Synergy: every unordered teammate pair, counted in both directions
        for (team_champs, won) in [(&blue_champs, blue.won), (&red_champs, red.won)] {
            for i in 0..team_champs.len() {
                for j in (i + 1)..team_champs.len() {
                    for (a, b) in [
                        (team_champs[i], team_champs[j]),
                        (team_champs[j], team_champs[i]),
                    ] {
                        let entry = self
                            .synergy
                            .entry(a.to_string())
                            .or_default()
                            .entry(b.to_string())
                            .or_default();
                        entry.games += 1;
                        if won {
                            entry.wins += 1;
                        }
                    }
                }
            }
        }

        // Counter: every cross-team pair from each side's own perspective
        for blue_champ in &blue_champs {
            for red_champ in &red_champs {
                let from_blue = self
                    .counter
                    .entry(blue_champ.to_string())
                    .or_default()
                    .entry(red_champ.to_string())
                    .or_default();
                from_blue.games += 1;
                if blue.won {
                    from_blue.wins += 1;
                }

                let from_red = self
                    .counter
                    .entry(red_champ.to_string())
                    .or_default()
                    .entry(blue_champ.to_string())
                    .or_default();
                from_red.games += 1;
                if red.won {
                    from_red.wins += 1;
                }
            }
        }
    }

    fn fold_team(&mut self, series_id: &str, team: &TeamGameRecord) {
        let acc = self.teams.entry(team.team_id.clone()).or_default();
        acc.team_name = team.team_name.clone();
        acc.total_games += 1;
        acc.series_ids.insert(series_id.to_string());

        if team.won {
            acc.total_wins += 1;
        }
        match team.side {
            Side::Blue => {
                acc.blue_games += 1;
                if team.won {
                    acc.blue_wins += 1;
                }
            }
            Side::Red => {
                acc.red_games += 1;
                if team.won {
                    acc.red_wins += 1;
                }
            }
        }
        acc.recent_results.push(if team.won {
            GameOutcome::Win
        } else {
            GameOutcome::Loss
        });

        for player in &team.players {
            let pool = acc
                .player_pools
                .entry(player.player_name.clone())
                .or_default();
            let record = pool.entry(player.champion_name.clone()).or_default();
            record.games += 1;
            if team.won {
                record.wins += 1;
            }
        }
    }

    fn fold_player_pools(&mut self, team: &TeamGameRecord) {
        for player in &team.players {
            let acc = self.players.entry(player.player_id.clone()).or_default();
            acc.player_name = player.player_name.clone();
            acc.team_id = team.team_id.clone();
            acc.team_name = team.team_name.clone();
            acc.total_games += 1;

            let champ = acc.champions.entry(player.champion_name.clone()).or_default();
            champ.games += 1;
            if team.won {
                champ.wins += 1;
            }
            champ.kills_sum += player.kills;
            champ.deaths_sum += player.deaths;
            champ.assists_sum += player.assists;
        }
    }

    /// Finalize all derived rates and freeze the snapshot.
    pub fn finish(self) -> Snapshot {
        let total_games = self.retained;

        let champion_stats = self
            .champions
            .into_iter()
            .map(|(name, acc)| {
                let games = acc.games_played.max(1) as f64;
                let stats = ChampionStats {
                    name: name.clone(),
                    games_played: acc.games_played,
                    wins: acc.wins,
                    picks: acc.picks,
                    bans: acc.bans,
                    blue_picks: acc.blue_picks,
                    blue_wins: acc.blue_wins,
                    red_picks: acc.red_picks,
                    red_wins: acc.red_wins,
                    win_rate: pct(acc.wins, acc.games_played),
                    pick_rate: pct(acc.picks, total_games),
                    ban_rate: pct(acc.bans, total_games),
                    presence: pct(acc.picks + acc.bans, total_games),
                    blue_win_rate: pct(acc.blue_wins, acc.blue_picks),
                    red_win_rate: pct(acc.red_wins, acc.red_picks),
                    avg_kills: round1(acc.kills_sum as f64 / games),
                    avg_deaths: round1(acc.deaths_sum as f64 / games),
                    avg_assists: round1(acc.assists_sum as f64 / games),
                    avg_damage: round1(acc.damage_sum / games),
                    avg_gold: round1(acc.gold_sum / games),
                    avg_vision: round1(acc.vision_sum / games),
                };
                (name, stats)
            })
            .collect();

        let finalize_pairs = |table: HashMap<String, HashMap<String, PairAccumulator>>| {
            let mut out: HashMap<String, HashMap<String, PairRecord>> = HashMap::new();
            for (champ, partners) in table {
                let kept: HashMap<String, PairRecord> = partners
                    .into_iter()
                    .filter(|(_, acc)| acc.games >= MIN_PAIR_GAMES)
                    .map(|(partner, acc)| {
                        (
                            partner,
                            PairRecord {
                                games: acc.games,
                                wins: acc.wins,
                                win_rate: pct(acc.wins, acc.games),
                            },
                        )
                    })
                    .collect();
                if !kept.is_empty() {
                    out.insert(champ, kept);
                }
            }
            out
        };

        let team_profiles = self
            .teams
            .into_iter()
            .map(|(team_id, mut acc)| {
                let window_start = acc.recent_results.len().saturating_sub(RECENT_RESULTS_WINDOW);
                let profile = TeamProfile {
                    team_id: team_id.clone(),
                    team_name: acc.team_name.clone(),
                    total_games: acc.total_games,
                    total_wins: acc.total_wins,
                    win_rate: pct(acc.total_wins, acc.total_games),
                    blue_games: acc.blue_games,
                    blue_wins: acc.blue_wins,
                    blue_win_rate: pct(acc.blue_wins, acc.blue_games),
                    red_games: acc.red_games,
                    red_wins: acc.red_wins,
                    red_win_rate: pct(acc.red_wins, acc.red_games),
                    series_count: acc.series_ids.len() as u32,
                    champion_picks: std::mem::take(&mut acc.champion_picks),
                    champion_bans_by: std::mem::take(&mut acc.champion_bans_by),
                    champion_bans_against: std::mem::take(&mut acc.champion_bans_against),
                    first_pick_blue: std::mem::take(&mut acc.first_pick_blue),
                    first_ban_blue: std::mem::take(&mut acc.first_ban_blue),
                    first_ban_red: std::mem::take(&mut acc.first_ban_red),
                    player_pools: std::mem::take(&mut acc.player_pools),
                    recent_results: acc.recent_results.split_off(window_start),
                };
                (team_id, profile)
            })
            .collect();

        let player_pools = self
            .players
            .into_iter()
            .map(|(player_id, acc)| {
                let champions: HashMap<String, PlayerChampionRecord> = acc
                    .champions
                    .into_iter()
                    .map(|(champ, c)| {
                        let games = c.games.max(1) as f64;
                        (
                            champ,
                            PlayerChampionRecord {
                                games: c.games,
                                wins: c.wins,
                                win_rate: pct(c.wins, c.games),
                                avg_kills: round1(c.kills_sum as f64 / games),
                                avg_deaths: round1(c.deaths_sum as f64 / games),
                                avg_assists: round1(c.assists_sum as f64 / games),
                            },
                        )
                    })
                    .collect();
                let pool = PlayerPool {
                    player_id: player_id.clone(),
                    player_name: acc.player_name,
                    team_id: acc.team_id,
                    team_name: acc.team_name,
                    total_games: acc.total_games,
                    unique_champions: champions.len() as u32,
                    champions,
                };
                (player_id, pool)
            })
            .collect();

        Snapshot {
            champion_stats,
            pairs: ChampionPairStats {
                synergies: finalize_pairs(self.synergy),
                counters: finalize_pairs(self.counter),
            },
            team_profiles,
            player_pools,
            total_series: self.series_seen,
            total_games,
            retained_games: self.retained,
            rejected_games: self.rejected,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Aggregator::new()
    }
}

/// One-shot aggregation over a whole corpus.
pub fn aggregate(corpus: &MatchCorpus) -> Snapshot {
    let mut aggregator = Aggregator::new();
    for series in &corpus.series {
        aggregator.fold_series(series);
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::fixtures;

    fn sample_snapshot() -> Snapshot {
        let corpus = fixtures::corpus(vec![fixtures::series("s1", 3, 2), fixtures::series("s2", 2, 1)]);
        aggregate(&corpus)
    }

    #[test]
    fn aggregation_is_idempotent() {
        let corpus = fixtures::corpus(vec![fixtures::series("s1", 3, 2)]);
        let first = aggregate(&corpus);
        let second = aggregate(&corpus);
        assert_eq!(first, second);
    }

    #[test]
    fn win_rate_and_presence_match_hand_computation() {
        // Ahri: red-side pick in all 5 games, red wins 2 of 5.
        let snapshot = sample_snapshot();
        let ahri = snapshot.champion("Ahri").unwrap();
        assert_eq!(ahri.games_played, 5);
        assert_eq!(ahri.wins, 2);
        assert_eq!(ahri.win_rate, 40.0);
        assert_eq!(ahri.picks, 5);
        assert_eq!(ahri.bans, 0);
        assert_eq!(ahri.presence, 100.0);
        assert_eq!(ahri.pick_rate, 100.0);

        // Azir: banned by blue every game, never picked.
        let azir = snapshot.champion("Azir").unwrap();
        assert_eq!(azir.bans, 5);
        assert_eq!(azir.picks, 0);
        assert_eq!(azir.presence, 100.0);
        assert_eq!(azir.games_played, 0);
    }

    #[test]
    fn sixty_percent_win_rate_example() {
        // 20 games, champion's team wins 12 -> 60.0 exactly.
        let corpus = fixtures::corpus(vec![fixtures::series("s1", 20, 12)]);
        let snapshot = aggregate(&corpus);
        let orianna = snapshot.champion("Orianna").unwrap();
        assert_eq!(orianna.games_played, 20);
        assert_eq!(orianna.wins, 12);
        assert_eq!(orianna.win_rate, 60.0);
    }

    #[test]
    fn synergy_tables_stay_symmetric() {
        let snapshot = sample_snapshot();
        for (a, partners) in &snapshot.pairs.synergies {
            for (b, record) in partners {
                let mirror = snapshot
                    .pairs
                    .synergy(b, a)
                    .unwrap_or_else(|| panic!("missing mirror for {} -> {}", a, b));
                assert_eq!(record.games, mirror.games);
                assert_eq!(record.wins, mirror.wins);
            }
        }
    }

    #[test]
    fn counter_wins_are_complementary() {
        // Every blue/red champion pair met in all 5 games; wins must split
        // the games exactly between the two perspectives.
        let snapshot = sample_snapshot();
        let malphite_vs_darius = snapshot.pairs.counter("Malphite", "Darius").unwrap();
        let darius_vs_malphite = snapshot.pairs.counter("Darius", "Malphite").unwrap();
        assert_eq!(malphite_vs_darius.games, 5);
        assert_eq!(darius_vs_malphite.games, 5);
        assert_eq!(
            malphite_vs_darius.wins + darius_vs_malphite.wins,
            malphite_vs_darius.games
        );
    }

    #[test]
    fn thin_pairs_are_dropped() {
        // One game only: every pair has 1 supporting game, below threshold.
        let corpus = fixtures::corpus(vec![fixtures::series("s1", 1, 1)]);
        let snapshot = aggregate(&corpus);
        assert!(snapshot.pairs.synergies.is_empty());
        assert!(snapshot.pairs.counters.is_empty());
    }

    #[test]
    fn malformed_games_are_rejected_individually() {
        let mut series = fixtures::series("s1", 3, 2);
        series.games[1].red_team = None;
        let corpus = fixtures::corpus(vec![series]);
        let snapshot = aggregate(&corpus);

        assert_eq!(snapshot.retained_games, 2);
        assert_eq!(snapshot.rejected_games, 1);
        assert_eq!(snapshot.total_games, 2);
        // The rejected game contributed nothing at all.
        let orianna = snapshot.champion("Orianna").unwrap();
        assert_eq!(orianna.games_played, 2);
    }

    #[test]
    fn team_totals_equal_side_split_sum() {
        let snapshot = sample_snapshot();
        for profile in snapshot.team_profiles.values() {
            assert_eq!(profile.total_games, profile.blue_games + profile.red_games);
            assert_eq!(profile.total_wins, profile.blue_wins + profile.red_wins);
        }
    }

    #[test]
    fn first_pick_and_first_ban_only_at_fixed_positions() {
        let snapshot = sample_snapshot();
        let t1 = snapshot.team("t1").unwrap();
        // Blue first pick is position 7: always Malphite in the fixture.
        assert_eq!(t1.first_pick_blue.get("Malphite"), Some(&5));
        assert_eq!(t1.first_pick_blue.len(), 1);
        // Blue first ban is position 1: always Azir.
        assert_eq!(t1.first_ban_blue.get("Azir"), Some(&5));
        // t1 never played red, so no red first bans.
        assert!(t1.first_ban_red.is_empty());

        let t2 = snapshot.team("t2").unwrap();
        assert_eq!(t2.first_ban_red.get("Rakan"), Some(&5));
        assert!(t2.first_pick_blue.is_empty());
    }

    #[test]
    fn series_count_and_recent_results_are_tracked() {
        let snapshot = sample_snapshot();
        let t1 = snapshot.team("t1").unwrap();
        assert_eq!(t1.series_count, 2);
        assert_eq!(t1.total_games, 5);
        assert_eq!(t1.recent_results.len(), 5);
    }

    #[test]
    fn player_pools_accumulate_per_champion() {
        let snapshot = sample_snapshot();
        let pool = snapshot.player_pools.get("t1-p3").unwrap();
        assert_eq!(pool.total_games, 5);
        let orianna = pool.champions.get("Orianna").unwrap();
        assert_eq!(orianna.games, 5);
        assert_eq!(orianna.wins, 3);
        assert_eq!(orianna.win_rate, 60.0);
    }
}
