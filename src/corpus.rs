use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::catalog::ChampionCatalog;
use crate::draft_rules::{ActionType, Side, DRAFT_LENGTH};
use crate::error::AppError;

/// Minimum resolvable draft actions for a game to count at all.
pub const MIN_DRAFT_ACTIONS: usize = 10;

#[derive(Debug, Deserialize, Clone)]
pub struct DraftActionRecord {
    pub sequence_number: u8,
    pub action_type: ActionType,
    pub team_id: String,
    pub team_side: Side,
    pub champion_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlayerRecord {
    pub player_id: String,
    pub player_name: String,
    pub champion_name: String,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub damage_dealt: f64,
    #[serde(default)]
    pub gold_earned: f64,
    #[serde(default)]
    pub vision_score: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TeamGameRecord {
    pub team_id: String,
    pub team_name: String,
    pub side: Side,
    pub won: bool,
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
}

#[derive(Debug, Deserialize, Clone)]
#[allow(dead_code)]
pub struct GameRecord {
    #[serde(default)]
    pub game_sequence: u32,
    #[serde(default)]
    pub draft_actions: Vec<DraftActionRecord>,
    pub blue_team: Option<TeamGameRecord>,
    pub red_team: Option<TeamGameRecord>,
    #[serde(default)]
    pub duration_seconds: f64,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tournament_name: String,
}

impl GameRecord {
    /// Draft actions with an in-range position and a non-empty champion.
    pub fn resolvable_actions(&self) -> impl Iterator<Item = &DraftActionRecord> {
        self.draft_actions.iter().filter(|a| {
            a.sequence_number >= 1
                && a.sequence_number <= DRAFT_LENGTH
                && !a.champion_name.is_empty()
        })
    }

    /// A game contributes counters only as a whole: it needs both team
    /// records and enough resolvable draft actions to be useful.
    pub fn is_complete(&self) -> bool {
        self.blue_team.is_some()
            && self.red_team.is_some()
            && self.resolvable_actions().count() >= MIN_DRAFT_ACTIONS
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesRecord {
    pub series_id: String,
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MatchCorpus {
    #[serde(default)]
    pub series: Vec<SeriesRecord>,
}

impl MatchCorpus {
    pub fn load(path: &Path, catalog: &ChampionCatalog) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!("Failed to read corpus {}: {}", path.display(), e))
        })?;

        let mut corpus: MatchCorpus = serde_json::from_str(&content)
            .map_err(|e| AppError::JsonError(format!("Failed to parse corpus: {}", e)))?;

        corpus.normalize(catalog);
        Ok(corpus)
    }

    /// Canonicalize every champion reference before it touches a statistic.
    pub fn normalize(&mut self, catalog: &ChampionCatalog) {
        for series in &mut self.series {
            for game in &mut series.games {
                for action in &mut game.draft_actions {
                    action.champion_name = catalog.normalize(&action.champion_name);
                }
                for team in [&mut game.blue_team, &mut game.red_team]
                    .into_iter()
                    .flatten()
                {
                    for player in &mut team.players {
                        player.champion_name = catalog.normalize(&player.champion_name);
                    }
                }
            }
        }
    }

    pub fn total_games(&self) -> usize {
        self.series.iter().map(|s| s.games.len()).sum()
    }
}

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use crate::draft_rules::DRAFT_SEQUENCE;

    /// Build a complete game: five champions per side, a full 20-action
    /// draft (bans drawn from the tail of each side's list), and one player
    /// per champion.
    pub fn game(
        blue_team: (&str, &str),
        red_team: (&str, &str),
        blue_champs: [&str; 5],
        red_champs: [&str; 5],
        blue_bans: [&str; 5],
        red_bans: [&str; 5],
        blue_won: bool,
    ) -> GameRecord {
        let mut draft_actions = Vec::new();
        let mut blue_pick = 0usize;
        let mut red_pick = 0usize;
        let mut blue_ban = 0usize;
        let mut red_ban = 0usize;

        for (seq, action, side) in DRAFT_SEQUENCE {
            let (team, champion) = match (action, side) {
                (ActionType::Ban, Side::Blue) => {
                    let c = blue_bans[blue_ban];
                    blue_ban += 1;
                    (blue_team, c)
                }
                (ActionType::Ban, Side::Red) => {
                    let c = red_bans[red_ban];
                    red_ban += 1;
                    (red_team, c)
                }
                (ActionType::Pick, Side::Blue) => {
                    let c = blue_champs[blue_pick];
                    blue_pick += 1;
                    (blue_team, c)
                }
                (ActionType::Pick, Side::Red) => {
                    let c = red_champs[red_pick];
                    red_pick += 1;
                    (red_team, c)
                }
            };
            draft_actions.push(DraftActionRecord {
                sequence_number: seq,
                action_type: action,
                team_id: team.0.to_string(),
                team_side: side,
                champion_name: champion.to_string(),
            });
        }

        let players = |team: (&str, &str), champs: [&str; 5]| {
            champs
                .iter()
                .enumerate()
                .map(|(i, c)| PlayerRecord {
                    player_id: format!("{}-p{}", team.0, i + 1),
                    player_name: format!("{} Player {}", team.1, i + 1),
                    champion_name: c.to_string(),
                    kills: 3,
                    deaths: 2,
                    assists: 5,
                    damage_dealt: 15_000.0,
                    gold_earned: 11_000.0,
                    vision_score: 30.0,
                })
                .collect()
        };

        GameRecord {
            game_sequence: 1,
            draft_actions,
            blue_team: Some(TeamGameRecord {
                team_id: blue_team.0.to_string(),
                team_name: blue_team.1.to_string(),
                side: Side::Blue,
                won: blue_won,
                players: players(blue_team, blue_champs),
            }),
            red_team: Some(TeamGameRecord {
                team_id: red_team.0.to_string(),
                team_name: red_team.1.to_string(),
                side: Side::Red,
                won: !blue_won,
                players: players(red_team, red_champs),
            }),
            duration_seconds: 1800.0,
            date: None,
            tournament_name: "Test Cup".to_string(),
        }
    }

    pub const BLUE_COMP: [&str; 5] = ["Malphite", "Amumu", "Orianna", "Jinx", "Thresh"];
    pub const RED_COMP: [&str; 5] = ["Darius", "Lee Sin", "Ahri", "Ezreal", "Leona"];
    pub const BLUE_BANS: [&str; 5] = ["Azir", "Kalista", "Sylas", "Vi", "Zed"];
    pub const RED_BANS: [&str; 5] = ["Rakan", "Jax", "Syndra", "Zeri", "Nautilus"];

    /// One series of `games` identical matchups, blue winning `blue_wins`.
    pub fn series(series_id: &str, games: usize, blue_wins: usize) -> SeriesRecord {
        SeriesRecord {
            series_id: series_id.to_string(),
            games: (0..games)
                .map(|i| {
                    game(
                        ("t1", "Team One"),
                        ("t2", "Team Two"),
                        BLUE_COMP,
                        RED_COMP,
                        BLUE_BANS,
                        RED_BANS,
                        i < blue_wins,
                    )
                })
                .collect(),
        }
    }

    pub fn corpus(series_list: Vec<SeriesRecord>) -> MatchCorpus {
        MatchCorpus {
            series: series_list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_games_are_flagged() {
        let mut game = fixtures::game(
            ("t1", "Team One"),
            ("t2", "Team Two"),
            fixtures::BLUE_COMP,
            fixtures::RED_COMP,
            fixtures::BLUE_BANS,
            fixtures::RED_BANS,
            true,
        );
        assert!(game.is_complete());

        game.red_team = None;
        assert!(!game.is_complete());
    }

    #[test]
    fn too_few_resolvable_actions_is_incomplete() {
        let mut game = fixtures::game(
            ("t1", "Team One"),
            ("t2", "Team Two"),
            fixtures::BLUE_COMP,
            fixtures::RED_COMP,
            fixtures::BLUE_BANS,
            fixtures::RED_BANS,
            true,
        );
        game.draft_actions.truncate(9);
        assert!(!game.is_complete());
    }

    #[test]
    fn normalize_rewrites_aliases_everywhere() {
        let catalog = ChampionCatalog::new();
        let mut game = fixtures::game(
            ("t1", "Team One"),
            ("t2", "Team Two"),
            fixtures::BLUE_COMP,
            fixtures::RED_COMP,
            fixtures::BLUE_BANS,
            fixtures::RED_BANS,
            true,
        );
        game.draft_actions[0].champion_name = "MonkeyKing".to_string();
        if let Some(team) = game.blue_team.as_mut() {
            team.players[0].champion_name = "TahmKench".to_string();
        }

        let mut corpus = MatchCorpus {
            series: vec![SeriesRecord {
                series_id: "s1".to_string(),
                games: vec![game],
            }],
        };
        corpus.normalize(&catalog);

        let game = &corpus.series[0].games[0];
        assert_eq!(game.draft_actions[0].champion_name, "Wukong");
        assert_eq!(
            game.blue_team.as_ref().unwrap().players[0].champion_name,
            "Tahm Kench"
        );
    }
}
