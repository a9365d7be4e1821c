use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Ban,
    Pick,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Ban => "ban",
            ActionType::Pick => "pick",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Blue => "blue",
            Side::Red => "red",
        }
    }

    #[allow(dead_code)]
    pub fn opponent(&self) -> Side {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }
}

pub const DRAFT_LENGTH: u8 = 20;

/// Position at which the blue-side first pick is recorded.
pub const FIRST_PICK_BLUE_POSITION: u8 = 7;
/// Positions at which each side's opening ban is recorded.
pub const FIRST_BAN_BLUE_POSITION: u8 = 1;
pub const FIRST_BAN_RED_POSITION: u8 = 2;

/// Standard pro-play draft order: 20 actions, each position predetermined.
pub const DRAFT_SEQUENCE: [(u8, ActionType, Side); 20] = [
    (1, ActionType::Ban, Side::Blue),
    (2, ActionType::Ban, Side::Red),
    (3, ActionType::Ban, Side::Blue),
    (4, ActionType::Ban, Side::Red),
    (5, ActionType::Ban, Side::Blue),
    (6, ActionType::Ban, Side::Red),
    (7, ActionType::Pick, Side::Blue),
    (8, ActionType::Pick, Side::Red),
    (9, ActionType::Pick, Side::Red),
    (10, ActionType::Pick, Side::Blue),
    (11, ActionType::Pick, Side::Blue),
    (12, ActionType::Pick, Side::Red),
    (13, ActionType::Ban, Side::Red),
    (14, ActionType::Ban, Side::Blue),
    (15, ActionType::Ban, Side::Red),
    (16, ActionType::Ban, Side::Blue),
    (17, ActionType::Pick, Side::Red),
    (18, ActionType::Pick, Side::Blue),
    (19, ActionType::Pick, Side::Blue),
    (20, ActionType::Pick, Side::Red),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    BanPhase1,
    PickPhase1,
    BanPhase2,
    PickPhase2,
}

impl DraftPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftPhase::BanPhase1 => "ban_phase_1",
            DraftPhase::PickPhase1 => "pick_phase_1",
            DraftPhase::BanPhase2 => "ban_phase_2",
            DraftPhase::PickPhase2 => "pick_phase_2",
        }
    }
}

/// Action type and side at a draft position.
pub fn action_at(sequence: u8) -> Result<(ActionType, Side), AppError> {
    if sequence == 0 || sequence > DRAFT_LENGTH {
        return Err(AppError::InvalidSequence(sequence as u32));
    }
    let (_, action, side) = DRAFT_SEQUENCE[(sequence - 1) as usize];
    Ok((action, side))
}

pub fn phase_of(sequence: u8) -> Result<DraftPhase, AppError> {
    match sequence {
        1..=6 => Ok(DraftPhase::BanPhase1),
        7..=12 => Ok(DraftPhase::PickPhase1),
        13..=16 => Ok(DraftPhase::BanPhase2),
        17..=20 => Ok(DraftPhase::PickPhase2),
        _ => Err(AppError::InvalidSequence(sequence as u32)),
    }
}

/// Next draft action after the given position, None once the draft is done.
#[allow(dead_code)]
pub fn next_action(current_sequence: u8) -> Option<(u8, ActionType, Side)> {
    let next = current_sequence + 1;
    if next > DRAFT_LENGTH {
        return None;
    }
    let (_, action, side) = DRAFT_SEQUENCE[(next - 1) as usize];
    Some((next, action, side))
}

/// Champions still legal to draft: the universe minus everything banned or
/// picked by either side.
pub fn available_champions<'a>(
    all_champions: impl Iterator<Item = &'a str>,
    banned: &[String],
    picked: &[String],
) -> Vec<String> {
    let used: HashSet<&str> = banned
        .iter()
        .chain(picked.iter())
        .map(|s| s.as_str())
        .collect();
    all_champions
        .filter(|name| !used.contains(name))
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_covers_twenty_positions_in_order() {
        assert_eq!(DRAFT_SEQUENCE.len(), 20);
        for (idx, (seq, _, _)) in DRAFT_SEQUENCE.iter().enumerate() {
            assert_eq!(*seq, idx as u8 + 1);
        }
        // Six bans, then six picks, four bans, four picks
        let bans = DRAFT_SEQUENCE
            .iter()
            .filter(|(_, a, _)| *a == ActionType::Ban)
            .count();
        assert_eq!(bans, 10);
    }

    #[test]
    fn opening_action_is_blue_ban() {
        let (action, side) = action_at(1).unwrap();
        assert_eq!(action, ActionType::Ban);
        assert_eq!(side, Side::Blue);
        assert_eq!(phase_of(1).unwrap(), DraftPhase::BanPhase1);
    }

    #[test]
    fn phases_match_fixed_boundaries() {
        assert_eq!(phase_of(6).unwrap(), DraftPhase::BanPhase1);
        assert_eq!(phase_of(7).unwrap(), DraftPhase::PickPhase1);
        assert_eq!(phase_of(12).unwrap(), DraftPhase::PickPhase1);
        assert_eq!(phase_of(13).unwrap(), DraftPhase::BanPhase2);
        assert_eq!(phase_of(16).unwrap(), DraftPhase::BanPhase2);
        assert_eq!(phase_of(17).unwrap(), DraftPhase::PickPhase2);
        assert_eq!(phase_of(20).unwrap(), DraftPhase::PickPhase2);
    }

    #[test]
    fn out_of_range_positions_are_rejected() {
        assert!(matches!(action_at(0), Err(AppError::InvalidSequence(0))));
        assert!(matches!(action_at(21), Err(AppError::InvalidSequence(21))));
        assert!(phase_of(21).is_err());
    }

    #[test]
    fn next_action_stops_at_terminal_position() {
        let (seq, action, side) = next_action(19).unwrap();
        assert_eq!((seq, action, side), (20, ActionType::Pick, Side::Red));
        assert!(next_action(20).is_none());
    }

    #[test]
    fn available_excludes_banned_and_picked() {
        let universe = ["Ahri", "Azir", "Jinx"];
        let banned = vec!["Ahri".to_string()];
        let picked = vec!["Jinx".to_string()];
        let available = available_champions(universe.iter().copied(), &banned, &picked);
        assert_eq!(available, vec!["Azir".to_string()]);
    }
}
