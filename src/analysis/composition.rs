use crate::analysis::aggregator::{ChampionPairStats, Snapshot};
use crate::analysis::defaults::{
    MIN_PAIR_GAMES, NEUTRAL_COUNTER, NEUTRAL_FIT, NEUTRAL_SYNERGY, NEUTRAL_WIN_RATE,
};
use crate::analysis::{round1, round3};
use crate::catalog::{ChampionCatalog, DamageProfile, RoleCoverage, ScalingProfile, Tag};
use crate::draft_rules::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    Teamfight,
    Pick,
    Protect,
    Poke,
    Dive,
    Split,
    Balanced,
}

impl Archetype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Teamfight => "teamfight",
            Archetype::Pick => "pick",
            Archetype::Protect => "protect",
            Archetype::Poke => "poke",
            Archetype::Dive => "dive",
            Archetype::Split => "split",
            Archetype::Balanced => "balanced",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Archetype::Teamfight => "Strong 5v5 teamfight composition with engage and AoE damage",
            Archetype::Pick => "Pick composition focused on catching enemies out of position",
            Archetype::Protect => "Protect-the-carry composition built around a hypercarry",
            Archetype::Poke => "Poke composition with long-range abilities",
            Archetype::Dive => "Dive composition that excels at reaching backline targets",
            Archetype::Split => "Split-push composition with strong side laners",
            Archetype::Balanced => "Balanced composition with no extreme specialization",
        }
    }
}

/// Signals the archetype rules read. Derived once per champion set.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositionSignals {
    pub champion_count: usize,
    pub engage_count: usize,
    pub assassin_count: usize,
    pub mage_count: usize,
    pub tank_count: usize,
    pub marksman_count: usize,
    pub late_count: usize,
    pub cc_score: f64,
}

type ArchetypeRule = (Archetype, fn(&CompositionSignals) -> bool);

/// Ordered decision list: the first matching predicate wins. Order is the
/// priority contract and must not be reshuffled.
pub fn archetype_rules() -> [ArchetypeRule; 6] {
    [
        (Archetype::Teamfight, |s| {
            s.engage_count >= 3 && s.cc_score >= 2.0
        }),
        (Archetype::Pick, |s| {
            s.assassin_count >= 2 && s.engage_count <= 1
        }),
        (Archetype::Protect, |s| {
            s.late_count >= 3 && s.marksman_count >= 1
        }),
        (Archetype::Poke, |s| s.mage_count >= 3 && s.cc_score < 2.0),
        (Archetype::Dive, |s| {
            s.engage_count >= 2 && s.assassin_count >= 1
        }),
        (Archetype::Split, |s| s.late_count <= 1 && s.tank_count <= 1),
    ]
}

/// Classify a champion set. Sets below 3 champions carry too little shape to
/// call anything but balanced.
pub fn classify(signals: &CompositionSignals) -> Archetype {
    if signals.champion_count < 3 {
        return Archetype::Balanced;
    }
    for (archetype, matches) in archetype_rules() {
        if matches(signals) {
            return archetype;
        }
    }
    Archetype::Balanced
}

pub fn derive_signals<S: AsRef<str>>(champions: &[S], catalog: &ChampionCatalog) -> CompositionSignals {
    let scaling = catalog.scaling_profile(champions);
    CompositionSignals {
        champion_count: champions.len(),
        engage_count: catalog.engage_count(champions),
        assassin_count: catalog.tag_count(champions, Tag::Assassin),
        mage_count: catalog.tag_count(champions, Tag::Mage),
        tank_count: catalog.tag_count(champions, Tag::Tank),
        marksman_count: catalog.tag_count(champions, Tag::Marksman),
        late_count: scaling.late as usize,
        cc_score: catalog.cc_average(champions),
    }
}

#[derive(Debug, Clone)]
pub struct CompositionAnalysis {
    pub team_side: Option<Side>,
    pub team_name: Option<String>,
    pub champions: Vec<String>,
    pub damage_profile: DamageProfile,
    pub cc_score: f64,
    pub scaling_profile: ScalingProfile,
    pub engage_count: usize,
    pub role_coverage: RoleCoverage,
    pub archetype: Archetype,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub avg_win_rate: f64,
    pub synergy_score: f64,
}

/// Full composition analysis of a (possibly partial) champion set.
pub fn analyze(
    champions: &[String],
    team_side: Option<Side>,
    team_id: Option<&str>,
    snapshot: &Snapshot,
    catalog: &ChampionCatalog,
) -> CompositionAnalysis {
    let damage = catalog.damage_profile(champions);
    let cc = catalog.cc_average(champions);
    let scaling = catalog.scaling_profile(champions);
    let coverage = catalog.role_coverage(champions);
    let signals = derive_signals(champions, catalog);
    let archetype = classify(&signals);

    let (strengths, weaknesses) =
        strengths_and_weaknesses(&damage, cc, signals.engage_count, &scaling, &coverage);

    let win_rates: Vec<f64> = champions
        .iter()
        .filter_map(|name| snapshot.champion_stats.get(name))
        .map(|stats| stats.win_rate)
        .collect();
    let avg_win_rate = if win_rates.is_empty() {
        NEUTRAL_WIN_RATE
    } else {
        round1(win_rates.iter().sum::<f64>() / win_rates.len() as f64)
    };

    let team_name = team_id
        .and_then(|id| snapshot.team_profiles.get(id))
        .map(|profile| profile.team_name.clone());

    CompositionAnalysis {
        team_side,
        team_name,
        champions: champions.to_vec(),
        damage_profile: damage,
        cc_score: (cc * 100.0).round() / 100.0,
        scaling_profile: scaling,
        engage_count: signals.engage_count,
        role_coverage: coverage,
        archetype,
        strengths,
        weaknesses,
        avg_win_rate,
        synergy_score: round3(synergy_score(champions, &snapshot.pairs)),
    }
}

/// Fixed threshold-to-text rule table. Evaluation order fixes output order.
fn strengths_and_weaknesses(
    damage: &DamageProfile,
    cc: f64,
    engage_count: usize,
    scaling: &ScalingProfile,
    coverage: &RoleCoverage,
) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    if damage.physical >= 2 && damage.magic >= 2 {
        strengths.push("Balanced damage profile, hard to itemize against".to_string());
    } else if damage.physical >= 4 {
        weaknesses.push("Heavily physical damage, vulnerable to armor stacking".to_string());
    } else if damage.magic >= 4 {
        weaknesses.push("Heavily magic damage, vulnerable to MR stacking".to_string());
    }

    if cc >= 2.5 {
        strengths.push("High crowd control, strong teamfight lockdown".to_string());
    } else if cc <= 1.0 {
        weaknesses.push("Low crowd control, limited engage and peel".to_string());
    }

    if engage_count >= 2 {
        strengths.push(format!(
            "{} engage threats, multiple initiation options",
            engage_count
        ));
    } else if engage_count == 0 {
        weaknesses.push("No reliable engage, dependent on enemy mistakes".to_string());
    }

    if scaling.late >= 3 {
        strengths.push("Strong scaling, favored in longer games".to_string());
        weaknesses.push("Weak early game, vulnerable to early aggression".to_string());
    } else if scaling.early >= 3 {
        strengths.push("Strong early game, can snowball leads".to_string());
        weaknesses.push("Falls off late, needs to close out games quickly".to_string());
    }

    if coverage.complete() {
        strengths.push("Full role coverage, standard team composition".to_string());
    } else {
        let missing: Vec<&str> = coverage
            .missing_roles()
            .iter()
            .map(|r| r.as_str())
            .collect();
        if !missing.is_empty() {
            weaknesses.push(format!(
                "Non-standard roles: missing {} specialist",
                missing.join(", ")
            ));
        }
    }

    (strengths, weaknesses)
}

/// Mean synergy over teammate pairs with enough games, normalized so a 30%
/// pair win rate maps to 0 and 70% to 1. Neutral 0.5 with no qualifying pair.
pub fn synergy_score<S: AsRef<str>>(champions: &[S], pairs: &ChampionPairStats) -> f64 {
    let mut scores = Vec::new();
    for i in 0..champions.len() {
        for j in (i + 1)..champions.len() {
            if let Some(pair) = pairs.synergy(champions[i].as_ref(), champions[j].as_ref()) {
                if pair.games >= MIN_PAIR_GAMES {
                    scores.push((pair.win_rate - 30.0) / 40.0);
                }
            }
        }
    }
    if scores.is_empty() {
        NEUTRAL_SYNERGY
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// How well a champion counters the opponent's current picks, 0-1. Lookup is
/// always from the candidate's perspective.
pub fn counter_score<S: AsRef<str>>(
    champion: &str,
    opponent_picks: &[S],
    pairs: &ChampionPairStats,
) -> f64 {
    if opponent_picks.is_empty() {
        return NEUTRAL_COUNTER;
    }

    let mut scores = Vec::new();
    for opponent in opponent_picks {
        if let Some(matchup) = pairs.counter(champion, opponent.as_ref()) {
            if matchup.games >= MIN_PAIR_GAMES {
                scores.push(matchup.win_rate / 100.0);
            }
        }
    }
    if scores.is_empty() {
        NEUTRAL_COUNTER
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Weighted fit of a candidate against the existing partial roster, clamped
/// to [0,1]: damage balance 0.30, CC 0.10 plus up to 0.20 increase bonus,
/// role coverage 0.20/0.10, engage budget 0.15/0.05, synergy uplift up to
/// 0.25.
pub fn composition_fit(
    champion: &str,
    existing_picks: &[String],
    snapshot: &Snapshot,
    catalog: &ChampionCatalog,
) -> f64 {
    if existing_picks.is_empty() {
        return NEUTRAL_FIT;
    }

    let mut proposed: Vec<String> = existing_picks.to_vec();
    proposed.push(champion.to_string());

    let damage_score = catalog.damage_profile(&proposed).balance() * 0.3;

    let new_cc = catalog.cc_average(&proposed);
    let old_cc = catalog.cc_average(existing_picks);
    let cc_bonus = if new_cc > old_cc {
        ((new_cc - old_cc) * 0.5).min(0.2)
    } else {
        0.0
    };
    let cc_score = 0.1 + cc_bonus;

    let new_filled = catalog.role_coverage(&proposed).filled_count();
    let old_filled = catalog.role_coverage(existing_picks).filled_count();
    let role_score = if new_filled > old_filled { 0.2 } else { 0.1 };

    let candidate_engages = catalog.get(champion).map(|e| e.is_engage).unwrap_or(false);
    let current_engage = catalog.engage_count(existing_picks);
    let engage_score = if candidate_engages && current_engage < 2 {
        0.15
    } else {
        0.05
    };

    let mut synergy_sum = 0.0;
    for pick in existing_picks {
        if let Some(pair) = snapshot.pairs.synergy(champion, pick) {
            if pair.games >= MIN_PAIR_GAMES {
                synergy_sum += (pair.win_rate - 45.0) / 100.0;
            }
        }
    }
    let synergy_score =
        (synergy_sum / existing_picks.len().max(1) as f64 + 0.1).clamp(0.0, 0.25);

    (damage_score + cc_score + role_score + engage_score + synergy_score).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregator::{aggregate, PairRecord};
    use crate::corpus::fixtures;
    use std::collections::HashMap;

    fn signals(
        count: usize,
        engage: usize,
        assassins: usize,
        mages: usize,
        tanks: usize,
        marksmen: usize,
        late: usize,
        cc: f64,
    ) -> CompositionSignals {
        CompositionSignals {
            champion_count: count,
            engage_count: engage,
            assassin_count: assassins,
            mage_count: mages,
            tank_count: tanks,
            marksman_count: marksmen,
            late_count: late,
            cc_score: cc,
        }
    }

    #[test]
    fn malphite_orianna_amumu_is_teamfight() {
        let catalog = ChampionCatalog::new();
        let comp = ["Malphite", "Orianna", "Amumu"];
        let derived = derive_signals(&comp, &catalog);
        assert_eq!(derived.engage_count, 3);
        assert!(derived.cc_score >= 2.0);
        assert_eq!(classify(&derived), Archetype::Teamfight);
    }

    #[test]
    fn earlier_rule_wins_when_several_match() {
        // Matches both teamfight (rule 1) and dive (rule 5).
        let s = signals(5, 3, 1, 0, 1, 1, 2, 2.5);
        assert_eq!(classify(&s), Archetype::Teamfight);

        // Matches both pick (rule 2) and poke (rule 4).
        let s = signals(5, 1, 2, 3, 0, 0, 2, 1.0);
        assert_eq!(classify(&s), Archetype::Pick);
    }

    #[test]
    fn small_sets_classify_balanced() {
        let s = signals(2, 2, 2, 0, 0, 0, 0, 3.0);
        assert_eq!(classify(&s), Archetype::Balanced);
    }

    #[test]
    fn no_matching_rule_defaults_to_balanced() {
        // Mid-scaling, moderate everything: no rule fires (tank_count 2
        // blocks split, engage 1 blocks teamfight/dive).
        let s = signals(5, 1, 0, 2, 2, 1, 2, 2.0);
        assert_eq!(classify(&s), Archetype::Balanced);
    }

    #[test]
    fn synergy_score_defaults_to_neutral() {
        let pairs = ChampionPairStats::default();
        let comp = ["Malphite", "Orianna"];
        assert_eq!(synergy_score(&comp, &pairs), NEUTRAL_SYNERGY);
    }

    #[test]
    fn synergy_score_normalizes_pair_win_rate() {
        let mut pairs = ChampionPairStats::default();
        let mut partners = HashMap::new();
        partners.insert(
            "Orianna".to_string(),
            PairRecord {
                games: 10,
                wins: 7,
                win_rate: 70.0,
            },
        );
        pairs.synergies.insert("Malphite".to_string(), partners);

        let comp = ["Malphite", "Orianna"];
        // (70 - 30) / 40 = 1.0
        assert!((synergy_score(&comp, &pairs) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn counter_score_is_neutral_without_opponent_picks() {
        let pairs = ChampionPairStats::default();
        let none: [&str; 0] = [];
        assert_eq!(counter_score("Ahri", &none, &pairs), NEUTRAL_COUNTER);
    }

    #[test]
    fn fit_score_neutral_on_empty_roster_and_always_bounded() {
        let corpus = fixtures::corpus(vec![fixtures::series("s1", 4, 2)]);
        let snapshot = aggregate(&corpus);
        let catalog = ChampionCatalog::new();

        assert_eq!(
            composition_fit("Ahri", &[], &snapshot, &catalog),
            NEUTRAL_FIT
        );

        let roster = vec!["Malphite".to_string(), "Amumu".to_string()];
        let fit = composition_fit("Orianna", &roster, &snapshot, &catalog);
        assert!((0.0..=1.0).contains(&fit));
    }

    #[test]
    fn analysis_reports_strengths_in_rule_order() {
        let corpus = fixtures::corpus(vec![fixtures::series("s1", 4, 2)]);
        let snapshot = aggregate(&corpus);
        let catalog = ChampionCatalog::new();

        let comp: Vec<String> = fixtures::BLUE_COMP.iter().map(|s| s.to_string()).collect();
        let analysis = analyze(&comp, Some(Side::Blue), Some("t1"), &snapshot, &catalog);

        assert!(analysis.role_coverage.complete());
        assert_eq!(analysis.team_name.as_deref(), Some("Team One"));
        assert!(!analysis.strengths.is_empty());
        // CC strength precedes the role coverage strength.
        let cc_idx = analysis
            .strengths
            .iter()
            .position(|s| s.contains("crowd control"));
        let role_idx = analysis
            .strengths
            .iter()
            .position(|s| s.contains("role coverage"));
        if let (Some(cc), Some(role)) = (cc_idx, role_idx) {
            assert!(cc < role);
        }
    }
}
