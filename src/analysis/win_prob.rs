use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::analysis::aggregator::Snapshot;
use crate::analysis::composition::CompositionAnalysis;
use crate::analysis::features::{extract_features, FEATURE_COUNT};
use crate::analysis::round3;
use crate::catalog::ChampionCatalog;
use crate::error::AppError;

/// Temperature T > 1 softens overconfident predictions. The classifier is
/// trained on aggregate stats with leakage, so raw probabilities cluster
/// near 0 and 1; T=4 maps ~0.02 to ~0.28 and ~0.98 to ~0.72.
pub const TEMPERATURE: f64 = 4.0;

pub const MIN_PROBABILITY: f64 = 0.25;
pub const MAX_PROBABILITY: f64 = 0.75;

/// Logistic win classifier trained offline, loaded from a JSON artifact of
/// 40 weights plus an intercept.
#[derive(Debug, Clone, Deserialize)]
pub struct WinModel {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl WinModel {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!("Failed to read model {}: {}", path.display(), e))
        })?;
        let model: WinModel = serde_json::from_str(&content)
            .map_err(|e| AppError::JsonError(format!("Failed to parse model: {}", e)))?;

        if model.weights.len() != FEATURE_COUNT {
            return Err(AppError::JsonError(format!(
                "Model expects {} weights, found {}",
                FEATURE_COUNT,
                model.weights.len()
            )));
        }
        Ok(model)
    }

    /// Raw P(blue wins) before temperature scaling.
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<f64, AppError> {
        let logit: f64 = self
            .weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;

        let probability = 1.0 / (1.0 + (-logit).exp());
        if !probability.is_finite() {
            return Err(AppError::InsufficientData(
                "model produced a non-finite probability".to_string(),
            ));
        }
        Ok(probability)
    }
}

/// Compress a probability toward neutral in log-odds space.
pub fn temperature_scale(probability: f64, temperature: f64) -> f64 {
    let p = probability.clamp(1e-7, 1.0 - 1e-7);
    let logit = (p / (1.0 - p)).ln();
    let scaled = logit / temperature;
    1.0 / (1.0 + (-scaled).exp())
}

/// Win-probability strategy, chosen once at startup.
#[derive(Debug, Clone)]
pub enum WinStrategy {
    Learned(WinModel),
    Heuristic,
}

pub struct WinProbabilityEstimator {
    strategy: WinStrategy,
}

impl WinProbabilityEstimator {
    pub fn new(strategy: WinStrategy) -> Self {
        WinProbabilityEstimator { strategy }
    }

    pub fn heuristic() -> Self {
        WinProbabilityEstimator {
            strategy: WinStrategy::Heuristic,
        }
    }

    /// Load the model artifact if a path is given and it parses; any load
    /// failure degrades to the heuristic strategy.
    pub fn from_model_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => match WinModel::load(path) {
                Ok(model) => WinProbabilityEstimator::new(WinStrategy::Learned(model)),
                Err(_) => WinProbabilityEstimator::heuristic(),
            },
            None => WinProbabilityEstimator::heuristic(),
        }
    }

    pub fn is_learned(&self) -> bool {
        matches!(self.strategy, WinStrategy::Learned(_))
    }

    /// Blue-side win probability in [0.25, 0.75]. A learned-strategy failure
    /// is absorbed here: callers always get a usable estimate.
    pub fn estimate(
        &self,
        blue: &CompositionAnalysis,
        red: &CompositionAnalysis,
        blue_team_id: Option<&str>,
        red_team_id: Option<&str>,
        snapshot: &Snapshot,
        catalog: &ChampionCatalog,
    ) -> f64 {
        if let WinStrategy::Learned(model) = &self.strategy {
            let features = extract_features(
                &blue.champions,
                &red.champions,
                blue_team_id,
                red_team_id,
                snapshot,
                catalog,
            );
            if let Ok(raw) = model.predict(&features) {
                let scaled = temperature_scale(raw, TEMPERATURE);
                return round3(scaled.clamp(MIN_PROBABILITY, MAX_PROBABILITY));
            }
        }

        heuristic_estimate(blue, red, blue_team_id, red_team_id, snapshot)
    }
}

/// Heuristic fallback: start neutral, accumulate bounded adjustments for
/// each composition signal, clamp.
fn heuristic_estimate(
    blue: &CompositionAnalysis,
    red: &CompositionAnalysis,
    blue_team_id: Option<&str>,
    red_team_id: Option<&str>,
    snapshot: &Snapshot,
) -> f64 {
    let mut score = 0.0;

    // Champion win rate advantage, the strongest signal
    let wr_diff = (blue.avg_win_rate - red.avg_win_rate) / 100.0;
    score += (wr_diff * 2.0).clamp(-0.10, 0.10);

    let synergy_diff = blue.synergy_score - red.synergy_score;
    score += (synergy_diff * 0.5).clamp(-0.05, 0.05);

    let cc_diff = blue.cc_score - red.cc_score;
    score += (cc_diff * 0.02).clamp(-0.04, 0.04);

    let engage_diff = blue.engage_count as f64 - red.engage_count as f64;
    score += (engage_diff * 0.015).clamp(-0.03, 0.03);

    let balance_diff = blue.damage_profile.balance() - red.damage_profile.balance();
    score += (balance_diff * 0.06).clamp(-0.03, 0.03);

    let blue_complete = blue.role_coverage.complete();
    let red_complete = red.role_coverage.complete();
    if blue_complete && !red_complete {
        score += 0.02;
    } else if red_complete && !blue_complete {
        score -= 0.02;
    }

    // Team historical record, only when both identities are known
    if let (Some(blue_id), Some(red_id)) = (blue_team_id, red_team_id) {
        if let (Some(blue_profile), Some(red_profile)) = (
            snapshot.team_profiles.get(blue_id),
            snapshot.team_profiles.get(red_id),
        ) {
            let team_wr_diff = (blue_profile.win_rate - red_profile.win_rate) / 100.0;
            score += (team_wr_diff * 1.5).clamp(-0.08, 0.08);
        }
    }

    round3((0.5 + score).clamp(MIN_PROBABILITY, MAX_PROBABILITY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregator::aggregate;
    use crate::analysis::composition::analyze;
    use crate::corpus::fixtures;
    use crate::draft_rules::Side;

    fn setup() -> (Snapshot, ChampionCatalog, CompositionAnalysis, CompositionAnalysis) {
        let corpus = fixtures::corpus(vec![fixtures::series("s1", 5, 4)]);
        let snapshot = aggregate(&corpus);
        let catalog = ChampionCatalog::new();
        let blue: Vec<String> = fixtures::BLUE_COMP.iter().map(|s| s.to_string()).collect();
        let red: Vec<String> = fixtures::RED_COMP.iter().map(|s| s.to_string()).collect();
        let blue_analysis = analyze(&blue, Some(Side::Blue), Some("t1"), &snapshot, &catalog);
        let red_analysis = analyze(&red, Some(Side::Red), Some("t2"), &snapshot, &catalog);
        (snapshot, catalog, blue_analysis, red_analysis)
    }

    #[test]
    fn heuristic_stays_within_bounds() {
        let (snapshot, catalog, blue, red) = setup();
        let estimator = WinProbabilityEstimator::heuristic();

        let p = estimator.estimate(&blue, &red, Some("t1"), Some("t2"), &snapshot, &catalog);
        assert!((MIN_PROBABILITY..=MAX_PROBABILITY).contains(&p));

        // Heavily lopsided inputs still clamp
        let mut stomped = red.clone();
        stomped.avg_win_rate = 0.0;
        stomped.synergy_score = 0.0;
        stomped.cc_score = 0.0;
        stomped.engage_count = 0;
        let p = estimator.estimate(&blue, &stomped, Some("t1"), Some("t2"), &snapshot, &catalog);
        assert!((MIN_PROBABILITY..=MAX_PROBABILITY).contains(&p));
    }

    #[test]
    fn learned_strategy_is_clamped_and_scaled() {
        let (snapshot, catalog, blue, red) = setup();
        // A model that always screams blue: huge positive intercept.
        let model = WinModel {
            weights: vec![0.0; FEATURE_COUNT],
            intercept: 50.0,
        };
        let estimator = WinProbabilityEstimator::new(WinStrategy::Learned(model));
        let p = estimator.estimate(&blue, &red, None, None, &snapshot, &catalog);
        assert!(p <= MAX_PROBABILITY);
        assert!(p > 0.5);
    }

    #[test]
    fn broken_model_falls_back_to_heuristic() {
        let (snapshot, catalog, blue, red) = setup();

        let broken = WinModel {
            weights: vec![f64::NAN; FEATURE_COUNT],
            intercept: 0.0,
        };
        let learned = WinProbabilityEstimator::new(WinStrategy::Learned(broken));
        let heuristic = WinProbabilityEstimator::heuristic();

        let from_fallback =
            learned.estimate(&blue, &red, Some("t1"), Some("t2"), &snapshot, &catalog);
        let from_heuristic =
            heuristic.estimate(&blue, &red, Some("t1"), Some("t2"), &snapshot, &catalog);
        assert_eq!(from_fallback, from_heuristic);
    }

    #[test]
    fn temperature_scaling_softens_extremes() {
        let softened = temperature_scale(0.98, TEMPERATURE);
        assert!(softened < 0.98);
        assert!(softened > 0.5);

        let softened_low = temperature_scale(0.02, TEMPERATURE);
        assert!(softened_low > 0.02);
        assert!(softened_low < 0.5);

        // Neutral stays neutral
        assert!((temperature_scale(0.5, TEMPERATURE) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn missing_model_path_degrades_to_heuristic() {
        let estimator =
            WinProbabilityEstimator::from_model_path(Some(Path::new("/nonexistent/model.json")));
        assert!(!estimator.is_learned());
    }
}
