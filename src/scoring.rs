//! Per-category sub-scorers.
//!
//! A sub-score is the weight sum of the triggered indicators of one
//! category, saturated at 100. The phishing and spam scorers run over the
//! same feature snapshot and never look at each other's results; that
//! independence is what lets the aggregator blend them linearly.

use crate::catalogue::{Catalogue, IndicatorCategory, Severity};
use crate::config::SeverityWeights;
use crate::features::ExtractedFeatures;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const MAX_SCORE: u8 = 100;

/// One triggered indicator, as reported in a classification result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredIndicator {
    pub id: String,
    pub category: IndicatorCategory,
    pub severity: Severity,
    pub weight: u32,
    pub description: String,
}

/// The scoring seam. The rule scorer is the only implementation today; a
/// statistical model slots in behind the same features-to-score contract.
pub trait ScoreSource {
    fn name(&self) -> &'static str;
    fn score(&self, features: &ExtractedFeatures) -> (u8, Vec<TriggeredIndicator>);
}

pub struct RuleScorer {
    category: IndicatorCategory,
    catalogue: Arc<Catalogue>,
    weights: SeverityWeights,
}

impl RuleScorer {
    pub fn new(
        category: IndicatorCategory,
        catalogue: Arc<Catalogue>,
        weights: SeverityWeights,
    ) -> Self {
        RuleScorer {
            category,
            catalogue,
            weights,
        }
    }
}

impl ScoreSource for RuleScorer {
    fn name(&self) -> &'static str {
        match self.category {
            IndicatorCategory::Phishing => "phishing-rules",
            IndicatorCategory::Spam => "spam-rules",
        }
    }

    fn score(&self, features: &ExtractedFeatures) -> (u8, Vec<TriggeredIndicator>) {
        let mut total: u32 = 0;
        let mut triggered = Vec::new();

        for indicator in self.catalogue.of_category(self.category) {
            if !indicator.triggers(features) {
                continue;
            }
            let weight = indicator.severity.weight(&self.weights);
            log::debug!(
                "{}: indicator '{}' fired, weight {}",
                self.name(),
                indicator.id,
                weight
            );
            total += weight;
            triggered.push(TriggeredIndicator {
                id: indicator.id.to_string(),
                category: indicator.category,
                severity: indicator.severity,
                weight,
                description: indicator.description(features),
            });
        }

        (total.min(MAX_SCORE as u32) as u8, triggered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::UrlFlags;

    fn scorer(category: IndicatorCategory) -> RuleScorer {
        RuleScorer::new(
            category,
            Arc::new(Catalogue::standard()),
            SeverityWeights::default(),
        )
    }

    fn neutral_features() -> ExtractedFeatures {
        let mut features = ExtractedFeatures::default();
        features.sender.valid_address_syntax = true;
        features
    }

    #[test]
    fn test_neutral_features_score_zero() {
        let features = neutral_features();
        let (phishing, triggered) = scorer(IndicatorCategory::Phishing).score(&features);
        assert_eq!(phishing, 0);
        assert!(triggered.is_empty());
        let (spam, triggered) = scorer(IndicatorCategory::Spam).score(&features);
        assert_eq!(spam, 0);
        assert!(triggered.is_empty());
    }

    #[test]
    fn test_weights_sum_per_category() {
        let mut features = neutral_features();
        features.content.money_hits = 3; // medium, 15
        features.content.exclamation_count = 5; // low, 10
        let (spam, triggered) = scorer(IndicatorCategory::Spam).score(&features);
        assert_eq!(spam, 25);
        assert_eq!(triggered.len(), 2);
    }

    #[test]
    fn test_categories_do_not_leak_into_each_other() {
        let mut features = neutral_features();
        features.content.credential_hits = 2; // phishing side only
        let (spam, triggered) = scorer(IndicatorCategory::Spam).score(&features);
        assert_eq!(spam, 0);
        assert!(triggered.is_empty());
    }

    #[test]
    fn test_score_saturates_at_100() {
        let mut features = neutral_features();
        // Five high-severity phishing indicators: 5 * 25 = 125 raw.
        features.sender.display_name_spoof = true;
        features.sender.suspicious_tld = true;
        features.content.credential_hits = 4;
        features.urls.url_count = 2;
        features.urls.flags.push(UrlFlags {
            raw_ip_host: true,
            ..Default::default()
        });
        features.urls.flags.push(UrlFlags {
            domain_mismatch: true,
            lookalike: true,
            ..Default::default()
        });
        let (phishing, triggered) = scorer(IndicatorCategory::Phishing).score(&features);
        assert_eq!(phishing, 100);
        assert!(triggered.iter().map(|t| t.weight).sum::<u32>() > 100);
    }

    #[test]
    fn test_repeat_scoring_yields_equal_records() {
        let mut features = neutral_features();
        features.content.money_hits = 3;
        features.content.exclamation_count = 3;
        let scorer = scorer(IndicatorCategory::Spam);
        let (first_score, first) = scorer.score(&features);
        let (second_score, second) = scorer.score(&features);
        assert_eq!(first_score, second_score);
        assert_eq!(first, second);
    }

    #[test]
    fn test_triggered_records_carry_weight_and_description() {
        let mut features = neutral_features();
        features.content.money_hits = 4;
        let (_, triggered) = scorer(IndicatorCategory::Spam).score(&features);
        let money = triggered.iter().find(|t| t.id == "money-language").unwrap();
        assert_eq!(money.weight, 15);
        assert_eq!(money.severity, Severity::Medium);
        assert!(money.description.contains("4 hits"));
    }
}
