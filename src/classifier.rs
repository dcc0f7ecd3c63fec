//! Threat aggregation: blend the two sub-scores, map onto the category
//! thresholds, and report an explainable result.

use crate::catalogue::{Catalogue, IndicatorCategory};
use crate::config::ClassifierConfig;
use crate::features::FeatureExtractor;
use crate::message::ParsedEmail;
use crate::scoring::{RuleScorer, ScoreSource, TriggeredIndicator, MAX_SCORE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailCategory {
    Safe,
    Suspicious,
    Spam,
}

impl EmailCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailCategory::Safe => "safe",
            EmailCategory::Suspicious => "suspicious",
            EmailCategory::Spam => "spam",
        }
    }
}

impl fmt::Display for EmailCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-scores plus the indicators behind them, ordered by descending weight
/// and then by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub phishing_score: u8,
    pub spam_score: u8,
    pub triggered: Vec<TriggeredIndicator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub final_score: u8,
    pub category: EmailCategory,
    pub breakdown: ScoreBreakdown,
}

impl ClassificationResult {
    pub fn summary(&self) -> String {
        format!(
            "{} (score {}; phishing {}, spam {}; {} indicators)",
            self.category,
            self.final_score,
            self.breakdown.phishing_score,
            self.breakdown.spam_score,
            self.breakdown.triggered.len()
        )
    }
}

/// Tier counts over a batch of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    pub total: usize,
    pub safe: usize,
    pub suspicious: usize,
    pub spam: usize,
}

impl ClassificationSummary {
    pub fn tally(results: &[ClassificationResult]) -> Self {
        let mut summary = ClassificationSummary {
            total: results.len(),
            ..Default::default()
        };
        for result in results {
            match result.category {
                EmailCategory::Safe => summary.safe += 1,
                EmailCategory::Suspicious => summary.suspicious += 1,
                EmailCategory::Spam => summary.spam += 1,
            }
        }
        summary
    }
}

pub struct Classifier {
    extractor: FeatureExtractor,
    phishing: RuleScorer,
    spam: RuleScorer,
    config: ClassifierConfig,
}

impl Classifier {
    /// Validates the configuration and builds the engine. Invalid config is
    /// fatal here; nothing downstream re-checks it.
    pub fn new(config: ClassifierConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let catalogue = Arc::new(Catalogue::standard());
        Ok(Classifier {
            extractor: FeatureExtractor::new(),
            phishing: RuleScorer::new(
                IndicatorCategory::Phishing,
                Arc::clone(&catalogue),
                config.weights,
            ),
            spam: RuleScorer::new(IndicatorCategory::Spam, catalogue, config.weights),
            config,
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify(&self, email: &ParsedEmail) -> ClassificationResult {
        let features = self.extractor.extract(email);
        let (phishing_score, mut triggered) = self.phishing.score(&features);
        let (spam_score, spam_triggered) = self.spam.score(&features);
        triggered.extend(spam_triggered);
        let result = self.aggregate(phishing_score, spam_score, triggered);
        log::debug!("classified email as {}", result.summary());
        result
    }

    pub fn classify_batch(&self, emails: &[ParsedEmail]) -> Vec<ClassificationResult> {
        emails.iter().map(|email| self.classify(email)).collect()
    }

    /// Blend the sub-scores into the final score and attach the evidence.
    ///
    /// Sub-scores above 100 cannot come out of the scorers; passing one in is
    /// a bug in the caller, so this asserts instead of clamping it away.
    pub fn aggregate(
        &self,
        phishing_score: u8,
        spam_score: u8,
        mut triggered: Vec<TriggeredIndicator>,
    ) -> ClassificationResult {
        assert!(
            phishing_score <= MAX_SCORE && spam_score <= MAX_SCORE,
            "sub-score out of range: phishing={} spam={}",
            phishing_score,
            spam_score
        );

        let blend = self.config.blend;
        let blended =
            blend.phishing * f64::from(phishing_score) + blend.spam * f64::from(spam_score);
        let final_score = blended.round().min(f64::from(MAX_SCORE)) as u8;

        triggered.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.id.cmp(&b.id)));

        ClassificationResult {
            final_score,
            category: self.categorize(final_score),
            breakdown: ScoreBreakdown {
                phishing_score,
                spam_score,
                triggered,
            },
        }
    }

    /// Map a final score onto a tier. Boundary values belong to the lower
    /// tier: 30 is still safe, 70 is still suspicious.
    pub fn categorize(&self, final_score: u8) -> EmailCategory {
        let thresholds = self.config.thresholds;
        if final_score <= thresholds.safe {
            EmailCategory::Safe
        } else if final_score <= thresholds.suspicious {
            EmailCategory::Suspicious
        } else {
            EmailCategory::Spam
        }
    }
}
