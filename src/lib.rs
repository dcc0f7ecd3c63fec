pub mod catalogue;
pub mod classifier;
pub mod config;
pub mod domains;
pub mod features;
pub mod message;
pub mod scoring;

pub use catalogue::{Catalogue, Indicator, IndicatorCategory, Severity};
pub use classifier::{
    ClassificationResult, ClassificationSummary, Classifier, EmailCategory, ScoreBreakdown,
};
pub use config::{BlendWeights, ClassifierConfig, SeverityWeights, Thresholds};
pub use features::{ExtractedFeatures, FeatureExtractor};
pub use message::ParsedEmail;
pub use scoring::{RuleScorer, ScoreSource, TriggeredIndicator, MAX_SCORE};
