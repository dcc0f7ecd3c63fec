use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Weight assigned to each indicator severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityWeights {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        SeverityWeights {
            high: 25,
            medium: 15,
            low: 10,
        }
    }
}

/// Tier cut points over the final score. Boundary values classify into the
/// lower tier: `safe` is the highest safe score, `suspicious` the highest
/// suspicious one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub safe: u8,
    pub suspicious: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            safe: 30,
            suspicious: 70,
        }
    }
}

/// Linear blend of the two sub-scores. Must sum to 1 so the final score
/// stays within [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub phishing: f64,
    pub spam: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        BlendWeights {
            phishing: 0.6,
            spam: 0.4,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub weights: SeverityWeights,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub blend: BlendWeights,
}

impl ClassifierConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: ClassifierConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot score sanely under. Runs once
    /// at construction; the engine itself never re-checks.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.thresholds.safe < self.thresholds.suspicious,
            "thresholds must be ordered: safe ({}) must be below suspicious ({})",
            self.thresholds.safe,
            self.thresholds.suspicious
        );
        ensure!(
            self.thresholds.suspicious <= 100,
            "suspicious threshold ({}) exceeds the score range",
            self.thresholds.suspicious
        );

        ensure!(
            (20..=25).contains(&self.weights.high),
            "high severity weight ({}) outside the 20-25 band",
            self.weights.high
        );
        ensure!(
            (10..=15).contains(&self.weights.medium),
            "medium severity weight ({}) outside the 10-15 band",
            self.weights.medium
        );
        ensure!(
            (5..=10).contains(&self.weights.low),
            "low severity weight ({}) outside the 5-10 band",
            self.weights.low
        );

        for (name, value) in [("phishing", self.blend.phishing), ("spam", self.blend.spam)] {
            ensure!(
                (0.0..=1.0).contains(&value),
                "{} blend weight ({}) outside [0, 1]",
                name,
                value
            );
        }
        ensure!(
            (self.blend.phishing + self.blend.spam - 1.0).abs() <= 1e-6,
            "blend weights must sum to 1.0 (got {})",
            self.blend.phishing + self.blend.spam
        );

        Ok(())
    }

    /// Write a commented starter config.
    pub fn generate_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, DEFAULT_CONFIG_YAML)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

const DEFAULT_CONFIG_YAML: &str = r#"# mailtriage configuration
#
# Indicator weight per severity tier. Permitted bands:
#   high 20-25, medium 10-15, low 5-10
weights:
  high: 25
  medium: 15
  low: 10

# Final-score cut points; a boundary value belongs to the lower tier
# (30 is still safe, 70 is still suspicious).
thresholds:
  safe: 30
  suspicious: 70

# Linear blend of the phishing and spam sub-scores. Must sum to 1.
blend:
  phishing: 0.6
  spam: 0.4
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ClassifierConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_yaml_template_round_trips_to_defaults() {
        let parsed: ClassifierConfig = serde_yaml::from_str(DEFAULT_CONFIG_YAML).unwrap();
        assert_eq!(parsed.weights, SeverityWeights::default());
        assert_eq!(parsed.thresholds, Thresholds::default());
        assert_eq!(parsed.blend, BlendWeights::default());
    }

    #[test]
    fn test_partial_yaml_fills_in_defaults() {
        let parsed: ClassifierConfig = serde_yaml::from_str("thresholds:\n  safe: 20\n  suspicious: 60\n").unwrap();
        assert_eq!(parsed.thresholds.safe, 20);
        assert_eq!(parsed.weights, SeverityWeights::default());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let mut config = ClassifierConfig::default();
        config.thresholds = Thresholds {
            safe: 70,
            suspicious: 70,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_band_weights_rejected() {
        let mut config = ClassifierConfig::default();
        config.weights.high = 50;
        assert!(config.validate().is_err());

        let mut config = ClassifierConfig::default();
        config.weights.low = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blend_must_sum_to_one() {
        let mut config = ClassifierConfig::default();
        config.blend = BlendWeights {
            phishing: 0.8,
            spam: 0.4,
        };
        assert!(config.validate().is_err());

        let mut config = ClassifierConfig::default();
        config.blend = BlendWeights {
            phishing: 1.2,
            spam: -0.2,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_weight_fails_to_parse() {
        let result: std::result::Result<ClassifierConfig, _> =
            serde_yaml::from_str("weights:\n  high: -5\n  medium: 15\n  low: 10\n");
        assert!(result.is_err());
    }
}
