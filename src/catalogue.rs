//! Indicator catalogue: every scoring rule as a data record.
//!
//! An indicator is (id, category, severity, predicate, description template).
//! Adding detection logic means adding a record here, not a branch to the
//! scorers. Predicates only read the feature snapshot; no indicator sees
//! another indicator's result.

use crate::config::SeverityWeights;
use crate::features::ExtractedFeatures;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorCategory {
    Phishing,
    Spam,
}

impl IndicatorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorCategory::Phishing => "phishing",
            IndicatorCategory::Spam => "spam",
        }
    }
}

impl fmt::Display for IndicatorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn weight(&self, weights: &SeverityWeights) -> u32 {
        match self {
            Severity::High => weights.high,
            Severity::Medium => weights.medium,
            Severity::Low => weights.low,
        }
    }
}

pub struct Indicator {
    pub id: &'static str,
    pub category: IndicatorCategory,
    pub severity: Severity,
    predicate: fn(&ExtractedFeatures) -> bool,
    describe: fn(&ExtractedFeatures) -> String,
}

impl Indicator {
    pub fn triggers(&self, features: &ExtractedFeatures) -> bool {
        (self.predicate)(features)
    }

    pub fn description(&self, features: &ExtractedFeatures) -> String {
        (self.describe)(features)
    }
}

pub struct Catalogue {
    indicators: Vec<Indicator>,
}

impl Catalogue {
    /// The built-in rule set.
    ///
    /// Trigger thresholds (two money hits vs three, and so on) live in these
    /// records, and they are deliberately uneven: a single credential phrase
    /// is already alarming, while money talk only matters in volume.
    pub fn standard() -> Self {
        let indicators = vec![
            // --- phishing ---
            Indicator {
                id: "sender-spoof",
                category: IndicatorCategory::Phishing,
                severity: Severity::High,
                predicate: |f| f.sender.display_name_spoof,
                describe: |_| {
                    "Display name imitates a brand absent from the sender domain".to_string()
                },
            },
            Indicator {
                id: "credential-request",
                category: IndicatorCategory::Phishing,
                severity: Severity::High,
                predicate: |f| f.content.credential_hits >= 1,
                describe: |f| {
                    format!(
                        "Asks for credentials or identifiers ({} hits)",
                        f.content.credential_hits
                    )
                },
            },
            Indicator {
                id: "url-ip-host",
                category: IndicatorCategory::Phishing,
                severity: Severity::High,
                predicate: |f| f.urls.ip_host_count() >= 1,
                describe: |f| format!("Links to raw IP hosts ({})", f.urls.ip_host_count()),
            },
            Indicator {
                id: "sender-suspicious-tld",
                category: IndicatorCategory::Phishing,
                severity: Severity::High,
                predicate: |f| f.sender.suspicious_tld,
                describe: |f| format!("Sender domain {} uses a high-abuse TLD", f.sender.domain),
            },
            Indicator {
                id: "url-lookalike-domain",
                category: IndicatorCategory::Phishing,
                severity: Severity::High,
                predicate: |f| f.urls.lookalike_count() >= 1,
                describe: |f| {
                    format!(
                        "Link domains imitate the sender domain ({})",
                        f.urls.lookalike_count()
                    )
                },
            },
            Indicator {
                id: "phishing-phrases",
                category: IndicatorCategory::Phishing,
                severity: Severity::Medium,
                predicate: |f| f.content.phishing_phrase_hits >= 1,
                describe: |f| {
                    format!(
                        "Contains stock phishing phrases ({} hits)",
                        f.content.phishing_phrase_hits
                    )
                },
            },
            Indicator {
                id: "urgency-language",
                category: IndicatorCategory::Phishing,
                severity: Severity::Medium,
                predicate: |f| f.content.urgency_hits >= 1,
                describe: |f| {
                    format!(
                        "Applies time pressure ({} urgency cues)",
                        f.content.urgency_hits
                    )
                },
            },
            Indicator {
                id: "url-shortener",
                category: IndicatorCategory::Phishing,
                severity: Severity::Medium,
                predicate: |f| f.urls.shortener_count() >= 1,
                describe: |f| format!("Uses URL shorteners ({})", f.urls.shortener_count()),
            },
            Indicator {
                id: "url-suspicious-tld",
                category: IndicatorCategory::Phishing,
                severity: Severity::Medium,
                predicate: |f| f.urls.suspicious_tld_count() >= 1,
                describe: |f| {
                    format!(
                        "Links to high-abuse TLDs ({})",
                        f.urls.suspicious_tld_count()
                    )
                },
            },
            Indicator {
                id: "url-domain-mismatch",
                category: IndicatorCategory::Phishing,
                severity: Severity::Medium,
                predicate: |f| f.urls.mismatch_count() >= 1,
                describe: |f| {
                    format!(
                        "Link domains unrelated to the sender domain ({})",
                        f.urls.mismatch_count()
                    )
                },
            },
            Indicator {
                id: "reply-to-mismatch",
                category: IndicatorCategory::Phishing,
                severity: Severity::Medium,
                predicate: |f| f.structure.reply_to_mismatch,
                describe: |_| "Reply-To domain unrelated to the sender domain".to_string(),
            },
            Indicator {
                id: "unknown-sender-domain",
                category: IndicatorCategory::Phishing,
                severity: Severity::Low,
                predicate: |f| {
                    !f.sender.domain.is_empty()
                        && !f.sender.trusted_domain
                        && !f.sender.free_provider
                },
                describe: |f| {
                    format!(
                        "Sender domain {} is neither trusted nor a known provider",
                        f.sender.domain
                    )
                },
            },
            Indicator {
                id: "invalid-sender-syntax",
                category: IndicatorCategory::Phishing,
                severity: Severity::Low,
                predicate: |f| !f.sender.valid_address_syntax,
                describe: |_| "Sender address is not a well-formed address".to_string(),
            },
            // --- spam ---
            Indicator {
                id: "money-language",
                category: IndicatorCategory::Spam,
                severity: Severity::Medium,
                predicate: |f| f.content.money_hits >= 3,
                describe: |f| format!("Heavy monetary language ({} hits)", f.content.money_hits),
            },
            Indicator {
                id: "many-urls",
                category: IndicatorCategory::Spam,
                severity: Severity::Medium,
                predicate: |f| f.urls.url_count >= 5,
                describe: |f| format!("Unusually many links ({})", f.urls.url_count),
            },
            Indicator {
                id: "attachment-present",
                category: IndicatorCategory::Spam,
                severity: Severity::Medium,
                predicate: |f| f.structure.has_attachments,
                describe: |_| "Carries attachments".to_string(),
            },
            Indicator {
                id: "excessive-caps",
                category: IndicatorCategory::Spam,
                severity: Severity::Low,
                predicate: |f| f.content.subject_caps_ratio > 0.5,
                describe: |f| {
                    format!(
                        "Subject is mostly uppercase ({:.0}%)",
                        f.content.subject_caps_ratio * 100.0
                    )
                },
            },
            Indicator {
                id: "excessive-exclamation",
                category: IndicatorCategory::Spam,
                severity: Severity::Low,
                predicate: |f| f.content.exclamation_count >= 3,
                describe: |f| {
                    format!(
                        "Excessive exclamation marks ({})",
                        f.content.exclamation_count
                    )
                },
            },
            Indicator {
                id: "short-body-with-links",
                category: IndicatorCategory::Spam,
                severity: Severity::Low,
                predicate: |f| f.content.body_length < 50 && f.urls.url_count >= 1,
                describe: |_| "Barely any text besides links".to_string(),
            },
            Indicator {
                id: "free-provider-promotion",
                category: IndicatorCategory::Spam,
                severity: Severity::Low,
                predicate: |f| f.sender.free_provider && f.content.money_hits >= 2,
                describe: |_| "Promotional pitch from a free mail provider".to_string(),
            },
        ];

        Catalogue { indicators }
    }

    pub fn of_category(
        &self,
        category: IndicatorCategory,
    ) -> impl Iterator<Item = &Indicator> + '_ {
        self.indicators
            .iter()
            .filter(move |i| i.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Indicator> + '_ {
        self.indicators.iter()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::UrlFlags;

    #[test]
    fn test_ids_are_unique() {
        let catalogue = Catalogue::standard();
        let mut ids: Vec<_> = catalogue.iter().map(|i| i.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalogue.len());
    }

    #[test]
    fn test_every_category_is_populated() {
        let catalogue = Catalogue::standard();
        assert!(catalogue.of_category(IndicatorCategory::Phishing).count() >= 10);
        assert!(catalogue.of_category(IndicatorCategory::Spam).count() >= 5);
    }

    #[test]
    fn test_neutral_features_trigger_nothing() {
        let catalogue = Catalogue::standard();
        let mut features = ExtractedFeatures::default();
        features.sender.valid_address_syntax = true;
        for indicator in catalogue.iter() {
            assert!(
                !indicator.triggers(&features),
                "indicator {} fired on neutral features",
                indicator.id
            );
        }
    }

    #[test]
    fn test_descriptions_embed_counts() {
        let catalogue = Catalogue::standard();
        let mut features = ExtractedFeatures::default();
        features.content.credential_hits = 2;
        let indicator = catalogue
            .iter()
            .find(|i| i.id == "credential-request")
            .unwrap();
        assert!(indicator.triggers(&features));
        assert!(indicator.description(&features).contains("2 hits"));
    }

    #[test]
    fn test_url_indicators_key_on_flag_counts() {
        let catalogue = Catalogue::standard();
        let mut features = ExtractedFeatures::default();
        features.sender.valid_address_syntax = true;
        features.urls.url_count = 1;
        features.urls.flags.push(UrlFlags {
            raw_ip_host: true,
            ..Default::default()
        });
        let fired: Vec<_> = catalogue
            .iter()
            .filter(|i| i.triggers(&features))
            .map(|i| i.id)
            .collect();
        assert!(fired.contains(&"url-ip-host"));
        assert!(fired.contains(&"short-body-with-links")); // empty body, one link
        assert!(!fired.contains(&"url-domain-mismatch"));
    }

    #[test]
    fn test_severity_weight_lookup() {
        let weights = SeverityWeights {
            high: 25,
            medium: 15,
            low: 10,
        };
        assert_eq!(Severity::High.weight(&weights), 25);
        assert_eq!(Severity::Medium.weight(&weights), 15);
        assert_eq!(Severity::Low.weight(&weights), 10);
    }
}
