pub mod content;
pub mod sender;
pub mod structure;
pub mod urls;

use crate::message::ParsedEmail;
use serde::Serialize;
use std::collections::HashMap;

pub use content::ContentFeatures;
pub use sender::SenderFeatures;
pub use structure::StructureFeatures;
pub use urls::{UrlFeatures, UrlFlags};

/// TLDs with disproportionate abuse rates. Checked for both the sender
/// domain and every link host.
pub(crate) const SUSPICIOUS_TLDS: &[&str] = &[
    "tk", "ml", "ga", "cf", "gq", "xyz", "top", "work", "click",
];

/// Everything the indicator catalogue can see about one email.
///
/// Extraction is pure and total: malformed or absent fields degrade to the
/// neutral value of the corresponding feature, never to an error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractedFeatures {
    pub sender: SenderFeatures,
    pub content: ContentFeatures,
    pub urls: UrlFeatures,
    pub structure: StructureFeatures,
}

/// Turns a `ParsedEmail` into an `ExtractedFeatures` snapshot.
///
/// Construction compiles the static keyword sets once; extraction itself
/// allocates only the snapshot.
pub struct FeatureExtractor {
    sender: sender::SenderAnalyzer,
    content: content::ContentAnalyzer,
}

impl FeatureExtractor {
    pub fn new() -> Self {
        FeatureExtractor {
            sender: sender::SenderAnalyzer::new(),
            content: content::ContentAnalyzer::new(),
        }
    }

    pub fn extract(&self, email: &ParsedEmail) -> ExtractedFeatures {
        let sender = self.sender.extract(email);
        let content = self.content.extract(email);
        let urls = urls::extract(email, &sender.domain);
        let structure = structure::extract(email, &sender.domain);

        log::debug!(
            "extracted features: domain={:?} urls={} urgency={} credential={} money={}",
            sender.domain,
            urls.url_count,
            content.urgency_hits,
            content.credential_hits,
            content.money_hits
        );

        ExtractedFeatures {
            sender,
            content,
            urls,
            structure,
        }
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive header lookup over the raw header map.
pub(crate) fn header_value<'a>(
    headers: &'a HashMap<String, String>,
    name: &str,
) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
