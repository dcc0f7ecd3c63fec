use crate::domains;
use crate::message::ParsedEmail;
use regex::Regex;
use serde::Serialize;

const FREE_PROVIDERS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "aol.com",
    "mail.com",
    "protonmail.com",
];

const TRUSTED_DOMAINS: &[&str] = &["google.com", "github.com", "microsoft.com", "amazon.com"];

// Brands that phishers like to put in display names. The spoof check fires
// when a brand shows up in the name but nowhere in the sending domain.
const BRAND_TOKENS: &[&str] = &["paypal", "amazon", "google", "microsoft", "apple", "bank"];

#[derive(Debug, Clone, Default, Serialize)]
pub struct SenderFeatures {
    /// Lowercased sender domain, "" when underivable.
    pub domain: String,
    /// An empty sender reports valid: absence of a sender is not a signal.
    pub valid_address_syntax: bool,
    pub display_name_spoof: bool,
    pub free_provider: bool,
    pub trusted_domain: bool,
    pub suspicious_tld: bool,
}

pub struct SenderAnalyzer {
    address_shape: Regex,
}

impl SenderAnalyzer {
    pub fn new() -> Self {
        SenderAnalyzer {
            address_shape: Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .unwrap(),
        }
    }

    pub fn extract(&self, email: &ParsedEmail) -> SenderFeatures {
        let address = email.sender_email.as_deref().unwrap_or("").trim();
        let name = email.sender_name.as_deref().unwrap_or("").to_lowercase();

        let domain = email
            .sender_domain
            .as_deref()
            .map(domains::canonicalize)
            .filter(|d| !d.is_empty())
            .or_else(|| domains::extract_domain(address))
            .unwrap_or_default();

        let valid_address_syntax = address.is_empty() || self.address_shape.is_match(address);

        let display_name_spoof = !name.is_empty()
            && !domain.is_empty()
            && BRAND_TOKENS
                .iter()
                .any(|brand| name.contains(brand) && !domain.contains(brand));

        let suspicious_tld = domains::tld(&domain)
            .map(|tld| super::SUSPICIOUS_TLDS.contains(&tld.as_str()))
            .unwrap_or(false);

        SenderFeatures {
            free_provider: domains::matches_domain_list(&domain, FREE_PROVIDERS),
            trusted_domain: domains::matches_domain_list(&domain, TRUSTED_DOMAINS),
            valid_address_syntax,
            display_name_spoof,
            suspicious_tld,
            domain,
        }
    }
}

impl Default for SenderAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
