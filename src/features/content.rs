use crate::message::ParsedEmail;
use regex::RegexSet;
use serde::Serialize;

// Word-boundary patterns rather than raw substrings, so "pin" does not hit
// "shopping". Each entry is one keyword; hit counts are distinct keywords
// matched, not occurrences.

const URGENCY_PATTERNS: &[&str] = &[
    r"\burgent(?:ly)?\b",
    r"\bimmediate(?:ly)?\b",
    r"\bact now\b",
    r"\bexpir(?:es|ing|ed)\b",
    r"\blimited time\b",
    r"\bhurry\b",
    r"\bquick\b",
    r"\bfast\b",
    r"\bdeadline\b",
    r"\btoday only\b",
];

const CREDENTIAL_PATTERNS: &[&str] = &[
    r"\bpassword\b",
    r"\busername\b",
    r"\blogin\b",
    r"\bsocial security\b",
    r"\bssn\b",
    r"\bcredit card\b",
    r"\baccount number\b",
    r"\bpin\b",
    r"\bverify\b",
];

const MONEY_PATTERNS: &[&str] = &[
    r"[$€£]",
    r"\bmoney\b",
    r"\bcash\b",
    r"\bprize\b",
    r"\bwinner\b",
    r"\blottery\b",
    r"\bfree\b",
    r"\bcredit card\b",
    r"\bbank account\b",
    r"\bpayment\b",
];

// Stock phishing phrasing, with enough flexibility to catch the common word
// orders ("account suspended" as well as "suspended account").
const PHISHING_PHRASE_PATTERNS: &[&str] = &[
    r"\bverify your account\b",
    r"\bconfirm your identity\b",
    r"\b(?:account (?:is |has been |will be )?suspended|suspended account)\b",
    r"\bunusual activity\b",
    r"\bclick here immediately\b",
    r"\burgent action required\b",
    r"\bverify your password\b",
    r"\bconfirm your information\b",
    r"\baccount will be closed\b",
    r"\bsecurity alert\b",
    r"\bunauthorized access\b",
    r"\bupdate (?:your )?payment method\b",
    r"\bprize winner\b",
    r"\bclaim your (?:reward|prize)\b",
    r"\bact now\b",
    r"\blimited time offer\b",
];

/// Keyword and shape features over subject + body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentFeatures {
    pub urgency_hits: usize,
    pub credential_hits: usize,
    pub money_hits: usize,
    pub phishing_phrase_hits: usize,
    pub exclamation_count: usize,
    pub question_count: usize,
    /// Uppercase chars / subject length, 0.0 for an empty subject.
    pub subject_caps_ratio: f32,
    pub body_length: usize,
}

pub struct ContentAnalyzer {
    urgency: RegexSet,
    credential: RegexSet,
    money: RegexSet,
    phishing_phrases: RegexSet,
}

impl ContentAnalyzer {
    pub fn new() -> Self {
        ContentAnalyzer {
            urgency: compile_set(URGENCY_PATTERNS),
            credential: compile_set(CREDENTIAL_PATTERNS),
            money: compile_set(MONEY_PATTERNS),
            phishing_phrases: compile_set(PHISHING_PHRASE_PATTERNS),
        }
    }

    pub fn extract(&self, email: &ParsedEmail) -> ContentFeatures {
        let subject = email.subject_text();
        let body = email.body_text();
        let combined = format!("{} {}", subject, body);

        ContentFeatures {
            urgency_hits: self.urgency.matches(&combined).iter().count(),
            credential_hits: self.credential.matches(&combined).iter().count(),
            money_hits: self.money.matches(&combined).iter().count(),
            phishing_phrase_hits: self.phishing_phrases.matches(&combined).iter().count(),
            exclamation_count: combined.matches('!').count(),
            question_count: combined.matches('?').count(),
            subject_caps_ratio: caps_ratio(subject),
            body_length: body.chars().count(),
        }
    }
}

impl Default for ContentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_set(patterns: &[&str]) -> RegexSet {
    RegexSet::new(patterns.iter().map(|p| format!("(?i){}", p))).unwrap()
}

fn caps_ratio(text: &str) -> f32 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper as f32 / total as f32
}
