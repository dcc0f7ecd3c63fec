use crate::domains;
use crate::message::ParsedEmail;
use serde::Serialize;

const EXPECTED_HEADERS: &[&str] = &["From", "To", "Subject", "Date"];

#[derive(Debug, Clone, Default, Serialize)]
pub struct StructureFeatures {
    pub has_attachments: bool,
    /// Reply-To present and its domain unrelated to the sender domain.
    pub reply_to_mismatch: bool,
    /// How many of From/To/Subject/Date are absent. Informational: a bare
    /// snapshot with no headers should still classify as neutral.
    pub missing_header_count: usize,
    pub has_return_path: bool,
}

pub fn extract(email: &ParsedEmail, sender_domain: &str) -> StructureFeatures {
    let reply_to_mismatch = match email.reply_to.as_deref().and_then(domains::extract_domain) {
        Some(reply_domain) => {
            !sender_domain.is_empty() && !domains::same_or_subdomain(&reply_domain, sender_domain)
        }
        None => false,
    };

    let missing_header_count = EXPECTED_HEADERS
        .iter()
        .filter(|name| super::header_value(&email.headers, name).is_none())
        .count();

    StructureFeatures {
        has_attachments: email.has_attachments,
        reply_to_mismatch,
        missing_header_count,
        has_return_path: super::header_value(&email.headers, "Return-Path").is_some(),
    }
}
