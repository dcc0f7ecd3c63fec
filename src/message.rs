use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parsed form of an email as delivered by an upstream parser.
///
/// Every field is optional or defaulted: the engine never assumes a field is
/// present, and a sparse JSON document deserializes into a valid message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedEmail {
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub sender_email: Option<String>,
    /// Domain part of the sender address. Parsers usually fill this in;
    /// when empty it is derived from `sender_email`.
    #[serde(default)]
    pub sender_domain: Option<String>,
    #[serde(default)]
    pub reply_to: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    /// Plain-text body.
    #[serde(default)]
    pub body: Option<String>,
    /// URLs the parser collected from the body.
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub has_attachments: bool,
    /// Raw header mapping, as parsed.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ParsedEmail {
    pub fn subject_text(&self) -> &str {
        self.subject.as_deref().unwrap_or("")
    }

    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}
