use crate::domains;
use crate::message::ParsedEmail;
use serde::Serialize;
use url::{Host, Url};

const URL_SHORTENERS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "goo.gl",
    "ow.ly",
    "t.co",
    "is.gd",
    "buff.ly",
    "adf.ly",
    "short.link",
];

/// Risk flags for a single URL. An unparseable URL yields the all-false
/// record: it still counts toward `url_count` but carries no signal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UrlFlags {
    pub raw_ip_host: bool,
    pub shortener: bool,
    pub suspicious_tld: bool,
    /// Host is neither the sender domain nor in a subdomain relation with it.
    pub domain_mismatch: bool,
    /// Mismatched and within typosquatting distance of the sender domain.
    pub lookalike: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UrlFeatures {
    pub url_count: usize,
    pub flags: Vec<UrlFlags>,
}

impl UrlFeatures {
    pub fn ip_host_count(&self) -> usize {
        self.flags.iter().filter(|f| f.raw_ip_host).count()
    }

    pub fn shortener_count(&self) -> usize {
        self.flags.iter().filter(|f| f.shortener).count()
    }

    pub fn suspicious_tld_count(&self) -> usize {
        self.flags.iter().filter(|f| f.suspicious_tld).count()
    }

    pub fn mismatch_count(&self) -> usize {
        self.flags.iter().filter(|f| f.domain_mismatch).count()
    }

    pub fn lookalike_count(&self) -> usize {
        self.flags.iter().filter(|f| f.lookalike).count()
    }
}

pub fn extract(email: &ParsedEmail, sender_domain: &str) -> UrlFeatures {
    let flags = email
        .urls
        .iter()
        .map(|raw| flag_url(raw, sender_domain))
        .collect::<Vec<_>>();

    UrlFeatures {
        url_count: email.urls.len(),
        flags,
    }
}

fn flag_url(raw: &str, sender_domain: &str) -> UrlFlags {
    let parsed = match parse_lenient(raw) {
        Some(url) => url,
        None => return UrlFlags::default(),
    };

    match parsed.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => UrlFlags {
            raw_ip_host: true,
            ..Default::default()
        },
        Some(Host::Domain(host)) => {
            let host = domains::canonicalize(host);
            let suspicious_tld = domains::tld(&host)
                .map(|tld| super::SUSPICIOUS_TLDS.contains(&tld.as_str()))
                .unwrap_or(false);
            let domain_mismatch =
                !sender_domain.is_empty() && !domains::same_or_subdomain(&host, sender_domain);
            UrlFlags {
                raw_ip_host: false,
                shortener: domains::matches_domain_list(&host, URL_SHORTENERS),
                suspicious_tld,
                domain_mismatch,
                lookalike: domain_mismatch && domains::lookalike(&host, sender_domain),
            }
        }
        None => UrlFlags::default(),
    }
}

/// Parsers upstream are inconsistent about schemes; retry bare hosts as http.
/// Only the missing-scheme failure is retried: re-prefixing input that
/// already carries a scheme would parse that scheme as the host.
fn parse_lenient(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match Url::parse(trimmed) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("http://{}", trimmed)).ok()
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_with_urls(urls: &[&str], sender_domain: &str) -> (ParsedEmail, String) {
        let email = ParsedEmail {
            urls: urls.iter().map(|u| u.to_string()).collect(),
            ..Default::default()
        };
        (email, sender_domain.to_string())
    }

    #[test]
    fn test_ip_host_flag() {
        let (email, sender) = email_with_urls(&["http://192.168.10.5/login"], "example.com");
        let features = extract(&email, &sender);
        assert_eq!(features.ip_host_count(), 1);
        // IP hosts are not double-flagged as domain mismatches.
        assert_eq!(features.mismatch_count(), 0);
    }

    #[test]
    fn test_shortener_flag_covers_subdomains() {
        let (email, sender) = email_with_urls(&["https://bit.ly/x", "https://go.bit.ly/y"], "");
        let features = extract(&email, &sender);
        assert_eq!(features.shortener_count(), 2);
    }

    #[test]
    fn test_suspicious_tld_flag() {
        let (email, sender) = email_with_urls(&["http://win-big.xyz/claim"], "example.com");
        let features = extract(&email, &sender);
        assert_eq!(features.suspicious_tld_count(), 1);
    }

    #[test]
    fn test_mismatch_skipped_without_sender_domain() {
        let (email, sender) = email_with_urls(&["http://anywhere.org/x"], "");
        let features = extract(&email, &sender);
        assert_eq!(features.mismatch_count(), 0);
    }

    #[test]
    fn test_same_and_subdomain_urls_do_not_mismatch() {
        let (email, sender) = email_with_urls(
            &["https://example.com/a", "https://cdn.example.com/b"],
            "example.com",
        );
        let features = extract(&email, &sender);
        assert_eq!(features.mismatch_count(), 0);
    }

    #[test]
    fn test_lookalike_requires_similarity() {
        let (email, sender) =
            email_with_urls(&["http://paypa1.com/secure", "http://evil.org/x"], "paypal.com");
        let features = extract(&email, &sender);
        assert_eq!(features.mismatch_count(), 2);
        assert_eq!(features.lookalike_count(), 1);
    }

    #[test]
    fn test_schemeless_url_is_parsed() {
        let (email, sender) = email_with_urls(&["deals.tk/offer"], "example.com");
        let features = extract(&email, &sender);
        assert_eq!(features.suspicious_tld_count(), 1);
    }

    #[test]
    fn test_garbage_url_is_neutral_but_counted() {
        // Both carry a scheme and fail to parse (space in the host, empty
        // host). The bare-host retry must not kick in and hand back a URL
        // whose host is the original scheme.
        let (email, sender) =
            email_with_urls(&["http://bad host/url", "http://"], "example.com");
        let features = extract(&email, &sender);
        assert_eq!(features.url_count, 2);
        assert_eq!(features.mismatch_count(), 0);
        assert_eq!(features.suspicious_tld_count(), 0);
        assert_eq!(features.shortener_count(), 0);
    }
}
