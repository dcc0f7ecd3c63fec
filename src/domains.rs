//! Domain helpers shared by sender and URL analysis.

/// Extract the domain part of an email address, lowercased.
/// Accepts bare addresses and `Name <addr>` forms.
pub fn extract_domain(address: &str) -> Option<String> {
    let addr = address.trim();
    let addr = match (addr.rfind('<'), addr.rfind('>')) {
        (Some(start), Some(end)) if start < end => &addr[start + 1..end],
        _ => addr,
    };
    let domain = addr.rsplit('@').next()?;
    if domain.is_empty() || !addr.contains('@') {
        return None;
    }
    Some(canonicalize(domain))
}

/// Lowercase, strip a leading `www.` and any trailing dot.
pub fn canonicalize(domain: &str) -> String {
    let lower = domain.trim().trim_end_matches('.').to_lowercase();
    lower.strip_prefix("www.").unwrap_or(&lower).to_string()
}

/// True when the domains are equal or one is a subdomain of the other.
pub fn same_or_subdomain(a: &str, b: &str) -> bool {
    let a = canonicalize(a);
    let b = canonicalize(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b || a.ends_with(&format!(".{}", b)) || b.ends_with(&format!(".{}", a))
}

/// Exact or subdomain match against a list of bare domains.
pub fn matches_domain_list(domain: &str, list: &[&str]) -> bool {
    let domain = canonicalize(domain);
    list.iter()
        .any(|entry| domain == *entry || domain.ends_with(&format!(".{}", entry)))
}

/// Last label of the domain, or None for single-label hosts.
pub fn tld(domain: &str) -> Option<String> {
    let domain = canonicalize(domain);
    let label = domain.rsplit('.').next()?;
    if label.is_empty() || label == domain {
        return None;
    }
    Some(label.to_string())
}

/// Similar-but-different domains: lengths within 2 and at most 2 differing
/// characters position-by-position. Catches single-swap typosquats like
/// `paypa1.com` without flagging unrelated domains.
pub fn lookalike(a: &str, b: &str) -> bool {
    let a = canonicalize(a);
    let b = canonicalize(b);
    if a.is_empty() || b.is_empty() || a == b {
        return false;
    }
    if a.len().abs_diff(b.len()) > 2 {
        return false;
    }
    let differences = a.chars().zip(b.chars()).filter(|(x, y)| x != y).count();
    differences <= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain() {
        assert_eq!(
            extract_domain("user@Example.COM"),
            Some("example.com".to_string())
        );
        assert_eq!(
            extract_domain("Alice <alice@mail.example.org>"),
            Some("mail.example.org".to_string())
        );
        assert_eq!(extract_domain("not-an-address"), None);
        assert_eq!(extract_domain(""), None);
    }

    #[test]
    fn test_canonicalize_strips_www_and_case() {
        assert_eq!(canonicalize("WWW.Example.COM."), "example.com");
        assert_eq!(canonicalize("example.com"), "example.com");
    }

    #[test]
    fn test_same_or_subdomain() {
        assert!(same_or_subdomain("example.com", "example.com"));
        assert!(same_or_subdomain("mail.example.com", "example.com"));
        assert!(same_or_subdomain("example.com", "mail.example.com"));
        assert!(!same_or_subdomain("notexample.com", "example.com"));
        assert!(!same_or_subdomain("", "example.com"));
    }

    #[test]
    fn test_matches_domain_list() {
        let list = ["bit.ly", "tinyurl.com"];
        assert!(matches_domain_list("bit.ly", &list));
        assert!(matches_domain_list("links.bit.ly", &list));
        assert!(!matches_domain_list("notbit.ly", &list));
    }

    #[test]
    fn test_tld() {
        assert_eq!(tld("example.tk"), Some("tk".to_string()));
        assert_eq!(tld("a.b.example.xyz"), Some("xyz".to_string()));
        assert_eq!(tld("localhost"), None);
    }

    #[test]
    fn test_lookalike_domains() {
        assert!(lookalike("paypa1.com", "paypal.com"));
        assert!(lookalike("paypal.co", "paypal.com"));
        assert!(!lookalike("paypal.com", "paypal.com"));
        assert!(!lookalike("completely-different.org", "paypal.com"));
    }
}
