#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::uninlined_format_args)]

use mailtriage::{Classifier, ClassifierConfig, EmailCategory, ParsedEmail};

fn main() -> anyhow::Result<()> {
    println!("Testing classification against known samples...");
    println!();

    let yaml = r#"
weights:
  high: 25
  medium: 15
  low: 10
thresholds:
  safe: 30
  suspicious: 70
blend:
  phishing: 0.6
  spam: 0.4
"#;

    let config: ClassifierConfig = serde_yaml::from_str(yaml)?;
    let classifier = Classifier::new(config)?;

    let mut failures = 0;

    // 1. Credential phish: lookalike sender, throwaway TLD, pressure language.
    let mut email = ParsedEmail::default();
    email.sender_name = Some("PayPal Security".to_string());
    email.sender_email = Some("verify@secure-paypal-login.tk".to_string());
    email.subject = Some("URGENT ACCOUNT SUSPENDED".to_string());
    email.body = Some("Verify your account now!!!".to_string());
    email.urls = vec!["http://paypal-login-verify.tk/secure".to_string()];

    let result = classifier.classify(&email);
    println!("Phishing sample: {}", result.summary());
    for indicator in &result.breakdown.triggered {
        println!("  - {} (+{})", indicator.id, indicator.weight);
    }
    if result.category == EmailCategory::Spam && result.breakdown.phishing_score >= 80 {
        println!("✅ Flagged as spam with a dominant phishing score");
    } else {
        println!("❌ Expected spam with phishing score >= 80");
        failures += 1;
    }
    println!();

    // 2. Ordinary notification from a trusted domain.
    let mut email = ParsedEmail::default();
    email.sender_name = Some("GitHub".to_string());
    email.sender_email = Some("notifications@github.com".to_string());
    email.subject = Some("New issue assigned to you".to_string());
    email.body = Some("You were assigned issue #42 in octocat/hello-world.".to_string());

    let result = classifier.classify(&email);
    println!("Notification sample: {}", result.summary());
    if result.category == EmailCategory::Safe && result.final_score == 0 {
        println!("✅ Clean notification stays at zero");
    } else {
        println!("❌ Expected a zero-score safe result");
        failures += 1;
    }
    println!();

    // 3. Pushy promotion: plenty of spam signal, no phishing signal. The
    //    0.6/0.4 blend dilutes a spam-only score of 55 down to 22.
    let mut email = ParsedEmail::default();
    email.sender_name = Some("Amazon Deals".to_string());
    email.sender_email = Some("deals@amazon.com".to_string());
    email.subject = Some("MEGA CLEARANCE EVENT".to_string());
    email.body = Some(
        "Huge savings on every order. Pay just $9 cash and win a prize in our shopper drawing today."
            .to_string(),
    );
    email.urls = (1..=5)
        .map(|i| format!("https://amazon.com/deal/{}", i))
        .collect();
    email.has_attachments = true;

    let result = classifier.classify(&email);
    println!("Promotion sample: {}", result.summary());
    if result.category == EmailCategory::Safe
        && result.breakdown.spam_score == 55
        && result.final_score == 22
    {
        println!("✅ Spam-only accumulation dilutes below the safe threshold");
    } else {
        println!("❌ Expected spam 55 / final 22 / safe");
        failures += 1;
    }
    println!();

    if failures > 0 {
        println!("❌ {} sample(s) misclassified", failures);
        std::process::exit(1);
    }
    println!("✅ All samples classified as expected");
    Ok(())
}
