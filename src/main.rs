use clap::{Arg, Command};
use log::LevelFilter;
use mailtriage::{
    ClassificationResult, ClassificationSummary, Classifier, ClassifierConfig, EmailCategory,
    ParsedEmail,
};
use std::process;

fn main() {
    let matches = Command::new("mailtriage")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rule-based email threat scoring: safe, suspicious, or spam")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("/etc/mailtriage.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate configuration and run the built-in sample corpus")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("classify")
                .long("classify")
                .value_name("FILE")
                .help("Classify a parsed email (JSON file, '-' for stdin)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Emit classification results as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .help("Classify the built-in sample corpus and print results")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging with per-indicator detail")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        match ClassifierConfig::generate_default(generate_path) {
            Ok(()) => println!("✅ Default configuration written to {generate_path}"),
            Err(e) => {
                eprintln!("❌ Failed to write configuration: {e}");
                process::exit(1);
            }
        }
        return;
    }

    let config_path = matches.get_one::<String>("config").unwrap();
    let config = if std::path::Path::new(config_path).exists() {
        match ClassifierConfig::load(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Error loading configuration: {e:#}");
                process::exit(1);
            }
        }
    } else {
        log::warn!("config file {} not found, using defaults", config_path);
        ClassifierConfig::default()
    };

    let classifier = match Classifier::new(config) {
        Ok(classifier) => classifier,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e:#}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        test_config(&classifier);
        return;
    }

    if let Some(input_path) = matches.get_one::<String>("classify") {
        classify_file(&classifier, input_path, matches.get_flag("json"));
        return;
    }

    if matches.get_flag("demo") {
        run_demo(&classifier, matches.get_flag("json"));
        return;
    }

    eprintln!("Nothing to do. Try --classify, --demo or --test-config (see --help).");
    process::exit(1);
}

fn test_config(classifier: &Classifier) {
    println!("🔍 Testing configuration...");
    println!();

    let config = classifier.config();
    println!(
        "Severity weights: high={} medium={} low={}",
        config.weights.high, config.weights.medium, config.weights.low
    );
    println!(
        "Thresholds: safe<={} suspicious<={} spam>={}",
        config.thresholds.safe,
        config.thresholds.suspicious,
        config.thresholds.suspicious as u16 + 1
    );
    println!(
        "Blend: phishing={} spam={}",
        config.blend.phishing, config.blend.spam
    );
    println!(
        "Indicator catalogue: {} rules",
        mailtriage::Catalogue::standard().len()
    );
    println!();
    println!("✅ Configuration validated");
    println!();

    println!("Running sample corpus:");
    run_demo(classifier, false);
}

fn classify_file(classifier: &Classifier, input_path: &str, as_json: bool) {
    let content = if input_path == "-" {
        let mut buffer = String::new();
        use std::io::Read;
        if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
            eprintln!("❌ Failed to read stdin: {e}");
            process::exit(1);
        }
        buffer
    } else {
        match std::fs::read_to_string(input_path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("❌ Failed to read {input_path}: {e}");
                process::exit(1);
            }
        }
    };

    let email: ParsedEmail = match serde_json::from_str(&content) {
        Ok(email) => email,
        Err(e) => {
            eprintln!("❌ Failed to parse email JSON: {e}");
            process::exit(1);
        }
    };

    let result = classifier.classify(&email);

    if as_json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("❌ Failed to serialize result: {e}");
                process::exit(1);
            }
        }
        return;
    }

    print_result(
        email.subject.as_deref().unwrap_or("(no subject)"),
        &result,
    );
}

fn run_demo(classifier: &Classifier, as_json: bool) {
    let corpus = sample_corpus();
    let emails: Vec<ParsedEmail> = corpus.iter().map(|(_, email)| email.clone()).collect();
    let results = classifier.classify_batch(&emails);

    if as_json {
        match serde_json::to_string_pretty(&results) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("❌ Failed to serialize results: {e}");
                process::exit(1);
            }
        }
        return;
    }

    for ((label, _), result) in corpus.iter().zip(&results) {
        print_result(label, result);
    }

    let summary = ClassificationSummary::tally(&results);
    println!(
        "📊 {} emails: {} safe, {} suspicious, {} spam",
        summary.total, summary.safe, summary.suspicious, summary.spam
    );
}

fn print_result(label: &str, result: &ClassificationResult) {
    let marker = match result.category {
        EmailCategory::Safe => "✅",
        EmailCategory::Suspicious => "⚠️",
        EmailCategory::Spam => "❌",
    };
    println!("{} {}: {}", marker, label, result.summary());
    for indicator in &result.breakdown.triggered {
        println!(
            "    [{}/{}] {} (+{})",
            indicator.category,
            indicator.id,
            indicator.description,
            indicator.weight
        );
    }
    println!();
}

fn sample_corpus() -> Vec<(&'static str, ParsedEmail)> {
    vec![
        (
            "Plain notification",
            ParsedEmail {
                sender_name: Some("GitHub".to_string()),
                sender_email: Some("notifications@github.com".to_string()),
                subject: Some("New issue assigned to you".to_string()),
                body: Some("You were assigned issue #42 in octocat/hello-world.".to_string()),
                ..Default::default()
            },
        ),
        (
            "Credential phish on a throwaway TLD",
            ParsedEmail {
                sender_name: Some("PayPal Security".to_string()),
                sender_email: Some("verify@secure-paypal-login.tk".to_string()),
                subject: Some("URGENT ACCOUNT SUSPENDED".to_string()),
                body: Some("Verify your account now!!!".to_string()),
                urls: vec!["http://paypal-login-verify.tk/secure".to_string()],
                ..Default::default()
            },
        ),
        (
            "Loud but harmless promotion",
            ParsedEmail {
                sender_name: Some("Amazon Deals".to_string()),
                sender_email: Some("deals@amazon.com".to_string()),
                subject: Some("MEGA CLEARANCE EVENT".to_string()),
                body: Some(
                    "Huge savings on every order. Pay just $9 cash and win a prize in our shopper drawing today."
                        .to_string(),
                ),
                urls: vec![
                    "https://amazon.com/deal/1".to_string(),
                    "https://amazon.com/deal/2".to_string(),
                    "https://amazon.com/deal/3".to_string(),
                    "https://amazon.com/deal/4".to_string(),
                    "https://amazon.com/deal/5".to_string(),
                ],
                has_attachments: true,
                ..Default::default()
            },
        ),
        (
            "Prize bait from a free mailbox",
            ParsedEmail {
                sender_name: Some("Rewards Team".to_string()),
                sender_email: Some("winner-notify@gmail.com".to_string()),
                subject: Some("You are our prize winner!!!".to_string()),
                body: Some(
                    "Claim your reward of $2,500 cash today. Act now, this offer expires!"
                        .to_string(),
                ),
                urls: vec!["http://bit.ly/claim-now".to_string()],
                ..Default::default()
            },
        ),
    ]
}
