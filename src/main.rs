use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use grammar_guard::{CheckOptions, Checker, Error, RuleId};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "grammar-guard",
    about = "Flag incomplete sentences in text extracted from web pages",
    version
)]
struct Cli {
    /// Text files to check (reads stdin if none provided)
    files: Vec<String>,

    /// URL recorded in the report (defaults to the file path)
    #[arg(long)]
    url: Option<String>,

    /// JSON options file ({"detectIncomplete", "disabledRules", "language"})
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Drop findings of this rule (repeatable)
    #[arg(long = "disable-rule", value_name = "RULE_ID")]
    disabled_rules: Vec<String>,

    /// Skip the per-sentence completeness checks
    #[arg(long)]
    no_incomplete: bool,

    /// Language tag passed through with the options
    #[arg(long)]
    language: Option<String>,

    /// Print the known rule ids and exit
    #[arg(long)]
    list_rules: bool,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_options(cli: &Cli) -> Result<CheckOptions, Error> {
    let mut options = match &cli.options {
        Some(path) => CheckOptions::from_json_file(path)?,
        None => CheckOptions::default(),
    };
    for raw in &cli.disabled_rules {
        options = options.disable_rule(raw.parse::<RuleId>()?);
    }
    if cli.no_incomplete {
        options = options.with_detect_incomplete(false);
    }
    if let Some(language) = &cli.language {
        options = options.with_language(language.clone());
    }
    Ok(options)
}

fn run(cli: Cli) -> Result<(), Error> {
    if cli.list_rules {
        for rule in RuleId::ALL {
            println!("{:<30} {}", rule.as_str(), rule.description());
        }
        return Ok(());
    }

    let checker = Checker::new(build_options(&cli)?);

    if cli.files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .map_err(|source| Error::Io {
                path: "<stdin>".to_string(),
                source,
            })?;
        let result = checker.check(cli.url.as_deref().unwrap_or(""), &input);
        info!(errors = result.total_errors(), "checked stdin");
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for path in &cli.files {
            let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            let result = checker.check(cli.url.as_deref().unwrap_or(path), &text);
            info!(path = %path, errors = result.total_errors(), "checked file");
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
