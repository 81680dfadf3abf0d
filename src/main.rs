//! Command-line front end: reads a transaction file, prompts for thresholds
//! unless they are given as flags, and prints the mined itemsets and rules.

use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use apriori::{mine, report::Report, CandidatePruning, Corpus, MiningConfig};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

const QUIT: &str = "-1";

/// Discover frequent itemsets and association rules in a basket file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Transaction file, one basket of whitespace-separated items per line
    #[arg(default_value = "T10I4D100K.dat")]
    dataset: PathBuf,

    /// Keep itemsets whose count is strictly greater than this
    #[arg(short, long)]
    support: Option<u32>,

    /// Keep rules whose confidence is strictly greater than this
    #[arg(short, long)]
    confidence: Option<f64>,

    /// TOML file with mining settings; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Candidate pruning: `level-one` or `previous-level`
    #[arg(long)]
    pruning: Option<CandidatePruning>,

    /// Count baskets on a single thread
    #[arg(long)]
    sequential: bool,

    /// Stop after the level during which this many seconds have passed
    #[arg(long, value_name = "SECS")]
    time_budget: Option<f64>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// A value read from the prompt, or the request to stop.
#[derive(Debug, PartialEq)]
enum Answer<T> {
    Value(T),
    Quit,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let base = base_config(&args)?;

    if let (Some(_), Some(_)) = (args.support, args.confidence) {
        return run(&args.dataset, &base, args.format);
    }

    eprintln!("Let's find frequent itemsets!");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        let support = match args.support {
            Some(support) => support,
            None => match prompt(
                &mut input,
                "Enter a support threshold value (any integer) or enter -1 to quit: ",
                parse_support,
            )? {
                Answer::Value(support) => support,
                Answer::Quit => break,
            },
        };
        let confidence = match args.confidence {
            Some(confidence) => confidence,
            None => match prompt(
                &mut input,
                "Enter a confidence threshold value (0.01 - 0.99) or enter -1 to quit: ",
                parse_confidence,
            )? {
                Answer::Value(confidence) => confidence,
                Answer::Quit => break,
            },
        };

        let config = MiningConfig {
            support,
            confidence,
            ..base.clone()
        };
        run(&args.dataset, &config, args.format)?;
    }
    eprintln!("The program has been terminated");

    Ok(())
}

fn base_config(args: &Args) -> Result<MiningConfig> {
    let mut config = match &args.config {
        Some(path) => MiningConfig::from_file(path)?,
        None => MiningConfig::default(),
    };
    if let Some(support) = args.support {
        config.support = support;
    }
    if let Some(confidence) = args.confidence {
        config.confidence = confidence;
    }
    if let Some(pruning) = args.pruning {
        config.pruning = pruning;
    }
    if args.sequential {
        config.parallel = false;
    }
    if let Some(secs) = args.time_budget {
        config.time_budget_secs = Some(secs);
    }
    config.validate()?;
    Ok(config)
}

fn run(dataset: &Path, config: &MiningConfig, format: Format) -> Result<()> {
    eprintln!(
        "Computing all frequent itemsets with support > {} and rules with confidence > {}...",
        config.support, config.confidence
    );
    let started = Instant::now();

    let corpus = Corpus::open(dataset)?;
    let (mining, rules) = mine(&corpus, config)?;
    let report = Report::new(&corpus, &mining, &rules);

    let stdout = io::stdout();
    write_report(&mut stdout.lock(), &report, format, started.elapsed())
}

/// In JSON mode `out` receives the document and nothing else.
fn write_report<W: Write>(
    out: &mut W,
    report: &Report,
    format: Format,
    elapsed: Duration,
) -> Result<()> {
    match format {
        Format::Text => {
            report.write_text(out)?;
            writeln!(
                out,
                "Total Running Time: {:.2} seconds",
                elapsed.as_secs_f64()
            )?;
        }
        Format::Json => {
            writeln!(out, "{}", report.to_json()?)?;
            info!(seconds = elapsed.as_secs_f64(), "total running time");
        }
    }
    Ok(())
}

/// Ask until the answer parses. End of input counts as quitting.
fn prompt<R, T, F>(input: &mut R, question: &str, parse: F) -> Result<Answer<T>>
where
    R: BufRead,
    F: Fn(&str) -> std::result::Result<Answer<T>, String>,
{
    let mut line = String::new();
    loop {
        eprint!("{question}");
        io::stderr().flush()?;

        line.clear();
        if input.read_line(&mut line).context("failed to read from stdin")? == 0 {
            return Ok(Answer::Quit);
        }
        match parse(line.trim()) {
            Ok(answer) => return Ok(answer),
            Err(message) => warn!("{message}"),
        }
    }
}

fn parse_support(input: &str) -> std::result::Result<Answer<u32>, String> {
    if input == QUIT {
        return Ok(Answer::Quit);
    }
    input
        .parse()
        .map(Answer::Value)
        .map_err(|_| format!("`{input}` is not a non-negative integer"))
}

fn parse_confidence(input: &str) -> std::result::Result<Answer<f64>, String> {
    if input == QUIT {
        return Ok(Answer::Quit);
    }
    match input.parse::<f64>() {
        Ok(confidence) if confidence.is_nan() => Err("confidence must be a number".to_owned()),
        Ok(confidence) => Ok(Answer::Value(confidence)),
        Err(_) => Err(format!("`{input}` is not a number")),
    }
}
