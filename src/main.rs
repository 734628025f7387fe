use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hashspread::{builtin, builtin_names, conduct_analysis, AnalysisConfig, DEFAULT_SAMPLE_SIZE};

/// Compare the bucket distribution of a hash function against fixed baselines.
#[derive(Parser, Debug)]
#[command(name = "hashspread", version)]
struct Args {
    /// Number of generated input strings.
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    samples: usize,

    /// Number of buckets (defaults to the sample count).
    #[arg(short, long)]
    buckets: Option<usize>,

    /// Builtin candidate to evaluate against the baselines.
    #[arg(short, long, default_value = "weighted-sum")]
    user: String,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// List the builtin candidates and exit.
    #[arg(long)]
    list_candidates: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list_candidates {
        println!("Available candidates:");
        for name in builtin_names() {
            println!("  {name}");
        }
        return ExitCode::SUCCESS;
    }

    let Some(user) = builtin(&args.user) else {
        eprintln!("error: unknown candidate {:?}. Available candidates:", args.user);
        for name in builtin_names() {
            eprintln!("  {name}");
        }
        return ExitCode::FAILURE;
    };

    let mut config = AnalysisConfig::new(args.samples);
    if let Some(buckets) = args.buckets {
        config = config.with_bucket_count(buckets);
    }

    let report = match conduct_analysis(&*user, &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: serializing report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{report}");
    }

    for warning in report.warnings() {
        eprintln!("warning: {warning}");
    }
    ExitCode::SUCCESS
}
