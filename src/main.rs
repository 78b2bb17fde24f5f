use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use question_insights::models::{facet, AssessmentType, Difficulty, FilterCriteria};
use question_insights::orchestrator::{run, ExportFormat, RunConfig, SearchOutcome};

const DEFAULT_DATASET: &str = "data/questions.json";

/// Question Insights - search, filter and export company interview questions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Company name (case-insensitive substring)
    query: String,

    /// Path to the dataset JSON (overrides QI_DATASET environment variable)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Path to a section-key -> topic label table (overrides QI_LABELS)
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Output directory for exported files
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Exact role facet, e.g. "SDE-1"
    #[arg(long, default_value = "")]
    role: String,

    /// Exact years-of-experience facet
    #[arg(long, default_value = "")]
    yoe: String,

    /// OA or Interview; both when omitted
    #[arg(long = "type")]
    assessment_type: Option<AssessmentType>,

    /// Interview section key, e.g. "dsa"
    #[arg(long, default_value = "")]
    topic: String,

    #[arg(long, default_value = "")]
    year: String,

    /// Easy, Medium, Hard or Unknown
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Export formats to produce
    #[arg(short, long, value_enum, value_delimiter = ',', default_value = "csv,markdown")]
    format: Vec<ExportFormat>,
}

/// CLI flag > environment variable > default.
fn resolve_path(flag: Option<PathBuf>, env_key: &str) -> Option<PathBuf> {
    flag.or_else(|| std::env::var(env_key).ok().map(PathBuf::from))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    let args = Args::parse();
    debug!("Arguments: {:?}", args);

    let dataset_path = resolve_path(args.dataset, "QI_DATASET")
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));
    let labels_path = resolve_path(args.labels, "QI_LABELS");

    if !dataset_path.exists() {
        return Err(anyhow::anyhow!(
            "dataset not found at {}\n\
             Use --dataset to specify a dataset file, or set QI_DATASET environment variable.",
            dataset_path.display()
        ));
    }

    let criteria = FilterCriteria {
        company_query: args.query,
        role: facet(args.role),
        yoe: facet(args.yoe),
        assessment_type: args.assessment_type,
        topic: facet(args.topic.to_lowercase()),
        year: facet(args.year),
        difficulty: args.difficulty,
    };

    let cfg = RunConfig {
        dataset_path,
        labels_path,
        output_dir: args.output_dir,
        criteria,
        formats: args.format,
    };

    // No document renderer ships with the CLI; a PDF request reports that and moves on.
    let summary = run(&cfg, None)?;

    match summary.outcome {
        SearchOutcome::NotSearched => println!("Enter a company name to search."),
        SearchOutcome::NoCompanyMatched => println!("No questions found for this company."),
        SearchOutcome::NoQuestions => println!("No questions found for the selected filters."),
        SearchOutcome::Found(n) => info!("Found {} question(s)", n),
    }
    if let Some(table) = &summary.table {
        print!("{}", table);
    }
    for notice in &summary.notices {
        eprintln!("{}", notice);
    }
    for path in &summary.written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
