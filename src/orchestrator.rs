use anyhow::{Context, Result};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::document::{export_document, DocumentRenderer};
use crate::export::{export_csv, export_markdown, table_view, write_artifact, TableView};
use crate::filter::{filter_questions, select_companies, year_options};
use crate::insights::{aggregate, chart_series, insight_summary};
use crate::load::{load_dataset, load_topic_labels};
use crate::models::{AggregateResult, FilterCriteria};
use crate::normalize::{normalize_dataset, TopicLabels};
use crate::render::render_insights_markdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Markdown,
    Table,
    Pdf,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub dataset_path: PathBuf,
    pub labels_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub criteria: FilterCriteria,
    pub formats: Vec<ExportFormat>,
}

/// How a run ended, from the caller's point of view. None of these is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    NotSearched,
    NoCompanyMatched,
    NoQuestions,
    Found(usize),
}

#[derive(Debug)]
pub struct RunSummary {
    pub outcome: SearchOutcome,
    pub aggregate: AggregateResult,
    pub table: Option<TableView>,
    pub written: Vec<PathBuf>,
    /// User-facing notices for exports that could not be produced.
    pub notices: Vec<String>,
}

pub fn run(cfg: &RunConfig, renderer: Option<&dyn DocumentRenderer>) -> Result<RunSummary> {
    let pipeline_start = std::time::Instant::now();
    info!(
        "Pipeline started - dataset={}, query={:?}",
        cfg.dataset_path.display(),
        cfg.criteria.company_query
    );

    // 1) load + normalize
    let labels = match &cfg.labels_path {
        Some(p) => load_topic_labels(p)?,
        None => TopicLabels::default(),
    };
    let raw = load_dataset(&cfg.dataset_path)?;
    let companies = normalize_dataset(raw, &labels);
    debug!("Companies normalized: {}", companies.len());

    // 2) search + filter
    let criteria = &cfg.criteria;
    if criteria.company_query.trim().is_empty() {
        info!("No search performed - empty company query");
        return Ok(empty_summary(SearchOutcome::NotSearched));
    }
    let selected = select_companies(&companies, &criteria.company_query);
    if selected.is_empty() {
        warn!("No company matched - query={:?}", criteria.company_query);
        return Ok(empty_summary(SearchOutcome::NoCompanyMatched));
    }
    debug!(
        "Companies selected={}, year_options={:?}",
        selected.len(),
        year_options(&selected, criteria.assessment_type)
    );

    let filter_start = std::time::Instant::now();
    let questions = filter_questions(&companies, criteria);
    info!(
        "Filter completed - duration={:.2}s, questions={}",
        filter_start.elapsed().as_secs_f32(),
        questions.len()
    );
    if questions.is_empty() {
        info!("No questions for the selected filters");
        return Ok(empty_summary(SearchOutcome::NoQuestions));
    }

    // 3) insights
    let result = aggregate(&questions, criteria.assessment_type);
    let summary_line = insight_summary(
        &criteria.company_query,
        criteria.role.as_deref(),
        criteria.assessment_type,
        &result,
    );
    info!("Insights - {}", summary_line);

    // 4) exports
    let out_dir = cfg.output_dir.as_path();
    let mut written = Vec::new();
    let mut notices = Vec::new();
    let mut table = None;

    for format in &cfg.formats {
        match format {
            ExportFormat::Csv => written.push(write_artifact(out_dir, &export_csv(&questions))?),
            ExportFormat::Markdown => {
                written.push(write_artifact(out_dir, &export_markdown(&questions))?)
            }
            ExportFormat::Table => table = Some(table_view(&questions)),
            ExportFormat::Pdf => match export_document(&questions, renderer) {
                Ok(artifact) => written.push(write_artifact(out_dir, &artifact)?),
                Err(e) => {
                    warn!("PDF export skipped - {}", e);
                    notices.push(e.to_string());
                }
            },
        }
    }

    written.extend(write_insights(out_dir, &summary_line, &result, criteria)?);

    info!(
        "Pipeline completed - total_duration={:.2}s, questions={}, files={}",
        pipeline_start.elapsed().as_secs_f32(),
        questions.len(),
        written.len()
    );

    Ok(RunSummary {
        outcome: SearchOutcome::Found(questions.len()),
        aggregate: result,
        table,
        written,
        notices,
    })
}

fn empty_summary(outcome: SearchOutcome) -> RunSummary {
    RunSummary {
        outcome,
        aggregate: AggregateResult::default(),
        table: None,
        written: vec![],
        notices: vec![],
    }
}

fn write_insights(
    out_dir: &Path,
    summary_line: &str,
    result: &AggregateResult,
    criteria: &FilterCriteria,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir).with_context(|| format!("create {:?}", out_dir))?;

    let json_path = out_dir.join("insights.json");
    let payload = json!({
        "summary": summary_line,
        "aggregate": result,
        "chart": chart_series(result),
    });
    std::fs::write(&json_path, serde_json::to_vec_pretty(&payload)?)
        .with_context(|| format!("write {:?}", json_path))?;
    debug!("Wrote insights.json");

    let md_path = out_dir.join("insights.md");
    let md = render_insights_markdown(summary_line, result, criteria.assessment_type);
    std::fs::write(&md_path, md.as_bytes()).with_context(|| format!("write {:?}", md_path))?;
    debug!("Wrote insights.md");

    Ok(vec![json_path, md_path])
}
