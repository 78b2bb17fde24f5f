use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{
    AggregateResult, AssessmentType, Question, RepeatedQuestion, TopicShare, YEAR_NOT_AVAILABLE,
};

const TOP_TOPICS: usize = 5;

const PALETTE: [&str; 11] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#6366F1", "#DB2777", "#8B5CF6", "#14B8A6",
    "#F59E0B", "#EF4444", "#6366F1",
];

/// Computes every derived statistic for a filtered list. Pure in the list's contents and order.
pub fn aggregate(questions: &[Question], kind: Option<AssessmentType>) -> AggregateResult {
    let topic_counts = count_by(questions.iter().map(|q| q.topic.as_str()));
    let topic_percentages = topic_shares(&topic_counts, questions.len());

    let repeated_questions: Vec<RepeatedQuestion> = count_by(questions.iter().map(|q| q.link.as_str()))
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(link, count)| RepeatedQuestion { link, count })
        .sorted_by(|a, b| b.count.cmp(&a.count))
        .collect();

    let year_histogram = if kind == Some(AssessmentType::Interview) {
        count_years(questions)
    } else {
        BTreeMap::new()
    };

    debug!(
        "Aggregation completed - questions={}, topics={}, repeated={}, years={}",
        questions.len(),
        topic_counts.len(),
        repeated_questions.len(),
        year_histogram.len()
    );

    AggregateResult { topic_counts, topic_percentages, repeated_questions, year_histogram }
}

/// Occurrence counts keyed in first-seen order.
fn count_by<'a>(keys: impl Iterator<Item = &'a str>) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for k in keys {
        *counts.entry(k.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Top topics by count; ties keep first-seen order.
fn topic_shares(counts: &IndexMap<String, usize>, total: usize) -> Vec<TopicShare> {
    if total == 0 {
        return vec![];
    }
    counts
        .iter()
        .sorted_by(|a, b| b.1.cmp(a.1))
        .take(TOP_TOPICS)
        .map(|(topic, &n)| TopicShare { topic: topic.clone(), pct: percent(n, total) })
        .collect()
}

/// `round(n / total * 100)` with halves rounded up, in integer arithmetic.
fn percent(n: usize, total: usize) -> u32 {
    ((n * 200 + total) / (2 * total)) as u32
}

fn count_years(questions: &[Question]) -> BTreeMap<String, usize> {
    let mut hist = BTreeMap::new();
    for q in questions {
        if q.year.is_empty() || q.year == YEAR_NOT_AVAILABLE {
            continue;
        }
        *hist.entry(q.year.clone()).or_insert(0) += 1;
    }
    hist
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub count: usize,
    pub color: &'static str,
}

/// Pie-chart input: topics sorted by name, colours assigned by position.
pub fn chart_series(result: &AggregateResult) -> Vec<ChartSlice> {
    result
        .topic_counts
        .iter()
        .sorted_by(|a, b| a.0.cmp(b.0))
        .enumerate()
        .map(|(i, (label, &count))| ChartSlice {
            label: label.clone(),
            count,
            color: PALETTE[i % PALETTE.len()],
        })
        .collect()
}

/// One-line company insight, e.g. `"Microsoft SDE-1 OA: 67% dsa, 33% os"`.
pub fn insight_summary(
    query: &str,
    role: Option<&str>,
    kind: Option<AssessmentType>,
    result: &AggregateResult,
) -> String {
    let label = match kind {
        Some(AssessmentType::Oa) => "OA",
        _ => "Interview",
    };
    let shares = result
        .topic_percentages
        .iter()
        .map(|s| format!("{}% {}", s.pct, s.topic))
        .join(", ");
    format!("{} {} {}: {}", query.trim(), role.unwrap_or(""), label, shares)
}
