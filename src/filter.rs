use itertools::Itertools;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::models::{AssessmentType, Company, FilterCriteria, Question, YEAR_NOT_AVAILABLE};

fn fold(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

/// Stage 1: companies whose name contains the (trimmed) query, case-insensitively.
/// An empty query selects nothing.
pub fn select_companies<'a>(companies: &'a [Company], query: &str) -> Vec<&'a Company> {
    let needle = fold(query.trim());
    if needle.is_empty() {
        return vec![];
    }
    companies.iter().filter(|c| fold(&c.name).contains(&needle)).collect()
}

/// Runs the full pipeline and returns questions in company, section, item order.
pub fn filter_questions(companies: &[Company], criteria: &FilterCriteria) -> Vec<Question> {
    let selected = select_companies(companies, &criteria.company_query);
    if selected.is_empty() {
        debug!("Filter short-circuit - query={:?}, no company selected", criteria.company_query);
        return vec![];
    }

    let mut results = Vec::new();
    for company in selected.into_iter().filter(|c| company_matches(c, criteria)) {
        match criteria.assessment_type {
            Some(AssessmentType::Oa) => collect_oa(company, criteria, &mut results),
            Some(AssessmentType::Interview) => collect_interview(company, criteria, &mut results),
            None => {
                collect_oa(company, criteria, &mut results);
                collect_interview(company, criteria, &mut results);
            }
        }
    }

    debug!("Filter completed - criteria={:?}, results={}", criteria, results.len());
    results
}

/// Stage 2: role and yoe facets must match exactly when set.
fn company_matches(company: &Company, criteria: &FilterCriteria) -> bool {
    if let Some(role) = &criteria.role {
        if &company.role != role {
            return false;
        }
    }
    if let Some(yoe) = &criteria.yoe {
        if &company.yoe != yoe {
            return false;
        }
    }
    true
}

fn collect_oa(company: &Company, criteria: &FilterCriteria, out: &mut Vec<Question>) {
    // A year that is not a bucket key leaves every year in play.
    let pinned = criteria.year.as_ref().and_then(|y| company.oa.get(y.as_str()));

    let buckets: Vec<&Vec<Question>> = match pinned {
        Some(bucket) => vec![bucket],
        None => company.oa.values().collect(),
    };

    for q in buckets.into_iter().flatten() {
        if criteria.difficulty.map_or(true, |d| q.difficulty == d) {
            out.push(q.clone());
        }
    }
}

fn collect_interview(company: &Company, criteria: &FilterCriteria, out: &mut Vec<Question>) {
    for section in &company.interview {
        if let Some(topic) = &criteria.topic {
            if &section.key != topic {
                continue;
            }
        }
        for q in &section.questions {
            if interview_item_matches(q, criteria) {
                out.push(q.clone());
            }
        }
    }
}

fn interview_item_matches(q: &Question, criteria: &FilterCriteria) -> bool {
    if q.free_text {
        // Prompts have no difficulty, so any difficulty facet excludes them.
        return criteria.difficulty.is_none();
    }
    let year_ok = criteria.year.as_ref().map_or(true, |y| &q.year == y);
    let diff_ok = criteria.difficulty.map_or(true, |d| q.difficulty == d);
    year_ok && diff_ok
}

/// Year values offered by the year facet for the current company selection.
pub fn year_options(selected: &[&Company], kind: Option<AssessmentType>) -> Vec<String> {
    match kind {
        Some(AssessmentType::Oa) => selected
            .iter()
            .flat_map(|c| c.oa.keys().cloned())
            .unique()
            .collect(),
        _ => selected
            .iter()
            .flat_map(|c| c.interview.iter())
            .flat_map(|s| s.questions.iter())
            .filter(|q| !q.free_text && !q.year.is_empty() && q.year != YEAR_NOT_AVAILABLE)
            .map(|q| q.year.clone())
            .sorted()
            .dedup()
            .collect(),
    }
}
