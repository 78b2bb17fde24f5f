use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, info};

use crate::api_types::RawDataset;
use crate::normalize::TopicLabels;

/// Reads the static question dataset from disk.
pub fn load_dataset(path: &Path) -> Result<RawDataset> {
    let start = std::time::Instant::now();
    debug!("Loading dataset - path={}", path.display());

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Reading dataset {}", path.display()))?;
    let dataset = parse_dataset(&text)
        .with_context(|| format!("Decoding JSON for {}", path.display()))?;

    let companies = dataset.len();
    info!(
        "Dataset loaded - path={}, duration={:.2}s, companies={}",
        path.display(),
        start.elapsed().as_secs_f32(),
        companies
    );
    Ok(dataset)
}

pub fn parse_dataset(text: &str) -> Result<RawDataset> {
    Ok(serde_json::from_str(text)?)
}

/// Reads a `{ "section_key": "Label" }` table to replace the built-in topic labels.
pub fn load_topic_labels(path: &Path) -> Result<TopicLabels> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Reading topic labels {}", path.display()))?;
    let map: IndexMap<String, String> = serde_json::from_str(&text)
        .with_context(|| format!("Decoding JSON for {}", path.display()))?;
    debug!("Topic labels loaded - path={}, entries={}", path.display(), map.len());
    Ok(TopicLabels::from_pairs(map))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keyed_layout_in_source_order() {
        let ds = parse_dataset(r#"{"Zeta": {"role": "SDE-1"}, "Alpha": {}}"#).unwrap();
        let names: Vec<String> = ds.into_companies().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn parses_listed_layout_and_names_anonymous_entries() {
        let ds = parse_dataset(r#"[{"name": "Microsoft", "extra": 1}, {"role": "Intern"}]"#).unwrap();
        let names: Vec<String> = ds.into_companies().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Microsoft", "Company 2"]);
    }

    #[test]
    fn null_sections_read_as_empty() {
        let ds = parse_dataset(
            r#"{"Acme": {"oa": null, "interview": {"dsa": [{"link": "i1"}]}},
                "Beta": {"oa": {"2023": [{"link": "o1"}]}, "interview": null}}"#,
        )
        .unwrap();
        let companies = ds.into_companies();
        assert_eq!(companies.len(), 2);
        let (_, acme) = &companies[0];
        assert!(acme.oa.is_empty());
        assert_eq!(acme.interview["dsa"].len(), 1);
        let (_, beta) = &companies[1];
        assert_eq!(beta.oa["2023"].len(), 1);
        assert!(beta.interview.is_empty());

        let listed = parse_dataset(r#"[{"name": "Acme", "interview": null}]"#).unwrap();
        assert_eq!(listed.into_companies()[0].0, "Acme");
    }

    #[test]
    fn malformed_company_is_skipped_not_fatal() {
        let ds = parse_dataset(
            r#"{"Broken": {"oa": {"2023": "not a list"}},
                "Good": {"oa": {"2023": [{"link": "q1"}]}},
                "Scalar": 7}"#,
        )
        .unwrap();
        assert_eq!(ds.len(), 3);
        let names: Vec<String> = ds.into_companies().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Good"]);
    }

    #[test]
    fn rejects_non_json_input() {
        assert!(parse_dataset("not json").is_err());
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let err = load_dataset(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/not/here.json"));
    }
}
