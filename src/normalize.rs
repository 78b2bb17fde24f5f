use indexmap::IndexMap;
use tracing::debug;

use crate::api_types::{scalar_text, RawCompany, RawDataset, RawQuestion, RawQuestionFields};
use crate::models::{
    AssessmentType, Company, Difficulty, InterviewSection, Question, YEAR_NOT_AVAILABLE,
};

const OA_DEFAULT_TOPIC: &str = "General";
const OA_DEFAULT_TITLE: &str = "Question";

/// Human-readable labels for interview section keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicLabels {
    labels: IndexMap<String, String>,
}

impl Default for TopicLabels {
    fn default() -> Self {
        Self::from_pairs([
            ("dsa", "Data Structures & Algorithms"),
            ("os", "Operating System"),
            ("dbms", "Database Management System"),
            ("oops", "Object Oriented Programming"),
            ("system_design", "System Design"),
            ("behavioral", "HR / Behavioral"),
        ])
    }
}

impl TopicLabels {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let labels = pairs
            .into_iter()
            .map(|(k, v)| (k.into().to_lowercase(), v.into()))
            .collect();
        Self { labels }
    }

    /// Label for a section key; unknown keys fall back to the lower-cased key.
    pub fn label_for(&self, section_key: &str) -> String {
        let key = section_key.to_lowercase();
        match self.labels.get(&key) {
            Some(label) => label.clone(),
            None => key,
        }
    }
}

pub fn normalize_dataset(raw: RawDataset, labels: &TopicLabels) -> Vec<Company> {
    raw.into_companies()
        .into_iter()
        .map(|(name, c)| normalize_company(&name, &c, labels))
        .collect()
}

/// Resolves every raw entry of one company into canonical questions.
pub fn normalize_company(name: &str, raw: &RawCompany, labels: &TopicLabels) -> Company {
    let mut oa = IndexMap::with_capacity(raw.oa.len());
    let mut dropped = 0usize;
    for (year, entries) in &raw.oa {
        let mut bucket = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                RawQuestion::Object(fields) => bucket.push(oa_question(fields, year)),
                // OA only supports structured questions.
                RawQuestion::Text(_) | RawQuestion::Other(_) => dropped += 1,
            }
        }
        oa.insert(year.clone(), bucket);
    }

    let mut interview = Vec::with_capacity(raw.interview.len());
    for (section, entries) in &raw.interview {
        let key = section.to_lowercase();
        let label = labels.label_for(&key);
        let mut questions = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            match entry {
                RawQuestion::Text(text) => questions.push(interview_prompt(text, i, &label)),
                RawQuestion::Object(fields) => questions.push(interview_question(fields, i, &label)),
                RawQuestion::Other(_) => dropped += 1,
            }
        }
        interview.push(InterviewSection { key, label, questions });
    }

    debug!(
        "Company normalized - name={}, oa_years={}, interview_sections={}, dropped={}",
        name,
        oa.len(),
        interview.len(),
        dropped
    );

    Company {
        name: name.to_string(),
        role: scalar_text(raw.role.as_ref()).unwrap_or_default(),
        yoe: scalar_text(raw.yoe.as_ref()).unwrap_or_default(),
        oa,
        interview,
    }
}

fn oa_question(f: &RawQuestionFields, bucket_year: &str) -> Question {
    let difficulty = difficulty_of(f);
    let topic = scalar_text(f.topic.as_ref()).unwrap_or_else(|| OA_DEFAULT_TOPIC.to_string());
    Question {
        link: link_of(f),
        title: scalar_text(f.title.as_ref()).unwrap_or_else(|| OA_DEFAULT_TITLE.to_string()),
        description: scalar_text(f.description.as_ref())
            .unwrap_or_else(|| format!("{} ({})", topic, difficulty)),
        difficulty,
        year: scalar_text(f.year.as_ref()).unwrap_or_else(|| bucket_year.to_string()),
        topic,
        kind: AssessmentType::Oa,
        free_text: false,
    }
}

fn interview_question(f: &RawQuestionFields, index: usize, section_label: &str) -> Question {
    let difficulty = difficulty_of(f);
    let topic = scalar_text(f.topic.as_ref()).unwrap_or_else(|| section_label.to_string());
    Question {
        link: link_of(f),
        title: scalar_text(f.title.as_ref())
            .unwrap_or_else(|| format!("Interview Question {}", index + 1)),
        description: scalar_text(f.description.as_ref())
            .unwrap_or_else(|| format!("{} ({})", topic, difficulty)),
        difficulty,
        year: scalar_text(f.year.as_ref()).unwrap_or_else(|| YEAR_NOT_AVAILABLE.to_string()),
        topic,
        kind: AssessmentType::Interview,
        free_text: false,
    }
}

/// Bare-string interview entries, e.g. behavioural prompts.
fn interview_prompt(text: &str, index: usize, section_label: &str) -> Question {
    let text = text.trim();
    Question {
        link: text.to_string(),
        title: format!("Interview Question {}", index + 1),
        description: text.to_string(),
        difficulty: Difficulty::Easy,
        topic: section_label.to_string(),
        year: YEAR_NOT_AVAILABLE.to_string(),
        kind: AssessmentType::Interview,
        free_text: true,
    }
}

fn link_of(f: &RawQuestionFields) -> String {
    scalar_text(f.link.as_ref())
        .or_else(|| scalar_text(f.question.as_ref()))
        .unwrap_or_default()
}

fn difficulty_of(f: &RawQuestionFields) -> Difficulty {
    scalar_text(f.difficulty.as_ref())
        .map(|d| Difficulty::from_raw(&d))
        .unwrap_or(Difficulty::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::parse_dataset;

    fn company(json: &str) -> Company {
        let raw = parse_dataset(json).unwrap();
        normalize_dataset(raw, &TopicLabels::default()).remove(0)
    }

    #[test]
    fn string_interview_items_get_prompt_defaults() {
        let c = company(
            r#"{"Acme": {"interview": {"system_design": ["Design a URL shortener", "Design a cache"]}}}"#,
        );
        let qs = &c.interview[0].questions;
        for (i, q) in qs.iter().enumerate() {
            assert_eq!(q.title, format!("Interview Question {}", i + 1));
            assert_eq!(q.difficulty, Difficulty::Easy);
            assert_eq!(q.topic, "System Design");
            assert_eq!(q.year, "N/A");
            assert!(q.free_text);
        }
        assert_eq!(qs[1].link, "Design a cache");
    }

    #[test]
    fn interview_objects_default_each_field_independently() {
        let c = company(
            r#"{"Acme": {"interview": {"DSA": [{"link": "l1"}, {"link": "l2", "difficulty": "Hard", "topic": "graphs", "year": 2023}]}}}"#,
        );
        let s = &c.interview[0];
        assert_eq!(s.key, "dsa");
        let a = &s.questions[0];
        assert_eq!(a.difficulty, Difficulty::Unknown);
        assert_eq!(a.topic, "Data Structures & Algorithms");
        assert_eq!(a.year, "N/A");
        assert_eq!(a.title, "Interview Question 1");
        assert_eq!(a.description, "Data Structures & Algorithms (Unknown)");
        let b = &s.questions[1];
        assert_eq!(b.title, "Interview Question 2");
        assert_eq!(b.year, "2023");
        assert_eq!(b.description, "graphs (Hard)");
        assert!(!b.free_text);
    }

    #[test]
    fn oa_drops_non_object_entries_and_uses_bucket_year() {
        let c = company(
            r#"{"Acme": {"oa": {"2023": ["just text", 42, {"link": "q1", "difficulty": "Easy", "topic": "dsa"}, {}]}}}"#,
        );
        let bucket = &c.oa["2023"];
        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket[0].link, "q1");
        assert_eq!(bucket[0].year, "2023");
        assert_eq!(bucket[0].kind, AssessmentType::Oa);
        assert_eq!(bucket[1].topic, "General");
        assert_eq!(bucket[1].title, "Question");
        assert_eq!(bucket[1].description, "General (Unknown)");
        assert_eq!(bucket[1].link, "");
    }

    #[test]
    fn question_field_backs_up_missing_link() {
        let c = company(r#"{"Acme": {"interview": {"os": [{"question": "What is a page fault?"}]}}}"#);
        assert_eq!(c.interview[0].questions[0].link, "What is a page fault?");
    }

    #[test]
    fn injected_labels_replace_builtin_table() {
        let raw = parse_dataset(r#"{"Acme": {"interview": {"dsa": ["x"], "misc": ["y"]}}}"#).unwrap();
        let labels = TopicLabels::from_pairs([("dsa", "Algorithms")]);
        let c = normalize_dataset(raw, &labels).remove(0);
        assert_eq!(c.interview[0].questions[0].topic, "Algorithms");
        assert_eq!(c.interview[1].questions[0].topic, "misc");
    }

    #[test]
    fn null_branch_leaves_the_other_intact() {
        let c = company(r#"{"Acme": {"oa": null, "interview": {"dsa": [{"link": "i1"}]}}}"#);
        assert!(c.oa.is_empty());
        assert_eq!(c.interview[0].questions[0].link, "i1");
    }

    #[test]
    fn company_facets_default_to_empty() {
        let c = company(r#"{"Acme": {"yoe": 2}}"#);
        assert_eq!(c.role, "");
        assert_eq!(c.yoe, "2");
        assert!(c.oa.is_empty() && c.interview.is_empty());
    }
}
