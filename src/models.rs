use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const YEAR_NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Unknown,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Unknown => "Unknown",
        }
    }

    /// Lenient mapping used by the normalizer: anything unrecognised is `Unknown`.
    pub fn from_raw(s: &str) -> Self {
        s.parse().unwrap_or(Difficulty::Unknown)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "unknown" => Ok(Difficulty::Unknown),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentType {
    #[serde(rename = "OA")]
    Oa,
    Interview,
}

impl AssessmentType {
    pub fn as_str(self) -> &'static str {
        match self {
            AssessmentType::Oa => "OA",
            AssessmentType::Interview => "Interview",
        }
    }
}

impl fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssessmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oa" => Ok(AssessmentType::Oa),
            "interview" => Ok(AssessmentType::Interview),
            other => Err(format!("unknown assessment type '{}'", other)),
        }
    }
}

/// Canonical question record. Every field is populated at normalization time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub link: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub topic: String,
    pub year: String,
    #[serde(rename = "type")]
    pub kind: AssessmentType,
    /// Free-text prompts carry no year or difficulty dimension.
    #[serde(skip)]
    pub free_text: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewSection {
    pub key: String, // lower-cased section key, e.g. "system_design"
    pub label: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub role: String,
    pub yoe: String,
    pub oa: IndexMap<String, Vec<Question>>, // year -> questions, source order
    pub interview: Vec<InterviewSection>,
}

/// One user interaction's worth of filter state. `None` leaves a facet unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub company_query: String,
    pub role: Option<String>,
    pub yoe: Option<String>,
    pub assessment_type: Option<AssessmentType>,
    pub topic: Option<String>,
    pub year: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl FilterCriteria {
    pub fn search(query: impl Into<String>) -> Self {
        Self { company_query: query.into(), ..Self::default() }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = facet(role);
        self
    }

    pub fn with_yoe(mut self, yoe: impl Into<String>) -> Self {
        self.yoe = facet(yoe);
        self
    }

    pub fn with_assessment_type(mut self, kind: AssessmentType) -> Self {
        self.assessment_type = Some(kind);
        self
    }

    /// Section keys are stored lower-cased, so the facet is too.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = facet(topic.into().to_lowercase());
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = facet(year);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }
}

/// Empty string means "unset".
pub fn facet(value: impl Into<String>) -> Option<String> {
    let v = value.into();
    if v.is_empty() { None } else { Some(v) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicShare {
    pub topic: String,
    pub pct: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatedQuestion {
    pub link: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub topic_counts: IndexMap<String, usize>, // first-seen order
    pub topic_percentages: Vec<TopicShare>,
    pub repeated_questions: Vec<RepeatedQuestion>,
    pub year_histogram: BTreeMap<String, usize>, // Interview results only
}
