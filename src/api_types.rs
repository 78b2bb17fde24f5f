use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Dataset file as shipped: either `{ "Microsoft": {...} }` or `[ { "name": "Microsoft", ... } ]`.
/// Companies stay raw JSON until [`RawDataset::into_companies`] so one bad record cannot sink the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawDataset {
    Keyed(IndexMap<String, Value>),
    Listed(Vec<Value>),
}

impl RawDataset {
    pub fn len(&self) -> usize {
        match self {
            RawDataset::Keyed(m) => m.len(),
            RawDataset::Listed(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens both layouts into `(name, company)` pairs in source order.
    /// Entries that are not a company object are skipped with a warning.
    pub fn into_companies(self) -> Vec<(String, RawCompany)> {
        match self {
            RawDataset::Keyed(map) => map
                .into_iter()
                .filter_map(|(name, v)| decode_company(&name, v).map(|c| (name, c)))
                .collect(),
            RawDataset::Listed(list) => list
                .into_iter()
                .enumerate()
                .filter_map(|(i, v)| {
                    let fallback = format!("Company {}", i + 1);
                    let c = decode_company(&fallback, v)?;
                    let name = scalar_text(c.name.as_ref()).unwrap_or(fallback);
                    Some((name, c))
                })
                .collect(),
        }
    }
}

fn decode_company(name: &str, v: Value) -> Option<RawCompany> {
    match serde_json::from_value::<RawCompany>(v) {
        Ok(c) => Some(c),
        Err(e) => {
            warn!("Skipping malformed company - name={}, error={}", name, e);
            None
        }
    }
}

/// `null` reads the same as an absent key.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCompany {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub role: Option<Value>,
    #[serde(default)]
    pub yoe: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub oa: IndexMap<String, Vec<RawQuestion>>, // year -> entries
    #[serde(default, deserialize_with = "null_as_default")]
    pub interview: IndexMap<String, Vec<RawQuestion>>, // section -> entries
}

/// A question as it appears in the dataset: a bare prompt, a partial object, or junk.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "Value")]
pub enum RawQuestion {
    Text(String),
    Object(RawQuestionFields),
    Other(Value),
}

impl From<Value> for RawQuestion {
    fn from(v: Value) -> Self {
        match v {
            Value::String(s) => RawQuestion::Text(s),
            Value::Object(map) => {
                let fields = RawQuestionFields {
                    link: map.get("link").cloned(),
                    question: map.get("question").cloned(),
                    title: map.get("title").cloned(),
                    description: map.get("description").cloned(),
                    difficulty: map.get("difficulty").cloned(),
                    topic: map.get("topic").cloned(),
                    year: map.get("year").cloned(),
                };
                RawQuestion::Object(fields)
            }
            other => RawQuestion::Other(other),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RawQuestionFields {
    pub link: Option<Value>,
    pub question: Option<Value>,
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub difficulty: Option<Value>,
    pub topic: Option<Value>,
    pub year: Option<Value>,
}

/// Reads a loosely-typed scalar as text. Empty strings, nulls, and containers count as absent.
pub fn scalar_text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
