pub mod api_types;
pub mod document;
pub mod export;
pub mod filter;
pub mod insights;
pub mod load;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod render;
pub mod selection;

pub use crate::filter::filter_questions;
pub use crate::insights::aggregate;
pub use crate::models::{AggregateResult, Company, FilterCriteria, Question};
pub use crate::normalize::{normalize_company, normalize_dataset, TopicLabels};
