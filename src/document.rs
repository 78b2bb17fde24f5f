// src/document.rs
//! Printable report model and the seam to an external document renderer.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::export::Artifact;
use crate::models::Question;

pub const REPORT_FILE_NAME: &str = "questions_report.pdf";
pub const REPORT_CONTENT_TYPE: &str = "application/pdf";
pub const REPORT_TITLE: &str = "Interview / OA Questions";

#[derive(Debug, Error)]
pub enum ExportError {
    /// No renderer was supplied. Shown to the user as-is; nothing is written.
    #[error("Document renderer not available. Check that the PDF renderer is installed and try again.")]
    RendererUnavailable,
    #[error("document rendering failed: {0}")]
    Render(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub font_size: u8,
    pub bold: bool,
    pub margin: [u8; 4], // left, top, right, bottom
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocCell {
    Text { text: String },
    /// Styled reference: blue, underlined, clickable.
    Link { text: String, href: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocTable {
    pub header_rows: usize,
    pub widths: Vec<String>,
    pub body: Vec<Vec<DocCell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub title_style: TextStyle,
    pub table: DocTable,
}

/// External capability that turns a [`Document`] into printable bytes.
pub trait DocumentRenderer {
    fn render(&self, document: &Document) -> Result<Vec<u8>, ExportError>;
}

/// Builds the report: title block plus a four-column table with one header row.
pub fn build_document(questions: &[Question]) -> Document {
    let mut body: Vec<Vec<DocCell>> = Vec::with_capacity(questions.len() + 1);
    body.push(
        ["Link", "Type", "Topic", "Difficulty"]
            .iter()
            .map(|h| DocCell::Text { text: h.to_string() })
            .collect(),
    );
    for q in questions {
        body.push(vec![
            link_cell(&q.link),
            DocCell::Text { text: q.kind.to_string() },
            DocCell::Text { text: q.topic.clone() },
            DocCell::Text { text: q.difficulty.to_string() },
        ]);
    }

    Document {
        title: REPORT_TITLE.to_string(),
        title_style: TextStyle { font_size: 18, bold: true, margin: [0, 0, 0, 10] },
        table: DocTable { header_rows: 1, widths: vec!["*".into(); 4], body },
    }
}

fn link_cell(link: &str) -> DocCell {
    if is_absolute_reference(link) {
        DocCell::Link { text: link.to_string(), href: link.to_string() }
    } else {
        DocCell::Text { text: link.to_string() }
    }
}

/// Only web references become clickable.
pub fn is_absolute_reference(link: &str) -> bool {
    match Url::parse(link) {
        Ok(u) => matches!(u.scheme(), "http" | "https") && u.host_str().is_some(),
        Err(_) => false,
    }
}

/// Renders the report through `renderer`. Fails before doing any work when none is available.
pub fn export_document(
    questions: &[Question],
    renderer: Option<&dyn DocumentRenderer>,
) -> Result<Artifact, ExportError> {
    let renderer = renderer.ok_or(ExportError::RendererUnavailable)?;
    let document = build_document(questions);
    debug!("Rendering document - rows={}", document.table.body.len() - 1);

    let bytes = renderer.render(&document)?;
    info!("Document rendered - file={}, bytes={}", REPORT_FILE_NAME, bytes.len());
    Ok(Artifact {
        file_name: REPORT_FILE_NAME.into(),
        content_type: REPORT_CONTENT_TYPE.into(),
        bytes,
    })
}
