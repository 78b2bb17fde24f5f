// src/export.rs
use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::Question;

pub const CSV_FILE_NAME: &str = "questions_export.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";
pub const MARKDOWN_FILE_NAME: &str = "questions.md";
pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown;charset=utf-8";

const COLUMNS: [&str; 4] = ["Link", "Type", "Topic", "Difficulty"];

/// A named downloadable file produced by one serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Writes the artifact into `out_dir` under its own file name.
pub fn write_artifact(out_dir: &Path, artifact: &Artifact) -> Result<PathBuf> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {:?}", out_dir))?;
    let path = out_dir.join(&artifact.file_name);
    fs::write(&path, &artifact.bytes).with_context(|| format!("write {:?}", path))?;
    debug!(
        "Artifact written - file={}, content_type={}, bytes={}",
        path.display(),
        artifact.content_type,
        artifact.bytes.len()
    );
    Ok(path)
}

/// The four exported fields, in column order.
fn project(q: &Question) -> [&str; 4] {
    [q.link.as_str(), q.kind.as_str(), q.topic.as_str(), q.difficulty.as_str()]
}

/* -------------------------------------------------------------------------- */
/* CSV                                                                        */
/* -------------------------------------------------------------------------- */

/// Every field is quoted; embedded quotes are doubled.
pub fn to_csv(questions: &[Question]) -> String {
    let mut lines = Vec::with_capacity(questions.len() + 1);
    lines.push(csv_row(&COLUMNS));
    for q in questions {
        lines.push(csv_row(&project(q)));
    }
    lines.join("\n")
}

fn csv_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|v| format!("\"{}\"", v.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn export_csv(questions: &[Question]) -> Artifact {
    Artifact {
        file_name: CSV_FILE_NAME.into(),
        content_type: CSV_CONTENT_TYPE.into(),
        bytes: to_csv(questions).into_bytes(),
    }
}

/* -------------------------------------------------------------------------- */
/* Markdown                                                                   */
/* -------------------------------------------------------------------------- */

pub fn to_markdown(questions: &[Question]) -> String {
    let mut md = String::new();
    md.push_str("| Link | Type | Topic | Difficulty |\n");
    md.push_str("|------|------|--------|------------|");
    for q in questions {
        let [link, kind, topic, difficulty] = project(q).map(md_cell);
        md.push_str(&format!("\n| {} | {} | {} | {} |", link, kind, topic, difficulty));
    }
    md
}

// Pipes and line breaks would split the row.
fn md_cell(v: &str) -> String {
    v.replace('|', "\\|").replace(['\r', '\n'], " ")
}

pub fn export_markdown(questions: &[Question]) -> Artifact {
    Artifact {
        file_name: MARKDOWN_FILE_NAME.into(),
        content_type: MARKDOWN_CONTENT_TYPE.into(),
        bytes: to_markdown(questions).into_bytes(),
    }
}

/* -------------------------------------------------------------------------- */
/* Tabular view                                                               */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Rendered as an actionable reference.
    Link(String),
    Text(String),
}

impl Cell {
    pub fn text(&self) -> &str {
        match self {
            Cell::Link(s) | Cell::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: [Cell; 4],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: [&'static str; 4],
    pub rows: Vec<TableRow>,
}

pub fn table_view(questions: &[Question]) -> TableView {
    let rows = questions
        .iter()
        .map(|q| {
            let [link, kind, topic, difficulty] = project(q);
            let link = if link.starts_with("http") {
                Cell::Link(link.to_string())
            } else {
                Cell::Text(link.to_string())
            };
            TableRow {
                cells: [
                    link,
                    Cell::Text(kind.to_string()),
                    Cell::Text(topic.to_string()),
                    Cell::Text(difficulty.to_string()),
                ],
            }
        })
        .collect();
    TableView { columns: COLUMNS, rows }
}

/// Plain-text rendering with padded columns for terminal display.
impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths = self.columns.map(|c| c.chars().count());
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(&row.cells) {
                *w = (*w).max(cell.text().chars().count());
            }
        }

        write_padded(f, &self.columns, &widths)?;
        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
        write_padded(f, &rule, &widths)?;
        for row in &self.rows {
            let cells: Vec<&str> = row.cells.iter().map(Cell::text).collect();
            write_padded(f, &cells, &widths)?;
        }
        Ok(())
    }
}

fn write_padded(f: &mut fmt::Formatter<'_>, cells: &[&str], widths: &[usize]) -> fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, &w)| format!("{:<w$}", c, w = w))
        .collect();
    writeln!(f, "{}", padded.join("  ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssessmentType, Difficulty};

    fn q(link: &str) -> Question {
        Question {
            link: link.into(),
            title: "Question".into(),
            description: "dsa (Easy)".into(),
            difficulty: Difficulty::Easy,
            topic: "dsa".into(),
            year: "2023".into(),
            kind: AssessmentType::Oa,
            free_text: false,
        }
    }

    /// Minimal RFC 4180 reader: quoted fields, doubled quotes, comma separators.
    fn parse_csv(text: &str) -> Vec<Vec<String>> {
        let mut rows = vec![];
        for line in text.split('\n') {
            let mut fields = vec![];
            let mut cur = String::new();
            let mut chars = line.chars().peekable();
            let mut quoted = false;
            while let Some(c) = chars.next() {
                match (c, quoted) {
                    ('"', true) if chars.peek() == Some(&'"') => {
                        cur.push('"');
                        chars.next();
                    }
                    ('"', _) => quoted = !quoted,
                    (',', false) => fields.push(std::mem::take(&mut cur)),
                    (c, _) => cur.push(c),
                }
            }
            fields.push(cur);
            rows.push(fields);
        }
        rows
    }

    #[test]
    fn csv_header_and_quoted_fields() {
        let csv = to_csv(&[q("a")]);
        assert_eq!(csv, "\"Link\",\"Type\",\"Topic\",\"Difficulty\"\n\"a\",\"OA\",\"dsa\",\"Easy\"");
    }

    #[test]
    fn csv_round_trip_recovers_fields() {
        let rows = parse_csv(&to_csv(&[q("a")]));
        assert_eq!(rows[1], vec!["a", "OA", "dsa", "Easy"]);
    }

    #[test]
    fn csv_doubles_embedded_quotes() {
        // Quotes are escaped so values containing them survive a round trip.
        let csv = to_csv(&[q(r#"say "hi", twice"#)]);
        assert!(csv.ends_with(r#""say ""hi"", twice","OA","dsa","Easy""#));
        assert_eq!(parse_csv(&csv)[1][0], r#"say "hi", twice"#);
    }

    #[test]
    fn csv_and_markdown_degrade_to_header_only() {
        assert_eq!(to_csv(&[]), "\"Link\",\"Type\",\"Topic\",\"Difficulty\"");
        assert_eq!(
            to_markdown(&[]),
            "| Link | Type | Topic | Difficulty |\n|------|------|--------|------------|"
        );
    }

    #[test]
    fn csv_artifact_metadata() {
        let a = export_csv(&[q("a")]);
        assert_eq!(a.file_name, "questions_export.csv");
        assert!(a.content_type.starts_with("text/csv"));
    }

    #[test]
    fn markdown_rows_follow_input_order() {
        let md = to_markdown(&[q("first"), q("")]);
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines[2], "| first | OA | dsa | Easy |");
        assert_eq!(lines[3], "|  | OA | dsa | Easy |");
    }

    #[test]
    fn markdown_escapes_pipes() {
        let md = to_markdown(&[q("a|b")]);
        assert!(md.ends_with("| a\\|b | OA | dsa | Easy |"));
    }

    #[test]
    fn table_view_links_only_http_prefixed() {
        let view = table_view(&[q("https://leetcode.com/problems/two-sum"), q("two-sum")]);
        assert_eq!(view.columns, ["Link", "Type", "Topic", "Difficulty"]);
        assert!(matches!(view.rows[0].cells[0], Cell::Link(_)));
        assert_eq!(view.rows[1].cells[0], Cell::Text("two-sum".into()));
        assert!(table_view(&[]).rows.is_empty());
    }

    #[test]
    fn table_view_display_pads_columns() {
        let text = table_view(&[q("abc")]).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Link  Type  Topic  Difficulty");
        assert_eq!(lines[2], "abc   OA    dsa    Easy");
    }
}
