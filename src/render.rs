// src/render.rs
use crate::insights::chart_series;
use crate::models::{AggregateResult, AssessmentType};

/// Insights panel as Markdown: summary line, topic breakdown, year trend, hot questions.
pub fn render_insights_markdown(
    summary: &str,
    result: &AggregateResult,
    kind: Option<AssessmentType>,
) -> String {
    let mut md = String::new();
    md.push_str("# Company Insights\n\n");
    md.push_str(&format!("{}\n\n", summary.trim()));

    let slices = chart_series(result);
    if !slices.is_empty() {
        md.push_str("## Questions by Topic\n");
        for s in &slices {
            md.push_str(&format!("- {}: {}\n", s.label, s.count));
        }
        md.push('\n');
    }

    if kind == Some(AssessmentType::Interview) && !result.year_histogram.is_empty() {
        md.push_str("## Year-wise Frequency\n");
        for (year, n) in &result.year_histogram {
            md.push_str(&format!("- {}: {} question(s)\n", year, n));
        }
        md.push('\n');
    }

    if !result.repeated_questions.is_empty() {
        md.push_str("## Most Repeated Questions\n");
        for r in &result.repeated_questions {
            md.push_str(&format!("- {} – {} times\n", r.link, r.count));
        }
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::aggregate;
    use crate::models::{Difficulty, Question};

    fn q(link: &str, topic: &str, year: &str) -> Question {
        Question {
            link: link.into(),
            title: "t".into(),
            description: "d".into(),
            difficulty: Difficulty::Medium,
            topic: topic.into(),
            year: year.into(),
            kind: AssessmentType::Interview,
            free_text: false,
        }
    }

    #[test]
    fn interview_panel_has_all_sections() {
        let qs = [q("a", "dsa", "2023"), q("a", "os", "2022"), q("b", "dsa", "N/A")];
        let kind = Some(AssessmentType::Interview);
        let md = render_insights_markdown("Acme Interview: 67% dsa, 33% os", &aggregate(&qs, kind), kind);
        assert!(md.starts_with("# Company Insights\n\nAcme Interview: 67% dsa, 33% os\n"));
        assert!(md.contains("## Questions by Topic\n- dsa: 2\n- os: 1\n"));
        assert!(md.contains("## Year-wise Frequency\n- 2022: 1 question(s)\n- 2023: 1 question(s)\n"));
        assert!(md.contains("## Most Repeated Questions\n- a – 2 times\n"));
    }

    #[test]
    fn empty_result_renders_summary_only() {
        let md = render_insights_markdown("Acme  OA: ", &AggregateResult::default(), None);
        assert_eq!(md, "# Company Insights\n\nAcme  OA:\n\n");
    }
}
