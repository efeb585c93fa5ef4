//! Report assembly and plain-text rendering for one analysis run.

pub mod chart;

use chrono::Utc;
use uuid::Uuid;

use crate::analysis::pipeline::AnalysisOutcome;
use crate::models::analysis::{AnalysisReport, DocumentSummary};
use chart::BarChart;

pub fn build_report(document: DocumentSummary, outcome: AnalysisOutcome) -> AnalysisReport {
    let chart = BarChart::from_scores(&outcome.skills);
    AnalysisReport {
        analysis_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        document,
        skills: outcome.skills,
        overall: outcome.overall,
        chart,
    }
}

/// Per-skill lines, the overall block and the bar chart. Numbers use two decimals.
pub fn render_text_report(report: &AnalysisReport) -> String {
    let mut out = String::from("Match Scores and Experience Analysis\n");

    for s in &report.skills {
        out.push_str(&format!(
            "{}: {:.2} (Skill Match) | {:.2} years (Adjusted Experience) | {} years required | Final Score: {:.2}\n",
            capitalize(&s.skill),
            s.similarity,
            s.adjusted_experience,
            s.required_years,
            s.final_score,
        ));
    }

    out.push_str("\nOverall Experience Match\n");
    out.push_str(&format!(
        "Total Experience Found: {:.2} years\n",
        report.overall.years_found
    ));
    out.push_str(&format!(
        "Required Experience: {} years\n",
        report.overall.years_required
    ));
    out.push_str(&format!(
        "Match Percentage: {:.2}\n",
        report.overall.match_ratio
    ));

    out.push_str("\nSkill & Experience Match Overview\n");
    out.push_str(&report.chart.render_text());
    out
}

fn capitalize(skill: &str) -> String {
    let mut chars = skill.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pipeline::analyze_text;
    use crate::analysis::requirements::parse_requirements;
    use crate::extraction::DocumentFormat;
    use crate::nlp::StopwordFilter;
    use crate::models::analysis::{OverallMatch, SkillScore};

    fn outcome() -> AnalysisOutcome {
        AnalysisOutcome {
            skills: vec![SkillScore {
                skill: "machine learning".to_string(),
                similarity: 0.456,
                raw_experience: 1.0,
                adjusted_experience: 2.5,
                required_years: 2,
                experience_match: 1.0,
                final_score: 0.728,
            }],
            overall: OverallMatch {
                years_found: 5.0,
                years_required: 6,
                match_ratio: 5.0 / 6.0,
            },
        }
    }

    fn summary() -> DocumentSummary {
        DocumentSummary {
            file_name: "cv.docx".to_string(),
            format: DocumentFormat::Docx,
            characters: 120,
        }
    }

    #[test]
    fn test_report_carries_chart_for_every_skill() {
        let report = build_report(summary(), outcome());
        assert_eq!(report.chart.bars.len(), report.skills.len());
        assert_eq!(report.chart.bars[0].value, 0.728);
    }

    #[test]
    fn test_text_rendering_uses_two_decimals() {
        let text = render_text_report(&build_report(summary(), outcome()));
        assert!(text.contains(
            "Machine learning: 0.46 (Skill Match) | 2.50 years (Adjusted Experience) | 2 years required | Final Score: 0.73"
        ));
        assert!(text.contains("Total Experience Found: 5.00 years"));
        assert!(text.contains("Required Experience: 6 years"));
        assert!(text.contains("Match Percentage: 0.83"));
        assert!(text.contains("Final Match Score"));
    }

    #[test]
    fn test_report_serializes_format_lowercase() {
        let report = build_report(summary(), outcome());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["document"]["format"], "docx");
        assert_eq!(json["chart"]["x_max"], 1.0);
    }

    #[test]
    fn test_unmatched_skill_renders_unsigned_zero() {
        let request = parse_requirements("java", "2", "1").unwrap();
        let outcome = analyze_text("Python developer", &request, &StopwordFilter::new("en"));
        assert!(outcome.skills[0].similarity.is_sign_positive());

        let report = build_report(summary(), outcome);
        let text = render_text_report(&report);
        assert!(text.contains("Java: 0.00 (Skill Match)"), "{text}");
        assert!(!text.contains("-0.00"), "{text}");
        assert!(!serde_json::to_string(&report).unwrap().contains("-0.0"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("python"), "Python");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("éclair"), "Éclair");
    }
}
