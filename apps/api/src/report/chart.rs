use serde::{Deserialize, Serialize};

use crate::models::analysis::SkillScore;

/// Width of the bar area, in characters, for the text rendering.
pub const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
}

/// Horizontal bar chart of final scores. Bars are listed top to bottom in skill order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub x_label: String,
    pub x_min: f64,
    pub x_max: f64,
    pub bars: Vec<ChartBar>,
}

impl BarChart {
    pub fn from_scores(scores: &[SkillScore]) -> Self {
        Self {
            x_label: "Final Match Score".to_string(),
            x_min: 0.0,
            x_max: 1.0,
            bars: scores
                .iter()
                .map(|s| ChartBar {
                    label: s.skill.clone(),
                    value: s.final_score.clamp(0.0, 1.0),
                })
                .collect(),
        }
    }

    /// Renders the chart as fixed-width text, e.g.
    ///
    /// ```text
    /// python | ██████████████████████████░░░░░░░░░░░░░░ 0.65
    /// ```
    pub fn render_text(&self) -> String {
        let label_width = self
            .bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for bar in &self.bars {
            let filled = self.filled_cells(bar.value);
            out.push_str(&format!(
                "{:<label_width$} | {}{} {:.2}\n",
                bar.label,
                "█".repeat(filled),
                "░".repeat(BAR_WIDTH - filled),
                bar.value,
            ));
        }

        let axis_pad = " ".repeat(label_width + 3);
        out.push_str(&format!(
            "{axis_pad}{:<half$}{:^6}{:>half$}\n",
            format!("{:.1}", self.x_min),
            format!("{:.1}", (self.x_min + self.x_max) / 2.0),
            format!("{:.1}", self.x_max),
            half = (BAR_WIDTH - 6) / 2,
        ));
        out.push_str(&format!("{axis_pad}{}\n", self.x_label));
        out
    }

    fn filled_cells(&self, value: f64) -> usize {
        let span = self.x_max - self.x_min;
        if span <= 0.0 || !value.is_finite() {
            return 0;
        }
        let fraction = ((value - self.x_min) / span).clamp(0.0, 1.0);
        ((fraction * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(skill: &str, final_score: f64) -> SkillScore {
        SkillScore {
            skill: skill.to_string(),
            similarity: 0.0,
            raw_experience: 0.0,
            adjusted_experience: 0.0,
            required_years: 1,
            experience_match: 0.0,
            final_score,
        }
    }

    #[test]
    fn test_axis_is_fixed_to_unit_range() {
        let chart = BarChart::from_scores(&[score("python", 0.3)]);
        assert_eq!(chart.x_min, 0.0);
        assert_eq!(chart.x_max, 1.0);
    }

    #[test]
    fn test_bars_keep_skill_order() {
        let chart = BarChart::from_scores(&[score("rust", 0.2), score("go", 0.9)]);
        let labels: Vec<_> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["rust", "go"]);

        let text = chart.render_text();
        let rust_line = text.lines().position(|l| l.starts_with("rust")).unwrap();
        let go_line = text.lines().position(|l| l.starts_with("go")).unwrap();
        assert!(rust_line < go_line);
    }

    #[test]
    fn test_bar_length_scales_with_score() {
        let chart = BarChart::from_scores(&[score("full", 1.0), score("half", 0.5), score("none", 0.0)]);
        let text = chart.render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH / 2);
        assert_eq!(lines[2].matches('█').count(), 0);
        assert!(lines[1].ends_with("0.50"));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let chart = BarChart {
            x_label: String::new(),
            x_min: 0.0,
            x_max: 1.0,
            bars: vec![ChartBar {
                label: "x".to_string(),
                value: 3.0,
            }],
        };
        let text = chart.render_text();
        assert_eq!(text.lines().next().unwrap().matches('█').count(), BAR_WIDTH);
    }

    #[test]
    fn test_axis_labels_rendered() {
        let text = BarChart::from_scores(&[score("sql", 0.4)]).render_text();
        assert!(text.contains("0.0"));
        assert!(text.contains("1.0"));
        assert!(text.contains("Final Match Score"));
    }
}
