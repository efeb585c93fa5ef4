use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extraction::DocumentFormat;
use crate::report::chart::BarChart;

/// One required skill and the years of experience asked for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill: String,
    pub required_years: u32,
}

/// Validated user input for one analysis run. Never empty, skills lowercased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub overall_required_years: u32,
    pub requirements: Vec<SkillRequirement>,
}

impl AnalysisRequest {
    pub fn skills(&self) -> Vec<String> {
        self.requirements.iter().map(|r| r.skill.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillExperience {
    pub skill: String,
    pub years: f64,
}

/// Years of experience found in the resume text, per skill (request order) and overall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceTally {
    pub per_skill: Vec<SkillExperience>,
    pub overall_years: f64,
}

impl ExperienceTally {
    pub fn years_for(&self, skill: &str) -> f64 {
        self.per_skill
            .iter()
            .find(|e| e.skill == skill)
            .map(|e| e.years)
            .unwrap_or(0.0)
    }
}

/// Final per-skill score. All ratios are in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillScore {
    pub skill: String,
    pub similarity: f64,
    /// Years matched directly against this skill, before the overall floor.
    pub raw_experience: f64,
    pub adjusted_experience: f64,
    pub required_years: u32,
    pub experience_match: f64,
    pub final_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallMatch {
    pub years_found: f64,
    pub years_required: u32,
    /// years_found / years_required, capped at 1.0
    pub match_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub file_name: String,
    pub format: DocumentFormat,
    pub characters: usize,
}

/// Everything the presentation surface receives for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub document: DocumentSummary,
    pub skills: Vec<SkillScore>,
    pub overall: OverallMatch,
    pub chart: BarChart,
}
