//! Score combination: merges similarity and experience into one score per skill.
//!
//! Per skill `i`:
//! 1. `adjusted = max(tally[i], overall_found / skill_count)`
//! 2. `experience_match = min(adjusted / required[i], 1.0)`, 1.0 when nothing is required
//! 3. `final = (similarity[i] + experience_match) / 2`
//!
//! Overall: `min(overall_found / overall_required, 1.0)`, 1.0 when nothing is required.

use crate::models::analysis::{ExperienceTally, OverallMatch, SkillScore, SkillRequirement};

/// Combines the analyzer outputs. Output order follows `requirements`.
///
/// A missing or non-finite input degrades that skill's score to 0 without touching the others.
pub fn combine(
    requirements: &[SkillRequirement],
    similarity_scores: &[f64],
    tally: &ExperienceTally,
    overall_required_years: u32,
) -> (Vec<SkillScore>, OverallMatch) {
    let overall_found = finite_or_zero(tally.overall_years).max(0.0);
    let floor = if requirements.is_empty() {
        0.0
    } else {
        overall_found / requirements.len() as f64
    };

    let scores = requirements
        .iter()
        .enumerate()
        .map(|(i, req)| {
            let similarity = similarity_scores
                .get(i)
                .copied()
                .map(finite_or_zero)
                .unwrap_or(0.0)
                .clamp(0.0, 1.0);
            let raw_experience = tally
                .per_skill
                .get(i)
                .filter(|e| e.skill == req.skill)
                .map(|e| e.years)
                .unwrap_or_else(|| tally.years_for(&req.skill));
            let raw_experience = finite_or_zero(raw_experience).max(0.0);

            let adjusted_experience = raw_experience.max(floor);
            let experience_match = capped_ratio(adjusted_experience, req.required_years);
            let final_score = ((similarity + experience_match) / 2.0).clamp(0.0, 1.0);

            SkillScore {
                skill: req.skill.clone(),
                similarity,
                raw_experience,
                adjusted_experience,
                required_years: req.required_years,
                experience_match,
                final_score,
            }
        })
        .collect();

    let overall = OverallMatch {
        years_found: overall_found,
        years_required: overall_required_years,
        match_ratio: capped_ratio(overall_found, overall_required_years),
    };

    (scores, overall)
}

/// `min(found / required, 1.0)`. Zero required is fully satisfied by any non-negative amount.
pub fn capped_ratio(found: f64, required: u32) -> f64 {
    if !found.is_finite() || found < 0.0 {
        return 0.0;
    }
    if required == 0 {
        return 1.0;
    }
    (found / required as f64).min(1.0)
}

/// Non-finite becomes 0, and `-0.0` becomes `0.0` so it never renders as "-0.00".
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value + 0.0
    } else {
        0.0
    }
}
