//! Experience pattern matching: finds "<skill> N years" style phrases in resume text.
//!
//! Recognised per-skill phrasings (case-insensitive):
//! - `<skill> <N> <unit>`, e.g. "Python 4 years"
//! - `<N> <unit> [of experience] [in|with|using] <skill>`, e.g. "2 years Rust",
//!   "5 years of experience in python"
//!
//! A unit token containing "year" counts as years; every other unit (`yrs`, `months`,
//! `mos`) counts as N/12 years. Skill phrases are escaped before being embedded, so
//! "c++" matches literally.
//!
//! A number that directly follows any requested skill belongs to that skill. The reverse
//! phrasing never claims it for the next skill in a "Python 3 years Java 2 years" list.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::models::analysis::{ExperienceTally, SkillExperience};

const UNIT_ALTERNATION: &str = "years|yrs|months|mos";

static TOTAL_EXPERIENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(\d+)\s*({UNIT_ALTERNATION})\s+of\s+experience"
    ))
    .expect("total experience pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Years,
    Months,
}

impl DurationUnit {
    pub fn from_token(token: &str) -> Self {
        let token = token.to_lowercase();
        if token.contains("year") {
            DurationUnit::Years
        } else {
            DurationUnit::Months
        }
    }

    pub fn to_years(self, amount: f64) -> f64 {
        match self {
            DurationUnit::Years => amount,
            DurationUnit::Months => amount / 12.0,
        }
    }
}

/// Sums the years mentioned next to each skill, in request order.
///
/// Skills that never match report 0. Empty skill names are skipped (reported as 0).
pub fn extract_experience(text: &str, skills: &[String]) -> Vec<SkillExperience> {
    let patterns: Vec<Option<SkillPatterns>> =
        skills.iter().map(|skill| SkillPatterns::compile(skill)).collect();

    let forward: Vec<BTreeMap<usize, f64>> = patterns
        .iter()
        .map(|p| {
            p.as_ref()
                .map(|p| durations(&p.forward, text))
                .unwrap_or_default()
        })
        .collect();
    let claimed: BTreeSet<usize> = forward.iter().flat_map(|d| d.keys().copied()).collect();

    skills
        .iter()
        .zip(patterns.iter().zip(forward))
        .map(|(skill, (patterns, mut found))| {
            if let Some(p) = patterns {
                for (start, years) in durations(&p.reverse, text) {
                    if !claimed.contains(&start) {
                        found.entry(start).or_insert(years);
                    }
                }
            }
            SkillExperience {
                skill: skill.clone(),
                years: non_negative(found.values().sum()),
            }
        })
        .collect()
}

/// Sums every "<N> <unit> of experience" phrase in the text.
pub fn extract_total_experience(text: &str) -> f64 {
    let total: f64 = TOTAL_EXPERIENCE_RE
        .captures_iter(text)
        .filter_map(|caps| duration_in_years(&caps))
        .sum();
    non_negative(total)
}

/// Builds the full tally for one resume.
pub fn tally_experience(text: &str, skills: &[String]) -> ExperienceTally {
    let tally = ExperienceTally {
        per_skill: extract_experience(text, skills),
        overall_years: extract_total_experience(text),
    };
    debug!(
        overall_years = tally.overall_years,
        skills = tally.per_skill.len(),
        "Experience tally computed"
    );
    tally
}

struct SkillPatterns {
    forward: Regex,
    reverse: Regex,
}

impl SkillPatterns {
    fn compile(skill: &str) -> Option<Self> {
        let skill = skill.trim();
        if skill.is_empty() {
            return None;
        }

        let escaped = regex::escape(skill);
        let compiled = Regex::new(&format!(r"(?i){escaped}\s*(\d+)\s*({UNIT_ALTERNATION})"))
            .and_then(|forward| {
                Regex::new(&format!(
                    r"(?i)(\d+)\s*({UNIT_ALTERNATION})\s+(?:of\s+experience\s+)?(?:(?:in|with|using)\s+)?{escaped}"
                ))
                .map(|reverse| Self { forward, reverse })
            });

        match compiled {
            Ok(patterns) => Some(patterns),
            Err(e) => {
                // Escaped input always compiles; this only trips on the regex size limit.
                warn!("Skipping experience scan for '{skill}': {e}");
                None
            }
        }
    }
}

/// Durations matched by `re`, keyed by the byte offset of their number.
fn durations(re: &Regex, text: &str) -> BTreeMap<usize, f64> {
    re.captures_iter(text)
        .filter_map(|caps| located_duration(&caps))
        .collect()
}

/// Group 1 is the amount, group 2 the unit token.
fn duration_in_years(caps: &Captures<'_>) -> Option<f64> {
    let amount: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = DurationUnit::from_token(caps.get(2)?.as_str());
    let years = unit.to_years(amount);
    years.is_finite().then_some(years)
}

fn located_duration(caps: &Captures<'_>) -> Option<(usize, f64)> {
    let start = caps.get(1)?.start();
    Some((start, duration_in_years(caps)?))
}

fn non_negative(years: f64) -> f64 {
    if years.is_finite() && years > 0.0 {
        years
    } else {
        0.0
    }
}
