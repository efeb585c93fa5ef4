//! Analysis pipeline: extraction → experience matching → similarity → combination.
//!
//! `analyze_text` is pure: the same text and request always give the same outcome.
//! `analyze_document` adds the extraction step and is CPU-bound; callers in async
//! context run it via `tokio::task::spawn_blocking`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::combiner::combine;
use crate::analysis::experience::tally_experience;
use crate::analysis::similarity::analyze_resume;
use crate::extraction::{extract_upload, DocumentFormat, ExtractionError};
use crate::models::analysis::{AnalysisRequest, OverallMatch, SkillScore};
use crate::nlp::StopwordFilter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub skills: Vec<SkillScore>,
    pub overall: OverallMatch,
}

/// Result of `analyze_document`: the outcome plus the size of the text it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAnalysis {
    pub characters: usize,
    pub outcome: AnalysisOutcome,
}

pub fn analyze_text(
    resume_text: &str,
    request: &AnalysisRequest,
    stopwords: &StopwordFilter,
) -> AnalysisOutcome {
    let skills = request.skills();

    let tally = tally_experience(resume_text, &skills);
    let similarity = analyze_resume(resume_text, &skills, stopwords);
    let (skills, overall) = combine(
        &request.requirements,
        &similarity,
        &tally,
        request.overall_required_years,
    );

    AnalysisOutcome { skills, overall }
}

pub fn analyze_document(
    bytes: &[u8],
    format: DocumentFormat,
    request: &AnalysisRequest,
    stopwords: &StopwordFilter,
) -> Result<DocumentAnalysis, ExtractionError> {
    let text = extract_upload(bytes, format)?;
    let characters = text.chars().count();
    info!(?format, characters, skills = request.requirements.len(), "Resume text extracted");

    Ok(DocumentAnalysis {
        characters,
        outcome: analyze_text(&text, request, stopwords),
    })
}
