//! Axum route handlers for the Analysis API.
//!
//! One request = one analysis run. The multipart form carries:
//! - `resume`: the document (`.pdf` or `.docx`, chosen by file name)
//! - `overall_experience`: required overall years
//! - `skills`: comma-separated skill names
//! - `experience`: comma-separated required years, aligned with `skills`

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use tracing::{debug, info};

use crate::analysis::pipeline::analyze_document;
use crate::analysis::requirements::parse_requirements;
use crate::errors::AppError;
use crate::extraction::DocumentFormat;
use crate::models::analysis::{AnalysisReport, DocumentSummary};
use crate::report::{build_report, render_text_report};
use crate::state::AppState;

#[derive(Debug, Default)]
struct UploadForm {
    resume: Option<(String, Bytes)>,
    overall_experience: Option<String>,
    skills: Option<String>,
    experience: Option<String>,
}

/// POST /api/v1/analyze
///
/// Returns the full report as JSON.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let report = run_analysis(&state, multipart).await?;
    Ok(Json(report))
}

/// POST /api/v1/analyze/report
///
/// Same input as `/api/v1/analyze`; returns the plain-text rendering with the bar chart.
pub async fn handle_analyze_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<String, AppError> {
    let report = run_analysis(&state, multipart).await?;
    Ok(render_text_report(&report))
}

async fn run_analysis(state: &AppState, multipart: Multipart) -> Result<AnalysisReport, AppError> {
    let form = read_form(multipart).await?;

    let (Some(skills), Some(experience), Some(overall)) =
        (&form.skills, &form.experience, &form.overall_experience)
    else {
        return Err(AppError::Validation(
            "Enter the required skills, experience levels, and overall job experience.".to_string(),
        ));
    };

    // Count mismatch aborts here, before any document work.
    let request = parse_requirements(skills, experience, overall)?;

    let (file_name, bytes) = form
        .resume
        .ok_or_else(|| AppError::Validation("Upload a resume to begin.".to_string()))?;
    let format = DocumentFormat::from_file_name(&file_name)?;

    info!(
        file_name = %file_name,
        bytes = bytes.len(),
        skills = request.requirements.len(),
        "Analyzing resume"
    );

    let stopwords = Arc::clone(&state.stopwords);
    let analysis = tokio::task::spawn_blocking(move || {
        analyze_document(&bytes, format, &request, &stopwords)
    })
    .await
    .map_err(|e| AppError::DocumentRead(format!("document processing aborted: {e}")))??;

    let document = DocumentSummary {
        file_name,
        format,
        characters: analysis.characters,
    };
    let report = build_report(document, analysis.outcome);

    info!(
        analysis_id = %report.analysis_id,
        overall_match = report.overall.match_ratio,
        "Analysis complete"
    );
    Ok(report)
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read resume upload: {e}")))?;
                form.resume = Some((file_name, data));
            }
            "overall_experience" | "skills" | "experience" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read field '{name}': {e}")))?;
                let slot = match name.as_str() {
                    "overall_experience" => &mut form.overall_experience,
                    "skills" => &mut form.skills,
                    _ => &mut form.experience,
                };
                *slot = Some(value).filter(|v| !v.trim().is_empty());
            }
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(form)
}
