//! Parses the three free-text form fields into a validated `AnalysisRequest`.

use crate::errors::AppError;
use crate::models::analysis::{AnalysisRequest, SkillRequirement};

/// Splits `skills_input` and `experience_input` on commas and pairs them positionally.
///
/// Skill names are trimmed and lowercased; blank entries in either list are dropped
/// before counting. Fails with `InputMismatch` when the counts differ.
pub fn parse_requirements(
    skills_input: &str,
    experience_input: &str,
    overall_input: &str,
) -> Result<AnalysisRequest, AppError> {
    let skills: Vec<String> = split_list(skills_input)
        .map(|s| s.to_lowercase())
        .collect();

    let experience = split_list(experience_input)
        .map(|value| parse_years(value, "experience per skill"))
        .collect::<Result<Vec<u32>, AppError>>()?;

    let overall_required_years = parse_years(overall_input.trim(), "overall experience")?;

    if skills.len() != experience.len() {
        return Err(AppError::InputMismatch {
            skills: skills.len(),
            experience: experience.len(),
        });
    }

    if skills.is_empty() {
        return Err(AppError::Validation(
            "Enter at least one required skill".to_string(),
        ));
    }

    let requirements = skills
        .into_iter()
        .zip(experience)
        .map(|(skill, required_years)| SkillRequirement {
            skill,
            required_years,
        })
        .collect();

    Ok(AnalysisRequest {
        overall_required_years,
        requirements,
    })
}

fn split_list(input: &str) -> impl Iterator<Item = &str> {
    input.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_years(value: &str, field: &str) -> Result<u32, AppError> {
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} is required (in years)")));
    }
    value.parse::<u32>().map_err(|_| {
        AppError::Validation(format!(
            "{field} must be a whole number of years, got '{value}'"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_years(request: &AnalysisRequest) -> Vec<u32> {
        request.requirements.iter().map(|r| r.required_years).collect()
    }

    #[test]
    fn test_parses_aligned_lists() {
        let request =
            parse_requirements("Python, Machine Learning, data analysis", "3,2, 2", " 5 ").unwrap();
        assert_eq!(request.overall_required_years, 5);
        assert_eq!(
            request.skills(),
            vec!["python", "machine learning", "data analysis"]
        );
        assert_eq!(required_years(&request), vec![3, 2, 2]);
    }

    #[test]
    fn test_blank_entries_are_skipped() {
        let request = parse_requirements("python,, ,rust,", "1,,2", "3").unwrap();
        assert_eq!(request.skills(), vec!["python", "rust"]);
        assert_eq!(required_years(&request), vec![1, 2]);
    }

    #[test]
    fn test_count_mismatch() {
        let err = parse_requirements("python, rust, go", "3,2", "5").unwrap_err();
        assert!(matches!(
            err,
            AppError::InputMismatch {
                skills: 3,
                experience: 2
            }
        ));
    }

    #[test]
    fn test_non_integer_experience_is_rejected() {
        assert!(matches!(
            parse_requirements("python", "two", "5"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_requirements("python", "-1", "5"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_requirements("python", "1.5", "5"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_overall_is_required() {
        assert!(matches!(
            parse_requirements("python", "1", "  "),
            Err(AppError::Validation(ref m)) if m.contains("overall")
        ));
    }

    #[test]
    fn test_no_skills_is_rejected() {
        assert!(matches!(
            parse_requirements(" , ", "", "5"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_years_allowed() {
        let request = parse_requirements("python", "0", "0").unwrap();
        assert_eq!(required_years(&request), vec![0]);
        assert_eq!(request.overall_required_years, 0);
    }
}
