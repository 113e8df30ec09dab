//! Structured resume input as submitted by the form.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Every field is free text; absent fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeFormData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub location: String,
    pub website: String,
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub projects: String,
    pub certifications: String,
    pub resume_style: String,
    pub tone_style: String,
    pub language: String,
    pub additional_instructions: String,
}

impl ResumeFormData {
    /// Name, email and work experience must be present.
    pub fn validate(&self) -> Result<(), AppError> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("experience", &self.experience),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Missing required fields: name, email, and work experience are required (missing: {})",
                missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ResumeFormData {
        ResumeFormData {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            experience: "Company: Acme".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_form_is_valid() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_are_named() {
        let form = ResumeFormData {
            email: "  ".to_string(),
            experience: String::new(),
            ..complete()
        };
        match form.validate() {
            Err(AppError::Validation(msg)) => assert!(msg.ends_with("(missing: email, experience)"), "{msg}"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_deserializes_camel_case_with_defaults() {
        let form: ResumeFormData =
            serde_json::from_str(r#"{"name":"Jane","jobTitle":"Engineer","additionalInstructions":"Be brief"}"#)
                .unwrap();
        assert_eq!(form.job_title, "Engineer");
        assert_eq!(form.additional_instructions, "Be brief");
        assert!(form.email.is_empty());
    }
}
