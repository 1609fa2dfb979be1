//! Practice records and the editable body guarded by conditional writes.

use serde::{Deserialize, Serialize};

use crate::category::{default_category, validate_category};
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// The editable body of a practice.
///
/// Category, practice text and rationale are edited together in one form, so
/// they are snapshotted and compared together: a concurrent change to any of
/// them is a conflict. Every field is required when deserializing, so a
/// partial submission cannot overwrite a field with a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub category: String,
    pub practice: String,
    pub rationale: String,
}

impl Content {
    pub fn new(
        category: impl Into<String>,
        practice: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            practice: practice.into(),
            rationale: rationale.into(),
        }
    }

    /// Copy of this content with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            category: self.category.trim().to_string(),
            practice: self.practice.trim().to_string(),
            rationale: self.rationale.trim().to_string(),
        }
    }

    /// Equality after trimming both sides.
    pub fn same_as(&self, other: &Content) -> bool {
        self.trimmed() == other.trimmed()
    }
}

/// A stored best practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Practice {
    pub id: DbId,
    #[serde(flatten)]
    pub content: Content,
    /// Student who created the entry. Never changes.
    pub added_by: String,
    pub added_on: Timestamp,
    /// Student behind the last successful edit, `None` until the first edit.
    pub last_edited_by: Option<String>,
    pub last_edited_on: Option<Timestamp>,
    /// Number of successful edits ever applied.
    pub edit_count: i64,
}

impl Practice {
    /// Last editor, ignoring blank names left behind by older data.
    pub fn editor(&self) -> Option<&str> {
        self.last_edited_by
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// DTO for creating a new practice.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPractice {
    #[serde(default = "default_category")]
    pub category: String,
    pub practice: String,
    pub rationale: String,
}

/// Validate a new practice, returning its trimmed content.
///
/// New entries need both a practice and a rationale so classmates understand
/// the reasoning.
pub fn validate_new_practice(input: &NewPractice) -> Result<Content, CoreError> {
    let content = Content::new(&input.category, &input.practice, &input.rationale).trimmed();
    validate_category(&content.category)?;
    if content.practice.is_empty() {
        return Err(CoreError::Validation(
            "Please fill in the Best Practice field.".into(),
        ));
    }
    if content.rationale.is_empty() {
        return Err(CoreError::Validation(
            "Please provide a rationale so classmates understand the reasoning.".into(),
        ));
    }
    Ok(content)
}

/// Validate edited content, returning it trimmed.
///
/// Only the practice text is mandatory on edit.
pub fn validate_edit(input: &Content) -> Result<Content, CoreError> {
    let content = input.trimmed();
    validate_category(&content.category)?;
    if content.practice.is_empty() {
        return Err(CoreError::Validation(
            "The practice field cannot be empty.".into(),
        ));
    }
    Ok(content)
}

/// Validate and normalise a student name used as an identity.
pub fn validate_student_name(name: &str) -> Result<String, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Unauthorized(
            "Enter your name to add or edit entries.".into(),
        ));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_practice(practice: &str, rationale: &str) -> NewPractice {
        NewPractice {
            category: "Cost of Debt".into(),
            practice: practice.into(),
            rationale: rationale.into(),
        }
    }

    #[test]
    fn test_new_practice_is_trimmed() {
        let content =
            validate_new_practice(&new_practice("  Use yield to maturity ", "\tNot coupon\n"))
                .unwrap();
        assert_eq!(content.practice, "Use yield to maturity");
        assert_eq!(content.rationale, "Not coupon");
        assert_eq!(content.category, "Cost of Debt");
    }

    #[test]
    fn test_new_practice_requires_practice_text() {
        let err = validate_new_practice(&new_practice("   ", "because")).unwrap_err();
        assert!(err.to_string().contains("Best Practice"));
    }

    #[test]
    fn test_new_practice_requires_rationale() {
        let err = validate_new_practice(&new_practice("Use YTM", "  ")).unwrap_err();
        assert!(err.to_string().contains("rationale"));
    }

    #[test]
    fn test_new_practice_rejects_unknown_category() {
        let mut input = new_practice("Use YTM", "because");
        input.category = "Dividends".into();
        assert!(validate_new_practice(&input).is_err());
    }

    #[test]
    fn test_edit_allows_empty_rationale() {
        let content = validate_edit(&Content::new("Cost of Equity", "Use CAPM", " ")).unwrap();
        assert_eq!(content.rationale, "");
    }

    #[test]
    fn test_edit_rejects_whitespace_practice() {
        assert!(validate_edit(&Content::new("Cost of Equity", " \n\t ", "x")).is_err());
    }

    #[test]
    fn test_same_as_ignores_surrounding_whitespace_only() {
        let a = Content::new("Cost of Debt", "Use YTM", "why");
        assert!(a.same_as(&Content::new(" Cost of Debt", "Use YTM  ", "why\n")));
        assert!(!a.same_as(&Content::new("Cost of Debt", "Use  YTM", "why")));
        assert!(!a.same_as(&Content::new("Cost of Debt", "use YTM", "why")));
    }

    #[test]
    fn test_student_name_is_trimmed_and_required() {
        assert_eq!(validate_student_name("  Jane Smith ").unwrap(), "Jane Smith");
        assert!(validate_student_name("   ").is_err());
    }

    #[test]
    fn test_content_requires_every_field() {
        assert!(serde_json::from_str::<Content>(r#"{"practice":"Use spot rates"}"#).is_err());
        assert!(serde_json::from_str::<Content>(
            r#"{"category":"Cost of Debt","practice":"Use spot rates"}"#
        )
        .is_err());

        let content: Content = serde_json::from_str(
            r#"{"category":"Cost of Debt","practice":"Use spot rates","rationale":""}"#,
        )
        .unwrap();
        assert_eq!(content.rationale, "");
    }
}
