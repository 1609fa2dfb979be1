//! Lightweight classroom identity taken from request headers.
//!
//! There are no accounts: a student identifies themselves by name, with an
//! optional email and class section. The name is what gets recorded as the
//! author or last editor of a practice.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use capkb_core::practice::validate_student_name;

use crate::error::AppError;
use crate::state::AppState;

pub const STUDENT_NAME_HEADER: &str = "x-student-name";
pub const STUDENT_EMAIL_HEADER: &str = "x-student-email";
pub const STUDENT_CLASS_HEADER: &str = "x-student-class";
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// The student making a request, from the `X-Student-*` headers.
///
/// Rejects with 401 when no name is given:
///
/// ```ignore
/// async fn my_handler(student: Student) -> AppResult<Json<()>> {
///     tracing::info!(student = %student.name, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Student {
    pub name: String,
    pub email: Option<String>,
    pub class_section: Option<String>,
}

impl Student {
    fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let name = header_str(headers, STUDENT_NAME_HEADER).unwrap_or_default();
        let name = validate_student_name(name)?;

        Ok(Student {
            name,
            email: header_str(headers, STUDENT_EMAIL_HEADER).map(String::from),
            class_section: header_str(headers, STUDENT_CLASS_HEADER).map(String::from),
        })
    }
}

impl FromRequestParts<AppState> for Student {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Student::from_headers(&parts.headers)
    }
}

/// Caller of a privileged operation: maybe a named student, maybe an admin.
#[derive(Debug, Clone)]
pub struct Requester {
    pub student: Option<Student>,
    /// `true` when `X-Admin-Key` matches the configured admin key.
    pub is_admin: bool,
}

impl Requester {
    /// Whether this caller may act on a record created by `owner`.
    pub fn may_manage(&self, owner: &str) -> bool {
        self.is_admin
            || self
                .student
                .as_ref()
                .is_some_and(|s| s.name == owner.trim())
    }
}

impl FromRequestParts<AppState> for Requester {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let student = Student::from_headers(&parts.headers).ok();
        let is_admin = match (&state.config.admin_key, header_str(&parts.headers, ADMIN_KEY_HEADER))
        {
            (Some(expected), Some(given)) => expected == given,
            _ => false,
        };

        Ok(Requester { student, is_admin })
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
