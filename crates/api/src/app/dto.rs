//! Request bodies and presence checks.
//!
//! Bodies are decoded from raw bytes so that a malformed payload becomes a
//! 500 envelope rather than a framework rejection.

use axum::body::Bytes;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use taskboard_core::{NewProject, NewTask, ProjectId, TaskChanges};

use super::envelope::INVALID_INPUT;
use super::errors::ApiError;

/// Decodes a JSON body into `T`.
///
/// Arrays, strings, numbers and booleans carry no fields and decode as an
/// empty object, so they reach the presence checks. `null` does not.
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    let value = match serde_json::from_slice::<Value>(body)? {
        value @ (Value::Object(_) | Value::Null) => value,
        _ => Value::Object(Map::new()),
    };
    Ok(serde_json::from_value(value)?)
}

/// A present, non-empty string.
pub fn required(value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::Validation(INVALID_INPUT)),
    }
}

fn required_date(value: Option<DateTime<Utc>>) -> Result<DateTime<Utc>, ApiError> {
    value.ok_or(ApiError::Validation(INVALID_INPUT))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl ProjectBody {
    /// All four fields are mandatory for both create and replace.
    pub fn into_new_project(self) -> Result<NewProject, ApiError> {
        Ok(NewProject {
            name: required(self.name)?,
            description: required(self.description)?,
            start_date: required_date(self.start_date)?,
            end_date: required_date(self.end_date)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct MemberBody {
    pub name: Option<String>,
}

/// Task fields are never presence-checked; the store decides.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub piority: Option<String>,
    pub expect_term: Option<DateTime<Utc>>,
}

impl TaskBody {
    pub fn into_new_task(self, project_id: ProjectId) -> NewTask {
        NewTask {
            name: self.name,
            description: self.description,
            piority: self.piority,
            expect_term: self.expect_term,
            project_id,
        }
    }

    pub fn into_changes(self) -> TaskChanges {
        TaskChanges {
            name: self.name,
            description: self.description,
            piority: self.piority,
            expect_term: self.expect_term,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(json: &str) -> Bytes {
        Bytes::from(json.to_string())
    }

    #[test]
    fn complete_project_body_converts() {
        let body: ProjectBody = parse_body(&bytes(
            r#"{"name":"A","description":"B","startDate":"2024-01-01T00:00:00Z","endDate":"2024-02-01T00:00:00Z"}"#,
        ))
        .unwrap();
        let project = body.into_new_project().unwrap();
        assert_eq!(project.name, "A");
        assert_eq!(project.end_date.to_rfc3339(), "2024-02-01T00:00:00+00:00");
    }

    #[test]
    fn empty_or_null_fields_fail_presence() {
        for json in [
            r#"{"name":"","description":"B","startDate":"2024-01-01T00:00:00Z","endDate":"2024-01-01T00:00:00Z"}"#,
            r#"{"name":"A","description":null,"startDate":"2024-01-01T00:00:00Z","endDate":"2024-01-01T00:00:00Z"}"#,
            r#"{"name":"A","description":"B","startDate":"2024-01-01T00:00:00Z"}"#,
        ] {
            let body: ProjectBody = parse_body(&bytes(json)).unwrap();
            assert!(matches!(
                body.into_new_project(),
                Err(ApiError::Validation(INVALID_INPUT))
            ));
        }
    }

    #[test]
    fn malformed_json_is_a_body_error() {
        let err = parse_body::<MemberBody>(&bytes("{not json")).unwrap_err();
        assert!(matches!(err, ApiError::Body(_)));

        let err = parse_body::<MemberBody>(&Bytes::new()).unwrap_err();
        assert!(matches!(err, ApiError::Body(_)));
    }

    #[test]
    fn non_object_json_has_no_fields() {
        for json in ["[]", r#""x""#, "42", "true"] {
            let body: ProjectBody = parse_body(&bytes(json)).unwrap();
            assert!(matches!(
                body.into_new_project(),
                Err(ApiError::Validation(INVALID_INPUT))
            ));
        }

        let body: TaskBody = parse_body(&bytes("[1, 2]")).unwrap();
        assert_eq!(body.into_changes(), TaskChanges::default());
    }

    #[test]
    fn null_body_is_a_body_error() {
        let err = parse_body::<CommentBody>(&bytes("null")).unwrap_err();
        assert!(matches!(err, ApiError::Body(_)));
    }

    #[test]
    fn task_body_passes_gaps_through() {
        let body: TaskBody = parse_body(&bytes(r#"{"piority":"high"}"#)).unwrap();
        let changes = body.into_changes();
        assert_eq!(changes.piority.as_deref(), Some("high"));
        assert!(changes.name.is_none());
        assert!(changes.expect_term.is_none());
    }
}
