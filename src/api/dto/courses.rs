/*
 * Responsibility
 * - Courses の request/response DTO
 * - response は audit timestamps を含めない
 */
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::repos::course_repo::CourseWithOwner;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    /// Owner override; defaults to the authenticated user when absent.
    pub user_id: Option<Uuid>,
}

impl CreateCourseRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("A title is required.".to_string());
        }
        if self.description.trim().is_empty() {
            errors.push("A description is required.".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    // Tri-state:
    // - None: field missing (do not update)
    // - Some(None): null (set NULL)
    // - Some(Some(v)): set value
    // Plain `Option<Option<T>>` folds an explicit null into the outer None,
    // so presence has to be captured by a custom deserializer.
    #[serde(deserialize_with = "double_option")]
    pub estimated_time: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub materials_needed: Option<Option<String>>,
}

/// Only runs when the field is present, so present-but-null becomes
/// `Some(None)` while a missing field stays `None` via the struct default.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateCourseRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            errors.push("A title is required.".to_string());
        }
        if let Some(description) = &self.description
            && description.trim().is_empty()
        {
            errors.push("A description is required.".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Owner summary embedded in course responses: public fields only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOwner {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: Uuid,
    pub user: CourseOwner,
}

impl From<CourseWithOwner> for CourseResponse {
    fn from(row: CourseWithOwner) -> Self {
        Self {
            id: row.course_id,
            title: row.title,
            description: row.description,
            estimated_time: row.estimated_time,
            materials_needed: row.materials_needed,
            user_id: row.user_id,
            user: CourseOwner {
                id: row.user_id,
                first_name: row.owner_first_name,
                last_name: row.owner_last_name,
                email_address: row.owner_email_address,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_title_and_description() {
        let errors = CreateCourseRequest::default().validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                "A title is required.".to_string(),
                "A description is required.".to_string(),
            ]
        );
    }

    #[test]
    fn update_allows_partial_body() {
        let req = UpdateCourseRequest {
            title: Some("New title".to_string()),
            ..UpdateCourseRequest::default()
        };
        assert!(req.validate().is_ok());
        assert!(UpdateCourseRequest::default().validate().is_ok());
    }

    #[test]
    fn update_distinguishes_null_from_missing_field() {
        let req: UpdateCourseRequest = serde_json::from_str(r#"{"estimatedTime": null}"#).unwrap();
        assert_eq!(req.estimated_time, Some(None));
        assert_eq!(req.materials_needed, None);

        let req: UpdateCourseRequest =
            serde_json::from_str(r#"{"estimatedTime": "3 hours"}"#).unwrap();
        assert_eq!(req.estimated_time, Some(Some("3 hours".to_string())));
    }

    #[test]
    fn update_rejects_blanked_required_field() {
        let req = UpdateCourseRequest {
            description: Some("".to_string()),
            ..UpdateCourseRequest::default()
        };
        assert!(req.validate().is_err());
    }
}
