/*
 * Responsibility
 * - /courses 系 CRUD handler
 * - 読み取りは公開、作成・更新・削除は Basic 認証必須
 * - 更新・削除は CourseStore の owner チェック結果を HTTP に写すだけ
 */
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    api::dto::courses::{CourseResponse, CreateCourseRequest, UpdateCourseRequest},
    api::extractors::CurrentUserExtractor,
    error::AppError,
    repos::course_repo::{CourseChanges, CourseMutation, NewCourse},
    state::AppState,
};

const COURSE_NOT_FOUND: &str = "This course does not exist.";

/// GET /api/courses. All courses, each with its owner embedded.
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, AppError> {
    let rows = state.courses.list().await?;
    let res = rows.into_iter().map(CourseResponse::from).collect();

    Ok(Json(res))
}

/// GET /api/courses/{course_id}
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<Json<CourseResponse>, AppError> {
    let row = state
        .courses
        .get(course_id)
        .await?
        .ok_or(AppError::not_found(COURSE_NOT_FOUND))?;

    Ok(Json(row.into()))
}

/// POST /api/courses. 201 with `Location: /api/courses/{id}`, no body.
pub async fn create_course(
    State(state): State<AppState>,
    CurrentUserExtractor(user): CurrentUserExtractor,
    Json(req): Json<CreateCourseRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate().map_err(AppError::Validation)?;

    let owner_id = req.user_id.unwrap_or(user.id);
    let course_id = state
        .courses
        .create(NewCourse {
            title: req.title,
            description: req.description,
            estimated_time: req.estimated_time,
            materials_needed: req.materials_needed,
            user_id: owner_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/courses/{course_id}"))],
    ))
}

/// PUT /api/courses/{course_id}. Owner only, 204 on success.
pub async fn update_course(
    State(state): State<AppState>,
    CurrentUserExtractor(user): CurrentUserExtractor,
    Path(course_id): Path<i64>,
    Json(req): Json<UpdateCourseRequest>,
) -> Result<StatusCode, AppError> {
    req.validate().map_err(AppError::Validation)?;

    let changes = CourseChanges {
        title: req.title,
        description: req.description,
        estimated_time: req.estimated_time,
        materials_needed: req.materials_needed,
    };

    match state.courses.update(course_id, user.id, changes).await? {
        CourseMutation::Done => Ok(StatusCode::NO_CONTENT),
        CourseMutation::Missing => Err(AppError::not_found(COURSE_NOT_FOUND)),
        CourseMutation::NotOwner => Err(AppError::Forbidden),
    }
}

/// DELETE /api/courses/{course_id}. Owner only, 204 on success.
pub async fn delete_course(
    State(state): State<AppState>,
    CurrentUserExtractor(user): CurrentUserExtractor,
    Path(course_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    match state.courses.delete(course_id, user.id).await? {
        CourseMutation::Done => Ok(StatusCode::NO_CONTENT),
        CourseMutation::Missing => Err(AppError::not_found(COURSE_NOT_FOUND)),
        CourseMutation::NotOwner => Err(AppError::Forbidden),
    }
}
