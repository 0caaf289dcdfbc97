/*
 * Responsibility
 * - API の URL 構造を定義
 * - Basic 認証が必要な範囲をここで決める (route_layer で適用)
 */
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::middleware::basic_auth;
use crate::state::AppState;

use crate::api::handlers::{
    courses::{create_course, delete_course, get_course, list_courses, update_course},
    users::{create_user, get_current_user},
};

pub fn routes(state: AppState) -> Router<AppState> {
    // Registration and course reads are public.
    let public = Router::new()
        .route("/users", post(create_user))
        .route("/courses", get(list_courses))
        .route("/courses/{course_id}", get(get_course));

    // Everything that writes a course, plus the caller's own record.
    let protected = Router::new()
        .route("/users", get(get_current_user))
        .route("/courses", post(create_course))
        .route(
            "/courses/{course_id}",
            put(update_course).delete(delete_course),
        );
    let protected = basic_auth::apply(protected, state);

    public.merge(protected)
}
