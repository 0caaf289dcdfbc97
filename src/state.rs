/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Store は trait object で注入する (本番は Postgres, テストは in-memory)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::{course_repo::CourseStore, user_repo::UserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub courses: Arc<dyn CourseStore>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, courses: Arc<dyn CourseStore>) -> Self {
        Self { users, courses }
    }
}
