//! In-memory implementations of [`UserStore`] and [`CourseStore`].
//!
//! Backs the router tests so the full HTTP surface can be exercised without
//! a database. Semantics mirror the Postgres implementations: duplicate
//! emails are a `Conflict`, mutations check existence before ownership.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::repos::course_repo::{
    CourseChanges, CourseMutation, CourseStore, CourseWithOwner, NewCourse,
};
use crate::repos::error::RepoError;
use crate::repos::user_repo::{NewUser, UserRow, UserStore};

#[derive(Debug, Clone)]
struct CourseRecord {
    title: String,
    description: String,
    estimated_time: Option<String>,
    materials_needed: Option<String>,
    user_id: Uuid,
}

#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, UserRow>>,
    // BTreeMap keeps listing ordered by course id.
    courses: RwLock<BTreeMap<i64, CourseRecord>>,
    next_course_id: AtomicI64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            next_course_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    fn with_owner(&self, course_id: i64, record: &CourseRecord) -> Option<CourseWithOwner> {
        let users = self.users.read().unwrap();
        let owner = users.get(&record.user_id)?;
        Some(CourseWithOwner {
            course_id,
            title: record.title.clone(),
            description: record.description.clone(),
            estimated_time: record.estimated_time.clone(),
            materials_needed: record.materials_needed.clone(),
            user_id: record.user_id,
            owner_first_name: owner.first_name.clone(),
            owner_last_name: owner.last_name.clone(),
            owner_email_address: owner.email_address.clone(),
        })
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_email(&self, email_address: &str) -> Result<Option<UserRow>, RepoError> {
        let users = self.users.read().unwrap();
        Ok(users
            .values()
            .find(|u| u.email_address == email_address)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<UserRow, RepoError> {
        let mut users = self.users.write().unwrap();
        if users
            .values()
            .any(|u| u.email_address == user.email_address)
        {
            return Err(RepoError::Conflict);
        }

        let row = UserRow {
            id: Uuid::new_v4(),
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.insert(row.id, row.clone());
        Ok(row)
    }
}

#[async_trait]
impl CourseStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<CourseWithOwner>, RepoError> {
        let courses = self.courses.read().unwrap();
        Ok(courses
            .iter()
            .filter_map(|(id, record)| self.with_owner(*id, record))
            .collect())
    }

    async fn get(&self, course_id: i64) -> Result<Option<CourseWithOwner>, RepoError> {
        let courses = self.courses.read().unwrap();
        Ok(courses
            .get(&course_id)
            .and_then(|record| self.with_owner(course_id, record)))
    }

    async fn create(&self, course: NewCourse) -> Result<i64, RepoError> {
        let course_id = self.next_course_id.fetch_add(1, Ordering::SeqCst);
        self.courses.write().unwrap().insert(
            course_id,
            CourseRecord {
                title: course.title,
                description: course.description,
                estimated_time: course.estimated_time,
                materials_needed: course.materials_needed,
                user_id: course.user_id,
            },
        );
        Ok(course_id)
    }

    async fn update(
        &self,
        course_id: i64,
        owner_id: Uuid,
        changes: CourseChanges,
    ) -> Result<CourseMutation, RepoError> {
        let mut courses = self.courses.write().unwrap();
        let Some(record) = courses.get_mut(&course_id) else {
            return Ok(CourseMutation::Missing);
        };
        if record.user_id != owner_id {
            return Ok(CourseMutation::NotOwner);
        }

        if let Some(title) = changes.title {
            record.title = title;
        }
        if let Some(description) = changes.description {
            record.description = description;
        }
        if let Some(estimated_time) = changes.estimated_time {
            record.estimated_time = estimated_time;
        }
        if let Some(materials_needed) = changes.materials_needed {
            record.materials_needed = materials_needed;
        }
        Ok(CourseMutation::Done)
    }

    async fn delete(&self, course_id: i64, owner_id: Uuid) -> Result<CourseMutation, RepoError> {
        let mut courses = self.courses.write().unwrap();
        let Some(record) = courses.get(&course_id) else {
            return Ok(CourseMutation::Missing);
        };
        if record.user_id != owner_id {
            return Ok(CourseMutation::NotOwner);
        }
        courses.remove(&course_id);
        Ok(CourseMutation::Done)
    }
}
