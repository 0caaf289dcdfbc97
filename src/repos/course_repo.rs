/*
 * Responsibility
 * - courses CRUD
 * - "userId" FK (CASCADE) 前提で削除挙動を意識
 * - update/delete は所有者チェックを同一トランザクション内で行う
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

/// A course joined with the owning user's public fields.
/// Audit timestamps are intentionally not selected; they never leave the API.
#[derive(Debug, Clone, FromRow)]
pub struct CourseWithOwner {
    #[sqlx(rename = "courseId")]
    pub course_id: i64,

    pub title: String,
    pub description: String,

    #[sqlx(rename = "estimatedTime")]
    pub estimated_time: Option<String>,
    #[sqlx(rename = "materialsNeeded")]
    pub materials_needed: Option<String>,

    #[sqlx(rename = "userId")]
    pub user_id: Uuid,

    #[sqlx(rename = "ownerFirstName")]
    pub owner_first_name: String,
    #[sqlx(rename = "ownerLastName")]
    pub owner_last_name: String,
    #[sqlx(rename = "ownerEmailAddress")]
    pub owner_email_address: String,
}

#[derive(Debug)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: Uuid,
}

#[derive(Debug, Default)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    // Tri-state:
    // - None: field missing (do not update)
    // - Some(None): set NULL
    // - Some(Some(v)): set value
    pub estimated_time: Option<Option<String>>,
    pub materials_needed: Option<Option<String>>,
}

/// Outcome of an owner-checked mutation.
///
/// Absence is decided before ownership, so a request against a course that
/// does not exist never reveals whether it would have been refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseMutation {
    Done,
    Missing,
    NotOwner,
}

/// Data-store interface for course records.
///
/// `update`/`delete` take the id of the authenticated user and only mutate
/// when it matches the course's "userId" (comparison by primary key).
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn list(&self) -> Result<Vec<CourseWithOwner>, RepoError>;
    async fn get(&self, course_id: i64) -> Result<Option<CourseWithOwner>, RepoError>;
    async fn create(&self, course: NewCourse) -> Result<i64, RepoError>;
    async fn update(
        &self,
        course_id: i64,
        owner_id: Uuid,
        changes: CourseChanges,
    ) -> Result<CourseMutation, RepoError>;
    async fn delete(&self, course_id: i64, owner_id: Uuid) -> Result<CourseMutation, RepoError>;
}

#[derive(Clone)]
pub struct PgCourseStore {
    pool: PgPool,
}

impl PgCourseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock the course row and return its owner, keeping the row locked for
    /// the rest of the transaction. `None` means the course does not exist.
    async fn lock_owner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        course_id: i64,
    ) -> Result<Option<Uuid>, RepoError> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT "userId"
            FROM courses
            WHERE "courseId" = $1
            FOR UPDATE
            "#,
        )
        .bind(course_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row.map(|(owner,)| owner))
    }
}

const SELECT_WITH_OWNER: &str = r#"
    SELECT
        c."courseId", c.title, c.description, c."estimatedTime", c."materialsNeeded",
        c."userId",
        u."firstName" AS "ownerFirstName",
        u."lastName" AS "ownerLastName",
        u."emailAddress" AS "ownerEmailAddress"
    FROM courses c
    JOIN users u ON u."userId" = c."userId"
"#;

#[async_trait]
impl CourseStore for PgCourseStore {
    async fn list(&self) -> Result<Vec<CourseWithOwner>, RepoError> {
        let sql = format!(r#"{SELECT_WITH_OWNER} ORDER BY c."courseId""#);
        let rows = sqlx::query_as::<_, CourseWithOwner>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?;

        Ok(rows)
    }

    async fn get(&self, course_id: i64) -> Result<Option<CourseWithOwner>, RepoError> {
        let sql = format!(r#"{SELECT_WITH_OWNER} WHERE c."courseId" = $1"#);
        let row = sqlx::query_as::<_, CourseWithOwner>(&sql)
            .bind(course_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn create(&self, course: NewCourse) -> Result<i64, RepoError> {
        let (course_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO courses (title, description, "estimatedTime", "materialsNeeded", "userId")
            VALUES ($1, $2, $3, $4, $5)
            RETURNING "courseId"
            "#,
        )
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.estimated_time)
        .bind(&course.materials_needed)
        .bind(course.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(course_id)
    }

    async fn update(
        &self,
        course_id: i64,
        owner_id: Uuid,
        changes: CourseChanges,
    ) -> Result<CourseMutation, RepoError> {
        let mut tx = self.pool.begin().await.map_err(RepoError::from_sqlx)?;

        // Returning early drops the transaction, which rolls it back.
        let Some(current_owner) = Self::lock_owner(&mut tx, course_id).await? else {
            return Ok(CourseMutation::Missing);
        };
        if current_owner != owner_id {
            return Ok(CourseMutation::NotOwner);
        }

        let set_estimated_time = changes.estimated_time.is_some();
        let set_materials_needed = changes.materials_needed.is_some();

        sqlx::query(
            r#"
            UPDATE courses
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                "estimatedTime" = CASE
                    WHEN $4 = false THEN "estimatedTime"
                    ELSE $5
                END,
                "materialsNeeded" = CASE
                    WHEN $6 = false THEN "materialsNeeded"
                    ELSE $7
                END,
                "updatedAt" = now()
            WHERE "courseId" = $1
            "#,
        )
        .bind(course_id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(set_estimated_time)
        .bind(changes.estimated_time.flatten())
        .bind(set_materials_needed)
        .bind(changes.materials_needed.flatten())
        .execute(&mut *tx)
        .await
        .map_err(RepoError::from_sqlx)?;

        tx.commit().await.map_err(RepoError::from_sqlx)?;
        Ok(CourseMutation::Done)
    }

    async fn delete(&self, course_id: i64, owner_id: Uuid) -> Result<CourseMutation, RepoError> {
        let mut tx = self.pool.begin().await.map_err(RepoError::from_sqlx)?;

        let Some(current_owner) = Self::lock_owner(&mut tx, course_id).await? else {
            return Ok(CourseMutation::Missing);
        };
        if current_owner != owner_id {
            return Ok(CourseMutation::NotOwner);
        }

        sqlx::query(
            r#"
            DELETE FROM courses
            WHERE "courseId" = $1
            "#,
        )
        .bind(course_id)
        .execute(&mut *tx)
        .await
        .map_err(RepoError::from_sqlx)?;

        tx.commit().await.map_err(RepoError::from_sqlx)?;
        Ok(CourseMutation::Done)
    }
}
