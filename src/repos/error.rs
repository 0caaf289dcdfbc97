/*
 * Responsibility
 * - Errors the repo layer reports upward
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("unique constraint violated")]
    Conflict,
}

impl RepoError {
    /// Postgres 23505 (unique violation) carries meaning for callers;
    /// everything else stays an opaque database failure.
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().as_deref() == Some("23505")
        {
            return RepoError::Conflict;
        }
        RepoError::Db(e)
    }
}
