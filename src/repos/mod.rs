pub mod course_repo;
pub mod error;
pub mod user_repo;

#[cfg(test)]
pub mod memory;
