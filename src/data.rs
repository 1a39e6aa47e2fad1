use crate::{data::student::Student, error::RosterResult};
use async_trait::async_trait;

#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod student;

/// Persistence for [`Student`]s, keyed by a storage-assigned `i64`.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn find_all(&self) -> RosterResult<Vec<Student>>;
    async fn find_by_id(&self, id: i64) -> RosterResult<Option<Student>>;
    /// Inserts when `student.id` is `None`, otherwise writes over (or creates) the row with that id.
    async fn save(&self, student: Student) -> RosterResult<Student>;
    /// Succeeds whether or not a row with `id` existed.
    async fn delete_by_id(&self, id: i64) -> RosterResult<()>;
    async fn close(&self);
}
