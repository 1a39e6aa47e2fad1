use crate::{
    data::{StudentStore, student::Student},
    error::{MissingStudentSnafu, RosterResult},
};
use snafu::OptionExt;
use std::sync::Arc;

#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    pub async fn find_all(&self) -> RosterResult<Vec<Student>> {
        self.store.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> RosterResult<Student> {
        self.store
            .find_by_id(id)
            .await?
            .context(MissingStudentSnafu { id })
    }

    /// Creates when `student.id` is `None`, otherwise overwrites (or creates) that id.
    pub async fn save(&self, student: Student) -> RosterResult<Student> {
        self.store.save(student).await
    }

    pub async fn delete(&self, id: i64) -> RosterResult<()> {
        self.store.delete_by_id(id).await
    }

    pub async fn close(&self) {
        self.store.close().await;
    }
}

impl std::fmt::Debug for StudentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudentService").finish_non_exhaustive()
    }
}
