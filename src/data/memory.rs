use crate::{
    data::{StudentStore, student::Student},
    error::RosterResult,
};
use async_trait::async_trait;
use std::{collections::BTreeMap, sync::Mutex};

#[derive(Debug)]
struct Rows {
    next_id: i64,
    by_id: BTreeMap<i64, Student>,
}

/// Stand-in for Postgres in tests. Generated ids always skip past explicitly saved ones.
#[derive(Debug)]
pub struct MemoryStudentStore {
    rows: Mutex<Rows>,
}

impl Default for MemoryStudentStore {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Rows {
                next_id: 1,
                by_id: BTreeMap::new(),
            }),
        }
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn find_all(&self) -> RosterResult<Vec<Student>> {
        Ok(self.rows.lock().unwrap().by_id.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RosterResult<Option<Student>> {
        Ok(self.rows.lock().unwrap().by_id.get(&id).cloned())
    }

    async fn save(&self, mut student: Student) -> RosterResult<Student> {
        let mut rows = self.rows.lock().unwrap();

        let id = match student.id {
            Some(id) => {
                rows.next_id = rows.next_id.max(id.saturating_add(1));
                id
            }
            None => {
                let id = rows.next_id;
                rows.next_id += 1;
                id
            }
        };
        student.id = Some(id);
        rows.by_id.insert(id, student.clone());

        Ok(student)
    }

    async fn delete_by_id(&self, id: i64) -> RosterResult<()> {
        self.rows.lock().unwrap().by_id.remove(&id);
        Ok(())
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: Option<i64>, name: &str) -> Student {
        Student {
            id,
            name: name.into(),
            major: None,
            age: 20,
        }
    }

    #[tokio::test]
    async fn save_without_id_assigns_increasing_ids() {
        let store = MemoryStudentStore::default();

        let first = store.save(student(None, "Ada")).await.unwrap();
        let second = store.save(student(None, "Bea")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(store.find_all().await.unwrap(), [first, second]);
    }

    #[tokio::test]
    async fn save_with_id_overwrites_or_creates() {
        let store = MemoryStudentStore::default();
        let saved = store.save(student(None, "Ada")).await.unwrap();

        store.save(student(saved.id, "Ada L.")).await.unwrap();
        store.save(student(Some(42), "Bea")).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Ada L.");
        assert_eq!(all[1].id, Some(42));
    }

    #[tokio::test]
    async fn generated_ids_skip_explicit_ones() {
        let store = MemoryStudentStore::default();
        store.save(student(Some(2), "Bea")).await.unwrap();

        let ada = store.save(student(None, "Ada")).await.unwrap();
        let cy = store.save(student(None, "Cy")).await.unwrap();

        assert_eq!(ada.id, Some(3));
        assert_eq!(cy.id, Some(4));
        assert_eq!(store.find_by_id(2).await.unwrap().unwrap().name, "Bea");
    }

    #[tokio::test]
    async fn deleting_unknown_ids_is_fine() {
        let store = MemoryStudentStore::default();
        store.delete_by_id(999).await.unwrap();
        assert!(store.find_by_id(999).await.unwrap().is_none());
    }
}
