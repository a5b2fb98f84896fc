//! Concurrent in-memory student store.
//!
//! A single [`RwLock`] guards the record map and the identifier counter together. Writers
//! (`create`, `update`, `delete`) take the exclusive guard; readers take the shared guard and
//! return owned clones, so no guard ever outlives the call. Identifiers come from a counter
//! that only moves forward: a deleted record's id is never issued again.

use crate::model::{NewStudent, Student, StudentId};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

const FIRST_ID: StudentId = 1;

/// Errors returned by [`StudentRepository`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No record is stored under the requested identifier.
    #[error("student {0} not found")]
    NotFound(StudentId),
}

struct Inner {
    students: HashMap<StudentId, Student>,
    next_id: StudentId,
}

/// Thread-safe CRUD store keyed by repository-assigned identifiers.
///
/// Construct one per process and share it through an `Arc`.
pub struct StudentRepository {
    inner: RwLock<Inner>,
}

impl StudentRepository {
    /// Create an empty repository whose first issued id is `1`.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                students: HashMap::new(),
                next_id: FIRST_ID,
            }),
        }
    }

    /// Store a new record under the next identifier and return it.
    pub fn create(&self, student: NewStudent) -> Student {
        let mut inner = self.write();
        let id = inner.next_id;
        let stored = student.with_id(id);
        inner.students.insert(id, stored.clone());
        inner.next_id += 1;
        stored
    }

    /// Snapshot of every stored record, in no particular order.
    pub fn get_all(&self) -> Vec<Student> {
        self.read().students.values().cloned().collect()
    }

    /// Fetch the record stored under `id`.
    pub fn get_by_id(&self, id: StudentId) -> Result<Student, RepositoryError> {
        self.read()
            .students
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    /// Replace every field of the record under `id` except the identifier itself.
    pub fn update(&self, id: StudentId, student: NewStudent) -> Result<Student, RepositoryError> {
        let mut inner = self.write();
        let slot = inner
            .students
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;
        *slot = student.with_id(id);
        Ok(slot.clone())
    }

    /// Permanently remove the record under `id`.
    pub fn delete(&self, id: StudentId) -> Result<(), RepositoryError> {
        self.write()
            .students
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.read().students.len()
    }

    /// Whether the repository holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // No operation can panic between mutating the map and bumping the counter, so a poisoned
    // guard still protects consistent state.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StudentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn student(name: &str, age: u32, email: &str) -> NewStudent {
        NewStudent {
            name: name.into(),
            age,
            email: email.into(),
        }
    }

    #[test]
    fn deleted_ids_are_never_reissued() {
        let repo = StudentRepository::new();
        let ann = repo.create(student("Ann", 20, "a@x.com"));
        let bo = repo.create(student("Bo", 22, "b@x.com"));
        assert_eq!(ann.id, 1);
        assert_eq!(bo.id, 2);

        repo.delete(1).expect("delete ann");
        assert_eq!(repo.get_by_id(1), Err(RepositoryError::NotFound(1)));

        let cy = repo.create(student("Cy", 19, "c@x.com"));
        assert_eq!(cy.id, 3);
    }

    #[test]
    fn create_returns_what_get_by_id_sees() {
        let repo = StudentRepository::new();
        let created = repo.create(student("Ann", 20, "a@x.com"));
        assert_eq!(
            created,
            Student {
                id: 1,
                name: "Ann".into(),
                age: 20,
                email: "a@x.com".into(),
            }
        );
        assert_eq!(repo.get_by_id(created.id).expect("stored"), created);
    }

    #[test]
    fn ids_increase_strictly() {
        let repo = StudentRepository::new();
        let mut last = 0;
        for i in 0..50 {
            let created = repo.create(student("S", 18, "s@x.com"));
            assert!(created.id > last);
            last = created.id;
            if i % 3 == 0 {
                repo.delete(created.id).expect("delete");
            }
        }
    }

    #[test]
    fn update_replaces_fields_but_keeps_id() {
        let repo = StudentRepository::new();
        let created = repo.create(student("Ann", 20, "a@x.com"));
        let updated = repo
            .update(created.id, student("Annie", 21, "annie@x.com"))
            .expect("update");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Annie");
        assert_eq!(updated.age, 21);
        assert_eq!(updated.email, "annie@x.com");
        assert_eq!(repo.get_by_id(created.id).expect("stored"), updated);
    }

    #[test]
    fn update_of_missing_id_leaves_store_unchanged() {
        let repo = StudentRepository::new();
        let ann = repo.create(student("Ann", 20, "a@x.com"));
        repo.delete(ann.id).expect("delete");
        let bo = repo.create(student("Bo", 22, "b@x.com"));

        assert_eq!(
            repo.update(ann.id, student("Ghost", 30, "g@x.com")),
            Err(RepositoryError::NotFound(ann.id))
        );
        assert_eq!(
            repo.update(99, student("Ghost", 30, "g@x.com")),
            Err(RepositoryError::NotFound(99))
        );
        assert_eq!(repo.get_all(), vec![bo]);
    }

    #[test]
    fn negative_ids_are_simply_absent() {
        let repo = StudentRepository::new();
        repo.create(student("Ann", 20, "a@x.com"));
        assert_eq!(repo.get_by_id(-1), Err(RepositoryError::NotFound(-1)));
        assert_eq!(repo.delete(-1), Err(RepositoryError::NotFound(-1)));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn delete_of_missing_id_is_not_found() {
        let repo = StudentRepository::new();
        assert_eq!(repo.delete(7), Err(RepositoryError::NotFound(7)));
        let created = repo.create(student("Ann", 20, "a@x.com"));
        repo.delete(created.id).expect("first delete");
        assert_eq!(
            repo.delete(created.id),
            Err(RepositoryError::NotFound(created.id))
        );
    }

    #[test]
    fn get_all_counts_creates_minus_deletes() {
        let repo = StudentRepository::new();
        assert!(repo.is_empty());
        let ids: Vec<_> = (0..10)
            .map(|_| repo.create(student("S", 18, "s@x.com")).id)
            .collect();
        for id in ids.iter().step_by(2) {
            repo.delete(*id).expect("delete");
        }
        assert_eq!(repo.get_all().len(), 5);
        assert_eq!(repo.len(), 5);
    }

    #[test]
    fn concurrent_creates_get_distinct_ids() {
        const WRITERS: usize = 16;
        const PER_WRITER: usize = 250;

        let repo = Arc::new(StudentRepository::new());
        let handles: Vec<_> = (0..WRITERS)
            .map(|writer| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || {
                    (0..PER_WRITER)
                        .map(|n| {
                            repo.create(student(
                                &format!("w{writer}-{n}"),
                                20,
                                "w@x.com",
                            ))
                            .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<StudentId> = handles
            .into_iter()
            .flat_map(|handle| handle.join().expect("writer thread"))
            .collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), WRITERS * PER_WRITER);
        assert_eq!(repo.len(), WRITERS * PER_WRITER);
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&((WRITERS * PER_WRITER) as StudentId)));
    }
}
