use crate::errors::{AppError, ResultExt};
use crate::models::{Student, StudentRow};
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage for students, keyed by generated id.
///
/// Backed by Postgres when a database is configured, otherwise by an
/// in-process map (also used by the test suite).
#[derive(Clone)]
pub enum StudentRepository {
    Postgres(PgPool),
    InMemory(InMemoryStudents),
}

#[derive(Clone, Default)]
pub struct InMemoryStudents {
    rows: Arc<RwLock<BTreeMap<i64, Student>>>,
    last_id: Arc<AtomicI64>,
}

impl StudentRepository {
    pub fn postgres(pool: PgPool) -> Self {
        StudentRepository::Postgres(pool)
    }

    pub fn in_memory() -> Self {
        StudentRepository::InMemory(InMemoryStudents::default())
    }

    /// Inserts the student when it has no id yet, otherwise overwrites the stored row.
    /// Returns the stored record, id included.
    pub async fn save(&self, student: &Student) -> Result<Student, AppError> {
        match self {
            StudentRepository::Postgres(pool) => {
                let row = match student.id {
                    None => sqlx::query_as::<_, StudentRow>(
                        "INSERT INTO students (name, email, gender, joke, booking_id)
                         VALUES ($1, $2, $3, $4, $5)
                         RETURNING id, name, email, gender, joke, booking_id",
                    )
                    .bind(&student.name)
                    .bind(&student.email)
                    .bind(student.gender.as_str())
                    .bind(&student.joke)
                    .bind(student.booking_id)
                    .fetch_one(pool)
                    .await
                    .context("Failed to insert student")?,
                    Some(id) => {
                        let row = sqlx::query_as::<_, StudentRow>(
                            "INSERT INTO students (id, name, email, gender, joke, booking_id)
                             VALUES ($1, $2, $3, $4, $5, $6)
                             ON CONFLICT (id) DO UPDATE SET
                                name = EXCLUDED.name,
                                email = EXCLUDED.email,
                                gender = EXCLUDED.gender,
                                joke = EXCLUDED.joke,
                                booking_id = EXCLUDED.booking_id
                             RETURNING id, name, email, gender, joke, booking_id",
                        )
                        .bind(id)
                        .bind(&student.name)
                        .bind(&student.email)
                        .bind(student.gender.as_str())
                        .bind(&student.joke)
                        .bind(student.booking_id)
                        .fetch_one(pool)
                        .await
                        .with_context(|| format!("Failed to update student {}", id))?;

                        // Explicit ids bypass BIGSERIAL; keep the sequence ahead of them.
                        sqlx::query(
                            "SELECT setval(pg_get_serial_sequence('students', 'id'),
                                           GREATEST((SELECT MAX(id) FROM students), 1))",
                        )
                        .execute(pool)
                        .await
                        .context("Failed to advance student id sequence")?;

                        row
                    }
                };

                Student::try_from(row)
            }
            StudentRepository::InMemory(store) => {
                let mut rows = store.rows.write().await;
                let id = match student.id {
                    Some(id) => {
                        store.last_id.fetch_max(id, Ordering::SeqCst);
                        id
                    }
                    None => store.last_id.fetch_add(1, Ordering::SeqCst) + 1,
                };

                let saved = Student {
                    id: Some(id),
                    ..student.clone()
                };
                rows.insert(id, saved.clone());
                Ok(saved)
            }
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError> {
        match self {
            StudentRepository::Postgres(pool) => sqlx::query_as::<_, StudentRow>(
                "SELECT id, name, email, gender, joke, booking_id FROM students WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(pool)
            .await
            .with_context(|| format!("Failed to load student {}", id))?
            .map(Student::try_from)
            .transpose(),
            StudentRepository::InMemory(store) => Ok(store.rows.read().await.get(&id).cloned()),
        }
    }

    /// All students ordered by id.
    pub async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        match self {
            StudentRepository::Postgres(pool) => sqlx::query_as::<_, StudentRow>(
                "SELECT id, name, email, gender, joke, booking_id FROM students ORDER BY id",
            )
            .fetch_all(pool)
            .await
            .context("Failed to list students")?
            .into_iter()
            .map(Student::try_from)
            .collect(),
            StudentRepository::InMemory(store) => {
                Ok(store.rows.read().await.values().cloned().collect())
            }
        }
    }

    /// Returns `true` when a row was removed.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        match self {
            StudentRepository::Postgres(pool) => {
                let result = sqlx::query("DELETE FROM students WHERE id = $1")
                    .bind(id)
                    .execute(pool)
                    .await
                    .with_context(|| format!("Failed to delete student {}", id))?;
                Ok(result.rows_affected() > 0)
            }
            StudentRepository::InMemory(store) => {
                Ok(store.rows.write().await.remove(&id).is_some())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    #[tokio::test]
    async fn in_memory_ids_start_at_one_and_increase() {
        let repo = StudentRepository::in_memory();

        let first = repo
            .save(&Student::new("Ivan", "ivan@mail.com", Gender::Male))
            .await
            .unwrap();
        let second = repo
            .save(&Student::new("Anna", "anna@mail.com", Gender::Female))
            .await
            .unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(repo.find_by_id(2).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn saving_with_id_overwrites_and_advances_counter() {
        let repo = StudentRepository::in_memory();

        let mut student = Student::new("Ivan", "ivan@mail.com", Gender::Male);
        student.id = Some(10);
        repo.save(&student).await.unwrap();

        student.joke = Some("joke".to_string());
        repo.save(&student).await.unwrap();

        let stored = repo.find_by_id(10).await.unwrap().unwrap();
        assert_eq!(stored.joke.as_deref(), Some("joke"));

        let next = repo
            .save(&Student::new("Anna", "anna@mail.com", Gender::Female))
            .await
            .unwrap();
        assert_eq!(next.id, Some(11));
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_existed() {
        let repo = StudentRepository::in_memory();
        let saved = repo
            .save(&Student::new("Ivan", "ivan@mail.com", Gender::Male))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        assert!(repo.delete_by_id(id).await.unwrap());
        assert!(!repo.delete_by_id(id).await.unwrap());
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }
}
