//! `SQLite` implementation of [`StudentRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use alumnos_app::ports::StudentRepository;
use alumnos_domain::error::AlumnosError;
use alumnos_domain::id::StudentId;
use alumnos_domain::student::{NewStudent, Student};
use alumnos_domain::time::Timestamp;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Student`].
struct Wrapper(Student);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Student> {
        value.map(|w| w.0)
    }
}

fn parse_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("nombre")?;
        let address: String = row.try_get("direccion")?;
        let email: String = row.try_get("email")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Self(Student {
            id: StudentId::new(id),
            name,
            address,
            email,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO alumnos (nombre, direccion, email, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM alumnos WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM alumnos ORDER BY id";
const UPDATE: &str = r"
    UPDATE alumnos
    SET nombre = ?, direccion = ?, email = ?, updated_at = ?
    WHERE id = ?
";
const DELETE_BY_ID: &str = "DELETE FROM alumnos WHERE id = ?";
const EMAIL_TAKEN: &str = "SELECT EXISTS(SELECT 1 FROM alumnos WHERE email = ? AND id IS NOT ?)";

/// `SQLite`-backed student repository.
pub struct SqliteStudentRepository {
    pool: SqlitePool,
}

impl SqliteStudentRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl StudentRepository for SqliteStudentRepository {
    fn create(
        &self,
        student: NewStudent,
    ) -> impl Future<Output = Result<Student, AlumnosError>> + Send {
        let pool = self.pool.clone();
        async move {
            let created_at = student.created_at.to_rfc3339();
            let result = sqlx::query(INSERT)
                .bind(&student.name)
                .bind(&student.address)
                .bind(&student.email)
                .bind(&created_at)
                .bind(&created_at)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(student.with_id(StudentId::new(result.last_insert_rowid())))
        }
    }

    fn get_by_id(
        &self,
        id: StudentId,
    ) -> impl Future<Output = Result<Option<Student>, AlumnosError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Student>, AlumnosError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        student: Student,
    ) -> impl Future<Output = Result<Student, AlumnosError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&student.name)
                .bind(&student.address)
                .bind(&student.email)
                .bind(student.updated_at.to_rfc3339())
                .bind(student.id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(student)
        }
    }

    fn delete(&self, id: StudentId) -> impl Future<Output = Result<(), AlumnosError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn email_taken(
        &self,
        email: &str,
        except: Option<StudentId>,
    ) -> impl Future<Output = Result<bool, AlumnosError>> + Send {
        let pool = self.pool.clone();
        let email = email.to_owned();
        async move {
            let taken: i64 = sqlx::query_scalar(EMAIL_TAKEN)
                .bind(email)
                .bind(except.map(StudentId::as_i64))
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(taken != 0)
        }
    }
}
