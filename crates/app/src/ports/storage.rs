//! Storage port: repository trait for persistence.

use std::future::Future;

use alumnos_domain::error::AlumnosError;
use alumnos_domain::id::StudentId;
use alumnos_domain::student::{NewStudent, Student};

/// Repository for persisting and querying [`Student`]s.
///
/// Implementations must enforce email uniqueness themselves (a unique index
/// or equivalent): [`email_taken`](Self::email_taken) is only a pre-check.
pub trait StudentRepository {
    /// Insert a new student and return it with its assigned id.
    fn create(
        &self,
        student: NewStudent,
    ) -> impl Future<Output = Result<Student, AlumnosError>> + Send;

    /// Get a student by id.
    fn get_by_id(
        &self,
        id: StudentId,
    ) -> impl Future<Output = Result<Option<Student>, AlumnosError>> + Send;

    /// Get all students, ordered by id.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Student>, AlumnosError>> + Send;

    /// Overwrite every mutable column of an existing student.
    fn update(&self, student: Student)
    -> impl Future<Output = Result<Student, AlumnosError>> + Send;

    /// Delete a student by id. Deleting a missing id is not an error.
    fn delete(&self, id: StudentId) -> impl Future<Output = Result<(), AlumnosError>> + Send;

    /// Whether a student other than `except` already uses `email`.
    fn email_taken(
        &self,
        email: &str,
        except: Option<StudentId>,
    ) -> impl Future<Output = Result<bool, AlumnosError>> + Send;
}
