//! Student service: use-cases for managing students.

use alumnos_domain::error::{AlumnosError, NotFoundError};
use alumnos_domain::id::StudentId;
use alumnos_domain::student::{Student, StudentChanges};
use alumnos_domain::validation::{Field, Mode, Rule, StudentDraft};

use crate::ports::StudentRepository;

/// Application service for student CRUD operations.
pub struct StudentService<R> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List all students.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_students(&self) -> Result<Vec<Student>, AlumnosError> {
        self.repo.get_all().await
    }

    /// Validate `draft` in full and insert it.
    ///
    /// # Errors
    ///
    /// Returns [`AlumnosError::Validation`] listing every failing field, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, draft))]
    pub async fn create_student(&self, draft: StudentDraft) -> Result<Student, AlumnosError> {
        let student = self
            .validate(&draft, Mode::Full, None)
            .await?
            .into_new_student()?;
        let created = self.repo.create(student).await?;
        tracing::info!(id = %created.id, "student created");
        Ok(created)
    }

    /// Look up a student by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`AlumnosError::NotFound`] when no student with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_student(&self, id: StudentId) -> Result<Student, AlumnosError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Student",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Replace every attribute of an existing student.
    ///
    /// The lookup happens first, so a missing id is reported as not found
    /// even when the draft is also invalid.
    ///
    /// # Errors
    ///
    /// Returns [`AlumnosError::NotFound`], [`AlumnosError::Validation`], or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, draft))]
    pub async fn replace_student(
        &self,
        id: StudentId,
        draft: StudentDraft,
    ) -> Result<Student, AlumnosError> {
        self.update(id, draft, Mode::Full).await
    }

    /// Merge the supplied attributes into an existing student.
    ///
    /// # Errors
    ///
    /// Returns [`AlumnosError::NotFound`], [`AlumnosError::Validation`], or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, draft))]
    pub async fn merge_student(
        &self,
        id: StudentId,
        draft: StudentDraft,
    ) -> Result<Student, AlumnosError> {
        self.update(id, draft, Mode::Partial).await
    }

    /// Permanently delete a student.
    ///
    /// # Errors
    ///
    /// Returns [`AlumnosError::NotFound`] when no student with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_student(&self, id: StudentId) -> Result<(), AlumnosError> {
        let student = self.get_student(id).await?;
        self.repo.delete(student.id).await?;
        tracing::info!(%id, "student deleted");
        Ok(())
    }

    async fn update(
        &self,
        id: StudentId,
        draft: StudentDraft,
        mode: Mode,
    ) -> Result<Student, AlumnosError> {
        let mut student = self.get_student(id).await?;
        let changes = self.validate(&draft, mode, Some(id)).await?;
        student.apply(changes);
        self.repo.update(student).await
    }

    async fn validate(
        &self,
        draft: &StudentDraft,
        mode: Mode,
        except: Option<StudentId>,
    ) -> Result<StudentChanges, AlumnosError> {
        let mut report = draft.check(mode);
        let taken = match report.email() {
            Some(email) => self.repo.email_taken(email, except).await?,
            None => false,
        };
        if taken {
            report.reject(Field::Email, Rule::Unique);
        }
        report.into_result().map_err(AlumnosError::from)
    }
}
