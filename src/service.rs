//! Student service coordinating validation, storage, summaries, and metrics.

use crate::{
    metrics::{MetricsSnapshot, StudentMetrics},
    model::{Student, StudentId, StudentPayload},
    repository::{RepositoryError, StudentRepository},
    summarization::{SummarizationClient, SummarizationClientError},
    validation::{ValidationError, validate_student},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors emitted by the student service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Payload failed field-level validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Referenced student does not exist.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// Summary provider failed to produce text.
    #[error("Summary generation failed: {0}")]
    Summary(#[from] SummarizationClientError),
}

/// Abstraction over the student service used by the HTTP surface.
#[async_trait]
pub trait StudentApi: Send + Sync {
    /// Validate and store a new student.
    async fn create_student(&self, payload: StudentPayload) -> Result<Student, ServiceError>;

    /// List every stored student.
    async fn list_students(&self) -> Vec<Student>;

    /// Fetch one student.
    async fn get_student(&self, id: StudentId) -> Result<Student, ServiceError>;

    /// Validate and replace the fields of an existing student.
    async fn update_student(
        &self,
        id: StudentId,
        payload: StudentPayload,
    ) -> Result<Student, ServiceError>;

    /// Remove a student.
    async fn delete_student(&self, id: StudentId) -> Result<(), ServiceError>;

    /// Generate a natural-language summary of a stored student.
    async fn summarize_student(&self, id: StudentId) -> Result<String, ServiceError>;

    /// Retrieve the current metrics snapshot.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

/// Owns the repository handle, the summary client, and the activity counters.
///
/// Construct the service once near process start and share it through an `Arc`.
pub struct StudentService {
    repository: Arc<StudentRepository>,
    summarizer: Box<dyn SummarizationClient>,
    metrics: StudentMetrics,
}

impl StudentService {
    /// Build a service over an existing repository.
    pub fn new(
        repository: Arc<StudentRepository>,
        summarizer: Box<dyn SummarizationClient>,
    ) -> Self {
        Self {
            repository,
            summarizer,
            metrics: StudentMetrics::new(),
        }
    }

    /// Shared handle to the backing repository.
    pub fn repository(&self) -> &Arc<StudentRepository> {
        &self.repository
    }
}

#[async_trait]
impl StudentApi for StudentService {
    async fn create_student(&self, payload: StudentPayload) -> Result<Student, ServiceError> {
        let student = self.repository.create(validate_student(payload)?);
        self.metrics.record_created();
        tracing::info!(student_id = student.id, "Student created");
        Ok(student)
    }

    async fn list_students(&self) -> Vec<Student> {
        self.repository.get_all()
    }

    async fn get_student(&self, id: StudentId) -> Result<Student, ServiceError> {
        Ok(self.repository.get_by_id(id)?)
    }

    async fn update_student(
        &self,
        id: StudentId,
        payload: StudentPayload,
    ) -> Result<Student, ServiceError> {
        let student = self.repository.update(id, validate_student(payload)?)?;
        self.metrics.record_updated();
        tracing::info!(student_id = id, "Student updated");
        Ok(student)
    }

    async fn delete_student(&self, id: StudentId) -> Result<(), ServiceError> {
        self.repository.delete(id)?;
        self.metrics.record_deleted();
        tracing::info!(student_id = id, "Student deleted");
        Ok(())
    }

    async fn summarize_student(&self, id: StudentId) -> Result<String, ServiceError> {
        let student = self.repository.get_by_id(id)?;
        match self.summarizer.summarize(&student).await {
            Ok(summary) => {
                self.metrics.record_summary(true);
                Ok(summary)
            }
            Err(error) => {
                self.metrics.record_summary(false);
                tracing::warn!(student_id = id, %error, "Summary generation failed");
                Err(error.into())
            }
        }
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            students_stored: self.repository.len() as u64,
            ..self.metrics.snapshot()
        }
    }
}
