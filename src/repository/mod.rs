//! Record Repository
//!
//! Translates the five student operations into statements against the
//! `DALUMN` table. Handlers only see the [`StudentRepository`] trait, so
//! the MySQL implementation and the in-memory one are interchangeable.

mod memory;
mod mysql;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Student, StudentPayload};

pub use memory::InMemoryStudentRepository;
pub use mysql::MySqlStudentRepository;

// == Table Layout ==
/// Name of the student table
pub const TABLE: &str = "DALUMN";

/// Primary key column
pub const ID_COLUMN: &str = "aluctr";

// == Repository Error ==
/// Failure reported by the store.
///
/// The message is the driver's own text and is shown to clients verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{message}")]
    Database { message: String },
}

impl RepositoryError {
    pub fn database(message: impl Into<String>) -> Self {
        RepositoryError::Database {
            message: message.into(),
        }
    }

    /// Driver message text
    pub fn message(&self) -> &str {
        match self {
            RepositoryError::Database { message } => message,
        }
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            // Server-side errors carry MySQL's own message ("Duplicate entry ...")
            sqlx::Error::Database(db) => Self::database(db.message()),
            other => Self::database(other.to_string()),
        }
    }
}

// == Repository Trait ==
/// Data access for student records.
///
/// Every call is one round trip to the store. Nothing is cached between
/// calls and no existence checks precede writes.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Returns every row, in no particular order.
    async fn list(&self) -> Result<Vec<Student>, RepositoryError>;

    /// Returns the row whose identifier equals `id`, or `None`.
    async fn get_by_id(&self, id: &str) -> Result<Option<Student>, RepositoryError>;

    /// Inserts one row with all eleven attributes.
    async fn create(&self, student: &StudentPayload) -> Result<(), RepositoryError>;

    /// Overwrites the ten non-identifier attributes of the row matching `id`.
    ///
    /// Returns the affected-row count, which is zero when nothing matched.
    async fn update(&self, id: &str, student: &StudentPayload) -> Result<u64, RepositoryError>;

    /// Removes the row matching `id` and returns the affected-row count.
    async fn delete(&self, id: &str) -> Result<u64, RepositoryError>;
}
