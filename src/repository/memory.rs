//! In-memory student repository.
//!
//! Emulates the `DALUMN` table's primary key, its `NOT NULL` constraints
//! and MySQL's strict-mode conversion of text into `INT` and `DATE`
//! columns, reporting failures with the same wording MySQL uses.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::{RepositoryError, StudentRepository, ID_COLUMN, TABLE};
use crate::models::{Student, StudentPayload};

/// Process-local stand-in for the student table.
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    rows: RwLock<HashMap<String, Student>>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

fn not_null<T: Clone>(value: &Option<T>, column: &str) -> Result<T, RepositoryError> {
    value
        .clone()
        .ok_or_else(|| RepositoryError::database(format!("Column '{}' cannot be null", column)))
}

fn incorrect(kind: &str, value: &str, column: &str) -> RepositoryError {
    RepositoryError::database(format!(
        "Incorrect {} value: '{}' for column '{}' at row 1",
        kind, value, column
    ))
}

/// Integer conversion: whole numbers as-is, decimals rounded.
fn to_integer(value: String, column: &str) -> Result<i64, RepositoryError> {
    let trimmed = value.trim();
    if let Ok(number) = trimmed.parse::<i64>() {
        return Ok(number);
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() && number.abs() < i64::MAX as f64 => {
            Ok(number.round() as i64)
        }
        _ => Err(incorrect("integer", &value, column)),
    }
}

/// Date conversion from `YYYY-MM-DD` or `YYYYMMDD`; a time part is dropped.
fn to_date(value: String, column: &str) -> Result<NaiveDate, RepositoryError> {
    let trimmed = value.trim();
    let day = trimmed.split([' ', 'T']).next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(day, "%Y%m%d"))
        .map_err(|_| incorrect("date", &value, column))
}

/// Builds a full row, failing on the first column left `NULL` or holding
/// text its column type cannot take.
fn to_row(id: &str, payload: &StudentPayload) -> Result<Student, RepositoryError> {
    Ok(Student {
        id: id.to_string(),
        paternal_surname: not_null(&payload.paternal_surname, "aluapp")?,
        maternal_surname: not_null(&payload.maternal_surname, "aluapm")?,
        given_name: not_null(&payload.given_name, "alunom")?,
        sex: not_null(&payload.sex, "alusex")?,
        birth_date: to_date(not_null(&payload.birth_date, "alunac")?, "alunac")?,
        birth_place: not_null(&payload.birth_place, "alulna")?,
        tax_id: not_null(&payload.tax_id, "alurfc")?,
        national_id: not_null(&payload.national_id, "alucur")?,
        school_id: to_integer(not_null(&payload.school_id, "aluesc")?, "aluesc")?,
        email: not_null(&payload.email, "alumai")?,
    })
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, RepositoryError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Student>, RepositoryError> {
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn create(&self, student: &StudentPayload) -> Result<(), RepositoryError> {
        let id = not_null(&student.id, ID_COLUMN)?;
        let row = to_row(&id, student)?;

        let mut rows = self.rows.write().await;
        if rows.contains_key(&id) {
            return Err(RepositoryError::database(format!(
                "Duplicate entry '{}' for key '{}.PRIMARY'",
                id, TABLE
            )));
        }
        rows.insert(id, row);
        Ok(())
    }

    async fn update(&self, id: &str, student: &StudentPayload) -> Result<u64, RepositoryError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(id) {
            // Constraints are only checked against rows the statement touches
            Some(existing) => {
                *existing = to_row(id, student)?;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &str) -> Result<u64, RepositoryError> {
        Ok(self.rows.write().await.remove(id).map_or(0, |_| 1))
    }
}
