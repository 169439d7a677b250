//! MySQL-backed student repository.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tracing::debug;

use super::{RepositoryError, StudentRepository};
use crate::config::StoreConfig;
use crate::models::{Student, StudentPayload};

// == Statements ==
// Columns are aliased onto the field names of `Student`.
macro_rules! select_students {
    ($tail:literal) => {
        concat!(
            "SELECT aluctr AS id, aluapp AS paternal_surname, aluapm AS maternal_surname, ",
            "alunom AS given_name, alusex AS sex, alunac AS birth_date, alulna AS birth_place, ",
            "alurfc AS tax_id, alucur AS national_id, CAST(aluesc AS SIGNED) AS school_id, ",
            "alumai AS email FROM DALUMN",
            $tail
        )
    };
}

const SELECT_ALL: &str = select_students!("");
const SELECT_BY_ID: &str = select_students!(" WHERE aluctr = ?");
// Writes bind every value as text (or NULL); MySQL converts it to the
// column type and raises its own error when it cannot.
const INSERT: &str = concat!(
    "INSERT INTO DALUMN (aluctr, aluapp, aluapm, alunom, alusex, alunac, alulna, ",
    "alurfc, alucur, aluesc, alumai) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
);
const UPDATE: &str = concat!(
    "UPDATE DALUMN SET aluapp = ?, aluapm = ?, alunom = ?, alusex = ?, alunac = ?, ",
    "alulna = ?, alurfc = ?, alucur = ?, aluesc = ?, alumai = ? WHERE aluctr = ?"
);
const DELETE: &str = "DELETE FROM DALUMN WHERE aluctr = ?";

// == MySQL Repository ==
/// Student repository over a pooled MySQL connection source.
///
/// Each operation checks out one connection for a single statement. The
/// connection goes back to the pool when the guard drops, on the error
/// path as well.
#[derive(Debug, Clone)]
pub struct MySqlStudentRepository {
    pool: MySqlPool,
}

impl MySqlStudentRepository {
    /// Creates a repository from store configuration.
    ///
    /// The pool connects lazily, so an unreachable store surfaces as a
    /// per-request error rather than a startup failure.
    pub fn new(config: &StoreConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy_with(options);

        Self { pool }
    }

    /// Wraps an existing pool.
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Closes the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl StudentRepository for MySqlStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, Student>(SELECT_ALL)
            .fetch_all(&mut *conn)
            .await?;

        debug!("Fetched {} students", rows.len());
        Ok(rows)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Student>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, Student>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row)
    }

    async fn create(&self, student: &StudentPayload) -> Result<(), RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(INSERT)
            .bind(&student.id)
            .bind(&student.paternal_surname)
            .bind(&student.maternal_surname)
            .bind(&student.given_name)
            .bind(&student.sex)
            .bind(&student.birth_date)
            .bind(&student.birth_place)
            .bind(&student.tax_id)
            .bind(&student.national_id)
            .bind(&student.school_id)
            .bind(&student.email)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    async fn update(&self, id: &str, student: &StudentPayload) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query(UPDATE)
            .bind(&student.paternal_surname)
            .bind(&student.maternal_surname)
            .bind(&student.given_name)
            .bind(&student.sex)
            .bind(&student.birth_date)
            .bind(&student.birth_place)
            .bind(&student.tax_id)
            .bind(&student.national_id)
            .bind(&student.school_id)
            .bind(&student.email)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &str) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query(DELETE).bind(id).execute(&mut *conn).await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_are_parameterized() {
        assert_eq!(SELECT_BY_ID.matches('?').count(), 1);
        assert_eq!(INSERT.matches('?').count(), 11);
        assert_eq!(UPDATE.matches('?').count(), 11);
        assert_eq!(DELETE.matches('?').count(), 1);
    }

    #[test]
    fn test_select_aliases_every_student_field() {
        for field in [
            "AS id,",
            "AS paternal_surname",
            "AS maternal_surname",
            "AS given_name",
            "AS sex",
            "AS birth_date",
            "AS birth_place",
            "AS tax_id",
            "AS national_id",
            "AS school_id",
            "AS email",
        ] {
            assert!(SELECT_ALL.contains(field), "missing {}", field);
        }
        assert!(!SELECT_ALL.contains("WHERE"));
    }

    #[test]
    fn test_update_never_touches_identifier() {
        let set_clause = UPDATE.split("WHERE").next().unwrap();
        assert!(!set_clause.contains("aluctr"));
    }
}
