//! Student DTOs
//!
//! The read model returned by the API and the request body accepted on
//! create and update.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// A student row as stored in the `DALUMN` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Student {
    /// Control number, unique and immutable after creation
    #[schema(example = "A001")]
    pub id: String,
    #[schema(example = "Garcia")]
    pub paternal_surname: String,
    #[schema(example = "Lopez")]
    pub maternal_surname: String,
    #[schema(example = "Ana")]
    pub given_name: String,
    #[schema(example = "F")]
    pub sex: String,
    #[schema(value_type = String, format = Date, example = "2000-01-01")]
    pub birth_date: NaiveDate,
    #[schema(example = "CDMX")]
    pub birth_place: String,
    /// National tax identifier (RFC)
    #[schema(example = "GALA000101XXX")]
    pub tax_id: String,
    /// National personal identifier (CURP)
    #[schema(example = "GALA000101MDFXXX09")]
    pub national_id: String,
    /// School the student belongs to; not checked by this service
    #[schema(example = 1)]
    pub school_id: i64,
    #[schema(example = "ana@example.com")]
    pub email: String,
}

/// Request body for create and update.
///
/// Fields are kept as the text the store will receive: JSON numbers and
/// booleans are rendered as text and absent values stay `None` (sent as
/// `NULL`). Type and `NOT NULL` checks are the store's job. Column names of
/// the `DALUMN` table are accepted as aliases. Update ignores `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentPayload {
    #[serde(default, alias = "aluctr", deserialize_with = "loose_text")]
    pub id: Option<String>,
    #[serde(default, alias = "aluapp", deserialize_with = "loose_text")]
    pub paternal_surname: Option<String>,
    #[serde(default, alias = "aluapm", deserialize_with = "loose_text")]
    pub maternal_surname: Option<String>,
    #[serde(default, alias = "alunom", deserialize_with = "loose_text")]
    pub given_name: Option<String>,
    #[serde(default, alias = "alusex", deserialize_with = "loose_text")]
    pub sex: Option<String>,
    #[serde(default, alias = "alunac", deserialize_with = "loose_text")]
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<String>,
    #[serde(default, alias = "alulna", deserialize_with = "loose_text")]
    pub birth_place: Option<String>,
    #[serde(default, alias = "alurfc", deserialize_with = "loose_text")]
    pub tax_id: Option<String>,
    #[serde(default, alias = "alucur", deserialize_with = "loose_text")]
    pub national_id: Option<String>,
    #[serde(default, alias = "aluesc", deserialize_with = "loose_text")]
    #[schema(value_type = Option<i64>)]
    pub school_id: Option<String>,
    #[serde(default, alias = "alumai", deserialize_with = "loose_text")]
    pub email: Option<String>,
}

impl StudentPayload {
    /// Reads a payload from already-parsed body fields.
    ///
    /// A body that is not an object carries no fields, so every column is
    /// sent as `NULL`.
    pub fn from_fields(fields: Value) -> Result<Self, serde_json::Error> {
        match fields {
            Value::Object(_) => serde_json::from_value(fields),
            _ => Ok(Self::default()),
        }
    }
}

/// Renders any JSON scalar as the text bound into the statement.
fn to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(if flag { "1" } else { "0" }.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(to_text))
}

impl From<Student> for StudentPayload {
    fn from(student: Student) -> Self {
        Self {
            id: Some(student.id),
            paternal_surname: Some(student.paternal_surname),
            maternal_surname: Some(student.maternal_surname),
            given_name: Some(student.given_name),
            sex: Some(student.sex),
            birth_date: Some(student.birth_date.to_string()),
            birth_place: Some(student.birth_place),
            tax_id: Some(student.tax_id),
            national_id: Some(student.national_id),
            school_id: Some(student.school_id.to_string()),
            email: Some(student.email),
        }
    }
}
