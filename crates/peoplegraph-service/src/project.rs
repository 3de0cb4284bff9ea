//! Result projection: untyped store records into typed output records.
//!
//! Deserializing into [`Person`] / [`City`] keeps only the modeled
//! attributes. Anything else a backend happens to return (element ids,
//! labels, stray properties) is dropped here.

use serde::de::DeserializeOwned;

use crate::error::ServiceError;
use crate::query::{CITY_COLUMN, PERSON_COLUMN, TOTAL_COLUMN};
use crate::store::Record;
use crate::types::{City, Person};

fn project<T: DeserializeOwned>(record: &Record, column: &str) -> Result<T, ServiceError> {
    let value = record
        .get(column)
        .ok_or_else(|| ServiceError::Projection(format!("missing column '{column}'")))?;
    T::deserialize(value).map_err(|e| ServiceError::Projection(format!("column '{column}': {e}")))
}

/// Projects a person row (own attributes plus the linked city's name).
pub fn project_person(record: &Record) -> Result<Person, ServiceError> {
    project(record, PERSON_COLUMN)
}

/// Projects a city row.
pub fn project_city(record: &Record) -> Result<City, ServiceError> {
    project(record, CITY_COLUMN)
}

/// Projects a count row.
pub fn project_total(record: &Record) -> Result<i64, ServiceError> {
    project(record, TOTAL_COLUMN)
}
