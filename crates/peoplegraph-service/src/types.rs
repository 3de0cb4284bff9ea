//! Typed records exchanged between the store boundary and the transports.
//!
//! The store has no enforced schema, so everything read from it is converted
//! into these types by [`crate::project`] before leaving the service layer.

use serde::{Deserialize, Serialize};

/// A person together with the name of the city they live in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Generator-assigned identifier. Not guaranteed to be unique.
    pub person_id: i64,
    /// First name.
    pub name: String,
    /// Age in years.
    pub age: i64,
    /// Name of the city this person lives in.
    pub city: String,
}

/// A city node. The name is its natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct City {
    /// City name.
    pub name: String,
}

/// Attribute values for a person that is about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonFixture {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub city_name: String,
}

/// One page of results from a listing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The resolved (1-based) page number.
    pub page: i64,
    /// Fixed page size.
    pub per_page: i64,
    pub results: Vec<T>,
}
