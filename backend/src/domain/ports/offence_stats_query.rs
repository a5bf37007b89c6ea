//! Driving port for offence statistics use-cases.
//!
//! HTTP handlers call this port and never touch the repository directly, so
//! handler tests can substitute an in-memory double.

use async_trait::async_trait;

use crate::domain::{Area, Error, SearchOutcome, SearchRequest};

/// Read-only queries over the offence dataset.
#[async_trait]
pub trait OffenceStatsQuery: Send + Sync {
    /// Human-readable offence labels.
    async fn offence_labels(&self) -> Result<Vec<String>, Error>;

    /// Area (LGA) names.
    async fn area_names(&self) -> Result<Vec<String>, Error>;

    /// Distinct years, ascending.
    async fn years(&self) -> Result<Vec<i32>, Error>;

    /// Distinct genders, ascending.
    async fn genders(&self) -> Result<Vec<String>, Error>;

    /// Distinct age groups, ascending.
    async fn ages(&self) -> Result<Vec<String>, Error>;

    /// One area with its coordinates; `not_found` when unknown.
    async fn area(&self, name: &str) -> Result<Area, Error>;

    /// Per-area totals for one offence under the request's filters.
    async fn search(&self, request: SearchRequest) -> Result<SearchOutcome, Error>;
}
