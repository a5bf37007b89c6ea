//! Driven port for reading the offence dataset.
//!
//! Adapters own the SQL; the domain only sees labels, areas, and per-area
//! totals.

use async_trait::async_trait;

use crate::domain::{Area, AreaTotal, OffenceColumn, SearchFilters};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading offence statistics.
    pub enum OffenceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "offence store connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "offence store query failed: {message}",
    }
}

/// Port for offence dataset reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OffenceRepository: Send + Sync {
    /// Every known offence label with its column, ordered by label.
    async fn list_offence_columns(&self) -> Result<Vec<OffenceColumn>, OffenceRepositoryError>;

    /// Resolve a human-readable offence label to its column.
    async fn find_offence_column(
        &self,
        label: &str,
    ) -> Result<Option<OffenceColumn>, OffenceRepositoryError>;

    /// Every area, ordered by name.
    async fn list_areas(&self) -> Result<Vec<Area>, OffenceRepositoryError>;

    /// Look up one area by exact name.
    async fn find_area(&self, name: &str) -> Result<Option<Area>, OffenceRepositoryError>;

    /// Distinct years present in the dataset, ascending.
    async fn distinct_years(&self) -> Result<Vec<i32>, OffenceRepositoryError>;

    /// Distinct gender values, ascending.
    async fn distinct_genders(&self) -> Result<Vec<String>, OffenceRepositoryError>;

    /// Distinct age groups, ascending.
    async fn distinct_ages(&self) -> Result<Vec<String>, OffenceRepositoryError>;

    /// Sum `column` per area, applying `filters`.
    ///
    /// Results are ordered by area name. Without filters every area appears,
    /// and areas with no offence rows report a total of zero. With filters,
    /// only areas that have matching rows appear.
    async fn sum_by_area(
        &self,
        column: &OffenceColumn,
        filters: &SearchFilters,
    ) -> Result<Vec<AreaTotal>, OffenceRepositoryError>;
}
