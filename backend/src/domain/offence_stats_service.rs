//! Offence statistics service implementing [`OffenceStatsQuery`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{OffenceRepository, OffenceRepositoryError, OffenceStatsQuery};
use crate::domain::{
    Area, DATABASE_UNAVAILABLE_MESSAGE, Error, INVALID_QUERY_MESSAGE, SearchOutcome, SearchRequest,
};

/// Read-side service over an [`OffenceRepository`].
#[derive(Clone)]
pub struct OffenceStatsService<R> {
    repo: Arc<R>,
}

impl<R> OffenceStatsService<R> {
    /// Create a new service backed by `repo`.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_repository_error(error: OffenceRepositoryError) -> Error {
    debug!(%error, "offence repository call failed");
    match error {
        OffenceRepositoryError::Connection { .. } => {
            Error::service_unavailable(DATABASE_UNAVAILABLE_MESSAGE)
        }
        OffenceRepositoryError::Query { message } => {
            Error::internal(format!("offence repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> OffenceStatsQuery for OffenceStatsService<R>
where
    R: OffenceRepository,
{
    async fn offence_labels(&self) -> Result<Vec<String>, Error> {
        let columns = self
            .repo
            .list_offence_columns()
            .await
            .map_err(map_repository_error)?;
        Ok(columns
            .into_iter()
            .map(|column| column.label().to_owned())
            .collect())
    }

    async fn area_names(&self) -> Result<Vec<String>, Error> {
        let areas = self.repo.list_areas().await.map_err(map_repository_error)?;
        Ok(areas.into_iter().map(|area| area.name().to_owned()).collect())
    }

    async fn years(&self) -> Result<Vec<i32>, Error> {
        self.repo.distinct_years().await.map_err(map_repository_error)
    }

    async fn genders(&self) -> Result<Vec<String>, Error> {
        self.repo
            .distinct_genders()
            .await
            .map_err(map_repository_error)
    }

    async fn ages(&self) -> Result<Vec<String>, Error> {
        self.repo.distinct_ages().await.map_err(map_repository_error)
    }

    async fn area(&self, name: &str) -> Result<Area, Error> {
        self.repo
            .find_area(name)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::not_found("area not found").with_details(json!({ "area": name }))
            })
    }

    async fn search(&self, request: SearchRequest) -> Result<SearchOutcome, Error> {
        let column = self
            .repo
            .find_offence_column(request.offence())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::invalid_request(INVALID_QUERY_MESSAGE).with_details(json!({
                    "field": "offence",
                    "code": "unknown_offence",
                }))
            })?;

        let totals = self
            .repo
            .sum_by_area(&column, request.filters())
            .await
            .map_err(map_repository_error)?;
        debug!(
            offence = request.offence(),
            column = column.column(),
            areas = totals.len(),
            "offence search completed"
        );
        Ok(SearchOutcome { request, totals })
    }
}

#[cfg(test)]
#[path = "offence_stats_service_tests.rs"]
mod tests;
