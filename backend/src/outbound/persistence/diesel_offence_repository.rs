//! PostgreSQL-backed offence statistics adapter.
//!
//! Lookups go through the Diesel DSL. The per-area sum is raw SQL because the
//! summed column is chosen at runtime; the column name is validated by
//! [`OffenceColumn`] and quoted, and every filter value is a bound parameter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Array, Integer, Nullable, Text};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OffenceRepository, OffenceRepositoryError};
use crate::domain::{Area, AreaTotal, OffenceColumn, SearchFilters};

use super::diesel_helpers::{collect_rows, map_basic_diesel_error, map_pool_error_message};
use super::models::{AreaRow, AreaTotalRow, OffenceColumnRow};
use super::pool::{DbPool, PoolError};
use super::schema::{areas, offence_columns, offences};

/// Diesel-backed implementation of [`OffenceRepository`].
#[derive(Clone)]
pub struct DieselOffenceRepository {
    pool: DbPool,
}

impl DieselOffenceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OffenceRepositoryError {
    OffenceRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(operation: &'static str) -> impl Fn(diesel::result::Error) -> OffenceRepositoryError {
    move |error| {
        map_basic_diesel_error(
            error,
            operation,
            OffenceRepositoryError::query,
            OffenceRepositoryError::connection,
        )
    }
}

fn row_to_offence_column(row: OffenceColumnRow) -> Result<OffenceColumn, String> {
    OffenceColumn::new(row.column_name, row.pretty).map_err(|err| err.to_string())
}

fn row_to_area(row: AreaRow) -> Result<Area, String> {
    Area::new(row.area, row.lat, row.lng).map_err(|err| err.to_string())
}

fn row_to_area_total(row: AreaTotalRow) -> Result<AreaTotal, String> {
    let area = Area::new(row.area, row.lat, row.lng).map_err(|err| err.to_string())?;
    Ok(AreaTotal {
        area,
        total: row.total,
    })
}

/// Build the per-area sum statement for `column`.
///
/// Binds, in order: years, genders, ages, areas. A NULL bind disables that
/// filter.
fn sum_by_area_sql(column: &OffenceColumn) -> String {
    format!(
        r#"
SELECT areas.area AS area,
       CAST(areas.lat AS DOUBLE PRECISION) AS lat,
       CAST(areas.lng AS DOUBLE PRECISION) AS lng,
       CAST(COALESCE(SUM(offences."{column}"), 0) AS BIGINT) AS total
FROM areas
LEFT JOIN offences ON offences.area = areas.area
WHERE ($1 IS NULL OR offences.year = ANY($1))
  AND ($2 IS NULL OR offences.gender = ANY($2))
  AND ($3 IS NULL OR offences.age = ANY($3))
  AND ($4 IS NULL OR offences.area = ANY($4))
GROUP BY areas.area, areas.lat, areas.lng
ORDER BY areas.area
"#,
        column = column.column()
    )
}

fn non_empty<T: Clone>(values: &[T]) -> Option<Vec<T>> {
    (!values.is_empty()).then(|| values.to_vec())
}

#[async_trait]
impl OffenceRepository for DieselOffenceRepository {
    async fn list_offence_columns(&self) -> Result<Vec<OffenceColumn>, OffenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<OffenceColumnRow> = offence_columns::table
            .select(OffenceColumnRow::as_select())
            .order_by(offence_columns::pretty)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("list offence columns"))?;
        collect_rows(
            rows.into_iter().map(row_to_offence_column),
            OffenceRepositoryError::query,
        )
    }

    async fn find_offence_column(
        &self,
        label: &str,
    ) -> Result<Option<OffenceColumn>, OffenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<OffenceColumnRow> = offence_columns::table
            .filter(offence_columns::pretty.eq(label))
            .select(OffenceColumnRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error("find offence column"))?;
        row.map(row_to_offence_column)
            .transpose()
            .map_err(OffenceRepositoryError::query)
    }

    async fn list_areas(&self) -> Result<Vec<Area>, OffenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AreaRow> = areas::table
            .select(AreaRow::as_select())
            .order_by(areas::area)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("list areas"))?;
        collect_rows(rows.into_iter().map(row_to_area), OffenceRepositoryError::query)
    }

    async fn find_area(&self, name: &str) -> Result<Option<Area>, OffenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AreaRow> = areas::table
            .filter(areas::area.eq(name))
            .select(AreaRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error("find area"))?;
        row.map(row_to_area)
            .transpose()
            .map_err(OffenceRepositoryError::query)
    }

    async fn distinct_years(&self) -> Result<Vec<i32>, OffenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        offences::table
            .select(offences::year)
            .distinct()
            .order_by(offences::year)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("distinct years"))
    }

    async fn distinct_genders(&self) -> Result<Vec<String>, OffenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        offences::table
            .select(offences::gender)
            .distinct()
            .order_by(offences::gender)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("distinct genders"))
    }

    async fn distinct_ages(&self) -> Result<Vec<String>, OffenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        offences::table
            .select(offences::age)
            .distinct()
            .order_by(offences::age)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("distinct ages"))
    }

    async fn sum_by_area(
        &self,
        column: &OffenceColumn,
        filters: &SearchFilters,
    ) -> Result<Vec<AreaTotal>, OffenceRepositoryError> {
        let statement = sum_by_area_sql(column);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AreaTotalRow> = sql_query(statement)
            .bind::<Nullable<Array<Integer>>, _>(non_empty(filters.years()))
            .bind::<Nullable<Array<Text>>, _>(non_empty(filters.genders()))
            .bind::<Nullable<Array<Text>>, _>(non_empty(filters.ages()))
            .bind::<Nullable<Array<Text>>, _>(non_empty(filters.areas()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("sum offences by area"))?;
        collect_rows(
            rows.into_iter().map(row_to_area_total),
            OffenceRepositoryError::query,
        )
    }
}
