//! Authenticated offence search.
//!
//! ```text
//! GET /search?offence=Armed%20Robbery&year=2010,2011&area=Brisbane%20City%20Council
//! Authorization: Bearer <token>
//! ```
//!
//! The query string is decoded by hand rather than through `web::Query` so
//! repeated keys and comma-separated lists both accumulate.

use actix_web::{HttpRequest, get, web};
use serde::Serialize;
use tracing::debug;
use url::form_urlencoded;
use utoipa::ToSchema;

use crate::domain::{AreaTotal, SearchOutcome, SearchRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_search_error;

/// Normalised search parameters echoed back to the client.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchQueryEcho {
    #[schema(example = "Armed Robbery")]
    pub offence: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub year: Vec<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gender: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub age: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub area: Vec<String>,
}

impl From<&SearchRequest> for SearchQueryEcho {
    fn from(request: &SearchRequest) -> Self {
        let filters = request.filters();
        Self {
            offence: request.offence().to_owned(),
            year: filters.years().to_vec(),
            gender: filters.genders().to_vec(),
            age: filters.ages().to_vec(),
            area: filters.areas().to_vec(),
        }
    }
}

/// One row of the search result.
#[derive(Debug, Serialize, ToSchema)]
pub struct AreaTotalResponse {
    #[serde(rename = "LGA")]
    #[schema(example = "Brisbane City Council")]
    pub lga: String,
    #[schema(example = 42)]
    pub total: i64,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl From<AreaTotal> for AreaTotalResponse {
    fn from(value: AreaTotal) -> Self {
        Self {
            lat: value.area.latitude(),
            lng: value.area.longitude(),
            lga: value.area.name().to_owned(),
            total: value.total,
        }
    }
}

/// Body of `GET /search`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub query: SearchQueryEcho,
    pub result: Vec<AreaTotalResponse>,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            query: SearchQueryEcho::from(&outcome.request),
            result: outcome.totals.into_iter().map(Into::into).collect(),
        }
    }
}

/// Sum one offence per area, optionally filtered by year, gender, age, and
/// area.
#[utoipa::path(
    get,
    path = "/search",
    params(
        ("offence" = String, Query, description = "Offence label from /offences"),
        ("year" = Option<String>, Query, description = "Years, repeatable or comma-separated"),
        ("gender" = Option<String>, Query, description = "Genders, repeatable or comma-separated"),
        ("age" = Option<String>, Query, description = "Age groups, repeatable or comma-separated"),
        ("area" = Option<String>, Query, description = "Areas, repeatable or comma-separated")
    ),
    responses(
        (status = 200, description = "Per-area totals", body = SearchResponse),
        (status = 400, description = "Missing or invalid query", body = ErrorSchema),
        (status = 401, description = "Missing or rejected bearer token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["offences"],
    operation_id = "search",
    security(("BearerToken" = []))
)]
#[get("/search")]
pub async fn search(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    req: HttpRequest,
) -> ApiResult<web::Json<SearchResponse>> {
    let pairs = form_urlencoded::parse(req.query_string().as_bytes());
    let request = SearchRequest::from_query_pairs(pairs).map_err(map_search_error)?;
    debug!(user = %user.email(), offence = request.offence(), "running offence search");
    let outcome = state.offences.search(request).await?;
    Ok(web::Json(outcome.into()))
}
