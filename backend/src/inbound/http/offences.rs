//! Offence dataset listing endpoints.
//!
//! ```text
//! GET /            welcome banner
//! GET /offences    {"offences": ["Armed Robbery", ...]}
//! GET /areas       {"areas": ["Brisbane City Council", ...]}
//! GET /years       {"years": [2001, ...]}
//! GET /genders     {"genders": ["Female", "Male"]}
//! GET /ages        {"ages": ["Adult", "Juvenile"]}
//! GET /area/{council}
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Area;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Plain-text banner served at the root.
pub const WELCOME_MESSAGE: &str = "Welcome to the Queensland Criminal Records API";

/// Body of `GET /offences`.
#[derive(Debug, Serialize, ToSchema)]
pub struct OffencesResponse {
    #[schema(example = json!(["Armed Robbery", "Arson"]))]
    pub offences: Vec<String>,
}

/// Body of `GET /areas`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AreasResponse {
    #[schema(example = json!(["Aurukun Shire Council", "Banana Shire Council"]))]
    pub areas: Vec<String>,
}

/// Body of `GET /years`.
#[derive(Debug, Serialize, ToSchema)]
pub struct YearsResponse {
    #[schema(example = json!([2001, 2002]))]
    pub years: Vec<i32>,
}

/// Body of `GET /genders`.
#[derive(Debug, Serialize, ToSchema)]
pub struct GendersResponse {
    pub genders: Vec<String>,
}

/// Body of `GET /ages`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AgesResponse {
    pub ages: Vec<String>,
}

/// Body of `GET /area/{council}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AreaResponse {
    #[schema(example = "Brisbane City Council")]
    pub area: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl From<Area> for AreaResponse {
    fn from(area: Area) -> Self {
        Self {
            lat: area.latitude(),
            lng: area.longitude(),
            area: area.name().to_owned(),
        }
    }
}

/// Welcome banner.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome banner", body = String, content_type = "text/plain")),
    tags = ["offences"],
    operation_id = "welcome",
    security([])
)]
#[get("/")]
pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(WELCOME_MESSAGE)
}

/// List offence labels accepted by `/search`.
#[utoipa::path(
    get,
    path = "/offences",
    responses(
        (status = 200, description = "Offence labels", body = OffencesResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["offences"],
    operation_id = "listOffences",
    security([])
)]
#[get("/offences")]
pub async fn list_offences(state: web::Data<HttpState>) -> ApiResult<web::Json<OffencesResponse>> {
    let offences = state.offences.offence_labels().await?;
    Ok(web::Json(OffencesResponse { offences }))
}

/// List Local Government Areas.
#[utoipa::path(
    get,
    path = "/areas",
    responses(
        (status = 200, description = "Area names", body = AreasResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["offences"],
    operation_id = "listAreas",
    security([])
)]
#[get("/areas")]
pub async fn list_areas(state: web::Data<HttpState>) -> ApiResult<web::Json<AreasResponse>> {
    let areas = state.offences.area_names().await?;
    Ok(web::Json(AreasResponse { areas }))
}

/// List years present in the dataset.
#[utoipa::path(
    get,
    path = "/years",
    responses(
        (status = 200, description = "Distinct years", body = YearsResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["offences"],
    operation_id = "listYears",
    security([])
)]
#[get("/years")]
pub async fn list_years(state: web::Data<HttpState>) -> ApiResult<web::Json<YearsResponse>> {
    let years = state.offences.years().await?;
    Ok(web::Json(YearsResponse { years }))
}

/// List genders present in the dataset.
#[utoipa::path(
    get,
    path = "/genders",
    responses(
        (status = 200, description = "Distinct genders", body = GendersResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["offences"],
    operation_id = "listGenders",
    security([])
)]
#[get("/genders")]
pub async fn list_genders(state: web::Data<HttpState>) -> ApiResult<web::Json<GendersResponse>> {
    let genders = state.offences.genders().await?;
    Ok(web::Json(GendersResponse { genders }))
}

/// List age groups present in the dataset.
#[utoipa::path(
    get,
    path = "/ages",
    responses(
        (status = 200, description = "Distinct age groups", body = AgesResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["offences"],
    operation_id = "listAges",
    security([])
)]
#[get("/ages")]
pub async fn list_ages(state: web::Data<HttpState>) -> ApiResult<web::Json<AgesResponse>> {
    let ages = state.offences.ages().await?;
    Ok(web::Json(AgesResponse { ages }))
}

/// Look up one area and its coordinates.
#[utoipa::path(
    get,
    path = "/area/{council}",
    params(("council" = String, Path, description = "Exact LGA name")),
    responses(
        (status = 200, description = "Area", body = AreaResponse),
        (status = 404, description = "Unknown area", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["offences"],
    operation_id = "getArea",
    security([])
)]
#[get("/area/{council}")]
pub async fn area_detail(
    state: web::Data<HttpState>,
    council: web::Path<String>,
) -> ApiResult<web::Json<AreaResponse>> {
    let area = state.offences.area(&council.into_inner()).await?;
    Ok(web::Json(area.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::inbound::http::test_utils::{StubAccounts, StubOffenceStats, state_with, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .service(welcome)
            .service(list_offences)
            .service(list_areas)
            .service(list_years)
            .service(list_genders)
            .service(list_ages)
            .service(area_detail)
    }

    async fn get_json(state: HttpState, uri: &str) -> (StatusCode, Value) {
        let app = actix_test::init_service(test_app(state)).await;
        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let response = actix_test::call_service(&app, request).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, serde_json::from_slice(&body).expect("JSON body"))
    }

    #[actix_web::test]
    async fn welcome_is_plain_text() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let request = actix_test::TestRequest::get().uri("/").to_request();
        let body = actix_test::call_and_read_body(&app, request).await;
        assert_eq!(body, WELCOME_MESSAGE.as_bytes());
    }

    #[rstest]
    #[case("/offences", json!({"offences": ["Armed Robbery", "Arson"]}))]
    #[case("/areas", json!({"areas": ["Brisbane City Council", "Cairns Regional Council"]}))]
    #[case("/years", json!({"years": [2010, 2011, 2012]}))]
    #[case("/genders", json!({"genders": ["Female", "Male"]}))]
    #[case("/ages", json!({"ages": ["Adult", "Juvenile"]}))]
    #[actix_web::test]
    async fn listings_wrap_values_in_named_arrays(#[case] uri: &str, #[case] expected: Value) {
        let (status, body) = get_json(test_state(), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected);
    }

    #[actix_web::test]
    async fn area_detail_returns_coordinates() {
        let (status, body) = get_json(test_state(), "/area/Brisbane%20City%20Council").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["area"], "Brisbane City Council");
        assert_eq!(body["lat"], json!(-27.4698));
        assert_eq!(body["lng"], json!(153.0251));
    }

    #[actix_web::test]
    async fn unknown_area_is_404() {
        let (status, body) = get_json(test_state(), "/area/Atlantis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[rstest]
    #[case(Error::service_unavailable("pool timed out"), StatusCode::SERVICE_UNAVAILABLE, "pool timed out")]
    #[case(Error::internal("relation does not exist"), StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")]
    #[actix_web::test]
    async fn database_failures_map_to_json_errors(
        #[case] failure: Error,
        #[case] status: StatusCode,
        #[case] message: &str,
    ) {
        let state = state_with(StubOffenceStats::failing(failure), StubAccounts::default());
        let (actual, body) = get_json(state, "/years").await;
        assert_eq!(actual, status);
        assert_eq!(body["message"], message);
    }
}
