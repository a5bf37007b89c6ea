//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the response and error schemas,
//! and the `BearerToken` security scheme used by `GET /search`. The document
//! backs Swagger UI in debug builds and is printed by the `openapi-dump`
//! binary.

use crate::inbound::http::accounts::{CredentialsRequest, RegisteredResponse, TokenResponse};
use crate::inbound::http::offences::{
    AgesResponse, AreaResponse, AreasResponse, GendersResponse, OffencesResponse, YearsResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::search::{AreaTotalResponse, SearchQueryEcho, SearchResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer-token security scheme.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token returned by POST /login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Queensland offences API",
        description = "Offence counts per Local Government Area, with account registration and bearer-token search."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::offences::welcome,
        crate::inbound::http::offences::list_offences,
        crate::inbound::http::offences::list_areas,
        crate::inbound::http::offences::list_years,
        crate::inbound::http::offences::list_genders,
        crate::inbound::http::offences::list_ages,
        crate::inbound::http::offences::area_detail,
        crate::inbound::http::search::search,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        OffencesResponse,
        AreasResponse,
        YearsResponse,
        GendersResponse,
        AgesResponse,
        AreaResponse,
        SearchResponse,
        SearchQueryEcho,
        AreaTotalResponse,
        CredentialsRequest,
        RegisteredResponse,
        TokenResponse,
    )),
    tags(
        (name = "offences", description = "Offence dataset listings and search"),
        (name = "accounts", description = "Registration and login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
