//! Registration and login handlers.
//!
//! ```text
//! POST /register {"email":"ada@example.com","password":"hunter2"}
//! POST /login    email=ada%40example.com&password=hunter2
//! ```
//!
//! Both routes accept JSON or URL-encoded form bodies.

use actix_web::{Either, HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BEARER_TOKEN_TYPE, Credentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_credentials_error;

/// Message returned after a successful registration.
pub const REGISTERED_MESSAGE: &str = "You successfully registered";

/// Email/password body shared by `/register` and `/login`.
///
/// Missing fields deserialise as empty strings so they surface as validation
/// failures rather than payload errors.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "hunter2")]
    pub password: String,
}

impl TryFrom<&CredentialsRequest> for Credentials {
    type Error = crate::domain::CredentialsValidationError;

    fn try_from(value: &CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

type CredentialsPayload = Either<web::Json<CredentialsRequest>, web::Form<CredentialsRequest>>;

fn credentials_from(payload: CredentialsPayload) -> ApiResult<Credentials> {
    let body = match payload {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };
    Credentials::try_from(&body).map_err(map_credentials_error)
}

/// Body of a successful `POST /register`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredResponse {
    #[schema(example = "You successfully registered")]
    pub message: String,
}

/// Body of a successful `POST /login`.
///
/// `token` and `access_token` carry the same value.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    #[schema(example = 86400)]
    pub expires_in: u64,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/register",
    request_body(
        content(
            (CredentialsRequest = "application/json"),
            (CredentialsRequest = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 201, description = "Account created", body = RegisteredResponse),
        (status = 400, description = "Invalid payload or existing account", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: CredentialsPayload,
) -> ApiResult<HttpResponse> {
    let credentials = credentials_from(payload)?;
    state.accounts.register(&credentials).await?;
    Ok(HttpResponse::Created().json(RegisteredResponse {
        message: REGISTERED_MESSAGE.to_owned(),
    }))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    request_body(
        content(
            (CredentialsRequest = "application/json"),
            (CredentialsRequest = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 201, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid payload or wrong credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: CredentialsPayload,
) -> ApiResult<HttpResponse> {
    let credentials = credentials_from(payload)?;
    let token = state.accounts.login(&credentials).await?;
    Ok(HttpResponse::Created().json(TokenResponse {
        token: token.token().to_owned(),
        access_token: token.token().to_owned(),
        token_type: BEARER_TOKEN_TYPE.to_owned(),
        expires_in: token.expires_in_secs(),
    }))
}
