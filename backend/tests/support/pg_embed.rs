//! Embedded PostgreSQL for adapter integration tests.
//!
//! Every test gets its own database on the cluster shared by the test binary.
//! The dataset tables are created here because the service never migrates
//! its own schema.
//!
//! Starting the cluster needs the PostgreSQL binaries, which
//! `pg-embed-setup-unpriv` downloads on first use. When the cluster cannot
//! start the suites print a `SKIP-TEST-CLUSTER` marker and return early;
//! set `REQUIRE_TEST_CLUSTER=1` to turn that into a failure.

use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use postgres::{Client, NoTls};
use uuid::Uuid;

/// Tables as the dataset loader creates them. `armedRobbery` is quoted so the
/// column keeps its mixed case.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE users (
    email VARCHAR PRIMARY KEY,
    password VARCHAR NOT NULL
);
CREATE TABLE areas (
    area VARCHAR PRIMARY KEY,
    lat DOUBLE PRECISION,
    lng DOUBLE PRECISION
);
CREATE TABLE offence_columns (
    pretty VARCHAR PRIMARY KEY,
    "column" VARCHAR NOT NULL
);
CREATE TABLE offences (
    id SERIAL PRIMARY KEY,
    area VARCHAR NOT NULL,
    age VARCHAR NOT NULL,
    gender VARCHAR NOT NULL,
    year INTEGER NOT NULL,
    "armedRobbery" INTEGER NOT NULL DEFAULT 0,
    arson INTEGER NOT NULL DEFAULT 0
);
"#;

/// Returns true when `REQUIRE_TEST_CLUSTER` is "1", "true" or "yes".
pub fn cluster_required() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip the calling test, or fail it when the cluster is required.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if cluster_required() {
        panic!("Test cluster setup failed: {reason}. Unset REQUIRE_TEST_CLUSTER to skip.");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}

/// Render a `postgres` error with its SQLSTATE and message.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    match error.as_db_error() {
        Some(db_error) => format!(
            "postgres error {:?}: {}",
            db_error.code(),
            db_error.message()
        ),
        None => error.to_string(),
    }
}

/// Create a fresh database with the dataset tables and return its URL.
///
/// Must be called outside a Tokio runtime because `postgres::Client` blocks.
pub fn provision_database() -> Result<String, String> {
    let cluster = shared_cluster_handle().map_err(|err| format!("start cluster: {err:?}"))?;
    let name = format!("offences_test_{}", Uuid::new_v4().simple());
    cluster
        .create_database(name.as_str())
        .map_err(|err| format!("create database: {err:?}"))?;
    let url = cluster.connection().database_url(&name);
    run_sql(&url, SCHEMA_SQL)?;
    Ok(url)
}

/// Execute `sql` as one batch against `url`.
pub fn run_sql(url: &str, sql: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(sql)
        .map_err(|err| format_postgres_error(&err))
}
