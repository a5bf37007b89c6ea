//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Nullable, Text};

use super::schema::{areas, offence_columns, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub email: String,
    pub password: String,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = areas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AreaRow {
    pub area: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = offence_columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OffenceColumnRow {
    pub pretty: String,
    pub column_name: String,
}

/// Result row of the per-area sum query.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct AreaTotalRow {
    #[diesel(sql_type = Text)]
    pub area: String,
    #[diesel(sql_type = Nullable<Double>)]
    pub lat: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub lng: Option<f64>,
    #[diesel(sql_type = BigInt)]
    pub total: i64,
}
