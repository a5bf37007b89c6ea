//! Diesel table definitions for the offences database.
//!
//! The schema is owned by the dataset loader; this service never migrates it.
//! `offences` carries one integer column per offence type. Those columns are
//! not listed here because they are discovered through `offence_columns` and
//! addressed with raw SQL.

diesel::table! {
    /// Registered API accounts.
    users (email) {
        /// Login email, unique.
        email -> Varchar,
        /// bcrypt hash of the account password.
        password -> Varchar,
    }
}

diesel::table! {
    /// Local Government Areas with map coordinates.
    areas (area) {
        /// LGA name.
        area -> Varchar,
        /// Latitude in decimal degrees.
        lat -> Nullable<Float8>,
        /// Longitude in decimal degrees.
        lng -> Nullable<Float8>,
    }
}

diesel::table! {
    /// Offence label to `offences` column mapping.
    offence_columns (pretty) {
        /// Human-readable offence label.
        pretty -> Varchar,
        /// Column in `offences` holding the counts.
        #[sql_name = "column"]
        column_name -> Varchar,
    }
}

diesel::table! {
    /// One row per (area, year, gender, age) bucket.
    offences (id) {
        id -> Int4,
        area -> Varchar,
        age -> Varchar,
        gender -> Varchar,
        year -> Int4,
    }
}
