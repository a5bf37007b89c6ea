//! Offence dataset read model.
//!
//! The dataset is a wide table: one row per (area, year, gender, age) bucket
//! and one integer column per offence type. `offence_columns` maps each
//! human-readable offence label to its column.

mod search;

pub use search::{
    Dimension, INVALID_QUERY_MESSAGE, OFFENCE_KEY, SearchFilters, SearchRequest,
    SearchValidationError,
};

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Validation errors raised when building offence read-model values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OffenceValidationError {
    EmptyLabel,
    InvalidColumn { column: String },
    EmptyAreaName,
}

impl fmt::Display for OffenceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "offence label must not be empty"),
            Self::InvalidColumn { column } => {
                write!(f, "offence column `{column}` is not a plain identifier")
            }
            Self::EmptyAreaName => write!(f, "area name must not be empty"),
        }
    }
}

impl std::error::Error for OffenceValidationError {}

static COLUMN_RE: OnceLock<Regex> = OnceLock::new();

fn column_regex() -> &'static Regex {
    COLUMN_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z_][A-Za-z0-9_]*$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("offence column regex failed to compile: {error}"))
    })
}

/// Mapping between an offence label and its column in the offences table.
///
/// ## Invariants
/// - `column` is a plain SQL identifier, so adapters may quote and splice it
///   into a statement.
/// - `label` is non-empty.
///
/// # Examples
/// ```
/// use offences_api::domain::OffenceColumn;
///
/// let column = OffenceColumn::new("armedRobbery", "Armed Robbery").unwrap();
/// assert_eq!(column.column(), "armedRobbery");
/// assert!(OffenceColumn::new("x; DROP TABLE users", "Bad").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffenceColumn {
    column: String,
    label: String,
}

impl OffenceColumn {
    /// Validate and construct a column mapping.
    pub fn new(
        column: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<Self, OffenceValidationError> {
        let column = column.into();
        let label = label.into();
        if label.trim().is_empty() {
            return Err(OffenceValidationError::EmptyLabel);
        }
        if !column_regex().is_match(&column) {
            return Err(OffenceValidationError::InvalidColumn { column });
        }
        Ok(Self { column, label })
    }

    /// Column name in the offences table.
    pub fn column(&self) -> &str {
        self.column.as_str()
    }

    /// Human-readable offence label.
    pub fn label(&self) -> &str {
        self.label.as_str()
    }
}

/// Local Government Area with optional map coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    name: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl Area {
    /// Build an area record.
    pub fn new(
        name: impl Into<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Self, OffenceValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(OffenceValidationError::EmptyAreaName);
        }
        Ok(Self {
            name,
            latitude,
            longitude,
        })
    }

    /// LGA name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }
}

/// Summed offence count for one area.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaTotal {
    pub area: Area,
    pub total: i64,
}

/// Outcome of a search: the normalised request plus per-area totals ordered by
/// area name.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub request: SearchRequest,
    pub totals: Vec<AreaTotal>,
}
