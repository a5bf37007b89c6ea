//! Search request model: an offence label plus per-dimension filters.

use std::fmt;

/// Query key naming the offence label.
pub const OFFENCE_KEY: &str = "offence";

/// Client-facing message for a search that cannot be answered as asked.
pub const INVALID_QUERY_MESSAGE: &str = "invalid query";

/// Offence table columns a search may filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Year,
    Gender,
    Age,
    Area,
}

impl Dimension {
    /// Every filterable dimension, in response order.
    pub const ALL: [Self; 4] = [Self::Year, Self::Gender, Self::Age, Self::Area];

    /// Query key and column name for the dimension.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Area => "area",
        }
    }

    /// Resolve a query key to a dimension.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dimension| dimension.as_str() == key)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a search request is rejected before touching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchValidationError {
    /// No (or a blank) `offence` parameter was supplied.
    MissingOffence,
    /// More than one `offence` parameter was supplied.
    DuplicateOffence,
    /// A parameter did not name a filterable dimension.
    UnknownFilter { key: String },
    /// A `year` value was not an integer.
    InvalidYear { value: String },
}

impl SearchValidationError {
    /// Name of the offending query parameter.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingOffence | Self::DuplicateOffence => OFFENCE_KEY,
            Self::UnknownFilter { key } => key.as_str(),
            Self::InvalidYear { .. } => Dimension::Year.as_str(),
        }
    }
}

impl fmt::Display for SearchValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOffence => write!(f, "missing offence query"),
            Self::DuplicateOffence => write!(f, "offence may only be given once"),
            Self::UnknownFilter { key } => write!(f, "unknown filter `{key}`"),
            Self::InvalidYear { value } => write!(f, "year `{value}` is not an integer"),
        }
    }
}

impl std::error::Error for SearchValidationError {}

/// Filter values per dimension. Empty lists mean "no filter".
///
/// Values keep first-seen order and duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    years: Vec<i32>,
    genders: Vec<String>,
    ages: Vec<String>,
    areas: Vec<String>,
}

fn push_unique<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}

impl SearchFilters {
    /// Add one raw value for `dimension`.
    pub fn push(&mut self, dimension: Dimension, raw: &str) -> Result<(), SearchValidationError> {
        let value = raw.trim();
        if value.is_empty() {
            return Ok(());
        }
        match dimension {
            Dimension::Year => {
                let year = value
                    .parse::<i32>()
                    .map_err(|_| SearchValidationError::InvalidYear {
                        value: value.to_owned(),
                    })?;
                push_unique(&mut self.years, year);
            }
            Dimension::Gender => push_unique(&mut self.genders, value.to_owned()),
            Dimension::Age => push_unique(&mut self.ages, value.to_owned()),
            Dimension::Area => push_unique(&mut self.areas, value.to_owned()),
        }
        Ok(())
    }

    /// Years to include.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Genders to include.
    pub fn genders(&self) -> &[String] {
        &self.genders
    }

    /// Age groups to include.
    pub fn ages(&self) -> &[String] {
        &self.ages
    }

    /// Areas to include.
    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    /// True when no dimension is filtered.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
            && self.genders.is_empty()
            && self.ages.is_empty()
            && self.areas.is_empty()
    }
}

/// Validated search request.
///
/// # Examples
/// ```
/// use offences_api::domain::SearchRequest;
///
/// let request = SearchRequest::from_query_pairs([
///     ("offence", "Armed Robbery"),
///     ("year", "2010,2011"),
///     ("year", "2012"),
///     ("gender", "Female"),
/// ])
/// .unwrap();
/// assert_eq!(request.offence(), "Armed Robbery");
/// assert_eq!(request.filters().years(), &[2010, 2011, 2012]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    offence: String,
    filters: SearchFilters,
}

impl SearchRequest {
    /// Build a request from an offence label and prepared filters.
    pub fn new(
        offence: impl Into<String>,
        filters: SearchFilters,
    ) -> Result<Self, SearchValidationError> {
        let offence = offence.into();
        let trimmed = offence.trim();
        if trimmed.is_empty() {
            return Err(SearchValidationError::MissingOffence);
        }
        Ok(Self {
            offence: trimmed.to_owned(),
            filters,
        })
    }

    /// Parse decoded query-string pairs.
    ///
    /// The offence is checked first so a request lacking it reports
    /// [`SearchValidationError::MissingOffence`] even when other parameters
    /// are also wrong. A repeated `offence` key is rejected whatever its
    /// values. Filter values may repeat a key and may be comma-separated.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Result<Self, SearchValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut offence: Option<String> = None;
        let mut filter_pairs = Vec::new();
        let mut duplicate_offence = false;

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            if key == OFFENCE_KEY {
                duplicate_offence |= offence.is_some();
                offence = Some(value.to_owned());
            } else {
                filter_pairs.push((key.to_owned(), value.to_owned()));
            }
        }

        if duplicate_offence {
            return Err(SearchValidationError::DuplicateOffence);
        }
        let offence = offence
            .filter(|label| !label.trim().is_empty())
            .ok_or(SearchValidationError::MissingOffence)?;

        let mut filters = SearchFilters::default();
        for (key, value) in filter_pairs {
            let dimension =
                Dimension::from_key(&key).ok_or(SearchValidationError::UnknownFilter { key })?;
            for part in value.split(',') {
                filters.push(dimension, part)?;
            }
        }

        Self::new(offence, filters)
    }

    /// Offence label as supplied by the client.
    pub fn offence(&self) -> &str {
        self.offence.as_str()
    }

    /// Dimension filters.
    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }
}
