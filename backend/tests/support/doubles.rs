//! In-memory implementations of the driven ports.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use offences_api::domain::ports::{
    OffenceRepository, OffenceRepositoryError, UserPersistenceError, UserRepository,
};
use offences_api::domain::{Area, AreaTotal, Email, OffenceColumn, SearchFilters, User};

/// One row of the wide offences table.
#[derive(Debug, Clone)]
pub struct OffenceRow {
    pub area: &'static str,
    pub year: i32,
    pub gender: &'static str,
    pub age: &'static str,
    pub counts: &'static [(&'static str, i64)],
}

impl OffenceRow {
    fn count(&self, column: &str) -> i64 {
        self.counts
            .iter()
            .find(|(name, _)| *name == column)
            .map_or(0, |(_, count)| *count)
    }

    fn matches(&self, filters: &SearchFilters) -> bool {
        fn allowed(values: &[String], value: &str) -> bool {
            values.is_empty() || values.iter().any(|candidate| candidate == value)
        }
        (filters.years().is_empty() || filters.years().contains(&self.year))
            && allowed(filters.genders(), self.gender)
            && allowed(filters.ages(), self.age)
            && allowed(filters.areas(), self.area)
    }
}

/// Failure mode applied to every repository call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Connection,
    Query,
}

/// Offence dataset held in memory, mirroring the PostgreSQL adapter's
/// ordering and filtering rules.
pub struct InMemoryOffenceRepository {
    columns: Vec<OffenceColumn>,
    areas: Vec<Area>,
    rows: Vec<OffenceRow>,
    failure: Option<Failure>,
}

impl InMemoryOffenceRepository {
    /// Two offences, three areas (one without any rows), and four rows.
    pub fn seeded() -> Self {
        let column = |name: &str, label: &str| {
            OffenceColumn::new(name, label).expect("fixture column is valid")
        };
        let area = |name: &str, lat: f64, lng: f64| {
            Area::new(name, Some(lat), Some(lng)).expect("fixture area is valid")
        };
        Self {
            columns: vec![
                column("armedRobbery", "Armed Robbery"),
                column("arson", "Arson"),
            ],
            areas: vec![
                area("Brisbane City Council", -27.4698, 153.0251),
                area("Cairns Regional Council", -16.9186, 145.7781),
                area("Longreach Regional Council", -23.4420, 144.2490),
            ],
            rows: vec![
                OffenceRow {
                    area: "Brisbane City Council",
                    year: 2010,
                    gender: "Male",
                    age: "Adult",
                    counts: &[("armedRobbery", 30), ("arson", 4)],
                },
                OffenceRow {
                    area: "Brisbane City Council",
                    year: 2011,
                    gender: "Female",
                    age: "Juvenile",
                    counts: &[("armedRobbery", 5), ("arson", 1)],
                },
                OffenceRow {
                    area: "Cairns Regional Council",
                    year: 2010,
                    gender: "Female",
                    age: "Adult",
                    counts: &[("armedRobbery", 2), ("arson", 0)],
                },
                OffenceRow {
                    area: "Cairns Regional Council",
                    year: 2012,
                    gender: "Male",
                    age: "Adult",
                    counts: &[("armedRobbery", 8), ("arson", 3)],
                },
            ],
            failure: None,
        }
    }

    /// Make every call fail.
    pub fn failing(failure: Failure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::seeded()
        }
    }

    fn check(&self) -> Result<(), OffenceRepositoryError> {
        match self.failure {
            Some(Failure::Connection) => Err(OffenceRepositoryError::connection("pool timed out")),
            Some(Failure::Query) => Err(OffenceRepositoryError::query(
                "relation \"offences\" does not exist",
            )),
            None => Ok(()),
        }
    }

    fn distinct<T: Ord + Clone>(&self, pick: impl Fn(&OffenceRow) -> T) -> Vec<T> {
        let mut values: Vec<T> = self.rows.iter().map(pick).collect();
        values.sort();
        values.dedup();
        values
    }
}

#[async_trait]
impl OffenceRepository for InMemoryOffenceRepository {
    async fn list_offence_columns(&self) -> Result<Vec<OffenceColumn>, OffenceRepositoryError> {
        self.check()?;
        Ok(self.columns.clone())
    }

    async fn find_offence_column(
        &self,
        label: &str,
    ) -> Result<Option<OffenceColumn>, OffenceRepositoryError> {
        self.check()?;
        Ok(self.columns.iter().find(|c| c.label() == label).cloned())
    }

    async fn list_areas(&self) -> Result<Vec<Area>, OffenceRepositoryError> {
        self.check()?;
        Ok(self.areas.clone())
    }

    async fn find_area(&self, name: &str) -> Result<Option<Area>, OffenceRepositoryError> {
        self.check()?;
        Ok(self.areas.iter().find(|a| a.name() == name).cloned())
    }

    async fn distinct_years(&self) -> Result<Vec<i32>, OffenceRepositoryError> {
        self.check()?;
        Ok(self.distinct(|row| row.year))
    }

    async fn distinct_genders(&self) -> Result<Vec<String>, OffenceRepositoryError> {
        self.check()?;
        Ok(self.distinct(|row| row.gender.to_owned()))
    }

    async fn distinct_ages(&self) -> Result<Vec<String>, OffenceRepositoryError> {
        self.check()?;
        Ok(self.distinct(|row| row.age.to_owned()))
    }

    async fn sum_by_area(
        &self,
        column: &OffenceColumn,
        filters: &SearchFilters,
    ) -> Result<Vec<AreaTotal>, OffenceRepositoryError> {
        self.check()?;
        let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
        if filters.is_empty() {
            for area in &self.areas {
                totals.insert(area.name(), 0);
            }
        }
        for row in self.rows.iter().filter(|row| row.matches(filters)) {
            *totals.entry(row.area).or_insert(0) += row.count(column.column());
        }
        Ok(totals
            .into_iter()
            .filter_map(|(name, total)| {
                self.areas
                    .iter()
                    .find(|area| area.name() == name)
                    .map(|area| AreaTotal {
                        area: area.clone(),
                        total,
                    })
            })
            .collect())
    }
}

/// User store keyed by email.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<BTreeMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.lock().expect("user store lock");
        let key = user.email().as_ref().to_owned();
        if users.contains_key(&key) {
            return Err(UserPersistenceError::duplicate_email(key));
        }
        users.insert(key, user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.lock().expect("user store lock");
        Ok(users.get(email.as_ref()).cloned())
    }
}
