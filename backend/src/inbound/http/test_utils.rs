//! In-memory port doubles for HTTP handler tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::ports::{AccessTokenError, AccessTokens, AccountService, OffenceStatsQuery};
use crate::domain::{
    AccessToken, Area, AreaTotal, Credentials, Email, Error, INVALID_QUERY_MESSAGE,
    SearchOutcome, SearchRequest, USER_EXISTS_MESSAGE, WRONG_CREDENTIALS_MESSAGE,
};
use crate::inbound::http::state::HttpState;

/// Token accepted by [`StubTokens`]; its subject is `ada@example.com`.
pub const VALID_TOKEN: &str = "header.payload.signature";
/// Subject of [`VALID_TOKEN`].
pub const TOKEN_SUBJECT: &str = "ada@example.com";

fn area(name: &str, lat: f64, lng: f64) -> Area {
    Area::new(name, Some(lat), Some(lng)).unwrap_or_else(|err| panic!("fixture area: {err}"))
}

/// Fixed offence dataset.
#[derive(Default)]
pub struct StubOffenceStats {
    failure: Option<Error>,
}

impl StubOffenceStats {
    /// A double whose every call fails with `error`.
    pub fn failing(error: Error) -> Self {
        Self {
            failure: Some(error),
        }
    }

    fn check(&self) -> Result<(), Error> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn areas() -> Vec<Area> {
        vec![
            area("Brisbane City Council", -27.4698, 153.0251),
            area("Cairns Regional Council", -16.9186, 145.7781),
        ]
    }
}

#[async_trait]
impl OffenceStatsQuery for StubOffenceStats {
    async fn offence_labels(&self) -> Result<Vec<String>, Error> {
        self.check()?;
        Ok(vec!["Armed Robbery".to_owned(), "Arson".to_owned()])
    }

    async fn area_names(&self) -> Result<Vec<String>, Error> {
        self.check()?;
        Ok(Self::areas()
            .into_iter()
            .map(|area| area.name().to_owned())
            .collect())
    }

    async fn years(&self) -> Result<Vec<i32>, Error> {
        self.check()?;
        Ok(vec![2010, 2011, 2012])
    }

    async fn genders(&self) -> Result<Vec<String>, Error> {
        self.check()?;
        Ok(vec!["Female".to_owned(), "Male".to_owned()])
    }

    async fn ages(&self) -> Result<Vec<String>, Error> {
        self.check()?;
        Ok(vec!["Adult".to_owned(), "Juvenile".to_owned()])
    }

    async fn area(&self, name: &str) -> Result<Area, Error> {
        self.check()?;
        Self::areas()
            .into_iter()
            .find(|area| area.name() == name)
            .ok_or_else(|| Error::not_found("area not found"))
    }

    async fn search(&self, request: SearchRequest) -> Result<SearchOutcome, Error> {
        self.check()?;
        if !matches!(request.offence(), "Armed Robbery" | "Arson") {
            return Err(Error::invalid_request(INVALID_QUERY_MESSAGE));
        }
        let wanted = request.filters().areas();
        let totals = Self::areas()
            .into_iter()
            .filter(|area| wanted.is_empty() || wanted.iter().any(|name| name == area.name()))
            .zip([42_i64, 7])
            .map(|(area, total)| AreaTotal { area, total })
            .collect();
        Ok(SearchOutcome { request, totals })
    }
}

/// In-memory account store. Every successful login returns [`VALID_TOKEN`].
#[derive(Default)]
pub struct StubAccounts {
    users: Mutex<HashMap<String, String>>,
}

impl StubAccounts {
    /// Seed an existing account.
    pub fn with_user(email: &str, password: &str) -> Self {
        let accounts = Self::default();
        accounts
            .users
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(email.to_owned(), password.to_owned());
        accounts
    }
}

#[async_trait]
impl AccountService for StubAccounts {
    async fn register(&self, credentials: &Credentials) -> Result<Email, Error> {
        let mut users = self
            .users
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let key = credentials.email().as_ref().to_owned();
        if users.contains_key(&key) {
            return Err(Error::invalid_request(USER_EXISTS_MESSAGE));
        }
        users.insert(key, credentials.password().to_owned());
        Ok(credentials.email().clone())
    }

    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, Error> {
        let users = self
            .users
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match users.get(credentials.email().as_ref()) {
            Some(stored) if stored == credentials.password() => {
                Ok(AccessToken::new(VALID_TOKEN, 86_400))
            }
            _ => Err(Error::invalid_request(WRONG_CREDENTIALS_MESSAGE)),
        }
    }
}

/// Token double accepting only [`VALID_TOKEN`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StubTokens;

impl AccessTokens for StubTokens {
    fn issue(&self, _email: &Email) -> Result<AccessToken, AccessTokenError> {
        Ok(AccessToken::new(VALID_TOKEN, 86_400))
    }

    fn verify(&self, token: &str) -> Result<Email, AccessTokenError> {
        if token == VALID_TOKEN {
            Email::new(TOKEN_SUBJECT).map_err(|err| AccessTokenError::invalid(err.to_string()))
        } else {
            Err(AccessTokenError::invalid("unknown token"))
        }
    }
}

/// State wired with default doubles.
pub fn test_state() -> HttpState {
    state_with(StubOffenceStats::default(), StubAccounts::default())
}

/// State wired with the given offence and account doubles.
pub fn state_with(offences: StubOffenceStats, accounts: StubAccounts) -> HttpState {
    HttpState::new(Arc::new(offences), Arc::new(accounts), Arc::new(StubTokens))
}
