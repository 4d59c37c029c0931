//! Calls that do not need a user token: login, registration and the
//! timezone list.
//!
//! # Design
//! These go through the same request and decode path as `TodoistClient`, but
//! a failed exchange is reported as `ServiceUnavailable` since there is no
//! user session to blame. The timezone list is memoized in a `ResponseCache`
//! supplied by the caller; it is kept for the lifetime of the cache and never
//! expires.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::debug;

use crate::client::{build_get, decode, normalize_base_url, DEFAULT_BASE_URL};
use crate::error::{ApiError, AuthError, Result};
use crate::http::{fetch, Transport};
use crate::params::Params;
use crate::protocol::{classify, Reply, LOGIN_ERROR, REGISTER_SENTINELS};
use crate::types::Registration;

pub const TIMEZONES_CACHE_KEY: &str = "todoist.timezones";

/// Decoded responses keyed by a fixed cache key. No eviction.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, Value>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    /// Store `value` unless another caller got there first; returns the stored value.
    pub fn insert(&self, key: &str, value: Value) -> Value {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.entry(key.to_string()).or_insert(value).clone()
    }

    pub fn contains(&self, key: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.contains_key(key)
    }
}

/// Unauthenticated account operations.
#[derive(Clone)]
pub struct Accounts {
    base_url: String,
    transport: Arc<dyn Transport>,
    cache: Arc<ResponseCache>,
}

impl Accounts {
    pub fn new(transport: Arc<dyn Transport>, cache: Arc<ResponseCache>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            transport,
            cache,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    fn call(&self, method: &str, params: Params) -> Result<Value> {
        let request = build_get(&self.base_url, method, &params);
        debug!(method, "dispatching unauthenticated Todoist request");
        let body = fetch(self.transport.as_ref(), &request).map_err(|e| {
            ApiError::ServiceUnavailable {
                method: method.to_string(),
                reason: e.0,
            }
        })?;
        decode(method, &body)
    }

    /// Returns the user's profile, including their API token.
    pub fn login(&self, email: &str, password: &str) -> Result<Value> {
        let params = Params::new()
            .with("email", email)
            .with("password", password);
        let value = self.call("login", params)?;
        match classify(value, &[(LOGIN_ERROR, AuthError::InvalidCredentials)]) {
            Reply::Data(profile) => Ok(profile),
            Reply::Rejected(kind) => Err(kind.into()),
            Reply::Unrecognized(s) => Ok(Value::String(s)),
        }
    }

    pub fn register(&self, registration: &Registration) -> Result<Value> {
        let params = Params::new()
            .with("email", &registration.email)
            .with("full_name", &registration.full_name)
            .with("password", &registration.password)
            .with("timezone", &registration.timezone);
        match classify(self.call("register", params)?, REGISTER_SENTINELS) {
            Reply::Data(profile) => Ok(profile),
            Reply::Rejected(kind) => Err(ApiError::Service(kind)),
            Reply::Unrecognized(s) => Err(ApiError::UnknownService(s)),
        }
    }

    /// The list of timezones the service accepts, fetched at most once per cache.
    pub fn timezones(&self) -> Result<Value> {
        if let Some(cached) = self.cache.get(TIMEZONES_CACHE_KEY) {
            debug!("timezone list served from cache");
            return Ok(cached);
        }
        let value = self.call("getTimezones", Params::new())?;
        Ok(self.cache.insert(TIMEZONES_CACHE_KEY, value))
    }
}
