//! One shared client per API token.
//!
//! # Design
//! The registry is an ordinary value owned by the application, not a global.
//! A miss constructs the client and inserts it; a hit hands back the same
//! `Arc` without validating the token again. Construction happens before
//! the insert, so a rejected token never leaves anything behind.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::client::{normalize_base_url, TodoistClient, DEFAULT_BASE_URL};
use crate::config::{Config, TokenSource};
use crate::error::{AuthError, Result};
use crate::http::Transport;

/// Token-keyed store of shared `TodoistClient`s, with an implicit token
/// taken from a `TokenSource`.
pub struct ClientRegistry {
    base_url: String,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenSource>,
    clients: RwLock<HashMap<String, Arc<TodoistClient>>>,
}

impl ClientRegistry {
    pub fn new(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            transport,
            tokens,
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Registry whose implicit token and endpoint both come from `config`.
    pub fn from_config(transport: Arc<dyn Transport>, config: Config) -> Self {
        let base_url = config.base_url.clone();
        Self::new(transport, Arc::new(config)).with_base_url(&base_url)
    }

    /// Endpoint used for clients created after this call.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    /// Client for `token`, or for the configured token when `token` is `None`.
    pub fn get_instance(&self, token: Option<&str>) -> Result<Arc<TodoistClient>> {
        let token = match token {
            Some(token) => token.to_string(),
            None => self.tokens.api_token().ok_or(AuthError::MissingToken)?,
        };

        {
            let clients = self.clients.read().unwrap_or_else(|e| e.into_inner());
            if let Some(client) = clients.get(&token) {
                return Ok(Arc::clone(client));
            }
        }

        let client = TodoistClient::new(&token, Arc::clone(&self.transport))?
            .with_base_url(&self.base_url);
        let mut clients = self.clients.write().unwrap_or_else(|e| e.into_inner());
        Ok(Arc::clone(
            clients.entry(token).or_insert_with(|| Arc::new(client)),
        ))
    }

    pub fn len(&self) -> usize {
        self.clients.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.clients
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}
