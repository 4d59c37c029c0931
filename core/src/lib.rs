//! Blocking client for the Todoist `API/` endpoint.
//!
//! # Overview
//! Every operation is one GET of `<base><method>?<params>` whose JSON reply
//! is returned as a `serde_json::Value`. Requests go through an injected
//! `Transport`, so the core builds and decodes without owning the network;
//! `UreqTransport` is provided for real use.
//!
//! # Design
//! - `TodoistClient` is bound to one token and holds no mutable state.
//! - `ClientRegistry` hands out one shared client per token.
//! - `Accounts` covers the calls made without a token (login, register,
//!   timezones) and memoizes the timezone list in a `ResponseCache`.
//! - Sentinel strings the service returns in place of a payload are mapped
//!   to error kinds through per-operation tables in `protocol`.
//! - Errors are returned, never logged; the only tracing output is debug-level
//!   request dispatch.

pub mod accounts;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod protocol;
pub mod registry;
pub mod transport;
pub mod types;

pub use accounts::{Accounts, ResponseCache, TIMEZONES_CACHE_KEY};
pub use client::{TodoistClient, DEFAULT_BASE_URL};
pub use config::{Config, ConfigError, TokenSource};
pub use error::{ApiError, AuthError, Result, ServiceErrorKind};
pub use http::{HttpRequest, HttpResponse, Transport, TransportFailure};
pub use params::Params;
pub use protocol::Reply;
pub use registry::ClientRegistry;
pub use transport::UreqTransport;
pub use types::{clamp_priority, ItemFields, Offset, Registration};
