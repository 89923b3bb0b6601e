// src/store/mod.rs
// =============================================================================
// Client for the Datasette JSON write API.
//
// Submodules:
// - config: explicit connection settings (base URL, token, timeout)
// - action: the six store actions and the requests they build
// - payload: JSON bodies loaded from files
// - client: sends requests and translates errors
// - token: creates API tokens through the datasette CLI
// =============================================================================

mod action;
mod client;
mod config;
mod payload;
mod token;

#[cfg(test)]
mod fake;

pub use action::{StoreAction, StoreInput, StoreRequest};
pub use client::StoreClient;
pub use config::{StoreConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use payload::Payload;
pub use token::{create_token, DEFAULT_TOKEN_PROGRAM};

#[cfg(test)]
pub(crate) use fake::{FakeStore, TOKEN as FAKE_TOKEN};
