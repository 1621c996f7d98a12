//! Client SDK for the stride coaching service.
//!
//! Wires the session store, query cache and gateway together and exposes
//! the service's endpoints as typed groups.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stride_sdk::prelude::*;
//!
//! let config = ClientConfig::from_env()?;
//! let client = StrideClient::new(&config, Arc::new(MemoryStore::new()), Arc::new(NoopNavigator))?;
//!
//! client.auth().login(&Credentials::new("runner@example.com", "secret")).await?;
//! let summary = client.analytics().fitness_summary().await?;
//! ```

pub mod api;
mod client;
mod config;
mod logging;
pub mod views;

pub use client::{Record, StrideClient};
pub use config::{
    CacheConfig, ClientConfig, ConfigError, PolicyOverride, API_URL_ENV, DEFAULT_BASE_URL,
    RETRY_ENV, TIMEOUT_ENV,
};
pub use logging::{init_tracing, LOG_ENV};

pub use stride_auth::{Session, SessionStore, UserRecord};
pub use stride_cache::{FileStore, KeyValueStore, MemoryStore, QueryCache, QueryKey};
pub use stride_data::{
    ApiError, ErrorKind, Navigator, NoopNavigator, Outcome, RecordingNavigator,
    RequestDescriptor, Response,
};
pub use stride_executor::{LoadResult, ViewScope};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{Credentials, Registration};
    pub use crate::{
        ApiError, ClientConfig, ErrorKind, MemoryStore, NoopNavigator, Outcome, Record,
        StrideClient, ViewScope,
    };
}
