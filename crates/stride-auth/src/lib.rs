//! Authentication session for the stride client.
//!
//! The session store is the single source of truth for whether a usable
//! credential exists. It persists through an injected `KeyValueStore`, so
//! tests run against a `MemoryStore` and binaries against a `FileStore`.

mod session;
mod user;

pub use session::{Session, SessionStore, TOKEN_KEY, USER_KEY};
pub use stride_cache::StoreError;
pub use user::{AuthResponse, UserId, UserRecord};
