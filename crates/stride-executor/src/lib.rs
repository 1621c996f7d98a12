//! Concurrent loading of the resources a view needs.
//!
//! This crate enables partial-success view loads:
//! - `Loader` - Issues every fetch at once and waits for all to settle
//! - `Resource` / `Criticality` - What to fetch and whether its failure blocks the view
//! - `ViewScope` - Teardown signal that suppresses late results
//! - `LoadResult` - Per-resource outcomes

mod loader;
mod resource;
mod scope;

pub use loader::*;
pub use resource::*;
pub use scope::*;
