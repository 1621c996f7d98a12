//! Resources a view asks for.

use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;
use stride_data::Outcome;

/// Whether a resource's failure blocks the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Criticality {
    /// Failure surfaces a blocking error state.
    #[default]
    Critical,
    /// Failure is logged and the view renders without it.
    Optional,
}

impl Criticality {
    /// Check if failure should block the view.
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Critical)
    }
}

/// A named fetch.
pub struct Resource<T> {
    /// Name the outcome is reported under.
    pub name: String,
    /// Whether failure blocks the view.
    pub criticality: Criticality,
    pub(crate) fetch: BoxFuture<'static, Outcome<T>>,
}

impl<T> Resource<T> {
    /// Create a resource.
    pub fn new<F>(name: impl Into<String>, criticality: Criticality, fetch: F) -> Self
    where
        F: Future<Output = Outcome<T>> + Send + 'static,
    {
        Self {
            name: name.into(),
            criticality,
            fetch: fetch.boxed(),
        }
    }

    /// Create a resource whose failure blocks the view.
    pub fn critical<F>(name: impl Into<String>, fetch: F) -> Self
    where
        F: Future<Output = Outcome<T>> + Send + 'static,
    {
        Self::new(name, Criticality::Critical, fetch)
    }

    /// Create a resource whose failure only degrades the view.
    pub fn optional<F>(name: impl Into<String>, fetch: F) -> Self
    where
        F: Future<Output = Outcome<T>> + Send + 'static,
    {
        Self::new(name, Criticality::Optional, fetch)
    }
}

impl<T> std::fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("name", &self.name)
            .field("criticality", &self.criticality)
            .finish()
    }
}
