//! Concurrent resource loader.

use futures::future::join_all;
use stride_data::{ApiError, ErrorKind, Outcome};

use crate::resource::{Criticality, Resource};
use crate::scope::ViewScope;

/// Status of a settled resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    /// Fetched successfully.
    Loaded,
    /// Critical resource failed.
    Failed,
    /// Optional resource failed; the view renders without it.
    Degraded,
}

/// A settled resource.
#[derive(Debug)]
pub struct LoadEntry<T> {
    /// Resource name.
    pub name: String,
    /// Whether failure blocks the view.
    pub criticality: Criticality,
    /// Fetch outcome.
    pub outcome: Outcome<T>,
}

impl<T> LoadEntry<T> {
    /// Status derived from outcome and criticality.
    pub fn status(&self) -> ResourceStatus {
        match (&self.outcome, self.criticality) {
            (Ok(_), _) => ResourceStatus::Loaded,
            (Err(_), Criticality::Critical) => ResourceStatus::Failed,
            (Err(_), Criticality::Optional) => ResourceStatus::Degraded,
        }
    }
}

/// Outcomes of one `load_all` call, in request order.
///
/// Resource names should be unique; lookups return the first match.
#[derive(Debug)]
pub struct LoadResult<T> {
    entries: Vec<LoadEntry<T>>,
}

impl<T> LoadResult<T> {
    /// Outcome for a resource.
    pub fn get(&self, name: &str) -> Option<&Outcome<T>> {
        self.entry(name).map(|e| &e.outcome)
    }

    /// Successful value for a resource.
    pub fn value(&self, name: &str) -> Option<&T> {
        self.get(name).and_then(|o| o.as_ref().ok())
    }

    /// Remove and return the outcome for a resource.
    pub fn take(&mut self, name: &str) -> Option<Outcome<T>> {
        let index = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(index).outcome)
    }

    /// The settled entry for a resource.
    pub fn entry(&self, name: &str) -> Option<&LoadEntry<T>> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Status of a resource.
    pub fn status(&self, name: &str) -> Option<ResourceStatus> {
        self.entry(name).map(LoadEntry::status)
    }

    /// First failed critical resource's error.
    pub fn blocking_error(&self) -> Option<&ApiError> {
        self.entries
            .iter()
            .filter(|e| e.criticality.is_critical())
            .find_map(|e| e.outcome.as_ref().err())
    }

    /// Names of optional resources that failed.
    pub fn degraded(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.status() == ResourceStatus::Degraded)
            .map(|e| e.name.as_str())
            .collect()
    }

    /// Whether every resource succeeded.
    pub fn is_complete_success(&self) -> bool {
        self.entries.iter().all(|e| e.outcome.is_ok())
    }

    /// Resource names in request order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no resources were requested.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over settled entries.
    pub fn iter(&self) -> impl Iterator<Item = &LoadEntry<T>> {
        self.entries.iter()
    }

    /// Consume into entries.
    pub fn into_entries(self) -> Vec<LoadEntry<T>> {
        self.entries
    }
}

/// Issues a view's fetches concurrently and gathers every outcome.
///
/// Each fetch runs as its own task, so total time is bounded by the
/// slowest fetch. Fetches keep running to completion even if the caller
/// stops waiting, which lets them populate the query cache.
#[derive(Debug, Clone)]
pub struct Loader {
    view: String,
}

impl Loader {
    /// Create a loader for the named view.
    pub fn new(view: impl Into<String>) -> Self {
        Self { view: view.into() }
    }

    /// View name used in logs.
    pub fn view(&self) -> &str {
        &self.view
    }

    /// Fetch every resource concurrently and wait for all to settle.
    ///
    /// Returns `None` when `scope` was torn down before the results were
    /// ready; the caller must not apply anything in that case.
    pub async fn load_all<T>(
        &self,
        scope: &ViewScope,
        resources: Vec<Resource<T>>,
    ) -> Option<LoadResult<T>>
    where
        T: Send + 'static,
    {
        tracing::debug!(view = %self.view, count = resources.len(), "loading resources");

        let pending = resources.into_iter().map(|resource| {
            let Resource {
                name,
                criticality,
                fetch,
            } = resource;
            let handle = tokio::spawn(fetch);
            async move {
                let outcome = match handle.await {
                    Ok(outcome) => outcome,
                    Err(e) => Err(ApiError::new(
                        ErrorKind::Unknown,
                        format!("fetch for {name} did not complete: {e}"),
                    )),
                };
                LoadEntry {
                    name,
                    criticality,
                    outcome,
                }
            }
        });
        let entries = join_all(pending).await;

        if !scope.is_active() {
            tracing::debug!(view = %self.view, "view torn down, discarding results");
            return None;
        }

        for entry in &entries {
            if let Err(e) = &entry.outcome {
                match entry.criticality {
                    Criticality::Critical => tracing::error!(
                        view = %self.view,
                        resource = %entry.name,
                        kind = e.kind.name(),
                        error = %e,
                        "critical resource failed"
                    ),
                    Criticality::Optional => tracing::warn!(
                        view = %self.view,
                        resource = %entry.name,
                        kind = e.kind.name(),
                        error = %e,
                        "optional resource failed"
                    ),
                }
            }
        }

        Some(LoadResult { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::{sleep, Instant};

    fn server_error() -> ApiError {
        ApiError::new(ErrorKind::ServerError, "boom").with_status(500)
    }

    #[tokio::test]
    async fn test_partial_failure() {
        let loader = Loader::new("dashboard");
        let scope = ViewScope::new();
        let result = loader
            .load_all(
                &scope,
                vec![
                    Resource::critical("a", async { Ok(1) }),
                    Resource::optional("b", async { Err(server_error()) }),
                    Resource::optional("c", async { Ok(3) }),
                ],
            )
            .await
            .unwrap();

        assert_eq!(result.names(), vec!["a", "b", "c"]);
        assert_eq!(result.value("a"), Some(&1));
        assert_eq!(result.value("c"), Some(&3));
        assert_eq!(
            result.get("b").unwrap().as_ref().unwrap_err().kind,
            ErrorKind::ServerError
        );
        assert!(result.blocking_error().is_none());
        assert_eq!(result.degraded(), vec!["b"]);
        assert!(!result.is_complete_success());
        assert_eq!(result.status("b"), Some(ResourceStatus::Degraded));
    }

    #[tokio::test]
    async fn test_critical_failure_blocks() {
        let loader = Loader::new("dashboard");
        let result = loader
            .load_all(
                &ViewScope::new(),
                vec![
                    Resource::critical("summary", async { Err::<u32, _>(server_error()) }),
                    Resource::optional("zones", async { Ok(2) }),
                ],
            )
            .await
            .unwrap();

        let blocking = result.blocking_error().unwrap();
        assert_eq!(blocking.status, Some(500));
        assert_eq!(result.status("summary"), Some(ResourceStatus::Failed));
        assert!(result.degraded().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_by_slowest_fetch() {
        let loader = Loader::new("dashboard");
        let start = Instant::now();

        let resources = [100u64, 200, 300]
            .into_iter()
            .map(|ms| {
                Resource::optional(format!("r{ms}"), async move {
                    sleep(Duration::from_millis(ms)).await;
                    Ok(ms)
                })
            })
            .collect();
        let result = loader.load_all(&ViewScope::new(), resources).await.unwrap();

        let elapsed = start.elapsed();
        assert!(result.is_complete_success());
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_discards_results_but_fetch_completes() {
        let scope = ViewScope::new();
        let done = Arc::new(AtomicBool::new(false));

        let load = tokio::spawn({
            let scope = scope.clone();
            let done = done.clone();
            async move {
                Loader::new("dashboard")
                    .load_all(
                        &scope,
                        vec![Resource::critical("profile", async move {
                            sleep(Duration::from_millis(100)).await;
                            done.store(true, Ordering::SeqCst);
                            Ok(1)
                        })],
                    )
                    .await
            }
        });

        scope.teardown();
        let result = load.await.unwrap();

        assert!(result.is_none());
        assert!(done.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_load_keeps_fetching() {
        let calls = Arc::new(AtomicUsize::new(0));

        let load = tokio::spawn({
            let calls = calls.clone();
            async move {
                Loader::new("goals")
                    .load_all(
                        &ViewScope::new(),
                        vec![Resource::optional("goals", async move {
                            sleep(Duration::from_millis(100)).await;
                            calls.fetch_add(1, Ordering::SeqCst);
                            Ok(())
                        })],
                    )
                    .await
            }
        });

        // Let the loader spawn its fetch before abandoning it.
        tokio::task::yield_now().await;
        load.abort();
        sleep(Duration::from_millis(200)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_take_removes_entry() {
        let mut result = Loader::new("profile")
            .load_all(&ViewScope::new(), vec![Resource::critical("me", async { Ok(7) })])
            .await
            .unwrap();

        assert_eq!(result.take("me").unwrap().unwrap(), 7);
        assert!(result.is_empty());
        assert!(result.take("me").is_none());
    }

    #[tokio::test]
    async fn test_panicking_fetch_is_unknown() {
        let result = Loader::new("dashboard")
            .load_all(
                &ViewScope::new(),
                vec![Resource::optional("broken", async {
                    if true {
                        panic!("fetch panicked");
                    }
                    Ok::<u32, ApiError>(0)
                })],
            )
            .await
            .unwrap();

        let err = result.get("broken").unwrap().as_ref().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unknown);
    }
}
