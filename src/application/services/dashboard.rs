//! Dashboard service
//!
//! Maps each user intent onto an engine call over the configured sample of
//! the dataset, validating inputs at this boundary and timing the call.

use std::sync::Arc;

use tracing::debug;

use crate::application::timing::{timed, Timed};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::hashing::{self, Buckets};
use crate::domain::recursion;
use crate::domain::search::{binary_search, linear_search, sort_by_name};
use crate::domain::{
    Dataset, DatasetSummary, DomainError, DriverAggregate, DriverProfile, PointsTree,
    SearchMethod, SortAlgorithm, SortField,
};

/// Outcome of a sort request.
#[derive(Debug, Clone)]
pub struct SortOutput {
    pub algorithm: SortAlgorithm,
    pub field: SortField,
    pub records: Timed<Vec<DriverAggregate>>,
}

/// Outcome of a search request; `record` is `None` when nothing matched.
#[derive(Debug, Clone)]
pub struct SearchOutput {
    pub method: SearchMethod,
    pub record: Timed<Option<DriverAggregate>>,
}

pub struct DashboardService {
    dataset: Arc<Dataset>,
    settings: Arc<Settings>,
}

impl DashboardService {
    pub fn new(dataset: Arc<Dataset>, settings: Arc<Settings>) -> Self {
        Self { dataset, settings }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Sort the first `samples.sort` drivers, highest first.
    pub fn sort(&self, algorithm: SortAlgorithm, field: SortField) -> SortOutput {
        let sample = self.dataset.sample(self.settings.samples.sort);
        debug!("sort: {} records by {} with {}", sample.len(), field, algorithm);
        SortOutput {
            algorithm,
            field,
            records: timed(|| algorithm.sort(sample, field)),
        }
    }

    /// Search all drivers by name.
    ///
    /// Binary search gets a name-sorted copy; sorting is not timed.
    pub fn search(&self, query: &str, method: SearchMethod) -> ApplicationResult<SearchOutput> {
        if query.trim().is_empty() {
            return Err(DomainError::MissingField("query").into());
        }
        let drivers = self.dataset.drivers();
        let record = match method {
            SearchMethod::Linear => timed(|| linear_search(drivers, query).cloned()),
            SearchMethod::Binary => {
                let sorted = sort_by_name(drivers);
                timed(|| binary_search(&sorted, query).cloned())
            }
        };
        debug!("search: query={query:?} method={method} found={}", record.value.is_some());
        Ok(SearchOutput { method, record })
    }

    /// Like [`search`](Self::search), but a miss is an error.
    pub fn find(&self, query: &str, method: SearchMethod) -> ApplicationResult<DriverAggregate> {
        self.search(query, method)?
            .record
            .value
            .ok_or_else(|| DomainError::NotFound(query.to_string()).into())
    }

    /// Hash the first `samples.buckets` drivers; `bucket_count` overrides the config.
    pub fn buckets(&self, bucket_count: Option<usize>) -> ApplicationResult<Buckets> {
        let count = bucket_count.unwrap_or(self.settings.bucket_count);
        let sample = self.dataset.sample(self.settings.samples.buckets);
        Ok(hashing::bucket(sample, count)?)
    }

    pub fn sha256(&self, text: &str) -> ApplicationResult<String> {
        if text.is_empty() {
            return Err(DomainError::MissingField("text").into());
        }
        Ok(hashing::sha256_hex(text))
    }

    /// BST over the first `samples.tree` drivers, inserted in dataset order.
    pub fn tree(&self) -> Timed<PointsTree> {
        let sample = self.dataset.sample(self.settings.samples.tree);
        timed(|| PointsTree::from_records(sample))
    }

    pub fn factorial(&self, n: i64) -> ApplicationResult<Timed<u64>> {
        let n = bounded(n, 1, self.settings.limits.factorial_max)?;
        let result = timed(|| recursion::factorial(n));
        match result.value {
            Some(value) => Ok(Timed {
                value,
                elapsed: result.elapsed,
            }),
            None => Err(DomainError::out_of_domain(n, "factorial overflows u64").into()),
        }
    }

    pub fn fibonacci(&self, n: i64) -> ApplicationResult<Timed<u64>> {
        let n = bounded(n, 1, self.settings.limits.fibonacci_max)?;
        Ok(timed(|| recursion::fibonacci(n)))
    }

    /// Recursive sum of points over the first `samples.sum` drivers.
    pub fn total_points(&self) -> Timed<f64> {
        let sample = self.dataset.sample(self.settings.samples.sum);
        timed(|| {
            let points: Vec<f64> = sample.iter().map(|d| d.points).collect();
            recursion::recursive_sum(&points)
        })
    }

    pub fn summary(&self) -> DatasetSummary {
        self.dataset.summary()
    }

    pub fn profile(&self, driver: &DriverAggregate) -> DriverProfile {
        self.dataset.profile(driver.driver_id)
    }
}

/// Reject `n` outside `min..=max` before it reaches a naive recursion.
fn bounded(n: i64, min: u32, max: u32) -> Result<u32, DomainError> {
    if n < i64::from(min) || n > i64::from(max) {
        return Err(DomainError::out_of_domain(
            n,
            format!("expected {min}..={max}"),
        ));
    }
    u32::try_from(n).map_err(|_| DomainError::out_of_domain(n, "not a u32"))
}
