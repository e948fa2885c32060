//! Name search over driver records.
//!
//! Both searches match on case-insensitive substring containment. Binary
//! search decides which half to continue into with an exact lexicographic
//! comparison against the query, so a query that is only a substring (a
//! surname, say) can steer it away from a matching record that linear
//! search finds. Callers must sort the input with [`sort_by_name`] first, which orders
//! case-insensitively to agree with that comparison.

use std::fmt;
use std::str::FromStr;

use tracing::instrument;

use crate::domain::entities::DriverAggregate;
use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchMethod {
    #[default]
    Linear,
    Binary,
}

impl SearchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMethod::Linear => "linear",
            SearchMethod::Binary => "binary",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} search", self.as_str())
    }
}

impl FromStr for SearchMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" | "linear search" => Ok(SearchMethod::Linear),
            "binary" | "binary search" => Ok(SearchMethod::Binary),
            _ => Err(DomainError::UnknownVariant {
                kind: "search method",
                value: s.to_string(),
            }),
        }
    }
}

/// First record, in collection order, whose name contains `query`.
#[instrument(level = "debug", skip(records), fields(n = records.len()))]
pub fn linear_search<'a>(records: &'a [DriverAggregate], query: &str) -> Option<&'a DriverAggregate> {
    let target = query.to_lowercase();
    records
        .iter()
        .find(|d| d.name.to_lowercase().contains(&target))
}

/// Halving search over records sorted ascending by name.
#[instrument(level = "debug", skip(records), fields(n = records.len()))]
pub fn binary_search<'a>(records: &'a [DriverAggregate], query: &str) -> Option<&'a DriverAggregate> {
    let target = query.to_lowercase();
    let mut low: isize = 0;
    let mut high: isize = records.len() as isize - 1;

    while low <= high {
        let mid = (low + high) / 2;
        let candidate = &records[mid as usize];
        let name = candidate.name.to_lowercase();
        if name.contains(&target) {
            return Some(candidate);
        } else if name < target {
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }
    None
}

/// Copy of `records` ordered ascending by lowercase name, ready for [`binary_search`].
///
/// The order must match the lowercase comparison [`binary_search`] navigates by,
/// otherwise names like "Andrea de Cesaris" sort after "Andrea Zerbo" and the
/// search steers away from them.
pub fn sort_by_name(records: &[DriverAggregate]) -> Vec<DriverAggregate> {
    let mut sorted = records.to_vec();
    sorted.sort_by_cached_key(|d| d.name.to_lowercase());
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_records_when_binary_search_then_none() {
        assert!(binary_search(&[], "hamilton").is_none());
    }

    #[test]
    fn given_method_names_when_parsing_then_case_insensitive() {
        assert_eq!("Binary".parse::<SearchMethod>().unwrap(), SearchMethod::Binary);
        assert!("hash".parse::<SearchMethod>().is_err());
    }
}
