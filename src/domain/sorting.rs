//! Textbook sorting algorithms, all ordering descending by a numeric key.
//!
//! Every variant returns a new vector and leaves its input untouched. The
//! variants agree on the resulting sequence of key values; how ties are
//! ordered depends on the algorithm (merge, insertion and bubble sort are
//! stable, quick sort keeps ties in input order within the pivot group,
//! selection sort is not stable).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::entities::{DriverAggregate, SortField};
use crate::domain::error::DomainError;

/// Selectable sorting strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    #[default]
    Quick,
    Bubble,
    Selection,
    Insertion,
    Merge,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 5] = [
        SortAlgorithm::Quick,
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortAlgorithm::Quick => "quick",
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Merge => "merge",
        }
    }

    /// Time complexity shown next to the timing.
    pub fn complexity(&self) -> &'static str {
        match self {
            SortAlgorithm::Quick => "O(n log n) avg, O(n^2) worst",
            SortAlgorithm::Bubble | SortAlgorithm::Selection => "O(n^2)",
            SortAlgorithm::Insertion => "O(n^2), O(n) on sorted input",
            SortAlgorithm::Merge => "O(n log n)",
        }
    }

    /// Sort driver records by `field`, highest first.
    #[instrument(level = "debug", skip(records), fields(n = records.len()))]
    pub fn sort(self, records: &[DriverAggregate], field: SortField) -> Vec<DriverAggregate> {
        self.sort_by_key(records, |d: &DriverAggregate| d.field(field))
    }

    /// Sort any records by a numeric key, highest first.
    pub fn sort_by_key<T, K>(self, items: &[T], key: K) -> Vec<T>
    where
        T: Clone,
        K: Fn(&T) -> f64,
    {
        match self {
            SortAlgorithm::Quick => quick_sort(items, &key),
            SortAlgorithm::Bubble => bubble_sort(items, &key),
            SortAlgorithm::Selection => selection_sort(items, &key),
            SortAlgorithm::Insertion => insertion_sort(items, &key),
            SortAlgorithm::Merge => merge_sort(items, &key),
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sort", self.as_str())
    }
}

impl FromStr for SortAlgorithm {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let wanted = wanted.strip_suffix(" sort").unwrap_or(&wanted);
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| DomainError::UnknownVariant {
                kind: "sort algorithm",
                value: s.to_string(),
            })
    }
}

/// Three-way partition around the middle element's key: greater, equal, less.
///
/// Keys compare with [`f64::total_cmp`], so every element lands in exactly one
/// partition and a NaN key cannot stall the recursion.
pub fn quick_sort<T, K>(items: &[T], key: &K) -> Vec<T>
where
    T: Clone,
    K: Fn(&T) -> f64,
{
    if items.len() <= 1 {
        return items.to_vec();
    }
    let pivot = key(&items[items.len() / 2]);

    let mut greater = Vec::new();
    let mut equal = Vec::new();
    let mut less = Vec::new();
    for item in items {
        match key(item).total_cmp(&pivot) {
            Ordering::Greater => greater.push(item.clone()),
            Ordering::Equal => equal.push(item.clone()),
            Ordering::Less => less.push(item.clone()),
        }
    }

    let mut sorted = quick_sort(&greater, key);
    sorted.extend(equal);
    sorted.extend(quick_sort(&less, key));
    sorted
}

pub fn bubble_sort<T, K>(items: &[T], key: &K) -> Vec<T>
where
    T: Clone,
    K: Fn(&T) -> f64,
{
    let mut arr = items.to_vec();
    let n = arr.len();
    for i in 0..n {
        for j in 0..n - i - 1 {
            if key(&arr[j]) < key(&arr[j + 1]) {
                arr.swap(j, j + 1);
            }
        }
    }
    arr
}

pub fn selection_sort<T, K>(items: &[T], key: &K) -> Vec<T>
where
    T: Clone,
    K: Fn(&T) -> f64,
{
    let mut arr = items.to_vec();
    for i in 0..arr.len() {
        let mut max_idx = i;
        for j in i + 1..arr.len() {
            if key(&arr[j]) > key(&arr[max_idx]) {
                max_idx = j;
            }
        }
        arr.swap(i, max_idx);
    }
    arr
}

pub fn insertion_sort<T, K>(items: &[T], key: &K) -> Vec<T>
where
    T: Clone,
    K: Fn(&T) -> f64,
{
    let mut arr = items.to_vec();
    for i in 1..arr.len() {
        let current = arr[i].clone();
        let current_key = key(&current);
        let mut j = i;
        while j > 0 && key(&arr[j - 1]) < current_key {
            arr[j] = arr[j - 1].clone();
            j -= 1;
        }
        arr[j] = current;
    }
    arr
}

pub fn merge_sort<T, K>(items: &[T], key: &K) -> Vec<T>
where
    T: Clone,
    K: Fn(&T) -> f64,
{
    if items.len() <= 1 {
        return items.to_vec();
    }
    let mid = items.len() / 2;
    let left = merge_sort(&items[..mid], key);
    let right = merge_sort(&items[mid..], key);
    merge_descending(left, right, key)
}

/// Merge two descending runs; ties take from the left run first.
fn merge_descending<T, K>(left: Vec<T>, right: Vec<T>, key: &K) -> Vec<T>
where
    K: Fn(&T) -> f64,
{
    let mut result = Vec::with_capacity(left.len() + right.len());
    let mut left_iter = left.into_iter().peekable();
    let mut right_iter = right.into_iter().peekable();

    loop {
        let take_left = match (left_iter.peek(), right_iter.peek()) {
            (Some(l), Some(r)) => key(l) >= key(r),
            _ => break,
        };
        let next = if take_left {
            left_iter.next()
        } else {
            right_iter.next()
        };
        result.extend(next);
    }

    result.extend(left_iter);
    result.extend(right_iter);
    result
}
