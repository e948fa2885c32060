//! Domain layer: entities and algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod bst;
pub mod dataset;
pub mod entities;
pub mod error;
pub mod hashing;
pub mod manual_list;
pub mod recursion;
pub mod search;
pub mod sorting;

pub use bst::{PointsTree, TreeNode};
pub use dataset::{Dataset, DatasetSummary, DriverProfile, GridFinish, RaceResult};
pub use entities::*;
pub use error::DomainError;
pub use manual_list::{InsertMode, ManualEntryList};
pub use search::SearchMethod;
pub use sorting::SortAlgorithm;
