//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Clock)
//! but are themselves concrete structs, not traits.

mod dashboard;
mod dataset;
mod session;

pub use dashboard::{DashboardService, SearchOutput, SortOutput};
pub use dataset::{DatasetService, DRIVERS_FILE, RACES_FILE, RESULTS_FILE};
pub use session::SessionService;
