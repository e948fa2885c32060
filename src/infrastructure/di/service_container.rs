//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::{DashboardService, DatasetService, SessionService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{Clock, FileSystem, RealFileSystem, SystemClock};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Time source for manual entries
    pub clock: Arc<dyn Clock>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(SystemClock))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>, clock: Arc<dyn Clock>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs, clock }
    }

    pub fn dataset_service(&self) -> DatasetService {
        DatasetService::new(Arc::clone(&self.fs))
    }

    /// Load the dataset from the configured directory and wrap it in a dashboard.
    pub fn dashboard(&self) -> ApplicationResult<DashboardService> {
        self.dashboard_from(&self.settings.data_dir)
    }

    pub fn dashboard_from(&self, data_dir: &Path) -> ApplicationResult<DashboardService> {
        debug!("dashboard: loading {}", data_dir.display());
        let dataset = self.dataset_service().load(data_dir)?;
        Ok(DashboardService::new(
            Arc::new(dataset),
            Arc::clone(&self.settings),
        ))
    }

    /// Fresh session with an empty manual entry list.
    pub fn session(&self) -> SessionService {
        SessionService::new(Arc::clone(&self.clock))
    }
}
