//! Manual entry session
//!
//! Owns the manual entry list for exactly as long as the session lives.

use std::sync::Arc;

use tracing::debug;

use crate::application::ApplicationResult;
use crate::domain::{InsertMode, ManualEntry, ManualEntryList};
use crate::infrastructure::traits::Clock;

pub struct SessionService {
    entries: ManualEntryList,
    clock: Arc<dyn Clock>,
}

impl SessionService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: ManualEntryList::new(),
            clock,
        }
    }

    /// Validate and insert a new entry stamped with the current time.
    ///
    /// A blank field leaves the list unchanged.
    pub fn add(
        &mut self,
        name: &str,
        laptime: &str,
        mode: InsertMode,
    ) -> ApplicationResult<ManualEntry> {
        let entry = ManualEntry::new(name.trim(), laptime.trim(), self.clock.now())?;
        debug!("session add: {} via {}", entry, mode);
        self.entries.add(entry.clone(), mode);
        Ok(entry)
    }

    /// Remove the front entry.
    pub fn pull(&mut self) -> ApplicationResult<ManualEntry> {
        Ok(self.entries.remove_first()?)
    }

    /// Remove everything, returning the number of entries dropped.
    pub fn clear(&mut self) -> usize {
        self.entries.clear()
    }

    pub fn entries(&self) -> &ManualEntryList {
        &self.entries
    }
}
