//! Session list of manual entries with stack or queue insertion.
//!
//! One ordered sequence backs both modes. The mode only picks the insertion
//! side; removal always takes the front, so stack mode behaves LIFO and
//! queue mode FIFO.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::domain::entities::ManualEntry;
use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertMode {
    /// Insert at the front
    #[default]
    Stack,
    /// Append at the back
    Queue,
}

impl fmt::Display for InsertMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertMode::Stack => f.write_str("stack"),
            InsertMode::Queue => f.write_str("queue"),
        }
    }
}

impl FromStr for InsertMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stack" => Ok(InsertMode::Stack),
            "queue" => Ok(InsertMode::Queue),
            _ => Err(DomainError::UnknownVariant {
                kind: "insert mode",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ManualEntryList {
    entries: VecDeque<ManualEntry>,
}

impl ManualEntryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: ManualEntry, mode: InsertMode) {
        debug!("add: name={} mode={}", entry.name, mode);
        match mode {
            InsertMode::Stack => self.entries.push_front(entry),
            InsertMode::Queue => self.entries.push_back(entry),
        }
    }

    /// Remove and return the front entry.
    pub fn remove_first(&mut self) -> Result<ManualEntry, DomainError> {
        self.entries.pop_front().ok_or(DomainError::EmptyList)
    }

    /// Drop every entry, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManualEntry> {
        self.entries.iter()
    }

    pub fn first(&self) -> Option<&ManualEntry> {
        self.entries.front()
    }
}
