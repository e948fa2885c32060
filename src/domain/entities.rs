//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Career summary of one driver, derived from per-race results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverAggregate {
    /// Ergast driver id, unique within a collection
    pub driver_id: i64,
    /// Full display name (`forename surname`)
    pub name: String,
    /// Sum of points over all results
    pub points: f64,
    /// Mean starting grid position (missing grid counts as 0)
    pub grid: f64,
    /// Number of results contributing to the aggregate
    pub laps: u32,
}

impl DriverAggregate {
    pub fn new(driver_id: i64, name: impl Into<String>, points: f64, grid: f64, laps: u32) -> Self {
        Self {
            driver_id,
            name: name.into(),
            points,
            grid,
            laps,
        }
    }

    /// Numeric value of `field`, the key every sorting variant compares on.
    pub fn field(&self, field: SortField) -> f64 {
        match field {
            SortField::Points => self.points,
            SortField::Laps => f64::from(self.laps),
            SortField::Grid => self.grid,
        }
    }

    /// Last whitespace-delimited token of the name.
    pub fn surname(&self) -> &str {
        self.name.split_whitespace().last().unwrap_or(&self.name)
    }
}

impl fmt::Display for DriverAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (points {:.1}, grid {:.2}, laps {})",
            self.name, self.points, self.grid, self.laps
        )
    }
}

/// Numeric field of a [`DriverAggregate`] used as sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Points,
    Laps,
    Grid,
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::Points, SortField::Laps, SortField::Grid];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Points => "points",
            SortField::Laps => "laps",
            SortField::Grid => "grid",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownVariant {
                kind: "sort field",
                value: s.to_string(),
            })
    }
}

/// Record typed in by the user during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEntry {
    pub name: String,
    /// Free-form lap time, e.g. `1:30.5`; not validated
    pub laptime: String,
    /// Capture time, informational only
    pub timestamp: NaiveTime,
}

impl ManualEntry {
    /// Build an entry, rejecting blank name or lap time.
    pub fn new(
        name: impl Into<String>,
        laptime: impl Into<String>,
        timestamp: NaiveTime,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let laptime = laptime.into();
        if name.trim().is_empty() {
            return Err(DomainError::MissingField("name"));
        }
        if laptime.trim().is_empty() {
            return Err(DomainError::MissingField("laptime"));
        }
        Ok(Self {
            name,
            laptime,
            timestamp,
        })
    }
}

impl fmt::Display for ManualEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {}",
            self.name,
            self.laptime,
            self.timestamp.format("%H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_mixed_case_when_parsing_sort_field_then_matches() {
        assert_eq!("Points".parse::<SortField>().unwrap(), SortField::Points);
        assert_eq!(" laps ".parse::<SortField>().unwrap(), SortField::Laps);
        assert!("speed".parse::<SortField>().is_err());
    }

    #[test]
    fn given_multi_word_name_when_surname_then_returns_last_token() {
        let d = DriverAggregate::new(1, "Juan Pablo Montoya", 0.0, 0.0, 0);
        assert_eq!(d.surname(), "Montoya");
    }

    #[test]
    fn given_blank_laptime_when_creating_entry_then_rejects() {
        let t = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert_eq!(
            ManualEntry::new("Senna", "  ", t),
            Err(DomainError::MissingField("laptime"))
        );
    }
}
