//! Joined race results and the views derived from them.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use itertools::Itertools;
use tracing::debug;

use crate::domain::entities::DriverAggregate;

/// One result row after joining results, drivers and races.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceResult {
    pub race_id: i64,
    pub driver_id: i64,
    /// `forename surname`
    pub driver_name: String,
    pub year: i32,
    /// Grand prix name, e.g. `Monaco Grand Prix`
    pub race_name: String,
    /// Starting position; 0 when unknown
    pub grid: f64,
    /// Classified finishing order; 0 when unknown
    pub position_order: u32,
    pub points: f64,
}

/// Headline numbers for the whole dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub total_drivers: usize,
    pub total_races: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
}

/// Per-driver breakdown of their results.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverProfile {
    pub driver_id: i64,
    /// Points per season, ascending year
    pub yearly_points: Vec<(i32, f64)>,
    /// Podium finishes per grand prix, most first (top 8)
    pub podiums: Vec<(String, usize)>,
    /// Finishing position counts, most frequent first (top 10)
    pub positions: Vec<(u32, usize)>,
    /// Starting slot against result, in dataset order (first 50 classified starts)
    pub grid_vs_finish: Vec<GridFinish>,
}

/// One classified start: where the driver lined up and where they finished.
#[derive(Debug, Clone, PartialEq)]
pub struct GridFinish {
    pub grid: f64,
    pub position: u32,
    pub points: f64,
    pub race_name: String,
    pub year: i32,
}

const TOP_PODIUMS: usize = 8;
const TOP_POSITIONS: usize = 10;
const GRID_FINISH_LIMIT: usize = 50;

/// Immutable collection of joined results with its driver aggregates.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    results: Vec<RaceResult>,
    drivers: Vec<DriverAggregate>,
}

impl Dataset {
    pub fn new(results: Vec<RaceResult>) -> Self {
        let drivers = aggregate_drivers(&results);
        debug!(
            "dataset: {} results, {} drivers",
            results.len(),
            drivers.len()
        );
        Self { results, drivers }
    }

    pub fn results(&self) -> &[RaceResult] {
        &self.results
    }

    /// Aggregates ordered by driver id.
    pub fn drivers(&self) -> &[DriverAggregate] {
        &self.drivers
    }

    /// First `n` aggregates (fewer if the dataset is smaller).
    pub fn sample(&self, n: usize) -> &[DriverAggregate] {
        &self.drivers[..n.min(self.drivers.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    pub fn summary(&self) -> DatasetSummary {
        let races: BTreeSet<i64> = self.results.iter().map(|r| r.race_id).collect();
        let years = self.results.iter().map(|r| r.year).minmax().into_option();
        DatasetSummary {
            total_drivers: self.drivers.len(),
            total_races: races.len(),
            first_year: years.map(|(first, _)| first),
            last_year: years.map(|(_, last)| last),
        }
    }

    pub fn profile(&self, driver_id: i64) -> DriverProfile {
        let rows: Vec<&RaceResult> = self
            .results
            .iter()
            .filter(|r| r.driver_id == driver_id)
            .collect();

        let mut yearly: BTreeMap<i32, f64> = BTreeMap::new();
        for row in &rows {
            *yearly.entry(row.year).or_default() += row.points;
        }

        let podiums = rows
            .iter()
            .filter(|r| (1..=3).contains(&r.position_order))
            .map(|r| r.race_name.clone())
            .counts()
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            .take(TOP_PODIUMS)
            .collect();

        let positions = rows
            .iter()
            .filter(|r| r.position_order > 0)
            .map(|r| r.position_order)
            .counts()
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            .take(TOP_POSITIONS)
            .collect();

        // grid 0 is a pit-lane start or unknown slot
        let grid_vs_finish = rows
            .iter()
            .filter(|r| r.grid > 0.0 && r.position_order > 0)
            .take(GRID_FINISH_LIMIT)
            .map(|r| GridFinish {
                grid: r.grid,
                position: r.position_order,
                points: r.points,
                race_name: r.race_name.clone(),
                year: r.year,
            })
            .collect();

        DriverProfile {
            driver_id,
            yearly_points: yearly.into_iter().collect(),
            podiums,
            positions,
            grid_vs_finish,
        }
    }
}

/// Group results per driver: points summed, grid averaged, rows counted.
pub fn aggregate_drivers(results: &[RaceResult]) -> Vec<DriverAggregate> {
    struct Acc<'a> {
        name: &'a str,
        points: f64,
        grid_total: f64,
        rows: u32,
    }

    let mut groups: HashMap<i64, Acc<'_>> = HashMap::new();
    for r in results {
        let acc = groups.entry(r.driver_id).or_insert(Acc {
            name: &r.driver_name,
            points: 0.0,
            grid_total: 0.0,
            rows: 0,
        });
        acc.points += r.points;
        acc.grid_total += r.grid;
        acc.rows += 1;
    }

    groups
        .into_iter()
        .sorted_by_key(|(id, _)| *id)
        .map(|(id, acc)| {
            DriverAggregate::new(
                id,
                acc.name,
                acc.points,
                acc.grid_total / f64::from(acc.rows),
                acc.rows,
            )
        })
        .collect()
}
