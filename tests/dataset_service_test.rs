//! Tests for DatasetService: CSV parsing, joins and derived views.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use f1dash::application::services::{DatasetService, DRIVERS_FILE, RACES_FILE, RESULTS_FILE};
use f1dash::application::ApplicationError;
use f1dash::domain::{Dataset, DatasetSummary, GridFinish, SortAlgorithm, SortField};
use f1dash::infrastructure::traits::{FileSystem, RealFileSystem};
use f1dash::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

/// Files held in memory, keyed by full path.
#[derive(Default)]
struct MemoryFileSystem {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryFileSystem {
    fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.as_bytes().to_vec());
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files.keys().any(|p| p.parent() == Some(path))
    }
}

#[fixture]
fn dataset_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    testing::write_dataset(temp.path()).expect("write dataset");
    temp
}

#[fixture]
fn dataset(dataset_dir: TempDir) -> Dataset {
    let service = DatasetService::new(Arc::new(RealFileSystem));
    service.load(dataset_dir.path()).expect("load dataset")
}

#[rstest]
fn given_dataset_dir_when_loading_then_unmatched_results_are_dropped(dataset: Dataset) {
    assert_eq!(dataset.results().len(), 5);
    assert!(dataset.results().iter().all(|r| r.race_id != 99));
    assert!(dataset.results().iter().all(|r| r.driver_id != 77));
}

#[rstest]
fn given_dataset_dir_when_loading_then_aggregates_ordered_by_driver_id(dataset: Dataset) {
    let drivers = dataset.drivers();

    let ids: Vec<i64> = drivers.iter().map(|d| d.driver_id).collect();
    assert_eq!(ids, vec![1, 2, 3], "driver without results has no aggregate");

    let hamilton = &drivers[0];
    assert_eq!(hamilton.name, "Lewis Hamilton");
    assert_eq!(hamilton.points, 31.0);
    assert_eq!(hamilton.grid, 4.0);
    assert_eq!(hamilton.laps, 2);
}

#[rstest]
fn given_missing_grid_when_loading_then_counts_as_zero(dataset: Dataset) {
    let perez = &dataset.drivers()[2];

    assert_eq!(perez.name, "Sergio Pérez", "latin-1 decoded");
    assert_eq!(perez.grid, 0.0);
    assert_eq!(perez.points, 18.0);
}

#[rstest]
fn given_dataset_when_summarising_then_counts_and_season_range(dataset: Dataset) {
    assert_eq!(
        dataset.summary(),
        DatasetSummary {
            total_drivers: 3,
            total_races: 3,
            first_year: Some(1988),
            last_year: Some(2020),
        }
    );
}

#[rstest]
fn given_driver_when_profiling_then_years_podiums_and_positions(dataset: Dataset) {
    let profile = dataset.profile(1);

    assert_eq!(profile.yearly_points, vec![(1988, 6.0), (2020, 25.0)]);
    assert_eq!(
        profile.podiums,
        vec![
            ("Austrian Grand Prix".to_string(), 1),
            ("Monaco Grand Prix".to_string(), 1)
        ]
    );
    assert_eq!(profile.positions, vec![(1, 1), (2, 1)]);
}

#[rstest]
fn given_non_podium_finish_when_profiling_then_only_position_counted(dataset: Dataset) {
    let profile = dataset.profile(2);

    assert_eq!(profile.podiums, vec![("Brazilian Grand Prix".to_string(), 1)]);
    assert_eq!(profile.positions, vec![(1, 1), (11, 1)]);
}

#[rstest]
fn given_driver_when_profiling_then_grid_vs_finish_in_result_order(dataset: Dataset) {
    let profile = dataset.profile(1);

    assert_eq!(
        profile.grid_vs_finish,
        vec![
            GridFinish {
                grid: 5.0,
                position: 1,
                points: 25.0,
                race_name: "Austrian Grand Prix".to_string(),
                year: 2020,
            },
            GridFinish {
                grid: 3.0,
                position: 2,
                points: 6.0,
                race_name: "Monaco Grand Prix".to_string(),
                year: 1988,
            },
        ]
    );
}

#[rstest]
fn given_unknown_grid_when_profiling_then_start_left_out_of_grid_vs_finish(dataset: Dataset) {
    assert!(dataset.profile(3).grid_vs_finish.is_empty());
}

#[test]
fn given_many_classified_starts_when_profiling_then_grid_vs_finish_capped_at_fifty() {
    let dir = PathBuf::from("/data");
    let results: String = (1..=60)
        .map(|race| format!("{race},1,{},{},1\n", race % 20 + 1, race % 10))
        .collect();
    let races: String = (1..=60)
        .map(|race| format!("{race},{},Race {race}\n", 1950 + race))
        .collect();
    let fs = MemoryFileSystem::default()
        .with_file(dir.join(DRIVERS_FILE), "driverId,forename,surname\n1,Graham,Hill\n")
        .with_file(dir.join(RACES_FILE), &format!("raceId,year,name\n{races}"))
        .with_file(
            dir.join(RESULTS_FILE),
            &format!("raceId,driverId,grid,positionOrder,points\n{results}"),
        );
    let service = DatasetService::new(Arc::new(fs));

    let profile = service.load(&dir).expect("load").profile(1);

    // every tenth race has position 0 and is skipped
    assert_eq!(profile.grid_vs_finish.len(), 50);
    assert!(profile.grid_vs_finish.iter().all(|s| s.position > 0));
    assert_eq!(profile.grid_vs_finish[0].race_name, "Race 1");
    assert_eq!(profile.grid_vs_finish[49].race_name, "Race 55");
}

#[test]
fn given_missing_directory_when_loading_then_dataset_not_found() {
    let temp = TempDir::new().unwrap();
    let service = DatasetService::new(Arc::new(RealFileSystem));

    let result = service.load(&temp.path().join("nope"));

    assert!(matches!(result, Err(ApplicationError::DatasetNotFound(_))));
}

#[test]
fn given_missing_column_when_loading_then_invalid_dataset() {
    let dir = PathBuf::from("/data");
    let fs = MemoryFileSystem::default()
        .with_file(dir.join(DRIVERS_FILE), "driverId,forename\n1,Lewis\n")
        .with_file(dir.join(RACES_FILE), "raceId,year,name\n1,2020,Austrian Grand Prix\n")
        .with_file(dir.join(RESULTS_FILE), "raceId,driverId,grid,positionOrder,points\n");
    let service = DatasetService::new(Arc::new(fs));

    let result = service.load(&dir);

    match result {
        Err(ApplicationError::InvalidDataset { path, message }) => {
            assert_eq!(path, dir.join(DRIVERS_FILE));
            assert!(message.contains("surname"));
        }
        other => panic!("expected InvalidDataset, got {other:?}"),
    }
}

#[test]
fn given_missing_results_file_when_loading_then_dataset_not_found() {
    let dir = PathBuf::from("/data");
    let fs = MemoryFileSystem::default()
        .with_file(dir.join(DRIVERS_FILE), "driverId,forename,surname\n1,Lewis,Hamilton\n")
        .with_file(dir.join(RACES_FILE), "raceId,year,name\n1,2020,Austrian Grand Prix\n");
    let service = DatasetService::new(Arc::new(fs));

    let result = service.load(&dir);

    assert!(matches!(result, Err(ApplicationError::DatasetNotFound(p)) if p == dir.join(RESULTS_FILE)));
}

#[test]
fn given_in_memory_files_when_loading_then_non_numeric_points_count_as_zero() {
    let dir = PathBuf::from("/data");
    let fs = MemoryFileSystem::default()
        .with_file(dir.join(DRIVERS_FILE), "driverId,forename,surname\n1,Jim,Clark\n")
        .with_file(dir.join(RACES_FILE), "raceId,year,name\n5,1963,Dutch Grand Prix\n")
        .with_file(
            dir.join(RESULTS_FILE),
            "raceId,driverId,grid,positionOrder,points\n5,1,1,1,9\n5,1,2,1,n/a\n",
        );
    let service = DatasetService::new(Arc::new(fs));

    let dataset = service.load(&dir).expect("load");

    let clark = &dataset.drivers()[0];
    assert_eq!(clark.points, 9.0);
    assert_eq!(clark.grid, 1.5);
    assert_eq!(clark.laps, 2);
}

#[test]
fn given_nan_grid_cell_when_loading_then_counts_as_zero_and_sorts() {
    let dir = PathBuf::from("/data");
    let fs = MemoryFileSystem::default()
        .with_file(
            dir.join(DRIVERS_FILE),
            "driverId,forename,surname\n1,Lewis,Hamilton\n2,Ayrton,Senna\n3,Jim,Clark\n",
        )
        .with_file(dir.join(RACES_FILE), "raceId,year,name\n10,1988,Brazilian Grand Prix\n")
        .with_file(
            dir.join(RESULTS_FILE),
            "raceId,driverId,grid,positionOrder,points\n10,1,3,1,9\n10,2,NaN,2,18\n10,3,1,3,4\n",
        );
    let service = DatasetService::new(Arc::new(fs));

    let dataset = service.load(&dir).expect("load");

    let grids: Vec<f64> = dataset.drivers().iter().map(|d| d.grid).collect();
    assert_eq!(grids, vec![3.0, 0.0, 1.0]);

    let sorted = SortAlgorithm::Quick.sort(dataset.drivers(), SortField::Grid);
    let ids: Vec<i64> = sorted.iter().map(|d| d.driver_id).collect();
    assert_eq!(ids, vec![1, 3, 2]);
}
