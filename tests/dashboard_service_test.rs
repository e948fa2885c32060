//! Tests for DashboardService over a small on-disk dataset.

use std::sync::Arc;

use chrono::NaiveTime;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use f1dash::application::services::DashboardService;
use f1dash::application::ApplicationError;
use f1dash::config::{SampleSizes, Settings};
use f1dash::domain::{DomainError, SearchMethod, SortAlgorithm, SortField};
use f1dash::infrastructure::di::ServiceContainer;
use f1dash::infrastructure::traits::{FixedClock, RealFileSystem};
use f1dash::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn container(settings: Settings) -> ServiceContainer {
    let clock = FixedClock(NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    ServiceContainer::with_deps(settings, Arc::new(RealFileSystem), Arc::new(clock))
}

/// Dashboard plus the directory backing it, which must outlive the test.
#[fixture]
fn dashboard() -> (TempDir, DashboardService) {
    let temp = TempDir::new().unwrap();
    testing::write_dataset(temp.path()).expect("write dataset");
    let dashboard = container(Settings::default())
        .dashboard_from(temp.path())
        .expect("load dashboard");
    (temp, dashboard)
}

fn is_domain(err: &ApplicationError, pred: impl Fn(&DomainError) -> bool) -> bool {
    matches!(err, ApplicationError::Domain(e) if pred(e))
}

#[rstest]
fn given_dataset_when_sorting_then_highest_points_first(
    dashboard: (TempDir, DashboardService),
    #[values(SortAlgorithm::Quick, SortAlgorithm::Merge, SortAlgorithm::Insertion)]
    algorithm: SortAlgorithm,
) {
    let (_temp, dashboard) = dashboard;

    let output = dashboard.sort(algorithm, SortField::Points);

    let ids: Vec<i64> = output.records.value.iter().map(|d| d.driver_id).collect();
    assert_eq!(ids, vec![1, 3, 2]);
    assert_eq!(output.algorithm, algorithm);
    assert!(output.records.millis() >= 0.0);
}

#[test]
fn given_small_sample_setting_when_sorting_then_only_leading_records() {
    let temp = TempDir::new().unwrap();
    testing::write_dataset(temp.path()).unwrap();
    let settings = Settings {
        samples: SampleSizes {
            sort: 2,
            ..SampleSizes::default()
        },
        ..Settings::default()
    };
    let dashboard = container(settings).dashboard_from(temp.path()).unwrap();

    let output = dashboard.sort(SortAlgorithm::Bubble, SortField::Points);

    let ids: Vec<i64> = output.records.value.iter().map(|d| d.driver_id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[rstest]
#[case("pérez", SearchMethod::Linear, Some(3))]
#[case("Ayrton Senna", SearchMethod::Binary, Some(2))]
#[case("Fangio", SearchMethod::Linear, None)]
fn given_query_when_searching_then_found_or_none(
    dashboard: (TempDir, DashboardService),
    #[case] query: &str,
    #[case] method: SearchMethod,
    #[case] expected: Option<i64>,
) {
    let (_temp, dashboard) = dashboard;

    let output = dashboard.search(query, method).unwrap();

    assert_eq!(output.record.value.map(|d| d.driver_id), expected);
    assert_eq!(output.method, method);
}

#[rstest]
fn given_blank_query_when_searching_then_missing_field(dashboard: (TempDir, DashboardService)) {
    let (_temp, dashboard) = dashboard;

    let err = dashboard.search("  ", SearchMethod::Linear).unwrap_err();

    assert!(is_domain(&err, |e| *e == DomainError::MissingField("query")));
}

#[rstest]
fn given_unknown_name_when_finding_then_not_found(dashboard: (TempDir, DashboardService)) {
    let (_temp, dashboard) = dashboard;

    let err = dashboard.find("Fangio", SearchMethod::Linear).unwrap_err();

    assert!(is_domain(&err, |e| matches!(e, DomainError::NotFound(q) if q == "Fangio")));
}

#[rstest]
fn given_dataset_when_bucketing_then_surnames_by_name_length(
    dashboard: (TempDir, DashboardService),
) {
    let (_temp, dashboard) = dashboard;

    let buckets = dashboard.buckets(None).unwrap();

    assert_eq!(buckets.len(), 10);
    assert_eq!(buckets[&2], vec!["Senna", "Pérez"]);
    assert_eq!(buckets[&4], vec!["Hamilton"]);
}

#[rstest]
fn given_zero_bucket_override_when_bucketing_then_out_of_domain(
    dashboard: (TempDir, DashboardService),
) {
    let (_temp, dashboard) = dashboard;

    let err = dashboard.buckets(Some(0)).unwrap_err();

    assert!(is_domain(&err, |e| matches!(e, DomainError::OutOfDomain { .. })));
}

#[rstest]
fn given_text_when_hashing_then_digest_and_empty_rejected(dashboard: (TempDir, DashboardService)) {
    let (_temp, dashboard) = dashboard;

    assert_eq!(
        dashboard.sha256("abc").unwrap(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    let err = dashboard.sha256("").unwrap_err();
    assert!(is_domain(&err, |e| *e == DomainError::MissingField("text")));
}

#[rstest]
fn given_dataset_when_building_tree_then_ranking_matches_sort(
    dashboard: (TempDir, DashboardService),
) {
    let (_temp, dashboard) = dashboard;

    let tree = dashboard.tree();

    let ranking: Vec<i64> = tree.value.ranking().iter().map(|d| d.driver_id).collect();
    assert_eq!(ranking, vec![1, 3, 2]);
}

#[rstest]
#[case(5, 120)]
#[case(20, 2_432_902_008_176_640_000)]
fn given_bounded_input_when_factorial_then_value(
    dashboard: (TempDir, DashboardService),
    #[case] n: i64,
    #[case] expected: u64,
) {
    let (_temp, dashboard) = dashboard;

    assert_eq!(dashboard.factorial(n).unwrap().value, expected);
}

#[rstest]
#[case(0)]
#[case(-3)]
#[case(21)]
fn given_out_of_range_input_when_factorial_then_out_of_domain(
    dashboard: (TempDir, DashboardService),
    #[case] n: i64,
) {
    let (_temp, dashboard) = dashboard;

    let err = dashboard.factorial(n).unwrap_err();

    assert!(is_domain(&err, |e| matches!(e, DomainError::OutOfDomain { .. })));
}

#[rstest]
fn given_bounded_input_when_fibonacci_then_value_and_limit_enforced(
    dashboard: (TempDir, DashboardService),
) {
    let (_temp, dashboard) = dashboard;

    assert_eq!(dashboard.fibonacci(10).unwrap().value, 55);
    assert!(dashboard.fibonacci(31).is_err());
}

#[rstest]
fn given_dataset_when_summing_points_then_total(dashboard: (TempDir, DashboardService)) {
    let (_temp, dashboard) = dashboard;

    assert_eq!(dashboard.total_points().value, 58.0);
}

#[rstest]
fn given_found_driver_when_profiling_then_profile_for_that_driver(
    dashboard: (TempDir, DashboardService),
) {
    let (_temp, dashboard) = dashboard;
    let senna = dashboard.find("senna", SearchMethod::Linear).unwrap();

    let profile = dashboard.profile(&senna);

    assert_eq!(profile.driver_id, 2);
    assert_eq!(profile.yearly_points, vec![(1988, 9.0)]);
    assert_eq!(dashboard.summary().total_drivers, 3);
}
