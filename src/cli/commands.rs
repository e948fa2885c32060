//! Command dispatch: one handler per subcommand

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::DashboardService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::session::run_session;
use crate::config::{global_config_path, Settings};
use crate::domain::{DomainError, SearchMethod, SortAlgorithm, SortField};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Names listed per bucket before the rest is summarised.
const BUCKET_PREVIEW: usize = 5;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load()?;
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::Sort {
            algorithm,
            field,
            top,
        }) => _sort(&dashboard(cli, &container)?, *algorithm, *field, *top),
        Some(Commands::Search {
            query,
            method,
            profile,
        }) => _search(&dashboard(cli, &container)?, query, *method, *profile),
        Some(Commands::Buckets { buckets }) => _buckets(&dashboard(cli, &container)?, *buckets),
        Some(Commands::Sha256 { text }) => _sha256(&dashboard(cli, &container)?, text),
        Some(Commands::Tree { render }) => _tree(&dashboard(cli, &container)?, *render),
        Some(Commands::Factorial { n }) => _factorial(&dashboard(cli, &container)?, *n),
        Some(Commands::Fibonacci { n }) => _fibonacci(&dashboard(cli, &container)?, *n),
        Some(Commands::Sum) => _sum(&dashboard(cli, &container)?),
        Some(Commands::Info) => _info(&dashboard(cli, &container)?),
        Some(Commands::Session) => _session(&container),
        Some(Commands::Config { command }) => _config(&container.settings, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None if cli.info => Ok(()),
        None => Err(CliError::Usage(
            "no command given, see 'f1dash --help'".to_string(),
        )),
    }
}

/// Load the dataset from `--data-dir`, falling back to the configured directory.
fn dashboard(cli: &Cli, container: &ServiceContainer) -> CliResult<DashboardService> {
    let service = match &cli.data_dir {
        Some(dir) => container.dashboard_from(dir)?,
        None => container.dashboard()?,
    };
    if service.dataset().is_empty() {
        output::warning("dataset contains no joined results");
    }
    Ok(service)
}

#[instrument(skip(dashboard))]
fn _sort(
    dashboard: &DashboardService,
    algorithm: Option<SortAlgorithm>,
    field: Option<SortField>,
    top: usize,
) -> CliResult<()> {
    let algorithm = algorithm.unwrap_or(dashboard.settings().default_algorithm);
    let field = field.unwrap_or(dashboard.settings().default_field);
    let result = dashboard.sort(algorithm, field);

    output::header(&format!(
        "{} by {} ({})",
        result.algorithm,
        result.field,
        result.algorithm.complexity()
    ));
    output::info(&format!(
        "{:>4}  {:<28} {:>9} {:>7} {:>5}",
        "#", "Driver", "Points", "Grid", "Laps"
    ));
    for (rank, driver) in result.records.value.iter().take(top).enumerate() {
        output::info(&format!(
            "{:>4}  {:<28} {:>9.1} {:>7.2} {:>5}",
            rank + 1,
            driver.name,
            driver.points,
            driver.grid,
            driver.laps
        ));
    }
    output::elapsed(&result.records);
    Ok(())
}

#[instrument(skip(dashboard))]
fn _search(
    dashboard: &DashboardService,
    query: &str,
    method: SearchMethod,
    profile: bool,
) -> CliResult<()> {
    let result = dashboard.search(query, method)?;
    let found = result.record.value.clone();
    output::elapsed(&result.record);

    let Some(driver) = found else {
        return Err(DomainError::NotFound(query.to_string()).into());
    };
    output::success(&driver);

    if profile {
        let profile = dashboard.profile(&driver);
        output::header("Points per year");
        for (year, points) in &profile.yearly_points {
            output::detail(&format!("{year}: {points:.1}"));
        }
        output::header("Podiums by grand prix");
        if profile.podiums.is_empty() {
            output::detail("none");
        }
        for (race, count) in &profile.podiums {
            output::detail(&format!("{race}: {count}"));
        }
        output::header("Finishing positions");
        for (position, count) in &profile.positions {
            output::detail(&format!("P{position}: {count}"));
        }
        output::header("Starting grid vs finish");
        if profile.grid_vs_finish.is_empty() {
            output::detail("none");
        }
        for start in &profile.grid_vs_finish {
            output::detail(&format!(
                "{} {}: grid {:.0} -> P{} ({:.1} pts)",
                start.year, start.race_name, start.grid, start.position, start.points
            ));
        }
    }
    Ok(())
}

#[instrument(skip(dashboard))]
fn _buckets(dashboard: &DashboardService, bucket_count: Option<usize>) -> CliResult<()> {
    let buckets = dashboard.buckets(bucket_count)?;
    output::header(&format!("Hash table ({} buckets, key = name length)", buckets.len()));
    for (index, names) in &buckets {
        let shown = names.iter().take(BUCKET_PREVIEW).join(", ");
        match names.len().saturating_sub(BUCKET_PREVIEW) {
            0 => output::info(&format!("{index:>3}: {shown}")),
            more => output::info(&format!("{index:>3}: {shown} (+{more} more)")),
        }
    }
    Ok(())
}

#[instrument(skip(dashboard))]
fn _sha256(dashboard: &DashboardService, text: &str) -> CliResult<()> {
    let digest = dashboard.sha256(text)?;
    output::action("SHA-256", &digest);
    Ok(())
}

#[instrument(skip(dashboard))]
fn _tree(dashboard: &DashboardService, render: bool) -> CliResult<()> {
    let tree = dashboard.tree();
    output::header(&format!(
        "Ranking from points tree ({} nodes, depth {})",
        tree.value.len(),
        tree.value.depth()
    ));
    for (rank, driver) in tree.value.ranking().iter().enumerate() {
        output::info(&format!("{:>4}  {:<28} {:>9.1}", rank + 1, driver.name, driver.points));
    }
    output::elapsed(&tree);
    if render {
        output::info(&tree.value.to_tree_string());
    }
    Ok(())
}

#[instrument(skip(dashboard))]
fn _factorial(dashboard: &DashboardService, n: i64) -> CliResult<()> {
    let result = dashboard.factorial(n)?;
    output::action(&format!("{n}!"), &result.value);
    output::elapsed(&result);
    Ok(())
}

#[instrument(skip(dashboard))]
fn _fibonacci(dashboard: &DashboardService, n: i64) -> CliResult<()> {
    let result = dashboard.fibonacci(n)?;
    output::action(&format!("fib({n})"), &result.value);
    output::elapsed(&result);
    Ok(())
}

#[instrument(skip(dashboard))]
fn _sum(dashboard: &DashboardService) -> CliResult<()> {
    let result = dashboard.total_points();
    output::action("Total points", &format!("{:.1}", result.value));
    output::elapsed(&result);
    Ok(())
}

#[instrument(skip(dashboard))]
fn _info(dashboard: &DashboardService) -> CliResult<()> {
    let summary = dashboard.summary();
    output::header("Dataset");
    output::action("Drivers", &summary.total_drivers);
    output::action("Races", &summary.total_races);
    match (summary.first_year, summary.last_year) {
        (Some(first), Some(last)) => output::action("Seasons", &format!("{first}-{last}")),
        _ => output::action("Seasons", "none"),
    }
    Ok(())
}

#[instrument(skip(container))]
fn _session(container: &ServiceContainer) -> CliResult<()> {
    let mut session = container.session();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let result = run_session(&mut session, stdin.lock(), &mut stdout)
        .map_err(InfraError::terminal("session"));
    match result {
        Err(e) if e.is_disconnect() => debug!("terminal closed: {e}"),
        result => result?,
    }
    debug!("session finished");
    Ok(())
}

#[instrument(skip(settings))]
fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory on this platform"),
        },
    }
    Ok(())
}
