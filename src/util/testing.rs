//! Shared setup for unit and integration tests.

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "f1dash=trace");
        }
        setup_test_logging();
        colored::control::set_override(false);
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_target(true)
            .with_test_writer()
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

pub const DRIVERS_CSV: &str = "\
driverId,driverRef,number,code,forename,surname,dob,nationality,url
1,hamilton,44,HAM,Lewis,Hamilton,1985-01-07,British,http://x
2,senna,\\N,SEN,Ayrton,Senna,1960-03-21,Brazilian,http://x
3,perez,11,PER,Sergio,Pérez,1990-01-26,Mexican,http://x
4,ghost,\\N,\\N,Nobody,Atall,1900-01-01,None,http://x
";

pub const RACES_CSV: &str = "\
raceId,year,round,circuitId,name,date,time,url
10,1988,1,1,Brazilian Grand Prix,1988-04-03,\\N,http://x
11,1988,2,2,Monaco Grand Prix,1988-05-15,\\N,http://x
20,2020,1,3,Austrian Grand Prix,2020-07-05,13:10:00,http://x
";

pub const RESULTS_CSV: &str = "\
resultId,raceId,driverId,constructorId,number,grid,position,positionText,positionOrder,points,laps,statusId
1,10,2,1,12,1,1,1,1,9,60,1
2,11,2,1,12,1,\\N,R,11,0,66,3
3,20,1,131,44,5,1,1,1,25,71,1
4,20,3,211,11,\\N,2,2,2,18,71,1
5,11,1,1,1,3,2,2,2,6,78,1
6,99,2,1,12,2,1,1,1,9,60,1
7,10,77,1,1,4,3,3,3,4,60,1
";

/// Write a small dataset (drivers, races and results) into `dir`.
///
/// Result 6 names an unknown race and result 7 an unknown driver; both
/// drop out of the join. Sergio Pérez is written latin-1 encoded.
pub fn write_dataset(dir: &Path) -> io::Result<()> {
    let drivers: Vec<u8> = DRIVERS_CSV
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect();
    fs::write(dir.join("drivers.csv"), drivers)?;
    fs::write(dir.join("races.csv"), RACES_CSV)?;
    fs::write(dir.join("results.csv"), RESULTS_CSV)?;
    Ok(())
}
