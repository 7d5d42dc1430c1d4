//! One complete run: fetch, parse, tag, estimate, report

use std::io;
use std::path::PathBuf;

use crate::core::config::LookoutConfig;
use crate::core::error::{LookoutError, Result};
use crate::fetch::{NsClient, FOUNDERLESS_TAG, PASSWORD_TAG};
use crate::ingest::{parse_gzipped_dump, read_dump_file};
use crate::region::{Region, RegionRecord, RegionTags};
use crate::report::{write_workbook, WorldSummary};
use crate::schedule::{estimate, major_update_length, UpdateSchedule};

/// Outcome of a finished run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub world: WorldSummary,
    pub output: PathBuf,
}

/// Turn census records into an estimated schedule.
///
/// Records must be in update order. The major update length is measured
/// from the first and last regions; the minor length is given.
pub fn build_schedule(
    records: &[RegionRecord],
    tags: &RegionTags,
    minor_length: u64,
) -> Result<UpdateSchedule> {
    let regions = records
        .iter()
        .enumerate()
        .map(|(index, record)| Region::from_record(index, record))
        .collect::<Result<Vec<_>>>()?;

    let regions = tags.apply(regions);
    let major_length = major_update_length(&regions)?;
    tracing::info!(
        "{} regions; major update took {}s, minor update configured at {}s",
        regions.len(),
        major_length,
        minor_length
    );

    estimate(regions, major_length, minor_length)
}

async fn load_records(client: &NsClient, config: &LookoutConfig) -> Result<Vec<RegionRecord>> {
    if let Some(path) = config.dump_path.clone() {
        tracing::info!("Reading region dump from {}", path.display());
        return spawn_parse(move || read_dump_file(&path)).await;
    }

    let bytes = client.fetch_dump().await?;
    spawn_parse(move || parse_gzipped_dump(&bytes)).await
}

/// Run a dump parse off the async workers
async fn spawn_parse<F>(parse: F) -> Result<Vec<RegionRecord>>
where
    F: FnOnce() -> Result<Vec<RegionRecord>> + Send + 'static,
{
    tokio::task::spawn_blocking(parse)
        .await
        .map_err(|e| LookoutError::Io(io::Error::new(io::ErrorKind::Other, e)))?
}

/// Execute a full run and write the workbook
pub async fn run(config: &LookoutConfig) -> Result<RunSummary> {
    config.validate()?;
    let client = NsClient::from_config(config)?;

    let (records, passworded, founderless) = tokio::try_join!(
        load_records(&client, config),
        client.fetch_tagged(PASSWORD_TAG),
        client.fetch_tagged(FOUNDERLESS_TAG),
    )?;

    let tags = RegionTags::new(passworded, founderless);
    let schedule = build_schedule(&records, &tags, config.minor_update_length)?;

    let today = chrono::Local::now().date_naive();
    let world = WorldSummary::new(&schedule, today);
    let output = config.output_path(today);
    write_workbook(&output, &schedule, &world, config.minified)?;

    Ok(RunSummary { world, output })
}
