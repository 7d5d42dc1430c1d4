//! Spreadsheet output
//!
//! Column and world-data layout follow the long-standing Spyglass sheet so
//! tools that read those sheets keep working.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};

use crate::core::error::Result;
use crate::region::TargetClass;
use crate::report::summary::WorldSummary;
use crate::schedule::{ScheduledRegion, UpdateSchedule};

pub const SHEET_NAME: &str = "Lookout Data";

const REGION_URL: &str = "https://www.nationstates.net/region=";

const HEADERS: [&str; 10] = [
    "Regions",
    "Region Link",
    "# Nations",
    "Tot. Nations",
    "Minor Upd. (est)",
    "Major Upd. (true)",
    "Del. Votes",
    "Del. Endos",
    "WFE",
    "Embassies",
];

/// Columns dropped by a minified sheet
const MINIFIED_DROPPED: usize = 2;

const LABEL_COL: u16 = 11;
const VALUE_COL: u16 = 12;

/// One row of the region table
#[derive(Clone, Debug, PartialEq)]
pub struct ReportRow {
    pub label: String,
    pub link: String,
    pub nations: u64,
    pub cumulative_nations: u64,
    pub minorup: String,
    pub majorup: String,
    pub delegate_votes: u64,
    pub delegate_endorsements: u64,
    pub wfe: Option<String>,
    pub embassies: Option<String>,
    pub class: TargetClass,
}

impl ReportRow {
    pub fn new(scheduled: &ScheduledRegion, minified: bool) -> Self {
        let region = &scheduled.region;
        Self {
            label: region_label(scheduled),
            link: format!("{}{}", REGION_URL, region.name.replace(' ', "_")),
            nations: region.numnations,
            cumulative_nations: scheduled.cumulative_nations,
            minorup: scheduled.minorup(),
            majorup: scheduled.majorup(),
            delegate_votes: region.delegate_votes,
            // The delegate's own vote is not an endorsement
            delegate_endorsements: region.delegate_votes.saturating_sub(1),
            wfe: (!minified).then(|| region.wfe.clone()),
            embassies: (!minified).then(|| region.embassies.join(", ")),
            class: scheduled.class(),
        }
    }
}

/// Region name marked `~` for valid targets or `*` for other passworded regions
fn region_label(scheduled: &ScheduledRegion) -> String {
    let region = &scheduled.region;
    if region.valid_target() {
        format!("{}~", region.name)
    } else if region.passworded() {
        format!("{}*", region.name)
    } else {
        region.name.clone()
    }
}

pub fn build_rows(schedule: &UpdateSchedule, minified: bool) -> Vec<ReportRow> {
    schedule
        .regions
        .iter()
        .map(|r| ReportRow::new(r, minified))
        .collect()
}

/// Build the complete workbook in memory
pub fn build_workbook(
    schedule: &UpdateSchedule,
    summary: &WorldSummary,
    minified: bool,
) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    write_headers(worksheet, minified)?;
    write_world_data(worksheet, summary)?;

    let unsuitable = fill_format(TargetClass::Unsuitable);
    let marginal = fill_format(TargetClass::Marginal);
    let prime = fill_format(TargetClass::Prime);

    for (i, row) in build_rows(schedule, minified).iter().enumerate() {
        let row_num = i as u32 + 1;
        let fill = match row.class {
            TargetClass::Unsuitable => &unsuitable,
            TargetClass::Marginal => &marginal,
            TargetClass::Prime => &prime,
        };
        worksheet.write_string_with_format(row_num, 0, &row.label, fill)?;
        worksheet.write_string(row_num, 1, &row.link)?;
        worksheet.write_number(row_num, 2, row.nations as f64)?;
        worksheet.write_number(row_num, 3, row.cumulative_nations as f64)?;
        worksheet.write_string(row_num, 4, &row.minorup)?;
        worksheet.write_string(row_num, 5, &row.majorup)?;
        worksheet.write_number(row_num, 6, row.delegate_votes as f64)?;
        worksheet.write_number(row_num, 7, row.delegate_endorsements as f64)?;
        if let Some(wfe) = &row.wfe {
            worksheet.write_string(row_num, 8, wfe)?;
        }
        if let Some(embassies) = &row.embassies {
            worksheet.write_string(row_num, 9, embassies)?;
        }
    }

    worksheet.set_column_width(0, 45)?;
    Ok(workbook)
}

/// Build the workbook and save it to `path`
pub fn write_workbook(
    path: &Path,
    schedule: &UpdateSchedule,
    summary: &WorldSummary,
    minified: bool,
) -> Result<()> {
    let mut workbook = build_workbook(schedule, summary, minified)?;
    workbook.save(path)?;
    tracing::info!("Saved {} rows to {}", schedule.regions.len(), path.display());
    Ok(())
}

fn fill_format(class: TargetClass) -> Format {
    Format::new().set_background_color(Color::RGB(class.fill_color()))
}

fn write_headers(worksheet: &mut Worksheet, minified: bool) -> Result<()> {
    let count = if minified {
        HEADERS.len() - MINIFIED_DROPPED
    } else {
        HEADERS.len()
    };
    for (col, header) in HEADERS.iter().take(count).enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    Ok(())
}

fn write_world_data(worksheet: &mut Worksheet, summary: &WorldSummary) -> Result<()> {
    worksheet.write_string(0, LABEL_COL, "World")?;
    worksheet.write_string(0, VALUE_COL, "Data")?;

    let rates: [(u32, &str, Option<f64>); 7] = [
        (1, "Nations", Some(summary.total_nations as f64)),
        (2, "Last Major", Some(summary.major_length as f64)),
        (3, "Secs/Nation", summary.major_secs_per_nation()),
        (4, "Nations/Sec", summary.major_nations_per_sec()),
        (5, "Last Minor", Some(summary.minor_length as f64)),
        (6, "Secs/Nation", summary.minor_secs_per_nation()),
        (7, "Nations/Sec", summary.minor_nations_per_sec()),
    ];
    for (row, label, value) in rates {
        worksheet.write_string(row, LABEL_COL, label)?;
        if let Some(value) = value {
            worksheet.write_number(row, VALUE_COL, value)?;
        }
    }

    worksheet.write_string(9, LABEL_COL, "Lookout Version")?;
    worksheet.write_string(9, VALUE_COL, &summary.version)?;
    worksheet.write_string(10, LABEL_COL, "Date Generated")?;
    worksheet.write_string(10, VALUE_COL, &summary.generated)?;
    Ok(())
}
