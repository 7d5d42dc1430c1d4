//! World-level figures shown beside the region table

use serde::Serialize;

use crate::core::config::VERSION;
use crate::schedule::UpdateSchedule;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorldSummary {
    pub total_nations: u64,
    pub major_length: u64,
    pub minor_length: u64,
    pub regions: usize,
    pub version: String,
    /// `YYYY-MM-DD`
    pub generated: String,
}

impl WorldSummary {
    pub fn new(schedule: &UpdateSchedule, generated: chrono::NaiveDate) -> Self {
        Self {
            total_nations: schedule.total_nations,
            major_length: schedule.major_length,
            minor_length: schedule.minor_length,
            regions: schedule.regions.len(),
            version: VERSION.to_string(),
            generated: generated.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn major_secs_per_nation(&self) -> Option<f64> {
        ratio(self.major_length, self.total_nations)
    }

    pub fn major_nations_per_sec(&self) -> Option<f64> {
        ratio(self.total_nations, self.major_length)
    }

    pub fn minor_secs_per_nation(&self) -> Option<f64> {
        ratio(self.minor_length, self.total_nations)
    }

    pub fn minor_nations_per_sec(&self) -> Option<f64> {
        ratio(self.total_nations, self.minor_length)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} regions, {} nations; major update {}s, minor update {}s",
            self.regions, self.total_nations, self.major_length, self.minor_length,
        )
    }
}

/// None when the divisor is zero
fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}
