//! Update-time estimation
//!
//! Update visits regions in census order and its progress is assumed to be
//! linear in the number of nations already processed. A region's estimated
//! offset into an update is therefore
//! `nations_before_it * update_length / total_nations`.

use std::fmt;

use serde::Serialize;

use crate::core::error::{LookoutError, Result};
use crate::region::{classify, Region, TargetClass};

/// Whole seconds elapsed since an update started
///
/// Displays as `S:M:H` with no zero padding. Hours are unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UpdateOffset(pub u64);

impl UpdateOffset {
    pub fn seconds(self) -> u64 {
        self.0 % 60
    }

    pub fn minutes(self) -> u64 {
        (self.0 / 60) % 60
    }

    pub fn hours(self) -> u64 {
        self.0 / 3600
    }
}

impl fmt::Display for UpdateOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.seconds(), self.minutes(), self.hours())
    }
}

/// A region with its position in both updates
#[derive(Clone, Debug, Serialize)]
pub struct ScheduledRegion {
    pub region: Region,
    /// Nations processed before this region's turn
    pub cumulative_nations: u64,
    pub minor: UpdateOffset,
    pub major: UpdateOffset,
}

impl ScheduledRegion {
    pub fn minorup(&self) -> String {
        self.minor.to_string()
    }

    pub fn majorup(&self) -> String {
        self.major.to_string()
    }

    pub fn class(&self) -> TargetClass {
        classify(&self.region)
    }
}

/// Estimated schedule for a whole census, in visitation order
#[derive(Clone, Debug, Serialize)]
pub struct UpdateSchedule {
    pub regions: Vec<ScheduledRegion>,
    pub total_nations: u64,
    pub major_length: u64,
    pub minor_length: u64,
}

pub fn total_nations(regions: &[Region]) -> Result<u64> {
    cumulative_nations(regions).map(|prefix| prefix.last().copied().unwrap_or_default())
}

/// Prefix sums of population: element `i` is the population of the first
/// `i` regions. The result has one more element than `regions`.
pub fn cumulative_nations(regions: &[Region]) -> Result<Vec<u64>> {
    let mut prefix = Vec::with_capacity(regions.len() + 1);
    let mut running = 0u64;
    prefix.push(running);
    for (index, region) in regions.iter().enumerate() {
        running = running.checked_add(region.numnations).ok_or_else(|| {
            LookoutError::malformed(index, &region.name, "NUMNATIONS overflows the census total")
        })?;
        prefix.push(running);
    }
    Ok(prefix)
}

/// Measured major update length: last region's update time minus the first's.
pub fn major_update_length(regions: &[Region]) -> Result<u64> {
    let (first, last) = match (regions.first(), regions.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(LookoutError::EmptyDataset),
    };

    // Widened so any pair of i64 timestamps subtracts exactly
    let span = i128::from(last.update_time) - i128::from(first.update_time);
    u64::try_from(span).map_err(|_| LookoutError::NonMonotonicUpdate {
        first_name: first.name.clone(),
        first: first.update_time,
        last_name: last.name.clone(),
        last: last.update_time,
    })
}

fn offset_at(processed: u64, update_length: u64, total: u64) -> UpdateOffset {
    let seconds = u128::from(processed) * u128::from(update_length) / u128::from(total);
    UpdateOffset(seconds as u64)
}

/// Estimate minor and major update offsets for every region.
///
/// `regions` must already be in update order; it is not re-sorted.
pub fn estimate(
    regions: Vec<Region>,
    major_length: u64,
    minor_length: u64,
) -> Result<UpdateSchedule> {
    let prefix = cumulative_nations(&regions)?;
    let total = prefix.last().copied().unwrap_or_default();
    if total == 0 {
        return Err(LookoutError::EmptyDataset);
    }

    let scheduled = regions
        .into_iter()
        .zip(prefix)
        .map(|(region, processed)| ScheduledRegion {
            region,
            cumulative_nations: processed,
            minor: offset_at(processed, minor_length, total),
            major: offset_at(processed, major_length, total),
        })
        .collect();

    tracing::debug!(total, major_length, minor_length, "Estimated update schedule");

    Ok(UpdateSchedule {
        regions: scheduled,
        total_nations: total,
        major_length,
        minor_length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::model::tests::region;
    use proptest::prelude::*;

    #[test]
    fn test_offset_format_not_padded() {
        assert_eq!(UpdateOffset(0).to_string(), "0:0:0");
        assert_eq!(UpdateOffset(3661).to_string(), "1:1:1");
        assert_eq!(UpdateOffset(59).to_string(), "59:0:0");
        assert_eq!(UpdateOffset(90_000).to_string(), "0:0:25");
    }

    #[test]
    fn test_three_region_scenario() {
        let regions = vec![
            region("Alpha", 100, 1_000),
            region("Beta", 200, 1_500),
            region("Gamma", 700, 2_000),
        ];
        let major = major_update_length(&regions).unwrap();
        assert_eq!(major, 1000);

        let schedule = estimate(regions, major, 2640).unwrap();
        let prefixes: Vec<u64> = schedule.regions.iter().map(|r| r.cumulative_nations).collect();
        assert_eq!(prefixes, vec![0, 100, 300]);

        let gamma = &schedule.regions[2];
        assert_eq!(gamma.major, UpdateOffset(300));
        assert_eq!(gamma.majorup(), "0:5:0");
        assert_eq!(gamma.minor, UpdateOffset(792));
        assert_eq!(gamma.minorup(), "12:13:0");
        assert_eq!(schedule.total_nations, 1000);
    }

    #[test]
    fn test_order_preserved_with_duplicate_names() {
        let regions = vec![
            region("Same", 1, 0),
            region("Other", 1, 1),
            region("Same", 1, 2),
        ];
        let schedule = estimate(regions, 2, 2640).unwrap();
        let names: Vec<&str> = schedule.regions.iter().map(|r| r.region.name.as_str()).collect();
        assert_eq!(names, vec!["Same", "Other", "Same"]);
    }

    #[test]
    fn test_single_region() {
        let regions = vec![region("Alone", 12, 5_000)];
        let major = major_update_length(&regions).unwrap();
        assert_eq!(major, 0);

        let schedule = estimate(regions, major, 2640).unwrap();
        assert_eq!(schedule.regions[0].cumulative_nations, 0);
        assert_eq!(schedule.regions[0].majorup(), "0:0:0");
        assert_eq!(schedule.regions[0].minorup(), "0:0:0");
    }

    #[test]
    fn test_zero_population_is_empty_dataset() {
        let regions = vec![region("Ghost", 0, 0), region("Town", 0, 10)];
        assert!(matches!(
            estimate(regions, 10, 2640),
            Err(LookoutError::EmptyDataset)
        ));
        assert!(matches!(estimate(Vec::new(), 0, 2640), Err(LookoutError::EmptyDataset)));
    }

    #[test]
    fn test_major_length_of_empty_census() {
        assert!(matches!(major_update_length(&[]), Err(LookoutError::EmptyDataset)));
    }

    #[test]
    fn test_negative_major_length_rejected() {
        let regions = vec![region("Late", 1, 2_000), region("Early", 1, 1_000)];
        match major_update_length(&regions) {
            Err(LookoutError::NonMonotonicUpdate {
                first_name,
                first,
                last_name,
                last,
            }) => {
                assert_eq!(first_name, "Late");
                assert_eq!(first, 2_000);
                assert_eq!(last_name, "Early");
                assert_eq!(last, 1_000);
            }
            other => panic!("expected NonMonotonicUpdate, got {:?}", other),
        }
    }

    #[test]
    fn test_extreme_update_times_do_not_overflow() {
        let regions = vec![region("A", 1, i64::MIN), region("B", 1, i64::MAX)];
        assert_eq!(major_update_length(&regions).unwrap(), u64::MAX);

        let schedule = estimate(regions, u64::MAX, 2640).unwrap();
        assert_eq!(schedule.regions[1].major, UpdateOffset(u64::MAX / 2));

        let reversed = vec![region("B", 1, i64::MAX), region("A", 1, i64::MIN)];
        assert!(matches!(
            major_update_length(&reversed),
            Err(LookoutError::NonMonotonicUpdate { .. })
        ));
    }

    #[test]
    fn test_population_overflow_is_malformed() {
        let regions = vec![region("Big", u64::MAX, 0), region("Bigger", 1, 10)];
        match estimate(regions.clone(), 10, 2640) {
            Err(LookoutError::MalformedRecord { index, name, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(name, "Bigger");
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
        assert!(total_nations(&regions).is_err());
        assert!(cumulative_nations(&regions).is_err());
    }

    #[test]
    fn test_floor_division() {
        // 1 * 10 / 3 = 3.33 -> 3
        let regions = vec![region("A", 1, 0), region("B", 2, 10)];
        let schedule = estimate(regions, 10, 10).unwrap();
        assert_eq!(schedule.regions[1].major, UpdateOffset(3));
    }

    proptest! {
        #[test]
        fn prop_last_prefix_excludes_last_region(pops in prop::collection::vec(0u64..10_000, 1..50)) {
            let regions: Vec<Region> = pops
                .iter()
                .enumerate()
                .map(|(i, &n)| region(&format!("R{}", i), n, i as i64))
                .collect();
            let total = total_nations(&regions).unwrap();
            prop_assume!(total > 0);

            let last_pop = regions.last().unwrap().numnations;
            let schedule = estimate(regions, 3600, 2640).unwrap();
            prop_assert_eq!(schedule.regions.last().unwrap().cumulative_nations, total - last_pop);
        }

        #[test]
        fn prop_offsets_never_exceed_length(pops in prop::collection::vec(1u64..10_000, 1..50), major in 0u64..20_000) {
            let regions: Vec<Region> = pops
                .iter()
                .enumerate()
                .map(|(i, &n)| region(&format!("R{}", i), n, i as i64))
                .collect();
            let schedule = estimate(regions, major, 2640).unwrap();
            let mut previous = UpdateOffset(0);
            for r in &schedule.regions {
                prop_assert!(r.major.0 <= major);
                prop_assert!(r.minor.0 <= 2640);
                prop_assert!(r.major >= previous);
                previous = r.major;
            }
        }

        #[test]
        fn prop_offset_components_recompose(t in 0u64..1_000_000) {
            let offset = UpdateOffset(t);
            prop_assert!(offset.seconds() < 60);
            prop_assert!(offset.minutes() < 60);
            prop_assert_eq!(offset.hours() * 3600 + offset.minutes() * 60 + offset.seconds(), t);
        }
    }
}
