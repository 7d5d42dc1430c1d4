//! Three-way target priority derived from `Region::valid_target`

use serde::Serialize;

use crate::region::model::Region;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TargetClass {
    Unsuitable,
    Marginal,
    Prime,
}

impl TargetClass {
    /// RGB fill used for the region's name cell in the report
    pub fn fill_color(self) -> u32 {
        match self {
            TargetClass::Unsuitable => 0xFF0000,
            TargetClass::Marginal => 0xFFFF00,
            TargetClass::Prime => 0x00FF00,
        }
    }
}

/// Classify a region as a target.
///
/// `Prime` requires the region to be unpassworded, which `valid_target`
/// already excludes, so no region currently reaches it.
pub fn classify(region: &Region) -> TargetClass {
    if !region.valid_target() {
        TargetClass::Unsuitable
    } else if !region.passworded() && region.founderless() {
        TargetClass::Prime
    } else {
        TargetClass::Marginal
    }
}
