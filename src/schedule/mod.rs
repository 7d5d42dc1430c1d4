pub mod estimator;

pub use estimator::{
    cumulative_nations, estimate, major_update_length, total_nations, ScheduledRegion,
    UpdateOffset, UpdateSchedule,
};
