pub mod merged;
pub mod period;
pub mod row;
pub mod volume;

pub use merged::{MergedRow, MergedSet};
pub use period::PeriodTable;
pub use row::{FileFault, TimesheetRecord, TimesheetRow};
pub use volume::VolumeTable;
