mod age_group;
mod case_snapshot;
mod positive_case;

pub use age_group::AgeGroup;
pub use case_snapshot::{
    CaseSnapshot, NationalTotals, SnapshotLevel, SnapshotWithFacilityCount, SNAPSHOT_COLUMNS,
};
pub use positive_case::PositiveCase;
