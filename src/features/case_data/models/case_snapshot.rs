use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

pub const SNAPSHOT_COLUMNS: &str = r#"
    id, level, region_id, num_of_bed, num_of_icu_bed, occupied_icu_bed,
    num_of_ventilators, occupied_ventilators, num_of_isolation_bed,
    occupied_isolation_bed, total_tested, total_positive, total_death,
    total_in_isolation, total_recovered, total_samples_collected,
    total_samples_pending, total_negative, hotline, active, update_date
"#;

/// Region level a snapshot aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "snapshot_level", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SnapshotLevel {
    Province,
    District,
    Municipality,
}

impl std::fmt::Display for SnapshotLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotLevel::Province => write!(f, "province"),
            SnapshotLevel::District => write!(f, "district"),
            SnapshotLevel::Municipality => write!(f, "municipality"),
        }
    }
}

impl SnapshotLevel {
    /// Region foreign keys `(province_id, district_id, municipality_id)` for a region of this level
    pub fn region_columns(&self, region_id: Uuid) -> (Option<Uuid>, Option<Uuid>, Option<Uuid>) {
        match self {
            SnapshotLevel::Province => (Some(region_id), None, None),
            SnapshotLevel::District => (None, Some(region_id), None),
            SnapshotLevel::Municipality => (None, None, Some(region_id)),
        }
    }
}

/// Point-in-time case counters for one region.
///
/// At most one snapshot per `(level, region_id)` is active.
#[derive(Debug, Clone, FromRow)]
pub struct CaseSnapshot {
    pub id: Uuid,
    pub level: SnapshotLevel,
    pub region_id: Uuid,
    pub num_of_bed: i32,
    pub num_of_icu_bed: i32,
    pub occupied_icu_bed: i32,
    pub num_of_ventilators: i32,
    pub occupied_ventilators: i32,
    pub num_of_isolation_bed: i32,
    pub occupied_isolation_bed: i32,
    pub total_tested: i32,
    pub total_positive: i32,
    pub total_death: i32,
    pub total_in_isolation: i32,
    pub total_recovered: i32,
    pub total_samples_collected: i32,
    pub total_samples_pending: i32,
    pub total_negative: i32,
    pub hotline: String,
    pub active: bool,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct SnapshotWithFacilityCount {
    #[sqlx(flatten)]
    pub snapshot: CaseSnapshot,
    pub facility_count: i64,
}

/// Sums over the active province snapshots
#[derive(Debug, Clone, Default, FromRow)]
pub struct NationalTotals {
    pub tested: i64,
    pub total_samples_collected: i64,
    pub total_samples_pending: i64,
    pub total_negative: i64,
    pub confirmed: i64,
    pub isolation: i64,
    pub total_recovered: i64,
    pub death: i64,
    pub icu: i64,
    pub occupied_icu: i64,
    pub ventilator: i64,
    pub occupied_ventilator: i64,
    pub isolation_bed: i64,
    pub occupied_isolation_bed: i64,
    pub update_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_columns_match_level() {
        let id = Uuid::from_u128(42);
        assert_eq!(SnapshotLevel::Province.region_columns(id), (Some(id), None, None));
        assert_eq!(SnapshotLevel::District.region_columns(id), (None, Some(id), None));
        assert_eq!(
            SnapshotLevel::Municipality.region_columns(id),
            (None, None, Some(id))
        );
    }
}
