use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::case_data::models::{CaseSnapshot, SnapshotLevel, SnapshotWithFacilityCount};

/// Query parameters for listing snapshots
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SnapshotQuery {
    #[param(value_type = Option<String>, example = "province")]
    pub level: Option<SnapshotLevel>,
    pub region_id: Option<Uuid>,
    pub active: Option<bool>,
}

/// Capacity and case counters shared by snapshot payloads and responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct SnapshotCounters {
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub num_of_bed: i32,
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub num_of_icu_bed: i32,
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub occupied_icu_bed: i32,
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub num_of_ventilators: i32,
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub occupied_ventilators: i32,
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub num_of_isolation_bed: i32,
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub occupied_isolation_bed: i32,
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub total_tested: i32,
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub total_positive: i32,
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub total_death: i32,
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub total_in_isolation: i32,
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub total_recovered: i32,
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub total_samples_collected: i32,
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub total_samples_pending: i32,
    #[validate(range(min = 0, message = "Counters cannot be negative"))]
    pub total_negative: i32,
}

impl From<&CaseSnapshot> for SnapshotCounters {
    fn from(s: &CaseSnapshot) -> Self {
        Self {
            num_of_bed: s.num_of_bed,
            num_of_icu_bed: s.num_of_icu_bed,
            occupied_icu_bed: s.occupied_icu_bed,
            num_of_ventilators: s.num_of_ventilators,
            occupied_ventilators: s.occupied_ventilators,
            num_of_isolation_bed: s.num_of_isolation_bed,
            occupied_isolation_bed: s.occupied_isolation_bed,
            total_tested: s.total_tested,
            total_positive: s.total_positive,
            total_death: s.total_death,
            total_in_isolation: s.total_in_isolation,
            total_recovered: s.total_recovered,
            total_samples_collected: s.total_samples_collected,
            total_samples_pending: s.total_samples_pending,
            total_negative: s.total_negative,
        }
    }
}

/// New snapshot; it becomes the active one for its region
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSnapshotDto {
    pub level: SnapshotLevel,
    pub region_id: Uuid,

    #[serde(flatten)]
    #[validate(nested)]
    pub counters: SnapshotCounters,

    #[serde(default)]
    #[validate(length(max = 63, message = "Hotline must be at most 63 characters"))]
    pub hotline: String,
}

/// Replacement counters for an existing snapshot
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateSnapshotDto {
    #[serde(flatten)]
    #[validate(nested)]
    pub counters: SnapshotCounters,

    #[serde(default)]
    #[validate(length(max = 63, message = "Hotline must be at most 63 characters"))]
    pub hotline: String,

    /// Re-activating a snapshot fails while another one is active for the region
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SnapshotResponseDto {
    pub id: Uuid,
    pub level: SnapshotLevel,
    pub region_id: Uuid,
    #[serde(flatten)]
    pub counters: SnapshotCounters,
    pub hotline: String,
    pub active: bool,
    pub update_date: DateTime<Utc>,
}

impl From<CaseSnapshot> for SnapshotResponseDto {
    fn from(s: CaseSnapshot) -> Self {
        Self {
            counters: SnapshotCounters::from(&s),
            id: s.id,
            level: s.level,
            region_id: s.region_id,
            hotline: s.hotline,
            active: s.active,
            update_date: s.update_date,
        }
    }
}

/// Active snapshot with the number of facilities in its region
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegionStatsDto {
    #[serde(flatten)]
    pub snapshot: SnapshotResponseDto,
    pub facility_count: i64,
}

impl From<SnapshotWithFacilityCount> for RegionStatsDto {
    fn from(row: SnapshotWithFacilityCount) -> Self {
        Self {
            snapshot: row.snapshot.into(),
            facility_count: row.facility_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_counters_default_to_zero() {
        let dto: CreateSnapshotDto = serde_json::from_value(json!({
            "level": "district",
            "region_id": "0190a000-0000-7000-8000-000000000001",
            "total_positive": 12
        }))
        .unwrap();

        assert_eq!(dto.level, SnapshotLevel::District);
        assert_eq!(dto.counters.total_positive, 12);
        assert_eq!(dto.counters.total_tested, 0);
        assert!(dto.hotline.is_empty());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_negative_counter_fails_validation() {
        let dto: UpdateSnapshotDto = serde_json::from_value(json!({
            "total_death": -1
        }))
        .unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_hotline_longer_than_column_fails_validation() {
        let body = |hotline: String| {
            json!({
                "level": "province",
                "region_id": "0190a000-0000-7000-8000-000000000001",
                "hotline": hotline
            })
        };

        let fits: CreateSnapshotDto = serde_json::from_value(body("1".repeat(63))).unwrap();
        assert!(fits.validate().is_ok());

        let too_long: CreateSnapshotDto = serde_json::from_value(body("1".repeat(100))).unwrap();
        assert!(too_long.validate().is_err());

        let update: UpdateSnapshotDto =
            serde_json::from_value(json!({ "hotline": "9".repeat(64) })).unwrap();
        assert!(update.validate().is_err());
    }
}
