use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::case_data::models::{NationalTotals, SnapshotLevel};

/// `GET /api/stats` parameters; the first one present wins, in field order
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct StatsQuery {
    /// `all` or a province id
    pub province: Option<String>,
    /// `all` or a district id
    pub district: Option<String>,
    /// `all` or a municipality id
    pub municipality: Option<String>,
}

/// Which regions of a level to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionSelector {
    All,
    One(Uuid),
}

impl RegionSelector {
    fn parse(param: &str, raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw == "all" {
            return Ok(RegionSelector::All);
        }
        Uuid::parse_str(raw).map(RegionSelector::One).map_err(|_| {
            AppError::BadRequest(format!("{} must be 'all' or a region id", param))
        })
    }

    pub fn region_id(&self) -> Option<Uuid> {
        match self {
            RegionSelector::All => None,
            RegionSelector::One(id) => Some(*id),
        }
    }
}

impl StatsQuery {
    /// Requested level and regions; `None` asks for the national aggregate
    pub fn selection(&self) -> Result<Option<(SnapshotLevel, RegionSelector)>> {
        let candidates = [
            (SnapshotLevel::Province, "province", &self.province),
            (SnapshotLevel::District, "district", &self.district),
            (SnapshotLevel::Municipality, "municipality", &self.municipality),
        ];

        for (level, param, value) in candidates {
            if let Some(raw) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                return Ok(Some((level, RegionSelector::parse(param, raw)?)));
            }
        }
        Ok(None)
    }
}

/// Country-wide totals over the active province snapshots
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NationalStatsDto {
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
    pub facility_count: i64,
    #[schema(example = "1115")]
    pub hotline: String,
}

impl NationalStatsDto {
    pub fn new(totals: NationalTotals, facility_count: i64, hotline: String) -> Self {
        Self {
            tested: totals.tested,
            total_samples_collected: totals.total_samples_collected,
            total_samples_pending: totals.total_samples_pending,
            total_negative: totals.total_negative,
            confirmed: totals.confirmed,
            isolation: totals.isolation,
            total_recovered: totals.total_recovered,
            death: totals.death,
            icu: totals.icu,
            occupied_icu: totals.occupied_icu,
            ventilator: totals.ventilator,
            occupied_ventilator: totals.occupied_ventilator,
            isolation_bed: totals.isolation_bed,
            occupied_isolation_bed: totals.occupied_isolation_bed,
            update_date: totals.update_date,
            facility_count,
            hotline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(province: Option<&str>, district: Option<&str>, municipality: Option<&str>) -> StatsQuery {
        StatsQuery {
            province: province.map(String::from),
            district: district.map(String::from),
            municipality: municipality.map(String::from),
        }
    }

    #[test]
    fn test_no_parameter_means_national() {
        assert_eq!(query(None, None, None).selection().unwrap(), None);
        assert_eq!(query(Some(" "), None, None).selection().unwrap(), None);
    }

    #[test]
    fn test_selection_precedence() {
        let id = Uuid::from_u128(9);
        let selection = query(None, Some("all"), Some(&id.to_string()))
            .selection()
            .unwrap();
        assert_eq!(
            selection,
            Some((SnapshotLevel::District, RegionSelector::All))
        );

        let selection = query(None, None, Some(&id.to_string())).selection().unwrap();
        assert_eq!(
            selection,
            Some((SnapshotLevel::Municipality, RegionSelector::One(id)))
        );
    }

    #[test]
    fn test_invalid_region_id() {
        assert!(matches!(
            query(Some("bagmati"), None, None).selection(),
            Err(AppError::BadRequest(_))
        ));
    }
}
