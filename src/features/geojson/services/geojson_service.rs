use serde_json::json;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::facilities::models::MedicalFacility;
use crate::features::facilities::FacilityService;
use crate::features::user_reports::models::{TriageResult, UserReport};
use crate::features::user_reports::UserReportService;
use crate::shared::geo::{stored_point, Feature, FeatureCollection};

/// Builds map layers from facility and report rows
pub struct GeoJsonService {
    facilities: Arc<FacilityService>,
    user_reports: Arc<UserReportService>,
}

impl GeoJsonService {
    pub fn new(facilities: Arc<FacilityService>, user_reports: Arc<UserReportService>) -> Self {
        Self {
            facilities,
            user_reports,
        }
    }

    pub async fn facility_layer(&self) -> Result<FeatureCollection> {
        let facilities = self.facilities.list_located().await?;
        tracing::debug!("Rendering facility layer with {} features", facilities.len());

        Ok(FeatureCollection::new(
            facilities.into_iter().map(facility_feature).collect(),
        ))
    }

    /// Layer of reports triaged as `morelikely`
    pub async fn user_report_layer(&self) -> Result<FeatureCollection> {
        let reports = self
            .user_reports
            .list_located_by_result(TriageResult::Morelikely)
            .await?;

        Ok(FeatureCollection::new(
            reports.into_iter().map(report_feature).collect(),
        ))
    }
}

fn facility_feature(f: MedicalFacility) -> Feature {
    let geometry = stored_point(f.has_location, f.lat, f.lng);
    let properties = json!({
        "name": f.name,
        "province": f.province_id,
        "district": f.district_id,
        "municipality": f.municipality_id,
        "category": f.category_id,
        "type": f.type_id,
        "ownership": f.ownership,
        "contact_person": f.contact_person,
        "contact_num": f.contact_num,
        "used_for_corona_response": f.used_for_corona_response,
        "num_of_bed": f.num_of_bed,
        "num_of_icu_bed": f.num_of_icu_bed,
        "occupied_icu_bed": f.occupied_icu_bed,
        "num_of_ventilators": f.num_of_ventilators,
        "occupied_ventilators": f.occupied_ventilators,
        "num_of_isolation_bed": f.num_of_isolation_bed,
        "occupied_isolation_bed": f.occupied_isolation_bed,
        "total_tested": f.total_tested,
        "total_positive": f.total_positive,
        "total_death": f.total_death,
        "total_in_isolation": f.total_in_isolation,
    });

    Feature::new(f.id, geometry, properties)
}

fn report_feature(r: UserReport) -> Feature {
    let geometry = stored_point(r.has_location, r.lat, r.lng);
    Feature::new(r.id, geometry, json!({ "name": r.name }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::facilities::models::FacilityOwnership;
    use chrono::Utc;
    use uuid::Uuid;

    fn facility() -> MedicalFacility {
        MedicalFacility {
            id: Uuid::from_u128(7),
            province_id: None,
            district_id: None,
            municipality_id: None,
            name: "Teku Hospital".to_string(),
            category_id: None,
            type_id: Uuid::from_u128(1),
            ownership: FacilityOwnership::Government,
            contact_person: None,
            contact_num: Some("01-4253396".to_string()),
            used_for_corona_response: true,
            num_of_bed: 100,
            num_of_icu_bed: 10,
            occupied_icu_bed: 2,
            num_of_ventilators: 5,
            occupied_ventilators: 1,
            num_of_isolation_bed: 40,
            occupied_isolation_bed: 12,
            total_tested: 300,
            total_positive: 9,
            total_death: 0,
            total_in_isolation: 12,
            hlcit_code: None,
            remarks: String::new(),
            lat: Some(27.6950),
            lng: Some(85.3000),
            has_location: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_facility_feature_shape() {
        let feature = facility_feature(facility());
        let value = serde_json::to_value(&feature).unwrap();

        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "Point");
        assert_eq!(value["geometry"]["coordinates"], json!([85.3, 27.695]));
        assert_eq!(value["properties"]["pk"], json!(Uuid::from_u128(7)));
        assert_eq!(value["properties"]["ownership"], "government");
        assert_eq!(value["properties"]["num_of_bed"], 100);
        assert!(value["properties"].get("remarks").is_none());
    }

    #[test]
    fn test_collection_carries_crs() {
        let collection = FeatureCollection::new(vec![facility_feature(facility())]);
        let value = serde_json::to_value(collection).unwrap();

        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["crs"]["properties"]["name"], "EPSG:4326");
        assert_eq!(value["features"].as_array().map(Vec::len), Some(1));
    }
}
