use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::tracking::models::UserLocation;
use crate::shared::geo::{stored_point, GeoPoint, Placement};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct LocationQuery {
    /// Only locations of this user
    pub user_id: Option<Uuid>,

    #[param(minimum = 1)]
    pub page: Option<i64>,

    #[param(minimum = 1, maximum = 1000)]
    pub page_size: Option<i64>,
}

/// Position sent by the tracking client; a point or a lat/long pair
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LocationPayloadDto {
    pub location: Option<GeoPoint>,
    #[schema(example = 27.7172)]
    pub lat: Option<f64>,
    #[serde(rename = "long")]
    #[schema(example = 85.324)]
    pub lng: Option<f64>,
}

impl LocationPayloadDto {
    /// Normalised coordinates; a payload without any coordinate is rejected
    pub fn placement(&self) -> Result<Placement> {
        if self.location.is_none() && self.lat.is_none() && self.lng.is_none() {
            return Err(AppError::Validation(
                "Either location or lat/long is required".to_string(),
            ));
        }
        Placement::resolve(self.location, self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub location: Option<GeoPoint>,
    pub lat: Option<f64>,
    #[serde(rename = "long")]
    pub lng: Option<f64>,
    pub update_date: DateTime<Utc>,
}

impl From<UserLocation> for LocationResponseDto {
    fn from(l: UserLocation) -> Self {
        Self {
            location: stored_point(l.has_location, l.lat, l.lng),
            id: l.id,
            user_id: l.user_id,
            lat: l.lat,
            lng: l.lng,
            update_date: l.update_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_point_payload_fills_lat_long() {
        let dto: LocationPayloadDto = serde_json::from_value(json!({
            "location": {"type": "Point", "coordinates": [85.324, 27.7172]}
        }))
        .unwrap();

        let placement = dto.placement().unwrap();
        assert_eq!(placement.lat, Some(27.7172));
        assert_eq!(placement.lng, Some(85.324));
    }

    #[test]
    fn test_long_key_builds_point() {
        let dto: LocationPayloadDto =
            serde_json::from_value(json!({"lat": 28.2096, "long": 83.9856})).unwrap();

        let placement = dto.placement().unwrap();
        assert_eq!(placement.point, Some(GeoPoint::new(83.9856, 28.2096)));
    }

    #[test]
    fn test_empty_payload_rejected() {
        let dto: LocationPayloadDto = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(dto.placement(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_response_uses_long_key() {
        let dto = LocationResponseDto::from(UserLocation {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            lat: Some(27.7),
            lng: Some(85.3),
            has_location: true,
            update_date: Utc::now(),
        });

        let body = serde_json::to_value(&dto).unwrap();
        assert_eq!(body["long"], 85.3);
        assert_eq!(body["location"]["coordinates"], json!([85.3, 27.7]));
    }
}
