//! Point geometry helpers shared by every geolocated record.
//!
//! Records keep both a PostGIS `geography(Point, 4326)` column and plain
//! `lat`/`lng` columns. `Placement::resolve` decides, before a write, which of
//! the two the caller supplied and derives the other one from it.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};
use crate::shared::constants::MAX_SEARCH_RADIUS_KM;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum GeometryType {
    Point,
}

/// GeoJSON point in WGS84. `coordinates` is `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub geometry_type: GeometryType,
    #[schema(value_type = Vec<f64>, example = json!([85.324, 27.7172]))]
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            geometry_type: GeometryType::Point,
            coordinates: [x, y],
        }
    }

    /// Longitude
    pub fn x(&self) -> f64 {
        self.coordinates[0]
    }

    /// Latitude
    pub fn y(&self) -> f64 {
        self.coordinates[1]
    }
}

/// Reject coordinates outside WGS84 bounds
pub fn check_coordinates(lat: f64, lng: f64) -> Result<()> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::Validation(format!(
            "Latitude must be between -90 and 90, got {}",
            lat
        )));
    }
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(AppError::Validation(format!(
            "Longitude must be between -180 and 180, got {}",
            lng
        )));
    }
    Ok(())
}

/// Validate a search radius and convert it to meters
pub fn radius_meters(km: f64) -> Result<f64> {
    if !km.is_finite() || km <= 0.0 || km > MAX_SEARCH_RADIUS_KM {
        return Err(AppError::Validation(format!(
            "Radius must be greater than 0 and at most {} km",
            MAX_SEARCH_RADIUS_KM
        )));
    }
    Ok(km * 1000.0)
}

/// Location fields as they will be written.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub point: Option<GeoPoint>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Placement {
    /// Derive lat/lng from a point, or a point from lat/lng.
    ///
    /// A point always wins. Without one, a point is only built when both
    /// `lat` and `lng` are present and non-zero; otherwise the raw values are
    /// kept and the record has no geometry.
    pub fn resolve(location: Option<GeoPoint>, lat: Option<f64>, lng: Option<f64>) -> Result<Self> {
        if let Some(point) = location {
            check_coordinates(point.y(), point.x())?;
            return Ok(Self {
                point: Some(point),
                lat: Some(point.y()),
                lng: Some(point.x()),
            });
        }

        match (lat, lng) {
            (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => {
                check_coordinates(lat, lng)?;
                Ok(Self {
                    point: Some(GeoPoint::new(lng, lat)),
                    lat: Some(lat),
                    lng: Some(lng),
                })
            }
            _ => {
                if let Some(lat) = lat {
                    check_coordinates(lat, 0.0)?;
                }
                if let Some(lng) = lng {
                    check_coordinates(0.0, lng)?;
                }
                Ok(Self {
                    point: None,
                    lat,
                    lng,
                })
            }
        }
    }

    pub fn point_x(&self) -> Option<f64> {
        self.point.map(|p| p.x())
    }

    pub fn point_y(&self) -> Option<f64> {
        self.point.map(|p| p.y())
    }
}

/// Rebuild the stored point from a row's coordinate columns
pub fn stored_point(has_location: bool, lat: Option<f64>, lng: Option<f64>) -> Option<GeoPoint> {
    match (has_location, lat, lng) {
        (true, Some(lat), Some(lng)) => Some(GeoPoint::new(lng, lat)),
        _ => None,
    }
}

// =============================================================================
// GeoJSON
// =============================================================================

/// GeoJSON feature with a point geometry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub geometry: Option<GeoPoint>,
    #[schema(value_type = Object)]
    pub properties: serde_json::Value,
}

impl Feature {
    /// Build a feature; `pk` is injected into `properties` when it is an object.
    pub fn new(pk: impl Serialize, geometry: Option<GeoPoint>, properties: serde_json::Value) -> Self {
        let mut properties = match properties {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        properties.insert(
            "pk".to_string(),
            serde_json::to_value(pk).unwrap_or(serde_json::Value::Null),
        );

        Self {
            feature_type: "Feature".to_string(),
            geometry,
            properties: serde_json::Value::Object(properties),
        }
    }
}

/// Named coordinate reference system member
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Crs {
    #[serde(rename = "type")]
    pub crs_type: String,
    #[schema(value_type = Object)]
    pub properties: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: String,
    pub crs: Crs,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            collection_type: "FeatureCollection".to_string(),
            crs: Crs {
                crs_type: "name".to_string(),
                properties: serde_json::json!({ "name": "EPSG:4326" }),
            },
            features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_sets_lat_and_long() {
        let placement = Placement::resolve(Some(GeoPoint::new(85.324, 27.7172)), None, None).unwrap();
        assert_eq!(placement.lat, Some(27.7172));
        assert_eq!(placement.lng, Some(85.324));
    }

    #[test]
    fn test_point_overrides_conflicting_lat_long() {
        let point = GeoPoint::new(83.9856, 28.2096);
        let placement = Placement::resolve(Some(point), Some(1.0), Some(2.0)).unwrap();
        let stored = placement.point.unwrap();
        assert_eq!(stored.y(), placement.lat.unwrap());
        assert_eq!(stored.x(), placement.lng.unwrap());
    }

    #[test]
    fn test_point_lat_long_agree_across_inputs() {
        let samples = [
            (85.324, 27.7172),
            (-0.1276, 51.5072),
            (151.2093, -33.8688),
            (-180.0, -90.0),
            (180.0, 90.0),
        ];
        for (x, y) in samples {
            let placement = Placement::resolve(Some(GeoPoint::new(x, y)), None, None).unwrap();
            let point = placement.point.unwrap();
            assert_eq!(point.y(), placement.lat.unwrap());
            assert_eq!(point.x(), placement.lng.unwrap());
        }
    }

    #[test]
    fn test_lat_long_build_point() {
        let placement = Placement::resolve(None, Some(27.7), Some(85.3)).unwrap();
        assert_eq!(placement.point, Some(GeoPoint::new(85.3, 27.7)));
        assert_eq!(placement.point_x(), Some(85.3));
        assert_eq!(placement.point_y(), Some(27.7));
    }

    #[test]
    fn test_zero_or_missing_coordinate_builds_no_point() {
        let placement = Placement::resolve(None, Some(27.7), Some(0.0)).unwrap();
        assert!(placement.point.is_none());
        assert_eq!(placement.lat, Some(27.7));

        let placement = Placement::resolve(None, None, Some(85.3)).unwrap();
        assert!(placement.point.is_none());
        assert_eq!(placement.lng, Some(85.3));

        assert_eq!(Placement::resolve(None, None, None).unwrap(), Placement::default());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Placement::resolve(Some(GeoPoint::new(190.0, 10.0)), None, None).is_err());
        assert!(Placement::resolve(None, Some(91.0), Some(10.0)).is_err());
        assert!(Placement::resolve(None, Some(f64::NAN), None).is_err());
    }

    #[test]
    fn test_radius_meters() {
        assert_eq!(radius_meters(500.0).unwrap(), 500_000.0);
        assert!(radius_meters(0.0).is_err());
        assert!(radius_meters(-3.0).is_err());
        assert!(radius_meters(MAX_SEARCH_RADIUS_KM + 1.0).is_err());
    }

    #[test]
    fn test_geo_point_json_shape() {
        let value = serde_json::to_value(GeoPoint::new(85.0, 27.0)).unwrap();
        assert_eq!(value, serde_json::json!({"type": "Point", "coordinates": [85.0, 27.0]}));

        let parsed: GeoPoint =
            serde_json::from_value(serde_json::json!({"type": "Point", "coordinates": [1.5, 2.5]}))
                .unwrap();
        assert_eq!(parsed.x(), 1.5);
        assert_eq!(parsed.y(), 2.5);

        let polygon = serde_json::from_value::<GeoPoint>(
            serde_json::json!({"type": "Polygon", "coordinates": [1.5, 2.5]}),
        );
        assert!(polygon.is_err());
    }

    #[test]
    fn test_stored_point() {
        assert_eq!(
            stored_point(true, Some(27.0), Some(85.0)),
            Some(GeoPoint::new(85.0, 27.0))
        );
        assert_eq!(stored_point(false, Some(27.0), Some(85.0)), None);
    }

    #[test]
    fn test_feature_collection_shape() {
        let feature = Feature::new(
            "abc",
            Some(GeoPoint::new(85.0, 27.0)),
            serde_json::json!({"name": "Bir Hospital"}),
        );
        let value = serde_json::to_value(FeatureCollection::new(vec![feature])).unwrap();

        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["crs"]["properties"]["name"], "EPSG:4326");
        assert_eq!(value["features"][0]["type"], "Feature");
        assert_eq!(value["features"][0]["properties"]["pk"], "abc");
        assert_eq!(value["features"][0]["properties"]["name"], "Bir Hospital");
        assert_eq!(value["features"][0]["geometry"]["coordinates"][1], 27.0);
    }
}
