use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::case_data::{
    dtos as case_dtos, handlers as case_handlers, models as case_models,
};
use crate::features::devices::{
    dtos as devices_dtos, handlers as devices_handlers, models as devices_models,
};
use crate::features::exports::{
    dtos as exports_dtos, handlers as exports_handlers, models as exports_models,
};
use crate::features::facilities::{
    dtos as facilities_dtos, handlers as facilities_handlers, models as facilities_models,
};
use crate::features::geojson::handlers as geojson_handlers;
use crate::features::proximity::{dtos as proximity_dtos, handlers as proximity_handlers};
use crate::features::regions::{dtos as regions_dtos, handlers as regions_handlers};
use crate::features::roles::{dtos as roles_dtos, handlers as roles_handlers};
use crate::features::tracking::{dtos as tracking_dtos, handlers as tracking_handlers};
use crate::features::user_reports::{
    dtos as user_reports_dtos, handlers as user_reports_handlers, models as user_reports_models,
};
use crate::shared::geo::{Crs, Feature, FeatureCollection, GeoPoint, GeometryType};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::obtain_token,
        auth::handlers::get_me,
        // Roles
        roles_handlers::list_user_roles,
        roles_handlers::create_user_role,
        roles_handlers::delete_user_role,
        // Regions
        regions_handlers::list_provinces,
        regions_handlers::get_province,
        regions_handlers::create_province,
        regions_handlers::update_province,
        regions_handlers::delete_province,
        regions_handlers::list_districts,
        regions_handlers::get_district,
        regions_handlers::create_district,
        regions_handlers::update_district,
        regions_handlers::delete_district,
        regions_handlers::list_municipalities,
        regions_handlers::get_municipality,
        regions_handlers::create_municipality,
        regions_handlers::update_municipality,
        regions_handlers::delete_municipality,
        // Facility catalogue
        facilities_handlers::list_categories,
        facilities_handlers::get_category,
        facilities_handlers::create_category,
        facilities_handlers::update_category,
        facilities_handlers::delete_category,
        facilities_handlers::list_types,
        facilities_handlers::get_type,
        facilities_handlers::create_type,
        facilities_handlers::update_type,
        facilities_handlers::delete_type,
        // Facilities
        facilities_handlers::list_facilities,
        facilities_handlers::get_facility,
        facilities_handlers::create_facility,
        facilities_handlers::update_facility,
        facilities_handlers::delete_facility,
        // Proximity
        proximity_handlers::near_facility,
        proximity_handlers::near_report,
        // GeoJSON layers
        geojson_handlers::facility_geojson,
        geojson_handlers::user_report_geojson,
        // Case data
        case_handlers::get_stats,
        case_handlers::list_snapshots,
        case_handlers::get_snapshot,
        case_handlers::create_snapshot,
        case_handlers::update_snapshot,
        case_handlers::delete_snapshot,
        case_handlers::list_cases,
        case_handlers::get_case,
        case_handlers::create_case,
        case_handlers::update_case,
        case_handlers::delete_case,
        case_handlers::list_age_groups,
        case_handlers::get_age_group,
        case_handlers::create_age_group,
        case_handlers::update_age_group,
        case_handlers::delete_age_group,
        // User reports
        user_reports_handlers::create_user_report,
        user_reports_handlers::list_user_reports,
        user_reports_handlers::get_user_report,
        user_reports_handlers::update_user_report,
        user_reports_handlers::delete_user_report,
        // Tracking
        tracking_handlers::track_me,
        tracking_handlers::list_locations,
        tracking_handlers::get_location,
        tracking_handlers::update_location,
        tracking_handlers::delete_location,
        // Exports
        exports_handlers::list_exports,
        exports_handlers::get_export,
        exports_handlers::download_export,
        // Devices
        devices_handlers::register_device,
        devices_handlers::list_devices,
        devices_handlers::delete_device,
        devices_handlers::list_messages,
        devices_handlers::get_message,
        devices_handlers::create_message,
        devices_handlers::update_message,
        devices_handlers::delete_message,
    ),
    components(
        schemas(
            // Shared
            Meta,
            GeoPoint,
            GeometryType,
            Feature,
            Crs,
            FeatureCollection,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::RegisterRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::TokenResponseDto,
            auth::dtos::UserResponseDto,
            ApiResponse<auth::dtos::TokenResponseDto>,
            ApiResponse<auth::dtos::UserResponseDto>,
            // Roles
            roles_dtos::CreateUserRoleDto,
            roles_dtos::UserRoleResponseDto,
            ApiResponse<Vec<roles_dtos::UserRoleResponseDto>>,
            // Regions
            regions_dtos::CreateProvinceDto,
            regions_dtos::UpdateProvinceDto,
            regions_dtos::ProvinceResponseDto,
            regions_dtos::CreateDistrictDto,
            regions_dtos::UpdateDistrictDto,
            regions_dtos::DistrictResponseDto,
            regions_dtos::CreateMunicipalityDto,
            regions_dtos::UpdateMunicipalityDto,
            regions_dtos::MunicipalityResponseDto,
            ApiResponse<Vec<regions_dtos::ProvinceResponseDto>>,
            ApiResponse<Vec<regions_dtos::DistrictResponseDto>>,
            ApiResponse<Vec<regions_dtos::MunicipalityResponseDto>>,
            // Facilities
            facilities_models::FacilityOwnership,
            facilities_dtos::CategoryPayloadDto,
            facilities_dtos::CategoryResponseDto,
            facilities_dtos::FacilityTypePayloadDto,
            facilities_dtos::FacilityTypeResponseDto,
            facilities_dtos::FacilityPayloadDto,
            facilities_dtos::FacilityResponseDto,
            ApiResponse<Vec<facilities_dtos::FacilityResponseDto>>,
            // Proximity
            proximity_dtos::NearFacilityDto,
            proximity_dtos::NearReportDto,
            // Case data
            case_models::SnapshotLevel,
            case_dtos::SnapshotCounters,
            case_dtos::CreateSnapshotDto,
            case_dtos::UpdateSnapshotDto,
            case_dtos::SnapshotResponseDto,
            case_dtos::RegionStatsDto,
            case_dtos::NationalStatsDto,
            case_dtos::CasePayloadDto,
            case_dtos::CaseResponseDto,
            case_dtos::AgeGroupPayloadDto,
            case_dtos::AgeGroupResponseDto,
            ApiResponse<case_dtos::NationalStatsDto>,
            ApiResponse<Vec<case_dtos::RegionStatsDto>>,
            // User reports
            user_reports_models::TriageResult,
            user_reports_dtos::UserReportPayloadDto,
            user_reports_dtos::UserReportCreatedDto,
            user_reports_dtos::UserReportResponseDto,
            user_reports_dtos::CompactUserReportDto,
            ApiResponse<user_reports_dtos::UserReportCreatedDto>,
            // Tracking
            tracking_dtos::LocationPayloadDto,
            tracking_dtos::LocationResponseDto,
            // Exports
            exports_models::ExportKind,
            exports_models::ExportJobStatus,
            exports_dtos::ExportRequestedDto,
            exports_dtos::ExportJobResponseDto,
            exports_dtos::ExportDownloadDto,
            ApiResponse<exports_dtos::ExportRequestedDto>,
            // Devices
            devices_models::DeviceMessageType,
            devices_dtos::RegisterDeviceDto,
            devices_dtos::DeviceResponseDto,
            devices_dtos::DeviceMessagePayloadDto,
            devices_dtos::DeviceMessageResponseDto,
        )
    ),
    tags(
        (name = "auth", description = "Token login and registration"),
        (name = "roles", description = "Group role assignments (FrontEnd only)"),
        (name = "regions", description = "Nepal administrative hierarchy (province, district, municipality)"),
        (name = "facilities", description = "Medical facilities, categories and types"),
        (name = "proximity", description = "Nearest facilities and reports around a point"),
        (name = "geojson", description = "Map layers as GeoJSON feature collections"),
        (name = "case-data", description = "Case snapshots, headline stats, cases and age groups"),
        (name = "user-reports", description = "Symptom self-reports with triage"),
        (name = "tracking", description = "Signed-in user location tracking"),
        (name = "exports", description = "Background dataset exports"),
        (name = "devices", description = "Push devices and in-app messages"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Coronamap API",
        version = "0.1.0",
        description = "COVID-19 facility, case and self-report data service",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Overrides the document info with configured values
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_feature_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/near-facility",
            "/api/stats",
            "/api/user-reports",
            "/api/track-me",
            "/api/exports/{id}/download",
            "/api/geojson/facility",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Staging".to_string(),
            version: "9.9.9".to_string(),
            description: "staging build".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Staging");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
