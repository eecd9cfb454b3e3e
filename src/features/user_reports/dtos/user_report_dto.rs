use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::exports::dtos::ActionType;
use crate::features::user_reports::models::{TriageResult, UserReport};
use crate::shared::geo::{stored_point, GeoPoint};

/// Query parameters for listing reports
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct UserReportQuery {
    /// `all` (default) for full records, or a triage label for the compact form
    #[param(example = "morelikely")]
    pub data_type: Option<String>,

    /// Page number (1-indexed)
    #[param(minimum = 1)]
    pub page: Option<i64>,

    /// Items per page (default 1000, max 1000)
    #[param(minimum = 1, maximum = 1000)]
    pub page_size: Option<i64>,

    /// `generate` queues an export instead of listing
    #[param(value_type = Option<String>, example = "generate")]
    pub action_type: Option<ActionType>,
}

impl UserReportQuery {
    /// Triage label to filter on; `None` means the full listing
    pub fn result_filter(&self) -> Result<Option<TriageResult>> {
        match self.data_type.as_deref().map(str::trim) {
            None | Some("") | Some("all") => Ok(None),
            Some(label) => label.parse().map(Some).map_err(AppError::BadRequest),
        }
    }
}

/// Create/replace payload for a report
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserReportPayloadDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[schema(example = "Sita Sharma")]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Address must be 1-255 characters"))]
    #[schema(example = "Lalitpur-3")]
    pub address: String,

    #[validate(regex(
        path = "*crate::shared::validation::CONTACT_REGEX",
        message = "Contact number may only contain digits, spaces, dashes and a leading +"
    ))]
    #[schema(example = "+977 9841000000")]
    pub contact_no: String,

    #[validate(length(max = 255, message = "Symptoms must be at most 255 characters"))]
    #[serde(default)]
    #[schema(example = "fever, dry cough")]
    pub symptoms: String,

    /// JSON object with `has_travel_history` / `has_covid_contact` flags
    #[validate(length(max = 255, message = "Travel history must be at most 255 characters"))]
    #[serde(default)]
    #[schema(example = r#"{"has_travel_history": true, "has_covid_contact": false}"#)]
    pub travel_history: String,

    /// Body temperature in °F
    #[schema(example = 99.5)]
    pub temperature: f64,

    pub location: Option<GeoPoint>,
    pub lat: Option<f64>,
    #[serde(rename = "long")]
    pub lng: Option<f64>,
}

/// Reply to a submitted report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserReportCreatedDto {
    pub message: String,
    pub result: TriageResult,
}

impl From<&UserReport> for UserReportCreatedDto {
    fn from(report: &UserReport) -> Self {
        Self {
            message: report.result.message().to_string(),
            result: report.result,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserReportResponseDto {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub address: String,
    pub contact_no: String,
    pub symptoms: String,
    pub travel_history: String,
    pub temperature: f64,
    pub location: Option<GeoPoint>,
    pub lat: Option<f64>,
    #[serde(rename = "long")]
    pub lng: Option<f64>,
    pub result: TriageResult,
    pub update_date: DateTime<Utc>,
}

impl From<UserReport> for UserReportResponseDto {
    fn from(r: UserReport) -> Self {
        Self {
            location: stored_point(r.has_location, r.lat, r.lng),
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            address: r.address,
            contact_no: r.contact_no,
            symptoms: r.symptoms,
            travel_history: r.travel_history,
            temperature: r.temperature,
            lat: r.lat,
            lng: r.lng,
            result: r.result,
            update_date: r.update_date,
        }
    }
}

/// Map-marker form used when listing by triage label
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompactUserReportDto {
    pub id: Uuid,
    pub name: String,
    pub lat: Option<f64>,
    #[serde(rename = "long")]
    pub lng: Option<f64>,
    pub result: TriageResult,
}

impl From<UserReport> for CompactUserReportDto {
    fn from(r: UserReport) -> Self {
        Self {
            id: r.id,
            name: r.name,
            lat: r.lat,
            lng: r.lng,
            result: r.result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(data_type: Option<&str>) -> UserReportQuery {
        UserReportQuery {
            data_type: data_type.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_result_filter() {
        assert_eq!(query(None).result_filter().unwrap(), None);
        assert_eq!(query(Some("all")).result_filter().unwrap(), None);
        assert_eq!(
            query(Some("likely")).result_filter().unwrap(),
            Some(TriageResult::Likely)
        );
        assert!(matches!(
            query(Some("certain")).result_filter(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_payload_validation() {
        let valid: UserReportPayloadDto = serde_json::from_value(json!({
            "name": "Sita",
            "address": "Lalitpur",
            "contact_no": "9841000000",
            "temperature": 99.0,
            "long": 85.3
        }))
        .unwrap();
        assert!(valid.validate().is_ok());
        assert_eq!(valid.lng, Some(85.3));
        assert!(valid.travel_history.is_empty());

        let invalid: UserReportPayloadDto = serde_json::from_value(json!({
            "name": "",
            "address": "Lalitpur",
            "contact_no": "call me",
            "temperature": 99.0
        }))
        .unwrap();
        let errors = invalid.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("contact_no"));
    }

    #[test]
    fn test_compact_form_uses_long_key() {
        let dto = CompactUserReportDto {
            id: Uuid::nil(),
            name: "Sita".to_string(),
            lat: Some(27.7),
            lng: Some(85.3),
            result: TriageResult::Morelikely,
        };
        let value = serde_json::to_value(dto).unwrap();
        assert_eq!(value["long"], json!(85.3));
        assert_eq!(value["result"], json!("morelikely"));
    }
}
