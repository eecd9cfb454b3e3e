use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::devices::models::{Device, DeviceMessage, DeviceMessageType};

// ==================== Devices ====================

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterDeviceDto {
    /// Push token or vendor device identifier
    #[validate(length(min = 1, max = 255, message = "Device id must be 1-255 characters"))]
    #[schema(example = "fcm:dGhpcyBpcyBub3QgYSByZWFsIHRva2Vu")]
    pub device_id: String,

    #[validate(length(max = 31, message = "Platform must be at most 31 characters"))]
    #[schema(example = "android")]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeviceResponseDto {
    pub id: Uuid,
    pub device_id: String,
    pub platform: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Device> for DeviceResponseDto {
    fn from(d: Device) -> Self {
        Self {
            id: d.id,
            device_id: d.device_id,
            platform: d.platform,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

// ==================== Device messages ====================

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DeviceMessagePayloadDto {
    #[serde(rename = "type")]
    pub message_type: DeviceMessageType,

    #[validate(length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 4000, message = "Message must be at most 4000 characters"))]
    pub message: Option<String>,

    #[validate(url(message = "Url must be a valid URL"))]
    pub url: Option<String>,
}

impl DeviceMessagePayloadDto {
    /// `message` needs a body, `url` needs a link
    pub fn check_content(&self) -> Result<()> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

        match self.message_type {
            DeviceMessageType::Message if !present(&self.message) => Err(AppError::Validation(
                "A message of type `message` needs a message body".to_string(),
            )),
            DeviceMessageType::Url if !present(&self.url) => Err(AppError::Validation(
                "A message of type `url` needs a url".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeviceMessageResponseDto {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub message_type: DeviceMessageType,
    pub title: Option<String>,
    pub message: Option<String>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DeviceMessage> for DeviceMessageResponseDto {
    fn from(m: DeviceMessage) -> Self {
        Self {
            id: m.id,
            message_type: m.message_type,
            title: m.title,
            message: m.message,
            url: m.url,
            created_at: m.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> DeviceMessagePayloadDto {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_url_message_needs_url() {
        let dto = payload(json!({"type": "url", "title": "Guidelines"}));
        assert!(dto.check_content().is_err());

        let dto = payload(json!({"type": "url", "url": "https://covid19.mohp.gov.np"}));
        assert!(dto.check_content().is_ok());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_text_message_needs_body() {
        assert!(payload(json!({"type": "message", "message": "  "}))
            .check_content()
            .is_err());
        assert!(payload(json!({"type": "page", "title": "Stats"}))
            .check_content()
            .is_ok());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let dto = payload(json!({"type": "url", "url": "not a url"}));
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: std::result::Result<DeviceMessagePayloadDto, _> =
            serde_json::from_value(json!({"type": "sms", "message": "hi"}));
        assert!(result.is_err());
    }
}
