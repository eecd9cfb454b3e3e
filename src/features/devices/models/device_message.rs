use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// How a client presents a message: inline text, an external link, or an app page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "device_message_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeviceMessageType {
    Message,
    Url,
    Page,
}

impl std::fmt::Display for DeviceMessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceMessageType::Message => write!(f, "message"),
            DeviceMessageType::Url => write!(f, "url"),
            DeviceMessageType::Page => write!(f, "page"),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DeviceMessage {
    pub id: Uuid,
    pub message_type: DeviceMessageType,
    pub title: Option<String>,
    pub message: Option<String>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}
