use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::devices::dtos::{DeviceMessagePayloadDto, RegisterDeviceDto};
use crate::features::devices::models::{Device, DeviceMessage};

const DEVICE_COLUMNS: &str = "id, device_id, platform, created_at, updated_at";
const MESSAGE_COLUMNS: &str = "id, message_type, title, message, url, created_at";

/// Push devices and the messages broadcast to them
pub struct DeviceService {
    pool: PgPool,
}

impl DeviceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== Devices ====================

    /// Insert or refresh a device; registering the same id twice is a no-op
    pub async fn register(&self, dto: RegisterDeviceDto) -> Result<Device> {
        let query = format!(
            r#"
            INSERT INTO devices (device_id, platform)
            VALUES ($1, $2)
            ON CONFLICT (device_id) DO UPDATE SET
                platform = COALESCE(EXCLUDED.platform, devices.platform),
                updated_at = NOW()
            RETURNING {}
            "#,
            DEVICE_COLUMNS
        );

        let device: Device = sqlx::query_as(&query)
            .bind(dto.device_id.trim())
            .bind(&dto.platform)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to register device: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::debug!("Registered device {}", device.id);
        Ok(device)
    }

    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        let query = format!(
            "SELECT {} FROM devices ORDER BY created_at DESC",
            DEVICE_COLUMNS
        );

        sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch devices: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn delete_device(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Device with id {} not found", id)));
        }
        Ok(())
    }

    // ==================== Messages ====================

    pub async fn list_messages(&self) -> Result<Vec<DeviceMessage>> {
        let query = format!(
            "SELECT {} FROM device_messages ORDER BY created_at DESC",
            MESSAGE_COLUMNS
        );

        sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch device messages: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn get_message(&self, id: Uuid) -> Result<DeviceMessage> {
        let query = format!(
            "SELECT {} FROM device_messages WHERE id = $1",
            MESSAGE_COLUMNS
        );

        sqlx::query_as::<_, DeviceMessage>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Message with id {} not found", id)))
    }

    pub async fn create_message(&self, dto: DeviceMessagePayloadDto) -> Result<DeviceMessage> {
        let query = format!(
            r#"
            INSERT INTO device_messages (message_type, title, message, url)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            MESSAGE_COLUMNS
        );

        let message: DeviceMessage = sqlx::query_as(&query)
            .bind(dto.message_type)
            .bind(&dto.title)
            .bind(&dto.message)
            .bind(&dto.url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create device message: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Created {} message {}", message.message_type, message.id);
        Ok(message)
    }

    pub async fn update_message(
        &self,
        id: Uuid,
        dto: DeviceMessagePayloadDto,
    ) -> Result<DeviceMessage> {
        let query = format!(
            r#"
            UPDATE device_messages SET message_type = $1, title = $2, message = $3, url = $4
            WHERE id = $5
            RETURNING {}
            "#,
            MESSAGE_COLUMNS
        );

        sqlx::query_as::<_, DeviceMessage>(&query)
            .bind(dto.message_type)
            .bind(&dto.title)
            .bind(&dto.message)
            .bind(&dto.url)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update device message {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Message with id {} not found", id)))
    }

    pub async fn delete_message(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM device_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Message with id {} not found", id)));
        }
        Ok(())
    }
}
