use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::tracking::models::{UserLocation, LOCATION_COLUMNS};
use crate::shared::geo::Placement;
use crate::shared::types::PageWindow;

pub struct LocationService {
    pool: PgPool,
}

impl LocationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn record(&self, user_id: Uuid, placement: Placement) -> Result<UserLocation> {
        let query = format!(
            r#"
            INSERT INTO user_locations (user_id, lat, lng, location)
            VALUES (
                $1, $2, $3,
                ST_SetSRID(ST_MakePoint($4::float8, $5::float8), 4326)::geography
            )
            RETURNING {}
            "#,
            LOCATION_COLUMNS
        );

        let location: UserLocation = sqlx::query_as(&query)
            .bind(user_id)
            .bind(placement.lat)
            .bind(placement.lng)
            .bind(placement.point_x())
            .bind(placement.point_y())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to record location for user {}: {:?}", user_id, e);
                AppError::Database(e)
            })?;

        tracing::debug!("Recorded location {} for user {}", location.id, user_id);
        Ok(location)
    }

    pub async fn list(
        &self,
        user_id: Option<Uuid>,
        window: PageWindow,
    ) -> Result<(Vec<UserLocation>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_locations WHERE ($1::uuid IS NULL OR user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count user locations: {:?}", e);
            AppError::Database(e)
        })?;

        let query = format!(
            r#"
            SELECT {} FROM user_locations
            WHERE ($1::uuid IS NULL OR user_id = $1)
            ORDER BY update_date DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
            LOCATION_COLUMNS
        );

        let locations = sqlx::query_as(&query)
            .bind(user_id)
            .bind(window.limit)
            .bind(window.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch user locations: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((locations, total))
    }

    pub async fn get(&self, id: Uuid) -> Result<UserLocation> {
        let query = format!("SELECT {} FROM user_locations WHERE id = $1", LOCATION_COLUMNS);

        sqlx::query_as::<_, UserLocation>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Location with id {} not found", id)))
    }

    /// Move a stored location; the owner is kept
    pub async fn update(&self, id: Uuid, placement: Placement) -> Result<UserLocation> {
        let query = format!(
            r#"
            UPDATE user_locations SET
                lat = $1, lng = $2,
                location = ST_SetSRID(ST_MakePoint($3::float8, $4::float8), 4326)::geography,
                update_date = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            LOCATION_COLUMNS
        );

        sqlx::query_as::<_, UserLocation>(&query)
            .bind(placement.lat)
            .bind(placement.lng)
            .bind(placement.point_x())
            .bind(placement.point_y())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update location {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Location with id {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM user_locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Location with id {} not found", id)));
        }
        Ok(())
    }
}
