use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::case_data::dtos::{
    CreateSnapshotDto, NationalStatsDto, RegionSelector, SnapshotCounters, SnapshotQuery,
    UpdateSnapshotDto,
};
use crate::features::case_data::models::{
    CaseSnapshot, NationalTotals, SnapshotLevel, SnapshotWithFacilityCount, SNAPSHOT_COLUMNS,
};

const COUNTER_COLUMNS: &str = r#"
    num_of_bed, num_of_icu_bed, occupied_icu_bed, num_of_ventilators,
    occupied_ventilators, num_of_isolation_bed, occupied_isolation_bed,
    total_tested, total_positive, total_death, total_in_isolation,
    total_recovered, total_samples_collected, total_samples_pending, total_negative
"#;

/// Facilities located in the snapshot's region, whatever its level
const FACILITY_COUNT: &str = r#"
    (SELECT COUNT(*) FROM medical_facilities f
     WHERE CASE s.level
         WHEN 'province' THEN f.province_id = s.region_id
         WHEN 'district' THEN f.district_id = s.region_id
         ELSE f.municipality_id = s.region_id
     END) AS facility_count
"#;

type SnapshotQueryAs<'q, O> =
    sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>;

/// Bind the 15 counters in `COUNTER_COLUMNS` order
fn bind_counters<'q, O>(query: SnapshotQueryAs<'q, O>, c: &SnapshotCounters) -> SnapshotQueryAs<'q, O> {
    query
        .bind(c.num_of_bed)
        .bind(c.num_of_icu_bed)
        .bind(c.occupied_icu_bed)
        .bind(c.num_of_ventilators)
        .bind(c.occupied_ventilators)
        .bind(c.num_of_isolation_bed)
        .bind(c.occupied_isolation_bed)
        .bind(c.total_tested)
        .bind(c.total_positive)
        .bind(c.total_death)
        .bind(c.total_in_isolation)
        .bind(c.total_recovered)
        .bind(c.total_samples_collected)
        .bind(c.total_samples_pending)
        .bind(c.total_negative)
}

/// Service for case snapshots and the stats built on them
pub struct SnapshotService {
    pool: PgPool,
    hotline: String,
}

impl SnapshotService {
    pub fn new(pool: PgPool, hotline: String) -> Self {
        Self { pool, hotline }
    }

    pub async fn list(&self, query: &SnapshotQuery) -> Result<Vec<CaseSnapshot>> {
        let sql = format!(
            r#"
            SELECT {} FROM case_snapshots
            WHERE ($1::snapshot_level IS NULL OR level = $1)
              AND ($2::uuid IS NULL OR region_id = $2)
              AND ($3::boolean IS NULL OR active = $3)
            ORDER BY update_date DESC, id DESC
            "#,
            SNAPSHOT_COLUMNS
        );

        sqlx::query_as(&sql)
            .bind(query.level)
            .bind(query.region_id)
            .bind(query.active)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch case snapshots: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn get(&self, id: Uuid) -> Result<CaseSnapshot> {
        let sql = format!("SELECT {} FROM case_snapshots WHERE id = $1", SNAPSHOT_COLUMNS);

        sqlx::query_as::<_, CaseSnapshot>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Snapshot with id {} not found", id)))
    }

    /// Insert a snapshot as the active one for its region.
    ///
    /// The previously active snapshot of the same level and region is
    /// deactivated in the same transaction.
    pub async fn create(&self, dto: CreateSnapshotDto) -> Result<CaseSnapshot> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let deactivated = sqlx::query(
            r#"
            UPDATE case_snapshots SET active = FALSE, update_date = NOW()
            WHERE level = $1 AND region_id = $2 AND active
            "#,
        )
        .bind(dto.level)
        .bind(dto.region_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to deactivate previous snapshot: {:?}", e);
            AppError::Database(e)
        })?
        .rows_affected();

        let (province_id, district_id, municipality_id) = dto.level.region_columns(dto.region_id);
        let sql = format!(
            r#"
            INSERT INTO case_snapshots (
                level, province_id, district_id, municipality_id, hotline, {counters}
            )
            VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
            )
            RETURNING {columns}
            "#,
            counters = COUNTER_COLUMNS,
            columns = SNAPSHOT_COLUMNS
        );

        let query = sqlx::query_as::<_, CaseSnapshot>(&sql)
            .bind(dto.level)
            .bind(province_id)
            .bind(district_id)
            .bind(municipality_id)
            .bind(&dto.hotline);

        let snapshot = bind_counters(query, &dto.counters)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::from_write(e, "Another snapshot was activated for this region")
            })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit snapshot: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Snapshot {} activated for {} {} ({} deactivated)",
            snapshot.id,
            snapshot.level,
            snapshot.region_id,
            deactivated
        );
        Ok(snapshot)
    }

    /// Replace counters and hotline; `active` is only changed when given
    pub async fn update(&self, id: Uuid, dto: UpdateSnapshotDto) -> Result<CaseSnapshot> {
        let sql = format!(
            r#"
            UPDATE case_snapshots SET
                num_of_bed = $1, num_of_icu_bed = $2, occupied_icu_bed = $3,
                num_of_ventilators = $4, occupied_ventilators = $5,
                num_of_isolation_bed = $6, occupied_isolation_bed = $7,
                total_tested = $8, total_positive = $9, total_death = $10,
                total_in_isolation = $11, total_recovered = $12,
                total_samples_collected = $13, total_samples_pending = $14,
                total_negative = $15, hotline = $16,
                active = COALESCE($17, active), update_date = NOW()
            WHERE id = $18
            RETURNING {}
            "#,
            SNAPSHOT_COLUMNS
        );

        bind_counters(sqlx::query_as::<_, CaseSnapshot>(&sql), &dto.counters)
            .bind(&dto.hotline)
            .bind(dto.active)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::from_write(e, "Another snapshot is already active for this region")
            })?
            .ok_or_else(|| AppError::NotFound(format!("Snapshot with id {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM case_snapshots WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Snapshot with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Active snapshots of one level with their facility counts
    pub async fn region_stats(
        &self,
        level: SnapshotLevel,
        selector: RegionSelector,
    ) -> Result<Vec<SnapshotWithFacilityCount>> {
        let sql = format!(
            r#"
            SELECT {columns}, {facility_count}
            FROM case_snapshots s
            WHERE s.active AND s.level = $1
              AND ($2::uuid IS NULL OR s.region_id = $2)
            ORDER BY s.update_date DESC
            "#,
            columns = SNAPSHOT_COLUMNS,
            facility_count = FACILITY_COUNT
        );

        sqlx::query_as(&sql)
            .bind(level)
            .bind(selector.region_id())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch {} stats: {:?}", level, e);
                AppError::Database(e)
            })
    }

    /// Totals over the active province snapshots plus the national facility count
    pub async fn national_stats(&self) -> Result<NationalStatsDto> {
        let totals: NationalTotals = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(total_tested), 0)::bigint AS tested,
                COALESCE(SUM(total_samples_collected), 0)::bigint AS total_samples_collected,
                COALESCE(SUM(total_samples_pending), 0)::bigint AS total_samples_pending,
                COALESCE(SUM(total_negative), 0)::bigint AS total_negative,
                COALESCE(SUM(total_positive), 0)::bigint AS confirmed,
                COALESCE(SUM(total_in_isolation), 0)::bigint AS isolation,
                COALESCE(SUM(total_recovered), 0)::bigint AS total_recovered,
                COALESCE(SUM(total_death), 0)::bigint AS death,
                COALESCE(SUM(num_of_icu_bed), 0)::bigint AS icu,
                COALESCE(SUM(occupied_icu_bed), 0)::bigint AS occupied_icu,
                COALESCE(SUM(num_of_ventilators), 0)::bigint AS ventilator,
                COALESCE(SUM(occupied_ventilators), 0)::bigint AS occupied_ventilator,
                COALESCE(SUM(num_of_isolation_bed), 0)::bigint AS isolation_bed,
                COALESCE(SUM(occupied_isolation_bed), 0)::bigint AS occupied_isolation_bed,
                MAX(update_date) AS update_date
            FROM case_snapshots
            WHERE active AND level = 'province'
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to aggregate national stats: {:?}", e);
            AppError::Database(e)
        })?;

        let facility_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medical_facilities")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(NationalStatsDto::new(
            totals,
            facility_count,
            self.hotline.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed_province(pool: &PgPool, code: i32, name: &str) -> Uuid {
        sqlx::query_scalar("INSERT INTO provinces (code, name) VALUES ($1, $2) RETURNING id")
            .bind(code)
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn province_snapshot(region_id: Uuid, total_positive: i32) -> CreateSnapshotDto {
        CreateSnapshotDto {
            level: SnapshotLevel::Province,
            region_id,
            counters: SnapshotCounters {
                total_positive,
                ..SnapshotCounters::default()
            },
            hotline: String::new(),
        }
    }

    async fn is_active(service: &SnapshotService, id: Uuid) -> bool {
        service.get(id).await.unwrap().active
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostGIS server"]
    async fn test_create_replaces_only_same_region_snapshot(pool: PgPool) {
        let koshi = seed_province(&pool, 1, "Koshi").await;
        let bagmati = seed_province(&pool, 3, "Bagmati").await;
        let service = SnapshotService::new(pool, "1115".to_string());

        let bagmati_first = service.create(province_snapshot(bagmati, 5)).await.unwrap();
        let koshi_first = service.create(province_snapshot(koshi, 7)).await.unwrap();
        let koshi_second = service.create(province_snapshot(koshi, 9)).await.unwrap();

        assert!(!is_active(&service, koshi_first.id).await);
        assert!(is_active(&service, koshi_second.id).await);
        assert!(is_active(&service, bagmati_first.id).await);
        assert_eq!(koshi_second.total_positive, 9);
    }
}
