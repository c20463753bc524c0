//! Repositorio de bloques de agenda
//!
//! Incluye la consulta de solape de rangos inclusivos que sostiene la
//! detección de conflictos del orquestador.

use chrono::{NaiveDate, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{ScheduleBlock, ScheduleType};
use crate::utils::errors::AppError;

/// Datos de inserción de un bloque de agenda
#[derive(Debug)]
pub struct NewScheduleBlock {
    pub company_id: Uuid,
    pub car_id: Uuid,
    pub schedule_type: ScheduleType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub title: String,
    pub color: Option<String>,
    pub contract_id: Option<Uuid>,
    pub operation_id: Option<Uuid>,
    pub accident_id: Option<Uuid>,
    pub created_by: Option<String>,
}

pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ScheduleBlock>, AppError> {
        let block =
            sqlx::query_as::<_, ScheduleBlock>("SELECT * FROM schedule_blocks WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(block)
    }

    /// Bloques de una empresa que tocan un rango de fechas (para calendario)
    pub async fn find_by_company_and_range(
        &self,
        company_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduleBlock>, AppError> {
        let blocks = sqlx::query_as::<_, ScheduleBlock>(
            r#"
            SELECT * FROM schedule_blocks
            WHERE company_id = $1 AND start_date <= $3 AND $2 <= end_date
            ORDER BY start_date, created_at
            "#,
        )
        .bind(company_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(blocks)
    }

    /// Primer bloque del vehículo que solapa la ventana propuesta.
    /// Dos rangos inclusivos solapan sii existing.start <= new.end AND new.start <= existing.end.
    pub async fn find_overlapping_tx(
        conn: &mut PgConnection,
        car_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        exclude_block: Option<Uuid>,
    ) -> Result<Option<ScheduleBlock>, AppError> {
        let block = sqlx::query_as::<_, ScheduleBlock>(
            r#"
            SELECT * FROM schedule_blocks
            WHERE car_id = $1 AND start_date <= $3 AND $2 <= end_date
              AND ($4::uuid IS NULL OR id <> $4)
            ORDER BY start_date
            LIMIT 1
            "#,
        )
        .bind(car_id)
        .bind(start)
        .bind(end)
        .bind(exclude_block)
        .fetch_optional(conn)
        .await?;

        Ok(block)
    }

    pub async fn find_by_operation_tx(
        conn: &mut PgConnection,
        operation_id: Uuid,
    ) -> Result<Option<ScheduleBlock>, AppError> {
        let block = sqlx::query_as::<_, ScheduleBlock>(
            "SELECT * FROM schedule_blocks WHERE operation_id = $1",
        )
        .bind(operation_id)
        .fetch_optional(conn)
        .await?;

        Ok(block)
    }

    pub async fn insert_tx(
        conn: &mut PgConnection,
        new: NewScheduleBlock,
    ) -> Result<ScheduleBlock, AppError> {
        let id = Uuid::new_v4();

        let block = sqlx::query_as::<_, ScheduleBlock>(
            r#"
            INSERT INTO schedule_blocks (
                id, company_id, car_id, schedule_type, start_date, end_date,
                title, color, contract_id, operation_id, accident_id, created_by, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new.company_id)
        .bind(new.car_id)
        .bind(new.schedule_type)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.title)
        .bind(new.color)
        .bind(new.contract_id)
        .bind(new.operation_id)
        .bind(new.accident_id)
        .bind(new.created_by)
        .bind(Utc::now())
        .fetch_one(conn)
        .await?;

        Ok(block)
    }

    /// Mueve el bloque ligado a una operación reprogramada
    pub async fn update_range_tx(
        conn: &mut PgConnection,
        id: Uuid,
        car_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ScheduleBlock, AppError> {
        let block = sqlx::query_as::<_, ScheduleBlock>(
            r#"
            UPDATE schedule_blocks
            SET car_id = $2, start_date = $3, end_date = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(car_id)
        .bind(start)
        .bind(end)
        .fetch_one(conn)
        .await?;

        Ok(block)
    }

    pub async fn delete_tx(conn: &mut PgConnection, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM schedule_blocks WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }

    /// Número de bloques vigentes (no vencidos) que retienen al vehículo
    pub async fn count_active_for_car_tx(
        conn: &mut PgConnection,
        car_id: Uuid,
        on_or_after: NaiveDate,
    ) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM schedule_blocks WHERE car_id = $1 AND end_date >= $2",
        )
        .bind(car_id)
        .bind(on_or_after)
        .fetch_one(conn)
        .await?;

        Ok(result.0)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let block = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Schedule block not found".to_string()))?;

        if block.company_id != company_id {
            return Err(AppError::NotFound("Schedule block not found".to_string()));
        }

        sqlx::query("DELETE FROM schedule_blocks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
