//! Repositorio del libro de siniestros
//!
//! Lectura para pre-rellenar despachos por siniestro y escritura de los
//! campos de vehículo de sustitución elegido.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::Accident;
use crate::utils::errors::AppError;

pub struct AccidentRepository {
    pool: PgPool,
}

impl AccidentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Accident>, AppError> {
        let accident = sqlx::query_as::<_, Accident>("SELECT * FROM accidents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(accident)
    }

    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Accident>, AppError> {
        let accident = sqlx::query_as::<_, Accident>("SELECT * FROM accidents WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(accident)
    }

    /// Escribe en el siniestro el vehículo de sustitución elegido y su coste
    pub async fn update_replacement_tx(
        conn: &mut PgConnection,
        id: Uuid,
        replacement_car_id: Uuid,
        replacement_start: NaiveDate,
        replacement_end: Option<NaiveDate>,
        replacement_cost: Decimal,
    ) -> Result<Accident, AppError> {
        let accident = sqlx::query_as::<_, Accident>(
            r#"
            UPDATE accidents
            SET replacement_car_id = $2, replacement_start = $3, replacement_end = $4,
                replacement_cost = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(replacement_car_id)
        .bind(replacement_start)
        .bind(replacement_end)
        .bind(replacement_cost)
        .fetch_one(conn)
        .await?;

        Ok(accident)
    }
}
