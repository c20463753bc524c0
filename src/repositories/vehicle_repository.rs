//! Repositorio del registro de flota
//!
//! El motor de despachos solo lee vehículos y actualiza su flag de
//! disponibilidad; el CRUD completo de flota vive fuera de este core.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{Vehicle, VehicleStatus};
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(vehicle)
    }

    pub async fn set_status_tx(
        conn: &mut PgConnection,
        id: Uuid,
        status: VehicleStatus,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE cars
            SET vehicle_status = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(conn)
        .await?;

        Ok(vehicle)
    }
}
