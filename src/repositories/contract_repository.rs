//! Repositorio de contratos ligeros
//!
//! Alta desde el alquiler de mostrador y resolución de nombres de cliente
//! para los títulos de bloques de agenda.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::Contract;
use crate::utils::errors::AppError;

pub struct ContractRepository {
    pool: PgPool,
}

impl ContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Contract>, AppError> {
        let contract = sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(contract)
    }

    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Contract>, AppError> {
        let contract = sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(contract)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_tx(
        conn: &mut PgConnection,
        company_id: Uuid,
        customer_name: String,
        customer_phone: Option<String>,
        car_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        daily_rate: Decimal,
        deposit: Decimal,
    ) -> Result<Contract, AppError> {
        let id = Uuid::new_v4();

        let contract = sqlx::query_as::<_, Contract>(
            r#"
            INSERT INTO contracts (
                id, company_id, customer_name, customer_phone, car_id,
                start_date, end_date, daily_rate, deposit, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(customer_name)
        .bind(customer_phone)
        .bind(car_id)
        .bind(start_date)
        .bind(end_date)
        .bind(daily_rate)
        .bind(deposit)
        .bind(Utc::now())
        .fetch_one(conn)
        .await?;

        Ok(contract)
    }
}
