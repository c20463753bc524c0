//! Repositorio de operaciones
//!
//! Lecturas sobre el pool y escrituras `*_tx` sobre una conexión de
//! transacción, para que el orquestador agrupe todo en una unidad atómica.

use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::operation_dto::{CompleteOperationRequest, OperationFilters};
use crate::models::{
    DispatchCategory, InsuranceBillingStatus, Operation, OperationStatus, OperationType,
};
use crate::utils::errors::AppError;

/// Datos de inserción de una operación
#[derive(Debug, Default)]
pub struct NewOperation {
    pub company_id: Uuid,
    pub operation_type: Option<OperationType>,
    pub dispatch_category: DispatchCategory,
    pub contract_id: Option<Uuid>,
    pub car_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub accident_id: Option<Uuid>,
    pub damaged_car_id: Option<Uuid>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub handler_name: Option<String>,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub insurance_company_billing: Option<String>,
    pub insurance_claim_no: Option<String>,
    pub insurance_daily_rate: Option<Decimal>,
    pub fault_ratio: Option<i32>,
    pub replacement_start_date: Option<NaiveDate>,
    pub replacement_end_date: Option<NaiveDate>,
    pub repair_shop_name: Option<String>,
    pub insurance_billing_status: Option<InsuranceBillingStatus>,
    pub insurance_billed_amount: Option<Decimal>,
    pub customer_charge: Option<Decimal>,
    pub created_by: Option<String>,
}

pub struct OperationRepository {
    pool: PgPool,
}

impl OperationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Operation>, AppError> {
        let operation = sqlx::query_as::<_, Operation>("SELECT * FROM operations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(operation)
    }

    /// Listado con filtros opcionales de estado, categoría y rango de fechas
    pub async fn list(&self, filters: &OperationFilters) -> Result<Vec<Operation>, AppError> {
        let mut query = sqlx::QueryBuilder::<sqlx::Postgres>::new(
            "SELECT * FROM operations WHERE company_id = ",
        );
        query.push_bind(filters.company_id);

        if let Some(status) = filters.status {
            query.push(" AND status = ");
            query.push_bind(status);
        }
        if let Some(category) = filters.dispatch_category {
            query.push(" AND dispatch_category = ");
            query.push_bind(category);
        }
        if let Some(from) = filters.date_from {
            query.push(" AND scheduled_date >= ");
            query.push_bind(from);
        }
        if let Some(to) = filters.date_to {
            query.push(" AND scheduled_date <= ");
            query.push_bind(to);
        }

        query.push(" ORDER BY scheduled_date DESC, created_at DESC");
        query.push(" LIMIT ");
        query.push_bind(filters.limit.unwrap_or(100));
        query.push(" OFFSET ");
        query.push_bind(filters.offset.unwrap_or(0));

        let operations = query
            .build_query_as::<Operation>()
            .fetch_all(&self.pool)
            .await?;

        Ok(operations)
    }

    /// Operaciones de una empresa dentro de un rango de fechas (para calendario)
    pub async fn find_by_company_and_range(
        &self,
        company_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Operation>, AppError> {
        let operations = sqlx::query_as::<_, Operation>(
            r#"
            SELECT * FROM operations
            WHERE company_id = $1 AND scheduled_date BETWEEN $2 AND $3
            ORDER BY scheduled_date, scheduled_time
            "#,
        )
        .bind(company_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(operations)
    }

    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Operation>, AppError> {
        let operation = sqlx::query_as::<_, Operation>("SELECT * FROM operations WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(operation)
    }

    pub async fn insert_tx(
        conn: &mut PgConnection,
        new: NewOperation,
    ) -> Result<Operation, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let operation = sqlx::query_as::<_, Operation>(
            r#"
            INSERT INTO operations (
                id, company_id, operation_type, dispatch_category, contract_id, car_id,
                customer_id, customer_name, customer_phone, accident_id, damaged_car_id,
                scheduled_date, scheduled_time, location, handler_name, driver_name, driver_phone,
                insurance_company_billing, insurance_claim_no, insurance_daily_rate, fault_ratio,
                replacement_start_date, replacement_end_date, repair_shop_name,
                insurance_billing_status, insurance_billed_amount, customer_charge,
                status, created_by, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, 'scheduled', $28, $29, $29
            )
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new.company_id)
        .bind(new.operation_type.unwrap_or(OperationType::Delivery))
        .bind(new.dispatch_category)
        .bind(new.contract_id)
        .bind(new.car_id)
        .bind(new.customer_id)
        .bind(new.customer_name)
        .bind(new.customer_phone)
        .bind(new.accident_id)
        .bind(new.damaged_car_id)
        .bind(new.scheduled_date)
        .bind(new.scheduled_time)
        .bind(new.location)
        .bind(new.handler_name)
        .bind(new.driver_name)
        .bind(new.driver_phone)
        .bind(new.insurance_company_billing)
        .bind(new.insurance_claim_no)
        .bind(new.insurance_daily_rate)
        .bind(new.fault_ratio)
        .bind(new.replacement_start_date)
        .bind(new.replacement_end_date)
        .bind(new.repair_shop_name)
        .bind(new.insurance_billing_status)
        .bind(new.insurance_billed_amount)
        .bind(new.customer_charge)
        .bind(new.created_by)
        .bind(now)
        .fetch_one(conn)
        .await?;

        Ok(operation)
    }

    /// Actualización in situ de los campos editables de una operación
    #[allow(clippy::too_many_arguments)]
    pub async fn update_tx(
        conn: &mut PgConnection,
        id: Uuid,
        car_id: Uuid,
        scheduled_date: NaiveDate,
        scheduled_time: Option<NaiveTime>,
        location: Option<String>,
        handler_name: Option<String>,
        driver_name: Option<String>,
        driver_phone: Option<String>,
    ) -> Result<Operation, AppError> {
        let operation = sqlx::query_as::<_, Operation>(
            r#"
            UPDATE operations
            SET car_id = $2, scheduled_date = $3, scheduled_time = $4, location = $5,
                handler_name = $6, driver_name = $7, driver_phone = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(car_id)
        .bind(scheduled_date)
        .bind(scheduled_time)
        .bind(location)
        .bind(handler_name)
        .bind(driver_name)
        .bind(driver_phone)
        .bind(Utc::now())
        .fetch_one(conn)
        .await?;

        Ok(operation)
    }

    /// Cierra la operación registrando los campos de devolución
    pub async fn complete_tx(
        conn: &mut PgConnection,
        id: Uuid,
        fields: &CompleteOperationRequest,
    ) -> Result<Operation, AppError> {
        let operation = sqlx::query_as::<_, Operation>(
            r#"
            UPDATE operations
            SET status = 'completed', mileage_at_op = $2, fuel_level = $3, damage_found = $4,
                damage_description = $5, excess_mileage = $6, settlement_amount = $7,
                updated_at = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.mileage_at_op)
        .bind(fields.fuel_level)
        .bind(fields.damage_found)
        .bind(fields.damage_description.clone())
        .bind(fields.excess_mileage)
        .bind(fields.settlement_amount)
        .bind(Utc::now())
        .fetch_one(conn)
        .await?;

        Ok(operation)
    }

    pub async fn set_status_tx(
        conn: &mut PgConnection,
        id: Uuid,
        status: OperationStatus,
    ) -> Result<Operation, AppError> {
        let operation = sqlx::query_as::<_, Operation>(
            r#"
            UPDATE operations
            SET status = $2, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(conn)
        .await?;

        Ok(operation)
    }
}
