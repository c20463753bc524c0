//! DTOs de operaciones de despacho
//!
//! Requests y responses para el CRUD de operaciones (entrega/devolución).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    DispatchCategory, FuelLevel, InsuranceBillingStatus, Operation, OperationStatus, OperationType,
};

/// Request para crear una operación regular (ligada a contrato)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOperationRequest {
    pub company_id: Uuid,
    pub operation_type: OperationType,
    pub contract_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: Option<NaiveTime>,

    #[validate(length(max = 300))]
    pub location: Option<String>,

    #[validate(length(max = 100))]
    pub handler_name: Option<String>,

    #[validate(length(max = 100))]
    pub driver_name: Option<String>,

    #[validate(length(max = 30))]
    pub driver_phone: Option<String>,

    #[validate(length(max = 100))]
    pub created_by: Option<String>,
}

/// Request para editar una operación existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOperationRequest {
    pub car_id: Option<Uuid>,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<NaiveTime>,

    #[validate(length(max = 300))]
    pub location: Option<String>,

    #[validate(length(max = 100))]
    pub handler_name: Option<String>,

    #[validate(length(max = 100))]
    pub driver_name: Option<String>,

    #[validate(length(max = 30))]
    pub driver_phone: Option<String>,
}

/// Request para completar una operación (campos de devolución)
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteOperationRequest {
    pub mileage_at_op: Option<Decimal>,
    pub fuel_level: Option<FuelLevel>,
    pub damage_found: Option<bool>,

    #[validate(length(max = 2000))]
    pub damage_description: Option<String>,

    pub excess_mileage: Option<Decimal>,
    pub settlement_amount: Option<Decimal>,
}

/// Filtros para listado de operaciones
#[derive(Debug, Deserialize)]
pub struct OperationFilters {
    pub company_id: Uuid,
    pub status: Option<OperationStatus>,
    pub dispatch_category: Option<DispatchCategory>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response de operación para la API
#[derive(Debug, Serialize)]
pub struct OperationResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub operation_type: OperationType,
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
    pub mileage_at_op: Option<Decimal>,
    pub fuel_level: Option<FuelLevel>,
    pub damage_found: Option<bool>,
    pub damage_description: Option<String>,
    pub excess_mileage: Option<Decimal>,
    pub settlement_amount: Option<Decimal>,
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
    pub status: OperationStatus,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Operation> for OperationResponse {
    fn from(op: Operation) -> Self {
        Self {
            id: op.id,
            company_id: op.company_id,
            operation_type: op.operation_type,
            dispatch_category: op.dispatch_category,
            contract_id: op.contract_id,
            car_id: op.car_id,
            customer_id: op.customer_id,
            customer_name: op.customer_name,
            customer_phone: op.customer_phone,
            accident_id: op.accident_id,
            damaged_car_id: op.damaged_car_id,
            scheduled_date: op.scheduled_date,
            scheduled_time: op.scheduled_time,
            location: op.location,
            handler_name: op.handler_name,
            driver_name: op.driver_name,
            driver_phone: op.driver_phone,
            mileage_at_op: op.mileage_at_op,
            fuel_level: op.fuel_level,
            damage_found: op.damage_found,
            damage_description: op.damage_description,
            excess_mileage: op.excess_mileage,
            settlement_amount: op.settlement_amount,
            insurance_company_billing: op.insurance_company_billing,
            insurance_claim_no: op.insurance_claim_no,
            insurance_daily_rate: op.insurance_daily_rate,
            fault_ratio: op.fault_ratio,
            replacement_start_date: op.replacement_start_date,
            replacement_end_date: op.replacement_end_date,
            repair_shop_name: op.repair_shop_name,
            insurance_billing_status: op.insurance_billing_status,
            insurance_billed_amount: op.insurance_billed_amount,
            customer_charge: op.customer_charge,
            status: op.status,
            created_by: op.created_by,
            created_at: op.created_at,
            updated_at: op.updated_at,
        }
    }
}
