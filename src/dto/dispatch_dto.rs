//! DTOs de los flujos de despacho orquestados
//!
//! Despacho por siniestro (vehículo de sustitución) y alquiler de mostrador.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::operation_dto::OperationResponse;
use crate::models::DispatchCategory;

/// Request para un despacho de vehículo de sustitución por siniestro
#[derive(Debug, Deserialize, Validate)]
pub struct InsuranceDispatchRequest {
    pub company_id: Uuid,
    /// Si falta y hay accident_id, se deduce del siniestro
    pub dispatch_category: Option<DispatchCategory>,
    pub accident_id: Option<Uuid>,
    pub damaged_car_id: Option<Uuid>,
    /// Vehículo de sustitución (requerido)
    pub car_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,

    #[validate(length(max = 200))]
    pub customer_name: Option<String>,

    #[validate(length(max = 30))]
    pub customer_phone: Option<String>,

    #[validate(length(max = 200))]
    pub insurance_company_billing: Option<String>,

    #[validate(length(max = 100))]
    pub insurance_claim_no: Option<String>,

    pub insurance_daily_rate: Option<Decimal>,
    pub fault_ratio: Option<i32>,
    pub replacement_start_date: Option<NaiveDate>,
    pub replacement_end_date: Option<NaiveDate>,

    #[validate(length(max = 200))]
    pub repair_shop_name: Option<String>,

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

/// Request para un alquiler corto de mostrador
#[derive(Debug, Deserialize, Validate)]
pub struct ShortTermRentalRequest {
    pub company_id: Uuid,

    #[validate(length(max = 200))]
    pub customer_name: Option<String>,

    #[validate(length(max = 30))]
    pub customer_phone: Option<String>,

    pub car_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_rate: Option<Decimal>,
    pub deposit: Option<Decimal>,

    #[validate(length(max = 100))]
    pub created_by: Option<String>,
}

/// Response del despacho por siniestro: operación + desglose del reparto
#[derive(Debug, Serialize)]
pub struct InsuranceDispatchResponse {
    pub operation: OperationResponse,
    pub days: i64,
    pub total: Decimal,
    pub company_share: Decimal,
    pub customer_share: Decimal,
}

/// Response del alquiler de mostrador
#[derive(Debug, Serialize)]
pub struct RentalResponse {
    pub contract_id: Uuid,
    pub operation: OperationResponse,
    pub days: i64,
    pub total: Decimal,
}
