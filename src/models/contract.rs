//! Modelo de Contract
//!
//! Contrato ligero creado por el alquiler de mostrador; el resto del
//! sistema de contratos (PDF, firmas) queda fuera de este core.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Contract principal - mapea exactamente a la tabla contracts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contract {
    pub id: Uuid,
    pub company_id: Uuid,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub car_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_rate: Decimal,
    pub deposit: Decimal,
    pub created_at: DateTime<Utc>,
}
