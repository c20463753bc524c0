//! Modelo de Accident
//!
//! El libro de siniestros es un colaborador del motor de despachos: se lee
//! para pre-rellenar un despacho por siniestro y se escribe el vehículo de
//! sustitución elegido con su coste.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de siniestro - mapea al ENUM accident_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "accident_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AccidentType {
    Collision,
    SelfDamage,
    Theft,
    Other,
}

/// Accident principal - mapea exactamente a la tabla accidents
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Accident {
    pub id: Uuid,
    pub company_id: Uuid,
    pub car_id: Uuid,
    pub accident_type: AccidentType,
    pub accident_date: Option<NaiveDate>,
    /// Porcentaje de culpa del cliente de la empresa (0-100)
    pub fault_ratio: i32,
    pub own_insurer: Option<String>,
    pub counterpart_insurer: Option<String>,
    pub claim_no: Option<String>,
    pub repair_shop_name: Option<String>,
    pub repair_start: Option<NaiveDate>,
    pub repair_end: Option<NaiveDate>,
    pub replacement_car_id: Option<Uuid>,
    pub replacement_start: Option<NaiveDate>,
    pub replacement_end: Option<NaiveDate>,
    pub replacement_cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}
