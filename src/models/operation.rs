//! Modelo de Operation
//!
//! Este módulo contiene el struct Operation (un evento de entrega o
//! devolución de vehículo) y sus enums asociados. Mapea exactamente al
//! schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de operación - mapea al ENUM operation_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "operation_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Delivery,
    Return,
}

/// Categoría de despacho - mapea al ENUM dispatch_category
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "dispatch_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DispatchCategory {
    #[default]
    Regular,
    InsuranceVictim,
    InsuranceAtFault,
    InsuranceOwn,
    Maintenance,
}

impl DispatchCategory {
    /// Etiqueta legible para títulos de bloques de agenda
    pub fn label(&self) -> &'static str {
        match self {
            DispatchCategory::Regular => "Despacho regular",
            DispatchCategory::InsuranceVictim => "Sustitución por siniestro (víctima)",
            DispatchCategory::InsuranceAtFault => "Sustitución por siniestro (culpable)",
            DispatchCategory::InsuranceOwn => "Sustitución por daño propio",
            DispatchCategory::Maintenance => "Vehículo de cortesía por mantenimiento",
        }
    }

    pub fn is_insurance(&self) -> bool {
        !matches!(self, DispatchCategory::Regular)
    }
}

/// Estado del ciclo de vida de una operación - mapea al ENUM operation_status
///
/// `InProgress` es un valor reservado: ninguna transición lo produce hoy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "operation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// Nivel de combustible registrado en la entrega/devolución
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "fuel_level", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FuelLevel {
    Empty,
    Quarter,
    Half,
    ThreeQuarter,
    Full,
}

/// Estado de facturación a la aseguradora
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "insurance_billing_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InsuranceBillingStatus {
    Pending,
    Billed,
    Approved,
    Paid,
    Partial,
    Denied,
}

/// Operation principal - mapea exactamente a la tabla operations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Operation {
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

impl Operation {
    /// Una operación cancelada no cuenta para la agenda ni bloquea vehículos
    pub fn is_active(&self) -> bool {
        self.status != OperationStatus::Cancelled
    }
}
