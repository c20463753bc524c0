//! DTOs del calendario de despachos
//!
//! Resúmenes por día, celdas de cuadrícula mensual/semanal y queries.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::models::{
    DispatchCategory, Operation, OperationStatus, OperationType, ScheduleBlock, ScheduleType,
};

/// Query de rango de calendario
#[derive(Debug, Deserialize)]
pub struct CalendarRangeQuery {
    pub company_id: Uuid,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Query de detalle de un día
#[derive(Debug, Deserialize)]
pub struct DayDetailQuery {
    pub company_id: Uuid,
    pub date: NaiveDate,
}

/// Query de cuadrícula mensual
#[derive(Debug, Deserialize)]
pub struct MonthGridQuery {
    pub company_id: Uuid,
    pub year: i32,
    pub month: u32,
}

/// Query de cuadrícula semanal
#[derive(Debug, Deserialize)]
pub struct WeekGridQuery {
    pub company_id: Uuid,
    pub date: NaiveDate,
}

/// Resumen de operación para las vistas de calendario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationSummary {
    pub id: Uuid,
    pub operation_type: OperationType,
    pub dispatch_category: DispatchCategory,
    pub status: OperationStatus,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: Option<NaiveTime>,
    pub car_id: Uuid,
    pub contract_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub location: Option<String>,
}

impl From<&Operation> for OperationSummary {
    fn from(op: &Operation) -> Self {
        Self {
            id: op.id,
            operation_type: op.operation_type,
            dispatch_category: op.dispatch_category,
            status: op.status,
            scheduled_date: op.scheduled_date,
            scheduled_time: op.scheduled_time,
            car_id: op.car_id,
            contract_id: op.contract_id,
            customer_name: op.customer_name.clone(),
            location: op.location.clone(),
        }
    }
}

/// Resumen de bloque de agenda para las vistas de calendario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleBlockSummary {
    pub id: Uuid,
    pub car_id: Uuid,
    pub schedule_type: ScheduleType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub title: String,
    pub color: Option<String>,
    pub contract_id: Option<Uuid>,
    pub operation_id: Option<Uuid>,
}

impl From<&ScheduleBlock> for ScheduleBlockSummary {
    fn from(block: &ScheduleBlock) -> Self {
        Self {
            id: block.id,
            car_id: block.car_id,
            schedule_type: block.schedule_type,
            start_date: block.start_date,
            end_date: block.end_date,
            title: block.title.clone(),
            color: block.color.clone(),
            contract_id: block.contract_id,
            operation_id: block.operation_id,
        }
    }
}

/// Agregado de un día del calendario
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayBucket {
    pub deliveries: u32,
    pub returns: u32,
    pub operations: Vec<OperationSummary>,
    pub schedule_blocks: Vec<ScheduleBlockSummary>,
}

/// Índice fecha -> agregado del día para un rango
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateIndex {
    pub days: BTreeMap<NaiveDate, DayBucket>,
}

/// Celda de una cuadrícula mensual o semanal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_focal_month: bool,
    pub is_today: bool,
}

/// Detalle de un día seleccionado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayDetail {
    pub operations: Vec<OperationSummary>,
    pub schedule_blocks: Vec<ScheduleBlockSummary>,
}

/// Cuadrícula mensual (42 celdas) junto con el índice del rango visible
#[derive(Debug, Serialize)]
pub struct MonthGridResponse {
    pub cells: Vec<CalendarCell>,
    pub days: BTreeMap<NaiveDate, DayBucket>,
}

/// Cuadrícula semanal (7 celdas) junto con el índice del rango visible
#[derive(Debug, Serialize)]
pub struct WeekGridResponse {
    pub cells: Vec<CalendarCell>,
    pub days: BTreeMap<NaiveDate, DayBucket>,
}
