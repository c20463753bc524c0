//! DTOs de bloques de agenda
//!
//! Altas manuales (holds sin operación asociada) y responses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{ScheduleBlock, ScheduleType};

/// Request para crear un bloqueo manual de agenda
#[derive(Debug, Deserialize, Validate)]
pub struct CreateScheduleBlockRequest {
    pub company_id: Uuid,
    pub car_id: Option<Uuid>,
    pub schedule_type: Option<ScheduleType>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[validate(length(min = 1, max = 300))]
    pub title: String,

    #[validate(length(max = 20))]
    pub color: Option<String>,

    pub contract_id: Option<Uuid>,
    pub accident_id: Option<Uuid>,

    #[validate(length(max = 100))]
    pub created_by: Option<String>,
}

/// Response de bloque de agenda para la API
#[derive(Debug, Serialize)]
pub struct ScheduleBlockResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub car_id: Uuid,
    pub schedule_type: ScheduleType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub title: String,
    pub color: Option<String>,
    pub contract_id: Option<Uuid>,
    pub operation_id: Option<Uuid>,
    pub accident_id: Option<Uuid>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ScheduleBlock> for ScheduleBlockResponse {
    fn from(block: ScheduleBlock) -> Self {
        Self {
            id: block.id,
            company_id: block.company_id,
            car_id: block.car_id,
            schedule_type: block.schedule_type,
            start_date: block.start_date,
            end_date: block.end_date,
            title: block.title,
            color: block.color,
            contract_id: block.contract_id,
            operation_id: block.operation_id,
            accident_id: block.accident_id,
            created_by: block.created_by,
            created_at: block.created_at,
        }
    }
}
