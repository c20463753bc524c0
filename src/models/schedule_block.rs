//! Modelo de ScheduleBlock
//!
//! Un bloque de agenda reserva un rango de fechas (inclusive) sobre el
//! calendario de un vehículo. Se usa tanto para detección de conflictos
//! como para el render del calendario.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de bloque de agenda - mapea al ENUM schedule_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "schedule_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    Rental,
    Delivery,
    Return,
    AccidentRepair,
    Maintenance,
    ManualHold,
}

/// ScheduleBlock principal - mapea exactamente a la tabla schedule_blocks
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScheduleBlock {
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

impl ScheduleBlock {
    /// Dos rangos inclusivos se solapan sii a.start <= b.end && b.start <= a.end
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }

    /// El bloque cubre una fecha concreta
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn block(start: (i32, u32, u32), end: (i32, u32, u32)) -> ScheduleBlock {
        ScheduleBlock {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            car_id: Uuid::new_v4(),
            schedule_type: ScheduleType::Rental,
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            title: "test".to_string(),
            color: None,
            contract_id: None,
            operation_id: None,
            accident_id: None,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_overlaps_inclusive_edges() {
        let b = block((2024, 3, 10), (2024, 3, 15));

        // Rango completamente dentro
        assert!(b.overlaps(date(2024, 3, 11), date(2024, 3, 12)));
        // Tocando el borde inicial y final (rangos inclusivos)
        assert!(b.overlaps(date(2024, 3, 5), date(2024, 3, 10)));
        assert!(b.overlaps(date(2024, 3, 15), date(2024, 3, 20)));
        // Rango que contiene al bloque
        assert!(b.overlaps(date(2024, 3, 1), date(2024, 3, 31)));
    }

    #[test]
    fn test_no_overlap_outside() {
        let b = block((2024, 3, 10), (2024, 3, 15));

        assert!(!b.overlaps(date(2024, 3, 1), date(2024, 3, 9)));
        assert!(!b.overlaps(date(2024, 3, 16), date(2024, 3, 20)));
    }

    #[test]
    fn test_covers() {
        let b = block((2024, 3, 10), (2024, 3, 12));

        assert!(b.covers(date(2024, 3, 10)));
        assert!(b.covers(date(2024, 3, 11)));
        assert!(b.covers(date(2024, 3, 12)));
        assert!(!b.covers(date(2024, 3, 9)));
        assert!(!b.covers(date(2024, 3, 13)));
    }
}
