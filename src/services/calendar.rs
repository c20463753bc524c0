//! Agregador de calendario
//!
//! Funciones puras que proyectan operaciones y bloques de agenda sobre un
//! índice por día, y generan las cuadrículas mensual (42 celdas) y semanal
//! (7 celdas). Sin estado global: la selección es un parámetro explícito.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

use crate::dto::calendar_dto::{CalendarCell, DayBucket, DayDetail};
use crate::models::{Operation, OperationType, ScheduleBlock};

/// Proyecta operaciones y bloques sobre un índice fecha -> agregado del día.
///
/// Las operaciones canceladas no cuentan. Un bloque multi-día aparece en
/// cada fecha que cubre dentro del rango.
pub fn build_date_index(
    from: NaiveDate,
    to: NaiveDate,
    operations: &[Operation],
    blocks: &[ScheduleBlock],
) -> BTreeMap<NaiveDate, DayBucket> {
    let mut index: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for op in operations {
        if !op.is_active() {
            continue;
        }
        if op.scheduled_date < from || op.scheduled_date > to {
            continue;
        }

        let bucket = index.entry(op.scheduled_date).or_default();
        match op.operation_type {
            OperationType::Delivery => bucket.deliveries += 1,
            OperationType::Return => bucket.returns += 1,
        }
        bucket.operations.push(op.into());
    }

    for block in blocks {
        let first = block.start_date.max(from);
        let last = block.end_date.min(to);
        let mut day = first;
        while day <= last {
            index.entry(day).or_default().schedule_blocks.push(block.into());
            day = day + Duration::days(1);
        }
    }

    index
}

/// Cuadrícula mensual de 42 celdas (6 semanas, domingo primero), rellenando
/// con días del mes anterior/siguiente hasta completar semanas enteras.
pub fn month_grid(year: i32, month: u32, today: NaiveDate) -> Vec<CalendarCell> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let offset = first.weekday().num_days_from_sunday() as i64;
    let grid_start = first - Duration::days(offset);

    (0..42)
        .map(|i| {
            let date = grid_start + Duration::days(i);
            CalendarCell {
                date,
                in_focal_month: date.year() == year && date.month() == month,
                is_today: date == today,
            }
        })
        .collect()
}

/// Cuadrícula semanal de 7 celdas empezando en el domingo de la semana
pub fn week_grid(reference: NaiveDate, today: NaiveDate) -> Vec<CalendarCell> {
    let offset = reference.weekday().num_days_from_sunday() as i64;
    let week_start = reference - Duration::days(offset);

    (0..7)
        .map(|i| {
            let date = week_start + Duration::days(i);
            CalendarCell {
                date,
                in_focal_month: date.year() == reference.year()
                    && date.month() == reference.month(),
                is_today: date == today,
            }
        })
        .collect()
}

/// Rango de fechas visible de una cuadrícula mensual (celdas 0 y 41)
pub fn month_grid_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = first.weekday().num_days_from_sunday() as i64;
    let grid_start = first - Duration::days(offset);
    Some((grid_start, grid_start + Duration::days(41)))
}

/// Rango de fechas de la semana que contiene la referencia
pub fn week_range(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = reference.weekday().num_days_from_sunday() as i64;
    let week_start = reference - Duration::days(offset);
    (week_start, week_start + Duration::days(6))
}

/// Detalle de un día seleccionado.
///
/// Un bloque se suprime de la vista cuando una operación del mismo día ya lo
/// representa (mismo contrato o bloque ligado a esa operación), para evitar
/// el doble pintado.
pub fn day_detail(
    date: NaiveDate,
    operations: &[Operation],
    blocks: &[ScheduleBlock],
) -> DayDetail {
    let day_ops: Vec<&Operation> = operations
        .iter()
        .filter(|op| op.is_active() && op.scheduled_date == date)
        .collect();

    let schedule_blocks = blocks
        .iter()
        .filter(|block| block.covers(date))
        .filter(|block| {
            let represented = day_ops.iter().any(|op| {
                Some(op.id) == block.operation_id
                    || (block.contract_id.is_some() && op.contract_id == block.contract_id)
            });
            !represented
        })
        .map(Into::into)
        .collect();

    DayDetail {
        operations: day_ops.into_iter().map(Into::into).collect(),
        schedule_blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DispatchCategory, OperationStatus, ScheduleType,
    };
    use chrono::Utc;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn operation(
        op_type: OperationType,
        scheduled: NaiveDate,
        status: OperationStatus,
        contract_id: Option<Uuid>,
    ) -> Operation {
        Operation {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            operation_type: op_type,
            dispatch_category: DispatchCategory::Regular,
            contract_id,
            car_id: Uuid::new_v4(),
            customer_id: None,
            customer_name: None,
            customer_phone: None,
            accident_id: None,
            damaged_car_id: None,
            scheduled_date: scheduled,
            scheduled_time: None,
            location: None,
            handler_name: None,
            driver_name: None,
            driver_phone: None,
            mileage_at_op: None,
            fuel_level: None,
            damage_found: None,
            damage_description: None,
            excess_mileage: None,
            settlement_amount: None,
            insurance_company_billing: None,
            insurance_claim_no: None,
            insurance_daily_rate: None,
            fault_ratio: None,
            replacement_start_date: None,
            replacement_end_date: None,
            repair_shop_name: None,
            insurance_billing_status: None,
            insurance_billed_amount: None,
            customer_charge: None,
            status,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn block(
        start: NaiveDate,
        end: NaiveDate,
        contract_id: Option<Uuid>,
        operation_id: Option<Uuid>,
    ) -> ScheduleBlock {
        ScheduleBlock {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            car_id: Uuid::new_v4(),
            schedule_type: ScheduleType::Rental,
            start_date: start,
            end_date: end,
            title: "test".to_string(),
            color: None,
            contract_id,
            operation_id,
            accident_id: None,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_index_counts_deliveries_and_returns() {
        let d = date(2024, 3, 10);
        let ops = vec![
            operation(OperationType::Delivery, d, OperationStatus::Scheduled, None),
            operation(OperationType::Delivery, d, OperationStatus::Completed, None),
            operation(OperationType::Return, d, OperationStatus::Scheduled, None),
        ];

        let index = build_date_index(date(2024, 3, 1), date(2024, 3, 31), &ops, &[]);
        let bucket = &index[&d];
        assert_eq!(bucket.deliveries, 2);
        assert_eq!(bucket.returns, 1);
        assert_eq!(bucket.operations.len(), 3);
    }

    #[test]
    fn test_index_skips_cancelled_operations() {
        let d = date(2024, 3, 10);
        let ops = vec![
            operation(OperationType::Delivery, d, OperationStatus::Cancelled, None),
        ];

        let index = build_date_index(date(2024, 3, 1), date(2024, 3, 31), &ops, &[]);
        assert!(index.get(&d).is_none());
    }

    #[test]
    fn test_multi_day_block_appears_every_day() {
        let blocks = vec![block(date(2024, 3, 10), date(2024, 3, 13), None, None)];

        let index = build_date_index(date(2024, 3, 1), date(2024, 3, 31), &[], &blocks);
        assert_eq!(index.len(), 4);
        for d in 10..=13 {
            assert_eq!(index[&date(2024, 3, d)].schedule_blocks.len(), 1);
        }
    }

    #[test]
    fn test_block_clipped_to_range() {
        let blocks = vec![block(date(2024, 2, 28), date(2024, 3, 2), None, None)];

        let index = build_date_index(date(2024, 3, 1), date(2024, 3, 31), &[], &blocks);
        assert_eq!(index.len(), 2);
        assert!(index.contains_key(&date(2024, 3, 1)));
        assert!(index.contains_key(&date(2024, 3, 2)));
    }

    #[test]
    fn test_month_grid_has_42_cells() {
        let today = date(2024, 3, 15);
        for (year, month) in [(2024, 1), (2024, 2), (2024, 3), (2024, 12), (2023, 2)] {
            let grid = month_grid(year, month, today);
            assert_eq!(grid.len(), 42, "mes {}-{}", year, month);
        }
    }

    #[test]
    fn test_month_grid_weekday_columns_stable() {
        use chrono::Weekday;

        let today = date(2024, 3, 15);
        for (year, month) in [(2024, 3), (2024, 9), (2025, 6)] {
            let grid = month_grid(year, month, today);
            // Primera columna siempre domingo, última siempre sábado
            assert_eq!(grid[0].date.weekday(), Weekday::Sun);
            assert_eq!(grid[6].date.weekday(), Weekday::Sat);
            assert_eq!(grid[41].date.weekday(), Weekday::Sat);
        }
    }

    #[test]
    fn test_month_grid_padding_and_today() {
        // Marzo 2024 empieza en viernes: las primeras 5 celdas son de febrero
        let today = date(2024, 3, 15);
        let grid = month_grid(2024, 3, today);

        assert_eq!(grid[0].date, date(2024, 2, 25));
        assert!(!grid[0].in_focal_month);
        assert_eq!(grid[5].date, date(2024, 3, 1));
        assert!(grid[5].in_focal_month);
        assert_eq!(grid.iter().filter(|c| c.is_today).count(), 1);
        assert_eq!(grid.iter().filter(|c| c.in_focal_month).count(), 31);
    }

    #[test]
    fn test_week_grid_starts_on_sunday() {
        use chrono::Weekday;

        // 2024-03-13 es miércoles; su semana empieza el domingo 10
        let grid = week_grid(date(2024, 3, 13), date(2024, 3, 13));
        assert_eq!(grid.len(), 7);
        assert_eq!(grid[0].date, date(2024, 3, 10));
        assert_eq!(grid[0].date.weekday(), Weekday::Sun);
        assert_eq!(grid[6].date, date(2024, 3, 16));
        assert!(grid[3].is_today);
    }

    #[test]
    fn test_day_detail_suppresses_represented_blocks() {
        let d = date(2024, 3, 10);
        let contract = Uuid::new_v4();
        let op = operation(OperationType::Delivery, d, OperationStatus::Scheduled, Some(contract));

        // Bloque del mismo contrato el mismo día: suprimido
        let represented = block(d, d, Some(contract), None);
        // Bloque de otro contrato: visible
        let other = block(d, d, Some(Uuid::new_v4()), None);
        // Bloque ligado a la operación por id: suprimido
        let linked = block(d, d, None, Some(op.id));

        let ops = vec![op];
        let blocks = vec![represented, other.clone(), linked];
        let detail = day_detail(d, &ops, &blocks);

        assert_eq!(detail.operations.len(), 1);
        assert_eq!(detail.schedule_blocks.len(), 1);
        assert_eq!(detail.schedule_blocks[0].id, other.id);
    }

    #[test]
    fn test_day_detail_cancelled_operation_not_listed() {
        let d = date(2024, 3, 10);
        let op = operation(OperationType::Delivery, d, OperationStatus::Cancelled, None);

        let detail = day_detail(d, &[op], &[]);
        assert!(detail.operations.is_empty());
    }
}
