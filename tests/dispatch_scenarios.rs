//! Escenarios extremo a extremo del reparto de costes y del calendario,
//! sin dependencias de persistencia.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use fleet_dispatch::models::{
    DispatchCategory, Operation, OperationStatus, OperationType, ScheduleBlock, ScheduleType,
};
use fleet_dispatch::services::{calendar, cost_split};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(v: i64) -> Decimal {
    Decimal::from(v)
}

fn operation(op_type: OperationType, scheduled: NaiveDate, status: OperationStatus) -> Operation {
    Operation {
        id: Uuid::new_v4(),
        company_id: Uuid::new_v4(),
        operation_type: op_type,
        dispatch_category: DispatchCategory::Regular,
        contract_id: None,
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

fn block(car_id: Uuid, start: NaiveDate, end: NaiveDate) -> ScheduleBlock {
    ScheduleBlock {
        id: Uuid::new_v4(),
        company_id: Uuid::new_v4(),
        car_id,
        schedule_type: ScheduleType::AccidentRepair,
        start_date: start,
        end_date: end,
        title: "Sustitución".to_string(),
        color: None,
        contract_id: None,
        operation_id: None,
        accident_id: None,
        created_by: None,
        created_at: Utc::now(),
    }
}

// Escenario A: tarifa 50.000, ventana 2024-03-01..2024-03-05, víctima con
// 30% de culpa propia
#[test]
fn scenario_victim_30_percent_fault() {
    let split = cost_split::calculate(
        dec(50_000),
        Some(date(2024, 3, 1)),
        Some(date(2024, 3, 5)),
        DispatchCategory::InsuranceVictim,
        30,
    );

    assert_eq!(split.days, 5);
    assert_eq!(split.total, dec(250_000));
    assert_eq!(split.company_share, dec(175_000));
    assert_eq!(split.customer_share, dec(75_000));
}

// Escenario B: mismos datos, cliente culpable
#[test]
fn scenario_at_fault_30_percent() {
    let split = cost_split::calculate(
        dec(50_000),
        Some(date(2024, 3, 1)),
        Some(date(2024, 3, 5)),
        DispatchCategory::InsuranceAtFault,
        30,
    );

    assert_eq!(split.company_share, dec(75_000));
    assert_eq!(split.customer_share, dec(175_000));
}

// Escenario C: mantenimiento, cualquier porcentaje de culpa
#[test]
fn scenario_maintenance_any_fault() {
    for fault in [0, 25, 50, 100] {
        let split = cost_split::calculate(
            dec(50_000),
            Some(date(2024, 3, 1)),
            Some(date(2024, 3, 5)),
            DispatchCategory::Maintenance,
            fault,
        );

        assert_eq!(split.company_share, split.total);
        assert_eq!(split.customer_share, Decimal::ZERO);
    }
}

#[test]
fn split_never_leaks_currency_units() {
    for fault in 0..=100 {
        let split = cost_split::calculate(
            dec(33_333),
            Some(date(2024, 3, 1)),
            Some(date(2024, 3, 7)),
            DispatchCategory::InsuranceVictim,
            fault,
        );
        assert_eq!(split.company_share + split.customer_share, split.total);
    }
}

#[test]
fn overlap_predicate_matches_spec_truth_table() {
    let car = Uuid::new_v4();
    let existing = block(car, date(2024, 3, 10), date(2024, 3, 15));

    // existing.start <= new.end && new.start <= existing.end
    assert!(existing.overlaps(date(2024, 3, 15), date(2024, 3, 20)));
    assert!(existing.overlaps(date(2024, 3, 5), date(2024, 3, 10)));
    assert!(existing.overlaps(date(2024, 3, 12), date(2024, 3, 12)));
    assert!(!existing.overlaps(date(2024, 3, 16), date(2024, 3, 20)));
    assert!(!existing.overlaps(date(2024, 3, 5), date(2024, 3, 9)));
}

// Una cancelación saca la operación del calendario pero la deja consultable
#[test]
fn cancelled_operation_leaves_calendar_aggregation() {
    let d = date(2024, 3, 10);
    let mut op = operation(OperationType::Delivery, d, OperationStatus::Scheduled);

    let index = calendar::build_date_index(date(2024, 3, 1), date(2024, 3, 31), &[op.clone()], &[]);
    assert_eq!(index[&d].deliveries, 1);

    op.status = OperationStatus::Cancelled;
    let index = calendar::build_date_index(date(2024, 3, 1), date(2024, 3, 31), &[op], &[]);
    assert!(index.get(&d).is_none());
}

// La ventana de sustitución del escenario A proyectada al calendario cubre
// sus cinco días
#[test]
fn replacement_window_spans_five_calendar_days() {
    let car = Uuid::new_v4();
    let blocks = vec![block(car, date(2024, 3, 1), date(2024, 3, 5))];

    let index = calendar::build_date_index(date(2024, 3, 1), date(2024, 3, 31), &[], &blocks);
    assert_eq!(index.len(), 5);
    for d in 1..=5 {
        assert_eq!(index[&date(2024, 3, d)].schedule_blocks.len(), 1);
    }
}

#[test]
fn month_grid_is_always_42_cells() {
    let today = Utc::now().date_naive();
    for year in [2023, 2024, 2025] {
        for month in 1..=12 {
            assert_eq!(calendar::month_grid(year, month, today).len(), 42);
        }
    }
}
