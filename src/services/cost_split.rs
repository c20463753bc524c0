//! Calculadora de reparto de costes
//!
//! Función pura que convierte (tarifa diaria, ventana de sustitución,
//! categoría de despacho, porcentaje de culpa) en el reparto
//! empresa/cliente. No depende de persistencia alguna.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::DispatchCategory;

/// Resultado del reparto de costes de un despacho
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostSplit {
    pub days: i64,
    pub total: Decimal,
    pub company_share: Decimal,
    pub customer_share: Decimal,
}

impl CostSplit {
    fn zero() -> Self {
        Self {
            days: 0,
            total: Decimal::ZERO,
            company_share: Decimal::ZERO,
            customer_share: Decimal::ZERO,
        }
    }
}

/// Días facturables de una ventana inclusiva; mínimo 1
pub fn rental_days(start: NaiveDate, end: NaiveDate) -> i64 {
    ((end - start).num_days() + 1).max(1)
}

/// Reparto empresa/cliente del coste de un vehículo de sustitución.
///
/// La parte de la empresa se redondea a la unidad monetaria; el resto del
/// redondeo lo absorbe siempre la parte del cliente, de modo que
/// `company_share + customer_share == total` se cumple exacto.
pub fn calculate(
    daily_rate: Decimal,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    category: DispatchCategory,
    fault_ratio: i32,
) -> CostSplit {
    let (Some(start), Some(end)) = (start, end) else {
        return CostSplit::zero();
    };

    let days = rental_days(start, end);
    let total = daily_rate * Decimal::from(days);
    let fault = Decimal::from(fault_ratio.clamp(0, 100));
    let hundred = Decimal::from(100);

    let company_share = match category {
        DispatchCategory::InsuranceVictim => {
            round_currency(total * (hundred - fault) / hundred)
        }
        DispatchCategory::InsuranceAtFault => round_currency(total * fault / hundred),
        DispatchCategory::InsuranceOwn | DispatchCategory::Maintenance => total,
        DispatchCategory::Regular => Decimal::ZERO,
    };

    CostSplit {
        days,
        total,
        company_share,
        customer_share: total - company_share,
    }
}

fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn test_rental_days_inclusive() {
        // Misma fecha cuenta como un día
        assert_eq!(rental_days(date(2024, 3, 1), date(2024, 3, 1)), 1);
        // Ventana 01..05 inclusive son 5 días
        assert_eq!(rental_days(date(2024, 3, 1), date(2024, 3, 5)), 5);
        // Cruce de mes
        assert_eq!(rental_days(date(2024, 2, 28), date(2024, 3, 2)), 4);
        // Rango invertido se acota a 1
        assert_eq!(rental_days(date(2024, 3, 5), date(2024, 3, 1)), 1);
    }

    #[test]
    fn test_missing_dates_yield_zero() {
        let split = calculate(dec(50_000), None, Some(date(2024, 3, 5)), DispatchCategory::InsuranceVictim, 30);
        assert_eq!(split.days, 0);
        assert_eq!(split.total, Decimal::ZERO);
        assert_eq!(split.company_share, Decimal::ZERO);
        assert_eq!(split.customer_share, Decimal::ZERO);

        let split = calculate(dec(50_000), Some(date(2024, 3, 1)), None, DispatchCategory::InsuranceVictim, 30);
        assert_eq!(split.total, Decimal::ZERO);
    }

    #[test]
    fn test_scenario_victim() {
        // 50.000 x 5 días, víctima con 30% de culpa propia
        let split = calculate(
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

    #[test]
    fn test_scenario_at_fault() {
        let split = calculate(
            dec(50_000),
            Some(date(2024, 3, 1)),
            Some(date(2024, 3, 5)),
            DispatchCategory::InsuranceAtFault,
            30,
        );
        assert_eq!(split.company_share, dec(75_000));
        assert_eq!(split.customer_share, dec(175_000));
    }

    #[test]
    fn test_scenario_maintenance_ignores_fault() {
        for fault in [0, 30, 77, 100] {
            let split = calculate(
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
    fn test_insurance_own_full_company_share() {
        let split = calculate(
            dec(80_000),
            Some(date(2024, 5, 10)),
            Some(date(2024, 5, 12)),
            DispatchCategory::InsuranceOwn,
            65,
        );
        assert_eq!(split.total, dec(240_000));
        assert_eq!(split.company_share, dec(240_000));
        assert_eq!(split.customer_share, Decimal::ZERO);
    }

    #[test]
    fn test_victim_fault_extremes() {
        let split = calculate(
            dec(50_000),
            Some(date(2024, 3, 1)),
            Some(date(2024, 3, 5)),
            DispatchCategory::InsuranceVictim,
            0,
        );
        assert_eq!(split.company_share, split.total);

        let split = calculate(
            dec(50_000),
            Some(date(2024, 3, 1)),
            Some(date(2024, 3, 5)),
            DispatchCategory::InsuranceVictim,
            100,
        );
        assert_eq!(split.company_share, Decimal::ZERO);
        assert_eq!(split.customer_share, split.total);
    }

    #[test]
    fn test_split_always_sums_to_total() {
        // Ratios que no dividen limpio: el redondeo nunca puede filtrar unidades
        let rates = [dec(33_333), dec(10_001), dec(99_999), Decimal::new(123_455, 1)];
        let categories = [
            DispatchCategory::InsuranceVictim,
            DispatchCategory::InsuranceAtFault,
            DispatchCategory::InsuranceOwn,
            DispatchCategory::Maintenance,
        ];

        for rate in rates {
            for category in categories {
                for fault in [0, 1, 33, 50, 67, 99, 100] {
                    let split = calculate(
                        rate,
                        Some(date(2024, 1, 15)),
                        Some(date(2024, 1, 21)),
                        category,
                        fault,
                    );
                    assert_eq!(
                        split.company_share + split.customer_share,
                        split.total,
                        "leak con rate={} category={:?} fault={}",
                        rate,
                        category,
                        fault
                    );
                }
            }
        }
    }

    #[test]
    fn test_fault_ratio_clamped() {
        let split = calculate(
            dec(50_000),
            Some(date(2024, 3, 1)),
            Some(date(2024, 3, 5)),
            DispatchCategory::InsuranceAtFault,
            150,
        );
        assert_eq!(split.company_share, split.total);

        let split = calculate(
            dec(50_000),
            Some(date(2024, 3, 1)),
            Some(date(2024, 3, 5)),
            DispatchCategory::InsuranceAtFault,
            -10,
        );
        assert_eq!(split.company_share, Decimal::ZERO);
    }
}
