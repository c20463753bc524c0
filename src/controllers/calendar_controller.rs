//! Controlador del calendario de despachos
//!
//! Lee operaciones y bloques del booking store, delega la agregación en el
//! servicio puro de calendario y sirve los resultados a través del cache
//! Redis con TTL corto.

use chrono::Utc;
use sqlx::PgPool;

use crate::cache::CalendarCache;
use crate::dto::calendar_dto::{
    CalendarRangeQuery, DateIndex, DayDetail, DayDetailQuery, MonthGridQuery, MonthGridResponse,
    WeekGridQuery, WeekGridResponse,
};
use crate::repositories::operation_repository::OperationRepository;
use crate::repositories::schedule_repository::ScheduleRepository;
use crate::services::calendar;
use crate::utils::errors::{validation_error, AppError};

pub struct CalendarController {
    operations: OperationRepository,
    schedules: ScheduleRepository,
    cache: CalendarCache,
}

impl CalendarController {
    pub fn new(pool: PgPool, cache: CalendarCache) -> Self {
        Self {
            operations: OperationRepository::new(pool.clone()),
            schedules: ScheduleRepository::new(pool),
            cache,
        }
    }

    /// Índice fecha -> agregado del día para un rango arbitrario
    pub async fn range(&self, query: CalendarRangeQuery) -> Result<DateIndex, AppError> {
        if query.to < query.from {
            return Err(validation_error("to", "range end must not precede start"));
        }

        if let Some(cached) = self.cache.get_range(query.company_id, query.from, query.to).await {
            return Ok(cached);
        }

        let operations = self
            .operations
            .find_by_company_and_range(query.company_id, query.from, query.to)
            .await?;
        let blocks = self
            .schedules
            .find_by_company_and_range(query.company_id, query.from, query.to)
            .await?;

        let index = DateIndex {
            days: calendar::build_date_index(query.from, query.to, &operations, &blocks),
        };

        self.cache
            .put_range(query.company_id, query.from, query.to, &index)
            .await;

        Ok(index)
    }

    /// Detalle del día seleccionado, con supresión de bloques duplicados
    pub async fn day_detail(&self, query: DayDetailQuery) -> Result<DayDetail, AppError> {
        if let Some(cached) = self.cache.get_day(query.company_id, query.date).await {
            return Ok(cached);
        }

        let operations = self
            .operations
            .find_by_company_and_range(query.company_id, query.date, query.date)
            .await?;
        let blocks = self
            .schedules
            .find_by_company_and_range(query.company_id, query.date, query.date)
            .await?;

        let detail = calendar::day_detail(query.date, &operations, &blocks);

        self.cache.put_day(query.company_id, query.date, &detail).await;

        Ok(detail)
    }

    /// Cuadrícula mensual de 42 celdas con su índice por día
    pub async fn month_grid(&self, query: MonthGridQuery) -> Result<MonthGridResponse, AppError> {
        let (from, to) = calendar::month_grid_range(query.year, query.month)
            .ok_or_else(|| validation_error("month", "month must be between 1 and 12"))?;

        let index = self
            .range(CalendarRangeQuery {
                company_id: query.company_id,
                from,
                to,
            })
            .await?;

        let today = Utc::now().date_naive();
        Ok(MonthGridResponse {
            cells: calendar::month_grid(query.year, query.month, today),
            days: index.days,
        })
    }

    /// Cuadrícula semanal de 7 celdas con su índice por día
    pub async fn week_grid(&self, query: WeekGridQuery) -> Result<WeekGridResponse, AppError> {
        let (from, to) = calendar::week_range(query.date);

        let index = self
            .range(CalendarRangeQuery {
                company_id: query.company_id,
                from,
                to,
            })
            .await?;

        let today = Utc::now().date_naive();
        Ok(WeekGridResponse {
            cells: calendar::week_grid(query.date, today),
            days: index.days,
        })
    }
}
