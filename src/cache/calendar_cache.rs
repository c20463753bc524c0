//! Cache de lecturas del calendario
//!
//! Guarda índices por rango y detalles de día con TTL corto. No hay
//! invalidación en escritura: el tablero de planificación tolera una
//! ventana de segundos de datos viejos.

use chrono::NaiveDate;
use log::warn;
use uuid::Uuid;

use super::{CacheOperations, RedisClient};
use crate::dto::calendar_dto::{DateIndex, DayDetail};

#[derive(Clone)]
pub struct CalendarCache {
    redis: RedisClient,
}

impl CalendarCache {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }

    pub async fn get_range(
        &self,
        company_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Option<DateIndex> {
        let key = self.redis.calendar_range_key(
            &company_id.to_string(),
            &from.to_string(),
            &to.to_string(),
        );
        self.redis.get(&key).await.unwrap_or(None)
    }

    pub async fn put_range(
        &self,
        company_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        index: &DateIndex,
    ) {
        let key = self.redis.calendar_range_key(
            &company_id.to_string(),
            &from.to_string(),
            &to.to_string(),
        );
        if let Err(e) = self.redis.set(&key, index, self.redis.default_ttl()).await {
            warn!("⚠️ No se pudo cachear el rango de calendario: {}", e);
        }
    }

    pub async fn get_day(&self, company_id: Uuid, date: NaiveDate) -> Option<DayDetail> {
        let key = self
            .redis
            .day_detail_key(&company_id.to_string(), &date.to_string());
        self.redis.get(&key).await.unwrap_or(None)
    }

    pub async fn put_day(&self, company_id: Uuid, date: NaiveDate, detail: &DayDetail) {
        let key = self
            .redis
            .day_detail_key(&company_id.to_string(), &date.to_string());
        if let Err(e) = self.redis.set(&key, detail, self.redis.default_ttl()).await {
            warn!("⚠️ No se pudo cachear el detalle del día: {}", e);
        }
    }
}
