//! Controlador de flujos de despacho orquestados
//!
//! Despacho por siniestro, alquiler de mostrador y bloqueos manuales.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::dto::dispatch_dto::{
    InsuranceDispatchRequest, InsuranceDispatchResponse, RentalResponse, ShortTermRentalRequest,
};
use crate::dto::schedule_block_dto::{CreateScheduleBlockRequest, ScheduleBlockResponse};
use crate::repositories::schedule_repository::ScheduleRepository;
use crate::services::DispatchService;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct DispatchController {
    service: DispatchService,
    schedules: ScheduleRepository,
}

impl DispatchController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: DispatchService::new(pool.clone()),
            schedules: ScheduleRepository::new(pool),
        }
    }

    pub async fn create_insurance_dispatch(
        &self,
        request: InsuranceDispatchRequest,
    ) -> Result<ApiResponse<InsuranceDispatchResponse>, AppError> {
        let (operation, split) = self.service.create_insurance_dispatch(request).await?;

        let response = InsuranceDispatchResponse {
            operation: operation.into(),
            days: split.days,
            total: split.total,
            company_share: split.company_share,
            customer_share: split.customer_share,
        };

        Ok(ApiResponse::success_with_message(
            response,
            "Despacho por siniestro creado exitosamente".to_string(),
        ))
    }

    pub async fn create_rental(
        &self,
        request: ShortTermRentalRequest,
    ) -> Result<ApiResponse<RentalResponse>, AppError> {
        let (contract, operation, split) = self.service.create_short_term_rental(request).await?;

        let response = RentalResponse {
            contract_id: contract.id,
            operation: operation.into(),
            days: split.days,
            total: split.total,
        };

        Ok(ApiResponse::success_with_message(
            response,
            "Alquiler creado exitosamente".to_string(),
        ))
    }

    pub async fn create_schedule_block(
        &self,
        request: CreateScheduleBlockRequest,
    ) -> Result<ApiResponse<ScheduleBlockResponse>, AppError> {
        let block = self.service.create_manual_hold(request).await?;

        Ok(ApiResponse::success_with_message(
            block.into(),
            "Bloqueo de agenda creado exitosamente".to_string(),
        ))
    }

    /// Libera un bloqueo manual; los bloques ligados a una operación se
    /// liberan cancelando la operación, no por aquí
    pub async fn delete_schedule_block(
        &self,
        id: Uuid,
        company_id: Uuid,
    ) -> Result<(), AppError> {
        let block = self
            .schedules
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Schedule block", &id.to_string()))?;

        if block.operation_id.is_some() {
            return Err(bad_request_error(
                "El bloque pertenece a una operación; cancele la operación para liberarlo",
            ));
        }

        self.schedules.delete(id, company_id).await
    }
}
