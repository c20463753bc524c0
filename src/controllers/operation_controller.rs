//! Controlador de operaciones de despacho

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::dto::operation_dto::{
    CompleteOperationRequest, CreateOperationRequest, OperationFilters, OperationResponse,
    UpdateOperationRequest,
};
use crate::repositories::operation_repository::OperationRepository;
use crate::services::DispatchService;
use crate::utils::errors::{not_found_error, AppError};

pub struct OperationController {
    repository: OperationRepository,
    service: DispatchService,
}

impl OperationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: OperationRepository::new(pool.clone()),
            service: DispatchService::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateOperationRequest,
    ) -> Result<ApiResponse<OperationResponse>, AppError> {
        let operation = self.service.create_operation(request).await?;

        Ok(ApiResponse::success_with_message(
            operation.into(),
            "Operación creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<OperationResponse, AppError> {
        let operation = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Operation", &id.to_string()))?;

        Ok(operation.into())
    }

    pub async fn list(
        &self,
        filters: OperationFilters,
    ) -> Result<Vec<OperationResponse>, AppError> {
        let operations = self.repository.list(&filters).await?;

        Ok(operations.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateOperationRequest,
    ) -> Result<ApiResponse<OperationResponse>, AppError> {
        let operation = self.service.update_operation(id, request).await?;

        Ok(ApiResponse::success_with_message(
            operation.into(),
            "Operación actualizada exitosamente".to_string(),
        ))
    }

    pub async fn complete(
        &self,
        id: Uuid,
        request: CompleteOperationRequest,
    ) -> Result<ApiResponse<OperationResponse>, AppError> {
        let operation = self.service.complete_operation(id, request).await?;

        Ok(ApiResponse::success_with_message(
            operation.into(),
            "Operación completada exitosamente".to_string(),
        ))
    }

    pub async fn cancel(&self, id: Uuid) -> Result<ApiResponse<OperationResponse>, AppError> {
        let operation = self.service.cancel_operation(id).await?;

        Ok(ApiResponse::success_with_message(
            operation.into(),
            "Operación cancelada exitosamente".to_string(),
        ))
    }
}
