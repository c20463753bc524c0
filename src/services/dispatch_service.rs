//! Orquestador de despachos
//!
//! Flujos transaccionales de alta/edición/cierre de operaciones. Cada flujo
//! agrupa sus escrituras (operación + bloque de agenda + registro de flota
//! + libro de siniestros) en una única transacción SQL: o entra todo, o no
//! entra nada. La detección de conflictos por solape de rangos se ejecuta
//! dentro de la misma transacción, antes de insertar cualquier bloque.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::dispatch_dto::{InsuranceDispatchRequest, ShortTermRentalRequest};
use crate::dto::operation_dto::{
    CompleteOperationRequest, CreateOperationRequest, UpdateOperationRequest,
};
use crate::dto::schedule_block_dto::CreateScheduleBlockRequest;
use crate::models::{
    AccidentType, Contract, DispatchCategory, InsuranceBillingStatus, Operation, OperationStatus,
    OperationType, ScheduleBlock, ScheduleType, VehicleStatus,
};
use crate::repositories::accident_repository::AccidentRepository;
use crate::repositories::contract_repository::ContractRepository;
use crate::repositories::operation_repository::{NewOperation, OperationRepository};
use crate::repositories::schedule_repository::{NewScheduleBlock, ScheduleRepository};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::cost_split::{self, CostSplit};
use crate::utils::errors::{
    field_error, not_found_error, schedule_conflict_error, validation_error, AppError,
};
use crate::utils::validation::{validate_date_range, validate_fault_ratio, validate_positive};

fn schedule_type_for(op_type: OperationType) -> ScheduleType {
    match op_type {
        OperationType::Delivery => ScheduleType::Delivery,
        OperationType::Return => ScheduleType::Return,
    }
}

fn operation_label(op_type: OperationType) -> &'static str {
    match op_type {
        OperationType::Delivery => "Entrega",
        OperationType::Return => "Devolución",
    }
}

pub struct DispatchService {
    pool: PgPool,
}

impl DispatchService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Verifica que el vehículo exista y que su agenda esté libre en la ventana
    async fn ensure_car_free(
        conn: &mut PgConnection,
        car_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        exclude_block: Option<Uuid>,
    ) -> Result<(), AppError> {
        if VehicleRepository::find_by_id_tx(conn, car_id).await?.is_none() {
            return Err(not_found_error("Car", &car_id.to_string()));
        }

        if let Some(existing) =
            ScheduleRepository::find_overlapping_tx(conn, car_id, start, end, exclude_block).await?
        {
            return Err(schedule_conflict_error(existing.id, car_id));
        }

        Ok(())
    }

    /// Despacho regular ligado a contrato: operación + bloque de un día
    pub async fn create_operation(
        &self,
        request: CreateOperationRequest,
    ) -> Result<Operation, AppError> {
        request.validate()?;

        let car_id = request
            .car_id
            .ok_or_else(|| validation_error("car_id", "car_id is required"))?;

        let mut tx = self.pool.begin().await?;

        Self::ensure_car_free(
            &mut tx,
            car_id,
            request.scheduled_date,
            request.scheduled_date,
            None,
        )
        .await?;

        // Título legible a partir del cliente del contrato, si lo hay
        let customer_name = match request.contract_id {
            Some(contract_id) => ContractRepository::find_by_id_tx(&mut tx, contract_id)
                .await?
                .map(|c| c.customer_name),
            None => None,
        };
        let title = match &customer_name {
            Some(name) => format!("{} - {}", operation_label(request.operation_type), name),
            None => operation_label(request.operation_type).to_string(),
        };

        let operation = OperationRepository::insert_tx(
            &mut tx,
            NewOperation {
                company_id: request.company_id,
                operation_type: Some(request.operation_type),
                dispatch_category: DispatchCategory::Regular,
                contract_id: request.contract_id,
                car_id,
                customer_name,
                scheduled_date: request.scheduled_date,
                scheduled_time: request.scheduled_time,
                location: request.location,
                handler_name: request.handler_name,
                driver_name: request.driver_name,
                driver_phone: request.driver_phone,
                created_by: request.created_by.clone(),
                ..Default::default()
            },
        )
        .await?;

        ScheduleRepository::insert_tx(
            &mut tx,
            NewScheduleBlock {
                company_id: operation.company_id,
                car_id,
                schedule_type: schedule_type_for(operation.operation_type),
                start_date: operation.scheduled_date,
                end_date: operation.scheduled_date,
                title,
                color: None,
                contract_id: operation.contract_id,
                operation_id: Some(operation.id),
                accident_id: None,
                created_by: request.created_by,
            },
        )
        .await?;

        tx.commit().await?;

        info!("📦 Operación {:?} creada: {}", operation.operation_type, operation.id);
        Ok(operation)
    }

    /// Edición in situ; el bloque ligado se mueve con la operación
    pub async fn update_operation(
        &self,
        id: Uuid,
        request: UpdateOperationRequest,
    ) -> Result<Operation, AppError> {
        request.validate()?;

        let mut tx = self.pool.begin().await?;

        let current = OperationRepository::find_by_id_tx(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Operation", &id.to_string()))?;

        if current.status == OperationStatus::Cancelled {
            return Err(AppError::BadRequest(
                "No se puede editar una operación cancelada".to_string(),
            ));
        }

        let car_id = request.car_id.unwrap_or(current.car_id);
        let scheduled_date = request.scheduled_date.unwrap_or(current.scheduled_date);
        let rescheduled = car_id != current.car_id || scheduled_date != current.scheduled_date;

        let linked_block = ScheduleRepository::find_by_operation_tx(&mut tx, id).await?;

        if rescheduled {
            Self::ensure_car_free(
                &mut tx,
                car_id,
                scheduled_date,
                scheduled_date,
                linked_block.as_ref().map(|b| b.id),
            )
            .await?;
        }

        let operation = OperationRepository::update_tx(
            &mut tx,
            id,
            car_id,
            scheduled_date,
            request.scheduled_time.or(current.scheduled_time),
            request.location.or(current.location),
            request.handler_name.or(current.handler_name),
            request.driver_name.or(current.driver_name),
            request.driver_phone.or(current.driver_phone),
        )
        .await?;

        // Re-sincronización del bloque: la agenda sigue a la operación
        if rescheduled {
            if let Some(block) = linked_block {
                ScheduleRepository::update_range_tx(
                    &mut tx,
                    block.id,
                    car_id,
                    scheduled_date,
                    scheduled_date,
                )
                .await?;
            }
        }

        tx.commit().await?;

        Ok(operation)
    }

    /// Cierra una operación registrando los campos de devolución
    pub async fn complete_operation(
        &self,
        id: Uuid,
        request: CompleteOperationRequest,
    ) -> Result<Operation, AppError> {
        request.validate()?;

        let mut tx = self.pool.begin().await?;

        let current = OperationRepository::find_by_id_tx(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Operation", &id.to_string()))?;

        if current.status == OperationStatus::Cancelled {
            return Err(AppError::BadRequest(
                "No se puede completar una operación cancelada".to_string(),
            ));
        }

        let operation = OperationRepository::complete_tx(&mut tx, id, &request).await?;

        tx.commit().await?;

        info!("✅ Operación completada: {}", operation.id);
        Ok(operation)
    }

    /// Cancela una operación, libera su bloque y, si el vehículo queda sin
    /// bloques vigentes, lo devuelve a disponible
    pub async fn cancel_operation(&self, id: Uuid) -> Result<Operation, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = OperationRepository::find_by_id_tx(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Operation", &id.to_string()))?;

        if current.status == OperationStatus::Completed {
            return Err(AppError::BadRequest(
                "No se puede cancelar una operación completada".to_string(),
            ));
        }

        let operation =
            OperationRepository::set_status_tx(&mut tx, id, OperationStatus::Cancelled).await?;

        if let Some(block) = ScheduleRepository::find_by_operation_tx(&mut tx, id).await? {
            ScheduleRepository::delete_tx(&mut tx, block.id).await?;
        }

        let today = Utc::now().date_naive();
        let remaining =
            ScheduleRepository::count_active_for_car_tx(&mut tx, operation.car_id, today).await?;
        if remaining == 0 {
            VehicleRepository::set_status_tx(&mut tx, operation.car_id, VehicleStatus::Available)
                .await?;
        }

        tx.commit().await?;

        info!("🚫 Operación cancelada: {}", operation.id);
        Ok(operation)
    }

    /// Despacho de vehículo de sustitución por siniestro
    pub async fn create_insurance_dispatch(
        &self,
        request: InsuranceDispatchRequest,
    ) -> Result<(Operation, CostSplit), AppError> {
        request.validate()?;

        let car_id = request
            .car_id
            .ok_or_else(|| validation_error("car_id", "replacement car_id is required"))?;
        let replacement_start = request.replacement_start_date.ok_or_else(|| {
            validation_error("replacement_start_date", "replacement_start_date is required")
        })?;

        if let Some(fault) = request.fault_ratio {
            validate_fault_ratio(fault).map_err(|e| field_error("fault_ratio", e))?;
        }

        let mut tx = self.pool.begin().await?;

        // Pre-relleno desde el libro de siniestros
        let accident = match request.accident_id {
            Some(accident_id) => Some(
                AccidentRepository::find_by_id_tx(&mut tx, accident_id)
                    .await?
                    .ok_or_else(|| not_found_error("Accident", &accident_id.to_string()))?,
            ),
            None => None,
        };

        let category = match (request.dispatch_category, &accident) {
            (Some(category), _) => category,
            (None, Some(accident)) => {
                if accident.accident_type == AccidentType::SelfDamage {
                    DispatchCategory::InsuranceOwn
                } else if accident.fault_ratio > 50 {
                    DispatchCategory::InsuranceAtFault
                } else {
                    DispatchCategory::InsuranceVictim
                }
            }
            (None, None) => {
                return Err(validation_error(
                    "dispatch_category",
                    "dispatch_category is required when no accident is linked",
                ))
            }
        };

        let insurance_company_billing = request.insurance_company_billing.or_else(|| {
            accident.as_ref().and_then(|a| {
                if category == DispatchCategory::InsuranceVictim {
                    a.counterpart_insurer.clone()
                } else {
                    a.own_insurer.clone()
                }
            })
        });

        if category != DispatchCategory::Maintenance && insurance_company_billing.is_none() {
            return Err(validation_error(
                "insurance_company_billing",
                "billing insurer is required for insurance dispatches",
            ));
        }

        let damaged_car_id = request
            .damaged_car_id
            .or_else(|| accident.as_ref().map(|a| a.car_id));
        if damaged_car_id == Some(car_id) {
            return Err(validation_error(
                "car_id",
                "replacement car must differ from the damaged car",
            ));
        }

        let fault_ratio = request
            .fault_ratio
            .or_else(|| accident.as_ref().map(|a| a.fault_ratio))
            .unwrap_or(0);
        let insurance_claim_no = request
            .insurance_claim_no
            .or_else(|| accident.as_ref().and_then(|a| a.claim_no.clone()));
        let repair_shop_name = request
            .repair_shop_name
            .or_else(|| accident.as_ref().and_then(|a| a.repair_shop_name.clone()));

        let daily_rate = request.insurance_daily_rate.unwrap_or(Decimal::ZERO);
        let split = cost_split::calculate(
            daily_rate,
            Some(replacement_start),
            request.replacement_end_date,
            category,
            fault_ratio,
        );

        let window_end = request.replacement_end_date.unwrap_or(replacement_start);
        Self::ensure_car_free(&mut tx, car_id, replacement_start, window_end, None).await?;

        let operation = OperationRepository::insert_tx(
            &mut tx,
            NewOperation {
                company_id: request.company_id,
                operation_type: Some(OperationType::Delivery),
                dispatch_category: category,
                car_id,
                customer_id: request.customer_id,
                customer_name: request.customer_name.clone(),
                customer_phone: request.customer_phone,
                accident_id: request.accident_id,
                damaged_car_id,
                scheduled_date: replacement_start,
                scheduled_time: request.scheduled_time,
                location: request.location,
                handler_name: request.handler_name,
                driver_name: request.driver_name,
                driver_phone: request.driver_phone,
                insurance_company_billing,
                insurance_claim_no,
                insurance_daily_rate: request.insurance_daily_rate,
                fault_ratio: Some(fault_ratio),
                replacement_start_date: Some(replacement_start),
                replacement_end_date: request.replacement_end_date,
                repair_shop_name,
                insurance_billing_status: Some(InsuranceBillingStatus::Pending),
                insurance_billed_amount: Some(split.company_share),
                customer_charge: Some(split.customer_share),
                created_by: request.created_by.clone(),
                ..Default::default()
            },
        )
        .await?;

        let title = format!(
            "{} - {}",
            category.label(),
            request.customer_name.as_deref().unwrap_or("Cliente")
        );
        ScheduleRepository::insert_tx(
            &mut tx,
            NewScheduleBlock {
                company_id: operation.company_id,
                car_id,
                schedule_type: ScheduleType::AccidentRepair,
                start_date: replacement_start,
                end_date: window_end,
                title,
                color: None,
                contract_id: None,
                operation_id: Some(operation.id),
                accident_id: request.accident_id,
                created_by: request.created_by,
            },
        )
        .await?;

        if let Some(accident_id) = request.accident_id {
            AccidentRepository::update_replacement_tx(
                &mut tx,
                accident_id,
                car_id,
                replacement_start,
                request.replacement_end_date,
                split.company_share,
            )
            .await?;
        }

        VehicleRepository::set_status_tx(&mut tx, car_id, VehicleStatus::Rented).await?;

        tx.commit().await?;

        info!(
            "🚗 Despacho por siniestro creado: {} ({} días, reparto {}/{})",
            operation.id, split.days, split.company_share, split.customer_share
        );
        Ok((operation, split))
    }

    /// Alquiler corto de mostrador: contrato ligero + entrega + bloque rental
    pub async fn create_short_term_rental(
        &self,
        request: ShortTermRentalRequest,
    ) -> Result<(Contract, Operation, CostSplit), AppError> {
        request.validate()?;

        let customer_name = request
            .customer_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| validation_error("customer_name", "customer_name is required"))?;
        let daily_rate = request
            .daily_rate
            .ok_or_else(|| validation_error("daily_rate", "daily_rate is required"))?;
        let car_id = request
            .car_id
            .ok_or_else(|| validation_error("car_id", "car_id is required"))?;

        validate_date_range(request.start_date, request.end_date)
            .map_err(|e| field_error("end_date", e))?;
        validate_positive(daily_rate).map_err(|e| field_error("daily_rate", e))?;

        // Sin reparto asegurador: el total es tarifa x días
        let days = cost_split::rental_days(request.start_date, request.end_date);
        let total = daily_rate * Decimal::from(days);
        let split = CostSplit {
            days,
            total,
            company_share: Decimal::ZERO,
            customer_share: total,
        };

        let mut tx = self.pool.begin().await?;

        Self::ensure_car_free(&mut tx, car_id, request.start_date, request.end_date, None).await?;

        let contract = ContractRepository::insert_tx(
            &mut tx,
            request.company_id,
            customer_name.clone(),
            request.customer_phone.clone(),
            car_id,
            request.start_date,
            request.end_date,
            daily_rate,
            request.deposit.unwrap_or(Decimal::ZERO),
        )
        .await?;

        let operation = OperationRepository::insert_tx(
            &mut tx,
            NewOperation {
                company_id: request.company_id,
                operation_type: Some(OperationType::Delivery),
                dispatch_category: DispatchCategory::Regular,
                contract_id: Some(contract.id),
                car_id,
                customer_name: Some(customer_name.clone()),
                customer_phone: request.customer_phone,
                scheduled_date: request.start_date,
                created_by: request.created_by.clone(),
                ..Default::default()
            },
        )
        .await?;

        ScheduleRepository::insert_tx(
            &mut tx,
            NewScheduleBlock {
                company_id: request.company_id,
                car_id,
                schedule_type: ScheduleType::Rental,
                start_date: request.start_date,
                end_date: request.end_date,
                title: format!("Alquiler - {}", customer_name),
                color: None,
                contract_id: Some(contract.id),
                operation_id: Some(operation.id),
                accident_id: None,
                created_by: request.created_by,
            },
        )
        .await?;

        VehicleRepository::set_status_tx(&mut tx, car_id, VehicleStatus::Rented).await?;

        tx.commit().await?;

        info!(
            "🔑 Alquiler de mostrador creado: contrato {} ({} días, total {})",
            contract.id, days, total
        );
        Ok((contract, operation, split))
    }

    /// Bloqueo manual de agenda sin operación asociada
    pub async fn create_manual_hold(
        &self,
        request: CreateScheduleBlockRequest,
    ) -> Result<ScheduleBlock, AppError> {
        request.validate()?;

        let car_id = request
            .car_id
            .ok_or_else(|| validation_error("car_id", "car_id is required"))?;

        validate_date_range(request.start_date, request.end_date)
            .map_err(|e| field_error("end_date", e))?;

        let mut tx = self.pool.begin().await?;

        Self::ensure_car_free(&mut tx, car_id, request.start_date, request.end_date, None).await?;

        let block = ScheduleRepository::insert_tx(
            &mut tx,
            NewScheduleBlock {
                company_id: request.company_id,
                car_id,
                schedule_type: request.schedule_type.unwrap_or(ScheduleType::ManualHold),
                start_date: request.start_date,
                end_date: request.end_date,
                title: request.title,
                color: request.color,
                contract_id: request.contract_id,
                operation_id: None,
                accident_id: request.accident_id,
                created_by: request.created_by,
            },
        )
        .await?;

        tx.commit().await?;

        Ok(block)
    }
}
