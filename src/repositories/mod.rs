//! Repositorios de acceso a datos
//!
//! Un repositorio por entidad persistida. Las escrituras que participan en
//! el flujo transaccional del orquestador se exponen como funciones `*_tx`
//! sobre la conexión de la transacción.

pub mod accident_repository;
pub mod contract_repository;
pub mod operation_repository;
pub mod schedule_repository;
pub mod vehicle_repository;
