//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod accident;
pub mod contract;
pub mod operation;
pub mod schedule_block;
pub mod vehicle;

pub use accident::{Accident, AccidentType};
pub use contract::Contract;
pub use operation::{
    DispatchCategory, FuelLevel, InsuranceBillingStatus, Operation, OperationStatus, OperationType,
};
pub use schedule_block::{ScheduleBlock, ScheduleType};
pub use vehicle::{Vehicle, VehicleStatus};
