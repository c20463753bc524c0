//! DTOs de la API
//!
//! Requests, responses y el envelope genérico ApiResponse.

pub mod calendar_dto;
pub mod common;
pub mod dispatch_dto;
pub mod operation_dto;
pub mod schedule_block_dto;

pub use common::ApiResponse;
