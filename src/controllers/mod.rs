//! Controladores MVC
//!
//! Adaptadores finos entre DTOs de la API y los servicios/repositorios.

pub mod calendar_controller;
pub mod dispatch_controller;
pub mod operation_controller;
