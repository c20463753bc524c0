//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación. Los
//! servicios puros (reparto de costes, calendario) no tocan persistencia;
//! el orquestador de despachos encapsula los flujos transaccionales que
//! involucran múltiples modelos.

pub mod calendar;
pub mod cost_split;
pub mod dispatch_service;

pub use dispatch_service::DispatchService;
