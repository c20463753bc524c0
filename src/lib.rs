//! Motor de despachos de flota y liquidación de costes de siniestros
//!
//! Núcleo de back-office de renting: reserva de vehículos sin solapes,
//! clasificación de despachos por categoría de facturación, reparto del
//! coste del vehículo de sustitución entre empresa y cliente, y proyección
//! de reservas sobre un calendario.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
