//! MVMIS back-office API
//!
//! Vehicles, customers, contractors, order requisitions, labor repair forms
//! and work orders for a motor-vehicle repair and trading business, served
//! over HTTP with role-based access.

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

pub use routes::create_app;
pub use state::AppState;
