// src/lib.rs

pub mod config;
pub mod handlers;
pub mod metrics_defs;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
