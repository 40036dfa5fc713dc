// src/services/mod.rs

pub mod cache;
pub mod fetcher;
pub mod fipe;
pub mod history;
pub mod metrics;
pub mod price;
