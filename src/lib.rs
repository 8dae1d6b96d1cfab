pub mod auth;
pub mod configuration;
pub mod database;
pub mod domain;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod routes;
pub mod startup;
pub mod telemetry;
