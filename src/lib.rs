pub mod client;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod routes;
