pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod respond;
pub mod routes;
pub mod signature;
pub mod state;
