//! HTTP API for managing players and their skill ratings.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod validation;

pub use routes::app;
