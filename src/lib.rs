pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod repositories;
pub mod services;

pub use config::Config;
pub use db::connect_repository;
pub use error::{AppError, Result};
