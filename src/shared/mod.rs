pub mod config;
pub mod error;

pub use config::{AppConfig, SyncConfig};
pub use error::AppError;
